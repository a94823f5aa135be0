//! Splits button labels into per-letter spans, stacked twice, so the
//! stylesheet can roll the label on hover.

use web_sys::{Document, Element, HtmlElement};

use crate::error::PageError;
use crate::util::{document_root, query_all_html};

const NBSP: &str = "\u{a0}";

/// One entry per character; whitespace becomes a non-breaking space so the
/// span keeps its width.
pub fn split_letters(text: &str) -> Vec<String> {
    text.chars()
        .map(|c| if c.is_whitespace() { NBSP.to_string() } else { c.to_string() })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Wrapper {
    /// `display:flex; flex-direction:column` set inline.
    Column,
    /// Styled by the `btn-text-wrapper` class.
    Classed,
}

fn label_host(button: &HtmlElement) -> Option<(HtmlElement, Wrapper)> {
    let cls = button.class_list();
    let child = |sel: &'static str| {
        query_all_html(button, sel).into_iter().next().map(|el| (el, Wrapper::Column))
    };
    if cls.contains("hero-cta") || cls.contains("about-cta") {
        child(".cta-text")
    } else if cls.contains("form-submit") {
        child(".submit-text")
    } else {
        Some((button.clone(), Wrapper::Classed))
    }
}

fn build_block(doc: &Document, text: &str) -> Result<Element, PageError> {
    let block = doc.create_element("div")?;
    block.class_list().add_1("block")?;
    for letter in split_letters(text) {
        let span = doc.create_element("span")?;
        span.class_list().add_1("letter")?;
        span.set_text_content(Some(&letter));
        block.append_child(&span)?;
    }
    Ok(block)
}

fn split_one(doc: &Document, host: &HtmlElement, wrapper_kind: Wrapper) -> Result<(), PageError> {
    let text = host.inner_text();
    if text.is_empty() || host.query_selector(".block")?.is_some() {
        return Ok(());
    }
    host.set_inner_html("");

    let wrapper = doc.create_element("div")?;
    match wrapper_kind {
        Wrapper::Column => {
            wrapper.set_attribute("style", "display:flex;flex-direction:column")?;
        }
        Wrapper::Classed => wrapper.class_list().add_1("btn-text-wrapper")?,
    }
    let first = build_block(doc, &text)?;
    let second = first.clone_node_with_deep(true)?;
    wrapper.append_child(&first)?;
    wrapper.append_child(&second)?;
    host.append_child(&wrapper)?;
    Ok(())
}

/// Words of a hero line with the character count seen before each one, so
/// `--char-index` keeps running across word boundaries.
pub fn split_words(text: &str) -> Vec<(usize, &str)> {
    let mut seen = 0;
    text.split_whitespace()
        .map(|word| {
            let first = seen;
            seen += word.chars().count();
            (first, word)
        })
        .collect()
}

/// Rewrite `host`'s text as `.word` spans holding `.char` spans, separated by
/// `.whitespace` spans. Hosts that already hold `.word` spans are left alone.
pub fn split_words_and_chars(doc: &Document, host: &HtmlElement) -> Result<(), PageError> {
    if host.query_selector(".word")?.is_some() {
        return Ok(());
    }
    let text = host.text_content().unwrap_or_default();
    let words = split_words(&text);
    if words.is_empty() {
        return Ok(());
    }
    host.set_inner_html("");
    for (word_index, (first_char, word)) in words.into_iter().enumerate() {
        if word_index > 0 {
            let gap = doc.create_element("span")?;
            gap.class_list().add_1("whitespace")?;
            gap.set_text_content(Some(" "));
            host.append_child(&gap)?;
        }
        let word_el = doc.create_element("span")?;
        word_el.class_list().add_1("word")?;
        word_el.set_attribute("data-word", word)?;
        word_el.set_attribute("style", &format!("--word-index:{word_index}"))?;
        for (i, c) in word.chars().enumerate() {
            let char_el = doc.create_element("span")?;
            char_el.class_list().add_1("char")?;
            let c = c.to_string();
            char_el.set_attribute("data-char", &c)?;
            char_el.set_attribute("style", &format!("--char-index:{}", first_char + i))?;
            char_el.set_text_content(Some(&c));
            word_el.append_child(&char_el)?;
        }
        host.append_child(&word_el)?;
    }
    Ok(())
}

pub fn mount(doc: &Document) -> Result<(), PageError> {
    let root = document_root(doc)?;
    for button in query_all_html(&root, ".slide-btn, .hero-cta, .about-cta, .form-submit") {
        if let Some((host, kind)) = label_host(&button) {
            split_one(doc, &host, kind)?;
        }
    }
    Ok(())
}
