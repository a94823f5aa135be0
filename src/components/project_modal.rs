use crate::model::{Project, Section, SectionBody, timeline_layout};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ProjectModalProps {
    /// Project being shown, kept while the overlay fades out.
    pub project: Option<Project>,
    pub open: bool,
    pub panel_ref: NodeRef,
    pub content_ref: NodeRef,
    pub on_close: Callback<()>,
}

fn section_row(index: usize, section: &Section) -> Html {
    let body = match &section.body {
        SectionBody::Paragraph { text } => html! { <p>{ text.clone() }</p> },
        SectionBody::Bullets { items } => html! {
            <ul>{ for items.iter().map(|i| html! { <li>{ i.clone() }</li> }) }</ul>
        },
    };
    let image = section.image.as_ref().map(|img| {
        html! { <div class="image-clip"><img src={img.src.clone()} alt={img.alt.clone()} /></div> }
    });
    html! {
        <div class={classes!("project-row", format!("project-row-{}", index + 3))}>
            <div class="text-block">
                <h3>{ section.heading.clone() }</h3>
                { body }
            </div>
            { for image }
        </div>
    }
}

fn details(project: &Project) -> Html {
    if project.timeline.is_empty() && project.stack.is_empty() && project.launch_note.is_none() {
        return html! {};
    }
    let spans = timeline_layout(&project.timeline);
    html! {
        <div class="details-column">
            if !project.timeline.is_empty() {
                <div class="project-timeline-section">
                    <h3>{"Timeline"}</h3>
                    <div class="timeline-container">
                        { for project.timeline.iter().zip(spans).map(|(phase, span)| html! {
                            <div class="timeline-phase">
                                <div class="timeline-phase-header">
                                    <span class="timeline-phase-name">{ phase.name.clone() }</span>
                                    <span class="timeline-phase-duration">{ phase.duration.to_string() }</span>
                                </div>
                                <div class="timeline-phase-track">
                                    <div class="timeline-phase-bar"
                                        style={format!("margin-left: {:.2}%; width: {:.2}%;", span.start_pct, span.width_pct)}></div>
                                </div>
                            </div>
                        }) }
                    </div>
                </div>
            }
            if !project.stack.is_empty() {
                <div class="project-stack-info">
                    { for project.stack.iter().map(|row| html! {
                        <div class="stack-info-row">
                            <span class="stack-info-label">{ row.label.clone() }</span>
                            <span class="stack-info-value">{ row.value.clone() }</span>
                        </div>
                    }) }
                </div>
            }
            if let Some(note) = &project.launch_note {
                <p class="project-launch-note">{ note.clone() }</p>
            }
        </div>
    }
}

fn case_study(project: &Project) -> Html {
    html! {
        <>
            <div class="project-row project-row-1">
                <div class="image-clip reveal-text">
                    <img src={project.hero.src.clone()} alt={project.hero.alt.clone()} />
                </div>
                <div class="text-block">
                    <h1 class="reveal-text">{ project.title.clone() }</h1>
                    <p class="reveal-text project-tagline">{ project.tagline.clone() }</p>
                    <h2 class="reveal-text">{ project.discipline.clone() }</h2>
                    <h2 class="reveal-text">{ project.industry.clone() }</h2>
                    <p class="reveal-text">{ project.summary.clone() }</p>
                </div>
            </div>
            { for project.sections.iter().enumerate().map(|(i, s)| section_row(i, s)) }
            { details(project) }
            { for project.gallery.iter().map(|img| html! {
                <div class="project-row project-row-gallery">
                    <div class="image-clip"><img src={img.src.clone()} alt={img.alt.clone()} /></div>
                </div>
            }) }
            <div class="project-row project-row-8">
                <p>{"Designed and developed by Hubert Zakrzewski"}</p>
                <p>{ format!("© {} All rights reserved", project.year) }</p>
            </div>
        </>
    }
}

#[function_component]
pub fn ProjectModal(props: &ProjectModalProps) -> Html {
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    // Clicks inside the panel never reach the backdrop handler.
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    let data_project = props.project.as_ref().map(|p| p.id.clone());
    let content = props.project.as_ref().map(case_study).unwrap_or_default();

    html! {
        <div id="projectModal"
            class={classes!("project-modal", props.open.then_some("active"))}
            data-project={data_project}
            aria-hidden={(!props.open).to_string()}
            onclick={close_cb.clone()}>
            <div class="project-modal-panel" ref={props.panel_ref.clone()} onclick={keep_open}>
                <button id="modalClose" class="modal-close" aria-label="Close" onclick={close_cb}>{"×"}</button>
                <div id="modalContent" class="project-modal-content" ref={props.content_ref.clone()}>{ content }</div>
            </div>
        </div>
    }
}
