// Enhancements bound to the static page markup (as opposed to the yew overlays).

pub mod anchors;
pub mod carousel;
pub mod icon_tiles;
pub mod letters;
pub mod loader;
pub mod reveal;
pub mod scroll_lock;

use crate::config::Timings;
use crate::error::PageError;
use crate::util::{clog, cwarn, document};

/// Mount every page enhancement. A section that fails to mount is logged and
/// left static; the others still mount.
pub fn enhance(timings: Timings) {
    let doc = match document() {
        Ok(d) => d,
        Err(e) => {
            cwarn(&format!("page: {e}"));
            return;
        }
    };
    let results: [(&str, Result<(), PageError>); 6] = [
        ("loader", loader::mount(&doc, timings)),
        ("anchors", anchors::mount(&doc)),
        ("reveal", reveal::mount(&doc)),
        ("icon tiles", icon_tiles::mount(&doc, timings)),
        ("carousel", carousel::mount(&doc)),
        ("letters", letters::mount(&doc)),
    ];
    let mut mounted = 0;
    for (name, result) in results {
        match result {
            Ok(()) => mounted += 1,
            Err(e) => cwarn(&format!("{name}: {e}")),
        }
    }
    clog(&format!("page: {mounted}/6 enhancements mounted"));
}
