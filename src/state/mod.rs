pub mod carousel;
pub mod icon_tiles;
pub mod modal;
pub mod pointer;

pub use carousel::{Carousel, Scheduled};
pub use icon_tiles::{Backdrop, TileDeck};
pub use modal::{ModalAction, ModalPhase, ModalState};
pub use pointer::PointerSample;
