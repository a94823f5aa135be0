use web_sys::{MouseEvent, TouchEvent};

/// One reading of the pointer along the carousel's scroll axis, independent of
/// whether it came from a mouse or a finger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub coordinate: f64,
    /// Whether the originating event allows `preventDefault` (touch scrolling).
    pub is_cancelable: bool,
}

impl PointerSample {
    #[cfg(test)]
    pub fn new(coordinate: f64) -> Self {
        Self { coordinate, is_cancelable: false }
    }

    pub fn from_mouse(e: &MouseEvent) -> Self {
        Self {
            coordinate: e.page_x() as f64,
            is_cancelable: e.cancelable(),
        }
    }

    /// First active touch; `None` once every finger has lifted.
    pub fn from_touch(e: &TouchEvent) -> Option<Self> {
        let t = e.touches().item(0)?;
        Some(Self {
            coordinate: t.page_x() as f64,
            is_cancelable: e.cancelable(),
        })
    }
}
