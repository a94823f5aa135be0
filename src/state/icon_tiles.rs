// Tap-to-expand state for the skill icon tiles on touch devices.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backdrop {
    Shown,
    Hidden,
}

impl Backdrop {
    fn when(on: bool) -> Self {
        if on { Backdrop::Shown } else { Backdrop::Hidden }
    }
}

/// At most one tile is expanded at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileDeck {
    active: Option<usize>,
}

impl TileDeck {
    pub fn is_active(&self, tile: usize) -> bool {
        self.active == Some(tile)
    }

    /// Tap on `tile`: collapse every other tile and flip this one.
    pub fn toggle(&mut self, tile: usize) -> Backdrop {
        self.active = if self.is_active(tile) { None } else { Some(tile) };
        Backdrop::when(self.active.is_some())
    }

    /// Tap outside every tile.
    pub fn dismiss(&mut self) -> Backdrop {
        self.active = None;
        Backdrop::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_then_closes() {
        let mut deck = TileDeck::default();
        assert_eq!(deck.toggle(2), Backdrop::Shown);
        assert!(deck.is_active(2));
        assert_eq!(deck.toggle(2), Backdrop::Hidden);
        assert_eq!(deck, TileDeck::default());
    }

    #[test]
    fn opening_another_tile_closes_the_first() {
        let mut deck = TileDeck::default();
        deck.toggle(0);
        assert_eq!(deck.toggle(3), Backdrop::Shown);
        assert!(!deck.is_active(0));
        assert!(deck.is_active(3));
    }

    #[test]
    fn dismiss_hides_everything() {
        let mut deck = TileDeck::default();
        deck.toggle(1);
        assert_eq!(deck.dismiss(), Backdrop::Hidden);
        assert_eq!(deck, TileDeck::default());
    }
}
