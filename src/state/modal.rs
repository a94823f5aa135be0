//! Lifecycle of the project case-study overlay.
//!
//! The overlay fades out before the page scroll is restored, so closing has a
//! visible `Closing` phase. Every open bumps `epoch`; a delayed `FinishClose`
//! carrying an older epoch belongs to a close that a reopen already cancelled.

use std::rc::Rc;
use yew::Reducible;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Open { project: String },
    Closing { project: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModalState {
    pub phase: ModalPhase,
    /// Page scroll position captured when the overlay opened.
    pub scroll_y: f64,
    pub epoch: u32,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            phase: ModalPhase::Closed,
            scroll_y: 0.0,
            epoch: 0,
        }
    }
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self.phase, ModalPhase::Open { .. })
    }

    /// Project whose content is rendered (kept while fading out).
    pub fn project(&self) -> Option<&str> {
        match &self.phase {
            ModalPhase::Open { project } | ModalPhase::Closing { project } => Some(project),
            ModalPhase::Closed => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModalAction {
    Open { project: String, scroll_y: f64 },
    BeginClose,
    FinishClose { epoch: u32 },
}

impl Reducible for ModalState {
    type Action = ModalAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use ModalAction::*;
        let mut new = (*self).clone();
        match action {
            Open { project, scroll_y } => {
                if self.is_open() {
                    return self;
                }
                // Reopening mid-fade keeps the first scroll anchor: the body is still locked.
                if !matches!(self.phase, ModalPhase::Closing { .. }) {
                    new.scroll_y = scroll_y;
                }
                new.phase = ModalPhase::Open { project };
                new.epoch = new.epoch.wrapping_add(1);
            }
            BeginClose => match &self.phase {
                ModalPhase::Open { project } => {
                    new.phase = ModalPhase::Closing { project: project.clone() };
                }
                _ => return self,
            },
            FinishClose { epoch } => {
                if epoch != self.epoch || !matches!(self.phase, ModalPhase::Closing { .. }) {
                    return self;
                }
                new.phase = ModalPhase::Closed;
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: Rc<ModalState>, action: ModalAction) -> Rc<ModalState> {
        state.reduce(action)
    }

    fn open(id: &str, y: f64) -> ModalAction {
        ModalAction::Open { project: id.to_string(), scroll_y: y }
    }

    #[test]
    fn open_close_cycle() {
        let s = Rc::new(ModalState::default());
        let s = apply(s, open("lumena", 840.0));
        assert!(s.is_open());
        assert_eq!(s.project(), Some("lumena"));
        assert!((s.scroll_y - 840.0).abs() < 1e-9);

        let s = apply(s, ModalAction::BeginClose);
        assert!(!s.is_open());
        assert_eq!(s.project(), Some("lumena"));

        let epoch = s.epoch;
        let s = apply(s, ModalAction::FinishClose { epoch });
        assert_eq!(s.phase, ModalPhase::Closed);
        assert_eq!(s.project(), None);
    }

    #[test]
    fn reopen_during_fade_cancels_pending_finish() {
        let s = Rc::new(ModalState::default());
        let s = apply(s, open("ges", 100.0));
        let s = apply(s, ModalAction::BeginClose);
        let stale = s.epoch;
        let s = apply(s, open("finizen", 999.0));
        assert!((s.scroll_y - 100.0).abs() < 1e-9);
        let s = apply(s, ModalAction::FinishClose { epoch: stale });
        assert_eq!(s.phase, ModalPhase::Open { project: "finizen".into() });
    }

    #[test]
    fn every_open_is_a_phase_change() {
        // Overlay effects (scroll lock, scroll reset) key on the phase.
        let s = Rc::new(ModalState::default());
        let opened = apply(s.clone(), open("tintara", 0.0));
        let closing = apply(opened.clone(), ModalAction::BeginClose);
        let reopened = apply(closing.clone(), open("tintara", 0.0));
        let phases = [&s.phase, &opened.phase, &closing.phase, &reopened.phase];
        assert!(phases.windows(2).all(|w| w[0] != w[1]));
        assert!(reopened.is_open());
    }

    #[test]
    fn close_when_not_open_is_a_noop() {
        let s = Rc::new(ModalState::default());
        let after = apply(s.clone(), ModalAction::BeginClose);
        assert!(Rc::ptr_eq(&s, &after));
    }

    #[test]
    fn second_open_is_ignored() {
        let s = apply(Rc::new(ModalState::default()), open("aswent", 0.0));
        let again = apply(s.clone(), open("tintara", 50.0));
        assert!(Rc::ptr_eq(&s, &again));
    }
}
