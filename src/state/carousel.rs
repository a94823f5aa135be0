//! Drag-and-snap state machine for the work carousel.
//!
//! Nothing in here touches the DOM. The binding in `page::carousel` feeds it
//! pointer samples and measurements, then renders [`Carousel::offset`],
//! [`Carousel::transition_enabled`] and [`Carousel::is_dragging`] back onto the
//! track. Timer work comes back out as [`Scheduled`] tasks which the binding
//! runs later through [`Carousel::run_deferred`].

use super::pointer::PointerSample;
use crate::config::CarouselConfig;

/// Work the engine wants done after a delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    /// Forget the "moved" flag of the gesture with this generation.
    ClearMoved { gesture: u64 },
    /// Turn transitions back on after the instant settle with this generation.
    RestoreTransition { settle: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scheduled {
    pub task: Deferred,
    pub delay_ms: u32,
}

/// Result of a pointer move while dragging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragMove {
    pub offset: f64,
    /// The platform's default (page scroll) should be cancelled for this event.
    pub suppress_default: bool,
}

/// Apply elastic attenuation to `candidate` outside `[min, max]`.
pub fn resist(candidate: f64, min: f64, max: f64, factor: f64) -> f64 {
    if candidate > max {
        max + (candidate - max) * factor
    } else if candidate < min {
        min - (min - candidate) * factor
    } else {
        candidate
    }
}

fn measured(width: f64) -> f64 {
    if width.is_finite() && width > 0.0 { width } else { 0.0 }
}

#[derive(Clone, Debug)]
pub struct Carousel {
    config: CarouselConfig,
    slide_count: usize,
    slide_width: f64,
    current_index: usize,
    dragging: bool,
    has_moved: bool,
    drag_origin: f64,
    gesture_start: f64,
    offset: f64,
    transition_enabled: bool,
    gesture_gen: u64,
    settle_gen: u64,
}

impl Carousel {
    pub fn new(slide_count: usize, slide_width: f64, config: CarouselConfig) -> Self {
        Self {
            config: config.sanitized(),
            slide_count,
            slide_width: measured(slide_width),
            current_index: 0,
            dragging: false,
            has_moved: false,
            drag_origin: 0.0,
            gesture_start: 0.0,
            offset: 0.0,
            transition_enabled: true,
            gesture_gen: 0,
            settle_gen: 0,
        }
    }

    pub fn slide_width(&self) -> f64 {
        self.slide_width
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Horizontal translation (px) last written to the track.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn transition_enabled(&self) -> bool {
        self.transition_enabled
    }

    fn pitch(&self) -> f64 {
        self.slide_width + self.config.gap
    }

    /// Resting offset of slide `index`.
    pub fn offset_for(&self, index: usize) -> f64 {
        -self.pitch() * index as f64
    }

    /// `(min, max)` offsets before resistance kicks in.
    pub fn bounds(&self) -> (f64, f64) {
        (self.offset_for(self.slide_count.saturating_sub(1)), 0.0)
    }

    /// Adopt a freshly measured slide width without moving the track.
    pub fn set_slide_width(&mut self, width: f64) {
        self.slide_width = measured(width);
    }

    /// Begin a drag. `live_offset` is the track's on-screen position if the
    /// caller could measure it (it differs from [`Self::offset`] while an
    /// animated settle is still in flight). Returns `false` when there is
    /// nothing to drag.
    pub fn gesture_start(&mut self, sample: PointerSample, live_offset: Option<f64>) -> bool {
        if self.slide_count == 0 {
            return false;
        }
        self.gesture_gen += 1;
        self.dragging = true;
        self.has_moved = false;
        self.transition_enabled = false;
        self.gesture_start = sample.coordinate;
        if let Some(live) = live_offset.filter(|v| v.is_finite()) {
            self.offset = live;
        }
        self.drag_origin = self.offset;
        true
    }

    pub fn gesture_move(&mut self, sample: PointerSample) -> Option<DragMove> {
        if !self.dragging {
            return None;
        }
        let delta = sample.coordinate - self.gesture_start;
        let past_jitter = delta.abs() > self.config.jitter_px;
        if past_jitter {
            self.has_moved = true;
        }
        let (min, max) = self.bounds();
        self.offset = resist(self.drag_origin + delta, min, max, self.config.resistance);
        Some(DragMove {
            offset: self.offset,
            suppress_default: past_jitter && sample.is_cancelable,
        })
    }

    /// Release the drag, resolve the target slide and start an animated settle.
    /// The returned task clears the "moved" flag once the trailing click has
    /// had its chance to be suppressed.
    pub fn gesture_end(&mut self) -> Option<Scheduled> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        self.transition_enabled = true;

        let net = self.offset - self.drag_origin;
        let threshold = self.slide_width * self.config.snap_ratio;
        let mut index = self.current_index;
        if net.abs() > threshold {
            if net > 0.0 && index > 0 {
                index -= 1;
            } else if net < 0.0 && index + 1 < self.slide_count {
                index += 1;
            }
        }
        self.settle(index, true);

        Some(Scheduled {
            task: Deferred::ClearMoved { gesture: self.gesture_gen },
            delay_ms: self.config.release_reset_ms,
        })
    }

    /// Move to the resting offset of `index` (clamped to the last slide).
    /// Instant settles suspend transitions and hand back the task that
    /// re-enables them.
    pub fn settle(&mut self, index: usize, animate: bool) -> Option<Scheduled> {
        let index = index.min(self.slide_count.saturating_sub(1));
        self.offset = self.offset_for(index);
        self.current_index = index;
        if animate {
            return None;
        }
        self.transition_enabled = false;
        self.settle_gen += 1;
        Some(Scheduled {
            task: Deferred::RestoreTransition { settle: self.settle_gen },
            delay_ms: self.config.resize_settle_ms,
        })
    }

    /// Viewport changed size: re-measure and jump (never animate) to the
    /// current slide.
    pub fn resize(&mut self, slide_width: f64) -> Option<Scheduled> {
        self.set_slide_width(slide_width);
        if self.dragging {
            // The release will settle against the new geometry.
            return None;
        }
        self.settle(self.current_index, false)
    }

    /// A click on a slide right after a drag is the browser's synthetic
    /// terminal click and must not activate the slide.
    pub fn should_suppress_click(&self) -> bool {
        self.has_moved
    }

    /// Run a task previously returned by this engine. Stale tasks (superseded
    /// by a newer gesture or settle) are ignored.
    pub fn run_deferred(&mut self, task: Deferred) {
        match task {
            Deferred::ClearMoved { gesture } => {
                if gesture == self.gesture_gen && !self.dragging {
                    self.has_moved = false;
                }
            }
            Deferred::RestoreTransition { settle } => {
                if settle == self.settle_gen && !self.dragging {
                    self.transition_enabled = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn engine(slides: usize, width: f64) -> Carousel {
        Carousel::new(slides, width, CarouselConfig::default())
    }

    fn settled_at(slides: usize, width: f64, index: usize) -> Carousel {
        let mut c = engine(slides, width);
        if let Some(s) = c.settle(index, false) {
            c.run_deferred(s.task);
        }
        c
    }

    fn drag(c: &mut Carousel, from: f64, to: f64) -> Option<Scheduled> {
        assert!(c.gesture_start(PointerSample::new(from), None));
        c.gesture_move(PointerSample::new(to));
        c.gesture_end()
    }

    #[test]
    fn test_drag_past_threshold_advances() {
        let mut c = settled_at(5, 300.0, 2);
        assert!((c.offset() - -640.0).abs() < EPS);
        drag(&mut c, 500.0, 450.0);
        assert_eq!(c.current_index(), 3);
        assert!((c.offset() - -960.0).abs() < EPS);
    }

    #[test]
    fn test_short_drag_springs_back() {
        let mut c = settled_at(5, 300.0, 2);
        drag(&mut c, 500.0, 530.0);
        assert_eq!(c.current_index(), 2);
        assert!((c.offset() - -640.0).abs() < EPS);
    }

    #[test]
    fn test_drag_right_retreats() {
        let mut c = settled_at(5, 300.0, 2);
        drag(&mut c, 100.0, 400.0);
        assert_eq!(c.current_index(), 1);
        assert!((c.offset() - -320.0).abs() < EPS);
    }

    #[test]
    fn test_long_drag_moves_one_slide_only() {
        let mut c = settled_at(5, 300.0, 1);
        drag(&mut c, 1000.0, 0.0);
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn test_index_clamped_at_ends() {
        let mut c = settled_at(5, 300.0, 0);
        drag(&mut c, 0.0, 200.0);
        assert_eq!(c.current_index(), 0);
        assert!(c.offset().abs() < EPS);

        let mut c = settled_at(5, 300.0, 4);
        drag(&mut c, 500.0, 100.0);
        assert_eq!(c.current_index(), 4);
        assert!((c.offset() - -1280.0).abs() < EPS);
    }

    #[test]
    fn test_resistance_at_start() {
        let mut c = settled_at(5, 300.0, 0);
        c.gesture_start(PointerSample::new(0.0), None);
        let m = c.gesture_move(PointerSample::new(100.0)).unwrap();
        assert!((m.offset - 25.0).abs() < EPS);
    }

    #[test]
    fn test_resistance_at_end() {
        let mut c = settled_at(5, 300.0, 4);
        c.gesture_start(PointerSample::new(400.0), None);
        let m = c.gesture_move(PointerSample::new(200.0)).unwrap();
        // min = -1280, candidate = -1480, overshoot 200 * 0.25
        assert!((m.offset - -1330.0).abs() < EPS);
    }

    #[test]
    fn test_resist_inside_bounds_is_identity() {
        assert!((resist(-500.0, -1280.0, 0.0, 0.25) - -500.0).abs() < EPS);
        assert!((resist(40.0, -1280.0, 0.0, 0.25) - 10.0).abs() < EPS);
        assert!((resist(-1300.0, -1280.0, 0.0, 0.5) - -1290.0).abs() < EPS);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut c = engine(3, 300.0);
        assert!(c.gesture_move(PointerSample::new(50.0)).is_none());
        assert!(c.gesture_end().is_none());
        assert!(c.offset().abs() < EPS);
    }

    #[test]
    fn test_tap_does_not_suppress_click() {
        let mut c = engine(3, 300.0);
        c.gesture_start(PointerSample::new(10.0), None);
        c.gesture_move(PointerSample::new(13.0));
        c.gesture_end();
        assert!(!c.has_moved());
        assert!(!c.should_suppress_click());
    }

    #[test]
    fn test_drag_suppresses_click_until_reset() {
        let mut c = engine(3, 300.0);
        let reset = drag(&mut c, 10.0, 14.0).unwrap();
        assert!(c.should_suppress_click());
        assert_eq!(reset.delay_ms, 100);
        c.run_deferred(reset.task);
        assert!(!c.should_suppress_click());
    }

    #[test]
    fn test_stale_reset_does_not_touch_new_gesture() {
        let mut c = engine(3, 300.0);
        let stale = drag(&mut c, 10.0, 60.0).unwrap();
        c.gesture_start(PointerSample::new(0.0), None);
        c.gesture_move(PointerSample::new(20.0));
        c.run_deferred(stale.task);
        assert!(c.has_moved());
    }

    #[test]
    fn test_suppress_default_needs_cancelable_event() {
        let mut c = engine(3, 300.0);
        c.gesture_start(PointerSample::new(0.0), None);
        let passive = c.gesture_move(PointerSample::new(-10.0)).unwrap();
        assert!(!passive.suppress_default);
        let m = c
            .gesture_move(PointerSample { coordinate: -12.0, is_cancelable: true })
            .unwrap();
        assert!(m.suppress_default);
        let small = c
            .gesture_move(PointerSample { coordinate: -2.0, is_cancelable: true })
            .unwrap();
        assert!(!small.suppress_default);
    }

    #[test]
    fn test_gesture_start_captures_live_offset() {
        let mut c = settled_at(5, 300.0, 1);
        // Track still animating from slide 1 towards slide 2.
        drag(&mut c, 0.0, -100.0);
        assert_eq!(c.current_index(), 2);
        c.gesture_start(PointerSample::new(0.0), Some(-500.0));
        let m = c.gesture_move(PointerSample::new(-10.0)).unwrap();
        assert!((m.offset - -510.0).abs() < EPS);
    }

    #[test]
    fn test_transition_suspended_while_dragging() {
        let mut c = engine(3, 300.0);
        assert!(c.transition_enabled());
        c.gesture_start(PointerSample::new(0.0), None);
        assert!(c.is_dragging());
        assert!(!c.transition_enabled());
        c.gesture_end();
        assert!(!c.is_dragging());
        assert!(c.transition_enabled());
    }

    #[test]
    fn test_resize_repositions_without_index_change() {
        let mut c = settled_at(5, 300.0, 3);
        let task = c.resize(200.0).unwrap();
        assert_eq!(c.current_index(), 3);
        assert!((c.offset() - -660.0).abs() < EPS);
        assert!(!c.transition_enabled());
        assert_eq!(task.delay_ms, 50);
        c.run_deferred(task.task);
        assert!(c.transition_enabled());
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut c = settled_at(5, 300.0, 2);
        for _ in 0..3 {
            if let Some(t) = c.resize(300.0) {
                c.run_deferred(t.task);
            }
        }
        assert_eq!(c.current_index(), 2);
        assert!((c.offset() - -640.0).abs() < EPS);
    }

    #[test]
    fn test_stale_transition_restore_ignored_mid_drag() {
        let mut c = settled_at(5, 300.0, 2);
        let task = c.resize(320.0).unwrap();
        c.gesture_start(PointerSample::new(0.0), None);
        c.run_deferred(task.task);
        assert!(!c.transition_enabled());
    }

    #[test]
    fn test_zero_slides_is_inert() {
        let mut c = engine(0, 300.0);
        assert!(!c.gesture_start(PointerSample::new(0.0), None));
        assert!(c.gesture_move(PointerSample::new(100.0)).is_none());
        assert!(c.gesture_end().is_none());
        c.settle(3, true);
        assert_eq!(c.current_index(), 0);
        assert!(c.offset().abs() < EPS);
    }

    #[test]
    fn test_unmeasured_width_stays_finite() {
        let mut c = engine(4, f64::NAN);
        assert!(c.slide_width().abs() < EPS);
        drag(&mut c, 0.0, -30.0);
        assert_eq!(c.current_index(), 1);
        assert!(c.offset().is_finite());
        assert!((c.offset() - -20.0).abs() < EPS);
    }

    #[test]
    fn test_settle_clamps_index() {
        let mut c = engine(3, 100.0);
        c.settle(9, true);
        assert_eq!(c.current_index(), 2);
        assert!((c.offset() - -240.0).abs() < EPS);
    }

    #[test]
    fn test_configurable_threshold() {
        let cfg = CarouselConfig { snap_ratio: 0.5, ..CarouselConfig::default() };
        let mut c = Carousel::new(3, 300.0, cfg);
        drag(&mut c, 0.0, -100.0);
        assert_eq!(c.current_index(), 0);
        drag(&mut c, 0.0, -160.0);
        assert_eq!(c.current_index(), 1);
    }
}
