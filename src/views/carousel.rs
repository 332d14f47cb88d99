//! Per-gift image carousel state.
//!
//! Index 0 is the primary image, 1.. are the extra images in order. Both the
//! arrow controls and horizontal swipes move through the images with
//! wraparound.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Minimum horizontal travel for a touch gesture to count as a swipe.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// How long the slide animation flag stays raised after a gesture or control.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    Next,
    Previous,
    SnapBack,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarouselState {
    index: usize,
    touch_start: Option<f64>,
    touch_end: Option<f64>,
    drag_offset: f64,
    transition_started: Option<Instant>,
}

impl CarouselState {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Pending horizontal displacement while a finger is down.
    pub fn drag_offset(&self) -> f64 {
        self.drag_offset
    }

    pub fn is_transitioning(&self, now: Instant) -> bool {
        self.transition_started
            .is_some_and(|started| now.saturating_duration_since(started) < TRANSITION_DURATION)
    }

    pub fn next(&mut self, image_count: usize, now: Instant) {
        if image_count == 0 {
            return;
        }
        self.index = (self.index + 1) % image_count;
        self.transition_started = Some(now);
    }

    pub fn previous(&mut self, image_count: usize, now: Instant) {
        if image_count == 0 {
            return;
        }
        self.index = if self.index == 0 {
            image_count - 1
        } else {
            self.index - 1
        };
        self.transition_started = Some(now);
    }

    pub fn touch_start(&mut self, x: f64) {
        self.touch_end = None;
        self.touch_start = Some(x);
        self.transition_started = None;
    }

    pub fn touch_move(&mut self, x: f64) {
        let Some(start) = self.touch_start else {
            return;
        };
        self.touch_end = Some(x);
        self.drag_offset = x - start;
    }

    /// Finishes a gesture. Leftward travel past the threshold advances,
    /// rightward travel goes back, anything shorter snaps back.
    pub fn touch_end(&mut self, image_count: usize, now: Instant) -> SwipeOutcome {
        let (Some(start), Some(end)) = (self.touch_start.take(), self.touch_end.take()) else {
            self.drag_offset = 0.0;
            return SwipeOutcome::SnapBack;
        };

        let distance = start - end;
        let outcome = if distance > SWIPE_THRESHOLD {
            self.next(image_count, now);
            SwipeOutcome::Next
        } else if distance < -SWIPE_THRESHOLD {
            self.previous(image_count, now);
            SwipeOutcome::Previous
        } else {
            SwipeOutcome::SnapBack
        };

        // animate the snap back as well
        self.transition_started = Some(now);
        self.drag_offset = 0.0;
        outcome
    }

    /// Keeps the index valid after the gift lost images.
    pub fn clamp(&mut self, image_count: usize) {
        if self.index >= image_count {
            self.index = 0;
        }
    }
}

/// Carousel state for every gift on screen, keyed by gift id.
#[derive(Debug, Clone, Default)]
pub struct CarouselBoard {
    states: HashMap<String, CarouselState>,
}

impl CarouselBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for a gift; gifts never touched read as index 0.
    pub fn get(&self, gift_id: &str) -> CarouselState {
        self.states.get(gift_id).cloned().unwrap_or_default()
    }

    pub fn state_mut(&mut self, gift_id: &str) -> &mut CarouselState {
        self.states.entry(gift_id.to_string()).or_default()
    }

    /// Drops state of gifts that are gone and clamps the rest.
    /// `image_counts` maps the current gift ids to their image counts.
    pub fn retain_gifts(&mut self, image_counts: &HashMap<String, usize>) {
        self.states.retain(|id, state| match image_counts.get(id) {
            Some(&count) => {
                state.clamp(count);
                true
            }
            None => false,
        });
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(
        state: &mut CarouselState,
        from: f64,
        to: f64,
        images: usize,
        now: Instant,
    ) -> SwipeOutcome {
        state.touch_start(from);
        state.touch_move((from + to) / 2.0);
        state.touch_move(to);
        state.touch_end(images, now)
    }

    #[test]
    fn test_next_wraps_back_to_start() {
        let now = Instant::now();
        let mut state = CarouselState::default();
        for _ in 0..3 {
            state.next(3, now);
        }
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn test_previous_from_first_goes_to_last() {
        let mut state = CarouselState::default();
        state.previous(3, Instant::now());
        assert_eq!(state.index(), 2);
    }

    #[test]
    fn test_short_swipe_snaps_back() {
        let now = Instant::now();
        let mut state = CarouselState::default();
        assert_eq!(swipe(&mut state, 200.0, 160.0, 3, now), SwipeOutcome::SnapBack);
        assert_eq!(state.index(), 0);
        assert_eq!(state.drag_offset(), 0.0);

        assert_eq!(swipe(&mut state, 160.0, 200.0, 3, now), SwipeOutcome::SnapBack);
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn test_left_swipe_advances_with_wraparound() {
        let now = Instant::now();
        let mut state = CarouselState::default();
        assert_eq!(swipe(&mut state, 200.0, 140.0, 3, now), SwipeOutcome::Next);
        assert_eq!(state.index(), 1);
        swipe(&mut state, 200.0, 140.0, 3, now);
        swipe(&mut state, 200.0, 140.0, 3, now);
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn test_right_swipe_goes_back() {
        let now = Instant::now();
        let mut state = CarouselState::default();
        assert_eq!(swipe(&mut state, 100.0, 160.0, 4, now), SwipeOutcome::Previous);
        assert_eq!(state.index(), 3);
    }

    #[test]
    fn test_tap_without_move_changes_nothing() {
        let now = Instant::now();
        let mut state = CarouselState::default();
        state.touch_start(120.0);
        assert_eq!(state.touch_end(3, now), SwipeOutcome::SnapBack);
        assert_eq!(state.index(), 0);
        assert!(!state.is_transitioning(now));
    }

    #[test]
    fn test_drag_offset_tracks_finger() {
        let mut state = CarouselState::default();
        state.touch_move(30.0); // no touch yet
        assert_eq!(state.drag_offset(), 0.0);
        state.touch_start(100.0);
        state.touch_move(70.0);
        assert_eq!(state.drag_offset(), -30.0);
    }

    #[test]
    fn test_transition_flag_expires() {
        let now = Instant::now();
        let mut state = CarouselState::default();
        state.next(2, now);
        assert!(state.is_transitioning(now));
        assert!(state.is_transitioning(now + Duration::from_millis(299)));
        assert!(!state.is_transitioning(now + TRANSITION_DURATION));
        state.touch_start(0.0);
        assert!(!state.is_transitioning(now));
    }

    #[test]
    fn test_board_prunes_and_clamps() {
        let now = Instant::now();
        let mut board = CarouselBoard::new();
        board.state_mut("a").previous(5, now); // index 4
        board.state_mut("b").next(2, now);
        assert_eq!(board.get("a").index(), 4);

        let counts = HashMap::from([("a".to_string(), 2usize)]);
        board.retain_gifts(&counts);
        assert_eq!(board.len(), 1);
        assert_eq!(board.get("a").index(), 0);
        assert_eq!(board.get("b").index(), 0);
    }
}
