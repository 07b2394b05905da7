//! Backend-agnostic touch input
//!
//! Hosts translate their platform touch callbacks into [`Touch`] samples. The
//! [`TouchState`] buffer collects a frame's worth of samples in arrival order
//! and keeps the set of touches that are currently down.

use crate::primitives::Point;
use std::collections::HashMap;

/// Identifier the host assigns to one finger for the lifetime of its contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TouchId(pub u64);

/// Where a touch sample sits in its contact's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger went down
    Began,
    /// Finger moved while down
    Moved,
    /// Finger lifted
    Ended,
    /// The system took the touch away (gesture recognizer, incoming call, ...)
    Cancelled,
}

/// One touch sample, in the receiving node's parent space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub id: TouchId,
    pub phase: TouchPhase,
    pub location: Point,
}

impl Touch {
    pub fn new(id: TouchId, phase: TouchPhase, location: impl Into<Point>) -> Self {
        Self {
            id,
            phase,
            location: location.into(),
        }
    }

    pub fn began(id: TouchId, location: impl Into<Point>) -> Self {
        Self::new(id, TouchPhase::Began, location)
    }

    pub fn moved(id: TouchId, location: impl Into<Point>) -> Self {
        Self::new(id, TouchPhase::Moved, location)
    }

    pub fn ended(id: TouchId, location: impl Into<Point>) -> Self {
        Self::new(id, TouchPhase::Ended, location)
    }

    pub fn cancelled(id: TouchId, location: impl Into<Point>) -> Self {
        Self::new(id, TouchPhase::Cancelled, location)
    }

    /// Whether this sample closes the contact
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, TouchPhase::Ended | TouchPhase::Cancelled)
    }
}

/// Tracks active touches and the samples received this frame
///
/// Samples that contradict the contact state (a move for a finger that never
/// went down, a second `Began` for a finger already down) are dropped, so
/// consumers only ever see well-formed sequences.
#[derive(Debug, Clone, Default)]
pub struct TouchState {
    /// Last known location of each finger currently down
    active: HashMap<TouchId, Point>,

    /// Samples recorded since the last `begin_frame`
    samples: Vec<Touch>,
}

impl TouchState {
    /// Create a new touch state with no active contacts
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the start of each frame to clear frame-specific state
    pub fn begin_frame(&mut self) {
        self.samples.clear();
    }

    /// Record a finger going down
    pub fn touch_began(&mut self, id: TouchId, location: Point) {
        if self.active.contains_key(&id) {
            return;
        }
        self.active.insert(id, location);
        self.samples.push(Touch::began(id, location));
    }

    /// Record a finger moving
    pub fn touch_moved(&mut self, id: TouchId, location: Point) {
        if let Some(last) = self.active.get_mut(&id) {
            *last = location;
            self.samples.push(Touch::moved(id, location));
        }
    }

    /// Record a finger lifting
    pub fn touch_ended(&mut self, id: TouchId, location: Point) {
        if self.active.remove(&id).is_some() {
            self.samples.push(Touch::ended(id, location));
        }
    }

    /// Record the system cancelling a touch at its last known location
    pub fn touch_cancelled(&mut self, id: TouchId) {
        if let Some(last) = self.active.remove(&id) {
            self.samples.push(Touch::cancelled(id, last));
        }
    }

    /// Cancel every contact, e.g. when the scene is paused
    pub fn cancel_all(&mut self) {
        let mut ids: Vec<TouchId> = self.active.keys().copied().collect();
        ids.sort_by_key(|id| id.0);
        for id in ids {
            self.touch_cancelled(id);
        }
    }

    /// Samples recorded this frame, in arrival order
    pub fn samples(&self) -> &[Touch] {
        &self.samples
    }

    /// Whether the given finger is currently down
    pub fn is_down(&self, id: TouchId) -> bool {
        self.active.contains_key(&id)
    }

    /// Number of fingers currently down
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_lifecycle() {
        let mut input = TouchState::new();
        let finger = TouchId(1);

        input.touch_began(finger, Point::new(1.0, 2.0));
        input.touch_moved(finger, Point::new(3.0, 4.0));
        assert!(input.is_down(finger));

        input.touch_ended(finger, Point::new(5.0, 6.0));
        assert!(!input.is_down(finger));

        let phases: Vec<TouchPhase> = input.samples().iter().map(|t| t.phase).collect();
        assert_eq!(
            phases,
            vec![TouchPhase::Began, TouchPhase::Moved, TouchPhase::Ended]
        );

        input.begin_frame();
        assert!(input.samples().is_empty());
    }

    #[test]
    fn test_malformed_samples_are_dropped() {
        let mut input = TouchState::new();
        let finger = TouchId(7);

        input.touch_moved(finger, Point::zero());
        input.touch_ended(finger, Point::zero());
        assert!(input.samples().is_empty());

        input.touch_began(finger, Point::zero());
        input.touch_began(finger, Point::new(9.0, 9.0));
        assert_eq!(input.samples().len(), 1);
    }

    #[test]
    fn test_cancel_uses_last_location() {
        let mut input = TouchState::new();
        input.touch_began(TouchId(2), Point::new(1.0, 1.0));
        input.touch_began(TouchId(1), Point::new(0.0, 0.0));
        input.touch_moved(TouchId(2), Point::new(8.0, 8.0));
        input.begin_frame();

        input.cancel_all();
        assert_eq!(input.active_count(), 0);
        assert_eq!(
            input.samples(),
            &[
                Touch::cancelled(TouchId(1), Point::new(0.0, 0.0)),
                Touch::cancelled(TouchId(2), Point::new(8.0, 8.0)),
            ]
        );
    }
}
