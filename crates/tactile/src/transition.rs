//! Frame-driven timing: easing curves, [`Transition`] and [`DelayedTween`]
//!
//! Nothing here owns a clock. Callers advance tweens with the frame delta they
//! already have.

use crate::color::Color;

/// Maps linear progress in [0, 1] onto an eased progress in [0, 1]
pub type EasingFn = fn(f32) -> f32;

pub fn linear(t: f32) -> f32 {
    t
}

/// Cubic ease-in
pub fn ease_in(t: f32) -> f32 {
    t * t * t
}

/// Cubic ease-out
pub fn ease_out(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Smoothstep: flat at both ends
pub fn ease_in_out(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

pub fn lerp_f32(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Channel-wise interpolation, alpha included
pub fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    Color::rgba(
        lerp_f32(from.r, to.r, t),
        lerp_f32(from.g, to.g, t),
        lerp_f32(from.b, to.b, t),
        lerp_f32(from.a, to.a, t),
    )
}

/// How long a tween runs and how it is shaped
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    /// Seconds; zero or less completes immediately
    pub duration: f32,
    pub easing: EasingFn,
}

impl Transition {
    pub fn new(duration: f32, easing: EasingFn) -> Self {
        Self { duration, easing }
    }

    /// Jumps straight to the end
    pub fn instant() -> Self {
        Self::new(0.0, linear)
    }

    /// 0.15s, cubic ease-out
    pub fn quick() -> Self {
        Self::new(0.15, ease_out)
    }

    /// 0.25s smoothstep; what controls fade with unless styled otherwise
    pub fn standard() -> Self {
        Self::new(0.25, ease_in_out)
    }

    /// 0.4s smoothstep
    pub fn slow() -> Self {
        Self::new(0.4, ease_in_out)
    }

    /// Eased progress after `elapsed` seconds, clamped to [0, 1]
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 || !self.duration.is_finite() {
            return 1.0;
        }
        (self.easing)((elapsed / self.duration).clamp(0.0, 1.0))
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::standard()
    }
}

/// Phase of a [`DelayedTween`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenPhase {
    /// Still inside the initial delay
    Waiting,
    /// Interpolating
    Running,
    /// Reached the end
    Finished,
}

/// A frame-driven tween that waits `delay` seconds and then runs a [`Transition`]
///
/// Time only moves when [`DelayedTween::advance`] is called, so the owner decides
/// which clock drives it (usually the host's per-frame delta).
#[derive(Debug, Clone, Copy)]
pub struct DelayedTween {
    delay: f32,
    transition: Transition,
    elapsed: f32,
}

impl DelayedTween {
    /// Negative or non-finite delays are treated as no delay
    pub fn new(delay: f32, transition: Transition) -> Self {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        Self {
            delay,
            transition,
            elapsed: 0.0,
        }
    }

    /// Move the clock forward and return the new phase
    pub fn advance(&mut self, dt: f32) -> TweenPhase {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.phase()
    }

    pub fn phase(&self) -> TweenPhase {
        if self.elapsed < self.delay {
            TweenPhase::Waiting
        } else if self.progress() < 1.0 {
            TweenPhase::Running
        } else {
            TweenPhase::Finished
        }
    }

    /// Eased progress in [0, 1]; zero while waiting
    pub fn progress(&self) -> f32 {
        if self.elapsed < self.delay {
            0.0
        } else {
            self.transition.progress(self.elapsed - self.delay)
        }
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [linear as EasingFn, ease_in, ease_out, ease_in_out] {
            assert_eq!(easing(0.0), 0.0);
            assert_eq!(easing(1.0), 1.0);
        }
        assert!(ease_in(0.5) < 0.5);
        assert!(ease_out(0.5) > 0.5);
        assert_eq!(ease_in_out(0.5), 0.5);
    }

    #[test]
    fn test_lerp_color_midpoint() {
        let mid = lerp_color(Color::rgba(0.0, 0.2, 1.0, 0.0), Color::rgba(1.0, 0.2, 0.0, 1.0), 0.5);
        assert!(mid.approx_eq(&Color::rgba(0.5, 0.2, 0.5, 0.5), 1e-6));
    }

    #[test]
    fn test_progress_clamps() {
        let transition = Transition::new(2.0, linear);
        assert_eq!(transition.progress(-1.0), 0.0);
        assert_eq!(transition.progress(1.0), 0.5);
        assert_eq!(transition.progress(5.0), 1.0);
    }

    #[test]
    fn test_instant_transition_is_complete() {
        assert_eq!(Transition::instant().progress(0.0), 1.0);
    }

    #[test]
    fn test_delayed_tween_phases() {
        let mut tween = DelayedTween::new(0.5, Transition::new(1.0, linear));
        assert_eq!(tween.phase(), TweenPhase::Waiting);

        assert_eq!(tween.advance(0.25), TweenPhase::Waiting);
        assert_eq!(tween.progress(), 0.0);

        assert_eq!(tween.advance(0.75), TweenPhase::Running);
        assert_eq!(tween.progress(), 0.5);

        assert_eq!(tween.advance(1.0), TweenPhase::Finished);
        assert_eq!(tween.progress(), 1.0);
    }

    #[test]
    fn test_delayed_tween_rejects_bad_input() {
        let mut tween = DelayedTween::new(-3.0, Transition::new(1.0, linear));
        assert_eq!(tween.delay(), 0.0);
        tween.advance(f32::NAN);
        tween.advance(-1.0);
        assert_eq!(tween.progress(), 0.0);
    }
}
