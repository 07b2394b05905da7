use tactile::{Color, DelayedTween, Transition, TweenPhase};

/// A pending "appear with color" recolor
///
/// Shows `from` until the delay runs out, then fades to whatever fill the
/// control's current state asks for. The target is read every frame, so a state
/// change mid-fade retargets the fade instead of fighting it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Appearance {
    from: Color,
    tween: DelayedTween,
}

impl Appearance {
    pub(crate) fn new(from: Color, delay: f32, transition: Transition) -> Self {
        Self {
            from,
            tween: DelayedTween::new(delay, transition),
        }
    }

    /// Advance by `dt` seconds; returns `true` once the fade has completed
    pub(crate) fn advance(&mut self, dt: f32) -> bool {
        self.tween.advance(dt) == TweenPhase::Finished
    }

    /// Fill to show right now, fading towards `target`
    pub(crate) fn fill(&self, target: Color) -> Color {
        self.from.lerp(target, self.tween.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactile::{css, transition::linear};

    #[test]
    fn test_holds_color_during_delay() {
        let mut appearance = Appearance::new(css::RED, 1.0, Transition::new(1.0, linear));
        assert!(!appearance.advance(0.5));
        assert_eq!(appearance.fill(css::BLACK), css::RED);
    }

    #[test]
    fn test_fades_to_target() {
        let mut appearance = Appearance::new(
            Color::rgb(1.0, 1.0, 1.0),
            0.0,
            Transition::new(2.0, linear),
        );
        assert!(!appearance.advance(1.0));
        assert_eq!(appearance.fill(Color::rgb(0.0, 0.0, 0.0)), Color::rgb(0.5, 0.5, 0.5));
        assert!(appearance.advance(1.0));
        assert_eq!(appearance.fill(css::BLUE), css::BLUE);
    }
}
