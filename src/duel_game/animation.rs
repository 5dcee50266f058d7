use serde::{Deserialize, Serialize};

use super::layout::Vec2;

/// Fixed duration of every card slide, in seconds.
pub const SLIDE_DURATION: f64 = 0.5;

/// A linear slide from `start` to `target`, advanced by wall-clock deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub start: Vec2,
    pub target: Vec2,
    pub elapsed: f64,
    pub duration: f64,
}

impl Animation {
    pub fn slide(start: Vec2, target: Vec2) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            duration: SLIDE_DURATION,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
    }

    /// Clamped to [0, 1]; exactly 1.0 once elapsed reaches the duration.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0) as f32
    }

    pub fn position(&self) -> Vec2 {
        self.start.lerp(self.target, self.progress())
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Which in-flight slide just landed. Returned once per animation by the
/// per-tick advance and consumed by the turn scheduler; the resolution it
/// triggers (effect application, sub-phase, turn advance) depends on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishedAnimation {
    PlayerPlay,
    PlayerDraw,
    OpponentPlay,
    OpponentDraw,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_monotonic() {
        let mut anim = Animation::slide(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let mut last = anim.progress();
        for _ in 0..100 {
            anim.advance(0.01);
            let progress = anim.progress();
            assert!(progress >= last);
            assert!((0.0..=1.0).contains(&progress));
            last = progress;
        }
        assert_eq!(anim.progress(), 1.0);
    }

    #[test]
    fn test_progress_complete_at_duration() {
        let mut anim = Animation::slide(Vec2::default(), Vec2::new(0.5, 0.0));
        anim.advance(SLIDE_DURATION);
        assert!(anim.finished());
        assert_eq!(anim.progress(), 1.0);

        // Overshooting stays clamped.
        anim.advance(10.0);
        assert_eq!(anim.progress(), 1.0);
    }

    #[test]
    fn test_position_lands_exactly_on_target() {
        let target = Vec2::new(-0.3, 0.0);
        let mut anim = Animation::slide(Vec2::new(0.17, -0.7), target);
        // Accumulate awkward deltas to invite float drift.
        while !anim.finished() {
            anim.advance(0.073);
        }
        assert_eq!(anim.position(), target);
    }

    #[test]
    fn test_card_slide_snaps_and_clears() {
        use crate::duel_game::card::{Card, Color};

        let target = Vec2::new(-0.3, 0.0);
        let mut card = Card::number(Color::Red, 5);
        card.pos = Vec2::new(0.2, -0.7);
        card.anim = Some(Animation::slide(card.pos, target));

        assert!(!card.advance_animation(0.25));
        assert!(card.anim.is_some());

        assert!(card.advance_animation(0.25));
        assert_eq!(card.pos, target);
        assert!(card.anim.is_none());

        // The completion event fires exactly once.
        assert!(!card.advance_animation(0.25));
    }
}
