use serde::{Deserialize, Serialize};

use super::card::{Color, SIDE_COLORS};

/// A point in normalized device coordinates ([-1,1] x [-1,1], origin center, Y-up).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, target: Vec2, t: f32) -> Vec2 {
        Vec2 {
            x: self.x * (1.0 - t) + target.x * t,
            y: self.y * (1.0 - t) + target.y * t,
        }
    }
}

pub const CARD_W: f32 = 0.15;
pub const CARD_H: f32 = 0.22;
pub const CARD_SIZE: Vec2 = Vec2::new(CARD_W, CARD_H);

/// Anchor the top of the draw pile sits at (and slides from).
pub const DRAW_PILE_ANCHOR: Vec2 = Vec2::new(-0.7, 0.0);
/// Anchor every played card slides toward.
pub const DISCARD_ANCHOR: Vec2 = Vec2::new(-0.3, 0.0);

pub const HAND_SPACING: f32 = 0.1;
pub const PLAYER_HAND_Y: f32 = -0.7;
pub const OPPONENT_HAND_Y: f32 = 0.7;

pub const AVATAR_SIZE: f32 = 0.15;
pub const INDICATOR_SIZE: f32 = 0.22;
pub const CROWN_SIZE: f32 = 0.1;
pub const PLAYER_AVATAR: Vec2 = Vec2::new(0.0, -0.35);
pub const OPPONENT_AVATAR: Vec2 = Vec2::new(0.0, 0.35);

/// Wild color picker: four square swatches in a row above the piles,
/// ordered Red, Green, Blue, Yellow. Coordinates are the bottom-left corner.
pub const SWATCH_SIZE: f32 = 0.2;
pub const SWATCH_MIN_Y: f32 = 0.1;
pub const SWATCH_MIN_X: [f32; 4] = [-0.6, -0.2, 0.2, 0.6];

/// Center of the i-th card in a fanned-out hand of `len` cards.
pub fn hand_slot(index: usize, len: usize, y: f32) -> Vec2 {
    let total_width = len.saturating_sub(1) as f32 * HAND_SPACING;
    Vec2::new(-total_width / 2.0 + index as f32 * HAND_SPACING, y)
}

/// Half-extent hit test against a card centered at `center`.
pub fn card_hit(point: Vec2, center: Vec2) -> bool {
    (point.x - center.x).abs() < CARD_W * 0.5 && (point.y - center.y).abs() < CARD_H * 0.5
}

/// Maps a click to the color swatch it lands in, if any.
pub fn swatch_at(point: Vec2) -> Option<Color> {
    if point.y <= SWATCH_MIN_Y || point.y >= SWATCH_MIN_Y + SWATCH_SIZE {
        return None;
    }
    for (i, &min_x) in SWATCH_MIN_X.iter().enumerate() {
        if point.x > min_x && point.x < min_x + SWATCH_SIZE {
            return Some(SIDE_COLORS[i]);
        }
    }
    None
}

pub fn swatch_origin(color: Color) -> Option<Vec2> {
    let index = color.index()?;
    Some(Vec2::new(SWATCH_MIN_X[index], SWATCH_MIN_Y))
}

pub fn swatch_center(color: Color) -> Option<Vec2> {
    let origin = swatch_origin(color)?;
    Some(Vec2::new(
        origin.x + SWATCH_SIZE / 2.0,
        origin.y + SWATCH_SIZE / 2.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_slot_centered() {
        // A five-card fan spans 0.4 and is centered on x = 0.
        assert_eq!(hand_slot(0, 5, PLAYER_HAND_Y), Vec2::new(-0.2, -0.7));
        assert_eq!(hand_slot(2, 5, PLAYER_HAND_Y), Vec2::new(0.0, -0.7));
        assert_eq!(hand_slot(4, 5, PLAYER_HAND_Y), Vec2::new(0.2, -0.7));

        // A single card sits on the center line.
        assert_eq!(hand_slot(0, 1, OPPONENT_HAND_Y), Vec2::new(0.0, 0.7));
    }

    #[test]
    fn test_card_hit() {
        let center = Vec2::new(-0.7, 0.0);
        assert!(card_hit(Vec2::new(-0.7, 0.0), center));
        assert!(card_hit(Vec2::new(-0.65, 0.1), center));
        assert!(!card_hit(Vec2::new(-0.7, 0.12), center));
        assert!(!card_hit(Vec2::new(-0.5, 0.0), center));
    }

    #[test]
    fn test_swatch_at() {
        assert_eq!(swatch_at(Vec2::new(-0.5, 0.2)), Some(Color::Red));
        assert_eq!(swatch_at(Vec2::new(-0.1, 0.2)), Some(Color::Green));
        assert_eq!(swatch_at(Vec2::new(0.3, 0.2)), Some(Color::Blue));
        assert_eq!(swatch_at(Vec2::new(0.7, 0.2)), Some(Color::Yellow));

        // Between the swatches, or outside the band vertically.
        assert_eq!(swatch_at(Vec2::new(0.1, 0.2)), None);
        assert_eq!(swatch_at(Vec2::new(-0.5, 0.5)), None);
        assert_eq!(swatch_at(Vec2::new(-0.5, 0.05)), None);
    }

    #[test]
    fn test_swatch_center_round_trips() {
        for color in SIDE_COLORS {
            let center = swatch_center(color).unwrap();
            assert_eq!(swatch_at(center), Some(color));
        }
        assert_eq!(swatch_center(Color::Wild), None);
    }
}
