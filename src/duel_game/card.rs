use serde::{Deserialize, Serialize};

use super::animation::Animation;
use super::layout::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    /// Wild cards carry no color until one is chosen after they are played.
    Wild,
}

/// The four playable colors, in tie-break order for the wild color heuristic.
pub const SIDE_COLORS: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

impl Color {
    /// Index into [`SIDE_COLORS`]; `None` for the wild placeholder.
    pub fn index(self) -> Option<usize> {
        match self {
            Color::Red => Some(0),
            Color::Green => Some(1),
            Color::Blue => Some(2),
            Color::Yellow => Some(3),
            Color::Wild => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Number,
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

/// Sentinel for the `number` field on anything that is not a number card.
pub const NO_NUMBER: u8 = u8::MAX;

/// A single card. The color/kind/number triple is its identity; position and
/// the animation record are presentation state owned by the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub color: Color,
    pub kind: CardKind,
    pub number: u8,
    #[serde(skip)]
    pub pos: Vec2,
    #[serde(skip)]
    pub anim: Option<Animation>,
}

impl Card {
    pub fn number(color: Color, number: u8) -> Self {
        debug_assert!(number <= 9);
        Self {
            color,
            kind: CardKind::Number,
            number,
            pos: Vec2::default(),
            anim: None,
        }
    }

    pub fn action(color: Color, kind: CardKind) -> Self {
        debug_assert!(matches!(
            kind,
            CardKind::Skip | CardKind::Reverse | CardKind::DrawTwo
        ));
        Self {
            color,
            kind,
            number: NO_NUMBER,
            pos: Vec2::default(),
            anim: None,
        }
    }

    pub fn wild(kind: CardKind) -> Self {
        debug_assert!(matches!(kind, CardKind::Wild | CardKind::WildDrawFour));
        Self {
            color: Color::Wild,
            kind,
            number: NO_NUMBER,
            pos: Vec2::default(),
            anim: None,
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self.kind, CardKind::Wild | CardKind::WildDrawFour)
    }

    /// Advances the in-flight slide, if any. Returns true exactly once, on
    /// the tick the slide lands.
    pub fn advance_animation(&mut self, dt: f64) -> bool {
        let Some(anim) = self.anim.as_mut() else {
            return false;
        };
        anim.advance(dt);
        self.pos = anim.position();
        if anim.finished() {
            // Snap to the target so no float drift survives the slide.
            self.pos = anim.target;
            self.anim = None;
            return true;
        }
        false
    }
}

pub const DECK_SIZE: usize = 108;

/// Builds the standard 108-card deck, unshuffled: per color one 0, two each
/// of 1-9, two each of Skip/Reverse/DrawTwo, plus 4 Wild and 4 WildDrawFour.
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for &color in &SIDE_COLORS {
        deck.push(Card::number(color, 0));
        for number in 1..=9 {
            deck.push(Card::number(color, number));
            deck.push(Card::number(color, number));
        }
        for _ in 0..2 {
            deck.push(Card::action(color, CardKind::Skip));
            deck.push(Card::action(color, CardKind::Reverse));
            deck.push(Card::action(color, CardKind::DrawTwo));
        }
    }
    for _ in 0..4 {
        deck.push(Card::wild(CardKind::Wild));
        deck.push(Card::wild(CardKind::WildDrawFour));
    }
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_deck_composition() {
        let deck = standard_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        let numbers = deck
            .iter()
            .filter(|c| c.kind == CardKind::Number)
            .count();
        let actions = deck
            .iter()
            .filter(|c| matches!(c.kind, CardKind::Skip | CardKind::Reverse | CardKind::DrawTwo))
            .count();
        let wilds = deck.iter().filter(|c| c.is_wild()).count();

        // 4 colors x (1 + 2x9) = 76 numbers, 4 x 3 x 2 = 24 actions, 4 + 4 wilds.
        assert_eq!(numbers, 76);
        assert_eq!(actions, 24);
        assert_eq!(wilds, 8);
    }

    #[test]
    fn test_deck_number_copies() {
        let deck = standard_deck();
        for &color in &SIDE_COLORS {
            let zeroes = deck
                .iter()
                .filter(|c| c.color == color && c.kind == CardKind::Number && c.number == 0)
                .count();
            assert_eq!(zeroes, 1);
            for number in 1..=9 {
                let copies = deck
                    .iter()
                    .filter(|c| {
                        c.color == color && c.kind == CardKind::Number && c.number == number
                    })
                    .count();
                assert_eq!(copies, 2);
            }
        }
    }

    #[test]
    fn test_wilds_have_no_color() {
        for card in standard_deck() {
            if card.is_wild() {
                assert_eq!(card.color, Color::Wild);
                assert_eq!(card.number, NO_NUMBER);
            }
        }
    }
}
