use super::card::{Card, Color, SIDE_COLORS};
use super::rules;

/// The scripted opponent's decision for one turn. Pure and deterministic:
/// no randomness, no search beyond the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentAction {
    Play {
        index: usize,
        /// Pre-chosen color when the played card is a wild.
        wild_color: Option<Color>,
    },
    Draw,
    /// No legal play and nothing left to draw.
    Pass,
}

/// Greedy single-pass policy: play the first card in hand order that is
/// legal on `top`; otherwise draw one card (no re-attempt this turn);
/// otherwise pass.
pub fn decide(hand: &[Card], top: &Card, draw_pile_empty: bool) -> OpponentAction {
    if let Some(index) = hand.iter().position(|card| rules::can_play(card, top)) {
        let wild_color = hand[index]
            .is_wild()
            .then(|| choose_wild_color(hand, index));
        return OpponentAction::Play { index, wild_color };
    }
    if draw_pile_empty {
        OpponentAction::Pass
    } else {
        OpponentAction::Draw
    }
}

/// Picks the color the opponent holds the most of once the wild at `played`
/// leaves the hand. Ties go to the lowest color index (Red first); an
/// otherwise empty hand yields Red.
pub fn choose_wild_color(hand: &[Card], played: usize) -> Color {
    let mut counts = [0usize; 4];
    for (i, card) in hand.iter().enumerate() {
        if i == played {
            continue;
        }
        if let Some(index) = card.color.index() {
            counts[index] += 1;
        }
    }
    let mut best = 0;
    for i in 1..4 {
        if counts[i] > counts[best] {
            best = i;
        }
    }
    SIDE_COLORS[best]
}
