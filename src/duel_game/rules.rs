use super::card::{Card, CardKind};

/// Checks if a card can be played on top of the current discard.
///
/// Wilds are always playable. Otherwise the candidate must match the top
/// card's color, or share its non-number kind, or match its number.
pub fn can_play(candidate: &Card, top: &Card) -> bool {
    if candidate.is_wild() {
        return true;
    }
    if candidate.color == top.color {
        return true;
    }
    if candidate.kind == top.kind && candidate.kind != CardKind::Number {
        return true;
    }
    candidate.kind == CardKind::Number
        && top.kind == CardKind::Number
        && candidate.number == top.number
}

/// What a landed card does to the turn order. Wild resolution (the draw-four
/// grant and the color pick) is sequenced by the scheduler before any of
/// this applies; wilds themselves just pass the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayEffect {
    /// The other seat draws `count` cards (stopping early if the pile
    /// empties) and loses its turn.
    ForcedDraw { count: usize },
    /// Skip and Reverse collapse to "play again" with exactly two seats.
    ExtraTurn,
    PassTurn,
}

pub fn effect_of(kind: CardKind) -> PlayEffect {
    match kind {
        CardKind::DrawTwo => PlayEffect::ForcedDraw { count: 2 },
        CardKind::Skip | CardKind::Reverse => PlayEffect::ExtraTurn,
        _ => PlayEffect::PassTurn,
    }
}
