use super::card::Color;
use super::layout::{self, Vec2};
use super::rules;
use super::session::{GameSession, Phase};

/// A pointer click translated into a game action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    PlayCard(usize),
    DrawCard,
    ChooseColor(Color),
}

/// Hit-tests a primary click at `point` (normalized device coordinates)
/// against the table. Returns `None` for anything that is not an actionable
/// hit in the current phase: wrong phase, dead space, a non-playable card,
/// a click between the color swatches.
pub fn map_click(session: &GameSession, point: Vec2) -> Option<PlayerAction> {
    if session.phase.is_terminal() {
        return None;
    }
    if session.awaiting_wild_color() {
        return layout::swatch_at(point).map(PlayerAction::ChooseColor);
    }
    if session.phase != Phase::PlayerTurn {
        return None;
    }

    // The draw pile anchor is checked first. An empty pile is still a valid
    // target: the draw degrades to a pass.
    if layout::card_hit(point, layout::DRAW_PILE_ANCHOR) {
        return Some(PlayerAction::DrawCard);
    }

    // Hand cards scan from the topmost-rendered (last) backward so the
    // visually frontmost of two overlapping cards wins; a hit on a card
    // that is not legal falls through to whatever sits under it.
    let top = session.discard_top()?;
    for (index, card) in session.player_hand.iter().enumerate().rev() {
        if layout::card_hit(point, card.pos) && rules::can_play(card, top) {
            return Some(PlayerAction::PlayCard(index));
        }
    }
    None
}

/// Maps and dispatches a click in one step. Returns true if the click
/// produced a state change.
pub fn handle_click(session: &mut GameSession, point: Vec2, now: f64) -> bool {
    match map_click(session, point) {
        Some(PlayerAction::PlayCard(index)) => session.play_from_hand(index),
        Some(PlayerAction::DrawCard) => {
            session.draw_from_pile(now);
            true
        }
        Some(PlayerAction::ChooseColor(color)) => {
            session.select_wild_color(color, now);
            true
        }
        None => false,
    }
}
