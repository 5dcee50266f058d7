use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::animation::{Animation, FinishedAnimation};
use super::card::{standard_deck, Card, CardKind, Color};
use super::layout;
use super::opponent::{self, OpponentAction};
use super::rules::{self, PlayEffect};

pub const STARTING_HAND: usize = 7;
/// Seconds the opponent "thinks" before its move is evaluated.
pub const DEFAULT_THINK_DELAY: f64 = 1.0;

#[derive(Debug, Serialize, Deserialize)]
pub enum GameError {
    EmptyDeck,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::EmptyDeck => write!(f, "Deck is empty"),
        }
    }
}

impl std::error::Error for GameError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    Player,
    Opponent,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::Player => Seat::Opponent,
            Seat::Opponent => Seat::Player,
        }
    }
}

/// The state machine's phase. At most one card animates at a time, and only
/// in the Animating* phases; the GameOver* phases are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    PlayerTurn,
    /// Momentary phase in which the opponent policy is evaluated, entered
    /// once the thinking delay elapses.
    OpponentTurn,
    OpponentThinking,
    WildColorSelect,
    AnimatingPlayerPlay,
    AnimatingPlayerDraw,
    AnimatingOpponentPlay,
    AnimatingOpponentDraw,
    GameOverPlayerWon,
    GameOverOpponentWon,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOverPlayerWon | Phase::GameOverOpponentWon)
    }

    pub fn is_animating(self) -> bool {
        matches!(
            self,
            Phase::AnimatingPlayerPlay
                | Phase::AnimatingPlayerDraw
                | Phase::AnimatingOpponentPlay
                | Phase::AnimatingOpponentDraw
        )
    }
}

/// The whole table: both hands, both piles, and the scheduling state.
/// Owned by the frontend loop and driven by [`GameSession::tick`] plus the
/// click entry points; all mutation is synchronous on the caller's thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub player_hand: Vec<Card>,
    pub opponent_hand: Vec<Card>,
    /// Stack, top = last. Drawing pops the top.
    pub draw_pile: Vec<Card>,
    /// Stack, top = last. Never empty after setup; the top is the active card.
    pub discard_pile: Vec<Card>,
    pub phase: Phase,
    /// Whose decision the machine is working toward. Flipped by the
    /// turn-advance primitive; animations run under the actor that started them.
    pub actor: Seat,
    pub thinking_since: f64,
    pub think_delay: f64,
    /// Set while a landed wild awaits its color pick.
    pub can_select_wild_color: bool,
}

impl GameSession {
    /// Shuffles a fresh deck, deals 7 cards alternately to each seat, and
    /// flips one card to seed the discard pile.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, think_delay: f64) -> Result<Self, GameError> {
        let mut deck = standard_deck();
        deck.shuffle(rng);

        let mut session = Self {
            player_hand: Vec::new(),
            opponent_hand: Vec::new(),
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            phase: Phase::PlayerTurn,
            actor: Seat::Player,
            thinking_since: 0.0,
            think_delay,
            can_select_wild_color: false,
        };

        for _ in 0..STARTING_HAND {
            session
                .player_hand
                .push(deck.pop().ok_or(GameError::EmptyDeck)?);
            session
                .opponent_hand
                .push(deck.pop().ok_or(GameError::EmptyDeck)?);
        }
        let first = deck.pop().ok_or(GameError::EmptyDeck)?;
        info!("first card up: {:?} {:?}", first.color, first.kind);
        session.discard_pile.push(first);
        session.draw_pile = deck;
        session.relayout();
        Ok(session)
    }

    pub fn discard_top(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    /// Total cards across hands and piles; constant at 108 for the whole game.
    pub fn card_count(&self) -> usize {
        self.player_hand.len()
            + self.opponent_hand.len()
            + self.draw_pile.len()
            + self.discard_pile.len()
    }

    pub fn awaiting_wild_color(&self) -> bool {
        self.can_select_wild_color && !self.phase.is_terminal()
    }

    /// One simulation step. Animation advancement (and any effect or turn
    /// consequence it triggers) resolves before the thinking delay is
    /// checked, so a freshly landed card is visible to the same tick's
    /// opponent trigger.
    pub fn tick(&mut self, now: f64, dt: f64) {
        if self.phase.is_terminal() {
            return;
        }
        debug_assert!(
            self.animations_in_flight() <= 1,
            "at most one card animates at a time"
        );
        if let Some(finished) = self.advance_animation(dt) {
            self.resolve_animation(finished, now);
        }
        if self.phase == Phase::OpponentThinking && now - self.thinking_since >= self.think_delay {
            self.phase = Phase::OpponentTurn;
            self.opponent_act(now);
        }
    }

    /// Plays the player's hand card at `index` if it is legal right now.
    /// Returns false (and changes nothing) otherwise.
    pub fn play_from_hand(&mut self, index: usize) -> bool {
        if self.phase != Phase::PlayerTurn || index >= self.player_hand.len() {
            return false;
        }
        let Some(top) = self.discard_pile.last() else {
            debug_assert!(false, "discard pile empty after setup");
            return false;
        };
        if !rules::can_play(&self.player_hand[index], top) {
            return false;
        }
        let mut card = self.player_hand.remove(index);
        info!("player plays {:?} {:?}", card.color, card.kind);
        card.anim = Some(Animation::slide(card.pos, layout::DISCARD_ANCHOR));
        self.discard_pile.push(card);
        self.phase = Phase::AnimatingPlayerPlay;
        self.layout_player_hand();
        true
    }

    /// The player clicks the draw pile. An empty pile turns the draw into a
    /// plain pass with no animation.
    pub fn draw_from_pile(&mut self, now: f64) {
        if self.phase != Phase::PlayerTurn {
            return;
        }
        match self.draw_pile.pop() {
            Some(mut card) => {
                info!("player draws a card");
                let slot = layout::hand_slot(
                    self.player_hand.len(),
                    self.player_hand.len() + 1,
                    layout::PLAYER_HAND_Y,
                );
                card.pos = layout::DRAW_PILE_ANCHOR;
                card.anim = Some(Animation::slide(layout::DRAW_PILE_ANCHOR, slot));
                self.player_hand.push(card);
                self.phase = Phase::AnimatingPlayerDraw;
                self.layout_piles();
            }
            None => {
                info!("draw pile exhausted, player passes");
                self.advance_turn(now);
            }
        }
    }

    /// Resolves a landed wild: paints the discard top and advances the turn.
    /// Ignored unless a color pick is actually pending.
    pub fn select_wild_color(&mut self, color: Color, now: f64) {
        if !self.awaiting_wild_color() || color.index().is_none() {
            return;
        }
        if let Some(top) = self.discard_pile.last_mut() {
            top.color = color;
        }
        self.can_select_wild_color = false;
        info!("player chose {:?}", color);
        self.advance_turn(now);
        self.layout_piles();
    }

    /// Re-derives every resting card's position from the current hand and
    /// pile contents. Cards mid-slide keep their animated position.
    pub fn relayout(&mut self) {
        self.layout_player_hand();
        self.layout_opponent_hand();
        self.layout_piles();
    }

    /// The turn-advance primitive: flip the actor and derive the next phase.
    /// Invoked once or twice per effect; this is the entire alternation
    /// mechanism.
    fn advance_turn(&mut self, now: f64) {
        self.actor = self.actor.other();
        self.phase = match self.actor {
            Seat::Opponent => {
                self.thinking_since = now;
                Phase::OpponentThinking
            }
            Seat::Player => Phase::PlayerTurn,
        };
        debug!("turn advanced: {:?} to act", self.actor);
    }

    fn animations_in_flight(&self) -> usize {
        self.player_hand
            .iter()
            .chain(self.opponent_hand.iter())
            .chain(self.draw_pile.iter())
            .chain(self.discard_pile.iter())
            .filter(|card| card.anim.is_some())
            .count()
    }

    fn advance_animation(&mut self, dt: f64) -> Option<FinishedAnimation> {
        let (slot, finished) = match self.phase {
            Phase::AnimatingPlayerPlay => {
                (self.discard_pile.last_mut(), FinishedAnimation::PlayerPlay)
            }
            Phase::AnimatingPlayerDraw => {
                (self.player_hand.last_mut(), FinishedAnimation::PlayerDraw)
            }
            Phase::AnimatingOpponentPlay => (
                self.discard_pile.last_mut(),
                FinishedAnimation::OpponentPlay,
            ),
            Phase::AnimatingOpponentDraw => (
                self.opponent_hand.last_mut(),
                FinishedAnimation::OpponentDraw,
            ),
            _ => return None,
        };
        let Some(card) = slot else {
            debug_assert!(false, "animating phase with no card in flight");
            return None;
        };
        card.advance_animation(dt).then_some(finished)
    }

    fn resolve_animation(&mut self, finished: FinishedAnimation, now: f64) {
        match finished {
            FinishedAnimation::PlayerPlay => {
                let Some(top) = self.discard_pile.last() else {
                    debug_assert!(false, "discard pile empty after setup");
                    return;
                };
                let kind = top.kind;
                match kind {
                    CardKind::Wild | CardKind::WildDrawFour => {
                        // WildDrawFour grants its cards on landing, before
                        // the color choice.
                        if kind == CardKind::WildDrawFour {
                            self.force_draw(Seat::Opponent, 4);
                        }
                        if let Some(top) = self.discard_pile.last_mut() {
                            top.color = Color::Wild;
                        }
                        self.phase = Phase::WildColorSelect;
                        self.can_select_wild_color = true;
                        debug!("wild landed, awaiting color pick");
                    }
                    _ => self.apply_effect(kind, Seat::Player, now),
                }
                self.layout_player_hand();
            }
            FinishedAnimation::PlayerDraw => {
                self.advance_turn(now);
                self.layout_player_hand();
            }
            FinishedAnimation::OpponentPlay => {
                let Some(top) = self.discard_pile.last() else {
                    debug_assert!(false, "discard pile empty after setup");
                    return;
                };
                let kind = top.kind;
                match kind {
                    // The opponent declared its color at play time, so a
                    // landed wild needs no sub-phase; a plain Wild has no
                    // effect to apply.
                    CardKind::WildDrawFour => {
                        self.force_draw(Seat::Player, 4);
                        self.advance_turn(now);
                    }
                    CardKind::Wild => self.advance_turn(now),
                    _ => self.apply_effect(kind, Seat::Opponent, now),
                }
                self.layout_opponent_hand();
            }
            FinishedAnimation::OpponentDraw => {
                self.advance_turn(now);
                self.layout_opponent_hand();
            }
        }
        self.layout_piles();
        self.check_win();
    }

    /// Applies a landed non-wild card's effect, exactly once per play.
    fn apply_effect(&mut self, kind: CardKind, who: Seat, now: f64) {
        match rules::effect_of(kind) {
            PlayEffect::ForcedDraw { count } => {
                self.force_draw(who.other(), count);
                // The drawing seat's turn is skipped: past it, back to `who`.
                self.advance_turn(now);
                self.advance_turn(now);
            }
            PlayEffect::ExtraTurn => {
                self.advance_turn(now);
                self.advance_turn(now);
            }
            PlayEffect::PassTurn => self.advance_turn(now),
        }
    }

    /// Moves up to `count` cards from the draw pile into `seat`'s hand,
    /// stopping early if the pile empties. No animation; the hand snaps.
    fn force_draw(&mut self, seat: Seat, count: usize) {
        let mut drawn = 0;
        for _ in 0..count {
            let Some(card) = self.draw_pile.pop() else {
                break;
            };
            match seat {
                Seat::Player => self.player_hand.push(card),
                Seat::Opponent => self.opponent_hand.push(card),
            }
            drawn += 1;
        }
        if drawn > 0 {
            info!("{:?} draws {} forced card(s)", seat, drawn);
        }
        match seat {
            Seat::Player => self.layout_player_hand(),
            Seat::Opponent => self.layout_opponent_hand(),
        }
    }

    /// An empty hand ends the game for its owner immediately, overriding
    /// whatever phase a turn advance just produced.
    fn check_win(&mut self) {
        if self.player_hand.is_empty() {
            self.phase = Phase::GameOverPlayerWon;
            self.can_select_wild_color = false;
            info!("player wins");
        } else if self.opponent_hand.is_empty() {
            self.phase = Phase::GameOverOpponentWon;
            info!("opponent wins");
        }
    }

    fn opponent_act(&mut self, now: f64) {
        let Some(top) = self.discard_pile.last() else {
            debug_assert!(false, "discard pile empty after setup");
            return;
        };
        match opponent::decide(&self.opponent_hand, top, self.draw_pile.is_empty()) {
            OpponentAction::Play { index, wild_color } => {
                let mut card = self.opponent_hand.remove(index);
                if let Some(color) = wild_color {
                    card.color = color;
                }
                info!("opponent plays {:?} {:?}", card.color, card.kind);
                card.anim = Some(Animation::slide(card.pos, layout::DISCARD_ANCHOR));
                self.discard_pile.push(card);
                self.phase = Phase::AnimatingOpponentPlay;
                self.layout_opponent_hand();
            }
            OpponentAction::Draw => {
                let Some(mut card) = self.draw_pile.pop() else {
                    debug_assert!(false, "policy drew from an empty pile");
                    return;
                };
                info!("opponent draws a card");
                let slot = layout::hand_slot(
                    self.opponent_hand.len(),
                    self.opponent_hand.len() + 1,
                    layout::OPPONENT_HAND_Y,
                );
                card.pos = layout::DRAW_PILE_ANCHOR;
                card.anim = Some(Animation::slide(layout::DRAW_PILE_ANCHOR, slot));
                self.opponent_hand.push(card);
                self.phase = Phase::AnimatingOpponentDraw;
                self.layout_piles();
            }
            OpponentAction::Pass => {
                info!("opponent has no play and no pile, passing");
                self.advance_turn(now);
            }
        }
    }

    fn layout_player_hand(&mut self) {
        let len = self.player_hand.len();
        for (i, card) in self.player_hand.iter_mut().enumerate() {
            if card.anim.is_some() {
                continue;
            }
            card.pos = layout::hand_slot(i, len, layout::PLAYER_HAND_Y);
        }
    }

    fn layout_opponent_hand(&mut self) {
        let len = self.opponent_hand.len();
        for (i, card) in self.opponent_hand.iter_mut().enumerate() {
            if card.anim.is_some() {
                continue;
            }
            card.pos = layout::hand_slot(i, len, layout::OPPONENT_HAND_Y);
        }
    }

    fn layout_piles(&mut self) {
        if let Some(top) = self.draw_pile.last_mut() {
            top.pos = layout::DRAW_PILE_ANCHOR;
        }
        if let Some(top) = self.discard_pile.last_mut() {
            if top.anim.is_none() {
                top.pos = layout::DISCARD_ANCHOR;
            }
        }
    }
}
