use std::cell::Cell;

use clap::Parser;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use uno_duel::duel_game::session::DEFAULT_THINK_DELAY;
use uno_duel::duel_game::{input, layout, opponent, render, rules};
use uno_duel::duel_game::{GameError, GameSession, Phase, SkinHandle, SkinKey, SkinResolver, Vec2};

/// Headless UNO duel: the scripted opponent versus an autopilot on the
/// human seat, driven through the same click path a pointer would use.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// RNG seed for a reproducible deal (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Opponent thinking delay, in seconds
    #[arg(long, default_value_t = DEFAULT_THINK_DELAY)]
    think_delay: f64,

    /// Simulation tick length, in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    tick: f64,

    /// Give up after this many ticks (covers pass-pass stalemates)
    #[arg(long, default_value_t = 200_000)]
    max_ticks: u64,

    /// Emit the final summary as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

/// Asset collaborator with nothing loaded: every lookup misses, logged once,
/// and the scene falls back to neutral tints.
#[derive(Default)]
struct NullSkins {
    warned: Cell<bool>,
}

impl SkinResolver for NullSkins {
    fn resolve(&self, key: SkinKey) -> SkinHandle {
        if !self.warned.replace(true) {
            warn!(
                "no skin atlas loaded, drawing untextured (first miss: {:?})",
                key
            );
        }
        SkinHandle::NONE
    }
}

#[derive(Serialize)]
struct DuelSummary {
    seed: u64,
    ticks: u64,
    outcome: Phase,
    player_cards: usize,
    opponent_cards: usize,
    draw_pile: usize,
    discard_pile: usize,
}

/// Synthesizes the human seat's next click, if the phase wants one: the
/// first playable hand card, the draw pile when stuck, or the swatch of the
/// color the hand holds most of.
fn autopilot_click(session: &GameSession) -> Option<Vec2> {
    if session.awaiting_wild_color() {
        let color = opponent::choose_wild_color(&session.player_hand, usize::MAX);
        return layout::swatch_center(color);
    }
    if session.phase != Phase::PlayerTurn {
        return None;
    }
    let top = session.discard_top()?;
    if let Some(card) = session
        .player_hand
        .iter()
        .find(|card| rules::can_play(card, top))
    {
        return Some(card.pos);
    }
    Some(layout::DRAW_PILE_ANCHOR)
}

fn run(args: Args) -> Result<(), GameError> {
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("dealing with seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = GameSession::new(&mut rng, args.think_delay)?;
    let skins = NullSkins::default();

    let dt = args.tick;
    let mut now = 0.0;
    let mut ticks = 0;
    while !session.phase.is_terminal() && ticks < args.max_ticks {
        now += dt;
        ticks += 1;
        session.tick(now, dt);

        let scene = render::compose(&session, &skins);
        debug!(
            "tick {}: {:?}, {} draw requests",
            ticks,
            session.phase,
            scene.len()
        );

        if let Some(point) = autopilot_click(&session) {
            input::handle_click(&mut session, point, now);
        }
    }

    let summary = DuelSummary {
        seed,
        ticks,
        outcome: session.phase,
        player_cards: session.player_hand.len(),
        opponent_cards: session.opponent_hand.len(),
        draw_pile: session.draw_pile.len(),
        discard_pile: session.discard_pile.len(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary).unwrap());
    } else {
        match summary.outcome {
            Phase::GameOverPlayerWon => println!("Player wins after {} ticks.", summary.ticks),
            Phase::GameOverOpponentWon => println!("Opponent wins after {} ticks.", summary.ticks),
            _ => println!(
                "No winner within {} ticks (stalemate or cap reached).",
                summary.ticks
            ),
        }
        println!(
            "Final hands: player {}, opponent {}; piles: draw {}, discard {}.",
            summary.player_cards, summary.opponent_cards, summary.draw_pile, summary.discard_pile
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
