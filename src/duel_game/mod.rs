pub mod animation;
pub mod card;
pub mod input;
pub mod layout;
pub mod opponent;
pub mod render;
pub mod rules;
pub mod session;

pub use animation::{Animation, FinishedAnimation};
pub use card::{Card, CardKind, Color};
pub use layout::Vec2;
pub use render::{DrawRequest, SkinHandle, SkinKey, SkinResolver};
pub use session::{GameError, GameSession, Phase, Seat};
