use super::card::{Card, CardKind, Color, SIDE_COLORS};
use super::layout::{self, Vec2};
use super::session::{GameSession, Phase};

/// Opaque reference to a loaded skin. Zero is the null sentinel for a skin
/// the asset collaborator failed to resolve; the scene still draws it, with
/// a neutral tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkinHandle(pub u32);

impl SkinHandle {
    pub const NONE: SkinHandle = SkinHandle(0);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// What the asset collaborator is asked to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinKey {
    Background,
    CardBack,
    CardFace {
        color: Color,
        kind: CardKind,
        number: u8,
    },
    PlayerAvatar,
    OpponentAvatar,
    Crown,
}

impl SkinKey {
    pub fn face(card: &Card) -> Self {
        SkinKey::CardFace {
            color: card.color,
            kind: card.kind,
            number: card.number,
        }
    }
}

/// Asset collaborator seam. Implementations should log a miss and return
/// [`SkinHandle::NONE`] rather than fail.
pub trait SkinResolver {
    fn resolve(&self, key: SkinKey) -> SkinHandle;
}

/// One entity to rasterize this frame. The core never draws; it only emits
/// these, back-to-front.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRequest {
    pub pos: Vec2,
    pub size: Vec2,
    pub skin: SkinHandle,
    pub tint: [f32; 3],
    pub highlight: bool,
}

pub const NEUTRAL_TINT: [f32; 3] = [0.7, 0.7, 0.7];
pub const WHITE_TINT: [f32; 3] = [1.0, 1.0, 1.0];
pub const INDICATOR_TINT: [f32; 3] = [1.0, 1.0, 0.0];

pub fn color_tint(color: Color) -> [f32; 3] {
    match color {
        Color::Red => [1.0, 0.0, 0.0],
        Color::Green => [0.0, 1.0, 0.0],
        Color::Blue => [0.0, 0.0, 1.0],
        Color::Yellow => [1.0, 1.0, 0.2],
        Color::Wild => NEUTRAL_TINT,
    }
}

/// Brighter swatch colors for the wild picker, distinct from card tints.
pub fn swatch_tint(color: Color) -> [f32; 3] {
    match color {
        Color::Red => [1.0, 0.2, 0.2],
        Color::Green => [0.2, 1.0, 0.2],
        Color::Blue => [0.2, 0.4, 1.0],
        Color::Yellow => [1.0, 1.0, 0.2],
        Color::Wild => NEUTRAL_TINT,
    }
}

fn card_face(card: &Card, skins: &dyn SkinResolver) -> DrawRequest {
    let skin = skins.resolve(SkinKey::face(card));
    let tint = if skin.is_none() {
        NEUTRAL_TINT
    } else {
        color_tint(card.color)
    };
    DrawRequest {
        pos: card.pos,
        size: layout::CARD_SIZE,
        skin,
        tint,
        highlight: false,
    }
}

fn card_back(card: &Card, skins: &dyn SkinResolver) -> DrawRequest {
    let skin = skins.resolve(SkinKey::CardBack);
    let tint = if skin.is_none() { NEUTRAL_TINT } else { WHITE_TINT };
    DrawRequest {
        pos: card.pos,
        size: layout::CARD_SIZE,
        skin,
        tint,
        highlight: false,
    }
}

fn fixture(pos: Vec2, size: f32, key: SkinKey, skins: &dyn SkinResolver) -> DrawRequest {
    let skin = skins.resolve(key);
    let tint = if skin.is_none() { NEUTRAL_TINT } else { WHITE_TINT };
    DrawRequest {
        pos,
        size: Vec2::new(size, size),
        skin,
        tint,
        highlight: false,
    }
}

/// Assembles the frame's draw list from the session, back-to-front:
/// background, turn indicator, avatars, pile tops, hands, then the phase
/// overlays (color picker, crown).
pub fn compose(session: &GameSession, skins: &dyn SkinResolver) -> Vec<DrawRequest> {
    let mut scene = Vec::new();

    scene.push(DrawRequest {
        pos: Vec2::default(),
        size: Vec2::new(1.0, 1.0),
        skin: skins.resolve(SkinKey::Background),
        tint: WHITE_TINT,
        highlight: false,
    });

    // Turn indicator behind the acting seat's avatar.
    let player_acting = matches!(
        session.phase,
        Phase::PlayerTurn | Phase::AnimatingPlayerPlay | Phase::WildColorSelect
    );
    let opponent_acting = matches!(
        session.phase,
        Phase::OpponentTurn | Phase::OpponentThinking | Phase::AnimatingOpponentPlay
    );
    if player_acting || opponent_acting {
        let anchor = if player_acting {
            layout::PLAYER_AVATAR
        } else {
            layout::OPPONENT_AVATAR
        };
        scene.push(DrawRequest {
            pos: anchor,
            size: Vec2::new(layout::INDICATOR_SIZE, layout::INDICATOR_SIZE),
            skin: SkinHandle::NONE,
            tint: INDICATOR_TINT,
            highlight: true,
        });
    }

    scene.push(fixture(
        layout::PLAYER_AVATAR,
        layout::AVATAR_SIZE,
        SkinKey::PlayerAvatar,
        skins,
    ));
    scene.push(fixture(
        layout::OPPONENT_AVATAR,
        layout::AVATAR_SIZE,
        SkinKey::OpponentAvatar,
        skins,
    ));

    if let Some(top) = session.draw_pile.last() {
        scene.push(card_back(top, skins));
    }
    if let Some(top) = session.discard_top() {
        scene.push(card_face(top, skins));
    }
    for card in &session.player_hand {
        scene.push(card_face(card, skins));
    }
    for card in &session.opponent_hand {
        scene.push(card_back(card, skins));
    }

    if session.phase == Phase::WildColorSelect {
        for color in SIDE_COLORS {
            if let Some(origin) = layout::swatch_origin(color) {
                scene.push(DrawRequest {
                    pos: origin,
                    size: Vec2::new(layout::SWATCH_SIZE, layout::SWATCH_SIZE),
                    skin: SkinHandle::NONE,
                    tint: swatch_tint(color),
                    highlight: false,
                });
            }
        }
    }

    match session.phase {
        Phase::GameOverPlayerWon => scene.push(fixture(
            crown_pos(layout::PLAYER_AVATAR),
            layout::CROWN_SIZE,
            SkinKey::Crown,
            skins,
        )),
        Phase::GameOverOpponentWon => scene.push(fixture(
            crown_pos(layout::OPPONENT_AVATAR),
            layout::CROWN_SIZE,
            SkinKey::Crown,
            skins,
        )),
        _ => {}
    }

    scene
}

fn crown_pos(avatar: Vec2) -> Vec2 {
    Vec2::new(
        avatar.x,
        avatar.y + layout::AVATAR_SIZE / 2.0 + layout::CROWN_SIZE / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel_game::session::GameSession;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Resolver with no assets at all: everything comes back null.
    struct NoSkins;

    impl SkinResolver for NoSkins {
        fn resolve(&self, _key: SkinKey) -> SkinHandle {
            SkinHandle::NONE
        }
    }

    /// Resolver that pretends every asset loaded.
    struct AllSkins;

    impl SkinResolver for AllSkins {
        fn resolve(&self, _key: SkinKey) -> SkinHandle {
            SkinHandle(1)
        }
    }

    fn fresh_session() -> GameSession {
        let mut rng = StdRng::seed_from_u64(3);
        GameSession::new(&mut rng, 1.0).unwrap()
    }

    #[test]
    fn test_compose_fresh_game() {
        let session = fresh_session();
        let scene = compose(&session, &AllSkins);
        // background + indicator + 2 avatars + 2 pile tops + 7 + 7 hand cards
        assert_eq!(scene.len(), 20);
    }

    #[test]
    fn test_missing_skins_fall_back_to_neutral_tint() {
        let session = fresh_session();
        let scene = compose(&session, &NoSkins);
        // Every request still issued; textured entities go neutral. The
        // background keeps white and the indicator keeps its own tint.
        assert_eq!(scene.len(), 20);
        for request in scene
            .iter()
            .filter(|r| !r.highlight && r.size != Vec2::new(1.0, 1.0))
        {
            assert_eq!(request.tint, NEUTRAL_TINT);
        }
    }

    #[test]
    fn test_discard_top_tinted_by_its_color() {
        let mut session = fresh_session();
        session.discard_pile = vec![crate::duel_game::card::Card::number(Color::Green, 4)];
        session.relayout();
        let scene = compose(&session, &AllSkins);
        let discard = scene
            .iter()
            .find(|r| r.pos == layout::DISCARD_ANCHOR && r.size == layout::CARD_SIZE)
            .unwrap();
        assert_eq!(discard.tint, color_tint(Color::Green));
    }

    #[test]
    fn test_swatches_only_during_color_select() {
        let mut session = fresh_session();
        let swatch_count = |scene: &[DrawRequest]| {
            scene
                .iter()
                .filter(|r| r.size == Vec2::new(layout::SWATCH_SIZE, layout::SWATCH_SIZE))
                .count()
        };

        assert_eq!(swatch_count(&compose(&session, &AllSkins)), 0);

        session.phase = Phase::WildColorSelect;
        session.can_select_wild_color = true;
        assert_eq!(swatch_count(&compose(&session, &AllSkins)), 4);
    }

    #[test]
    fn test_crown_on_game_over() {
        let mut session = fresh_session();
        session.phase = Phase::GameOverPlayerWon;
        let scene = compose(&session, &AllSkins);
        let crown = scene.last().unwrap();
        assert_eq!(
            crown.pos,
            Vec2::new(
                0.0,
                layout::PLAYER_AVATAR.y + layout::AVATAR_SIZE / 2.0 + layout::CROWN_SIZE / 2.0
            )
        );
        // No turn indicator once the game is over.
        assert!(!scene.iter().any(|r| r.highlight));
    }

    #[test]
    fn test_indicator_follows_the_acting_seat() {
        let mut session = fresh_session();
        let indicator_pos = |scene: &[DrawRequest]| {
            scene.iter().find(|r| r.highlight).map(|r| r.pos)
        };

        assert_eq!(
            indicator_pos(&compose(&session, &AllSkins)),
            Some(layout::PLAYER_AVATAR)
        );

        session.phase = Phase::OpponentThinking;
        assert_eq!(
            indicator_pos(&compose(&session, &AllSkins)),
            Some(layout::OPPONENT_AVATAR)
        );

        // Draw animations show no indicator at all.
        session.phase = Phase::AnimatingPlayerDraw;
        assert_eq!(indicator_pos(&compose(&session, &AllSkins)), None);
    }
}
