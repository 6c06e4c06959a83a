//! Game state and core simulation types
//!
//! A session is owned by a single `GameState`; every mutation happens inside
//! `tick()` or the start/end operations below, never from platform callbacks
//! directly.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::lerp;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No game has been started yet
    Idle,
    /// Active gameplay
    Playing,
    /// Session ended, final score settled
    Over,
}

/// Visual category of a falling heart. Chosen uniformly at random; has no
/// gameplay effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartKind {
    TwoHearts,
    Red,
    Sparkling,
    Gift,
    Growing,
    Arrow,
}

impl HeartKind {
    pub const ALL: [HeartKind; 6] = [
        HeartKind::TwoHearts,
        HeartKind::Red,
        HeartKind::Sparkling,
        HeartKind::Gift,
        HeartKind::Growing,
        HeartKind::Arrow,
    ];

    /// Glyph rendered by the platform layer
    pub fn glyph(&self) -> &'static str {
        match self {
            HeartKind::TwoHearts => "\u{1F495}",
            HeartKind::Red => "\u{2764}\u{FE0F}",
            HeartKind::Sparkling => "\u{1F496}",
            HeartKind::Gift => "\u{1F49D}",
            HeartKind::Growing => "\u{1F497}",
            HeartKind::Arrow => "\u{1F498}",
        }
    }
}

/// The player-controlled collector
#[derive(Debug, Clone, Copy)]
pub struct Basket {
    /// Center position along the bottom edge, percent of play-area width
    pub x_percent: f32,
    /// Remaining catch-feedback pulse time (visual only, decays in tick)
    pub pulse_ms: f32,
}

impl Default for Basket {
    fn default() -> Self {
        Self {
            x_percent: BASKET_START_PCT,
            pulse_ms: 0.0,
        }
    }
}

impl Basket {
    /// The single entry point for input-driven movement. Pointer/touch targets
    /// and discrete steps both land here; `tick()` only calls it while the
    /// game is active, which is what guards every input path at once.
    pub fn apply(&mut self, target_x: Option<f32>, steps: i32, tuning: &Tuning) {
        if let Some(x) = target_x {
            self.set_clamped(x, tuning);
        }
        if steps != 0 {
            self.set_clamped(
                self.x_percent + steps as f32 * tuning.basket_step_pct,
                tuning,
            );
        }
    }

    fn set_clamped(&mut self, x: f32, tuning: &Tuning) {
        self.x_percent = x.clamp(tuning.basket_min_pct, tuning.basket_max_pct);
    }
}

/// A falling heart.
///
/// Each heart is one cancellable task: the first of collision, bottom exit,
/// expiry, or game end resolves it, and resolution removes it exactly once.
/// The `poll_ms` accumulator drives the collision/exit samples; the `age_ms`
/// deadline is the expiry backstop.
#[derive(Debug, Clone, Copy)]
pub struct FallingHeart {
    pub id: u32,
    pub kind: HeartKind,
    /// Center x at spawn, percent of play-area width; constant while falling
    pub x_percent: f32,
    /// Total time the fall animation covers
    pub fall_duration_ms: f32,
    /// Time since spawn
    pub age_ms: f32,
    /// Accumulator toward the next collision/exit sample
    pub poll_ms: f32,
}

impl FallingHeart {
    /// Top edge derived from age: travels from just above the play area to
    /// `ITEM_FALL_END_PCT` over the fall duration
    pub fn top_percent(&self) -> f32 {
        let t = (self.age_ms / self.fall_duration_ms).clamp(0.0, 1.0);
        lerp(ITEM_SPAWN_TOP_PCT, ITEM_FALL_END_PCT, t)
    }
}

/// Discrete things that happened during a tick, drained by the platform layer
/// to mirror the session into the DOM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A new session began
    Started,
    /// Countdown advanced
    TimeTick { remaining: u32 },
    /// Level ramped up
    LevelUp { level: u32 },
    /// A heart entered the play area
    Spawned {
        id: u32,
        kind: HeartKind,
        x_percent: f32,
        fall_duration_ms: f32,
    },
    /// Heart caught by the basket; `score` is the total after the catch
    Caught { id: u32, score: u32 },
    /// Heart fell past the bottom uncaught
    Missed { id: u32 },
    /// Heart force-removed by its expiry backstop
    Expired { id: u32 },
    /// Session ended with the final score
    Ended { score: u32 },
}

/// Complete game session state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG for spawn positions and glyph kinds
    pub(crate) rng: Pcg32,
    /// Balance knobs; injected so tests can shrink timings
    pub tuning: Tuning,
    pub score: u32,
    /// Seconds left on the countdown; never goes negative
    pub time_remaining: u32,
    /// Never decreases within a session
    pub level: u32,
    pub phase: GamePhase,
    pub basket: Basket,
    /// Live hearts, in spawn order (ids are monotonic)
    pub hearts: Vec<FallingHeart>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Accumulator toward the next 1-second countdown tick
    pub(crate) countdown_ms: f32,
    /// Accumulator toward the next 1-second spawn tick
    pub(crate) spawn_ms: f32,
    next_id: u32,
}

impl GameState {
    /// Create an idle session with the given seed and tuning
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_remaining: tuning.game_duration_secs,
            tuning,
            score: 0,
            level: 1,
            phase: GamePhase::Idle,
            basket: Basket::default(),
            hearts: Vec::new(),
            events: Vec::new(),
            countdown_ms: 0.0,
            spawn_ms: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a new game. No-op if one is already active; otherwise resets the
    /// session, recenters the basket, and clears any leftover hearts.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Playing {
            return;
        }
        self.score = 0;
        self.time_remaining = self.tuning.game_duration_secs;
        self.level = 1;
        self.basket = Basket::default();
        self.hearts.clear();
        self.countdown_ms = 0.0;
        self.spawn_ms = 0.0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
    }

    /// End the session: stop both cadences, drop all outstanding hearts, and
    /// report the final score. The platform layer owns the results delay and
    /// the screen transition.
    pub(crate) fn end_game(&mut self) {
        self.phase = GamePhase::Over;
        self.hearts.clear();
        self.events.push(GameEvent::Ended { score: self.score });
    }

    /// Take all pending events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_session_is_idle() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.time_remaining, 20);
        assert!(state.hearts.is_empty());
    }

    #[test]
    fn test_start_resets_session() {
        let mut state = GameState::new(7, Tuning::default());
        state.start();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::Started]);
        assert!((state.basket.x_percent - BASKET_START_PCT).abs() < f32::EPSILON);
    }

    #[test]
    fn test_double_start_is_noop() {
        let mut state = GameState::new(7, Tuning::default());
        state.start();
        state.score = 40;
        state.time_remaining = 12;
        state.level = 2;
        state.start();
        // Second call must not reset anything
        assert_eq!(state.score, 40);
        assert_eq!(state.time_remaining, 12);
        assert_eq!(state.level, 2);
        // And no second Started event
        assert_eq!(state.events, vec![GameEvent::Started]);
    }

    #[test]
    fn test_basket_step_and_clamp() {
        let tuning = Tuning::default();
        let mut basket = Basket::default();
        basket.apply(None, -1, &tuning);
        assert!((basket.x_percent - 45.0).abs() < f32::EPSILON);
        // Slam left well past the bound
        for _ in 0..50 {
            basket.apply(None, -1, &tuning);
        }
        assert!((basket.x_percent - tuning.basket_min_pct).abs() < f32::EPSILON);
        // Pointer target beyond the right bound clamps too
        basket.apply(Some(150.0), 0, &tuning);
        assert!((basket.x_percent - tuning.basket_max_pct).abs() < f32::EPSILON);
    }

    #[test]
    fn test_heart_kinds_have_glyphs() {
        for kind in HeartKind::ALL {
            assert!(!kind.glyph().is_empty());
        }
    }

    #[test]
    fn test_heart_top_tracks_age() {
        let heart = FallingHeart {
            id: 1,
            kind: HeartKind::Red,
            x_percent: 50.0,
            fall_duration_ms: 2000.0,
            age_ms: 0.0,
            poll_ms: 0.0,
        };
        assert!((heart.top_percent() - ITEM_SPAWN_TOP_PCT).abs() < f32::EPSILON);

        let done = FallingHeart {
            age_ms: 2000.0,
            ..heart
        };
        assert!((done.top_percent() - ITEM_FALL_END_PCT).abs() < f32::EPSILON);

        // Age past the duration does not overshoot the end position
        let over = FallingHeart {
            age_ms: 9000.0,
            ..heart
        };
        assert!((over.top_percent() - ITEM_FALL_END_PCT).abs() < f32::EPSILON);
    }

    proptest! {
        // The clamp invariant: no sequence of pointer targets and discrete
        // steps can push the basket outside [10, 90].
        #[test]
        fn prop_basket_stays_in_bounds(
            inputs in prop::collection::vec(
                (prop::option::of(-50.0f32..150.0), -3i32..=3),
                0..64,
            )
        ) {
            let tuning = Tuning::default();
            let mut basket = Basket::default();
            for (target, steps) in inputs {
                basket.apply(target, steps, &tuning);
                prop_assert!(basket.x_percent >= tuning.basket_min_pct);
                prop_assert!(basket.x_percent <= tuning.basket_max_pct);
            }
        }
    }
}
