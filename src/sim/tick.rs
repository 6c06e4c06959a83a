//! Fixed timestep simulation tick
//!
//! Advances one session deterministically: the 1-second countdown and spawn
//! cadences, basket input, and per-heart resolution all run from simulated
//! time accumulated here, so ending the game cancels everything in one place.

use rand::Rng;

use super::collision::{self, Rect};
use super::state::{FallingHeart, GameEvent, GamePhase, GameState, HeartKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer/touch position mapped to percent of play-area width
    pub target_x: Option<f32>,
    /// Net discrete left/right activations since the last tick (sign = direction)
    pub steps: i32,
    /// Start a new game (one-shot; no-op while a game is active)
    pub start: bool,
}

/// Advance the game state by `dt_ms` of simulated time
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if input.start {
        state.start();
    }

    // Nothing moves outside an active session; this is also the uniform
    // active-flag guard for every input path.
    if state.phase != GamePhase::Playing {
        return;
    }

    let tuning = state.tuning.clone();

    state.basket.apply(input.target_x, input.steps, &tuning);
    state.basket.pulse_ms = (state.basket.pulse_ms - dt_ms).max(0.0);

    // Countdown cadence. May end the game, which drops every outstanding
    // heart before any of them can still score on this step.
    state.countdown_ms += dt_ms;
    while state.countdown_ms >= tuning.countdown_interval_ms {
        state.countdown_ms -= tuning.countdown_interval_ms;
        countdown_tick(state, &tuning);
        if state.phase != GamePhase::Playing {
            return;
        }
    }

    // Spawn cadence
    state.spawn_ms += dt_ms;
    while state.spawn_ms >= tuning.spawn_interval_ms {
        state.spawn_ms -= tuning.spawn_interval_ms;
        spawn_heart(state, &tuning);
    }

    advance_hearts(state, &tuning, dt_ms);
}

/// One 1-second countdown step: decrement, end at zero, ramp the level on
/// positive multiples of the level interval (ticks 15/10/5 of a 20-second
/// game; the initial 20 never counts).
fn countdown_tick(state: &mut GameState, tuning: &Tuning) {
    state.time_remaining = state.time_remaining.saturating_sub(1);
    state.events.push(GameEvent::TimeTick {
        remaining: state.time_remaining,
    });

    if state.time_remaining == 0 {
        state.end_game();
        return;
    }

    if state.time_remaining % tuning.level_up_interval_secs == 0 {
        state.level += 1;
        state.events.push(GameEvent::LevelUp { level: state.level });
    }
}

/// Fall duration for the given level: shrinks as the level ramps, floored
/// at the minimum (`max(2000 - level*100, 1000)` ms with default tuning)
pub fn fall_duration_ms(level: u32, tuning: &Tuning) -> f32 {
    (tuning.base_fall_ms - level as f32 * tuning.fall_step_ms).max(tuning.min_fall_ms)
}

/// Create one heart with a uniformly random x and glyph kind
fn spawn_heart(state: &mut GameState, tuning: &Tuning) {
    let x_percent = state
        .rng
        .random_range(tuning.spawn_min_pct..=tuning.spawn_max_pct);
    let kind = HeartKind::ALL[state.rng.random_range(0..HeartKind::ALL.len())];
    let fall = fall_duration_ms(state.level, tuning);
    let id = state.next_entity_id();

    state.hearts.push(FallingHeart {
        id,
        kind,
        x_percent,
        fall_duration_ms: fall,
        age_ms: 0.0,
        poll_ms: 0.0,
    });
    state.events.push(GameEvent::Spawned {
        id,
        kind,
        x_percent,
        fall_duration_ms: fall,
    });
}

/// First resolution wins; a resolved heart is gone before the next sample.
enum HeartFate {
    Falling,
    Caught,
    Missed,
    Expired,
}

/// Age every heart and resolve the finished ones exactly once
fn advance_hearts(state: &mut GameState, tuning: &Tuning, dt_ms: f32) {
    let basket = collision::basket_rect(state.basket.x_percent);

    let hearts = std::mem::take(&mut state.hearts);
    let mut live = Vec::with_capacity(hearts.len());

    for mut heart in hearts {
        heart.age_ms += dt_ms;
        heart.poll_ms += dt_ms;

        match resolve_heart(&mut heart, &basket, tuning) {
            HeartFate::Falling => live.push(heart),
            HeartFate::Caught => {
                state.score += tuning.score_per_catch;
                state.basket.pulse_ms = BASKET_PULSE_MS;
                state.events.push(GameEvent::Caught {
                    id: heart.id,
                    score: state.score,
                });
            }
            HeartFate::Missed => state.events.push(GameEvent::Missed { id: heart.id }),
            HeartFate::Expired => state.events.push(GameEvent::Expired { id: heart.id }),
        }
    }

    state.hearts = live;
}

/// Exit conditions in priority order: collision, bottom exit, expiry.
///
/// Collision and exit are only observed on the poll cadence; expiry fires on
/// the age deadline regardless, so a heart whose polls never ran (throttled
/// tab) still resolves.
fn resolve_heart(heart: &mut FallingHeart, basket: &Rect, tuning: &Tuning) -> HeartFate {
    if heart.poll_ms >= tuning.collision_poll_ms {
        heart.poll_ms %= tuning.collision_poll_ms;

        let rect = collision::heart_rect(heart.x_percent, heart.top_percent());
        if rect.overlaps(basket) {
            return HeartFate::Caught;
        }
        if rect.top > PLAY_AREA_HEIGHT_PCT {
            return HeartFate::Missed;
        }
    }

    if heart.age_ms >= heart.fall_duration_ms {
        return HeartFate::Expired;
    }

    HeartFate::Falling
}
