//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, basket_rect, heart_rect};
pub use state::{Basket, FallingHeart, GameEvent, GamePhase, GameState, HeartKind};
pub use tick::{TickInput, fall_duration_ms, tick};
