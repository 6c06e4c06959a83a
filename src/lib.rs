//! Heart Drop - a falling-hearts catcher arcade mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (countdown, spawning, collision, game state)
//! - `tuning`: Data-driven game balance
//! - `audio`: Procedural sound effects (wasm only)
//!
//! The browser platform layer (DOM wiring, input events, frame loop) lives in
//! `main.rs`; everything here is platform-free and testable on the host.

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (120 Hz)
    pub const SIM_DT_MS: f32 = 1000.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play area extent in percent space (both axes)
    pub const PLAY_AREA_WIDTH_PCT: f32 = 100.0;
    pub const PLAY_AREA_HEIGHT_PCT: f32 = 100.0;

    /// Falling item bounding box (square)
    pub const ITEM_SIZE_PCT: f32 = 6.0;
    /// Vertical position of an item's top edge at spawn (just above the play area)
    pub const ITEM_SPAWN_TOP_PCT: f32 = -ITEM_SIZE_PCT;
    /// Vertical position an item's top edge animates toward. Past 100 so the
    /// bottom-exit check normally resolves an uncaught item before its expiry
    /// backstop fires.
    pub const ITEM_FALL_END_PCT: f32 = 110.0;

    /// Basket bounding box
    pub const BASKET_WIDTH_PCT: f32 = 14.0;
    pub const BASKET_HEIGHT_PCT: f32 = 7.0;
    /// Top edge of the basket (it sits near the bottom of the play area)
    pub const BASKET_TOP_PCT: f32 = 90.0;
    /// Basket start position (play-area center)
    pub const BASKET_START_PCT: f32 = 50.0;
    /// Catch feedback pulse duration
    pub const BASKET_PULSE_MS: f32 = 100.0;

    /// Delay before surfacing the final score and leaving the game screen
    pub const RESULTS_DELAY_MS: i32 = 500;
}

/// Linear interpolation between `a` and `b` by `t` in [0,1]
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
