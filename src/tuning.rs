//! Data-driven game balance
//!
//! Every pacing and scoring knob lives here so the sim can be rebalanced (or
//! sped up in tests) without touching gameplay code. A JSON override in
//! LocalStorage is honored on wasm; native builds use the defaults.

use serde::{Deserialize, Serialize};

/// Balance knobs for one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Session length in seconds
    pub game_duration_secs: u32,
    /// Countdown cadence
    pub countdown_interval_ms: f32,
    /// Spawn cadence (one heart per tick while active)
    pub spawn_interval_ms: f32,
    /// Per-item collision/exit sampling cadence
    pub collision_poll_ms: f32,
    /// Fall duration at level 0 (before the per-level ramp)
    pub base_fall_ms: f32,
    /// Fall duration shaved off per level
    pub fall_step_ms: f32,
    /// Fall duration floor
    pub min_fall_ms: f32,
    /// Points per caught heart
    pub score_per_catch: u32,
    /// Level ramps on countdown ticks that are positive multiples of this
    pub level_up_interval_secs: u32,
    /// Basket movement per discrete left/right activation
    pub basket_step_pct: f32,
    /// Basket center clamp range
    pub basket_min_pct: f32,
    pub basket_max_pct: f32,
    /// Horizontal spawn range for falling hearts
    pub spawn_min_pct: f32,
    pub spawn_max_pct: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_duration_secs: 20,
            countdown_interval_ms: 1000.0,
            spawn_interval_ms: 1000.0,
            collision_poll_ms: 50.0,
            base_fall_ms: 2000.0,
            fall_step_ms: 100.0,
            min_fall_ms: 1000.0,
            score_per_catch: 10,
            level_up_interval_secs: 5,
            basket_step_pct: 5.0,
            basket_min_pct: 10.0,
            basket_max_pct: 90.0,
            spawn_min_pct: 5.0,
            spawn_max_pct: 95.0,
        }
    }
}

impl Tuning {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "heart_drop_tuning";

    /// Load tuning, honoring a LocalStorage JSON override (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring malformed tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native builds always use the defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pacing() {
        let t = Tuning::default();
        assert_eq!(t.game_duration_secs, 20);
        assert_eq!(t.countdown_interval_ms, 1000.0);
        assert_eq!(t.spawn_interval_ms, 1000.0);
        assert_eq!(t.collision_poll_ms, 50.0);
        assert_eq!(t.base_fall_ms, 2000.0);
        assert_eq!(t.fall_step_ms, 100.0);
        assert_eq!(t.min_fall_ms, 1000.0);
        assert_eq!(t.score_per_catch, 10);
        assert_eq!((t.basket_min_pct, t.basket_max_pct), (10.0, 90.0));
        assert_eq!((t.spawn_min_pct, t.spawn_max_pct), (5.0, 95.0));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        // A sparse override only replaces the named fields
        let t: Tuning = serde_json::from_str(r#"{"game_duration_secs": 60}"#).unwrap();
        assert_eq!(t.game_duration_secs, 60);
        assert_eq!(t.score_per_catch, 10);
        assert_eq!(t.basket_max_pct, 90.0);
    }

    #[test]
    fn test_round_trip() {
        let t = Tuning::default();
        let json = serde_json::to_string(&t).unwrap();
        let back: Tuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back.spawn_interval_ms, t.spawn_interval_ms);
        assert_eq!(back.game_duration_secs, t.game_duration_secs);
    }
}
