//! Web Audio sound effects
//!
//! Every effect is synthesized from oscillators at play time - no audio
//! assets to ship.

use web_sys::{AudioContext, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Heart caught by the basket
    Catch,
    /// Level ramped up
    LevelUp,
    /// Countdown hit zero
    GameOver,
}

/// Owns the `AudioContext` and fans effects out to it
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Context creation can fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.8,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Catch => self.play_catch(ctx, vol),
            SoundEffect::LevelUp => self.play_level_up(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    // === Sound generators ===

    /// One oscillator voice: exponential decay from `peak` over `decay_s`
    /// seconds, gliding from `freq.0` to `freq.1` when the two differ.
    fn voice(
        &self,
        ctx: &AudioContext,
        shape: OscillatorType,
        freq: (f32, f32),
        peak: f32,
        start_at: f64,
        decay_s: f64,
    ) {
        let (Ok(osc), Ok(gain)) = (ctx.create_oscillator(), ctx.create_gain()) else {
            return;
        };
        osc.set_type(shape);
        if osc.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(&ctx.destination()).is_err()
        {
            return;
        }

        gain.gain().set_value_at_time(peak, start_at).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, start_at + decay_s)
            .ok();
        osc.frequency().set_value_at_time(freq.0, start_at).ok();
        if freq.1 != freq.0 {
            osc.frequency()
                .exponential_ramp_to_value_at_time(freq.1, start_at + decay_s * 0.85)
                .ok();
        }

        osc.start_with_when(start_at).ok();
        osc.stop_with_when(start_at + decay_s + 0.05).ok();
    }

    /// Catch - bright rising blip
    fn play_catch(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        self.voice(ctx, OscillatorType::Sine, (660.0, 990.0), vol * 0.4, t, 0.12);
    }

    /// Level up - quick two-note chirp
    fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [523.0f32, 784.0].into_iter().enumerate() {
            self.voice(
                ctx,
                OscillatorType::Triangle,
                (freq, freq),
                vol * 0.3,
                t + i as f64 * 0.09,
                0.1,
            );
        }
    }

    /// Game over - slow descending tone
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        self.voice(ctx, OscillatorType::Sine, (440.0, 180.0), vol * 0.5, t, 0.6);
    }
}
