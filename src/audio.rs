//! Sound cues
//!
//! Two procedurally generated cues, jump and death. Playing a cue that is
//! still sounding restarts it from the beginning instead of layering a second
//! copy on top.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Jump accepted
    Jump,
    /// Mammoth hit a building
    Death,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 2] = [SoundEffect::Jump, SoundEffect::Death];

    /// Stable index, used for per-cue playback slots
    pub fn slot(self) -> usize {
        match self {
            SoundEffect::Jump => 0,
            SoundEffect::Death => 1,
        }
    }
}

/// Fire-and-forget playback. Implementations must never block the frame.
pub trait AudioCue {
    /// Play `effect` from the start, cutting off any previous playback of it
    fn play(&mut self, effect: SoundEffect);
}

/// Drops every cue (native builds, muted tabs, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioCue for SilentAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Volume mix shared by all backends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mix {
    pub master_volume: f32,
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Mix {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Mix {
    /// Effective gain, 0.0 when muted
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioCue, Mix, SoundEffect};

    /// Web Audio backend
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        mix: Mix,
        /// Last oscillator started per cue, stopped on retrigger
        playing: [Option<OscillatorNode>; 2],
    }

    impl AudioManager {
        pub fn new(mix: Mix) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                mix,
                playing: [None, None],
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_mix(&mut self, mix: Mix) {
            self.mix = mix;
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Jump - short rising chirp
        fn jump(ctx: &AudioContext, vol: f32) -> Option<OscillatorNode> {
            let (osc, gain) = Self::create_osc(ctx, 220.0, OscillatorType::Square)?;
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(660.0, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
            Some(osc)
        }

        /// Death - descending saw, 400Hz to 80Hz
        fn death(ctx: &AudioContext, vol: f32) -> Option<OscillatorNode> {
            let (osc, gain) = Self::create_osc(ctx, 400.0, OscillatorType::Sawtooth)?;
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.4)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
            Some(osc)
        }
    }

    impl AudioCue for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.mix.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let slot = effect.slot();
            if let Some(prev) = self.playing[slot].take() {
                prev.stop().ok();
            }

            self.playing[slot] = match effect {
                SoundEffect::Jump => Self::jump(ctx, vol),
                SoundEffect::Death => Self::death(ctx, vol),
            };
        }
    }
}
