//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall-clock milliseconds fed to the simulation)
//! - Input events (key press and pointer click both mean "jump")
//! - Forwarding simulation events to audio and the scoreboard

use crate::audio::{AudioCue, SoundEffect};
use crate::sim::GameEvent;
use crate::ui::Scoreboard;

/// Monotonic-enough millisecond clock
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Clock advanced by hand (tests, headless replays)
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualClock {
    now_ms: f64,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self { now_ms: start_ms }
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

/// `Date.now()` in the browser
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct DateClock;

#[cfg(target_arch = "wasm32")]
impl Clock for DateClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// Discrete input the game reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputTrigger {
    /// Keyboard key, by `KeyboardEvent.code`
    Key(String),
    /// Click/tap on the canvas
    Pointer,
}

impl InputTrigger {
    /// Space and any pointer click jump; nothing else does
    pub fn is_jump(&self) -> bool {
        match self {
            InputTrigger::Key(code) => code == "Space",
            InputTrigger::Pointer => true,
        }
    }
}

/// Route session events to the audio cues and scoreboard.
///
/// Returns the final score if the batch contained a game-over notice.
pub fn dispatch_events(
    events: &[GameEvent],
    audio: &mut dyn AudioCue,
    scoreboard: &mut dyn Scoreboard,
) -> Option<u32> {
    let mut final_score = None;
    for event in events {
        match *event {
            GameEvent::Reset => scoreboard.set_score(0),
            GameEvent::Jumped { .. } => audio.play(SoundEffect::Jump),
            GameEvent::Scored { score } => scoreboard.set_score(score),
            GameEvent::Died { .. } => audio.play(SoundEffect::Death),
            GameEvent::GameOver { final_score: score } => {
                scoreboard.announce_game_over(score);
                final_score = Some(score);
            }
            GameEvent::Spawned { .. } | GameEvent::SpeedUp { .. } => {}
        }
    }
    final_score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::VariantId;

    #[derive(Default)]
    struct Recorder {
        sounds: Vec<SoundEffect>,
        scores: Vec<u32>,
        notices: Vec<u32>,
    }

    impl AudioCue for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.sounds.push(effect);
        }
    }

    impl Scoreboard for Recorder {
        fn set_score(&mut self, score: u32) {
            self.scores.push(score);
        }

        fn announce_game_over(&mut self, final_score: u32) {
            self.notices.push(final_score);
        }
    }

    #[test]
    fn test_jump_triggers() {
        assert!(InputTrigger::Key("Space".to_string()).is_jump());
        assert!(InputTrigger::Pointer.is_jump());
        assert!(!InputTrigger::Key("KeyA".to_string()).is_jump());
        assert!(!InputTrigger::Key("Enter".to_string()).is_jump());
    }

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::new(100.0);
        clock.advance(16.5);
        assert_eq!(clock.now_ms(), 116.5);
    }

    #[test]
    fn test_dispatch() {
        let events = [
            GameEvent::Reset,
            GameEvent::Jumped { charge: 1 },
            GameEvent::Spawned {
                variant: VariantId(0),
            },
            GameEvent::Scored { score: 1 },
            GameEvent::SpeedUp { speed: 13 },
            GameEvent::Died { score: 1 },
            GameEvent::GameOver { final_score: 1 },
        ];

        let mut audio = Recorder::default();
        let mut board = Recorder::default();
        let final_score = dispatch_events(&events, &mut audio, &mut board);

        assert_eq!(final_score, Some(1));
        assert_eq!(audio.sounds, vec![SoundEffect::Jump, SoundEffect::Death]);
        assert_eq!(board.scores, vec![0, 1]);
        assert_eq!(board.notices, vec![1]);
    }

    #[test]
    fn test_dispatch_without_game_over() {
        let mut audio = Recorder::default();
        let mut board = Recorder::default();
        let final_score =
            dispatch_events(&[GameEvent::Jumped { charge: 2 }], &mut audio, &mut board);
        assert_eq!(final_score, None);
        assert!(board.scores.is_empty());
    }
}
