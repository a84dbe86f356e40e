//! Mammoth Run - a side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, session)
//! - `renderer`: Frame snapshots, asset cache and the Canvas2D renderer
//! - `platform`: Browser/native platform abstraction (clock, input, event dispatch)
//! - `audio`: Jump/death sound cues
//! - `ui`: Scoreboard and game-over notice
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// All distances are in canvas pixels, all durations in milliseconds.
/// Physics constants are applied once per animation frame.
pub mod consts {
    /// Actor ground line is this far above the bottom of the viewport
    pub const ELEVATED_GROUND_LEVEL: f32 = 160.0;
    /// Buildings stand on a line this far above the bottom of the viewport
    pub const BUILDING_GROUND_LEVEL: f32 = 30.0;

    /// Mammoth box (x is fixed, the world scrolls)
    pub const MAMMOTH_X: f32 = 50.0;
    pub const MAMMOTH_WIDTH: f32 = 120.0;
    pub const MAMMOTH_HEIGHT: f32 = 120.0;

    /// Per-frame gravity: impulse decay while ascending, fall rate otherwise
    pub const GRAVITY: f32 = 10.0;
    /// Impulse applied by a jump
    pub const MAX_JUMP_IMPULSE: f32 = 65.0;
    /// Jumps allowed before touching ground again (double jump)
    pub const MAX_JUMPS: u8 = 2;

    /// Hitbox shrink applied to every edge of a building
    pub const HITBOX_BUFFER: f32 = 30.0;

    /// Scroll speed at score 0 (pixels per frame)
    pub const INITIAL_SCROLL_SPEED: u32 = 12;
    /// Scroll speed never exceeds this
    pub const MAX_SCROLL_SPEED: u32 = 24;
    /// Score points per +1 scroll speed
    pub const SPEED_STEP_SCORE: u32 = 5;

    /// Spawn interval = base + uniform [0, jitter)
    pub const SPAWN_BASE_MS: u32 = 500;
    pub const SPAWN_BASE_STEP_MS: u32 = 50;
    pub const SPAWN_BASE_FLOOR_MS: u32 = 300;
    pub const SPAWN_JITTER_MS: u32 = 2000;
    pub const SPAWN_JITTER_STEP_MS: u32 = 200;
    pub const SPAWN_JITTER_FLOOR_MS: u32 = 800;
    /// Score points per spawn-interval tightening step
    pub const INTERVAL_STEP_SCORE: u32 = 10;

    /// Threshold before the first building of a session
    pub const INITIAL_SPAWN_DELAY_MS: u32 = 3000;

    /// Dead-frame render window before the game-over notice
    pub const GAME_OVER_DELAY_MS: u32 = 100;
}

/// Axis-aligned size of a canvas
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
