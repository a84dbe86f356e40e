//! Data-driven game balance
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! partial JSON document only overrides what it names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tuning values the simulation cannot run with
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// Gravity must be positive or the mammoth never comes back down
    NonPositiveGravity { gravity: f32 },
    NonPositiveJumpImpulse { impulse: f32 },
    EmptyMammoth { width: f32, height: f32 },
    NegativeHitboxBuffer { buffer: f32 },
    /// NaN or infinite field
    NotFinite { field: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveGravity { gravity } => {
                write!(f, "gravity must be positive, got {gravity}")
            }
            Self::NonPositiveJumpImpulse { impulse } => {
                write!(f, "jump impulse must be positive, got {impulse}")
            }
            Self::EmptyMammoth { width, height } => {
                write!(f, "mammoth box {width}x{height} has no area")
            }
            Self::NegativeHitboxBuffer { buffer } => {
                write!(f, "hitbox buffer must not be negative, got {buffer}")
            }
            Self::NotFinite { field } => write!(f, "{field} is not a finite number"),
        }
    }
}

impl std::error::Error for TuningError {}

/// Difficulty ramp parameters (see [`crate::sim::Difficulty`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyParams {
    pub initial_speed: u32,
    pub max_speed: u32,
    /// Score points per +1 speed
    pub speed_step_score: u32,

    pub interval_base_ms: u32,
    pub interval_base_step_ms: u32,
    pub interval_base_floor_ms: u32,
    pub interval_jitter_ms: u32,
    pub interval_jitter_step_ms: u32,
    pub interval_jitter_floor_ms: u32,
    /// Score points per interval tightening step
    pub interval_step_score: u32,
}

impl Default for DifficultyParams {
    fn default() -> Self {
        Self {
            initial_speed: INITIAL_SCROLL_SPEED,
            max_speed: MAX_SCROLL_SPEED,
            speed_step_score: SPEED_STEP_SCORE,
            interval_base_ms: SPAWN_BASE_MS,
            interval_base_step_ms: SPAWN_BASE_STEP_MS,
            interval_base_floor_ms: SPAWN_BASE_FLOOR_MS,
            interval_jitter_ms: SPAWN_JITTER_MS,
            interval_jitter_step_ms: SPAWN_JITTER_STEP_MS,
            interval_jitter_floor_ms: SPAWN_JITTER_FLOOR_MS,
            interval_step_score: INTERVAL_STEP_SCORE,
        }
    }
}

/// Physics, geometry and timing knobs for a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub max_jump_impulse: f32,

    pub mammoth_x: f32,
    pub mammoth_width: f32,
    pub mammoth_height: f32,

    pub elevated_ground_level: f32,
    pub building_ground_level: f32,
    pub hitbox_buffer: f32,

    pub initial_spawn_delay_ms: u32,
    pub game_over_delay_ms: u32,

    pub difficulty: DifficultyParams,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_jump_impulse: MAX_JUMP_IMPULSE,
            mammoth_x: MAMMOTH_X,
            mammoth_width: MAMMOTH_WIDTH,
            mammoth_height: MAMMOTH_HEIGHT,
            elevated_ground_level: ELEVATED_GROUND_LEVEL,
            building_ground_level: BUILDING_GROUND_LEVEL,
            hitbox_buffer: HITBOX_BUFFER,
            initial_spawn_delay_ms: INITIAL_SPAWN_DELAY_MS,
            game_over_delay_ms: GAME_OVER_DELAY_MS,
            difficulty: DifficultyParams::default(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("gravity", self.gravity),
            ("max_jump_impulse", self.max_jump_impulse),
            ("mammoth_x", self.mammoth_x),
            ("mammoth_width", self.mammoth_width),
            ("mammoth_height", self.mammoth_height),
            ("elevated_ground_level", self.elevated_ground_level),
            ("building_ground_level", self.building_ground_level),
            ("hitbox_buffer", self.hitbox_buffer),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(TuningError::NotFinite { field });
            }
        }

        if self.gravity <= 0.0 {
            return Err(TuningError::NonPositiveGravity {
                gravity: self.gravity,
            });
        }
        if self.max_jump_impulse <= 0.0 {
            return Err(TuningError::NonPositiveJumpImpulse {
                impulse: self.max_jump_impulse,
            });
        }
        if self.mammoth_width <= 0.0 || self.mammoth_height <= 0.0 {
            return Err(TuningError::EmptyMammoth {
                width: self.mammoth_width,
                height: self.mammoth_height,
            });
        }
        if self.hitbox_buffer < 0.0 {
            return Err(TuningError::NegativeHitboxBuffer {
                buffer: self.hitbox_buffer,
            });
        }
        Ok(())
    }

    /// Easier ramp for casual play
    pub fn relaxed() -> Self {
        let mut tuning = Self::default();
        tuning.difficulty.max_speed = 18;
        tuning.difficulty.speed_step_score = 8;
        tuning.difficulty.interval_base_floor_ms = 450;
        tuning.difficulty.interval_jitter_floor_ms = 1400;
        tuning
    }
}
