//! Score-driven difficulty ramp
//!
//! Difficulty is a pure function of the number of buildings cleared: speed
//! steps up every `speed_step_score` points until it hits the cap, spawn
//! interval bounds step down every `interval_step_score` points until they hit
//! their floors.

use serde::{Deserialize, Serialize};

use crate::tuning::DifficultyParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Pixels per frame every building moves left
    pub scroll_speed: u32,
    /// Minimum spawn interval
    pub interval_base_ms: u32,
    /// Random extra on top of the base, drawn from [0, jitter)
    pub interval_jitter_ms: u32,
}

impl Difficulty {
    pub fn for_score(score: u32, params: &DifficultyParams) -> Self {
        let speed_steps = score / params.speed_step_score.max(1);
        let scroll_speed = params
            .initial_speed
            .saturating_add(speed_steps)
            .min(params.max_speed);

        let interval_steps = score / params.interval_step_score.max(1);
        let interval_base_ms = tighten(
            params.interval_base_ms,
            params.interval_base_step_ms,
            interval_steps,
            params.interval_base_floor_ms,
        );
        let interval_jitter_ms = tighten(
            params.interval_jitter_ms,
            params.interval_jitter_step_ms,
            interval_steps,
            params.interval_jitter_floor_ms,
        );

        Self {
            scroll_speed,
            interval_base_ms,
            interval_jitter_ms,
        }
    }

    /// Starting difficulty of every session
    pub fn initial(params: &DifficultyParams) -> Self {
        Self::for_score(0, params)
    }
}

/// `initial - step * steps`, never below `floor` (nor above `initial`)
fn tighten(initial: u32, step: u32, steps: u32, floor: u32) -> u32 {
    initial
        .saturating_sub(step.saturating_mul(steps))
        .max(floor)
        .min(initial)
}
