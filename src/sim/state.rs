//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::{ObstacleVariant, VariantId};
use super::collision::Aabb;
use crate::consts::MAX_JUMPS;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No run in progress
    Idle,
    /// Frames are being stepped
    Running,
    /// Collision happened; the dead frame is on screen until `notify_at_ms`
    GameOver { notify_at_ms: f64 },
}

/// Something the frontend should react to (sound, scoreboard, notice)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Session (re)started; scoreboard shows 0
    Reset,
    /// Jump accepted; `charge` is the jump count after this jump
    Jumped { charge: u8 },
    Spawned { variant: VariantId },
    /// A building scrolled off screen
    Scored { score: u32 },
    /// Scroll speed stepped up
    SpeedUp { speed: u32 },
    /// Collision; the mammoth is dead
    Died { score: u32 },
    /// Dead-frame delay elapsed; show the final score
    GameOver { final_score: u32 },
}

/// The player character. x never changes; the world scrolls past it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mammoth {
    pub pos: Vec2,
    pub size: Vec2,
    /// Resting y (top edge) when grounded
    pub ground_y: f32,
    /// Rising under jump impulse
    pub ascending: bool,
    /// Remaining upward impulse while ascending
    pub impulse: f32,
    /// Jumps used since last touching ground (0..=MAX_JUMPS)
    pub jump_count: u8,
    pub alive: bool,
}

impl Mammoth {
    pub fn new(x: f32, ground_y: f32, size: Vec2) -> Self {
        Self {
            pos: Vec2::new(x, ground_y),
            size,
            ground_y,
            ascending: false,
            impulse: 0.0,
            jump_count: 0,
            alive: true,
        }
    }

    /// Back on the ground, alive, with full jump charge
    pub fn reset(&mut self) {
        self.pos.y = self.ground_y;
        self.ascending = false;
        self.impulse = 0.0;
        self.jump_count = 0;
        self.alive = true;
    }

    pub fn can_jump(&self) -> bool {
        self.jump_count < MAX_JUMPS
    }

    /// Start (or restart, mid-air) a jump. Returns false when out of charges.
    pub fn jump(&mut self, max_impulse: f32) -> bool {
        if !self.can_jump() {
            return false;
        }
        self.ascending = true;
        self.impulse = max_impulse;
        self.jump_count += 1;
        true
    }

    /// Advance one frame.
    ///
    /// Rising decelerates (impulse decays by `gravity` each frame) while
    /// falling is a constant `gravity` pixels per frame.
    pub fn update(&mut self, gravity: f32) {
        if self.ascending {
            self.pos.y -= self.impulse;
            self.impulse -= gravity;
            if self.impulse <= 0.0 {
                self.ascending = false;
            }
        } else if self.pos.y < self.ground_y {
            self.pos.y += gravity;
        } else {
            self.pos.y = self.ground_y;
            self.jump_count = 0;
        }
    }

    pub fn is_grounded(&self) -> bool {
        !self.ascending && self.pos.y >= self.ground_y
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A live building scrolling toward the mammoth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub variant: VariantId,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// Place `variant` at `x`, standing flush on the building ground line
    pub fn new(variant: VariantId, spec: &ObstacleVariant, x: f32, ground_line: f32) -> Self {
        Self {
            variant,
            pos: Vec2::new(x, ground_line - spec.height),
            size: Vec2::new(spec.width, spec.height),
        }
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Right edge has passed the left screen edge
    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}
