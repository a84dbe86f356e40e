//! Collision detection for axis-aligned boxes
//!
//! Building hitboxes are shrunk inward by a fixed buffer on all four edges,
//! so grazing a sprite corner does not end the run. The mammoth's box is used
//! unshrunk.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in canvas space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Strict overlap between `actor` and `obstacle` with the obstacle shrunk by `buffer`
pub fn overlaps_with_buffer(actor: &Aabb, obstacle: &Aabb, buffer: f32) -> bool {
    actor.left() < obstacle.right() - buffer
        && actor.right() > obstacle.left() + buffer
        && actor.top() < obstacle.bottom() - buffer
        && actor.bottom() > obstacle.top() + buffer
}
