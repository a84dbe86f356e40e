//! Live buildings, in spawn order

use serde::{Deserialize, Serialize};

use super::collision::{Aabb, overlaps_with_buffer};
use super::state::Obstacle;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Move every building left by `scroll_speed`
    pub fn advance(&mut self, scroll_speed: u32) {
        let dx = scroll_speed as f32;
        for o in &mut self.obstacles {
            o.pos.x -= dx;
        }
    }

    /// Does any building's buffered hitbox overlap `actor`?
    pub fn collides_with(&self, actor: &Aabb, buffer: f32) -> bool {
        self.obstacles
            .iter()
            .any(|o| overlaps_with_buffer(actor, &o.bounds(), buffer))
    }

    /// Drop buildings that scrolled past the left edge; returns how many
    pub fn reap(&mut self) -> u32 {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_off_screen());
        (before - self.obstacles.len()) as u32
    }
}
