//! Game session: one frame of the runner at a time
//!
//! The session owns every piece of mutable game state. Frontends drive it with
//! `start`, `jump`, `step` and `resolve_game_over`, then drain the queued
//! [`GameEvent`]s to play sounds and update the scoreboard.

use glam::Vec2;

use super::catalog::Catalog;
use super::difficulty::Difficulty;
use super::field::ObstacleField;
use super::spawner::ObstacleSpawner;
use super::state::{GameEvent, GamePhase, Mammoth, Obstacle};
use crate::Viewport;
use crate::tuning::Tuning;

/// What the frame scheduler should do after a `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Still running, request the next frame
    Continue,
    /// Collision this frame; stop requesting frames and arm the game-over timer
    Died,
    /// Not running, nothing happened
    Halted,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    tuning: Tuning,
    catalog: Catalog,
    viewport: Viewport,
    phase: GamePhase,
    score: u32,
    difficulty: Difficulty,
    mammoth: Mammoth,
    field: ObstacleField,
    spawner: ObstacleSpawner,
    events: Vec<GameEvent>,
    /// Frames stepped this session
    frames: u64,
}

impl GameSession {
    /// Create an idle session. Call [`GameSession::start`] to begin a run.
    pub fn new(tuning: Tuning, catalog: Catalog, viewport: Viewport, seed: u64) -> Self {
        let ground_y = viewport.height - tuning.elevated_ground_level;
        let mammoth = Mammoth::new(
            tuning.mammoth_x,
            ground_y,
            Vec2::new(tuning.mammoth_width, tuning.mammoth_height),
        );

        Self {
            tuning,
            catalog,
            viewport,
            phase: GamePhase::Idle,
            score: 0,
            difficulty: Difficulty::initial(&tuning.difficulty),
            mammoth,
            field: ObstacleField::new(),
            spawner: ObstacleSpawner::new(seed, tuning.initial_spawn_delay_ms),
            events: Vec::new(),
            frames: 0,
        }
    }

    /// Full reset into a fresh run
    pub fn start(&mut self, now_ms: f64) {
        self.score = 0;
        self.difficulty = Difficulty::initial(&self.tuning.difficulty);
        self.field.clear();
        self.mammoth.reset();
        self.spawner.reset(now_ms, self.tuning.initial_spawn_delay_ms);
        self.frames = 0;
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Reset);

        log::info!(
            "Run started (speed {}, first building after {}ms)",
            self.difficulty.scroll_speed,
            self.tuning.initial_spawn_delay_ms
        );
    }

    /// Jump request from input. Ignored unless running with a charge left.
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        if !self.mammoth.jump(self.tuning.max_jump_impulse) {
            return false;
        }
        self.events.push(GameEvent::Jumped {
            charge: self.mammoth.jump_count,
        });
        true
    }

    /// Advance one animation frame.
    ///
    /// Order: move buildings, test collision, reap and score, recompute
    /// difficulty, maybe spawn, then mammoth physics.
    pub fn step(&mut self, now_ms: f64) -> StepResult {
        if self.phase != GamePhase::Running {
            return StepResult::Halted;
        }
        self.frames += 1;

        self.field.advance(self.difficulty.scroll_speed);

        if self
            .field
            .collides_with(&self.mammoth.bounds(), self.tuning.hitbox_buffer)
        {
            self.die(now_ms);
            return StepResult::Died;
        }

        let cleared = self.field.reap();
        if cleared > 0 {
            for _ in 0..cleared {
                self.score += 1;
                self.events.push(GameEvent::Scored { score: self.score });
            }
            self.recompute_difficulty();
        }

        if let Some(obstacle) = self.spawner.maybe_spawn(
            now_ms,
            &self.difficulty,
            &self.catalog,
            self.viewport.width,
            self.building_ground_line(),
        ) {
            self.events.push(GameEvent::Spawned {
                variant: obstacle.variant,
            });
            self.field.push(obstacle);
        }

        self.mammoth.update(self.tuning.gravity);

        StepResult::Continue
    }

    /// Finish the game-over sequence once the dead frame has been shown.
    ///
    /// Returns the final score and moves to `Idle` the first time it is called
    /// at or after the deadline; `None` otherwise.
    pub fn resolve_game_over(&mut self, now_ms: f64) -> Option<u32> {
        let GamePhase::GameOver { notify_at_ms } = self.phase else {
            return None;
        };
        if now_ms < notify_at_ms {
            return None;
        }

        self.phase = GamePhase::Idle;
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        Some(self.score)
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn die(&mut self, now_ms: f64) {
        self.mammoth.alive = false;
        self.phase = GamePhase::GameOver {
            notify_at_ms: now_ms + f64::from(self.tuning.game_over_delay_ms),
        };
        self.events.push(GameEvent::Died { score: self.score });
        log::info!(
            "Game over after {} frames, score {}",
            self.frames,
            self.score
        );
    }

    fn recompute_difficulty(&mut self) {
        let next = Difficulty::for_score(self.score, &self.tuning.difficulty);
        if next.scroll_speed > self.difficulty.scroll_speed {
            self.events.push(GameEvent::SpeedUp {
                speed: next.scroll_speed,
            });
            log::debug!("speed up to {} at score {}", next.scroll_speed, self.score);
        }
        self.difficulty = next;
    }

    /// y of the line buildings stand on
    pub fn building_ground_line(&self) -> f32 {
        self.viewport.height - self.tuning.building_ground_level
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mammoth(&self) -> &Mammoth {
        &self.mammoth
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.field.as_slice()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn spawner(&self) -> &ObstacleSpawner {
        &self.spawner
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Place a building directly (scripted scenarios, replays)
    pub fn insert_obstacle(&mut self, obstacle: Obstacle) {
        self.field.push(obstacle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::VariantId;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn session() -> GameSession {
        GameSession::new(
            Tuning::default(),
            Catalog::reference(),
            Viewport::new(1280.0, 720.0),
            12345,
        )
    }

    fn obstacle_at(session: &GameSession, variant: usize, x: f32) -> Obstacle {
        let id = VariantId(variant);
        let spec = session.catalog().get(id).expect("variant");
        Obstacle::new(id, spec, x, session.building_ground_line())
    }

    #[test]
    fn test_idle_until_started() {
        let mut s = session();
        assert_eq!(s.phase(), GamePhase::Idle);
        assert_eq!(s.step(0.0), StepResult::Halted);
        assert!(!s.jump());
        assert!(s.drain_events().is_empty());

        s.start(0.0);
        assert!(s.is_running());
        assert_eq!(s.drain_events(), vec![GameEvent::Reset]);
    }

    #[test]
    fn test_jump_emits_event_and_is_capped() {
        let mut s = session();
        s.start(0.0);
        s.drain_events();

        assert!(s.jump());
        assert!(s.jump());
        assert!(!s.jump());
        assert_eq!(
            s.drain_events(),
            vec![
                GameEvent::Jumped { charge: 1 },
                GameEvent::Jumped { charge: 2 }
            ]
        );
    }

    #[test]
    fn test_first_spawn_after_initial_delay() {
        let mut s = session();
        s.start(0.0);
        let mut now = 0.0;
        while now <= 3000.0 {
            now += FRAME_MS;
            s.step(now);
            if now <= 3000.0 {
                assert!(s.obstacles().is_empty(), "spawned early at {now}");
            }
        }
        assert_eq!(s.obstacles().len(), 1);
        assert_eq!(s.obstacles()[0].variant, s.catalog().opener());
        // Spawned at the right edge, then did not move yet this frame
        assert_eq!(s.obstacles()[0].pos.x, 1280.0);
    }

    #[test]
    fn test_collision_ends_run_once() {
        let mut s = session();
        s.start(0.0);
        // Two overlapping buildings right on top of the mammoth
        let a = obstacle_at(&s, 1, 72.0);
        let b = obstacle_at(&s, 2, 80.0);
        s.insert_obstacle(a);
        s.insert_obstacle(b);
        s.drain_events();

        assert_eq!(s.step(16.0), StepResult::Died);
        assert!(!s.mammoth().alive);
        assert_eq!(
            s.phase(),
            GamePhase::GameOver {
                notify_at_ms: 116.0
            }
        );
        assert_eq!(s.drain_events(), vec![GameEvent::Died { score: 0 }]);

        // Frozen: no more steps, no jumps, mammoth does not move
        let y = s.mammoth().pos.y;
        assert_eq!(s.step(32.0), StepResult::Halted);
        assert!(!s.jump());
        assert_eq!(s.mammoth().pos.y, y);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_fatal_frame_skips_reap_and_spawn() {
        let mut s = session();
        s.start(0.0);
        let o = obstacle_at(&s, 3, 60.0);
        s.insert_obstacle(o);
        // Spawn threshold already passed, but the collision ends the frame first
        assert_eq!(s.step(5000.0), StepResult::Died);
        assert_eq!(s.score(), 0);
        assert_eq!(s.obstacles().len(), 1);
    }

    #[test]
    fn test_game_over_resolves_after_delay() {
        let mut s = session();
        s.start(0.0);
        let o = obstacle_at(&s, 1, 72.0);
        s.insert_obstacle(o);
        s.step(1000.0);
        s.drain_events();

        assert_eq!(s.resolve_game_over(1050.0), None);
        assert_eq!(s.resolve_game_over(1100.0), Some(0));
        assert_eq!(s.phase(), GamePhase::Idle);
        assert_eq!(
            s.drain_events(),
            vec![GameEvent::GameOver { final_score: 0 }]
        );
        // Only once
        assert_eq!(s.resolve_game_over(2000.0), None);
    }

    #[test]
    fn test_resolve_is_noop_while_running() {
        let mut s = session();
        s.start(0.0);
        assert_eq!(s.resolve_game_over(10_000.0), None);
        assert!(s.is_running());
    }

    #[test]
    fn test_scoring_steps_speed() {
        let mut s = session();
        s.start(0.0);
        s.drain_events();
        // Right edges land at x=-1 after this frame's move
        for _ in 0..5 {
            let o = obstacle_at(&s, 0, -74.0);
            s.insert_obstacle(o);
        }
        assert_eq!(s.step(16.0), StepResult::Continue);
        assert_eq!(s.score(), 5);
        assert_eq!(s.difficulty().scroll_speed, 13);

        let events = s.drain_events();
        let scored: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Scored { score } => Some(*score),
                _ => None,
            })
            .collect();
        assert_eq!(scored, vec![1, 2, 3, 4, 5]);
        assert!(events.contains(&GameEvent::SpeedUp { speed: 13 }));
    }

    #[test]
    fn test_mammoth_moves_after_jump() {
        let mut s = session();
        s.start(0.0);
        let ground = s.mammoth().pos.y;
        s.jump();
        s.step(16.0);
        assert_eq!(s.mammoth().pos.y, ground - 65.0);
    }
}
