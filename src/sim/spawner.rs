//! Building spawner
//!
//! Fires when the time since the last spawn exceeds the current interval, then
//! draws the next interval from the difficulty bounds. At most one building per
//! check, so a long frame never produces a burst.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::catalog::{Catalog, VariantId};
use super::difficulty::Difficulty;
use super::state::Obstacle;

#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    rng: Pcg32,
    last_spawn_ms: f64,
    interval_ms: u32,
    /// Variant of the previous spawn this session (None until the opener)
    previous: Option<VariantId>,
}

impl ObstacleSpawner {
    pub fn new(seed: u64, initial_delay_ms: u32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last_spawn_ms: 0.0,
            interval_ms: initial_delay_ms,
            previous: None,
        }
    }

    /// Restart the schedule at `now_ms`. The RNG stream carries on.
    pub fn reset(&mut self, now_ms: f64, initial_delay_ms: u32) {
        self.last_spawn_ms = now_ms;
        self.interval_ms = initial_delay_ms;
        self.previous = None;
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn last_spawn_ms(&self) -> f64 {
        self.last_spawn_ms
    }

    pub fn previous(&self) -> Option<VariantId> {
        self.previous
    }

    /// Spawn a building at `spawn_x` if the interval has elapsed
    pub fn maybe_spawn(
        &mut self,
        now_ms: f64,
        difficulty: &Difficulty,
        catalog: &Catalog,
        spawn_x: f32,
        ground_line: f32,
    ) -> Option<Obstacle> {
        if now_ms - self.last_spawn_ms <= f64::from(self.interval_ms) {
            return None;
        }

        // Resolve the variant before touching the schedule
        let variant = self.pick_variant(catalog);
        let spec = catalog.get(variant)?;

        self.interval_ms = self.draw_interval(difficulty);
        self.previous = Some(variant);
        self.last_spawn_ms = now_ms;

        log::debug!(
            "spawn {} at t={now_ms:.0}ms, next in {}ms",
            spec.name,
            self.interval_ms
        );
        Some(Obstacle::new(variant, spec, spawn_x, ground_line))
    }

    fn draw_interval(&mut self, difficulty: &Difficulty) -> u32 {
        let jitter = if difficulty.interval_jitter_ms > 0 {
            self.rng.random_range(0..difficulty.interval_jitter_ms)
        } else {
            0
        };
        difficulty.interval_base_ms.saturating_add(jitter)
    }

    /// Opener first, then uniform over every variant except the previous one
    fn pick_variant(&mut self, catalog: &Catalog) -> VariantId {
        let Some(previous) = self.previous else {
            return catalog.opener();
        };
        let n = catalog.len();
        if n < 2 {
            return previous;
        }
        let idx = self.rng.random_range(0..n - 1);
        // Skip over the previous variant
        VariantId(if idx >= previous.0 { idx + 1 } else { idx })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::ObstacleVariant;
    use crate::tuning::DifficultyParams;
    use proptest::prelude::*;

    const SPAWN_X: f32 = 1280.0;
    const GROUND_LINE: f32 = 690.0;

    fn initial() -> Difficulty {
        Difficulty::initial(&DifficultyParams::default())
    }

    #[test]
    fn test_waits_for_initial_delay() {
        let catalog = Catalog::reference();
        let mut spawner = ObstacleSpawner::new(7, 3000);
        spawner.reset(1_000.0, 3000);

        let d = initial();
        assert!(spawner.maybe_spawn(2_000.0, &d, &catalog, SPAWN_X, GROUND_LINE).is_none());
        // Threshold is strict
        assert!(spawner.maybe_spawn(4_000.0, &d, &catalog, SPAWN_X, GROUND_LINE).is_none());
        let first = spawner.maybe_spawn(4_001.0, &d, &catalog, SPAWN_X, GROUND_LINE);
        assert!(first.is_some());
    }

    #[test]
    fn test_opener_is_forced() {
        let catalog = Catalog::reference();
        for seed in 0..20 {
            let mut spawner = ObstacleSpawner::new(seed, 0);
            let o = spawner
                .maybe_spawn(1.0, &initial(), &catalog, SPAWN_X, GROUND_LINE)
                .expect("spawn");
            assert_eq!(o.variant, catalog.opener());
            assert_eq!(o.pos.x, SPAWN_X);
            assert_eq!(o.pos.y, GROUND_LINE - 68.0);
        }
    }

    #[test]
    fn test_reset_forces_opener_again() {
        let catalog = Catalog::reference();
        let mut spawner = ObstacleSpawner::new(3, 0);
        let mut now = 0.0;
        for _ in 0..5 {
            now += 10_000.0;
            spawner.maybe_spawn(now, &initial(), &catalog, SPAWN_X, GROUND_LINE);
        }
        spawner.reset(now, 0);
        let o = spawner
            .maybe_spawn(now + 1.0, &initial(), &catalog, SPAWN_X, GROUND_LINE)
            .expect("spawn");
        assert_eq!(o.variant, catalog.opener());
    }

    #[test]
    fn test_interval_within_bounds() {
        let catalog = Catalog::reference();
        let mut spawner = ObstacleSpawner::new(11, 0);
        let d = initial();
        let mut now = 0.0;
        for _ in 0..200 {
            now += 5_000.0;
            spawner.maybe_spawn(now, &d, &catalog, SPAWN_X, GROUND_LINE);
            let interval = spawner.interval_ms();
            assert!(interval >= d.interval_base_ms);
            assert!(interval < d.interval_base_ms + d.interval_jitter_ms);
        }
    }

    #[test]
    fn test_zero_jitter_uses_base() {
        let catalog = Catalog::reference();
        let mut spawner = ObstacleSpawner::new(1, 0);
        let d = Difficulty {
            scroll_speed: 12,
            interval_base_ms: 400,
            interval_jitter_ms: 0,
        };
        spawner.maybe_spawn(1.0, &d, &catalog, SPAWN_X, GROUND_LINE);
        assert_eq!(spawner.interval_ms(), 400);
    }

    #[test]
    fn test_single_variant_catalog_repeats() {
        let catalog = Catalog::new(vec![ObstacleVariant::new("only", 50.0, 50.0, "only.png")])
            .expect("valid");
        let mut spawner = ObstacleSpawner::new(1, 0);
        let mut now = 0.0;
        for _ in 0..3 {
            now += 10_000.0;
            let o = spawner
                .maybe_spawn(now, &initial(), &catalog, SPAWN_X, GROUND_LINE)
                .expect("spawn");
            assert_eq!(o.variant, VariantId(0));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let catalog = Catalog::reference();
        let run = |seed| {
            let mut spawner = ObstacleSpawner::new(seed, 0);
            (1..=30)
                .filter_map(|i| {
                    let now = i as f64 * 5_000.0;
                    spawner.maybe_spawn(now, &initial(), &catalog, SPAWN_X, GROUND_LINE)
                })
                .map(|o| o.variant)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_huge_interval_saturates() {
        let catalog = Catalog::reference();
        let mut spawner = ObstacleSpawner::new(3, 0);
        let d = Difficulty {
            scroll_speed: 12,
            interval_base_ms: u32::MAX,
            interval_jitter_ms: 1_000,
        };
        assert!(spawner.maybe_spawn(1.0, &d, &catalog, SPAWN_X, GROUND_LINE).is_some());
        assert_eq!(spawner.interval_ms(), u32::MAX);
    }

    #[test]
    fn test_unknown_variant_leaves_schedule_alone() {
        let catalog = Catalog::reference();
        let mut spawner = ObstacleSpawner::new(11, 0);
        let d = initial();
        spawner.maybe_spawn(1.0, &d, &catalog, SPAWN_X, GROUND_LINE);
        spawner.maybe_spawn(10_000.0, &d, &catalog, SPAWN_X, GROUND_LINE);
        let previous = spawner.previous().expect("spawned twice");
        assert_ne!(previous, VariantId(0));

        // Smaller catalog than the one the previous building came from
        let tiny = Catalog::new(vec![ObstacleVariant::new("shed", 40.0, 40.0, "shed.png")])
            .expect("valid");
        let interval = spawner.interval_ms();
        let last = spawner.last_spawn_ms();
        assert!(spawner.maybe_spawn(50_000.0, &d, &tiny, SPAWN_X, GROUND_LINE).is_none());
        assert_eq!(spawner.interval_ms(), interval);
        assert_eq!(spawner.last_spawn_ms(), last);
        assert_eq!(spawner.previous(), Some(previous));
    }

    proptest! {
        #[test]
        fn prop_no_consecutive_repeats(seed in any::<u64>(), checks in 2usize..80) {
            let catalog = Catalog::reference();
            let mut spawner = ObstacleSpawner::new(seed, 0);
            let mut now = 0.0;
            let mut last: Option<VariantId> = None;
            for i in 0..checks {
                now += 5_000.0;
                let o = spawner.maybe_spawn(now, &initial(), &catalog, SPAWN_X, GROUND_LINE);
                let o = o.expect("interval always elapsed");
                if i == 0 {
                    prop_assert_eq!(o.variant, catalog.opener());
                }
                prop_assert_ne!(Some(o.variant), last);
                last = Some(o.variant);
            }
        }
    }
}
