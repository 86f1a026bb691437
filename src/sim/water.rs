// water.rs - Surface water
//
// Every slot is always allocated. A slot is Ocean, Runoff, FlowPath, or
// Evaporated; Evaporated slots are the free list that precipitation
// landings and groundwater springs draw from.

use glam::Vec3;

use super::{Chance, Jitter, SlotPool};
use crate::config::Params;
use crate::world::{Environment, Regions};

// Motion constants
const BOB_AMPLITUDE: f32 = 0.08;
const BOB_TIME_FREQ: f32 = 0.067;    // per tick
const BOB_SPACE_FREQ: f32 = 0.3;
const OCEAN_DRIFT: f32 = 0.01;
const RUNOFF_SPEED: f32 = 0.12;
const RIVER_STEP_MIN: f32 = 0.002;
const RIVER_STEP_MAX: f32 = 0.006;
const RIVER_LANE: f32 = 1.5;
const SHIMMER_STEP: f32 = 0.1;
const LANDING_SCATTER: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Stage {
    /// Resting in the ocean, bobbing.
    Ocean = 0,
    /// Crossing land toward the river.
    Runoff = 1,
    /// Carried along the river by progress.
    FlowPath = 2,
    /// Parked; its water is currently vapor, cloud, rain or groundwater.
    Evaporated = 3,
}

pub struct WaterParticles {
    pub pos: Vec<Vec3>,
    pub stage: Vec<Stage>,

    // River progress in [0, 1], meaningful while FlowPath
    pub progress: Vec<f32>,
    // Lateral offset from the river centerline
    pub lane: Vec<f32>,

    pub age: Vec<u32>,
    pub max_age: Vec<u32>,

    // Decorative
    pub shimmer: Vec<f32>,

    parked: SlotPool,
}

impl WaterParticles {
    /// All slots start as Ocean, scattered over the ocean.
    pub fn new(params: &Params, regions: &Regions, chance: &mut Chance, jitter: &mut Jitter) -> Self {
        let n = params.water_capacity;
        let mut water = Self {
            pos: vec![Vec3::ZERO; n],
            stage: vec![Stage::Ocean; n],
            progress: vec![0.0; n],
            lane: vec![0.0; n],
            age: vec![0; n],
            max_age: vec![0; n],
            shimmer: vec![0.0; n],
            parked: SlotPool::occupied(n),
        };
        for i in 0..n {
            water.pos[i] = ocean_point(regions, chance);
            water.max_age[i] = chance.range(
                params.evaporated_cooldown_min as f32,
                params.evaporated_cooldown_max as f32,
            ) as u32;
            water.shimmer[i] = jitter.phase();
        }
        water
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.pos.len()
    }

    /// Slots not parked as Evaporated.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.parked.active_count()
    }

    #[inline]
    pub fn parked_count(&self) -> usize {
        self.parked.free_count()
    }

    pub fn count(&self, stage: Stage) -> usize {
        self.stage.iter().filter(|&&s| s == stage).count()
    }

    /// Advance every slot by its stage rule.
    pub fn update(&mut self, env: &Environment, tick: u64, chance: &mut Chance, jitter: &mut Jitter) {
        let regions = env.regions();
        let time = tick as f32 * BOB_TIME_FREQ;

        for i in 0..self.capacity() {
            self.age[i] = self.age[i].saturating_add(1);
            self.shimmer[i] += SHIMMER_STEP;

            match self.stage[i] {
                Stage::Ocean => self.bob(i, regions, time),
                Stage::Runoff => self.run_off(i, env, jitter),
                Stage::FlowPath => self.follow_river(i, env, chance),
                Stage::Evaporated => {
                    if self.age[i] > self.max_age[i] {
                        // Cool-down over: the slot returns to the ocean on its own.
                        self.parked.claim_at(i);
                        self.enter_ocean(i, ocean_point(regions, chance), regions);
                    }
                }
            }
        }
    }

    fn bob(&mut self, i: usize, regions: &Regions, time: f32) {
        let mut p = self.pos[i];
        let s = self.shimmer[i];
        p.x += (s * 0.3).sin() * OCEAN_DRIFT;
        p.z += (s * 0.23).cos() * OCEAN_DRIFT;
        p.y = regions.sea_level + (time + p.x * BOB_SPACE_FREQ).sin() * BOB_AMPLITUDE;
        self.pos[i] = regions.clamp_to_ocean(p);
    }

    fn run_off(&mut self, i: usize, env: &Environment, jitter: &mut Jitter) {
        let path = env.flow_path();
        let x = self.pos[i].x;

        if path.spans(x) {
            self.stage[i] = Stage::FlowPath;
            self.progress[i] = path.progress_at_x(x);
            self.lane[i] = jitter.spread(RIVER_LANE);
            return;
        }
        if path.past_exit(x) {
            let regions = env.regions();
            self.enter_ocean(i, self.pos[i], regions);
            return;
        }
        self.pos[i].x += RUNOFF_SPEED * path.toward_entry(x);
    }

    fn follow_river(&mut self, i: usize, env: &Environment, chance: &mut Chance) {
        let progress = self.progress[i] + chance.range(RIVER_STEP_MIN, RIVER_STEP_MAX);
        if progress >= 1.0 {
            let regions = env.regions();
            self.enter_ocean(i, ocean_point(regions, chance), regions);
            return;
        }
        self.progress[i] = progress;
        self.pos[i] = env.flow_path().point_at(progress) + Vec3::new(0.0, 0.0, self.lane[i]);
    }

    fn enter_ocean(&mut self, i: usize, at: Vec3, regions: &Regions) {
        let mut p = regions.clamp_to_ocean(at);
        p.y = regions.sea_level;
        self.pos[i] = p;
        self.stage[i] = Stage::Ocean;
        self.progress[i] = 0.0;
        self.age[i] = 0;
    }

    /// Park slot `i` as Evaporated. False if it already was.
    pub fn park(&mut self, i: usize) -> bool {
        if !self.parked.release(i) { return false; }
        self.stage[i] = Stage::Evaporated;
        self.age[i] = 0;
        true
    }

    /// Bring a parked slot back as Ocean or Runoff near `at`.
    ///
    /// `None` when every slot is busy; the caller's water is lost.
    pub fn emerge(&mut self, stage: Stage, at: Vec3, regions: &Regions, chance: &mut Chance) -> Option<usize> {
        let i = self.parked.claim()?;
        let scattered = at + Vec3::new(chance.spread(LANDING_SCATTER), 0.0, chance.spread(LANDING_SCATTER));

        match stage {
            Stage::Runoff => {
                self.pos[i] = Vec3::new(scattered.x, regions.sea_level, scattered.z);
                self.stage[i] = Stage::Runoff;
                self.progress[i] = 0.0;
                self.age[i] = 0;
            }
            // Anything else lands as ocean water.
            _ => self.enter_ocean(i, scattered, regions),
        }
        Some(i)
    }

    /// Park Ocean slots until at least `target` slots are parked.
    /// Runoff and river water are left alone.
    pub fn keep_parked(&mut self, target: usize) {
        let target = target.min(self.capacity());
        for i in 0..self.capacity() {
            if self.parked.free_count() >= target { break; }
            if self.stage[i] == Stage::Ocean {
                self.park(i);
            }
        }
    }

    /// Every slot back to Ocean at a fresh position.
    pub fn reset(&mut self, regions: &Regions, chance: &mut Chance) {
        self.parked.claim_all();
        for i in 0..self.capacity() {
            self.enter_ocean(i, ocean_point(regions, chance), regions);
        }
    }
}

/// Random point on the ocean surface.
pub(crate) fn ocean_point(regions: &Regions, chance: &mut Chance) -> Vec3 {
    Vec3::new(
        chance.range(regions.ocean_x, regions.ocean_far_x),
        regions.sea_level,
        chance.range(-regions.ocean_half_z, regions.ocean_half_z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(capacity: usize) -> (WaterParticles, Environment, Chance, Jitter) {
        let params = Params { water_capacity: capacity, ..Params::default() };
        let env = Environment::default();
        let mut chance = Chance::new(1);
        let mut jitter = Jitter::new(1);
        let water = WaterParticles::new(&params, env.regions(), &mut chance, &mut jitter);
        (water, env, chance, jitter)
    }

    #[test]
    fn starts_all_ocean_inside_bounds() {
        let (water, env, _, _) = setup(50);
        assert_eq!(water.count(Stage::Ocean), 50);
        assert_eq!(water.parked_count(), 0);
        assert!(water.pos.iter().all(|&p| env.regions().contains_ocean(p)));
    }

    #[test]
    fn emerge_fails_when_nothing_parked() {
        let (mut water, env, mut chance, _) = setup(2);
        assert!(water.emerge(Stage::Runoff, Vec3::ZERO, env.regions(), &mut chance).is_none());
        assert!(water.park(1));
        assert_eq!(water.emerge(Stage::Runoff, Vec3::new(-50.0, 0.0, 0.0), env.regions(), &mut chance), Some(1));
        assert_eq!(water.stage[1], Stage::Runoff);
    }

    #[test]
    fn keep_parked_only_takes_ocean_water() {
        let (mut water, env, mut chance, _) = setup(4);
        water.park(0);
        water.emerge(Stage::Runoff, Vec3::new(-50.0, 0.0, 0.0), env.regions(), &mut chance);
        assert_eq!(water.stage[0], Stage::Runoff);

        water.keep_parked(2);
        assert_eq!(water.parked_count(), 2);
        assert_eq!(water.stage[0], Stage::Runoff);
        assert_eq!(water.count(Stage::Evaporated), 2);

        // Already enough parked
        water.keep_parked(1);
        assert_eq!(water.parked_count(), 2);

        water.keep_parked(10);
        assert_eq!(water.parked_count(), 3);
        assert_eq!(water.stage[0], Stage::Runoff);
    }

    #[test]
    fn runoff_on_river_span_joins_river() {
        let (mut water, env, mut chance, mut jitter) = setup(1);
        water.park(0);
        water.emerge(Stage::Runoff, Vec3::new(-30.0, 0.0, 0.0), env.regions(), &mut chance);
        water.update(&env, 0, &mut chance, &mut jitter);
        assert_eq!(water.stage[0], Stage::FlowPath);
        assert!(water.progress[0] > 0.0 && water.progress[0] < 1.0);
    }

    #[test]
    fn runoff_beyond_entry_walks_toward_it() {
        let (mut water, env, mut chance, mut jitter) = setup(1);
        water.park(0);
        water.emerge(Stage::Runoff, Vec3::new(-80.0, 0.0, 0.0), env.regions(), &mut chance);
        let x0 = water.pos[0].x;
        water.update(&env, 0, &mut chance, &mut jitter);
        assert_eq!(water.stage[0], Stage::Runoff);
        assert!((water.pos[0].x - (x0 + RUNOFF_SPEED)).abs() < 1e-5);
    }

    #[test]
    fn river_end_returns_to_ocean() {
        let (mut water, env, mut chance, mut jitter) = setup(1);
        water.stage[0] = Stage::FlowPath;
        water.progress[0] = 0.999;
        water.update(&env, 0, &mut chance, &mut jitter);
        assert_eq!(water.stage[0], Stage::Ocean);
        assert!(env.regions().contains_ocean(water.pos[0]));
    }

    #[test]
    fn evaporated_slot_recycles_after_cooldown() {
        let (mut water, env, mut chance, mut jitter) = setup(1);
        water.park(0);
        water.max_age[0] = 3;
        for t in 0..3 {
            water.update(&env, t, &mut chance, &mut jitter);
            assert_eq!(water.stage[0], Stage::Evaporated);
        }
        water.update(&env, 3, &mut chance, &mut jitter);
        assert_eq!(water.stage[0], Stage::Ocean);
        assert_eq!(water.parked_count(), 0);
    }
}
