// groundwater.rs - Subsurface water
//
// Seeps sideways under the landscape, pulled toward the coastal spring.
// Re-emerges as ocean water at the spring, by chance on the way, or when
// it has been underground too long.

use glam::Vec3;

use super::{Chance, SlotPool, Stage, WaterParticles};
use crate::config::Params;
use crate::scene::PARK_Y;
use crate::world::Regions;

const PULL: f32 = 0.0005;
const MAX_DRIFT: f32 = 0.015;
const UNDULATION: f32 = 0.005;
const UNDULATION_TIME_FREQ: f32 = 0.0167;   // per tick
const SPRING_OUTFLOW: f32 = 8.0;
const MAX_DEPTH: f32 = 10.0;

pub struct Groundwater {
    pub pos: Vec<Vec3>,
    pub vel_x: Vec<f32>,
    pub depth: Vec<f32>,   // decorative layer depth
    pub age: Vec<u32>,

    pool: SlotPool,
}

impl Groundwater {
    pub fn new(params: &Params) -> Self {
        let n = params.groundwater_capacity;
        Self {
            pos: vec![parked(); n],
            vel_x: vec![0.0; n],
            depth: vec![0.0; n],
            age: vec![0; n],
            pool: SlotPool::vacant(n),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.pos.len()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    #[inline]
    pub fn is_active(&self, i: usize) -> bool {
        !self.pool.is_free(i)
    }

    pub fn spawn(&mut self, at: Vec3, vel_x: f32, chance: &mut Chance) -> Option<usize> {
        let Some(i) = self.pool.claim() else {
            log::trace!("groundwater pool saturated, seepage lost");
            return None;
        };
        self.pos[i] = at;
        self.vel_x[i] = vel_x;
        self.depth[i] = chance.range(0.0, MAX_DEPTH);
        self.age[i] = 0;
        Some(i)
    }

    /// Seep toward the spring; surface as ocean water on arrival.
    pub fn update(
        &mut self,
        water: &mut WaterParticles,
        regions: &Regions,
        params: &Params,
        tick: u64,
        chance: &mut Chance,
    ) {
        let time = tick as f32 * UNDULATION_TIME_FREQ;
        let spring = regions.spring_x;

        for i in 0..self.capacity() {
            if self.pool.is_free(i) { continue; }

            self.age[i] += 1;

            let before = self.pos[i].x;
            let x = before + self.vel_x[i];
            self.pos[i].x = x;
            self.pos[i].y += (time + x * 0.1).sin() * UNDULATION;

            // Soft pull toward the spring, braking once past it
            self.vel_x[i] = if x < spring {
                (self.vel_x[i] + PULL).min(MAX_DRIFT)
            } else {
                (self.vel_x[i] - PULL).max(-MAX_DRIFT)
            };

            let crossed = (before < spring) != (x < spring);
            let surfaced = crossed
                || chance.roll(params.groundwater_arrival_chance)
                || self.age[i] > params.groundwater_max_age;

            if surfaced {
                let z = self.pos[i].z;
                self.park(i);
                let outlet = Vec3::new(spring + chance.range(0.0, SPRING_OUTFLOW), regions.sea_level, z);
                if water.emerge(Stage::Ocean, outlet, regions, chance).is_none() {
                    log::trace!("spring outflow lost, no parked water slot");
                }
            }
        }
    }

    fn park(&mut self, i: usize) {
        self.pool.release(i);
        self.pos[i] = parked();
        self.vel_x[i] = 0.0;
        self.age[i] = 0;
    }

    pub fn clear(&mut self) {
        for i in 0..self.capacity() {
            self.pos[i] = parked();
            self.vel_x[i] = 0.0;
            self.age[i] = 0;
        }
        self.pool.release_all();
    }
}

#[inline]
fn parked() -> Vec3 {
    Vec3::new(0.0, PARK_Y, 0.0)
}
