// vapor.rs - Rising water vapor
//
// Fed by evaporation (ocean water) and transpiration (trees). Each active
// vapor either condenses into a nearby cloud or expires at the ceiling.

use glam::{Vec2, Vec3};

use super::{Chance, Clouds, Jitter, SlotPool, Stage, WaterParticles};
use crate::config::Params;
use crate::scene::{CANOPY_Y, PARK_Y};
use crate::world::Regions;

// Per-tick probability factors applied to the configured rates
pub const EVAPORATION_SCALE: f32 = 0.035;
pub const TRANSPIRATION_SCALE: f32 = 0.025;
pub const CONDENSATION_SCALE: f32 = 0.04;

const EVAPORATION_LIFT: f32 = 0.5;
const CANOPY_SPREAD: f32 = 8.0;
const CANOPY_DEPTH: f32 = 4.0;
const SWAY_STEP: f32 = 0.05;
const PULSE_STEP: f32 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Origin {
    Evaporation = 0,
    Transpiration = 1,
}

pub struct VaporParticles {
    pub pos: Vec<Vec3>,
    pub vel: Vec<Vec3>,
    pub origin: Vec<Origin>,
    pub age: Vec<u32>,

    // Decorative
    pub sway: Vec<f32>,
    pub pulse: Vec<f32>,

    max_age: u32,
    pool: SlotPool,
}

impl VaporParticles {
    pub fn new(params: &Params, jitter: &mut Jitter) -> Self {
        let n = params.vapor_capacity;
        Self {
            pos: vec![parked(); n],
            vel: vec![Vec3::ZERO; n],
            origin: vec![Origin::Evaporation; n],
            age: vec![0; n],
            sway: (0..n).map(|_| jitter.phase()).collect(),
            pulse: (0..n).map(|_| jitter.phase()).collect(),
            max_age: params.vapor_max_age,
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

    /// Claim a slot and launch vapor from `at`. `None` if saturated.
    pub fn spawn(&mut self, at: Vec3, vel: Vec3, origin: Origin) -> Option<usize> {
        let Some(i) = self.pool.claim() else {
            log::trace!("vapor pool saturated, {origin:?} dropped");
            return None;
        };
        self.pos[i] = at;
        self.vel[i] = vel;
        self.origin[i] = origin;
        self.age[i] = 0;
        Some(i)
    }

    /// Ocean water turns to vapor. The source slot parks as Evaporated
    /// only if a vapor slot was free.
    pub fn evaporate(&mut self, water: &mut WaterParticles, probability: f32, chance: &mut Chance) {
        for i in 0..water.capacity() {
            if water.stage[i] != Stage::Ocean || !chance.roll(probability) { continue; }
            if self.pool.is_exhausted() { return; }

            let at = water.pos[i] + Vec3::Y * EVAPORATION_LIFT;
            let vel = Vec3::new(
                chance.spread(0.04),
                chance.range(0.15, 0.25),
                chance.spread(0.04),
            );
            if self.spawn(at, vel, Origin::Evaporation).is_some() {
                water.park(i);
            }
        }
    }

    /// Trees release vapor without consuming any water slot.
    pub fn transpire(&mut self, trees: &[Vec2], probability: f32, chance: &mut Chance) {
        for tree in trees {
            if !chance.roll(probability) { continue; }

            let at = Vec3::new(
                tree.x + chance.spread(CANOPY_SPREAD),
                CANOPY_Y + chance.range(0.0, CANOPY_DEPTH),
                tree.y + chance.spread(CANOPY_SPREAD),
            );
            let vel = Vec3::new(
                chance.spread(0.05),
                chance.range(0.1, 0.16),
                chance.spread(0.05),
            );
            if self.spawn(at, vel, Origin::Transpiration).is_none() { return; }
        }
    }

    /// Rise, sway, and condense or expire.
    pub fn update(
        &mut self,
        clouds: &mut Clouds,
        regions: &Regions,
        params: &Params,
        condensation: Option<f32>,
        chance: &mut Chance,
    ) {
        for i in 0..self.capacity() {
            if self.pool.is_free(i) { continue; }

            self.age[i] += 1;
            self.sway[i] += SWAY_STEP;
            self.pulse[i] += PULSE_STEP;

            let mut p = self.pos[i] + self.vel[i];
            p.x += (self.sway[i] + p.y * 0.1).sin() * 0.015;
            p.z += (self.sway[i] * 0.8 + p.y * 0.08).cos() * 0.012;
            self.pos[i] = p;

            if let Some(probability) = condensation {
                if p.y > params.condensation_altitude && chance.roll(probability) {
                    let target = clouds.nearest_for_condensation(p, regions, params.condensation_radius);
                    if let Some(c) = target {
                        clouds.add_water(c, params.condensation_increment);
                        self.park(i);
                        continue;
                    }
                }
            }

            if p.y > params.vapor_ceiling || self.age[i] > self.max_age {
                self.park(i);
            }
        }
    }

    fn park(&mut self, i: usize) {
        self.pool.release(i);
        self.pos[i] = parked();
        self.vel[i] = Vec3::ZERO;
        self.age[i] = 0;
    }

    pub fn clear(&mut self) {
        for i in 0..self.capacity() {
            self.pos[i] = parked();
            self.vel[i] = Vec3::ZERO;
            self.age[i] = 0;
        }
        self.pool.release_all();
    }
}

#[inline]
fn parked() -> Vec3 {
    Vec3::new(0.0, PARK_Y, 0.0)
}
