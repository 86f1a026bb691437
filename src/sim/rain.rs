// rain.rs - Falling precipitation
//
// Drops fall until they reach the ground, then resolve into exactly one
// fate: runoff (inland), ocean water, or groundwater. The drop slot is
// freed either way; if the destination pool is full the water is lost.

use glam::Vec3;

use super::{Chance, Groundwater, SlotPool, Stage, WaterParticles};
use crate::config::Params;
use crate::scene::PARK_Y;
use crate::world::Regions;

// Groundwater starts this far below the landing point
const SEEP_MIN: f32 = 4.0;
const SEEP_MAX: f32 = 8.0;
const SEEP_DRIFT: f32 = 0.02;

/// What became of a landed drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landing {
    Runoff,
    Ocean,
    Groundwater,
    /// No free slot downstream.
    Dropped,
}

/// Landing counts for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LandingTally {
    pub runoff: u32,
    pub ocean: u32,
    pub groundwater: u32,
    pub dropped: u32,
}

impl LandingTally {
    fn record(&mut self, landing: Landing) {
        match landing {
            Landing::Runoff => self.runoff += 1,
            Landing::Ocean => self.ocean += 1,
            Landing::Groundwater => self.groundwater += 1,
            Landing::Dropped => self.dropped += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.runoff + self.ocean + self.groundwater + self.dropped
    }
}

pub struct Precipitation {
    pub pos: Vec<Vec3>,
    pub vel: Vec<Vec3>,
    pub age: Vec<u32>,

    pool: SlotPool,
}

impl Precipitation {
    pub fn new(params: &Params) -> Self {
        let n = params.precipitation_capacity;
        Self {
            pos: vec![parked(); n],
            vel: vec![Vec3::ZERO; n],
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

    pub fn spawn(&mut self, at: Vec3, vel: Vec3) -> Option<usize> {
        let Some(i) = self.pool.claim() else {
            log::trace!("precipitation pool saturated, drop lost");
            return None;
        };
        self.pos[i] = at;
        self.vel[i] = vel;
        self.age[i] = 0;
        Some(i)
    }

    /// Fall, and resolve every drop that reached the ground.
    ///
    /// `surface_chance` is the chance a non-inland landing stays on the
    /// surface as ocean water rather than soaking in.
    pub fn update(
        &mut self,
        water: &mut WaterParticles,
        groundwater: &mut Groundwater,
        regions: &Regions,
        surface_chance: f32,
        chance: &mut Chance,
    ) -> LandingTally {
        let mut tally = LandingTally::default();

        for i in 0..self.capacity() {
            if self.pool.is_free(i) { continue; }

            self.age[i] += 1;
            self.pos[i] += self.vel[i];

            if self.pos[i].y <= regions.ground_y {
                let landing = self.land(i, water, groundwater, regions, surface_chance, chance);
                tally.record(landing);
            }
        }
        tally
    }

    fn land(
        &mut self,
        i: usize,
        water: &mut WaterParticles,
        groundwater: &mut Groundwater,
        regions: &Regions,
        surface_chance: f32,
        chance: &mut Chance,
    ) -> Landing {
        let at = Vec3::new(self.pos[i].x, regions.ground_y, self.pos[i].z);
        self.park(i);

        let landing = if regions.is_inland(at.x) {
            water.emerge(Stage::Runoff, at, regions, chance).map(|_| Landing::Runoff)
        } else if chance.roll(surface_chance) {
            water.emerge(Stage::Ocean, at, regions, chance).map(|_| Landing::Ocean)
        } else {
            let below = at - Vec3::Y * chance.range(SEEP_MIN, SEEP_MAX);
            groundwater.spawn(below, chance.spread(SEEP_DRIFT), chance).map(|_| Landing::Groundwater)
        };

        landing.unwrap_or_else(|| {
            log::trace!("drop at x={:.1} lost, no free slot downstream", at.x);
            Landing::Dropped
        })
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Jitter;
    use crate::world::Environment;

    struct Rig {
        rain: Precipitation,
        water: WaterParticles,
        ground: Groundwater,
        env: Environment,
        chance: Chance,
    }

    fn rig(params: Params) -> Rig {
        let env = Environment::default();
        let mut chance = Chance::new(11);
        let mut jitter = Jitter::new(11);
        Rig {
            rain: Precipitation::new(&params),
            water: WaterParticles::new(&params, env.regions(), &mut chance, &mut jitter),
            ground: Groundwater::new(&params),
            env,
            chance,
        }
    }

    impl Rig {
        fn drop_at(&mut self, x: f32, surface_chance: f32) -> LandingTally {
            self.rain.spawn(Vec3::new(x, 0.1, 0.0), Vec3::new(0.0, -0.3, 0.0));
            let regions = *self.env.regions();
            self.rain.update(&mut self.water, &mut self.ground, &regions, surface_chance, &mut self.chance)
        }
    }

    #[test]
    fn inland_landing_becomes_runoff() {
        let mut r = rig(Params { water_capacity: 2, ..Params::default() });
        r.water.park(0);

        let tally = r.drop_at(-50.0, 1.0);

        assert_eq!(tally, LandingTally { runoff: 1, ..LandingTally::default() });
        assert_eq!(r.water.stage[0], Stage::Runoff);
        assert_eq!(r.rain.active_count(), 0);
    }

    #[test]
    fn coastal_landing_splits_by_chance() {
        let mut r = rig(Params { water_capacity: 2, ..Params::default() });
        r.water.park(0);
        r.water.park(1);

        assert_eq!(r.drop_at(10.0, 1.0).ocean, 1);
        assert_eq!(r.drop_at(10.0, 0.0).groundwater, 1);
        assert_eq!(r.ground.active_count(), 1);
        assert!(r.env.regions().contains_ocean(r.water.pos[1]));
    }

    #[test]
    fn full_water_pool_drops_the_drop() {
        let mut r = rig(Params { water_capacity: 4, ..Params::default() });
        let before = r.water.active_count();

        let tally = r.drop_at(-50.0, 1.0);

        assert_eq!(tally.dropped, 1);
        assert_eq!(r.water.active_count(), before);
        assert_eq!(r.rain.active_count(), 0);
    }

    #[test]
    fn airborne_drop_keeps_falling() {
        let mut r = rig(Params::default());
        r.rain.spawn(Vec3::new(0.0, 30.0, 0.0), Vec3::new(0.0, -0.3, 0.0));
        let regions = *r.env.regions();
        let tally = r.rain.update(&mut r.water, &mut r.ground, &regions, 0.5, &mut r.chance);
        assert_eq!(tally.total(), 0);
        assert!((r.rain.pos[0].y - 29.7).abs() < 1e-4);
    }
}
