// sim/ - Water cycle stage engine
//
// Five fixed-capacity populations connected by probabilistic hand-offs:
//
//   ocean water -> vapor -> cloud water -> rain -> runoff / ocean / groundwater
//        ^                                            |
//        +--------------------------------------------+
//
// Pools are Structure-of-Arrays, allocated once. Nothing is created or
// destroyed while running; slots are claimed and parked.

mod clock;
mod cloud;
mod focus;
mod groundwater;
mod pool;
mod rain;
mod rng;
mod vapor;
mod water;

pub use clock::{FrameClock, MAX_CATCH_UP, STEP_MS};
pub use cloud::{CloudStage, Clouds, RainPolicy};
pub use focus::{Focus, Infiltration, Schedule};
pub use groundwater::Groundwater;
pub use pool::SlotPool;
pub use rain::{Landing, LandingTally, Precipitation};
pub use rng::{Chance, Jitter};
pub use vapor::{CONDENSATION_SCALE, EVAPORATION_SCALE, Origin, TRANSPIRATION_SCALE, VaporParticles};
pub use water::{Stage, WaterParticles};

use crate::config::Params;
use crate::error::ConfigError;
use crate::world::Environment;

// Share of water slots held in the sky under rain-driven foci
const SKY_SHARE: f32 = 0.25;

/// Head count per stage, for labels and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Census {
    pub ocean: usize,
    pub runoff: usize,
    pub flow_path: usize,
    pub evaporated: usize,
    pub vapor: usize,
    pub precipitation: usize,
    pub groundwater: usize,
}

/// The water cycle simulation world
pub struct CycleWorld {
    params: Params,
    env: Environment,

    // Entities
    water: WaterParticles,
    vapor: VaporParticles,
    clouds: Clouds,
    precipitation: Precipitation,
    groundwater: Groundwater,

    // Transition RNG (seeded) and cosmetic RNG (not)
    chance: Chance,
    jitter: Jitter,

    focus: Focus,
    running: bool,
    ticks: u64,
    last_landings: LandingTally,
}

impl CycleWorld {
    /// Validate `params` and build the world on its environment.
    pub fn from_params(params: Params) -> Result<Self, ConfigError> {
        params.validate()?;
        let env = params.environment.build()?;
        Ok(Self::with_jitter(params, env, Jitter::from_entropy()))
    }

    /// Build on an explicit environment. `params` is assumed valid.
    pub fn new(params: Params, env: Environment) -> Self {
        Self::with_jitter(params, env, Jitter::from_entropy())
    }

    /// Fully reproducible world: cosmetic jitter seeded too.
    pub fn seeded(params: Params, env: Environment, jitter_seed: u32) -> Self {
        Self::with_jitter(params, env, Jitter::new(jitter_seed))
    }

    fn with_jitter(params: Params, env: Environment, mut jitter: Jitter) -> Self {
        let mut chance = Chance::new(params.seed);
        let water = WaterParticles::new(&params, env.regions(), &mut chance, &mut jitter);
        let vapor = VaporParticles::new(&params, &mut jitter);
        let clouds = Clouds::new(&params, env.regions(), &mut chance, &mut jitter);
        let precipitation = Precipitation::new(&params);
        let groundwater = Groundwater::new(&params);

        log::debug!(
            "cycle world: {} water, {} vapor, {} clouds, {} rain, {} groundwater (seed {:#x})",
            water.capacity(),
            vapor.capacity(),
            clouds.len(),
            precipitation.capacity(),
            groundwater.capacity(),
            params.seed,
        );

        Self {
            params,
            env,
            water,
            vapor,
            clouds,
            precipitation,
            groundwater,
            chance,
            jitter,
            focus: Focus::All,
            running: true,
            ticks: 0,
            last_landings: LandingTally::default(),
        }
    }

    /// One frame. Skips the stage engine while paused.
    pub fn tick(&mut self) {
        if self.running {
            self.step();
        }
    }

    /// One simulated tick regardless of the pause flag, in fixed order:
    /// water, evaporation, transpiration, vapor, clouds, rain, groundwater.
    pub fn step(&mut self) {
        let s = self.focus.schedule();
        let p = &self.params;
        let regions = *self.env.regions();

        if s.water {
            self.water.update(&self.env, self.ticks, &mut self.chance, &mut self.jitter);
        }
        if s.evaporation {
            let probability = p.evaporation_rate * EVAPORATION_SCALE * s.evaporation_boost;
            self.vapor.evaporate(&mut self.water, probability, &mut self.chance);
        }
        if s.transpiration {
            let probability = p.transpiration_rate * TRANSPIRATION_SCALE * s.evaporation_boost;
            self.vapor.transpire(self.env.trees(), probability, &mut self.chance);
        }
        if s.vapor {
            let condensation = s
                .condensation
                .then(|| p.condensation_rate * CONDENSATION_SCALE * s.condensation_boost);
            self.vapor.update(&mut self.clouds, &regions, p, condensation, &mut self.chance);
        }
        if s.replenish {
            feed_sky(&mut self.water, &mut self.clouds);
        }
        if s.clouds {
            let rain = s.rain.then(|| RainPolicy::from_params(p, s.rain_boost));
            self.clouds.update(&mut self.precipitation, &regions, rain, &mut self.chance);
        }
        self.last_landings = if s.precipitation {
            self.precipitation.update(
                &mut self.water,
                &mut self.groundwater,
                &regions,
                s.surface_chance(p.surface_landing_chance),
                &mut self.chance,
            )
        } else {
            LandingTally::default()
        };
        if s.groundwater {
            self.groundwater.update(&mut self.water, &regions, p, self.ticks, &mut self.chance);
        }

        self.ticks += 1;
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Switch focus. Any actual change clears in-flight vapor, rain and
    /// groundwater, returns all water to the ocean, and refills clouds.
    pub fn set_focus(&mut self, focus: Focus) {
        if focus == self.focus { return; }
        log::debug!("focus {} -> {}", self.focus, focus);
        self.focus = focus;
        self.reset_populations();
    }

    #[inline]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    fn reset_populations(&mut self) {
        self.vapor.clear();
        self.precipitation.clear();
        self.groundwater.clear();
        self.water.reset(self.env.regions(), &mut self.chance);
        self.clouds.fill(self.focus.cloud_fill() * self.clouds.max_water());
        if self.focus.schedule().replenish {
            feed_sky(&mut self.water, &mut self.clouds);
        }
    }

    pub fn census(&self) -> Census {
        Census {
            ocean: self.water.count(Stage::Ocean),
            runoff: self.water.count(Stage::Runoff),
            flow_path: self.water.count(Stage::FlowPath),
            evaporated: self.water.count(Stage::Evaporated),
            vapor: self.vapor.active_count(),
            precipitation: self.precipitation.active_count(),
            groundwater: self.groundwater.active_count(),
        }
    }

    // Accessors
    #[inline] pub fn ticks(&self) -> u64 { self.ticks }
    #[inline] pub fn params(&self) -> &Params { &self.params }
    #[inline] pub fn environment(&self) -> &Environment { &self.env }
    #[inline] pub fn water(&self) -> &WaterParticles { &self.water }
    #[inline] pub fn vapor(&self) -> &VaporParticles { &self.vapor }
    #[inline] pub fn clouds(&self) -> &Clouds { &self.clouds }
    #[inline] pub fn precipitation(&self) -> &Precipitation { &self.precipitation }
    #[inline] pub fn groundwater(&self) -> &Groundwater { &self.groundwater }
    #[inline] pub fn last_landings(&self) -> LandingTally { self.last_landings }

    // Staging access, for scripted demos and tests
    #[inline] pub fn water_mut(&mut self) -> &mut WaterParticles { &mut self.water }
    #[inline] pub fn vapor_mut(&mut self) -> &mut VaporParticles { &mut self.vapor }
    #[inline] pub fn clouds_mut(&mut self) -> &mut Clouds { &mut self.clouds }
    #[inline] pub fn precipitation_mut(&mut self) -> &mut Precipitation { &mut self.precipitation }
    #[inline] pub fn groundwater_mut(&mut self) -> &mut Groundwater { &mut self.groundwater }
    #[inline] pub fn chance_mut(&mut self) -> &mut Chance { &mut self.chance }
}

/// Hold clouds full and keep a share of the ocean parked as their water,
/// so landings always find a free slot.
fn feed_sky(water: &mut WaterParticles, clouds: &mut Clouds) {
    let reserve = (water.capacity() as f32 * SKY_SHARE) as usize;
    water.keep_parked(reserve);
    clouds.top_up(clouds.max_water());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> CycleWorld {
        CycleWorld::seeded(Params::default(), Environment::default(), 1)
    }

    #[test]
    fn paused_tick_changes_nothing() {
        let mut w = world();
        w.set_running(false);
        let before = w.water().pos.clone();
        w.tick();
        assert_eq!(w.ticks(), 0);
        assert_eq!(w.water().pos, before);
    }

    #[test]
    fn same_focus_does_not_reset() {
        let mut w = world();
        for _ in 0..200 {
            w.step();
        }
        let before = w.census();
        w.set_focus(Focus::All);
        assert_eq!(w.census(), before);
    }

    #[test]
    fn evaporation_focus_never_rains() {
        let mut w = world();
        w.set_focus(Focus::Evaporation);
        for _ in 0..300 {
            w.step();
        }
        let c = w.census();
        assert_eq!(c.precipitation, 0);
        assert_eq!(c.groundwater, 0);
        assert!(w.clouds().water.iter().all(|&x| x == 0.0));
    }
}
