// cloud.rs - Clouds
//
// A fixed set of clouds drifting from the ocean toward the mountains.
// Each holds one water content scalar, kept inside [0, max]: condensation
// adds to it, time and rain take from it. Clouds that leave the far edge
// wrap back to the ocean side, dry.

use glam::Vec3;

use super::{Chance, Jitter, Precipitation};
use crate::config::Params;
use crate::scene::{CLOUD_FAR_X, CLOUD_MAX_Y, CLOUD_MIN_Y, CLOUD_RESET_X};
use crate::world::Regions;

const SPEED_MIN: f32 = 0.08;
const SPEED_MAX: f32 = 0.12;
const DRIFT_STEP: f32 = 0.02;
const BOB_Y: f32 = 0.08;
const BOB_Z: f32 = 0.05;
const START_HALF_Z: f32 = 40.0;

// Raindrop release offsets below the cloud
const DROP_SPREAD_X: f32 = 12.0;
const DROP_SPREAD_Z: f32 = 8.0;
const DROP_BELOW: f32 = 3.0;

/// Where a cloud is along its journey. Derived from position only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CloudStage {
    Forming = 0,
    Traveling = 1,
    Raining = 2,
}

impl CloudStage {
    pub fn at(x: f32, regions: &Regions) -> Self {
        if regions.is_ocean(x) {
            CloudStage::Forming
        } else if regions.is_mountain(x) {
            CloudStage::Raining
        } else {
            CloudStage::Traveling
        }
    }
}

/// How rain is released this tick.
#[derive(Debug, Clone, Copy)]
pub struct RainPolicy {
    pub mountain: f32,
    pub elsewhere: f32,
    pub saturation: f32,
    pub emission: f32,
}

impl RainPolicy {
    pub fn from_params(params: &Params, boost: f32) -> Self {
        Self {
            mountain: params.rain_chance_mountain * boost,
            elsewhere: params.rain_chance_elsewhere * boost,
            saturation: params.cloud_saturation,
            emission: params.rain_emission,
        }
    }
}

pub struct Clouds {
    pub pos: Vec<Vec3>,
    pub water: Vec<f32>,
    pub speed: Vec<f32>,   // x velocity, negative = toward mountains
    pub stage: Vec<CloudStage>,

    // Decorative
    pub drift: Vec<f32>,

    max_water: f32,
    decay: f32,
}

impl Clouds {
    pub fn new(params: &Params, regions: &Regions, chance: &mut Chance, jitter: &mut Jitter) -> Self {
        let n = params.cloud_count;
        let mut clouds = Self {
            pos: Vec::with_capacity(n),
            water: vec![0.0; n],
            speed: Vec::with_capacity(n),
            stage: Vec::with_capacity(n),
            drift: Vec::with_capacity(n),
            max_water: params.cloud_max_water,
            decay: params.cloud_decay,
        };
        for _ in 0..n {
            let x = chance.range(regions.ocean_x, CLOUD_RESET_X);
            clouds.pos.push(Vec3::new(
                x,
                chance.range(CLOUD_MIN_Y, CLOUD_MAX_Y),
                chance.spread(2.0 * START_HALF_Z),
            ));
            clouds.speed.push(-chance.range(SPEED_MIN, SPEED_MAX));
            clouds.stage.push(CloudStage::at(x, regions));
            clouds.drift.push(jitter.phase());
        }
        clouds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pos.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    #[inline]
    pub fn max_water(&self) -> f32 {
        self.max_water
    }

    /// Add condensed water, capped at the maximum.
    pub fn add_water(&mut self, c: usize, amount: f32) {
        self.water[c] = (self.water[c] + amount).clamp(0.0, self.max_water);
    }

    /// Nearest cloud within `radius` of `p`, looking only at clouds over
    /// the ocean when there are any.
    pub fn nearest_for_condensation(&self, p: Vec3, regions: &Regions, radius: f32) -> Option<usize> {
        let any_over_ocean = self.pos.iter().any(|c| regions.is_ocean(c.x));

        self.pos
            .iter()
            .enumerate()
            .filter(|(_, c)| !any_over_ocean || regions.is_ocean(c.x))
            .map(|(i, c)| (i, c.distance(p)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .filter(|&(_, d)| d < radius)
            .map(|(i, _)| i)
    }

    /// Decay, drift, wrap, and release rain. `rain = None` holds it back.
    pub fn update(
        &mut self,
        precipitation: &mut Precipitation,
        regions: &Regions,
        rain: Option<RainPolicy>,
        chance: &mut Chance,
    ) {
        for c in 0..self.len() {
            self.water[c] = (self.water[c] - self.decay).max(0.0);
            self.drift[c] += DRIFT_STEP;

            let d = self.drift[c];
            let p = &mut self.pos[c];
            p.x += self.speed[c];
            p.y += d.sin() * BOB_Y;
            p.z += (d * 0.7).cos() * BOB_Z;

            if p.x < CLOUD_FAR_X {
                p.x = CLOUD_RESET_X;
                self.water[c] = 0.0;
            }
            let at = *p;
            self.stage[c] = CloudStage::at(at.x, regions);

            let Some(policy) = rain else { continue };
            if self.water[c] <= policy.saturation { continue; }

            let probability = if regions.is_mountain(at.x) { policy.mountain } else { policy.elsewhere };
            if !chance.roll(probability) { continue; }

            let drop_at = Vec3::new(
                at.x + chance.spread(DROP_SPREAD_X),
                at.y - DROP_BELOW,
                at.z + chance.spread(DROP_SPREAD_Z),
            );
            let vel = Vec3::new(chance.spread(0.04), -chance.range(0.25, 0.35), 0.0);
            if precipitation.spawn(drop_at, vel).is_some() {
                self.water[c] = (self.water[c] - policy.emission).max(0.0);
            }
        }
    }

    /// Raise every cloud to at least `level`, capped at the maximum.
    pub fn top_up(&mut self, level: f32) {
        let level = level.clamp(0.0, self.max_water);
        for w in &mut self.water {
            *w = w.max(level);
        }
    }

    /// Set every cloud's water content.
    pub fn fill(&mut self, water: f32) {
        let water = water.clamp(0.0, self.max_water);
        self.water.fill(water);
    }

    /// Render opacity: wetter is more opaque.
    #[inline]
    pub fn opacity(&self, c: usize) -> f32 {
        (0.7 + self.water[c] * 0.3).min(0.95)
    }

    /// Render greyness: 1 = white, lower = storm grey.
    #[inline]
    pub fn brightness(&self, c: usize) -> f32 {
        if self.water[c] > 1.0 { 0.6 } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_cloud(at: Vec3, water: f32) -> (Clouds, Regions, Chance) {
        let regions = Regions::default();
        let params = Params { cloud_count: 1, cloud_decay: 0.0, ..Params::default() };
        let mut chance = Chance::new(5);
        let mut jitter = Jitter::new(5);
        let mut clouds = Clouds::new(&params, &regions, &mut chance, &mut jitter);
        clouds.pos[0] = at;
        clouds.water[0] = water;
        (clouds, regions, chance)
    }

    #[test]
    fn water_never_exceeds_max() {
        let (mut clouds, _, _) = one_cloud(Vec3::new(60.0, 45.0, 0.0), 1.9);
        clouds.add_water(0, 0.5);
        assert_eq!(clouds.water[0], clouds.max_water());
    }

    #[test]
    fn wraps_to_ocean_side_dry() {
        let (mut clouds, regions, mut chance) = one_cloud(Vec3::new(CLOUD_FAR_X + 0.01, 45.0, 0.0), 1.5);
        let mut rain = Precipitation::new(&Params::default());
        clouds.update(&mut rain, &regions, None, &mut chance);
        assert_eq!(clouds.pos[0].x, CLOUD_RESET_X);
        assert_eq!(clouds.water[0], 0.0);
        assert_eq!(clouds.stage[0], CloudStage::Forming);
    }

    #[test]
    fn top_up_only_raises() {
        let (mut clouds, _, _) = one_cloud(Vec3::new(60.0, 45.0, 0.0), 1.8);
        clouds.top_up(1.2);
        assert_eq!(clouds.water[0], 1.8);
        clouds.water[0] = 0.1;
        clouds.top_up(5.0);
        assert_eq!(clouds.water[0], clouds.max_water());
    }

    #[test]
    fn mountain_clouds_rain_harder() {
        let policy = RainPolicy { mountain: 1.0, elsewhere: 0.0, saturation: 1.0, emission: 0.15 };

        let (mut clouds, regions, mut chance) = one_cloud(Vec3::new(-60.0, 45.0, 0.0), 1.5);
        let mut rain = Precipitation::new(&Params::default());
        clouds.update(&mut rain, &regions, Some(policy), &mut chance);
        assert_eq!(rain.active_count(), 1);

        let (mut clouds, regions, mut chance) = one_cloud(Vec3::new(0.0, 45.0, 0.0), 1.5);
        let mut rain = Precipitation::new(&Params::default());
        for _ in 0..50 {
            clouds.update(&mut rain, &regions, Some(policy), &mut chance);
        }
        assert_eq!(rain.active_count(), 0);
        assert_eq!(clouds.water[0], 1.5);
    }

    #[test]
    fn dry_cloud_never_rains() {
        let (mut clouds, regions, mut chance) = one_cloud(Vec3::new(-60.0, 45.0, 0.0), 0.5);
        let mut rain = Precipitation::new(&Params::default());
        let policy = RainPolicy { mountain: 1.0, elsewhere: 1.0, saturation: 1.0, emission: 0.15 };
        for _ in 0..10 {
            clouds.update(&mut rain, &regions, Some(policy), &mut chance);
        }
        assert_eq!(rain.active_count(), 0);
    }

    #[test]
    fn prefers_clouds_over_ocean() {
        let (mut clouds, regions, _) = one_cloud(Vec3::ZERO, 0.0);
        clouds.pos = vec![Vec3::new(10.0, 30.0, 0.0), Vec3::new(50.0, 30.0, 0.0)];
        clouds.water = vec![0.0; 2];

        // Closer to the inland cloud, but the ocean cloud is within range.
        let vapor = Vec3::new(25.0, 30.0, 0.0);
        assert_eq!(clouds.nearest_for_condensation(vapor, &regions, 30.0), Some(1));
        assert_eq!(clouds.nearest_for_condensation(vapor, &regions, 20.0), None);
    }

    #[test]
    fn stage_follows_position() {
        let r = Regions::default();
        assert_eq!(CloudStage::at(60.0, &r), CloudStage::Forming);
        assert_eq!(CloudStage::at(0.0, &r), CloudStage::Traveling);
        assert_eq!(CloudStage::at(-60.0, &r), CloudStage::Raining);
    }
}
