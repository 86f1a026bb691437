// render.rs - Encode simulation state for the scene renderer
//
// One flat f32 buffer, rewritten after every tick. Each instance is
// STRIDE floats:
//
//   [x, y, z, opacity, scale, tint]
//
// Sections, in order: water, vapor, precipitation, groundwater, clouds.
// Section sizes equal pool capacities, so offsets never move. Parked
// slots are written at the park position with opacity 0.

use crate::sim::{Clouds, CycleWorld, Groundwater, Origin, Precipitation, Stage, VaporParticles, WaterParticles};

pub const STRIDE: usize = 6;

/// Color selector written into the `tint` lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tint {
    Ocean = 0,
    Runoff = 1,
    River = 2,
    Vapor = 3,
    Transpiration = 4,
    Rain = 5,
    Groundwater = 6,
    Cloud = 7,
    StormCloud = 8,
}

/// Where each pool's instances start, in instances (not floats).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Layout {
    pub water: usize,
    pub vapor: usize,
    pub precipitation: usize,
    pub groundwater: usize,
    pub clouds: usize,
    pub total: usize,
}

impl Layout {
    pub fn of(world: &CycleWorld) -> Self {
        let water = 0;
        let vapor = water + world.water().capacity();
        let precipitation = vapor + world.vapor().capacity();
        let groundwater = precipitation + world.precipitation().capacity();
        let clouds = groundwater + world.groundwater().capacity();
        let total = clouds + world.clouds().len();
        Self { water, vapor, precipitation, groundwater, clouds, total }
    }
}

pub struct Encoder {
    out: Vec<f32>,
    layout: Layout,
}

impl Encoder {
    pub fn new(world: &CycleWorld) -> Self {
        let layout = Layout::of(world);
        Self { out: vec![0.0; layout.total * STRIDE], layout }
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn ptr(&self) -> *const f32 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Instance `i` (absolute) as [x, y, z, opacity, scale, tint].
    pub fn instance(&self, i: usize) -> &[f32] {
        &self.out[i * STRIDE..(i + 1) * STRIDE]
    }

    pub fn encode(&mut self, world: &CycleWorld) {
        let l = self.layout;
        self.encode_water(world.water(), l.water);
        self.encode_vapor(world.vapor(), l.vapor);
        self.encode_precipitation(world.precipitation(), l.precipitation);
        self.encode_groundwater(world.groundwater(), l.groundwater);
        self.encode_clouds(world.clouds(), l.clouds);
    }

    #[inline]
    fn put(&mut self, slot: usize, p: glam::Vec3, opacity: f32, scale: f32, tint: Tint) {
        let o = slot * STRIDE;
        self.out[o..o + STRIDE].copy_from_slice(&[p.x, p.y, p.z, opacity, scale, tint as u8 as f32]);
    }

    fn encode_water(&mut self, water: &WaterParticles, base: usize) {
        for i in 0..water.capacity() {
            let s = water.shimmer[i];
            let shimmer = (0.85 + s.sin() * 0.2).min(1.0);
            let (opacity, tint) = match water.stage[i] {
                Stage::Ocean => (shimmer, Tint::Ocean),
                Stage::Runoff => (shimmer, Tint::Runoff),
                Stage::FlowPath => (shimmer, Tint::River),
                Stage::Evaporated => (0.0, Tint::Ocean),
            };
            self.put(base + i, water.pos[i], opacity, 1.0, tint);
        }
    }

    fn encode_vapor(&mut self, vapor: &VaporParticles, base: usize) {
        for i in 0..vapor.capacity() {
            let tint = match vapor.origin[i] {
                Origin::Evaporation => Tint::Vapor,
                Origin::Transpiration => Tint::Transpiration,
            };
            if !vapor.is_active(i) {
                self.put(base + i, vapor.pos[i], 0.0, 1.0, tint);
                continue;
            }
            let pulse = vapor.pulse[i];
            let y = vapor.pos[i].y;
            // Thins out as it rises
            let opacity = (0.5 - y / 60.0 + pulse.sin() * 0.2).clamp(0.1, 1.0);
            let scale = 1.0 + (pulse * 0.7).sin() * 0.3;
            self.put(base + i, vapor.pos[i], opacity, scale, tint);
        }
    }

    fn encode_precipitation(&mut self, rain: &Precipitation, base: usize) {
        for i in 0..rain.capacity() {
            let p = rain.pos[i];
            let opacity = if rain.is_active(i) { 0.8 + (p.y * 0.5).sin() * 0.2 } else { 0.0 };
            self.put(base + i, p, opacity, 1.0, Tint::Rain);
        }
    }

    fn encode_groundwater(&mut self, ground: &Groundwater, base: usize) {
        for i in 0..ground.capacity() {
            let opacity = if ground.is_active(i) { 0.7 } else { 0.0 };
            self.put(base + i, ground.pos[i], opacity, 1.0, Tint::Groundwater);
        }
    }

    fn encode_clouds(&mut self, clouds: &Clouds, base: usize) {
        for c in 0..clouds.len() {
            let tint = if clouds.brightness(c) < 1.0 { Tint::StormCloud } else { Tint::Cloud };
            // Heavier clouds sag a little larger
            let scale = 0.9 + clouds.water[c] / clouds.max_water().max(f32::EPSILON) * 0.2;
            self.put(base + c, clouds.pos[c], clouds.opacity(c), scale, tint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Params;
    use crate::scene::PARK_Y;
    use crate::world::Environment;

    #[test]
    fn layout_covers_every_pool() {
        let world = CycleWorld::seeded(Params::default(), Environment::default(), 1);
        let enc = Encoder::new(&world);
        let l = enc.layout();
        assert_eq!(l.vapor, 120);
        assert_eq!(l.precipitation, 200);
        assert_eq!(l.groundwater, 260);
        assert_eq!(l.clouds, 300);
        assert_eq!(l.total, 315);
        assert_eq!(enc.len(), 315 * STRIDE);
    }

    #[test]
    fn parked_vapor_is_invisible() {
        let world = CycleWorld::seeded(Params::default(), Environment::default(), 1);
        let mut enc = Encoder::new(&world);
        enc.encode(&world);
        let v = enc.instance(enc.layout().vapor);
        assert_eq!(v[1], PARK_Y);
        assert_eq!(v[3], 0.0);
    }

    #[test]
    fn wet_clouds_render_grey() {
        let mut world = CycleWorld::seeded(Params::default(), Environment::default(), 1);
        world.clouds_mut().water[0] = 1.5;
        let mut enc = Encoder::new(&world);
        enc.encode(&world);
        let c = enc.instance(enc.layout().clouds);
        assert_eq!(c[5], Tint::StormCloud as u8 as f32);
        assert!((c[3] - 0.95).abs() < 1e-6);
    }
}
