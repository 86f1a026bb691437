//! Water cycle stage engine.
//!
//! A particle simulation of the water cycle for an educational 3D scene:
//! ocean water evaporates, vapor condenses into drifting clouds, clouds
//! rain harder over the mountains, and rain returns to the ocean as
//! runoff along the river, directly, or through groundwater.
//!
//! The JS side owns the meshes, camera and UI. Each frame it calls
//! [`WaterCycle::tick`] (or [`WaterCycle::advance`]) and reads the render
//! buffer behind [`WaterCycle::output_ptr`].
//!
//! Native callers use [`CycleWorld`] directly:
//!
//! ```
//! use water_cycle_engine::{CycleWorld, Environment, Params};
//!
//! let mut world = CycleWorld::seeded(Params::default(), Environment::default(), 1);
//! for _ in 0..600 {
//!     world.tick();
//! }
//! assert!(world.census().vapor <= world.vapor().capacity());
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod scene;
pub mod sim;
pub mod world;

pub use config::{EnvironmentConfig, Params};
pub use error::ConfigError;
pub use render::{Encoder, Layout, STRIDE, Tint};
pub use scene::CameraPreset;
pub use sim::{Census, CycleWorld, Focus, FrameClock, Landing, Stage};
pub use world::{Environment, FlowPath, Regions};

use wasm_bindgen::prelude::*;

/// Browser-facing handle: the world, its render buffer, and a frame clock.
#[wasm_bindgen]
pub struct WaterCycle {
    world: CycleWorld,
    encoder: Encoder,
    clock: FrameClock,
}

impl WaterCycle {
    fn wrap(world: CycleWorld) -> Self {
        let mut encoder = Encoder::new(&world);
        encoder.encode(&world);
        Self { world, encoder, clock: FrameClock::default() }
    }
}

#[wasm_bindgen]
impl WaterCycle {
    /// Canonical landscape and tuning, transition RNG seeded with `seed`.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Self {
        let params = Params { seed: seed as u64, ..Params::default() };
        Self::wrap(CycleWorld::new(params, Environment::default()))
    }

    /// Build from a JSON parameter object; see [`Params`].
    pub fn from_config(json: &str) -> Result<WaterCycle, JsError> {
        let params = Params::from_json(json)?;
        Ok(Self::wrap(CycleWorld::from_params(params)?))
    }

    /// One display frame: one tick (unless paused), then re-encode.
    pub fn tick(&mut self) {
        self.world.tick();
        self.encoder.encode(&self.world);
    }

    /// Fixed-timestep frame: run as many ticks as `dt_ms` covers.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        let steps = if self.world.is_running() { self.clock.advance(dt_ms) } else { 0 };
        for _ in 0..steps {
            self.world.step();
        }
        self.encoder.encode(&self.world);
        steps
    }

    pub fn set_playing(&mut self, playing: bool) {
        if playing && !self.world.is_running() {
            self.clock.reset();
        }
        self.world.set_running(playing);
    }

    pub fn is_playing(&self) -> bool {
        self.world.is_running()
    }

    /// `all`, `evaporation`, `condensation`, `precipitation`,
    /// `collection` or `groundwater`.
    pub fn set_focus(&mut self, name: &str) -> Result<(), JsError> {
        let focus: Focus = name.parse()?;
        self.world.set_focus(focus);
        self.encoder.encode(&self.world);
        Ok(())
    }

    pub fn focus(&self) -> String {
        self.world.focus().to_string()
    }

    /// [eye.x, eye.y, eye.z, target.x, target.y, target.z]
    pub fn camera(view: &str) -> Result<Vec<f32>, JsError> {
        let preset: CameraPreset = view.parse()?;
        let (e, t) = (preset.eye(), preset.target());
        Ok(vec![e.x, e.y, e.z, t.x, t.y, t.z])
    }

    /// Tree anchors as flat [x, z, x, z, ...].
    pub fn trees(&self) -> Vec<f32> {
        self.world.environment().trees().iter().flat_map(|t| [t.x, t.y]).collect()
    }

    /// River centerline as flat [x, y, z, ...], `samples` points.
    pub fn flow_path(&self, samples: usize) -> Vec<f32> {
        self.world
            .environment()
            .flow_path()
            .sample(samples)
            .into_iter()
            .flat_map(|p| [p.x, p.y, p.z])
            .collect()
    }

    pub fn ticks(&self) -> f64 {
        self.world.ticks() as f64
    }

    // Render buffer, see `render`
    pub fn output_ptr(&self) -> *const f32 { self.encoder.ptr() }
    pub fn output_len(&self) -> usize { self.encoder.len() }
    pub fn stride() -> usize { STRIDE }
    pub fn water_offset(&self) -> usize { self.encoder.layout().water }
    pub fn vapor_offset(&self) -> usize { self.encoder.layout().vapor }
    pub fn precipitation_offset(&self) -> usize { self.encoder.layout().precipitation }
    pub fn groundwater_offset(&self) -> usize { self.encoder.layout().groundwater }
    pub fn cloud_offset(&self) -> usize { self.encoder.layout().clouds }
    pub fn instance_count(&self) -> usize { self.encoder.layout().total }
}
