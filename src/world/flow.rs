// flow.rs - River flow path
//
// A Catmull-Rom curve through the river control points, parametrized by
// progress in [0, 1]. Inputs outside that range are clamped, never
// rejected: a bad progress value just pins the drop to an end of the river.

use glam::Vec3;

use crate::error::ConfigError;
use crate::scene;

const BISECT_STEPS: u32 = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct FlowPath {
    points: Vec<Vec3>,
}

impl FlowPath {
    pub fn new(points: Vec<Vec3>) -> Result<Self, ConfigError> {
        if points.len() < 2 {
            return Err(ConfigError::FlowPathTooShort { points: points.len() });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(ConfigError::FlowPathNotFinite { index });
        }
        Ok(Self { points })
    }

    /// The river from the scene data.
    pub fn canonical() -> Self {
        Self { points: scene::FLOW_PATH.iter().map(|&p| Vec3::from(p)).collect() }
    }

    /// x where runoff joins the river
    #[inline]
    pub fn entry_x(&self) -> f32 {
        self.points[0].x
    }

    /// x where the river meets the ocean
    #[inline]
    pub fn exit_x(&self) -> f32 {
        self.points[self.points.len() - 1].x
    }

    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        let (lo, hi) = self.x_range();
        x >= lo && x <= hi
    }

    /// Beyond the river mouth, on the far side from the entry.
    #[inline]
    pub fn past_exit(&self, x: f32) -> bool {
        if self.entry_x() <= self.exit_x() { x > self.exit_x() } else { x < self.exit_x() }
    }

    /// Sign of the step that moves `x` toward the entry.
    #[inline]
    pub fn toward_entry(&self, x: f32) -> f32 {
        if x < self.entry_x() { 1.0 } else { -1.0 }
    }

    fn x_range(&self) -> (f32, f32) {
        let (a, b) = (self.entry_x(), self.exit_x());
        if a <= b { (a, b) } else { (b, a) }
    }

    /// Point on the curve at progress `t`. NaN reads as 0.
    pub fn point_at(&self, t: f32) -> Vec3 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let last = self.points.len() - 1;

        let f = t * last as f32;
        let i = (f as usize).min(last - 1);
        let u = f - i as f32;

        let p0 = self.points[i.saturating_sub(1)];
        let p1 = self.points[i];
        let p2 = self.points[i + 1];
        let p3 = self.points[(i + 2).min(last)];
        catmull_rom(p0, p1, p2, p3, u)
    }

    /// Progress whose curve point sits at `x`. Assumes x grows
    /// monotonically along the path; clamps outside the span.
    pub fn progress_at_x(&self, x: f32) -> f32 {
        let forward = self.entry_x() <= self.exit_x();
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        for _ in 0..BISECT_STEPS {
            let mid = 0.5 * (lo + hi);
            let behind = if forward { self.point_at(mid).x < x } else { self.point_at(mid).x > x };
            if behind { lo = mid; } else { hi = mid; }
        }
        (0.5 * (lo + hi)).clamp(0.0, 1.0)
    }

    /// `n` evenly spaced samples, for drawing the river.
    pub fn sample(&self, n: usize) -> Vec<Vec3> {
        match n {
            0 => Vec::new(),
            1 => vec![self.point_at(0.0)],
            _ => (0..n).map(|i| self.point_at(i as f32 / (n - 1) as f32)).collect(),
        }
    }
}

#[inline]
fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, u: f32) -> Vec3 {
    let u2 = u * u;
    let u3 = u2 * u;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * u
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * u2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * u3)
}
