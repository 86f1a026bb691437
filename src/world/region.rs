// region.rs - Region boundaries along the x axis
//
// The landscape is a strip: mountains on the left, the ocean on the right.
// Every region test is a half-space test on x.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scene;

// Far beyond any scene; keeps spans like `ocean_far_x - ocean_x` finite.
const MAX_EXTENT: f32 = 1.0e6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Regions {
    /// Ocean is everything with x > ocean_x.
    pub ocean_x: f32,
    /// Far edge of the ocean volume.
    pub ocean_far_x: f32,
    pub ocean_half_z: f32,
    /// Precipitation landing left of this runs off.
    pub inland_x: f32,
    /// Clouds left of this rain harder.
    pub mountain_x: f32,
    /// Groundwater re-emerges here.
    pub spring_x: f32,
    pub ground_y: f32,
    pub sea_level: f32,
}

impl Default for Regions {
    fn default() -> Self {
        Self {
            ocean_x: scene::OCEAN_X,
            ocean_far_x: scene::OCEAN_FAR_X,
            ocean_half_z: scene::OCEAN_HALF_Z,
            inland_x: scene::INLAND_X,
            mountain_x: scene::MOUNTAIN_X,
            spring_x: scene::SPRING_X,
            ground_y: scene::GROUND_Y,
            sea_level: scene::SEA_LEVEL,
        }
    }
}

impl Regions {
    #[inline]
    pub fn is_ocean(&self, x: f32) -> bool {
        x > self.ocean_x
    }

    #[inline]
    pub fn is_inland(&self, x: f32) -> bool {
        x < self.inland_x
    }

    #[inline]
    pub fn is_mountain(&self, x: f32) -> bool {
        x < self.mountain_x
    }

    /// True if `p` lies inside the ocean volume (horizontally).
    #[inline]
    pub fn contains_ocean(&self, p: Vec3) -> bool {
        p.x >= self.ocean_x && p.x <= self.ocean_far_x && p.z.abs() <= self.ocean_half_z
    }

    /// Pull a point back into the ocean volume. Height is left alone.
    #[inline]
    pub fn clamp_to_ocean(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.ocean_x, self.ocean_far_x),
            p.y,
            p.z.clamp(-self.ocean_half_z, self.ocean_half_z),
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let all = [
            self.ocean_x,
            self.ocean_far_x,
            self.ocean_half_z,
            self.inland_x,
            self.mountain_x,
            self.spring_x,
            self.ground_y,
            self.sea_level,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::InvalidRegions("boundaries must be finite"));
        }
        if all.iter().any(|v| v.abs() > MAX_EXTENT) {
            return Err(ConfigError::InvalidRegions("boundaries lie outside the scene"));
        }
        if self.ocean_far_x <= self.ocean_x || self.ocean_half_z <= 0.0 {
            return Err(ConfigError::InvalidRegions("ocean volume is empty"));
        }
        if self.inland_x >= self.ocean_x || self.mountain_x >= self.ocean_x {
            return Err(ConfigError::InvalidRegions("inland must lie left of the ocean"));
        }
        if self.spring_x < self.ocean_x || self.spring_x > self.ocean_far_x {
            return Err(ConfigError::InvalidRegions("spring must lie inside the ocean"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_pulls_strays_back_in() {
        let r = Regions::default();
        let p = r.clamp_to_ocean(Vec3::new(-10.0, 3.0, 400.0));
        assert!(r.contains_ocean(p));
        assert_eq!(p.y, 3.0);
        assert_eq!(p.x, r.ocean_x);
    }

    #[test]
    fn default_regions_are_valid() {
        assert!(Regions::default().validate().is_ok());
    }

    #[test]
    fn huge_extents_are_rejected() {
        let r = Regions { ocean_x: -3.0e38, ocean_far_x: 3.0e38, ..Regions::default() };
        assert!(matches!(r.validate(), Err(ConfigError::InvalidRegions(_))));
    }

    #[test]
    fn spring_on_land_is_rejected() {
        let r = Regions { spring_x: 0.0, ..Regions::default() };
        assert!(matches!(r.validate(), Err(ConfigError::InvalidRegions(_))));
    }
}
