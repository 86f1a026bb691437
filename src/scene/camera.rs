// camera.rs - Camera presets
//
// Eye and look-at target for each named view. Orbit control and
// damping stay on the JS side; these only seed them.

use std::str::FromStr;

use glam::Vec3;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraPreset {
    /// Bird's eye, straight down
    Top,
    /// Cross-section showing elevation
    #[default]
    Side,
    /// From the ocean toward the mountains
    Front,
    Angle,
}

impl CameraPreset {
    pub fn eye(self) -> Vec3 {
        match self {
            CameraPreset::Top => Vec3::new(0.0, 150.0, 0.0),
            CameraPreset::Side => Vec3::new(0.0, 35.0, 120.0),
            CameraPreset::Front => Vec3::new(100.0, 40.0, 0.0),
            CameraPreset::Angle => Vec3::new(80.0, 60.0, 80.0),
        }
    }

    pub fn target(self) -> Vec3 {
        match self {
            CameraPreset::Top => Vec3::ZERO,
            _ => Vec3::new(0.0, 15.0, 0.0),
        }
    }
}

impl FromStr for CameraPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(CameraPreset::Top),
            "side" => Ok(CameraPreset::Side),
            "front" => Ok(CameraPreset::Front),
            "angle" => Ok(CameraPreset::Angle),
            _ => Err(ConfigError::UnknownCamera(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_view_looks_straight_down() {
        let v = CameraPreset::Top;
        let dir = (v.target() - v.eye()).normalize();
        assert!((dir - Vec3::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn unknown_view_is_rejected() {
        assert!("fisheye".parse::<CameraPreset>().is_err());
        assert_eq!("Angle".parse::<CameraPreset>().unwrap(), CameraPreset::Angle);
    }
}
