//! Simulation parameters.
//!
//! [`Params::default`] is the canonical tuning. Any subset can be
//! overridden from JSON; missing fields keep their defaults.
//!
//! ```
//! use water_cycle_engine::Params;
//!
//! let params = Params::from_json(r#"{ "evaporation_rate": 0.8, "seed": 3 }"#).unwrap();
//! assert_eq!(params.evaporation_rate, 0.8);
//! assert_eq!(params.vapor_capacity, 80);
//! ```

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::world::{Environment, Regions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // Pool sizes
    pub water_capacity: usize,
    pub vapor_capacity: usize,
    pub cloud_count: usize,
    pub precipitation_capacity: usize,
    pub groundwater_capacity: usize,

    // Rates, scaled by fixed per-tick factors in the stage engine
    pub evaporation_rate: f32,
    pub transpiration_rate: f32,
    pub condensation_rate: f32,

    // Vapor
    pub condensation_altitude: f32,
    pub condensation_radius: f32,
    pub condensation_increment: f32,
    pub vapor_ceiling: f32,
    pub vapor_max_age: u32,

    // Clouds
    pub cloud_max_water: f32,
    pub cloud_saturation: f32,
    pub cloud_decay: f32,
    pub rain_chance_mountain: f32,
    pub rain_chance_elsewhere: f32,
    pub rain_emission: f32,

    // Landing and subsurface
    pub surface_landing_chance: f32,
    pub groundwater_arrival_chance: f32,
    pub groundwater_max_age: u32,

    /// Ticks an evaporated slot waits before returning to the ocean.
    pub evaporated_cooldown_min: u32,
    pub evaporated_cooldown_max: u32,

    /// Seed for the transition RNG.
    pub seed: u64,

    pub environment: EnvironmentConfig,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            water_capacity: 120,
            vapor_capacity: 80,
            cloud_count: 15,
            precipitation_capacity: 60,
            groundwater_capacity: 40,

            evaporation_rate: 0.4,
            transpiration_rate: 0.35,
            condensation_rate: 0.5,

            condensation_altitude: 20.0,
            condensation_radius: 30.0,
            condensation_increment: 0.18,
            vapor_ceiling: 70.0,
            vapor_max_age: 400,

            cloud_max_water: 2.0,
            cloud_saturation: 1.0,
            cloud_decay: 0.001,
            rain_chance_mountain: 0.15,
            rain_chance_elsewhere: 0.03,
            rain_emission: 0.15,

            surface_landing_chance: 0.6,
            groundwater_arrival_chance: 0.003,
            groundwater_max_age: 1500,

            evaporated_cooldown_min: 800,
            evaporated_cooldown_max: 1200,

            seed: 0x5EED,

            environment: EnvironmentConfig::default(),
        }
    }
}

impl Params {
    /// Parse and validate. Unknown fields are ignored.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("evaporation_rate", self.evaporation_rate),
            ("transpiration_rate", self.transpiration_rate),
            ("condensation_rate", self.condensation_rate),
            ("condensation_altitude", self.condensation_altitude),
            ("condensation_radius", self.condensation_radius),
            ("condensation_increment", self.condensation_increment),
            ("vapor_ceiling", self.vapor_ceiling),
            ("cloud_max_water", self.cloud_max_water),
            ("cloud_saturation", self.cloud_saturation),
            ("cloud_decay", self.cloud_decay),
            ("rain_chance_mountain", self.rain_chance_mountain),
            ("rain_chance_elsewhere", self.rain_chance_elsewhere),
            ("rain_emission", self.rain_emission),
            ("surface_landing_chance", self.surface_landing_chance),
            ("groundwater_arrival_chance", self.groundwater_arrival_chance),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }
        if self.evaporated_cooldown_max < self.evaporated_cooldown_min {
            return Err(ConfigError::InvalidRate {
                name: "evaporated_cooldown_max",
                value: self.evaporated_cooldown_max as f32,
            });
        }
        if self.water_capacity == 0 {
            return Err(ConfigError::InvalidCapacity { pool: "water" });
        }
        self.environment.regions.validate()
    }
}

/// Environment overrides. `None` keeps the canonical landscape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub trees: Option<Vec<[f32; 2]>>,
    pub flow_path: Option<Vec<[f32; 3]>>,
    pub regions: Regions,
}

impl EnvironmentConfig {
    pub fn build(&self) -> Result<Environment, ConfigError> {
        let mut builder = Environment::builder().regions(self.regions);
        if let Some(trees) = &self.trees {
            builder = builder.trees(trees.iter().map(|&t| Vec2::from(t)));
        }
        if let Some(points) = &self.flow_path {
            builder = builder.flow_path(points.iter().map(|&p| Vec3::from(p)));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn defaults_validate() {
        assert!(Params::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p = Params::from_json(r#"{ "vapor_capacity": 5 }"#).unwrap();
        assert_eq!(p.vapor_capacity, 5);
        assert_eq!(p.water_capacity, 120);
        assert_eq!(p.environment, EnvironmentConfig::default());
    }

    #[test_case(r#"{ "evaporation_rate": -1.0 }"# ; "negative rate")]
    #[test_case(r#"{ "water_capacity": 0 }"# ; "empty water pool")]
    #[test_case(r#"{ "evaporated_cooldown_min": 10, "evaporated_cooldown_max": 5 }"# ; "inverted cooldown")]
    #[test_case(r#"{ "environment": { "regions": { "spring_x": -5.0 } } }"# ; "spring on land")]
    #[test_case(r#"{ "environment": { "regions": { "ocean_x": -3e38, "ocean_far_x": 3e38 } } }"# ; "unbounded ocean")]
    #[test_case(r#"{ "seed": "#; "truncated")]
    fn rejects(json: &str) {
        assert!(Params::from_json(json).is_err());
    }

    #[test]
    fn custom_trees_reach_environment() {
        let p = Params::from_json(r#"{ "environment": { "trees": [[1.0, 2.0], [3.0, 4.0]] } }"#).unwrap();
        let env = p.environment.build().unwrap();
        assert_eq!(env.trees().len(), 2);
    }
}
