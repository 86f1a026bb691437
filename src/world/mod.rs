// world/ - Environment queries
//
// Read-only facts the stage engine consumes every tick: where the trees
// are, where the river runs, and where the ocean and mountains begin.
// Built once, never mutated while the simulation runs.

mod flow;
mod region;

pub use flow::FlowPath;
pub use region::Regions;

use glam::{Vec2, Vec3};

use crate::error::ConfigError;
use crate::scene;

#[derive(Debug, Clone)]
pub struct Environment {
    trees: Vec<Vec2>,
    flow_path: FlowPath,
    regions: Regions,
}

impl Environment {
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::default()
    }

    /// Vegetation anchors as ground (x, z).
    #[inline]
    pub fn trees(&self) -> &[Vec2] {
        &self.trees
    }

    #[inline]
    pub fn flow_path(&self) -> &FlowPath {
        &self.flow_path
    }

    #[inline]
    pub fn regions(&self) -> &Regions {
        &self.regions
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            trees: scene::TREES.iter().map(|&[x, z]| Vec2::new(x, z)).collect(),
            flow_path: FlowPath::canonical(),
            regions: Regions::default(),
        }
    }
}

/// Builds an [`Environment`], starting from the canonical landscape.
#[derive(Debug, Clone)]
pub struct EnvironmentBuilder {
    trees: Vec<Vec2>,
    flow_points: Vec<Vec3>,
    regions: Regions,
}

impl Default for EnvironmentBuilder {
    fn default() -> Self {
        Self {
            trees: scene::TREES.iter().map(|&[x, z]| Vec2::new(x, z)).collect(),
            flow_points: scene::FLOW_PATH.iter().map(|&p| Vec3::from(p)).collect(),
            regions: Regions::default(),
        }
    }
}

impl EnvironmentBuilder {
    pub fn trees(mut self, trees: impl IntoIterator<Item = Vec2>) -> Self {
        self.trees = trees.into_iter().collect();
        self
    }

    pub fn flow_path(mut self, points: impl IntoIterator<Item = Vec3>) -> Self {
        self.flow_points = points.into_iter().collect();
        self
    }

    pub fn regions(mut self, regions: Regions) -> Self {
        self.regions = regions;
        self
    }

    pub fn build(self) -> Result<Environment, ConfigError> {
        self.regions.validate()?;
        let flow_path = FlowPath::new(self.flow_points)?;
        log::debug!(
            "environment: {} trees, river {:.1}..{:.1}, ocean x > {:.1}",
            self.trees.len(),
            flow_path.entry_x(),
            flow_path.exit_x(),
            self.regions.ocean_x,
        );
        Ok(Environment {
            trees: self.trees,
            flow_path,
            regions: self.regions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_matches_scene() {
        let env = Environment::default();
        assert_eq!(env.trees().len(), scene::TREES.len());
        assert_eq!(env.flow_path().entry_x(), scene::FLOW_PATH[0][0]);
        assert!(env.regions().is_ocean(env.flow_path().exit_x()));
    }

    #[test]
    fn builder_rejects_bad_regions() {
        let regions = Regions { inland_x: 60.0, ..Regions::default() };
        assert!(Environment::builder().regions(regions).build().is_err());
    }

    #[test]
    fn builder_replaces_trees() {
        let env = Environment::builder()
            .trees([Vec2::new(1.0, 2.0)])
            .build()
            .unwrap();
        assert_eq!(env.trees(), &[Vec2::new(1.0, 2.0)]);
    }
}
