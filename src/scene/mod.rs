// scene/ - Canonical landscape data
//
// Static facts about the illustrated landscape that the stage engine
// consumes. The mesh side (terrain, trees, ocean volume) is built by the
// JS scene from the same numbers.
//
// - Vegetation anchors (ground x/z of every tree)
// - Flow path control points (inland origin -> ocean)
// - Region boundaries along the x axis
// - Camera presets

mod camera;
mod data;

pub use camera::CameraPreset;
pub use data::*;
