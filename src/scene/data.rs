// data.rs - Landscape constants
//
// x runs from the mountains (negative) to the ocean (positive).
// y is up, ground level is 0.

/// Tree anchors as [x, z]. Hills first, then the coastal plain.
pub const TREES: [[f32; 2]; 29] = [
    // Hills (x: -25..20)
    [-22.0, 15.0],
    [-18.0, 25.0],
    [-15.0, -10.0],
    [-12.0, 20.0],
    [-8.0, -5.0],
    [-5.0, 30.0],
    [-2.0, -15.0],
    [0.0, 25.0],
    [3.0, -20.0],
    [6.0, 15.0],
    [10.0, -25.0],
    [12.0, 20.0],
    [15.0, -10.0],
    [-20.0, 8.0],
    [-10.0, 18.0],
    [-6.0, -25.0],
    [8.0, 28.0],
    [5.0, -8.0],
    [13.0, 12.0],
    // Plains (x: 20..40), ocean stays clear
    [22.0, 5.0],
    [25.0, -22.0],
    [28.0, 18.0],
    [31.0, -10.0],
    [34.0, 15.0],
    [37.0, -18.0],
    [40.0, 8.0],
    [23.0, 25.0],
    [30.0, -25.0],
    [36.0, 10.0],
];

/// Tree canopy height; transpiration vapor starts around here.
pub const CANOPY_Y: f32 = 11.0;

/// River control points, inland spring to river mouth.
pub const FLOW_PATH: [[f32; 3]; 6] = [
    [-60.0, 0.3, -12.0],
    [-42.0, 0.2, -4.0],
    [-20.0, 0.1, 4.0],
    [2.0, 0.1, 0.0],
    [26.0, 0.0, -6.0],
    [52.0, -0.2, -2.0],
];

// Regions (x axis)
pub const OCEAN_X: f32 = 45.0;       // ocean is x > OCEAN_X
pub const OCEAN_FAR_X: f32 = 95.0;
pub const OCEAN_HALF_Z: f32 = 50.0;
pub const INLAND_X: f32 = -20.0;     // rain landing here runs off
pub const MOUNTAIN_X: f32 = -40.0;   // clouds rain harder past here
pub const SPRING_X: f32 = 48.0;

// Heights
pub const GROUND_Y: f32 = 0.0;
pub const SEA_LEVEL: f32 = -0.2;

// Cloud lane
pub const CLOUD_RESET_X: f32 = 75.0;
pub const CLOUD_FAR_X: f32 = -90.0;
pub const CLOUD_MIN_Y: f32 = 40.0;
pub const CLOUD_MAX_Y: f32 = 55.0;

/// Where parked (inactive) tokens sit.
pub const PARK_Y: f32 = -100.0;
