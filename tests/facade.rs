// facade.rs - The browser-facing handle, driven natively

mod common;

use water_cycle_engine::sim::STEP_MS;
use water_cycle_engine::{Params, STRIDE, WaterCycle};

fn cycle() -> WaterCycle {
    common::init_logger();
    WaterCycle::new(42)
}

#[test]
fn buffer_covers_every_instance() {
    let c = cycle();
    let p = Params::default();
    let instances =
        p.water_capacity + p.vapor_capacity + p.precipitation_capacity + p.groundwater_capacity + p.cloud_count;

    assert_eq!(c.instance_count(), instances);
    assert_eq!(c.output_len(), instances * STRIDE);
    assert_eq!(WaterCycle::stride(), STRIDE);
    assert_eq!(c.vapor_offset(), p.water_capacity);
    assert_eq!(c.cloud_offset() + p.cloud_count, instances);
}

#[test]
fn advance_runs_whole_ticks() {
    let mut c = cycle();
    assert_eq!(c.advance(STEP_MS * 0.5), 0);
    assert_eq!(c.advance(STEP_MS * 0.6), 1);
    assert_eq!(c.advance(STEP_MS * 2.0), 2);
    assert_eq!(c.ticks(), 3.0);
}

#[test]
fn paused_cycle_does_not_advance() {
    let mut c = cycle();
    c.set_playing(false);
    assert!(!c.is_playing());
    assert_eq!(c.advance(1000.0), 0);
    c.tick();
    assert_eq!(c.ticks(), 0.0);

    c.set_playing(true);
    c.tick();
    assert_eq!(c.ticks(), 1.0);
}

#[test]
fn focus_round_trips_by_name() {
    let mut c = cycle();
    assert_eq!(c.focus(), "all");
    assert!(c.set_focus("Groundwater").is_ok());
    assert_eq!(c.focus(), "groundwater");
}

#[test]
fn config_overrides_defaults() {
    let Ok(c) = WaterCycle::from_config(r#"{ "vapor_capacity": 10, "cloud_count": 3 }"#) else {
        panic!("valid config rejected");
    };
    let p = Params::default();
    assert_eq!(c.precipitation_offset(), p.water_capacity + 10);
    assert_eq!(c.instance_count() - c.cloud_offset(), 3);
}

#[test]
fn scene_geometry_is_exposed_flat() {
    let c = cycle();
    assert_eq!(c.trees().len() % 2, 0);
    assert!(!c.trees().is_empty());
    assert_eq!(c.flow_path(32).len(), 32 * 3);

    let Ok(side) = WaterCycle::camera("side") else {
        panic!("side camera missing");
    };
    assert_eq!(side.len(), 6);
}
