// common/mod.rs - Shared test setup

#![allow(dead_code)]

use water_cycle_engine::{CycleWorld, Environment, Params};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fully seeded world on the canonical landscape.
pub fn world(params: Params, seed: u32) -> CycleWorld {
    init_logger();
    CycleWorld::seeded(Params { seed: seed as u64, ..params }, Environment::default(), seed)
}
