//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `smarttrip_core` linkage.
//! - Load a catalog (first argument, else `SMARTTRIP_CATALOG`) and print a
//!   deterministic summary.

use smarttrip_core::{CatalogSource, PlannerConfig, TripPlanner};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("smarttrip_core ping={}", smarttrip_core::ping());
    println!("smarttrip_core version={}", smarttrip_core::core_version());

    let config = PlannerConfig::from_env();
    let source = match std::env::args().nth(1) {
        Some(raw) => CatalogSource::parse(&raw),
        None => config.catalog_source.clone(),
    };

    let mut planner = TripPlanner::new();
    let loaded = planner.load_catalog_with_timeout(&source, config.catalog_timeout);
    println!("catalog source={source} loaded={loaded}");
    println!(
        "catalog attractions={} last_updated={}",
        planner.catalog().len(),
        planner.catalog().last_updated
    );
    println!("regions={}", planner.available_regions().join(","));

    if loaded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
