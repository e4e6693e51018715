#![no_main]
use connectivity_planner::{AppConfig, Planner};
use libfuzzer_sys::fuzz_target;

/// Fuzz the full planning pipeline on any batch that decodes.
///
/// Non-finite or out-of-range inputs may produce errors but must never panic.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(mut points) = connectivity_planner::parse_points(s) else {
        return;
    };
    let Ok(planner) = Planner::from_config(AppConfig::default()) else {
        return;
    };
    planner.prepare(&mut points);
    let _ = planner.expansion_report(&points);
    let _ = planner.profile_zones(&points);
    let _ = planner.forecast(&points);
    let _ = planner.temporal(&points);
});
