#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz record decoding.
///
/// Feeds arbitrary UTF-8 strings to `parse_points`, covering the lenient
/// timestamp adapter and optional-field defaults.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = connectivity_planner::parse_points(s);
    }
});
