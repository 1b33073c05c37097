//! Fuzz target for splitting arbitrary decoded images.
//!
//! This fuzzer decodes arbitrary bytes as an image and, if that succeeds,
//! runs the full in-memory split with a small cell size, checking for
//! panics and broken counter invariants.

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use tilecut::split::fuzz_split_bytes;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Some(report) = fuzz_split_bytes(data, Path::new("fuzz_export")) else {
        return;
    };
    assert!(report.saved <= report.total);
});
