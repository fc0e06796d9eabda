//! Fuzz harness for configuration files (dataviz.yaml / dataviz.json)
//!
//! The loaders must reject malformed input with an error, never a panic.

#![no_main]

use dataviz_config::DatavizConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let _: Result<DatavizConfig, _> = serde_yaml::from_str(input);
    let _: Result<DatavizConfig, _> = serde_json::from_str(input);
});
