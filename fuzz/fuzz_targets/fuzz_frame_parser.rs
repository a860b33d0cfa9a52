#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Sensor frames arrive from the network; the decoder must reject garbage
    // with a typed error, never a panic.
    let _ = pilot_protocol::CarState::parse(data);
    // Lifecycle classification must also hold up against arbitrary input.
    let _ = pilot_protocol::classify(data);
});
