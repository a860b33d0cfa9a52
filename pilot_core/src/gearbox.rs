//! Hysteretic gear selection over engine speed.

use crate::config::GearboxCfg;

/// Decide the gear for this cycle from the engine-speed trend.
///
/// The engine is considered rising on the very first cycle (no previous
/// sample) or whenever the previous reading was lower. Rising past the
/// upshift point shifts up; falling under the downshift point shifts down;
/// anything else holds. The result is not bounds-checked here — the wire
/// boundary clamps to the vehicle's legal gear range.
pub fn select_gear(prev_rpm: Option<f32>, rpm: f32, gear: i32, cfg: &GearboxCfg) -> i32 {
    let rising = match prev_rpm {
        None => true,
        Some(prev) => prev - rpm < 0.0,
    };

    if rising && rpm > cfg.upshift_rpm {
        gear + 1
    } else if !rising && rpm < cfg.downshift_rpm {
        gear - 1
    } else {
        gear
    }
}
