//! `From` implementations bridging `pilot_config` types to `pilot_core` types.

use crate::config::{GearboxCfg, RecoveryCfg, SpeedCfg, SteeringCfg};

// ── SteeringCfg ──────────────────────────────────────────────────────────────

impl From<&pilot_config::SteeringCfg> for SteeringCfg {
    fn from(c: &pilot_config::SteeringCfg) -> Self {
        Self {
            steer_lock_rad: c.steer_lock_rad,
        }
    }
}

// ── SpeedCfg ─────────────────────────────────────────────────────────────────

impl From<&pilot_config::SpeedCfg> for SpeedCfg {
    fn from(c: &pilot_config::SpeedCfg) -> Self {
        Self {
            max_speed: c.max_speed,
            far_clearance: c.far_clearance,
            corner_clearance: c.corner_clearance,
        }
    }
}

// ── GearboxCfg ───────────────────────────────────────────────────────────────

impl From<&pilot_config::GearboxCfg> for GearboxCfg {
    fn from(c: &pilot_config::GearboxCfg) -> Self {
        Self {
            upshift_rpm: c.upshift_rpm,
            downshift_rpm: c.downshift_rpm,
        }
    }
}

// ── RecoveryCfg ──────────────────────────────────────────────────────────────

impl From<&pilot_config::RecoveryCfg> for RecoveryCfg {
    fn from(c: &pilot_config::RecoveryCfg) -> Self {
        Self {
            off_track_cycles: c.off_track_cycles,
            recovery_cycles: c.recovery_cycles,
            brake_window: c.brake_window,
            crawl_accel: c.crawl_accel,
        }
    }
}
