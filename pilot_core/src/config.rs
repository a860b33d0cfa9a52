//! Runtime configuration structs for the decision core.
//!
//! These are the validated, in-memory counterparts of the TOML-deserialized
//! config in `pilot_config`; `crate::conversions` bridges the two.

/// Steering geometry.
#[derive(Debug, Clone)]
pub struct SteeringCfg {
    /// Maximum physical steering angle in radians. Steer commands are
    /// normalized against it.
    pub steer_lock_rad: f32,
}

impl Default for SteeringCfg {
    fn default() -> Self {
        Self {
            steer_lock_rad: std::f32::consts::FRAC_PI_4,
        }
    }
}

/// Speed policy thresholds.
#[derive(Debug, Clone)]
pub struct SpeedCfg {
    /// Speed commanded on open track.
    pub max_speed: f32,
    /// Forward clearance at or above which the agent goes flat-out.
    pub far_clearance: f32,
    /// Forward clearance at or above which the approach taper applies.
    /// Below it, the curvature estimate decides.
    pub corner_clearance: f32,
}

impl Default for SpeedCfg {
    fn default() -> Self {
        Self {
            max_speed: 200.0,
            far_clearance: 150.0,
            corner_clearance: 70.0,
        }
    }
}

/// Gear shift points.
#[derive(Debug, Clone)]
pub struct GearboxCfg {
    /// Shift up when engine speed is rising past this.
    pub upshift_rpm: f32,
    /// Shift down when engine speed is falling under this.
    pub downshift_rpm: f32,
}

impl Default for GearboxCfg {
    fn default() -> Self {
        Self {
            upshift_rpm: 7000.0,
            downshift_rpm: 3000.0,
        }
    }
}

/// Stuck detection and recovery maneuver timing, all cycle-counted.
#[derive(Debug, Clone)]
pub struct RecoveryCfg {
    /// Consecutive off-track observations before recovery engages.
    pub off_track_cycles: u32,
    /// Value the recovery timer is re-armed to on every off-track cycle.
    pub recovery_cycles: u32,
    /// Timer values under this select the terminal full-stop phase.
    pub brake_window: u32,
    /// Throttle applied while crawling back toward the track.
    pub crawl_accel: f32,
}

impl Default for RecoveryCfg {
    fn default() -> Self {
        Self {
            off_track_cycles: 25,
            recovery_cycles: 150,
            brake_window: 5,
            crawl_accel: 0.3,
        }
    }
}
