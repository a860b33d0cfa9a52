#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and validation for the driving agent.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Lane directions arrive as a comma-separated token list and are checked
//!   at load time; an unknown token is a configuration error, not a runtime
//!   surprise.

use std::f32::consts::FRAC_PI_2;
use std::str::FromStr;

use serde::Deserialize;

/// Competition stage the server announced for this session.
///
/// Reserved for stage-specific behavior; the current decision logic does not
/// branch on it.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Warmup,
    Qualifying,
    Race,
    #[default]
    Unknown,
}

impl FromStr for Stage {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "warmup" => Ok(Self::Warmup),
            "qualifying" => Ok(Self::Qualifying),
            "race" => Ok(Self::Race),
            "unknown" => Ok(Self::Unknown),
            other => eyre::bail!("unknown stage {other:?} (warmup|qualifying|race|unknown)"),
        }
    }
}

/// Direction of travel assigned to a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneDirection {
    Forward,
    Opposite,
}

impl FromStr for LaneDirection {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "opposite" => Ok(Self::Opposite),
            other => eyre::bail!("unknown lane direction {other:?} (forward|opposite)"),
        }
    }
}

/// Parse a comma-separated lane-direction list, rejecting unknown tokens.
pub fn parse_lanes(list: &str) -> eyre::Result<Vec<LaneDirection>> {
    let lanes = list
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(LaneDirection::from_str)
        .collect::<eyre::Result<Vec<_>>>()?;
    if lanes.is_empty() {
        eyre::bail!("lane list is empty");
    }
    Ok(lanes)
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SteeringCfg {
    /// Maximum physical steering angle in radians; normalizes steer output.
    pub steer_lock_rad: f32,
}

impl Default for SteeringCfg {
    fn default() -> Self {
        Self {
            steer_lock_rad: std::f32::consts::FRAC_PI_4,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SpeedCfg {
    /// Top speed commanded on open track.
    pub max_speed: f32,
    /// Forward clearance at or above which the agent goes flat-out.
    pub far_clearance: f32,
    /// Forward clearance at or above which the approach taper applies;
    /// below it, curvature decides.
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

#[derive(Debug, Deserialize)]
#[serde(default)]
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

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RecoveryCfg {
    /// Consecutive off-track observations before the maneuver engages.
    pub off_track_cycles: u32,
    /// Cycles the recovery timer is armed to on each off-track observation.
    pub recovery_cycles: u32,
    /// Timer values under this trigger the terminal full-stop phase.
    pub brake_window: u32,
    /// Throttle applied while maneuvering back toward the track.
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

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RaceCfg {
    /// Competition stage announced by the server.
    pub stage: Stage,
    /// Comma-separated lane directions, e.g. "forward,opposite".
    pub lanes: String,
    /// Index of the lane this agent should bias toward.
    pub lane: usize,
    /// Seed for any stochastic tie-breaking; carried, currently unused.
    pub seed: u64,
}

impl Default for RaceCfg {
    fn default() -> Self {
        Self {
            stage: Stage::Unknown,
            lanes: "forward".to_string(),
            lane: 0,
            seed: 0,
        }
    }
}

impl RaceCfg {
    /// The validated lane list.
    pub fn lane_directions(&self) -> eyre::Result<Vec<LaneDirection>> {
        parse_lanes(&self.lanes)
    }

    /// Lateral bias target in half track-widths, derived from the lane count
    /// and the requested lane: single lane holds the centerline, otherwise
    /// lane 0 biases left and any other lane biases right.
    pub fn lane_target(&self) -> eyre::Result<f32> {
        let lanes = self.lane_directions()?;
        if self.lane >= lanes.len() {
            eyre::bail!(
                "race.lane {} out of range for {} configured lane(s)",
                self.lane,
                lanes.len()
            );
        }
        if lanes.len() == 1 {
            Ok(0.0)
        } else if self.lane == 0 {
            Ok(-0.5)
        } else {
            Ok(0.5)
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub steering: SteeringCfg,
    pub speed: SpeedCfg,
    pub gearbox: GearboxCfg,
    pub recovery: RecoveryCfg,
    pub race: RaceCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Steering
        if !self.steering.steer_lock_rad.is_finite()
            || self.steering.steer_lock_rad <= 0.0
            || self.steering.steer_lock_rad > FRAC_PI_2
        {
            eyre::bail!("steering.steer_lock_rad must be in (0, pi/2]");
        }

        // Speed
        if !self.speed.max_speed.is_finite() || self.speed.max_speed <= 0.0 {
            eyre::bail!("speed.max_speed must be > 0");
        }
        if self.speed.corner_clearance <= 0.0 {
            eyre::bail!("speed.corner_clearance must be > 0");
        }
        if self.speed.far_clearance <= self.speed.corner_clearance {
            eyre::bail!("speed.far_clearance must be greater than speed.corner_clearance");
        }

        // Gearbox
        if self.gearbox.downshift_rpm <= 0.0 {
            eyre::bail!("gearbox.downshift_rpm must be > 0");
        }
        if self.gearbox.upshift_rpm <= self.gearbox.downshift_rpm {
            eyre::bail!("gearbox.upshift_rpm must be greater than gearbox.downshift_rpm");
        }

        // Recovery
        if self.recovery.off_track_cycles == 0 {
            eyre::bail!("recovery.off_track_cycles must be >= 1");
        }
        if self.recovery.brake_window == 0 {
            eyre::bail!("recovery.brake_window must be >= 1");
        }
        if self.recovery.recovery_cycles <= self.recovery.brake_window {
            eyre::bail!("recovery.recovery_cycles must be greater than recovery.brake_window");
        }
        if !(0.0..=1.0).contains(&self.recovery.crawl_accel) || self.recovery.crawl_accel == 0.0 {
            eyre::bail!("recovery.crawl_accel must be in (0.0, 1.0]");
        }

        // Race: lane tokens and index are checked together
        self.race.lane_target().map(|_| ())?;

        // Logging
        if let Some(rotation) = &self.logging.rotation
            && !matches!(rotation.as_str(), "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly");
        }

        Ok(())
    }
}
