//! The per-cycle decision controller.

use pilot_protocol::{CarState, Control, TRACK_SENSORS, message};

use crate::actuation;
use crate::config::{GearboxCfg, RecoveryCfg, SpeedCfg, SteeringCfg};
use crate::error::{BuildError, Result};
use crate::gearbox;
use crate::geometry;
use crate::recovery::RecoverySupervisor;
use crate::speed;

/// One driving agent: immutable configuration plus the small amount of state
/// carried across cycles (recovery counters, previous engine speed).
///
/// `drive` is infallible and pure of I/O: every snapshot yields a command.
#[derive(Debug)]
pub struct Driver {
    steering: SteeringCfg,
    speed: SpeedCfg,
    gearbox: GearboxCfg,
    supervisor: RecoverySupervisor,
    /// Lateral bias target in half track-widths.
    lane_target: f32,
    angles: [f32; TRACK_SENSORS],
    /// Engine speed from the previous cycle; `None` until the first frame.
    prev_rpm: Option<f32>,

    // Telemetry for run summaries and debugging
    cycles: u64,
    recovery_cycles: u64,
    last_target_speed: Option<f32>,
}

impl Driver {
    /// Start building a Driver.
    pub fn builder() -> DriverBuilder {
        DriverBuilder::default()
    }

    /// Build a Driver straight from a validated top-level config.
    pub fn from_config(cfg: &pilot_config::Config) -> Result<Self> {
        cfg.validate()?;
        let lane_target = cfg.race.lane_target()?;
        Self::builder()
            .with_steering((&cfg.steering).into())
            .with_speed((&cfg.speed).into())
            .with_gearbox((&cfg.gearbox).into())
            .with_recovery((&cfg.recovery).into())
            .with_lane_target(lane_target)
            .build()
    }

    /// The init frame carrying the requested range-finder layout; sent once
    /// at startup, the only configuration the agent pushes to the server.
    pub fn init_frame(&self) -> String {
        message::init_frame(&self.angles)
    }

    /// The configured range-finder angles in degrees.
    pub fn sensor_angles(&self) -> &[f32; TRACK_SENSORS] {
        &self.angles
    }

    /// Produce this cycle's actuator command from the sensor snapshot.
    pub fn drive(&mut self, state: &CarState) -> Control {
        let mut ctrl = Control::default();

        if self.supervisor.observe(state.track_pos) {
            self.supervisor.maneuver(state.angle, state.track_pos, &mut ctrl);
            self.recovery_cycles = self.recovery_cycles.saturating_add(1);
            self.last_target_speed = None;
            tracing::debug!(
                track_pos = state.track_pos,
                timer = self.supervisor.timer_remaining(),
                gear = ctrl.gear,
                "recovery maneuver"
            );
        } else {
            ctrl.steer = actuation::steer_command(
                state.angle,
                state.track_pos,
                self.lane_target,
                self.steering.steer_lock_rad,
            );
            ctrl.gear = gearbox::select_gear(self.prev_rpm, state.rpm, state.gear, &self.gearbox);

            let radius =
                geometry::turn_radius(geometry::forward_samples(&self.angles, &state.track));
            let target = speed::plan_target_speed(
                state.track[geometry::CENTER],
                state.speed_x,
                radius,
                &self.speed,
                self.steering.steer_lock_rad,
            );
            let (accel, brake) = actuation::throttle_brake(target - state.speed_x);
            ctrl.accel = accel;
            ctrl.brake = brake;

            self.last_target_speed = Some(target);
            tracing::trace!(
                target,
                accel,
                brake,
                steer = ctrl.steer,
                gear = ctrl.gear,
                "cycle decision"
            );
        }

        self.prev_rpm = Some(state.rpm);
        self.cycles = self.cycles.saturating_add(1);
        ctrl
    }

    /// Restart notification: a fresh race segment begins, so drop the
    /// recovery state and the carried engine speed.
    pub fn on_restart(&mut self) {
        self.supervisor.reset();
        self.prev_rpm = None;
        tracing::info!("restart: recovery state and rpm trend cleared");
    }

    /// Shutdown notification. Nothing to tear down in the core.
    pub fn on_shutdown(&self) {
        tracing::info!(cycles = self.cycles, "shutdown");
    }

    /// Whether the recovery maneuver currently owns the cycle.
    pub fn is_recovering(&self) -> bool {
        self.supervisor.recovering()
    }

    /// Cycles decided so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Cycles spent inside the recovery maneuver.
    pub fn recovery_cycles(&self) -> u64 {
        self.recovery_cycles
    }

    /// Telemetry: target speed of the last normal cycle, if any.
    pub fn last_target_speed(&self) -> Option<f32> {
        self.last_target_speed
    }
}

/// Builder for `Driver`. All fields are validated on `build()`.
#[derive(Default)]
pub struct DriverBuilder {
    steering: Option<SteeringCfg>,
    speed: Option<SpeedCfg>,
    gearbox: Option<GearboxCfg>,
    recovery: Option<RecoveryCfg>,
    lane_target: Option<f32>,
}

impl DriverBuilder {
    pub fn with_steering(mut self, steering: SteeringCfg) -> Self {
        self.steering = Some(steering);
        self
    }
    pub fn with_speed(mut self, speed: SpeedCfg) -> Self {
        self.speed = Some(speed);
        self
    }
    pub fn with_gearbox(mut self, gearbox: GearboxCfg) -> Self {
        self.gearbox = Some(gearbox);
        self
    }
    pub fn with_recovery(mut self, recovery: RecoveryCfg) -> Self {
        self.recovery = Some(recovery);
        self
    }
    pub fn with_lane_target(mut self, lane_target: f32) -> Self {
        self.lane_target = Some(lane_target);
        self
    }

    /// Validate and build. Unset sections fall back to their defaults.
    pub fn build(self) -> Result<Driver> {
        let steering = self.steering.unwrap_or_default();
        let speed = self.speed.unwrap_or_default();
        let gearbox = self.gearbox.unwrap_or_default();
        let recovery = self.recovery.unwrap_or_default();
        let lane_target = self.lane_target.unwrap_or(0.0);

        if !steering.steer_lock_rad.is_finite()
            || steering.steer_lock_rad <= 0.0
            || steering.steer_lock_rad > std::f32::consts::FRAC_PI_2
        {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "steer_lock_rad must be in (0, pi/2]",
            )));
        }
        if !speed.max_speed.is_finite() || speed.max_speed <= 0.0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "max_speed must be > 0",
            )));
        }
        if speed.corner_clearance <= 0.0 || speed.far_clearance <= speed.corner_clearance {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "clearance thresholds must satisfy far > corner > 0",
            )));
        }
        if gearbox.downshift_rpm <= 0.0 || gearbox.upshift_rpm <= gearbox.downshift_rpm {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "shift points must satisfy upshift > downshift > 0",
            )));
        }
        if recovery.off_track_cycles == 0 {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "off_track_cycles must be >= 1",
            )));
        }
        if recovery.recovery_cycles <= recovery.brake_window {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "recovery_cycles must be greater than brake_window",
            )));
        }
        if !(recovery.crawl_accel > 0.0 && recovery.crawl_accel <= 1.0) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "crawl_accel must be in (0, 1]",
            )));
        }
        if !(-1.0..=1.0).contains(&lane_target) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "lane_target must be in [-1, 1]",
            )));
        }

        Ok(Driver {
            steering,
            speed,
            gearbox,
            supervisor: RecoverySupervisor::new(recovery),
            lane_target,
            angles: geometry::sensor_angles(),
            prev_rpm: None,
            cycles: 0,
            recovery_cycles: 0,
            last_target_speed: None,
        })
    }
}
