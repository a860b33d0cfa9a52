//! Stuck detection and the timed recovery maneuver.
//!
//! Two states: normal driving and recovering. Off-track observations
//! (`|track_pos| > 1`) accumulate in a counter and keep re-arming a timer;
//! once the counter exceeds its threshold the supervisor owns the cycle and
//! overrides every other component until the timer has run out back on track.

use pilot_protocol::Control;

use crate::config::RecoveryCfg;

/// Fraction of the heading error fed back as steer during the maneuver.
const STEER_RATIO: f32 = 0.25;

/// Explicit recovery state, owned by the cycle controller and threaded
/// through each call; there are no ambient counters.
#[derive(Debug)]
pub struct RecoverySupervisor {
    cfg: RecoveryCfg,
    /// Consecutive cycles observed off-track; reset once the timer expires.
    off_track_cycles: u32,
    /// Counts down once the vehicle is back on track, gating hand-back and
    /// the terminal braking phase.
    timer: u32,
}

impl RecoverySupervisor {
    pub fn new(cfg: RecoveryCfg) -> Self {
        Self {
            cfg,
            off_track_cycles: 0,
            timer: 0,
        }
    }

    /// Fold in this cycle's track position and report whether the recovery
    /// maneuver owns the cycle.
    ///
    /// While off-track the counter climbs and the timer is re-armed. Back on
    /// track, the timer decays first — the grace period lets a running
    /// maneuver finish — and only once it reaches zero does the counter
    /// reset, which is what ends recovery.
    pub fn observe(&mut self, track_pos: f32) -> bool {
        if track_pos.abs() > 1.0 {
            self.off_track_cycles = self.off_track_cycles.saturating_add(1);
            self.timer = self.cfg.recovery_cycles;
        } else if self.timer != 0 {
            self.timer -= 1;
        } else {
            self.off_track_cycles = 0;
        }
        self.recovering()
    }

    /// Whether the counter is past the stuck threshold.
    pub fn recovering(&self) -> bool {
        self.off_track_cycles > self.cfg.off_track_cycles
    }

    /// Cycles left on the recovery timer.
    pub fn timer_remaining(&self) -> u32 {
        self.timer
    }

    /// Fill `ctrl` with the fixed recovery maneuver for this cycle.
    ///
    /// The sign of `angle · track_pos` says which end of the car points back
    /// toward the track: positive means the nose does, so drive forward and
    /// counter-steer; otherwise reverse and steer the rear toward the track.
    /// Inside the brake window the maneuver ends in a full stop so the car
    /// settles before control is handed back.
    pub fn maneuver(&self, angle: f32, track_pos: f32, ctrl: &mut Control) {
        if angle * track_pos > 0.0 {
            ctrl.gear = 1;
            ctrl.steer = -angle * STEER_RATIO;
        } else {
            ctrl.gear = -1;
            ctrl.steer = angle * STEER_RATIO;
        }

        if self.timer < self.cfg.brake_window {
            ctrl.accel = 0.0;
            ctrl.brake = 1.0;
            ctrl.gear = 0;
            ctrl.steer = 0.0;
        } else {
            ctrl.accel = self.cfg.crawl_accel;
            ctrl.brake = 0.0;
        }

        ctrl.clutch = 0.0;
        ctrl.focus = 0;
        ctrl.meta = 0;
    }

    /// Drop all carried state, as on a race restart.
    pub fn reset(&mut self) {
        self.off_track_cycles = 0;
        self.timer = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supervisor() -> RecoverySupervisor {
        RecoverySupervisor::new(RecoveryCfg::default())
    }

    #[test]
    fn needs_more_than_threshold_cycles_off_track() {
        let mut sup = supervisor();
        for _ in 0..25 {
            assert!(!sup.observe(1.2));
        }
        assert!(sup.observe(1.2), "26th off-track cycle engages recovery");
    }

    #[test]
    fn brief_excursions_do_not_engage() {
        let mut sup = supervisor();
        for _ in 0..10 {
            sup.observe(1.5);
        }
        // Back on track long enough for the timer to expire and the counter
        // to reset on the following cycle.
        for _ in 0..151 {
            assert!(!sup.observe(0.0));
        }
        assert!(!sup.observe(1.5), "counter restarted from zero");
    }

    #[test]
    fn reset_clears_counter_and_timer() {
        let mut sup = supervisor();
        for _ in 0..30 {
            sup.observe(2.0);
        }
        assert!(sup.recovering());
        sup.reset();
        assert!(!sup.recovering());
        assert_eq!(sup.timer_remaining(), 0);
    }
}
