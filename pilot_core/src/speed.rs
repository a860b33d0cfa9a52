//! Target-speed policy for the current cycle.

use crate::config::SpeedCfg;

/// Pick the target speed from forward clearance and the curvature estimate.
///
/// Evaluated in order: open track goes flat-out; inside the approach band the
/// target tapers by the current speed (a damping heuristic, kept as-is); close
/// to a detected corner the target scales with the estimated turn radius. A
/// degenerate curvature estimate falls back to the approach taper instead of
/// contaminating the actuator path.
pub fn plan_target_speed(
    clearance: f32,
    speed_x: f32,
    turn_radius: Option<f32>,
    cfg: &SpeedCfg,
    steer_lock_rad: f32,
) -> f32 {
    if clearance >= cfg.far_clearance {
        cfg.max_speed
    } else if clearance >= cfg.corner_clearance {
        cfg.max_speed - speed_x
    } else {
        match turn_radius {
            Some(radius) => {
                tracing::trace!(clearance, radius, "corner approach");
                2.0 * steer_lock_rad * radius
            }
            None => cfg.max_speed - speed_x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_threshold_is_inclusive() {
        let cfg = SpeedCfg::default();
        assert_eq!(plan_target_speed(150.0, 50.0, None, &cfg, 0.8), 200.0);
        // Just below: damping branch.
        assert_eq!(plan_target_speed(149.9, 50.0, None, &cfg, 0.8), 150.0);
    }

    #[test]
    fn corner_threshold_is_inclusive() {
        let cfg = SpeedCfg::default();
        // Exactly at the corner threshold: still the damping branch, never
        // the curvature branch.
        assert_eq!(plan_target_speed(70.0, 60.0, Some(30.0), &cfg, 0.8), 140.0);
        // Just below: curvature branch.
        let v = plan_target_speed(69.9, 60.0, Some(30.0), &cfg, 0.8);
        assert!((v - 2.0 * 0.8 * 30.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_radius_falls_back_to_taper() {
        let cfg = SpeedCfg::default();
        assert_eq!(plan_target_speed(40.0, 55.0, None, &cfg, 0.8), 145.0);
    }

    #[test]
    fn gentler_curves_permit_higher_speed() {
        let cfg = SpeedCfg::default();
        let tight = plan_target_speed(40.0, 55.0, Some(20.0), &cfg, 0.8);
        let gentle = plan_target_speed(40.0, 55.0, Some(120.0), &cfg, 0.8);
        assert!(gentle > tight);
    }
}
