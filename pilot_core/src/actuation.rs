//! Mapping from speed error and track pose to actuator values.

/// Bounded odd response to a speed error: `2/(1+e^(−delta)) − 1`.
///
/// Strictly inside (−1, 1), saturating for large |delta| and roughly
/// proportional near zero, so throttle hands off to brake with no dead zone
/// and no discontinuity at delta = 0.
pub fn drive_response(delta: f32) -> f32 {
    2.0 / (1.0 + (-delta).exp()) - 1.0
}

/// Split the response into the mutually exclusive throttle/brake pair.
pub fn throttle_brake(delta: f32) -> (f32, f32) {
    let response = drive_response(delta);
    if response > 0.0 {
        (response, 0.0)
    } else {
        (0.0, -response)
    }
}

/// Steering law: correct the heading error directly and pull laterally toward
/// the lane-bias target, normalized by the steering lock.
///
/// The result is deliberately unclamped; the wire boundary clamps to [-1, 1].
pub fn steer_command(angle: f32, track_pos: f32, lane_target: f32, steer_lock_rad: f32) -> f32 {
    (angle - 0.5 * (track_pos - lane_target)) / steer_lock_rad
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn response_is_zero_at_zero_error() {
        assert_eq!(drive_response(0.0), 0.0);
        assert_eq!(throttle_brake(0.0), (0.0, 0.0));
    }

    #[test]
    fn response_saturates_both_ways() {
        let (accel, brake) = throttle_brake(1000.0);
        assert!(accel > 0.999 && brake == 0.0);
        let (accel, brake) = throttle_brake(-1000.0);
        assert!(accel == 0.0 && brake > 0.999);
    }

    #[test]
    fn centered_car_on_target_lane_steers_straight() {
        assert_eq!(steer_command(0.0, 0.0, 0.0, FRAC_PI_4), 0.0);
    }

    #[test]
    fn lateral_offset_draws_steer_back_toward_target() {
        // track_pos above the lane target: negative steer pulls the car back.
        let steer = steer_command(0.0, 0.5, 0.0, FRAC_PI_4);
        assert!(steer < 0.0);
        // Biasing the lane target to the car's position removes the pull.
        assert_eq!(steer_command(0.0, 0.5, 0.5, FRAC_PI_4), 0.0);
    }
}
