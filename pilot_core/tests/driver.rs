use pilot_core::{Driver, SpeedCfg};
use pilot_protocol::CarState;

/// Snapshot builder: straight, centered, on-track unless overridden.
fn snapshot(speed_x: f32, rpm: f32, gear: i32, ahead: f32) -> CarState {
    let mut state = CarState {
        speed_x,
        rpm,
        gear,
        ..CarState::default()
    };
    // A gentle arc around the forward sensors so the circle fit stays finite.
    state.track = [ahead * 0.9; 19];
    state.track[8] = ahead * 0.97;
    state.track[9] = ahead;
    state.track[10] = ahead * 0.96;
    state
}

#[test]
fn straight_with_far_clearance_goes_flat_out() {
    let mut driver = Driver::builder().build().expect("build driver");
    let state = snapshot(50.0, 6000.0, 2, 200.0);

    let ctrl = driver.drive(&state);

    assert_eq!(driver.last_target_speed(), Some(200.0));
    assert!(ctrl.steer.abs() < 1e-6, "steer {}", ctrl.steer);
    assert!(ctrl.accel > 0.0);
    assert_eq!(ctrl.brake, 0.0);
    // First cycle counts as rising, but 6000 rpm is under the shift point.
    assert_eq!(ctrl.gear, 2);
}

#[test]
fn overspeed_inside_approach_band_brakes() {
    let mut driver = Driver::builder().build().expect("build driver");
    // Clearance 100 selects the damping branch: target = 200 - 180 = 20,
    // far below the current speed.
    let ctrl = driver.drive(&snapshot(180.0, 6000.0, 4, 100.0));

    assert_eq!(driver.last_target_speed(), Some(20.0));
    assert_eq!(ctrl.accel, 0.0);
    assert!(ctrl.brake > 0.9, "brake {}", ctrl.brake);
}

#[test]
fn degenerate_sensors_near_corner_fall_back_to_taper() {
    let mut driver = Driver::builder().build().expect("build driver");
    let mut state = snapshot(30.0, 6000.0, 3, 40.0);
    // All three forward samples at zero distance collapse the circle fit;
    // the planner must use max_speed - speed_x instead of the radius.
    state.track[8] = 0.0;
    state.track[9] = 0.0;
    state.track[10] = 0.0;

    let ctrl = driver.drive(&state);

    let target = driver.last_target_speed().expect("normal cycle");
    assert!((target - 170.0).abs() < 1.0, "target {target}");
    assert!(ctrl.accel > 0.9, "accel {}", ctrl.accel);
    assert_eq!(ctrl.brake, 0.0);
}

#[test]
fn lane_bias_pulls_steering_toward_the_lane() {
    let mut left = Driver::builder()
        .with_lane_target(-0.5)
        .build()
        .expect("build driver");
    let mut centered = Driver::builder().build().expect("build driver");

    let state = snapshot(50.0, 6000.0, 2, 200.0);
    let biased = left.drive(&state).steer;
    let neutral = centered.drive(&state).steer;

    // Car sits on the centerline; the lane bias must skew the steering
    // command toward the target side.
    assert!(biased < neutral, "biased {biased}, neutral {neutral}");
}

#[test]
fn rpm_trend_carries_across_cycles() {
    let mut driver = Driver::builder().build().expect("build driver");
    // First cycle at high rpm: no previous sample, treated as rising -> up.
    let ctrl = driver.drive(&snapshot(50.0, 7500.0, 3, 200.0));
    assert_eq!(ctrl.gear, 4);
    // Second cycle falling to 7200: no downshift, hold.
    let ctrl = driver.drive(&snapshot(50.0, 7200.0, 3, 200.0));
    assert_eq!(ctrl.gear, 3);
    // Third cycle rising through the shift point again: up.
    let ctrl = driver.drive(&snapshot(50.0, 7600.0, 3, 200.0));
    assert_eq!(ctrl.gear, 4);
}

#[test]
fn restart_clears_the_rpm_trend() {
    let mut driver = Driver::builder().build().expect("build driver");
    let _ = driver.drive(&snapshot(50.0, 7500.0, 3, 200.0));
    driver.on_restart();
    // Without the reset this would be a falling sample and hold; after it,
    // the first cycle defaults to rising and 7200 clears the shift point.
    let ctrl = driver.drive(&snapshot(50.0, 7200.0, 3, 200.0));
    assert_eq!(ctrl.gear, 4);
}

#[test]
fn builder_rejects_inverted_thresholds() {
    let err = Driver::builder()
        .with_speed(SpeedCfg {
            max_speed: 200.0,
            far_clearance: 60.0,
            corner_clearance: 70.0,
        })
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("invalid config"), "{err}");
}

#[test]
fn init_frame_carries_all_nineteen_angles() {
    let driver = Driver::builder().build().expect("build driver");
    let init = driver.init_frame();
    assert!(init.starts_with("(init -90 "), "{init}");
    assert!(init.ends_with(" 90)"), "{init}");
    assert_eq!(init.split_whitespace().count(), 20, "{init}");
}
