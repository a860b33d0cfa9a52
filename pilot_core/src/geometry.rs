//! Range-finder geometry: the fixed angle table and turn-radius estimation.

use pilot_protocol::TRACK_SENSORS;

/// Index of the straight-ahead range-finder.
pub const CENTER: usize = 9;

/// The 19 range-finder angles in degrees, symmetric about the forward axis
/// and denser near the center. Computed once at startup; the same table is
/// transmitted to the simulator as the requested sensor layout.
pub fn sensor_angles() -> [f32; TRACK_SENSORS] {
    let mut angles = [0.0_f32; TRACK_SENSORS];
    // Outer sweep: ±90° down to ±30° in 15° steps.
    for i in 0..5 {
        angles[i] = -90.0 + i as f32 * 15.0;
        angles[TRACK_SENSORS - 1 - i] = 90.0 - i as f32 * 15.0;
    }
    // Inner sweep: ±20° down to ±5° in 5° steps; index 9 stays 0°.
    for i in 5..9 {
        angles[i] = -20.0 + (i - 5) as f32 * 5.0;
        angles[TRACK_SENSORS - 1 - i] = 20.0 - (i - 5) as f32 * 5.0;
    }
    angles
}

/// The three centered samples (just-left, straight-ahead, just-right) used
/// for curvature estimation, as `(angle_deg, distance)` pairs.
pub fn forward_samples(
    angles: &[f32; TRACK_SENSORS],
    track: &[f32; TRACK_SENSORS],
) -> [(f32, f32); 3] {
    [
        (angles[CENTER - 1], track[CENTER - 1]),
        (angles[CENTER], track[CENTER]),
        (angles[CENTER + 1], track[CENTER + 1]),
    ]
}

/// Estimate the radius of the circular arc through three range-finder
/// samples, each given as `(angle_deg, distance)` in the car's local frame.
///
/// Fits the unique circle via the perpendicular bisectors of the two chords.
/// Collinear or otherwise degenerate samples make the closed form blow up;
/// those cases come back as `None` and the caller must fall back rather than
/// feed a non-finite radius into the actuator path.
pub fn turn_radius(samples: [(f32, f32); 3]) -> Option<f32> {
    let [p1, p2, p3] = samples.map(|(deg, dist)| {
        let rad = deg.to_radians();
        (rad.cos() * dist, rad.sin() * dist)
    });

    let slope_12 = (p2.1 - p1.1) / (p2.0 - p1.0);
    let slope_23 = (p3.1 - p2.1) / (p3.0 - p2.0);

    let x_center = (slope_12 * slope_23 * (p1.1 - p3.1) + slope_23 * (p1.0 + p2.0)
        - slope_12 * (p2.0 + p3.0))
        / (2.0 * (slope_23 - slope_12));
    let y_center = -(x_center - (p1.0 + p2.0) / 2.0) / slope_12 + (p1.1 + p2.1) / 2.0;

    let radius = ((x_center - p1.0).powi(2) + (y_center - p1.1).powi(2)).sqrt();
    radius.is_finite().then_some(radius)
}
