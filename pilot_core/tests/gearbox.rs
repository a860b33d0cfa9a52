use pilot_core::GearboxCfg;
use pilot_core::gearbox::select_gear;
use rstest::rstest;

// Shift table over (previous rpm, current rpm, current gear) -> expected gear.
#[rstest]
// Falling from 7500 to 7200 stays above the downshift point: hold.
#[case(Some(7500.0), 7200.0, 3, 3)]
// Rising through the upshift point: up.
#[case(Some(6500.0), 7100.0, 3, 4)]
// Falling under the downshift point: down.
#[case(Some(3200.0), 2900.0, 4, 3)]
// Rising but still under the upshift point: hold.
#[case(Some(4000.0), 5000.0, 2, 2)]
// Flat rpm counts as falling (no strict rise), above downshift: hold.
#[case(Some(5000.0), 5000.0, 2, 2)]
// First cycle has no trend and defaults to rising.
#[case(None, 7200.0, 1, 2)]
#[case(None, 2500.0, 1, 1)]
// Neutral and reverse are not special-cased by the selector.
#[case(Some(3200.0), 2000.0, 0, -1)]
fn shift_table(
    #[case] prev_rpm: Option<f32>,
    #[case] rpm: f32,
    #[case] gear: i32,
    #[case] expected: i32,
) {
    let cfg = GearboxCfg::default();
    assert_eq!(select_gear(prev_rpm, rpm, gear, &cfg), expected);
}

#[rstest]
fn custom_shift_points_are_respected() {
    let cfg = GearboxCfg {
        upshift_rpm: 6000.0,
        downshift_rpm: 2500.0,
    };
    assert_eq!(select_gear(Some(5500.0), 6100.0, 2, &cfg), 3);
    assert_eq!(select_gear(Some(2600.0), 2400.0, 2, &cfg), 1);
}
