//! Actuator command container and its wire encoding.

use std::fmt::Write as _;

/// Lowest gear the vehicle accepts (reverse).
pub const GEAR_MIN: i32 = -1;
/// Highest gear the vehicle accepts.
pub const GEAR_MAX: i32 = 6;

/// Plain data holder for one actuator command.
///
/// The decision core fills this with ideal values; `steer` and `gear` may land
/// outside the legal actuator range and are clamped by [`Control::encode`]
/// before transmission.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Control {
    pub accel: f32,
    pub brake: f32,
    pub gear: i32,
    pub steer: f32,
    pub clutch: f32,
    pub focus: i32,
    pub meta: i32,
}

impl Control {
    /// Encode as a command frame, clamping every actuator to its legal range.
    pub fn encode(&self) -> String {
        let accel = self.accel.clamp(0.0, 1.0);
        let brake = self.brake.clamp(0.0, 1.0);
        let steer = self.steer.clamp(-1.0, 1.0);
        let clutch = self.clutch.clamp(0.0, 1.0);
        let gear = self.gear.clamp(GEAR_MIN, GEAR_MAX);

        let mut out = String::with_capacity(96);
        let _ = write!(
            out,
            "(accel {accel})(brake {brake})(gear {gear})(steer {steer})(clutch {clutch})(focus {})(meta {})",
            self.focus, self.meta
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_clamps_out_of_range_actuators() {
        let ctrl = Control {
            accel: 1.7,
            brake: -0.2,
            gear: 9,
            steer: -3.4,
            ..Control::default()
        };
        let wire = ctrl.encode();
        assert!(wire.contains("(accel 1)"), "{wire}");
        assert!(wire.contains("(brake 0)"), "{wire}");
        assert!(wire.contains("(gear 6)"), "{wire}");
        assert!(wire.contains("(steer -1)"), "{wire}");
    }

    #[test]
    fn encode_passes_legal_values_through() {
        let ctrl = Control {
            accel: 0.3,
            gear: -1,
            steer: 0.25,
            ..Control::default()
        };
        let wire = ctrl.encode();
        assert!(wire.contains("(accel 0.3)"), "{wire}");
        assert!(wire.contains("(gear -1)"), "{wire}");
        assert!(wire.contains("(steer 0.25)"), "{wire}");
        assert!(wire.contains("(clutch 0)(focus 0)(meta 0)"), "{wire}");
    }
}
