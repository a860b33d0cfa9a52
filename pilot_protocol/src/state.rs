//! Decoded per-cycle vehicle state.

use crate::error::WireError;
use crate::message::{fill, scalar, segments};

/// Number of track range-finders in a frame.
pub const TRACK_SENSORS: usize = 19;
/// Number of opponent range-finder slots in a frame.
pub const OPPONENT_SLOTS: usize = 36;
/// Wheel count for the spin-velocity vector.
pub const WHEELS: usize = 4;
/// Number of focus beams in a frame.
pub const FOCUS_BEAMS: usize = 5;

/// Plain data holder for one sensor snapshot.
///
/// Overwritten wholesale every cycle by [`CarState::parse`]; the decision core
/// only reads it. Fields a frame does not mention keep their default.
#[derive(Debug, Clone, PartialEq)]
pub struct CarState {
    /// Heading error against the track axis, radians, signed.
    pub angle: f32,
    pub cur_lap_time: f32,
    pub damage: f32,
    pub dist_from_start: f32,
    pub dist_raced: f32,
    pub fuel: f32,
    /// Current gear; 0 is neutral, -1 reverse.
    pub gear: i32,
    pub last_lap_time: f32,
    pub opponents: [f32; OPPONENT_SLOTS],
    pub race_pos: i32,
    pub rpm: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    pub speed_z: f32,
    /// Range-finder distances to the track edge, front-center at index 9.
    pub track: [f32; TRACK_SENSORS],
    /// Lateral offset in half track-widths; |track_pos| > 1 is off the track.
    pub track_pos: f32,
    pub wheel_spin_vel: [f32; WHEELS],
    pub z: f32,
    pub focus: [f32; FOCUS_BEAMS],
}

impl Default for CarState {
    fn default() -> Self {
        Self {
            angle: 0.0,
            cur_lap_time: 0.0,
            damage: 0.0,
            dist_from_start: 0.0,
            dist_raced: 0.0,
            fuel: 0.0,
            gear: 0,
            last_lap_time: 0.0,
            opponents: [0.0; OPPONENT_SLOTS],
            race_pos: 0,
            rpm: 0.0,
            speed_x: 0.0,
            speed_y: 0.0,
            speed_z: 0.0,
            track: [0.0; TRACK_SENSORS],
            track_pos: 0.0,
            wheel_spin_vel: [0.0; WHEELS],
            z: 0.0,
            focus: [0.0; FOCUS_BEAMS],
        }
    }
}

impl CarState {
    /// Decode a sensor frame.
    ///
    /// Unknown segment names are skipped so newer servers can add fields
    /// without breaking the agent; fixed-arity vectors are validated.
    pub fn parse(input: &str) -> Result<Self, WireError> {
        let mut state = Self::default();
        for seg in segments(input) {
            let (key, body) = seg?;
            match key {
                "angle" => state.angle = scalar(key, body)?,
                "curLapTime" => state.cur_lap_time = scalar(key, body)?,
                "damage" => state.damage = scalar(key, body)?,
                "distFromStart" => state.dist_from_start = scalar(key, body)?,
                "distRaced" => state.dist_raced = scalar(key, body)?,
                "fuel" => state.fuel = scalar(key, body)?,
                "gear" => state.gear = scalar(key, body)? as i32,
                "lastLapTime" => state.last_lap_time = scalar(key, body)?,
                "opponents" => fill("opponents", body, &mut state.opponents)?,
                "racePos" => state.race_pos = scalar(key, body)? as i32,
                "rpm" => state.rpm = scalar(key, body)?,
                "speedX" => state.speed_x = scalar(key, body)?,
                "speedY" => state.speed_y = scalar(key, body)?,
                "speedZ" => state.speed_z = scalar(key, body)?,
                "track" => fill("track", body, &mut state.track)?,
                "trackPos" => state.track_pos = scalar(key, body)?,
                "wheelSpinVel" => fill("wheelSpinVel", body, &mut state.wheel_spin_vel)?,
                "z" => state.z = scalar(key, body)?,
                "focus" => fill("focus", body, &mut state.focus)?,
                _ => {}
            }
        }
        Ok(state)
    }
}
