pub mod error;

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pilot_protocol::{TRACK_SENSORS, message};
use pilot_traits::Link;

pub use error::LinkError;

/// Plays back a fixed sequence of inbound messages and records everything the
/// agent sends. Returns [`LinkError::Closed`] once the script is exhausted.
pub struct ScriptedLink {
    inbound: VecDeque<String>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLink {
    pub fn new(inbound: impl IntoIterator<Item = String>) -> Self {
        Self {
            inbound: inbound.into_iter().collect(),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle onto the outbound log; usable after the runner has
    /// consumed the link itself.
    pub fn sent_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.sent)
    }
}

impl Link for ScriptedLink {
    fn recv(
        &mut self,
        _timeout: Duration,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        match self.inbound.pop_front() {
            Some(msg) => Ok(msg),
            None => Err(Box::new(LinkError::Closed)),
        }
    }

    fn send(&mut self, msg: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Ok(mut log) = self.sent.lock() {
            log.push(msg.to_string());
        }
        Ok(())
    }
}

/// Last actuator command the simulated track saw.
#[derive(Debug, Clone, Copy, Default)]
struct LastCommand {
    accel: f32,
    brake: f32,
    steer: f32,
    gear: i32,
}

/// A closed-loop stand-in for the race server: synthesizes sensor frames from
/// a toy longitudinal/lateral model driven by the agent's own commands.
///
/// The track is a repeating pattern of one long straight followed by one
/// corner, enough to exercise the flat-out, approach, and curvature branches
/// of the speed policy without any networking.
pub struct SimulatedTrack {
    dist: f32,
    speed_x: f32,
    track_pos: f32,
    angle: f32,
    last: LastCommand,
    ticks: u64,
}

// Geometry of the repeating straight/corner pattern, in track distance units.
const PATTERN_LEN: f32 = 500.0;
const STRAIGHT_LEN: f32 = 360.0;
const CORNER_CLEARANCE: f32 = 40.0;

impl Default for SimulatedTrack {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedTrack {
    pub fn new() -> Self {
        Self {
            dist: 0.0,
            speed_x: 0.0,
            track_pos: 0.0,
            angle: 0.0,
            last: LastCommand::default(),
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn advance(&mut self) {
        // Longitudinal: crude first-order response to throttle/brake plus drag.
        self.speed_x += 3.0 * self.last.accel - 6.0 * self.last.brake - 0.02 * self.speed_x;
        self.speed_x = self.speed_x.max(0.0);
        // Lateral: steering nudges the car across the track.
        self.track_pos += 0.05 * self.last.steer;
        self.angle *= 0.9;
        self.dist += self.speed_x * 0.02;
        self.ticks += 1;
    }

    fn render_frame(&self) -> String {
        let along = self.dist % PATTERN_LEN;
        let mut track = [10.0_f32; TRACK_SENSORS];
        if along < STRAIGHT_LEN {
            // Clearance shrinks toward the corner entry; side-of-center
            // sensors read slightly shorter, as on a real straight.
            let ahead = (STRAIGHT_LEN - along).min(200.0);
            track[8] = ahead * 0.97;
            track[9] = ahead;
            track[10] = ahead * 0.97;
        } else {
            // In the corner: a non-collinear triple so the circle fit lands
            // on a moderate radius.
            track[8] = CORNER_CLEARANCE * 0.9;
            track[9] = CORNER_CLEARANCE;
            track[10] = CORNER_CLEARANCE * 0.8;
        }

        let gear = self.last.gear.max(1);
        let rpm = 900.0 + self.speed_x * 320.0 / gear as f32;

        let mut frame = String::with_capacity(256);
        let _ = write!(
            frame,
            "(angle {})(gear {})(rpm {})(speedX {})(trackPos {})(track",
            self.angle, self.last.gear, rpm, self.speed_x, self.track_pos
        );
        for d in &track {
            let _ = write!(frame, " {d}");
        }
        frame.push(')');
        frame
    }
}

impl Link for SimulatedTrack {
    fn recv(
        &mut self,
        _timeout: Duration,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.advance();
        let frame = self.render_frame();
        tracing::trace!(tick = self.ticks, speed_x = self.speed_x, "sim frame");
        Ok(frame)
    }

    fn send(&mut self, msg: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        for seg in message::segments(msg) {
            let Ok((key, body)) = seg else { continue };
            let Ok(value) = message::scalar(key, body) else {
                continue;
            };
            match key {
                "accel" => self.last.accel = value,
                "brake" => self.last.brake = value,
                "steer" => self.last.steer = value,
                "gear" => self.last.gear = value as i32,
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pilot_protocol::CarState;

    #[test]
    fn scripted_link_plays_back_and_records() {
        let mut link = ScriptedLink::new(["(gear 1)".to_string()]);
        let log = link.sent_log();
        assert_eq!(link.recv(Duration::from_millis(1)).unwrap(), "(gear 1)");
        link.send("(accel 1)").unwrap();
        assert!(link.recv(Duration::from_millis(1)).is_err());
        assert_eq!(log.lock().unwrap().as_slice(), ["(accel 1)".to_string()]);
    }

    #[test]
    fn simulated_frames_decode() {
        let mut sim = SimulatedTrack::new();
        sim.send("(accel 1)(brake 0)(gear 1)(steer 0)").unwrap();
        let frame = sim.recv(Duration::from_millis(1)).unwrap();
        let state = CarState::parse(&frame).expect("own frame decodes");
        assert!(state.speed_x > 0.0, "throttle should move the car");
    }
}
