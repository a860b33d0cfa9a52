#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Wire codec for the race-server protocol.
//!
//! Messages are flat lists of parenthesized segments, `(name v v …)`. This
//! crate decodes a sensor frame into [`CarState`], encodes a [`Control`] back
//! into a command frame, and recognizes the out-of-band lifecycle tokens the
//! server interleaves with frames.
//!
//! Clamping happens here, not in the decision core: the core's contract is to
//! compute the ideal actuator values, and this boundary brings them into the
//! range the vehicle accepts before they hit the wire.

pub mod command;
pub mod error;
pub mod message;
pub mod state;

pub use command::{Control, GEAR_MAX, GEAR_MIN};
pub use error::WireError;
pub use message::{IDENTIFIED, RESTART, SHUTDOWN, ServerEvent, classify, init_frame};
pub use state::{CarState, FOCUS_BEAMS, OPPONENT_SLOTS, TRACK_SENSORS, WHEELS};
