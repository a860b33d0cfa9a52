#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core decision logic for the driving agent (transport-agnostic).
//!
//! One decision per inbound sensor snapshot, no I/O in the decision path.
//! All transport goes through `pilot_traits::Link`, all wire syntax through
//! `pilot_protocol`.
//!
//! ## Architecture
//!
//! - **Geometry**: sensor angle table + three-point turn-radius fit
//!   (`geometry` module)
//! - **Speed**: far/approach/curvature target-speed policy (`speed`)
//! - **Actuation**: sigmoid throttle/brake split and steering law
//!   (`actuation`)
//! - **Gearbox**: engine-speed-trend shift hysteresis (`gearbox`)
//! - **Recovery**: timed stuck/recovery state machine (`recovery`)
//! - **Driver**: the cycle controller owning all carried state (`driver`)
//! - **Runner**: the recv → decide → send loop over a `Link` (`runner`)
//!
//! The decision path is infallible: every snapshot yields a command. Errors
//! are confined to the transport/codec boundary and to construction
//! (`error`, `link_error`).

pub mod actuation;
pub mod config;
mod conversions;
pub mod driver;
pub mod error;
pub mod gearbox;
pub mod geometry;
pub mod link_error;
pub mod mocks;
pub mod recovery;
pub mod runner;
pub mod speed;

pub use config::{GearboxCfg, RecoveryCfg, SpeedCfg, SteeringCfg};
pub use driver::{Driver, DriverBuilder};
pub use error::{BuildError, DriverError, Result};
pub use recovery::RecoverySupervisor;
pub use runner::{RunEnd, RunLimits, RunSummary, Timeouts, run};
