//! Drives a `Driver` over a transport `Link` until the session ends.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use eyre::WrapErr;
use pilot_traits::Link;

use crate::driver::Driver;
use crate::error::{DriverError, Report, Result};
use crate::link_error::map_link_error;
use pilot_protocol::{CarState, ServerEvent, classify};

/// Timeouts and watchdogs.
#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    /// Max wait per inbound frame (ms).
    pub recv_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { recv_ms: 1000 }
    }
}

/// Optional bounds on a run.
#[derive(Default)]
pub struct RunLimits {
    /// Stop after this many decision cycles (scripted and simulated runs).
    pub max_cycles: Option<u64>,
    /// Cooperative stop flag, typically wired to ctrl-c.
    pub stop: Option<Arc<AtomicBool>>,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    /// Server sent the shutdown token.
    Shutdown,
    /// The link reported end of input.
    Closed,
    /// The configured cycle cap was reached.
    CycleLimit,
    /// The stop flag was raised.
    Stopped,
}

#[derive(Debug)]
pub struct RunSummary {
    pub cycles: u64,
    pub recovery_cycles: u64,
    pub restarts: u32,
    pub end: RunEnd,
}

/// Run the cycle loop: send the init frame once, then answer every sensor
/// frame with one command until the session ends.
///
/// Frame-decoding and transport errors bubble as typed errors; lifecycle
/// tokens and the init acknowledgement are handled in place.
pub fn run<L: Link>(
    mut link: L,
    driver: &mut Driver,
    timeouts: Timeouts,
    limits: RunLimits,
) -> Result<RunSummary> {
    let timeout = Duration::from_millis(timeouts.recv_ms);

    link.send(&driver.init_frame())
        .map_err(|e| Report::new(map_link_error(&*e)))
        .wrap_err("sending init frame")?;
    tracing::info!("init frame sent");

    let mut restarts = 0u32;
    let end = loop {
        if let Some(stop) = &limits.stop
            && stop.load(Ordering::Relaxed)
        {
            break RunEnd::Stopped;
        }
        if let Some(max) = limits.max_cycles
            && driver.cycles() >= max
        {
            break RunEnd::CycleLimit;
        }

        let msg = match link.recv(timeout) {
            Ok(msg) => msg,
            Err(e) => {
                let mapped = map_link_error(&*e);
                if matches!(mapped, DriverError::Closed) {
                    break RunEnd::Closed;
                }
                return Err(Report::new(mapped)).wrap_err("receiving frame");
            }
        };

        match classify(&msg) {
            ServerEvent::Shutdown => {
                driver.on_shutdown();
                break RunEnd::Shutdown;
            }
            ServerEvent::Restart => {
                driver.on_restart();
                restarts += 1;
            }
            ServerEvent::Identified => {}
            ServerEvent::Frame(frame) => {
                let state = CarState::parse(frame)
                    .map_err(DriverError::from)
                    .map_err(Report::new)
                    .wrap_err("decoding sensor frame")?;
                let ctrl = driver.drive(&state);
                link.send(&ctrl.encode())
                    .map_err(|e| Report::new(map_link_error(&*e)))
                    .wrap_err("sending command")?;
            }
        }
    };

    let summary = RunSummary {
        cycles: driver.cycles(),
        recovery_cycles: driver.recovery_cycles(),
        restarts,
        end,
    };
    tracing::info!(
        cycles = summary.cycles,
        recovery_cycles = summary.recovery_cycles,
        restarts = summary.restarts,
        end = ?summary.end,
        "run finished"
    );
    Ok(summary)
}
