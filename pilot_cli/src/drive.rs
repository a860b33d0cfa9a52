//! Run orchestration: config mapping, link assembly, and the drive loop.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use eyre::WrapErr;
use pilot_core::error::Result as CoreResult;
use pilot_core::{Driver, RunLimits, RunSummary, Timeouts};
use pilot_link::{ScriptedLink, SimulatedTrack};

/// Cycle cap applied to simulator runs when the user gives none; keeps an
/// unattended `pilot drive` from spinning forever.
const DEFAULT_SIM_CYCLES: u64 = 2_000;

pub struct DriveArgs {
    pub script: Option<PathBuf>,
    pub cycles: Option<u64>,
    pub stage: Option<String>,
    pub lanes: Option<String>,
    pub lane: Option<usize>,
    pub seed: Option<u64>,
}

/// Apply CLI overrides onto the loaded config, then re-validate.
pub fn apply_overrides(cfg: &mut pilot_config::Config, args: &DriveArgs) -> CoreResult<()> {
    if let Some(stage) = &args.stage {
        cfg.race.stage = stage.parse().wrap_err("parsing --stage")?;
    }
    if let Some(lanes) = &args.lanes {
        cfg.race.lanes = lanes.clone();
    }
    if let Some(lane) = args.lane {
        cfg.race.lane = lane;
    }
    if let Some(seed) = args.seed {
        cfg.race.seed = seed;
    }
    cfg.validate()
}

/// Build the driver, pick the link, and run until the session ends.
pub fn run_drive(
    cfg: &pilot_config::Config,
    args: &DriveArgs,
    stop: Arc<AtomicBool>,
) -> CoreResult<RunSummary> {
    let mut driver = Driver::from_config(cfg)?;
    tracing::info!(
        stage = ?cfg.race.stage,
        lanes = %cfg.race.lanes,
        lane = cfg.race.lane,
        seed = cfg.race.seed,
        "agent configured"
    );

    let timeouts = Timeouts::default();

    if let Some(path) = &args.script {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading frame script {path:?}"))?;
        let frames: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect();
        if frames.is_empty() {
            eyre::bail!("frame script {path:?} contains no frames");
        }
        tracing::info!(frames = frames.len(), "scripted run");
        let limits = RunLimits {
            max_cycles: args.cycles,
            stop: Some(stop),
        };
        pilot_core::run(ScriptedLink::new(frames), &mut driver, timeouts, limits)
    } else {
        let limits = RunLimits {
            max_cycles: Some(args.cycles.unwrap_or(DEFAULT_SIM_CYCLES)),
            stop: Some(stop),
        };
        tracing::info!("simulated run");
        pilot_core::run(SimulatedTrack::new(), &mut driver, timeouts, limits)
    }
}

/// Codec and simulator round trip used by `self-check`.
pub fn self_check() -> CoreResult<()> {
    use pilot_protocol::CarState;
    use pilot_traits::Link;
    use std::time::Duration;

    let driver = Driver::builder().build()?;
    let init = driver.init_frame();
    if !init.starts_with("(init ") {
        eyre::bail!("init frame malformed: {init}");
    }

    let mut sim = SimulatedTrack::new();
    sim.send("(accel 1)(brake 0)(gear 1)(steer 0)")
        .map_err(|e| eyre::eyre!("sim send: {e}"))?;
    let frame = sim
        .recv(Duration::from_millis(10))
        .map_err(|e| eyre::eyre!("sim recv: {e}"))?;
    CarState::parse(&frame).wrap_err("decoding simulator frame")?;
    Ok(())
}
