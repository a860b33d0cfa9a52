//! `pilot` binary: config loading, logging setup, and command dispatch.

mod cli;
mod drive;
mod error_fmt;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use crate::drive::{DriveArgs, apply_overrides, run_drive, self_check};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(err) = run(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&err));
        } else {
            eprintln!("{}", humanize(&err));
        }
        std::process::exit(exit_code_for_error(&err));
    }
}

fn run(cli: Cli) -> eyre::Result<()> {
    color_eyre::install()?;

    let cfg = load_config(&cli)?;
    init_tracing(&cli, &cfg.logging)?;

    match cli.cmd {
        Commands::Drive {
            script,
            cycles,
            stage,
            lanes,
            lane,
            seed,
        } => {
            let mut cfg = cfg;
            let args = DriveArgs {
                script,
                cycles,
                stage,
                lanes,
                lane,
                seed,
            };
            apply_overrides(&mut cfg, &args)?;

            let stop = Arc::new(AtomicBool::new(false));
            let stop_handler = Arc::clone(&stop);
            ctrlc::set_handler(move || {
                stop_handler.store(true, Ordering::Relaxed);
            })
            .wrap_err("installing ctrl-c handler")?;

            let summary = run_drive(&cfg, &args, stop)?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "cycles": summary.cycles,
                        "recovery_cycles": summary.recovery_cycles,
                        "restarts": summary.restarts,
                        "end": format!("{:?}", summary.end),
                    })
                );
            } else {
                println!(
                    "run ended ({:?}): {} cycles, {} in recovery, {} restarts",
                    summary.end, summary.cycles, summary.recovery_cycles, summary.restarts
                );
            }
            Ok(())
        }
        Commands::CheckConfig => {
            cfg.validate()?;
            let lane_target = cfg.race.lane_target()?;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "stage": format!("{:?}", cfg.race.stage),
                        "lanes": cfg.race.lanes,
                        "lane_target": lane_target,
                        "max_speed": cfg.speed.max_speed,
                        "steer_lock_rad": cfg.steering.steer_lock_rad,
                    })
                );
            } else {
                println!("config ok");
                println!("  stage        {:?}", cfg.race.stage);
                println!("  lanes        {} (target {lane_target})", cfg.race.lanes);
                println!("  max speed    {}", cfg.speed.max_speed);
                println!("  steer lock   {} rad", cfg.steering.steer_lock_rad);
            }
            Ok(())
        }
        Commands::SelfCheck => {
            self_check()?;
            println!("self-check ok");
            Ok(())
        }
    }
}

/// Load the TOML config; an absent file falls back to built-in defaults.
fn load_config(cli: &Cli) -> eyre::Result<pilot_config::Config> {
    if cli.config.exists() {
        let text = std::fs::read_to_string(&cli.config)
            .wrap_err_with(|| format!("reading config {:?}", cli.config))?;
        let cfg = toml::from_str::<pilot_config::Config>(&text)
            .map_err(|e| eyre::eyre!("parsing config {:?}: {e}", cli.config))?;
        cfg.validate()?;
        Ok(cfg)
    } else {
        Ok(pilot_config::Config::default())
    }
}

/// Console subscriber from CLI flags, plus an optional JSON-lines file
/// appender from the config's logging section.
fn init_tracing(cli: &Cli, logging: &pilot_config::Logging) -> eyre::Result<()> {
    let level = logging.level.as_deref().unwrap_or(&cli.log_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.file {
        let path = std::path::Path::new(path);
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let name = path.file_name().unwrap_or_else(|| "pilot.log".as_ref());
        let appender = match logging.rotation.as_deref() {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            Some("hourly") => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(writer)
            .init();
    } else if cli.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
