//! Human-readable error descriptions and structured JSON error formatting.

use pilot_core::error::{BuildError, DriverError};

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. `pilot check-config` prints the parsed values."
            ),
        };
    }

    if let Some(de) = err.downcast_ref::<DriverError>() {
        return match de {
            DriverError::Timeout => {
                "What happened: No sensor frame arrived within the receive timeout.\nLikely causes: The link stalled or the script/simulator stopped producing frames.\nHow to fix: Check the frame source; rerun with --log-level=debug for the cycle trace.".to_string()
            }
            DriverError::Closed => {
                "What happened: The link closed before the run finished.\nLikely causes: Frame script exhausted without a shutdown token.\nHow to fix: End recorded scripts with ***shutdown*** or pass --cycles to bound the run.".to_string()
            }
            DriverError::Protocol(we) => format!(
                "What happened: A sensor frame failed to decode ({we}).\nLikely causes: Truncated or hand-edited frame data.\nHow to fix: Re-record the script, or check the offending line."
            ),
            other => format!(
                "What happened: {other}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    // Generic fallback
    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes per error class; unknown errors return 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if err.downcast_ref::<BuildError>().is_some() {
        return 2;
    }
    match err.downcast_ref::<DriverError>() {
        Some(DriverError::Timeout) => 3,
        Some(DriverError::Closed) => 4,
        Some(DriverError::Protocol(_)) => 5,
        Some(DriverError::Link(_)) => 6,
        None => 1,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = if err.downcast_ref::<BuildError>().is_some() {
        "InvalidConfig"
    } else {
        match err.downcast_ref::<DriverError>() {
            Some(DriverError::Timeout) => "Timeout",
            Some(DriverError::Closed) => "LinkClosed",
            Some(DriverError::Protocol(_)) => "Protocol",
            Some(DriverError::Link(_)) => "Link",
            None => "Error",
        }
    };
    json!({ "reason": reason, "message": humanize(err) }).to_string()
}
