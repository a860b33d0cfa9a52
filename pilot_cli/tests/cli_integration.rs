use assert_cmd::Command;
use predicates::prelude::*;
use rstest::rstest;
use std::io::Write as _;

fn frame(track_pos: f32) -> String {
    let track = vec!["200"; 19].join(" ");
    format!("(angle 0)(gear 1)(rpm 3000)(speedX 10)(trackPos {track_pos})(track {track})")
}

fn write_script(lines: &[String]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp script");
    for line in lines {
        writeln!(file, "{line}").expect("write frame");
    }
    file
}

#[test]
fn self_check_passes() {
    Command::cargo_bin("pilot")
        .unwrap()
        .args(["self-check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("self-check ok"));
}

#[test]
fn check_config_reports_defaults_without_a_file() {
    Command::cargo_bin("pilot")
        .unwrap()
        .args(["--config", "/nonexistent/pilot.toml", "check-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config ok"));
}

#[test]
fn check_config_rejects_bad_thresholds() {
    let mut cfg = tempfile::NamedTempFile::new().unwrap();
    writeln!(cfg, "[speed]\nfar_clearance = 10.0").unwrap();

    Command::cargo_bin("pilot")
        .unwrap()
        .args(["--config", cfg.path().to_str().unwrap(), "check-config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("far_clearance"));
}

#[test]
fn scripted_drive_prints_a_summary() {
    let mut lines: Vec<String> = (0..4).map(|_| frame(0.0)).collect();
    lines.push("***shutdown***".to_string());
    let script = write_script(&lines);

    Command::cargo_bin("pilot")
        .unwrap()
        .args([
            "--config",
            "/nonexistent/pilot.toml",
            "drive",
            "--script",
            script.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Shutdown"))
        .stdout(predicate::str::contains("4 cycles"));
}

#[test]
fn scripted_drive_emits_json_summary() {
    let lines: Vec<String> = (0..3).map(|_| frame(0.0)).collect();
    let script = write_script(&lines);

    let output = Command::cargo_bin("pilot")
        .unwrap()
        .args([
            "--config",
            "/nonexistent/pilot.toml",
            "--json",
            "drive",
            "--script",
            script.path().to_str().unwrap(),
        ])
        .output()
        .expect("run pilot");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(stdout.lines().last().unwrap()).expect("summary is JSON");
    assert_eq!(json["cycles"], 3);
    assert_eq!(json["end"], "Closed");
}

#[test]
fn simulated_drive_respects_cycle_cap() {
    Command::cargo_bin("pilot")
        .unwrap()
        .args([
            "--config",
            "/nonexistent/pilot.toml",
            "drive",
            "--cycles",
            "50",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("50 cycles"));
}

#[rstest]
#[case(&["--lanes", "forward,sideways"], "sideways")]
#[case(&["--stage", "grandprix"], "grandprix")]
#[case(&["--lanes", "forward", "--lane", "3"], "out of range")]
fn invalid_overrides_fail(#[case] args: &[&str], #[case] needle: &str) {
    Command::cargo_bin("pilot")
        .unwrap()
        .args(["--config", "/nonexistent/pilot.toml", "drive"])
        .args(args)
        .assert()
        .failure()
        .stderr(predicate::str::contains(needle));
}

#[test]
fn malformed_script_frame_is_a_protocol_error() {
    let lines = vec![frame(0.0), "(track 1 2 3)".to_string()];
    let script = write_script(&lines);

    Command::cargo_bin("pilot")
        .unwrap()
        .args([
            "--config",
            "/nonexistent/pilot.toml",
            "drive",
            "--script",
            script.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("decode"));
}
