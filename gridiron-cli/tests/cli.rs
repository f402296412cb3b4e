use std::io::Write;
use std::process::{Command, Stdio};

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "gridiron-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn play_with_stdin(args: &[&str], stdin: &str) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_gridiron");
    let mut child = Command::new(exe)
        .args(args)
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn cli");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("run cli")
}

#[test]
fn cli_simulate_writes_json_report() {
    let exe = env!("CARGO_BIN_EXE_gridiron");
    let output_path = temp_path("simulate");
    let status = Command::new(exe)
        .args([
            "--mode",
            "simulate",
            "--seeds",
            "7,GR-BLITZ07",
            "--iterations",
            "2",
            "--strategies",
            "greedy,cautious",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(&output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(report["aggregates"].as_array().map(Vec::len), Some(2));
    // 2 strategies × 2 seeds × 2 iterations × 2 specialties
    assert_eq!(report["drives"].as_array().map(Vec::len), Some(16));
    let _ = std::fs::remove_file(output_path);
}

#[test]
fn cli_simulate_rejects_unknown_strategy() {
    let exe = env!("CARGO_BIN_EXE_gridiron");
    let output = Command::new(exe)
        .args(["--mode", "simulate", "--strategies", "reckless"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown strategy"));
}

#[test]
fn cli_play_abandons_on_blank_choice() {
    let summary_path = temp_path("play");
    let summary_arg = summary_path.to_string_lossy().into_owned();
    let output = play_with_stdin(
        &["--seed", "GR-HUDDLE12", "--output", &summary_arg],
        "Alex\nrunning\n\n",
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Welcome, Alex (running)"));
    assert!(stdout.contains("Game ended by player choice."));
    assert!(stdout.contains("--seed GR-HUDDLE12"));

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary_path).expect("read summary"))
            .expect("valid json");
    assert_eq!(summary["ending"], "abandoned");
    assert_eq!(summary["share_code"], "GR-HUDDLE12");
    let _ = std::fs::remove_file(summary_path);
}

#[test]
fn cli_play_exits_nonzero_on_bad_setup() {
    let output = play_with_stdin(&["--name", "Alex", "--specialty", "kicking"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Setup failed"));
}

#[test]
fn cli_play_finishes_a_full_drive() {
    let output = play_with_stdin(
        &["--seed", "42", "--name", "Sam", "--specialty", "passing"],
        &"2\n".repeat(6),
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("TOUCHDOWN!") || stdout.contains("Game Over!"));
}
