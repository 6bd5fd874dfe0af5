use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn temp_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "goons-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn run(mod_dir: &Path, args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_goons-host");
    Command::new(exe)
        .arg("--mod-dir")
        .arg(mod_dir)
        .args(args)
        .output()
        .expect("run cli")
}

#[test]
fn cli_init_writes_default_configs() {
    let dir = temp_path("init");
    let output = run(&dir, &["init"]);
    assert!(output.status.success());
    let config = std::fs::read_to_string(dir.join("config/config.json")).expect("read config");
    assert!(config.contains("\"rotationIntervalMinutes\": 180"));
    let maps = std::fs::read_to_string(dir.join("config/mapConfig.json")).expect("read maps");
    assert!(maps.contains("\"bigmap\": true"));

    let again = run(&dir, &["init"]);
    assert!(String::from_utf8_lossy(&again.stdout).contains("Keeping"));
}

#[test]
fn cli_match_end_persists_first_rotation() {
    let dir = temp_path("match-end");
    assert!(run(&dir, &["init"]).status.success());
    let output = run(&dir, &["--seed", "7", "--now", "1000", "match-end"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rotated"));

    let record: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.join("db/rotationData.json")).expect("read record"),
    )
    .expect("parse record");
    assert_eq!(record["lastUpdateTime"], serde_json::Value::Null);
    assert_eq!(record["lastUpdateAt"], 1000);
    assert_eq!(record["nextUpdateAt"], 1000 + 180 * 60_000);
    assert_ne!(record["selectedLocation"], "bigmap");
}

#[test]
fn cli_chat_answers_rotation_question() {
    let dir = temp_path("chat");
    let output = run(&dir, &["chat", "goons rotation"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Goons Tracker:"));
    assert!(stdout.contains("chance of them switching to a new map increases"));
}

#[test]
fn cli_status_without_record_fails() {
    let dir = temp_path("status");
    let output = run(&dir, &["status"]);
    assert!(!output.status.success());
}
