use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "2"])
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert!(v["winner"].is_string());
    assert_eq!(v["rules"]["adjacency"], serde_json::Value::Bool(true));
}

#[test]
fn watch_command_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_broadside"))
        .args(["watch", "--seed", "7", "--fleet", "3,2"])
        .output()
        .expect("failed to run broadside binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    assert!(stdout.contains("wins!"));
}

#[test]
fn play_command_fails_when_input_closes() {
    let output = Command::new(env!("CARGO_BIN_EXE_broadside"))
        .args(["play", "--seed", "7"])
        .stdin(std::process::Stdio::null())
        .output()
        .expect("failed to run broadside binary");
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("non utf8 output");
    assert!(stderr.contains("input closed"));
}
