use assert_cmd::Command;

#[test]
fn config_prints_summary_lines() {
    let assert = Command::cargo_bin("shelf-cli")
        .unwrap()
        .arg("config")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("listen:"));
    assert!(stdout.contains("environment:"));
}

#[test]
fn config_json_is_parseable() {
    let assert = Command::cargo_bin("shelf-cli")
        .unwrap()
        .args(["config", "--json"])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert!(value["server"]["port"].is_number());
    assert!(value["telemetry"]["log_format"].is_string());
}
