
use serial_test::serial;
use tempfile::tempdir;
use test_helpers::base_echo_command;

/// Tests that JSON logs go to stderr, one object per line, inside the root span,
/// while stdout carries only the command's result.
#[test]
#[serial]
fn test_json_logs_stay_on_stderr() {
    let temp = tempdir().unwrap();
    let output = base_echo_command(temp.path())
        .args(["--log-format", "json", "-v", "moon", "--date", "2000-01-21", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["phase"], "FULL");

    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    assert!(!lines.is_empty(), "expected log output on stderr");

    for line in &lines {
        let record: serde_json::Value = serde_json::from_str(line)
            .unwrap_or_else(|e| panic!("log line is not JSON ({}): {}", e, line));
        assert!(record.get("level").is_some(), "missing level: {}", line);
    }

    let completed = lines
        .iter()
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
        .find(|r| r["fields"]["message"] == "Command completed")
        .expect("completion log line");
    assert_eq!(completed["span"]["name"], "app_invocation");
    assert_eq!(completed["span"]["service"], "echo-journal");
}

/// Tests that debug records only appear with --verbose.
#[test]
#[serial]
fn test_verbose_enables_debug_records() {
    let temp = tempdir().unwrap();

    let quiet = base_echo_command(temp.path())
        .args(["deck"])
        .output()
        .unwrap();
    let quiet_stderr = String::from_utf8_lossy(&quiet.stderr);
    assert!(quiet_stderr.contains("Command completed"));
    assert!(!quiet_stderr.contains("DEBUG"));

    let verbose = base_echo_command(temp.path())
        .args(["-v", "deck"])
        .output()
        .unwrap();
    let verbose_stderr = String::from_utf8_lossy(&verbose.stderr);
    assert!(verbose_stderr.contains("DEBUG"));
    assert!(verbose_stderr.contains("Card store not configured"));
}

/// Tests that secrets never reach the logs.
#[test]
#[serial]
fn test_api_key_is_redacted_in_logs() {
    let temp = tempdir().unwrap();
    let output = base_echo_command(temp.path())
        .env("ECHO_GEMINI_API_KEY", "super-secret-key")
        .args(["-v", "moon"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration"));
    assert!(!stderr.contains("super-secret-key"));
}
