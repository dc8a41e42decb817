use std::process::Command;

/// Runs the binary from an empty directory with an empty XDG config, so no `.env` or
/// `config.toml` leaks in.
fn run_toolrouter(args: &[&str]) -> std::process::Output {
    let dir = tempfile::tempdir().unwrap();
    Command::new(env!("CARGO_BIN_EXE_toolrouter"))
        .args(args)
        .current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run toolrouter binary")
}

#[test]
fn cli_help_succeeds() {
    let out = run_toolrouter(&["--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("query"));
}

#[test]
fn cli_offline_math_query() {
    let out = run_toolrouter(&["query", "--offline", "What", "is", "7", "*", "3?"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim(), "tool_used: math\nresult: 21");
}

#[test]
fn cli_offline_weather_query_json() {
    let out = run_toolrouter(&["query", "--offline", "--json", "What's the weather in Jakarta?"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let value: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&out.stdout).trim()).unwrap();
    assert_eq!(value["tool_used"], "weather");
    assert_eq!(value["result"], "Mock weather: It's sunny and 22°C in Jakarta");
    assert_eq!(value["query"], "What's the weather in Jakarta?");
}

/// **Scenario**: Without OPENAI_API_KEY a provider-backed query fails before any work.
#[test]
fn cli_query_without_key_fails() {
    let out = run_toolrouter(&["query", "hello"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("OPENAI_API_KEY"), "{}", stderr);
}

#[test]
fn cli_serve_without_key_exits_non_zero() {
    let out = run_toolrouter(&["serve", "--addr", "127.0.0.1:0"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("OPENAI_API_KEY"));
}

/// **Scenario**: A malformed config.toml is logged as a warning to LOG_FILE and the query still runs.
#[test]
fn cli_malformed_config_is_logged_and_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let app_dir = dir.path().join("toolrouter");
    std::fs::create_dir_all(&app_dir).unwrap();
    std::fs::write(app_dir.join("config.toml"), "[env\nOPENAI_API_KEY = ").unwrap();
    let log_path = dir.path().join("toolrouter.log");

    let out = Command::new(env!("CARGO_BIN_EXE_toolrouter"))
        .args(["query", "--offline", "7 * 3"])
        .current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .env("LOG_FILE", &log_path)
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run toolrouter binary");

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        "tool_used: math\nresult: 21"
    );
    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("WARN"), "{}", log);
    assert!(log.contains("config load failed"), "{}", log);
    assert!(log.contains("parse xdg toml"), "{}", log);
    assert!(!String::from_utf8_lossy(&out.stderr).contains("config"));
}
