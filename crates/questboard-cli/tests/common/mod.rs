use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Run the CLI with an isolated HOME so session storage never touches the
/// real user profile.
pub fn run_cli(args: &[&str], home: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_questboard"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env_remove("QUESTBOARD_URL");
    cmd.env_remove("QUESTBOARD_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], home: &Path) -> String {
    let output = run_cli(args, home);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(args: &[&str], home: &Path) -> String {
    let output = run_cli(args, home);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Where the CLI keeps its session under `home`.
pub fn session_file(home: &Path) -> PathBuf {
    home.join("data").join("questboard").join("session.json")
}

/// Write a session file as `questboard login` would.
pub fn write_session(home: &Path, base_url: &str, cookies: Option<&str>) {
    let path = session_file(home);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let session = serde_json::json!({ "base_url": base_url, "cookies": cookies });
    fs::write(path, session.to_string()).unwrap();
}
