//! Common test utilities shared across integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path of the `graphwalk` binary built for this test run
pub fn graphwalk_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_graphwalk"))
}

/// Run the graphwalk binary in the specified directory with colors disabled
pub fn run_graphwalk_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(graphwalk_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute graphwalk binary")
}

/// Write an input file into `dir` and return its name
pub fn write_input(dir: &Path, name: &str, content: &str) -> String {
    fs::write(dir.join(name), content).expect("Failed to write input file");
    name.to_string()
}

/// Parse stdout of a `--json` run
pub fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}
