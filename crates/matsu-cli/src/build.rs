use std::process::{Command, Stdio};

use tracing::{error, info};

/// Runs the site binary in release mode, which calls `matsu::build_site()`. Returns whether the build succeeded.
pub fn start_build() -> bool {
    info!(name: "build", "Running `cargo run --release`...");

    match Command::new("cargo")
        .args(["run", "--release"])
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
    {
        Ok(mut child) => match child.wait() {
            Ok(exit_code) if exit_code.success() => {
                info!(name: "build", "Build succeeded");
                true
            }
            Ok(exit_code) => {
                error!(name: "build", "Build failed ({})", exit_code);
                false
            }
            Err(err) => {
                error!(name: "build", "Failed to build project: {:?}", err);
                false
            }
        },
        Err(err) => {
            error!(name: "build", "Failed to spawn cargo: {:?}", err);
            false
        }
    }
}
