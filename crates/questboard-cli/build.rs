//! Build script to capture git version information at compile time.

use std::process::Command;

fn main() {
    // A new commit or tag changes the version string
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    // Outside a git checkout (crates.io tarball) fall back to the manifest version
    let version = git_version().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=QUESTBOARD_VERSION={}", version);
}

/// `git describe` output such as `1.2.0-3-gabc1234-dirty`.
fn git_version() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let version = String::from_utf8(output.stdout).ok()?;
    let version = version.trim();
    if version.is_empty() {
        return None;
    }

    // Release tags are `v1.2.3`; `--version` prints `1.2.3`
    Some(version.strip_prefix('v').unwrap_or(version).to_string())
}
