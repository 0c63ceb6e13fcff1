//! Embeds commit and timestamp metadata for the CLI version surfaces.
//!
//! Both values can be pinned through env vars for reproducible builds; when
//! git or date tooling is missing they fall back to a stable "unknown".

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=TERMKIT_BUILD_GIT_HASH");
    println!("cargo:rerun-if-env-changed=TERMKIT_BUILD_TIMESTAMP");

    let hash = env::var("TERMKIT_BUILD_GIT_HASH")
        .ok()
        .or_else(|| capture("git", &["rev-parse", "--short=12", "HEAD"]))
        .unwrap_or_else(|| "unknown".to_string());
    let stamp = env::var("TERMKIT_BUILD_TIMESTAMP")
        .ok()
        .or_else(|| capture("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=TERMKIT_BUILD_GIT_HASH={hash}");
    println!("cargo:rustc-env=TERMKIT_BUILD_TIMESTAMP={stamp}");
}

fn capture(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
