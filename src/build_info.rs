//! Compile-time build metadata exposed to CLI/runtime surfaces.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("TERMKIT_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("TERMKIT_BUILD_TIMESTAMP");

/// Render CLI version block used by `termkit --version`.
pub fn cli_version_text() -> String {
    format!("termkit {VERSION}\ncommit: {GIT_COMMIT}\nbuilt: {BUILD_TIMESTAMP}")
}
