//! Build metadata accessors.
//! Includes the version.rs generated by the build script.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}

/// Long version string shown by `drainq --version`
pub fn long_version() -> String {
    format!(
        "{} (built {}, git {})",
        env!("CARGO_PKG_VERSION"),
        build_time(),
        git_hash()
    )
}
