use std::num::NonZeroUsize;

/// Declares all environment variables read by splitrun.
#[non_exhaustive]
pub struct EnvVars;

impl EnvVars {
    /// Total number of CI nodes the suite is split across.
    ///
    /// Only used when the configuration file does not set `ci-node-total`.
    pub const CI_NODE_TOTAL: &'static str = "CI_NODE_TOTAL";

    /// Zero-based index of the current CI node.
    ///
    /// Only used when the configuration file does not set `ci-node-index`.
    pub const CI_NODE_INDEX: &'static str = "CI_NODE_INDEX";

    /// Path to a `splitrun.toml` file to use for configuration.
    pub const SPLITRUN_CONFIG_FILE: &'static str = "SPLITRUN_CONFIG_FILE";

    /// Log filter directives, overriding the level implied by `-v`/`-q`.
    pub const SPLITRUN_LOG: &'static str = "SPLITRUN_LOG";

    /// When set to `1` or `true`, write a flamegraph-compatible trace to `tracing.folded`.
    pub const SPLITRUN_LOG_PROFILE: &'static str = "SPLITRUN_LOG_PROFILE";

    /// Used to determine the number of CPUs when `--parallel auto` is passed.
    pub const SPLITRUN_MAX_PARALLELISM: &'static str = "SPLITRUN_MAX_PARALLELISM";
}

/// Returns the number of CPUs available to this process.
///
/// `SPLITRUN_MAX_PARALLELISM` takes precedence over the detected value.
pub fn max_parallelism() -> NonZeroUsize {
    std::env::var(EnvVars::SPLITRUN_MAX_PARALLELISM)
        .ok()
        .and_then(|value| value.trim().parse::<NonZeroUsize>().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
        })
}
