/// The version of the `splitrun` packages, as set in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the `major.minor.patch` components of [`VERSION`].
///
/// Pre-release and build suffixes are ignored.
pub fn version_triple() -> Option<(u64, u64, u64)> {
    let core = VERSION.split(['-', '+']).next()?;
    let mut parts = core.split('.').map(str::parse::<u64>);

    let major = parts.next()?.ok()?;
    let minor = parts.next()?.ok()?;
    let patch = parts.next()?.ok()?;

    Some((major, minor, patch))
}
