use std::fmt;

/// The version of this build of splitrun.
pub(crate) struct VersionInfo {
    version: &'static str,
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.version)
    }
}

pub(crate) fn version() -> Option<VersionInfo> {
    splitrun_version::version_triple()?;

    Some(VersionInfo {
        version: splitrun_version::VERSION,
    })
}
