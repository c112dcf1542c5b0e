use crate::options::SettingValue;

/// The resolved project settings, after combining the configuration file and CLI options.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Settings {
    pub(crate) partition: PartitionSettings,
    pub(crate) runner: RunnerSettings,
}

impl Settings {
    pub const fn partition(&self) -> &PartitionSettings {
        &self.partition
    }

    pub const fn runner(&self) -> &RunnerSettings {
        &self.runner
    }
}

/// Node settings from the configuration file.
///
/// These stay raw: the environment fallback and integer parsing happen when the
/// coordinates are resolved, so a bad value is reported together with its source.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PartitionSettings {
    pub ci_node_total: Option<SettingValue>,
    pub ci_node_index: Option<SettingValue>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunnerSettings {
    pub command: Vec<String>,
}
