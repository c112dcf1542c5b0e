use std::fmt;

use camino::Utf8Path;
use serde::Deserialize;

use crate::ProjectMetadataError;
use crate::settings::{PartitionSettings, RunnerSettings, Settings};

/// The options that can be set in `splitrun.toml` or under `[tool.splitrun]` in `pyproject.toml`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Options {
    /// How the suite is split across CI nodes.
    pub partition: Option<PartitionOptions>,

    /// The command that executes the selected tests.
    pub runner: Option<RunnerOptions>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartitionOptions {
    /// Total number of CI nodes. Takes precedence over `CI_NODE_TOTAL`.
    pub ci_node_total: Option<SettingValue>,

    /// Zero-based index of this node. Takes precedence over `CI_NODE_INDEX`.
    pub ci_node_index: Option<SettingValue>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RunnerOptions {
    /// Program and leading arguments; the selected test labels are appended.
    ///
    /// ```toml
    /// [runner]
    /// command = ["python", "manage.py", "test"]
    /// ```
    pub command: Option<Vec<String>>,
}

/// A raw node setting as written in the configuration file.
///
/// Both `ci-node-total = 4` and `ci-node-total = "4"` are accepted; the value is
/// only interpreted as an integer when the node coordinates are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    tool: Option<Tool>,
}

#[derive(Debug, Default, Deserialize)]
struct Tool {
    splitrun: Option<Options>,
}

impl Options {
    pub fn from_toml_str(content: &str, path: &Utf8Path) -> Result<Self, ProjectMetadataError> {
        toml::from_str(content).map_err(|source| ProjectMetadataError::Parse {
            path: path.to_owned(),
            source: Box::new(source),
        })
    }

    /// Reads the `[tool.splitrun]` table of a `pyproject.toml`, if there is one.
    pub fn from_pyproject_str(
        content: &str,
        path: &Utf8Path,
    ) -> Result<Option<Self>, ProjectMetadataError> {
        let pyproject: PyProject =
            toml::from_str(content).map_err(|source| ProjectMetadataError::Parse {
                path: path.to_owned(),
                source: Box::new(source),
            })?;

        Ok(pyproject.tool.and_then(|tool| tool.splitrun))
    }

    /// Merges two option sets field by field, preferring values from `self`.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            partition: combine_nested(self.partition, other.partition, PartitionOptions::combine),
            runner: combine_nested(self.runner, other.runner, RunnerOptions::combine),
        }
    }

    pub fn to_settings(&self) -> Settings {
        let partition = self.partition.clone().unwrap_or_default();
        let runner = self.runner.clone().unwrap_or_default();

        Settings {
            partition: PartitionSettings {
                ci_node_total: partition.ci_node_total,
                ci_node_index: partition.ci_node_index,
            },
            runner: RunnerSettings {
                command: runner.command.unwrap_or_default(),
            },
        }
    }
}

impl PartitionOptions {
    fn combine(self, other: Self) -> Self {
        Self {
            ci_node_total: self.ci_node_total.or(other.ci_node_total),
            ci_node_index: self.ci_node_index.or(other.ci_node_index),
        }
    }
}

impl RunnerOptions {
    fn combine(self, other: Self) -> Self {
        Self {
            command: self.command.or(other.command),
        }
    }
}

fn combine_nested<T>(preferred: Option<T>, fallback: Option<T>, merge: fn(T, T) -> T) -> Option<T> {
    match (preferred, fallback) {
        (Some(preferred), Some(fallback)) => Some(merge(preferred, fallback)),
        (preferred, fallback) => preferred.or(fallback),
    }
}
