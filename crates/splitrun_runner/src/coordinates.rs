use std::collections::HashMap;
use std::fmt;
use std::num::ParseIntError;

use splitrun_metadata::{PartitionSettings, SettingValue};
use splitrun_static::EnvVars;

/// Read access to environment variables.
///
/// Production code reads the process environment; tests pass a map.
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// Where a node coordinate was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateOrigin {
    ConfigurationFile,
    Environment,
}

impl fmt::Display for CoordinateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurationFile => f.write_str("configuration file"),
            Self::Environment => f.write_str("environment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid `{name}` value `{value}` in the {origin}: expected an integer")]
pub struct CoordinateError {
    name: &'static str,
    value: String,
    origin: CoordinateOrigin,
    #[source]
    source: ParseIntError,
}

impl CoordinateError {
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn origin(&self) -> CoordinateOrigin {
        self.origin
    }
}

/// The position of this machine among the CI nodes sharing one test run.
///
/// `index` is zero-based. An index outside `0..total`, negative ones included,
/// is allowed and owns no tests. A total below 1 is rejected when partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeCoordinates {
    total: i64,
    index: i64,
}

impl NodeCoordinates {
    pub const fn new(total: i64, index: i64) -> Self {
        Self { total, index }
    }

    /// Resolves both coordinates from the configuration file, then the environment.
    pub fn resolve(
        settings: &PartitionSettings,
        env: &impl Environment,
    ) -> Result<Self, CoordinateError> {
        Ok(Self {
            total: resolve_node_total(settings, env)?,
            index: resolve_node_index(settings, env)?,
        })
    }

    pub const fn total(self) -> i64 {
        self.total
    }

    pub const fn index(self) -> i64 {
        self.index
    }
}

impl Default for NodeCoordinates {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl fmt::Display for NodeCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {} of {}", self.index, self.total)
    }
}

/// `ci-node-total` from the configuration file, else `CI_NODE_TOTAL`, else 1.
pub fn resolve_node_total(
    settings: &PartitionSettings,
    env: &impl Environment,
) -> Result<i64, CoordinateError> {
    resolve(
        settings.ci_node_total.as_ref(),
        EnvVars::CI_NODE_TOTAL,
        env,
        1,
    )
}

/// `ci-node-index` from the configuration file, else `CI_NODE_INDEX`, else 0.
pub fn resolve_node_index(
    settings: &PartitionSettings,
    env: &impl Environment,
) -> Result<i64, CoordinateError> {
    resolve(
        settings.ci_node_index.as_ref(),
        EnvVars::CI_NODE_INDEX,
        env,
        0,
    )
}

fn resolve(
    configured: Option<&SettingValue>,
    name: &'static str,
    env: &impl Environment,
    default: i64,
) -> Result<i64, CoordinateError> {
    let (value, origin) = if let Some(value) = configured {
        (value.to_string(), CoordinateOrigin::ConfigurationFile)
    } else if let Some(value) = env.var(name) {
        (value, CoordinateOrigin::Environment)
    } else {
        return Ok(default);
    };

    match value.trim().parse::<i64>() {
        Ok(resolved) => {
            tracing::debug!("Using {name}={resolved} from the {origin}");
            Ok(resolved)
        }
        Err(source) => Err(CoordinateError {
            name,
            value,
            origin,
            source,
        }),
    }
}
