use camino::{Utf8Path, Utf8PathBuf};

mod options;
mod parallelism;
mod settings;

pub use options::{Options, PartitionOptions, RunnerOptions, SettingValue};
pub use parallelism::{ParseParallelismError, Parallelism};
pub use settings::{PartitionSettings, RunnerSettings, Settings};

const SPLITRUN_TOML: &str = "splitrun.toml";
const PYPROJECT_TOML: &str = "pyproject.toml";

#[derive(Debug, thiserror::Error)]
pub enum ProjectMetadataError {
    #[error("Failed to read `{path}`")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse `{path}`")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },
}

/// The project root together with the options loaded from its configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    root: Utf8PathBuf,
    options: Options,
    config_file: Option<Utf8PathBuf>,
}

impl ProjectMetadata {
    /// A project without any configuration file.
    pub fn new(root: Utf8PathBuf) -> Self {
        Self {
            root,
            options: Options::default(),
            config_file: None,
        }
    }

    /// Finds the closest `splitrun.toml`, or `pyproject.toml` with a `[tool.splitrun]`
    /// table, in `cwd` or any of its ancestors.
    ///
    /// Falls back to a project rooted at `cwd` when no configuration exists.
    pub fn discover(cwd: &Utf8Path) -> Result<Self, ProjectMetadataError> {
        for ancestor in cwd.ancestors() {
            let splitrun_toml = ancestor.join(SPLITRUN_TOML);
            if splitrun_toml.is_file() {
                let content = read_file(&splitrun_toml)?;
                let options = Options::from_toml_str(&content, &splitrun_toml)?;

                tracing::debug!("Using configuration from `{splitrun_toml}`");

                return Ok(Self {
                    root: ancestor.to_path_buf(),
                    options,
                    config_file: Some(splitrun_toml),
                });
            }

            let pyproject_toml = ancestor.join(PYPROJECT_TOML);
            if pyproject_toml.is_file() {
                let content = read_file(&pyproject_toml)?;
                if let Some(options) = Options::from_pyproject_str(&content, &pyproject_toml)? {
                    tracing::debug!("Using configuration from `{pyproject_toml}`");

                    return Ok(Self {
                        root: ancestor.to_path_buf(),
                        options,
                        config_file: Some(pyproject_toml),
                    });
                }
            }
        }

        tracing::debug!("No configuration file found, using defaults");

        Ok(Self::new(cwd.to_path_buf()))
    }

    /// Loads the options from an explicit `splitrun.toml`.
    ///
    /// The project root stays at `cwd`.
    pub fn from_config_file(
        config_file: Utf8PathBuf,
        cwd: &Utf8Path,
    ) -> Result<Self, ProjectMetadataError> {
        let content = read_file(&config_file)?;
        let options = Options::from_toml_str(&content, &config_file)?;

        Ok(Self {
            root: cwd.to_path_buf(),
            options,
            config_file: Some(config_file),
        })
    }

    /// Applies options passed on the command line on top of the file options.
    pub fn apply_overrides(&mut self, overrides: &ProjectOptionsOverrides) {
        self.options = overrides
            .options
            .clone()
            .combine(std::mem::take(&mut self.options));
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub const fn options(&self) -> &Options {
        &self.options
    }

    pub fn config_file(&self) -> Option<&Utf8Path> {
        self.config_file.as_deref()
    }

    pub fn to_settings(&self) -> Settings {
        self.options.to_settings()
    }
}

/// Options from the command line that take precedence over the configuration file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectOptionsOverrides {
    pub options: Options,
}

impl ProjectOptionsOverrides {
    pub const fn new(options: Options) -> Self {
        Self { options }
    }
}

fn read_file(path: &Utf8Path) -> Result<String, ProjectMetadataError> {
    std::fs::read_to_string(path).map_err(|source| ProjectMetadataError::Read {
        path: path.to_path_buf(),
        source,
    })
}
