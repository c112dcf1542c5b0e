use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::case::TestCase;
use crate::suite::Suite;

/// Where the suite listing is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuiteInput {
    Stdin,
    File(Utf8PathBuf),
}

impl SuiteInput {
    /// `-` means stdin, anything else is a path.
    pub fn from_arg(arg: &Utf8Path) -> Self {
        if arg.as_str() == "-" {
            Self::Stdin
        } else {
            Self::File(arg.to_path_buf())
        }
    }
}

/// The format of a suite listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuiteFormat {
    /// JSON for `.json` files, labels for everything else.
    #[default]
    Auto,

    /// One test label per line.
    Labels,

    /// A JSON array of labels or `{"label": ..., "group": ...}` objects.
    Json,
}

impl SuiteFormat {
    fn resolve(self, input: &SuiteInput) -> Self {
        match (self, input) {
            (Self::Auto, SuiteInput::File(path)) if path.extension() == Some("json") => Self::Json,
            (Self::Auto, _) => Self::Labels,
            (format, _) => format,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    #[error("Failed to read the suite listing `{path}`")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read the suite listing from stdin")]
    ReadStdin(#[source] std::io::Error),

    #[error("Failed to parse the JSON suite listing `{origin}`")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads a suite listing.
pub fn read_suite(input: &SuiteInput, format: SuiteFormat) -> Result<Suite, SuiteError> {
    let (content, source) = match input {
        SuiteInput::Stdin => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(SuiteError::ReadStdin)?;
            (content, None)
        }
        SuiteInput::File(path) => {
            let content = std::fs::read_to_string(path).map_err(|source| SuiteError::Read {
                path: path.clone(),
                source,
            })?;
            (content, Some(path.clone()))
        }
    };

    let tests = match format.resolve(input) {
        SuiteFormat::Json => parse_json(&content).map_err(|source| SuiteError::Json {
            origin: source_name(input),
            source,
        })?,
        SuiteFormat::Labels | SuiteFormat::Auto => parse_labels(&content),
    };

    tracing::debug!("Read {} tests from {}", tests.len(), source_name(input));

    Ok(Suite::new(source, tests))
}

fn source_name(input: &SuiteInput) -> String {
    match input {
        SuiteInput::Stdin => "<stdin>".to_string(),
        SuiteInput::File(path) => path.to_string(),
    }
}

/// Parses one label per line, skipping blank lines and `#` comments.
pub fn parse_labels(content: &str) -> Vec<TestCase> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(TestCase::from_label)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonEntry {
    Label(String),
    Case {
        label: String,
        group: Option<String>,
    },
}

/// Parses a JSON array whose entries are labels or `{"label", "group"}` objects.
///
/// Objects without a `group` derive it from the label.
pub fn parse_json(content: &str) -> Result<Vec<TestCase>, serde_json::Error> {
    let entries: Vec<JsonEntry> = serde_json::from_str(content)?;

    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            JsonEntry::Label(label) | JsonEntry::Case { label, group: None } => {
                TestCase::from_label(label)
            }
            JsonEntry::Case {
                label,
                group: Some(group),
            } => TestCase::with_group(label, group),
        })
        .collect())
}
