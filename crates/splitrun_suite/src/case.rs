use std::fmt;

/// Exposes the identity of the group (test class) a test belongs to.
///
/// Every test of a group is always scheduled on the same node, so the identity
/// must be stable across machines and runs. Use the fully qualified class path,
/// never a debug or type representation.
pub trait GroupIdentity {
    fn group_identity(&self) -> &str;
}

/// A single test, addressed by the label the test command accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestCase {
    label: String,
    group: String,
}

impl TestCase {
    /// Creates a test case whose group is derived from its label.
    ///
    /// - `tests/test_api.py::TestUsers::test_create` belongs to `tests/test_api.py::TestUsers`.
    /// - `app.tests.UserTests.test_create` belongs to `app.tests.UserTests`.
    /// - A label without separators is its own group.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let group = group_of(&label).to_string();
        Self { label, group }
    }

    /// Creates a test case with an explicit group.
    pub fn with_group(label: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            group: group.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl GroupIdentity for TestCase {
    fn group_identity(&self) -> &str {
        &self.group
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn group_of(label: &str) -> &str {
    let label = without_parameters(label);

    if let Some((group, _)) = label.rsplit_once("::") {
        return group;
    }

    if let Some((group, _)) = label.rsplit_once('.') {
        return group;
    }

    label
}

/// Strips a trailing parameter id such as `[a::b-1.5]`, which may contain separators.
fn without_parameters(label: &str) -> &str {
    if !label.ends_with(']') {
        return label;
    }

    label.find('[').map_or(label, |start| &label[..start])
}
