use camino::{Utf8Path, Utf8PathBuf};

use crate::case::{GroupIdentity, TestCase};

/// An ordered collection of tests that can be filtered into a new suite of the same kind.
pub trait TestSuite {
    type Test: GroupIdentity + Clone;

    /// Returns a new, empty suite of the same kind as `self`.
    #[must_use]
    fn empty_like(&self) -> Self
    where
        Self: Sized;

    /// The tests in their original order.
    fn tests(&self) -> impl Iterator<Item = &Self::Test>;

    fn add_test(&mut self, test: Self::Test);

    fn len(&self) -> usize {
        self.tests().count()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A suite of [`TestCase`]s, remembering the listing it was read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suite {
    source: Option<Utf8PathBuf>,
    tests: Vec<TestCase>,
}

impl Suite {
    pub fn new(source: Option<Utf8PathBuf>, tests: Vec<TestCase>) -> Self {
        Self { source, tests }
    }

    /// The listing file this suite was read from, `None` for stdin or in-memory suites.
    pub fn source(&self) -> Option<&Utf8Path> {
        self.source.as_deref()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.tests.iter().map(TestCase::label)
    }
}

impl TestSuite for Suite {
    type Test = TestCase;

    fn empty_like(&self) -> Self {
        Self {
            source: self.source.clone(),
            tests: Vec::new(),
        }
    }

    fn tests(&self) -> impl Iterator<Item = &TestCase> {
        self.tests.iter()
    }

    fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    fn len(&self) -> usize {
        self.tests.len()
    }
}

impl FromIterator<TestCase> for Suite {
    fn from_iter<I: IntoIterator<Item = TestCase>>(iter: I) -> Self {
        Self {
            source: None,
            tests: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Suite {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.tests.iter()
    }
}
