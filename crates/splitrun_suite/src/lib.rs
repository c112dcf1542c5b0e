//! The test suite model shared by the suite loaders and the partitioner.

mod case;
mod listing;
mod suite;

pub use case::{GroupIdentity, TestCase};
pub use listing::{SuiteError, SuiteFormat, SuiteInput, parse_json, parse_labels, read_suite};
pub use suite::{Suite, TestSuite};
