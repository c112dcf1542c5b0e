use std::collections::HashSet;

use itertools::Itertools;
use splitrun_metadata::PartitionSettings;
use splitrun_suite::{GroupIdentity, TestSuite};

use crate::coordinates::{CoordinateError, Environment, NodeCoordinates};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionError {
    #[error("Cannot split tests across zero nodes: `CI_NODE_TOTAL` must be at least 1 (division by zero)")]
    ZeroNodeTotal,

    #[error("Cannot split tests across {total} nodes: `CI_NODE_TOTAL` must be at least 1")]
    NegativeNodeTotal { total: i64 },
}

/// The slice of a suite owned by one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<S> {
    suite: S,
    classes: Vec<String>,
    coordinates: NodeCoordinates,
}

impl<S> Partition<S> {
    /// The selected tests, in the order they appeared in the input suite.
    pub const fn suite(&self) -> &S {
        &self.suite
    }

    pub fn into_suite(self) -> S {
        self.suite
    }

    /// The classes assigned to this node, sorted.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub const fn coordinates(&self) -> NodeCoordinates {
        self.coordinates
    }
}

/// Assigns test classes to nodes.
///
/// Classes are sorted by their identity and the class at position `p` goes to
/// node `p % total`, so the assignment only depends on the set of classes, not
/// on the order in which tests were discovered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Partitioner {
    coordinates: NodeCoordinates,
}

impl Partitioner {
    pub const fn new(coordinates: NodeCoordinates) -> Self {
        Self { coordinates }
    }

    pub fn from_settings(
        settings: &PartitionSettings,
        env: &impl Environment,
    ) -> Result<Self, CoordinateError> {
        NodeCoordinates::resolve(settings, env).map(Self::new)
    }

    pub const fn coordinates(&self) -> NodeCoordinates {
        self.coordinates
    }

    /// Builds a new suite containing only the tests of the classes owned by this node.
    pub fn partition<S: TestSuite>(&self, suite: &S) -> Result<Partition<S>, PartitionError> {
        let total = match self.coordinates.total() {
            0 => return Err(PartitionError::ZeroNodeTotal),
            total => {
                usize::try_from(total).map_err(|_| PartitionError::NegativeNodeTotal { total })?
            }
        };
        // A negative index never matches a position.
        let index = usize::try_from(self.coordinates.index()).ok();

        let roster = suite
            .tests()
            .map(GroupIdentity::group_identity)
            .sorted_unstable()
            .dedup()
            .collect_vec();

        let assigned: HashSet<&str> = roster
            .iter()
            .enumerate()
            .filter(|(position, _)| Some(position % total) == index)
            .map(|(_, class)| *class)
            .collect();

        let mut selected = suite.empty_like();
        for test in suite.tests() {
            if assigned.contains(test.group_identity()) {
                selected.add_test(test.clone());
            }
        }

        let classes = roster
            .into_iter()
            .filter(|class| assigned.contains(class))
            .map(ToString::to_string)
            .collect_vec();

        tracing::info!(
            "{} tests will be run on this node from the following classes: {classes:?}",
            selected.len()
        );

        Ok(Partition {
            suite: selected,
            classes,
            coordinates: self.coordinates,
        })
    }
}
