use splitrun_metadata::{Parallelism, PartitionSettings};
use splitrun_suite::TestSuite;

use crate::coordinates::{CoordinateError, Environment, NodeCoordinates};
use crate::engine::TestEngine;
use crate::partition::{Partition, PartitionError, Partitioner};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunnerError {
    #[error(transparent)]
    Coordinates(#[from] CoordinateError),

    #[error(transparent)]
    Partition(#[from] PartitionError),

    #[error(
        "Unsupported parameter passed `--parallel {requested}` ({workers} workers): \
         increase `CI_NODE_TOTAL` to run more nodes instead of in-process workers"
    )]
    UnsupportedParallel {
        requested: Parallelism,
        workers: usize,
    },

    #[error(
        "No test command given: pass it after `--` or set `runner.command` in `splitrun.toml`"
    )]
    MissingCommand,
}

/// Options for a node run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteOptions<O> {
    /// In-process workers requested with `--parallel`; more than one is rejected.
    pub parallel: Option<Parallelism>,

    /// Passed through to the engine.
    pub engine: O,
}

/// The result of running this node's slice of the suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRun<T> {
    pub coordinates: NodeCoordinates,
    pub classes: Vec<String>,
    pub tests: usize,
    pub outcome: T,
}

/// Rejects requests for more than one in-process worker.
///
/// Parallelism comes from running more nodes; workers inside one node would
/// reshuffle tests that were assigned by class.
pub fn ensure_single_worker(parallel: Option<Parallelism>) -> Result<(), RunnerError> {
    let Some(requested) = parallel else {
        return Ok(());
    };

    let workers = requested.workers();
    if workers > 1 {
        tracing::warn!(
            "`--parallel` is not supported when splitting tests across CI nodes. \
             Increase the number of nodes instead."
        );
        return Err(RunnerError::UnsupportedParallel { requested, workers });
    }

    Ok(())
}

/// Selects and runs the tests owned by this node.
pub struct NodeRunner<'a, V> {
    settings: &'a PartitionSettings,
    env: V,
}

impl<'a, V: Environment> NodeRunner<'a, V> {
    pub const fn new(settings: &'a PartitionSettings, env: V) -> Self {
        Self { settings, env }
    }

    /// Resolves the node coordinates and selects this node's tests.
    pub fn partition<S: TestSuite>(&self, suite: &S) -> Result<Partition<S>, RunnerError> {
        let partitioner = Partitioner::from_settings(self.settings, &self.env)?;
        Ok(partitioner.partition(suite)?)
    }

    /// Runs this node's tests with `engine`.
    ///
    /// Fails before selecting or running anything when more than one in-process
    /// worker is requested or the node coordinates are invalid.
    pub fn execute<S, E>(
        &self,
        suite: &S,
        options: &ExecuteOptions<E::Options>,
        engine: &E,
    ) -> anyhow::Result<NodeRun<E::Outcome>>
    where
        S: TestSuite,
        E: TestEngine<S>,
    {
        ensure_single_worker(options.parallel)?;

        let partition = self.partition(suite)?;
        let outcome = engine.run(partition.suite(), &options.engine)?;

        Ok(NodeRun {
            coordinates: partition.coordinates(),
            tests: partition.suite().len(),
            classes: partition.classes().to_vec(),
            outcome,
        })
    }
}
