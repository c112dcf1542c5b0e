mod coordinates;
mod engine;
mod orchestration;
mod partition;

pub use coordinates::{
    CoordinateError, CoordinateOrigin, Environment, NodeCoordinates, ProcessEnvironment,
    resolve_node_index, resolve_node_total,
};
pub use engine::{CommandEngine, CommandOptions, CommandOutcome, TestEngine};
pub use orchestration::{ExecuteOptions, NodeRun, NodeRunner, RunnerError, ensure_single_worker};
pub use partition::{Partition, PartitionError, Partitioner};
