use std::process::{Command, ExitStatus};

use anyhow::Context;
use camino::Utf8PathBuf;
use splitrun_suite::{Suite, TestSuite};

use crate::orchestration::RunnerError;

/// Runs the tests selected for this node.
pub trait TestEngine<S: TestSuite> {
    /// Run options understood by this engine.
    type Options;

    /// What the engine reports back, handed to the caller unchanged.
    type Outcome;

    fn run(&self, suite: &S, options: &Self::Options) -> anyhow::Result<Self::Outcome>;
}

/// Runs an external test command with the selected test labels appended.
///
/// `["python", "manage.py", "test"]` with the tests `a.A.test_x` and `a.A.test_y`
/// runs `python manage.py test a.A.test_x a.A.test_y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn new(command: &[String]) -> Result<Self, RunnerError> {
        let Some((program, args)) = command.split_first() else {
            return Err(RunnerError::MissingCommand);
        };

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOptions {
    /// The directory the test command runs in, usually the project root.
    pub cwd: Utf8PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// No tests were selected, so the command was not started.
    ///
    /// Most test commands run the whole suite when given no labels.
    Skipped,

    /// The command ran and exited with this status.
    Finished(ExitStatus),
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            Self::Skipped => true,
            Self::Finished(status) => status.success(),
        }
    }
}

impl TestEngine<Suite> for CommandEngine {
    type Options = CommandOptions;
    type Outcome = CommandOutcome;

    fn run(&self, suite: &Suite, options: &CommandOptions) -> anyhow::Result<CommandOutcome> {
        if suite.is_empty() {
            tracing::info!(
                "No tests selected for this node, not running `{}`",
                self.program
            );
            return Ok(CommandOutcome::Skipped);
        }

        let program = which::which_in(&self.program, std::env::var_os("PATH"), &options.cwd)
            .with_context(|| format!("Failed to find the test command `{}`", self.program))?;

        let mut command = Command::new(&program);
        command
            .args(&self.args)
            .args(suite.labels())
            .current_dir(&options.cwd);

        tracing::debug!("Running {command:?}");

        let status = command
            .status()
            .with_context(|| format!("Failed to run the test command `{}`", self.program))?;

        tracing::debug!("`{}` exited with {status}", self.program);

        Ok(CommandOutcome::Finished(status))
    }
}
