use std::ffi::OsString;
use std::io::Write;
use std::io;
use std::process::{ExitCode, Termination};

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use colored::Colorize;
use splitrun_cli::{Args, Command, TestCommand};
use splitrun_logging::{Printer, set_colored_override, setup_tracing};
use splitrun_metadata::{ProjectMetadata, ProjectOptionsOverrides};
use splitrun_runner::{
    CommandEngine, CommandOptions, CommandOutcome, ExecuteOptions, NodeRun, NodeRunner, Partition,
    ProcessEnvironment, ensure_single_worker,
};
use splitrun_suite::{Suite, SuiteInput, TestSuite, read_suite};

mod version;

pub fn splitrun_main(f: impl FnOnce(Vec<OsString>) -> Vec<OsString>) -> ExitStatus {
    run(f).unwrap_or_else(|error| {
        let mut stderr = std::io::stderr().lock();

        writeln!(stderr, "{}", "splitrun failed".red().bold()).ok();
        for cause in error.chain() {
            if let Some(ioerr) = cause.downcast_ref::<io::Error>() {
                if ioerr.kind() == io::ErrorKind::BrokenPipe {
                    return ExitStatus::Success;
                }
            }

            writeln!(stderr, "  {} {cause}", "Cause:".bold()).ok();
        }

        ExitStatus::Error
    })
}

fn run(f: impl FnOnce(Vec<OsString>) -> Vec<OsString>) -> anyhow::Result<ExitStatus> {
    let args = wild::args_os();

    let args = f(
        argfile::expand_args_from(args, argfile::parse_fromfile, argfile::PREFIX)
            .context("Failed to read CLI arguments from file")?,
    );

    let args = Args::parse_from(args);

    match args.command {
        Command::Test(test_args) => test(test_args),
        Command::Version => version().map(|()| ExitStatus::Success),
    }
}

pub(crate) fn version() -> Result<()> {
    let mut stdout = Printer::default().stream_for_requested_summary().lock();
    if let Some(version_info) = crate::version::version() {
        writeln!(stdout, "splitrun {}", &version_info)?;
    } else {
        writeln!(stdout, "Failed to get splitrun version")?;
    }

    Ok(())
}

pub(crate) fn test(args: TestCommand) -> Result<ExitStatus> {
    let verbosity = args.verbosity().level();

    set_colored_override(args.color);

    let printer = Printer::new(verbosity);

    let _guard = setup_tracing(verbosity)?;

    let cwd = {
        let cwd = std::env::current_dir().context("Failed to get the current working directory")?;
        Utf8PathBuf::from_path_buf(cwd).map_err(|path| {
            anyhow::anyhow!(
                "The current working directory `{}` contains non-Unicode characters. splitrun only supports Unicode paths.",
                path.display()
            )
        })?
    };

    tracing::debug!(cwd = %cwd, "Working directory");

    let config_file = args.config_file.as_ref().map(|path| absolute(path, &cwd));

    let mut project_metadata = if let Some(config_file) = config_file {
        ProjectMetadata::from_config_file(config_file, &cwd)?
    } else {
        ProjectMetadata::discover(&cwd)?
    };

    project_metadata.apply_overrides(&ProjectOptionsOverrides::new(args.options()));

    let settings = project_metadata.to_settings();

    // In-process workers are rejected before the suite is even read.
    ensure_single_worker(args.parallel)?;

    let suite = read_suite(&SuiteInput::from_arg(&args.suite), args.suite_format.into())?;

    let runner = NodeRunner::new(settings.partition(), ProcessEnvironment);

    if args.dry_run {
        let partition = runner.partition(&suite)?;
        print_selected_tests(printer, &partition)?;
        return Ok(ExitStatus::Success);
    }

    let engine = CommandEngine::new(&settings.runner().command)?;

    let options = ExecuteOptions {
        parallel: args.parallel,
        engine: CommandOptions {
            cwd: project_metadata.root().to_path_buf(),
        },
    };

    let run = runner.execute(&suite, &options, &engine)?;

    print_run_summary(printer, &run)?;

    if run.outcome.is_success() {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}

/// Print the tests selected for this node in dry-run mode.
fn print_selected_tests(printer: Printer, partition: &Partition<Suite>) -> Result<()> {
    let mut stdout = printer.stream_for_requested_summary().lock();

    for label in partition.suite().labels() {
        writeln!(stdout, "<test> {label}")?;
    }

    if !partition.suite().is_empty() {
        writeln!(stdout)?;
    }

    writeln!(
        stdout,
        "{} tests selected on {}",
        partition.suite().len(),
        partition.coordinates()
    )?;

    Ok(())
}

fn print_run_summary(printer: Printer, run: &NodeRun<CommandOutcome>) -> Result<()> {
    let mut stdout = printer.stream_for_details().lock();

    match run.outcome {
        CommandOutcome::Skipped => writeln!(
            stdout,
            "No tests selected on {}, the test command was not run",
            run.coordinates
        )?,
        CommandOutcome::Finished(_) => writeln!(
            stdout,
            "Ran {} tests from {} classes on {}",
            run.tests,
            run.classes.len(),
            run.coordinates
        )?,
    }

    Ok(())
}

fn absolute(path: &Utf8Path, cwd: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[derive(Copy, Clone)]
pub enum ExitStatus {
    /// The selected tests passed, or no tests were selected.
    Success = 0,

    /// The test command reported a failure.
    Failure = 1,

    /// splitrun could not run the tests.
    Error = 2,
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}
