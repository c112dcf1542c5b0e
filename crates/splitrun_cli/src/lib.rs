use camino::Utf8PathBuf;
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use splitrun_logging::{TerminalColor, VerbosityLevel};
use splitrun_metadata::{Options, Parallelism, RunnerOptions};
use splitrun_static::EnvVars;
use splitrun_suite::SuiteFormat;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(clap::Args, Debug, Clone, Default)]
#[command(about = None, long_about = None)]
pub struct Verbosity {
    #[arg(
        long,
        short = 'v',
        help = "Use verbose output (or `-vv` and `-vvv` for more verbose output)",
        action = clap::ArgAction::Count,
        global = true,
        overrides_with = "quiet",
    )]
    verbose: u8,

    #[arg(
        long,
        short,
        help = "Use quiet output",
        action = clap::ArgAction::Count,
        global = true,
        overrides_with = "verbose",
    )]
    quiet: u8,
}

impl Verbosity {
    /// Returns the verbosity level based on the number of `-v` and `-q` flags.
    pub const fn level(&self) -> VerbosityLevel {
        // `--quiet` and `--verbose` override each other, so at most one is set.
        if self.quiet > 0 {
            return VerbosityLevel::Quiet;
        }

        match self.verbose {
            0 => VerbosityLevel::Default,
            1 => VerbosityLevel::Verbose,
            2 => VerbosityLevel::ExtraVerbose,
            _ => VerbosityLevel::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    author,
    name = "splitrun",
    about = "Split a test suite across CI nodes by test class."
)]
#[command(version)]
#[command(styles = STYLES)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Run the tests assigned to this CI node.
    Test(TestCommand),

    /// Display splitrun's version
    Version,
}

#[derive(Debug, Parser)]
pub struct TestCommand {
    /// File listing the tests to split, one label per line or a JSON array.
    ///
    /// Use `-` to read the listing from stdin.
    #[arg(long, value_name = "PATH")]
    pub suite: Utf8PathBuf,

    /// The format of the suite listing.
    #[arg(long, value_name = "FORMAT", default_value = "auto")]
    pub suite_format: SuiteFormatArg,

    /// The path to a `splitrun.toml` file to use for configuration.
    ///
    /// Disables discovery of `splitrun.toml` and `pyproject.toml` files.
    #[arg(long, env = EnvVars::SPLITRUN_CONFIG_FILE, value_name = "PATH")]
    pub config_file: Option<Utf8PathBuf>,

    /// Number of in-process test workers.
    ///
    /// Only a single worker is supported: scale out by adding CI nodes instead.
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "auto")]
    pub parallel: Option<Parallelism>,

    /// Print the tests selected for this node without running them.
    #[arg(long)]
    pub dry_run: bool,

    /// Control when colored output is used.
    #[arg(long)]
    pub color: Option<TerminalColor>,

    #[clap(flatten)]
    pub verbosity: Verbosity,

    /// The test command; the selected test labels are appended to it.
    ///
    /// Overrides `runner.command` from the configuration file.
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl TestCommand {
    pub const fn verbosity(&self) -> &Verbosity {
        &self.verbosity
    }

    /// The options passed on the command line that override the configuration file.
    pub fn options(&self) -> Options {
        Options {
            partition: None,
            runner: (!self.command.is_empty()).then(|| RunnerOptions {
                command: Some(self.command.clone()),
            }),
        }
    }
}

/// The format of a suite listing.
#[derive(Copy, Clone, Hash, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SuiteFormatArg {
    /// JSON for `.json` files, labels otherwise.
    #[default]
    Auto,

    /// One test label per line.
    Labels,

    /// A JSON array of labels or `{"label", "group"}` objects.
    Json,
}

impl From<SuiteFormatArg> for SuiteFormat {
    fn from(value: SuiteFormatArg) -> Self {
        match value {
            SuiteFormatArg::Auto => Self::Auto,
            SuiteFormatArg::Labels => Self::Labels,
            SuiteFormatArg::Json => Self::Json,
        }
    }
}
