mod printer;
mod setup;

pub use printer::{Printer, Stdout};
pub use setup::{TracingGuard, setup_tracing};

/// How much output splitrun writes, derived from the `-v` and `-q` flags.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerbosityLevel {
    /// Only errors and requested output.
    Quiet,

    /// Warnings and the regular run summary.
    #[default]
    Default,

    /// Informational messages, such as the classes selected for this node.
    Verbose,

    /// Debug messages with timestamps.
    ExtraVerbose,

    /// Every span and event, rendered as a tree.
    Trace,
}

impl VerbosityLevel {
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    pub const fn is_extra_verbose(self) -> bool {
        matches!(self, Self::ExtraVerbose)
    }

    pub const fn is_trace(self) -> bool {
        matches!(self, Self::Trace)
    }

    /// The filter directives used when `SPLITRUN_LOG` is not set.
    pub(crate) const fn default_directives(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Default => "warn",
            Self::Verbose => "warn,splitrun=info",
            Self::ExtraVerbose => "warn,splitrun=debug",
            Self::Trace => "warn,splitrun=trace",
        }
    }
}

/// Control when colored output is used.
#[derive(Copy, Clone, Hash, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TerminalColor {
    /// Display colors if the output goes to an interactive terminal.
    #[default]
    Auto,

    /// Always display colors.
    Always,

    /// Never display colors.
    Never,
}

/// Forces `colored` on or off when the user passed `--color`.
pub fn set_colored_override(color: Option<TerminalColor>) {
    let Some(color) = color else {
        return;
    };

    match color {
        TerminalColor::Auto => colored::control::unset_override(),
        TerminalColor::Always => colored::control::set_override(true),
        TerminalColor::Never => colored::control::set_override(false),
    }
}
