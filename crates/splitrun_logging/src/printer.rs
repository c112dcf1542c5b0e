use std::io::{self, StdoutLock, Write};

use crate::VerbosityLevel;

/// Decides which user-facing output reaches stdout for a given verbosity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    verbosity: VerbosityLevel,
}

impl Printer {
    pub const fn new(verbosity: VerbosityLevel) -> Self {
        Self { verbosity }
    }

    /// Output the user explicitly asked for, such as a dry-run listing or the version.
    ///
    /// Always written, even with `--quiet`.
    pub fn stream_for_requested_summary(self) -> Stdout {
        Stdout::enabled()
    }

    /// The line announcing which slice of the suite this node runs.
    ///
    /// Hidden with `--quiet`.
    pub fn stream_for_details(self) -> Stdout {
        if self.verbosity.is_quiet() {
            Stdout::disabled()
        } else {
            Stdout::enabled()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamStatus {
    Enabled,
    Disabled,
}

/// A handle to stdout that drops writes when disabled.
///
/// Write errors on an enabled stream are returned to the caller.
#[derive(Debug)]
pub struct Stdout {
    status: StreamStatus,
    lock: Option<StdoutLock<'static>>,
}

impl Stdout {
    const fn enabled() -> Self {
        Self {
            status: StreamStatus::Enabled,
            lock: None,
        }
    }

    const fn disabled() -> Self {
        Self {
            status: StreamStatus::Disabled,
            lock: None,
        }
    }

    /// Holds the stdout lock until this handle is dropped.
    #[must_use]
    pub fn lock(mut self) -> Self {
        if self.status == StreamStatus::Enabled {
            self.lock = Some(std::io::stdout().lock());
        }
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.status == StreamStatus::Enabled
    }

    fn handle(&mut self) -> Box<dyn Write + '_> {
        match self.lock.as_mut() {
            Some(lock) => Box::new(lock),
            None => Box::new(std::io::stdout()),
        }
    }
}

impl Write for Stdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.status {
            StreamStatus::Enabled => self.handle().write(buf),
            StreamStatus::Disabled => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.status {
            StreamStatus::Enabled => self.handle().flush(),
            StreamStatus::Disabled => Ok(()),
        }
    }
}
