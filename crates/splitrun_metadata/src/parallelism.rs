use std::fmt;
use std::str::FromStr;

/// The number of in-process workers requested with `--parallel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parallelism {
    /// One worker per available CPU.
    Auto,

    /// An explicit worker count.
    Workers(usize),
}

impl Parallelism {
    /// The number of workers this request resolves to on the current machine.
    pub fn workers(self) -> usize {
        match self {
            Self::Auto => splitrun_static::max_parallelism().get(),
            Self::Workers(workers) => workers,
        }
    }
}

impl fmt::Display for Parallelism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Workers(workers) => write!(f, "{workers}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is neither a number of workers nor `auto`")]
pub struct ParseParallelismError(String);

impl FromStr for Parallelism {
    type Err = ParseParallelismError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }

        value
            .parse::<usize>()
            .map(Self::Workers)
            .map_err(|_| ParseParallelismError(value.to_string()))
    }
}
