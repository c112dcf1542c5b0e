use std::fmt;
use std::fs::File;
use std::io::BufWriter;

use anyhow::Context;
use colored::Colorize;
use splitrun_static::EnvVars;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::VerbosityLevel;

/// Keeps the profiling output alive until the process exits.
#[must_use]
pub struct TracingGuard {
    _flame_guard: Option<tracing_flame::FlushGuard<BufWriter<File>>>,
}

/// Installs the global tracing subscriber.
///
/// `SPLITRUN_LOG` takes precedence over the verbosity flags, e.g.
/// `SPLITRUN_LOG=splitrun_runner=trace`.
pub fn setup_tracing(level: VerbosityLevel) -> anyhow::Result<TracingGuard> {
    let filter = match std::env::var(EnvVars::SPLITRUN_LOG) {
        Ok(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("Invalid `{}` value `{directives}`", EnvVars::SPLITRUN_LOG))?,
        Err(_) => EnvFilter::try_new(level.default_directives())?,
    };

    let (profiling_layer, flame_guard) = setup_profile()?;

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(profiling_layer);

    if level.is_trace() {
        registry
            .with(
                tracing_tree::HierarchicalLayer::default()
                    .with_indent_lines(true)
                    .with_indent_amount(2)
                    .with_bracketed_fields(true)
                    .with_targets(true)
                    .with_writer(std::io::stderr)
                    .with_timer(tracing_tree::time::Uptime::default()),
            )
            .try_init()
            .context("Failed to install the tracing subscriber")?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(SplitrunFormat {
                        display_timestamp: level.is_extra_verbose(),
                    })
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to install the tracing subscriber")?;
    }

    Ok(TracingGuard {
        _flame_guard: flame_guard,
    })
}

type FlameLayerParts<S> = (
    Option<tracing_flame::FlameLayer<S, BufWriter<File>>>,
    Option<tracing_flame::FlushGuard<BufWriter<File>>>,
);

fn setup_profile<S>() -> anyhow::Result<FlameLayerParts<S>>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    if let Ok("1" | "true") = std::env::var(EnvVars::SPLITRUN_LOG_PROFILE).as_deref() {
        let (layer, guard) = tracing_flame::FlameLayer::with_file("tracing.folded")
            .context("Failed to create `tracing.folded`")?;
        Ok((Some(layer), Some(guard)))
    } else {
        Ok((None, None))
    }
}

/// Renders events as `LEVEL message`, with a timestamp and target at `-vv`.
struct SplitrunFormat {
    display_timestamp: bool,
}

impl<S, N> FormatEvent<S, N> for SplitrunFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let colorize = colored::control::SHOULD_COLORIZE.should_colorize();

        if self.display_timestamp {
            let timestamp = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
            if colorize {
                write!(writer, "{} ", timestamp.dimmed())?;
            } else {
                write!(writer, "{timestamp} ")?;
            }
        }

        let level = *meta.level();
        if colorize {
            let styled = match level {
                Level::TRACE => "TRACE".magenta(),
                Level::DEBUG => "DEBUG".blue(),
                Level::INFO => "INFO".green(),
                Level::WARN => "WARN".yellow(),
                _ => "ERROR".red(),
            };
            write!(writer, "{} ", styled.bold())?;
        } else {
            write!(writer, "{level} ")?;
        }

        if self.display_timestamp {
            write!(writer, "{}: ", meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
