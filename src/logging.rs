use std::{fmt::Result as FmtResult, io};

use time::{format_description::FormatItem, macros::format_description};
use tracing::{metadata::LevelFilter, Event, Subscriber};
use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling,
};
use tracing_subscriber::{
    fmt::{
        format::Writer,
        time::{FormatTime, UtcTime},
        FmtContext, FormatEvent, FormatFields, Layer,
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer as _,
};

/// Logs go to stderr and into a daily rolling file in `./logs`.
///
/// The returned guard must be held until the end of the program,
/// otherwise buffered file logs are lost.
pub fn init(quiet: bool, debug: bool) -> WorkerGuard {
    let formatter = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

    let stderr_layer = Layer::default()
        .event_format(TerminalEventFormat::new(formatter))
        .with_writer(io::stderr);

    let file_appender = rolling::daily("./logs", "gwent-scraper.log");
    let (file_writer, guard) = NonBlocking::new(file_appender);

    let file_layer = Layer::default()
        .event_format(FileEventFormat::new(formatter))
        .with_writer(file_writer);

    let stderr_filter = if quiet {
        EnvFilter::default()
    } else {
        let level = if debug {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        };

        EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy()
    };

    let file_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(stderr_layer.with_filter(stderr_filter))
        .with(file_layer.with_filter(file_filter))
        .init();

    guard
}

struct TerminalEventFormat<'f> {
    timer: UtcTime<&'f [FormatItem<'f>]>,
}

impl<'f> TerminalEventFormat<'f> {
    fn new(formatter: &'f [FormatItem<'f>]) -> Self {
        Self {
            timer: UtcTime::new(formatter),
        }
    }
}

impl<S, N> FormatEvent<S, N> for TerminalEventFormat<'_>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> FmtResult {
        self.timer.format_time(&mut writer)?;
        let metadata = event.metadata();

        write!(writer, " {:>5} ", metadata.level())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Same as the terminal format but with the source location.
struct FileEventFormat<'f> {
    timer: UtcTime<&'f [FormatItem<'f>]>,
}

impl<'f> FileEventFormat<'f> {
    fn new(formatter: &'f [FormatItem<'f>]) -> Self {
        Self {
            timer: UtcTime::new(formatter),
        }
    }
}

impl<S, N> FormatEvent<S, N> for FileEventFormat<'_>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> FmtResult {
        self.timer.format_time(&mut writer)?;
        let metadata = event.metadata();

        write!(
            writer,
            " {:>5} [{}:{}] ",
            metadata.level(),
            metadata.file().unwrap_or_else(|| metadata.target()),
            metadata.line().unwrap_or(0),
        )?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
