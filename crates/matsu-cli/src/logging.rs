use colored::{ColoredString, Colorize};
use std::{fmt, time::Duration};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{FmtContext, FormatEvent, FormatFields, format},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

pub struct FormatElapsedTimeOptions {
    pub(crate) millis_yellow_threshold: u128,
    pub(crate) millis_red_threshold: u128,
}

impl Default for FormatElapsedTimeOptions {
    fn default() -> Self {
        Self {
            millis_yellow_threshold: 100,
            millis_red_threshold: 500,
        }
    }
}

impl FormatElapsedTimeOptions {
    /// Server start-up, where anything above a few hundred milliseconds is noticeable.
    pub fn server_start() -> Self {
        Self {
            millis_yellow_threshold: 200,
            millis_red_threshold: 1000,
        }
    }
}

pub fn format_elapsed_time(elapsed: Duration, options: &FormatElapsedTimeOptions) -> ColoredString {
    match elapsed.as_secs() {
        secs if secs > 60 => format!("{}m{}s", secs / 60, secs % 60).red(),
        secs if secs > 0 => format!("{:.2}s", elapsed.as_secs_f64()).red(),
        _ => match elapsed.as_millis() {
            millis if millis > options.millis_red_threshold => format!("{}ms", millis).red(),
            millis if millis > options.millis_yellow_threshold => format!("{}ms", millis).yellow(),
            millis if millis > 0 => format!("{}ms", millis).dimmed(),
            _ => format!("{}μs", elapsed.as_micros()).dimmed(),
        },
    }
}

pub struct EventLoggerFormatter;

impl<S, N> FormatEvent<S, N> for EventLoggerFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        if std::env::args().any(|arg| arg == "--quiet") {
            return Ok(());
        }

        if event.metadata().name() == "SKIP_FORMAT" {
            ctx.field_format().format_fields(writer.by_ref(), event)?;
            return writeln!(writer);
        }

        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string().dimmed();
        let event_name = event.metadata().name().to_ascii_lowercase();
        let event_name = if event_name.is_empty() {
            String::new()
        } else {
            let colored = match *event.metadata().level() {
                Level::ERROR => event_name.bold().bright_red(),
                Level::WARN => event_name.bold().yellow(),
                _ => event_name.bold().bright_yellow(),
            };
            format!(" {}", colored)
        };

        write!(writer, "{}{} ", timestamp, event_name)?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

pub fn init_logging() {
    let tracing_formatter = tracing_subscriber::fmt::layer().event_format(EventLoggerFormatter);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=info,tower_http=info", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_formatter)
        .init();
}
