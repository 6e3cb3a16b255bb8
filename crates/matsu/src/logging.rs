use colored::{ColoredString, Colorize};
use env_logger::{Builder, Env};
use log::info;
use std::io::Write;
use std::time::Duration;

pub struct FormatElapsedTimeOptions {
    pub(crate) millis_yellow_threshold: u128,
    pub(crate) millis_red_threshold: u128,
    /// Wraps the formatted duration in parentheses, e.g. `(+12ms)`.
    pub(crate) relative: bool,
}

impl Default for FormatElapsedTimeOptions {
    fn default() -> Self {
        Self {
            millis_yellow_threshold: 100,
            millis_red_threshold: 500,
            relative: false,
        }
    }
}

impl FormatElapsedTimeOptions {
    /// Thresholds tuned for a single dispatch, which should feel instant.
    pub(crate) fn dispatch() -> Self {
        Self {
            millis_yellow_threshold: 16,
            millis_red_threshold: 50,
            relative: true,
        }
    }
}

/// Sets up `env_logger` with Matsu's output format. Safe to call more than once, later calls are ignored.
pub fn init_logging() {
    let logging_env = Env::default().filter_or("RUST_LOG", "info");
    let _ = Builder::from_env(logging_env)
        .format(|buf, record| {
            if std::env::args().any(|arg| arg == "--quiet") {
                return Ok(());
            }

            if record.target() == "SKIP_FORMAT" {
                return writeln!(buf, "{}", record.args());
            }

            let target = record.target().to_ascii_lowercase();
            let target = match record.level() {
                log::Level::Error => target.bold().bright_red(),
                log::Level::Warn => target.bold().yellow(),
                _ => target.bold().bright_yellow(),
            };

            writeln!(
                buf,
                "{} {} {}",
                chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
                target,
                record.args()
            )
        })
        .try_init();
}

pub fn format_elapsed_time(elapsed: Duration, options: &FormatElapsedTimeOptions) -> ColoredString {
    let result = match elapsed.as_millis() {
        millis if millis > 1000 => format!("{:.2}s", elapsed.as_secs_f64()).red(),
        millis if millis > options.millis_red_threshold => format!("{}ms", millis).red(),
        millis if millis > options.millis_yellow_threshold => format!("{}ms", millis).yellow(),
        millis if millis > 0 => format!("{}ms", millis).normal(),
        _ => format!("{}μs", elapsed.as_micros()).normal(),
    };

    if options.relative {
        let wrapped = format!("(+{})", result);
        match result.fgcolor {
            None => wrapped.dimmed(),
            Some(color) => wrapped.color(color),
        }
    } else {
        result
    }
}

pub fn print_title(title: &str) {
    info!(target: "SKIP_FORMAT", "{}", "");
    info!(target: "SKIP_FORMAT", "{}", format!(" {} ", title).on_magenta().bold());
}
