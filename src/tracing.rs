//! Log output for the keymapper binary
//!
//! Console lines go to stderr. `RUST_LOG` overrides the per-command default,
//! e.g. `RUST_LOG=keymapper::sink=info` prints every emulated key and joystick
//! change while replaying a script.
//!
//! Each run also writes crate debug output to `keymapper.log` in the config
//! logs dir, rotated daily.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "keymapper.log";
const FILE_FILTER: &str = "warn,keymapper=debug";

/// Install the global subscriber with `console_default` as the console filter
/// when `RUST_LOG` is unset.
///
/// The returned guard flushes the log file when dropped, so hold it until exit.
pub fn init(console_default: &str) -> Option<WorkerGuard> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(console_default));
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    let (file_layer, guard) = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new(FILE_FILTER));
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("keymapper: file logging disabled: {}", e);
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
    guard
}
