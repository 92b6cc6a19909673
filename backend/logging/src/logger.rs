//! DefectScan log setup.
//!
//! Human-readable lines go to stdout. Every event is also written as one JSON
//! object per line to `<log_dir>/defectscan.log.YYYY-MM-DD`, a new file each
//! day, through a background writer so slow disks never stall a request.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name prefix for the daily log.
pub const LOG_FILE_PREFIX: &str = "defectscan.log";

/// Install the global subscriber for the DefectScan binary.
///
/// `RUST_LOG` overrides `level`. The returned guard flushes the file writer
/// when dropped, so hold it for the life of the process. If a subscriber is
/// already installed, the existing one is kept.
#[must_use = "dropping the guard stops file logging"]
pub fn init_logger(log_dir: impl AsRef<Path>, level: &str) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_writer, guard) =
        tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_PREFIX));

    let json_to_file = fmt::layer()
        .json()
        .with_current_span(false)
        .with_writer(file_writer)
        .with_ansi(false);
    let text_to_stdout = fmt::layer().with_target(false);

    if tracing_subscriber::registry()
        .with(filter)
        .with(text_to_stdout)
        .with(json_to_file)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global subscriber already set; keeping it");
    }

    guard
}
