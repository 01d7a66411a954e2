use std::{
    fs::File,
    path::Path,
    sync::{Mutex, OnceLock},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE: &str = "kubegraph.log";

static TRACER: OnceLock<()> = OnceLock::new();
static LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

pub fn setup_logger(
    log_dir: Option<&Path>,
    _ep: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    if TRACER.get().is_some() {
        return Ok(());
    }

    let file_layer = match log_dir {
        Some(dir) => {
            let file = File::create(dir.join(LOG_FILE))?;
            let (non_blocking_writer, guard) = tracing_appender::non_blocking(file);
            if let Ok(mut slot) = LOG_GUARD.lock() {
                *slot = Some(guard);
            }
            Some(
                fmt::layer()
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(non_blocking_writer),
            )
        }
        None => None,
    };

    let stderr_layer = fmt::layer().with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .ok();

    TRACER.set(()).ok();
    Ok(())
}

/// Flush buffered file output. Call before the process exits.
pub fn shutdown() {
    if let Ok(mut slot) = LOG_GUARD.lock() {
        slot.take();
    }
}
