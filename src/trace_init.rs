#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// Install a JSON-lines file subscriber writing to `log_dir`.
///
/// Only the first call has an effect. `RUST_LOG` overrides the default
/// `romatype=debug` filter.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) {
    INIT.call_once(|| {
        let Ok(file_appender) = tracing_appender::rolling::RollingFileAppender::builder()
            .rotation(tracing_appender::rolling::Rotation::NEVER)
            .filename_prefix("romatype-trace.jsonl")
            .build(log_dir)
        else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .json()
            .with_writer(file_appender)
            .with_target(true)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("romatype=debug")),
            )
            .try_init();
    });
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) {}
