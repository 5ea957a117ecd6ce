//! Tracing subscriber setup shared by front-ends.

use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    /// 0 = warn, 1 = info, 2 = debug, 3+ = trace. `RUST_LOG` takes precedence.
    pub verbosity: u8,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl LogOptions {
    fn default_directive(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Installs the global subscriber and bridges `log` records into it.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(options: LogOptions) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.default_directive()));

    let registry = tracing_subscriber::registry().with(filter);

    if options.json {
        install(registry.with(fmt::layer().json().with_writer(std::io::stderr)));
    } else {
        install(registry.with(fmt::layer().with_target(false).with_writer(std::io::stderr)));
    }
}

fn install<S>(subscriber: S)
where
    S: Subscriber + Send + Sync + 'static,
{
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return;
    }
    if let Err(e) = tracing_log::LogTracer::init() {
        tracing::debug!("log bridge not installed: {}", e);
    }
}
