use tracing::Span;
use tracing_subscriber::EnvFilter;

/// Named logging handle.
///
/// Built once at process start and handed to every component that reports progress,
/// so all events of a run carry the same logger name.
#[derive(Debug, Clone)]
pub struct Logger {
    span: Span,
}

impl Logger {
    pub fn new(name: &str) -> Self {
        Self {
            span: tracing::info_span!("logger", name = %name),
        }
    }

    /// Runs `f` with this logger's span entered.
    pub fn in_scope<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.span.in_scope(f)
    }
}

/// Installs the process-wide subscriber: timestamped, leveled, `INFO` unless overridden.
/// Call once, before the first `Logger` is used.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
