use tracing_forest::ForestLayer;
use tracing_subscriber::{filter, prelude::*, EnvFilter};

pub trait HttpTracingExt: tracing::Subscriber {
    /// Caps `tower_http` at INFO so per-request debug events stay out.
    fn with_http_tracing(self) -> tracing_subscriber::layer::Layered<filter::Targets, Self>
    where
        Self: Sized,
    {
        self.with(
            filter::Targets::new()
                .with_target("tower_http", tracing::Level::INFO)
                .with_default(tracing::Level::TRACE),
        )
    }
}

impl<S: tracing::Subscriber> HttpTracingExt for S {}

/// Installs the global subscriber. `RUST_LOG` wins over the `info` default.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with_http_tracing()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();
}
