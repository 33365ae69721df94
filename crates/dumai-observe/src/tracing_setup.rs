//! Process-wide log and span output for the `dumai` binary.
//!
//! The CLI picks a default filter from `-v`/`-q` and passes it here; an
//! explicit `RUST_LOG` replaces it. Every `chat_turn` and `groq_completion`
//! span is logged when it closes, so request latency shows up without extra
//! instrumentation. `--otel` also ships those spans to an OpenTelemetry
//! stdout exporter for local inspection.
//!
//! ```no_run
//! dumai_observe::tracing_setup::init_tracing("warn,dumai=info", false).unwrap();
//! // ... serve requests ...
//! dumai_observe::tracing_setup::shutdown_tracing();
//! ```

use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Instrumentation scope reported on exported spans.
pub const TRACER_NAME: &str = "dumai";

/// Set once by `--otel`; flushed by [`shutdown_tracing`].
static SPAN_EXPORT: OnceLock<SdkTracerProvider> = OnceLock::new();

/// `RUST_LOG` if it parses, otherwise the CLI's verbosity filter.
pub fn env_filter(verbosity_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity_filter))
}

fn stdout_span_export() -> SdkTracerProvider {
    SdkTracerProvider::builder()
        .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
        .build()
}

/// Install the global subscriber for the `dumai` process.
///
/// Fails when a subscriber is already installed, which only happens if this
/// is called twice.
pub fn init_tracing(
    verbosity_filter: &str,
    export_spans: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let span_export = export_spans.then(|| {
        let provider = stdout_span_export();
        let tracer = provider.tracer(TRACER_NAME);
        let _ = SPAN_EXPORT.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);
        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    tracing_subscriber::registry()
        .with(env_filter(verbosity_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_span_events(FmtSpan::CLOSE),
        )
        .with(span_export)
        .try_init()?;

    tracing::debug!(export_spans, "Tracing initialized");
    Ok(())
}

/// Flush spans still buffered by `--otel`. Does nothing without it.
pub fn shutdown_tracing() {
    let Some(provider) = SPAN_EXPORT.get() else {
        return;
    };
    if let Err(e) = provider.shutdown() {
        eprintln!("Warning: span export shutdown failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_uses_verbosity_filter_without_rust_log() {
        if std::env::var("RUST_LOG").is_err() {
            assert_eq!(env_filter("warn").to_string(), "warn");
        }
    }

    #[test]
    fn test_shutdown_without_span_export_is_noop() {
        shutdown_tracing();
        assert!(SPAN_EXPORT.get().is_none());
    }
}
