//! Logging & Tracing Setup
//!
//! Installs the global `tracing` subscriber. With an OTLP endpoint configured,
//! spans are also exported through OpenTelemetry.

use anyhow::Result;
use opentelemetry::trace::TracerProvider; // Import trait for .tracer()
use opentelemetry::{global, KeyValue};
use opentelemetry_sdk::{propagation::TraceContextPropagator, runtime, trace as sdktrace, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const DEFAULT_FILTER: &str = "herb_trace=info,tower_http=info";

/// Flushes exported spans on drop
pub struct TelemetryGuard {
    otlp: bool,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if self.otlp {
            global::shutdown_tracer_provider();
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_telemetry(service_name: &str, otlp: bool) -> Result<TelemetryGuard> {
    if !otlp {
        Registry::default()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()?;
        return Ok(TelemetryGuard { otlp: false });
    }

    global::set_text_map_propagator(TraceContextPropagator::new());

    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .build_span_exporter()?;

    let trace_config = sdktrace::Config::default().with_resource(Resource::new(vec![
        KeyValue::new("service.name", service_name.to_string()),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]));

    let provider = sdktrace::TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_config(trace_config)
        .build();

    global::set_tracer_provider(provider.clone());

    // provider.tracer() yields an sdk Tracer, which the tracing layer needs
    let tracer = provider.tracer(service_name.to_string());
    let telemetry = tracing_opentelemetry::layer().with_tracer(tracer);

    Registry::default()
        .with(env_filter())
        .with(telemetry)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()?;

    Ok(TelemetryGuard { otlp: true })
}
