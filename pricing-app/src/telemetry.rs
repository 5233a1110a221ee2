//! OpenTelemetry export over OTLP/gRPC.
//!
//! Installs the global tracer and meter providers. The HTTP metrics layer
//! reads the global meter provider when the router is built, so this must
//! run before the server is constructed.

use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    metrics::{SdkMeterProvider, exporter::PushMetricExporter},
    propagation::TraceContextPropagator,
    trace as sdktrace,
};

/// Providers that must be shut down to flush pending telemetry.
pub struct Telemetry {
    pub tracer: sdktrace::Tracer,
    tracer_provider: sdktrace::SdkTracerProvider,
    meter_provider: SdkMeterProvider,
}

impl Telemetry {
    pub fn init(endpoint: &str) -> anyhow::Result<Self> {
        global::set_text_map_propagator(TraceContextPropagator::new());

        // Use gRPC exporter with batch processing (non-blocking)
        let span_exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()?;
        let tracer_provider = sdktrace::SdkTracerProvider::builder()
            .with_batch_exporter(span_exporter)
            .build();
        global::set_tracer_provider(tracer_provider.clone());

        let metric_exporter = opentelemetry_otlp::MetricExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()?;
        let meter_provider = install_meter_provider(metric_exporter);

        Ok(Self {
            tracer: tracer_provider.tracer("pricing-service"),
            tracer_provider,
            meter_provider,
        })
    }

    pub fn shutdown(self) {
        if let Err(e) = self.meter_provider.shutdown() {
            tracing::warn!("Failed to flush metrics: {}", e);
        }
        if let Err(e) = self.tracer_provider.shutdown() {
            tracing::warn!("Failed to flush traces: {}", e);
        }
    }
}

/// Exports metrics through `exporter` periodically and makes the provider
/// the global one.
fn install_meter_provider<E: PushMetricExporter>(exporter: E) -> SdkMeterProvider {
    let provider = SdkMeterProvider::builder()
        .with_periodic_exporter(exporter)
        .build();
    global::set_meter_provider(provider.clone());
    provider
}
