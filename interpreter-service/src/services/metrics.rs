use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Call once, from `main`.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("metrics recorder already initialized"))?;

    ::metrics::describe_counter!(
        "interpretations_total",
        "Interpretation requests by outcome"
    );
    ::metrics::describe_histogram!(
        "gemini_request_duration_seconds",
        "Latency of generateContent calls"
    );

    Ok(())
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Count one finished interpretation request.
pub fn record_interpretation(outcome: &'static str) {
    ::metrics::counter!("interpretations_total", "outcome" => outcome).increment(1);
}
