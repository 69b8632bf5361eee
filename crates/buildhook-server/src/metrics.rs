use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use lazy_static::lazy_static;
use prometheus::IntCounter;

use crate::{Result, ServerError};

lazy_static! {
    pub static ref CHANGE_HOOKS_RECEIVED: IntCounter =
        IntCounter::new("change_hooks_received", "Change hooks received").unwrap();
    pub static ref CHANGES_EXTRACTED: IntCounter =
        IntCounter::new("changes_extracted", "Changes extracted from push events").unwrap();
    pub static ref CHANGES_DISPATCHED: IntCounter =
        IntCounter::new("changes_dispatched", "Changes acknowledged by the controller").unwrap();
    pub static ref DISPATCH_FAILURES: IntCounter =
        IntCounter::new("dispatch_failures", "Failed change dispatches").unwrap();
}

pub(crate) fn build_metrics_handler() -> Result<PrometheusMetrics> {
    let prometheus = PrometheusMetricsBuilder::new("buildhook")
        .endpoint("/metrics")
        .build()
        .map_err(|e| ServerError::MetricsError {
            reason: e.to_string(),
        })?;

    setup_process_metrics(&prometheus)?;

    for counter in [
        &*CHANGE_HOOKS_RECEIVED,
        &*CHANGES_EXTRACTED,
        &*CHANGES_DISPATCHED,
        &*DISPATCH_FAILURES,
    ] {
        prometheus
            .registry
            .register(Box::new(counter.clone()))
            .map_err(|e| ServerError::MetricsError {
                reason: e.to_string(),
            })?;
    }

    Ok(prometheus)
}

#[cfg(target_os = "linux")]
fn setup_process_metrics(metrics: &PrometheusMetrics) -> Result<()> {
    use prometheus::process_collector::ProcessCollector;

    metrics
        .registry
        .register(Box::new(ProcessCollector::for_self()))
        .map_err(|e| ServerError::MetricsError {
            reason: e.to_string(),
        })
}

#[cfg(not(target_os = "linux"))]
fn setup_process_metrics(_metrics: &PrometheusMetrics) -> Result<()> {
    tracing::debug!("Process metrics are only supported on Linux");
    Ok(())
}
