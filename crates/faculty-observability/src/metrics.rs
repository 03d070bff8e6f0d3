use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracing::warn;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true) // Enabled by default
    })
}

/// Install the Prometheus recorder.
/// Returns None if observability is disabled or a recorder is already installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
}

// Business metrics helpers

pub fn track_rank_synchronized(rank: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("rank_synchronizations_total", "rank" => rank.to_string()).increment(1);
}

pub fn track_missing_permission(codename: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("missing_permissions_total", "codename" => codename.to_string()).increment(1);
}

pub fn track_keywords_highlighted(matches: u64) {
    if !is_observability_enabled() {
        return;
    }
    counter!("keywords_highlighted_total").increment(matches);
}

pub fn track_text_entry_created() {
    if !is_observability_enabled() {
        return;
    }
    counter!("text_entries_created_total").increment(1);
}
