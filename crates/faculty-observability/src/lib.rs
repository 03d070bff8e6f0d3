//! Faculty Observability
//!
//! Console logging via `tracing-subscriber` and business counters via the
//! `metrics` facade with a Prometheus recorder.
//!
//! Compiled in with the `observability` feature (default). At runtime the
//! counters can be switched off with `OBSERVABILITY_ENABLED=false`.
//!
//! # Examples
//!
//! ```no_run
//! use faculty_observability::{init_console_logging, init_metrics};
//!
//! init_console_logging();
//! if let Some(handle) = init_metrics() {
//!     println!("{}", handle.render());
//! }
//! ```

#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

#[cfg(feature = "observability")]
pub use logging::init_console_logging;
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, is_observability_enabled, track_keywords_highlighted,
    track_missing_permission, track_rank_synchronized, track_text_entry_created,
};

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    /// Stand-in for the Prometheus handle; renders nothing.
    #[derive(Debug, Clone)]
    pub struct PrometheusHandle;

    impl PrometheusHandle {
        pub fn render(&self) -> String {
            String::new()
        }
    }

    pub fn is_observability_enabled() -> bool {
        false
    }

    pub fn init_console_logging() -> bool {
        false
    }

    pub fn init_metrics() -> Option<PrometheusHandle> {
        None
    }

    pub fn track_rank_synchronized(_rank: &str) {}
    pub fn track_missing_permission(_codename: &str) {}
    pub fn track_keywords_highlighted(_matches: u64) {}
    pub fn track_text_entry_created() {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
