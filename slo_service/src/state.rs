use slo_core::TrackerConfig;
use slo_metrics::{PrometheusSink, SloTracker};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub start_time: Instant,
    pub tracker: Arc<SloTracker>,
    pub sink: Arc<PrometheusSink>,
    pub counters: Arc<RequestCounters>,
    ready: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: TrackerConfig) -> slo_metrics::Result<Self> {
        let sink = Arc::new(PrometheusSink::new()?);

        #[cfg(target_os = "linux")]
        {
            let collector = prometheus::process_collector::ProcessCollector::for_self();
            if let Err(e) = sink.registry().register(Box::new(collector)) {
                tracing::warn!("Process metrics unavailable: {}", e);
            }
        }

        let tracker = Arc::new(SloTracker::from_config(config, sink.clone()));

        Ok(Self {
            start_time: Instant::now(),
            tracker,
            sink,
            counters: Arc::new(RequestCounters::default()),
            ready: Arc::new(AtomicBool::new(true)),
        })
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Relaxed)
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Relaxed);
    }
}

/// Running request totals used to derive error ratios.
#[derive(Debug, Default)]
pub struct RequestCounters {
    total: AtomicU64,
    errors: AtomicU64,
    server_errors: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorRates {
    /// Share of responses with status >= 400.
    pub error_rate: f64,
    /// Share of responses with status >= 500.
    pub server_error_rate: f64,
}

impl RequestCounters {
    pub fn record(&self, status: u16) -> ErrorRates {
        let total = self.total.fetch_add(1, Ordering::Relaxed) + 1;
        let errors = if status >= 400 {
            self.errors.fetch_add(1, Ordering::Relaxed) + 1
        } else {
            self.errors.load(Ordering::Relaxed)
        };
        let server_errors = if status >= 500 {
            self.server_errors.fetch_add(1, Ordering::Relaxed) + 1
        } else {
            self.server_errors.load(Ordering::Relaxed)
        };

        ErrorRates {
            error_rate: errors as f64 / total as f64,
            server_error_rate: server_errors as f64 / total as f64,
        }
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}
