use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{Instrument, info_span};

/// Counter of Riot API requests issued by the proxy.
#[derive(Debug)]
pub struct RequestMetrics {
    start: Instant,
    count: AtomicU64,
}

/// Point-in-time view of [`RequestMetrics`], served on the admin endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub riot_requests: u64,
    pub uptime_secs: u64,
    pub avg_per_minute: f64,
}

impl RequestMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            count: AtomicU64::new(0),
        })
    }

    pub fn inc(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let total = self.count.load(Ordering::Relaxed);
        let elapsed = self.start.elapsed();
        let elapsed_min = elapsed.as_secs_f64() / 60.0;
        let avg_per_minute = if elapsed_min > 0.0 {
            total as f64 / elapsed_min
        } else {
            0.0
        };

        MetricsSnapshot {
            riot_requests: total,
            uptime_secs: elapsed.as_secs(),
            avg_per_minute,
        }
    }

    pub async fn log_loop(self: Arc<Self>) {
        // Log once per minute
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            let span = info_span!("📊 ", client = "riot");
            async {
                interval.tick().await;
                let snapshot = self.snapshot();
                tracing::info!(
                    "{} requests executed (avg {:.2} req/min)",
                    snapshot.riot_requests,
                    snapshot.avg_per_minute
                );
            }
            .instrument(span)
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inc_increases_count() {
        let metrics = RequestMetrics::new();
        metrics.inc();
        metrics.inc();

        assert_eq!(metrics.snapshot().riot_requests, 2);
    }

    #[test]
    fn fresh_snapshot_never_divides_by_zero() {
        let snapshot = RequestMetrics::new().snapshot();

        assert_eq!(snapshot.riot_requests, 0);
        assert!(snapshot.avg_per_minute.is_finite());
    }

    #[tokio::test]
    async fn log_loop_runs_once() {
        tokio::time::pause();

        let metrics = RequestMetrics::new();
        let cloned = metrics.clone();
        let handle = tokio::spawn(async move { cloned.log_loop().await });

        tokio::time::advance(Duration::from_secs(61)).await;
        handle.abort();
        let _ = handle.await;
    }
}
