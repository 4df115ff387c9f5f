//! Periodic eviction of idle rate-ledger keys.
//!
//! Without this, every source that ever submitted keeps a (possibly empty)
//! entry for the life of the process.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time;

use crate::gate::clock::Clock;
use crate::observability::metrics;
use crate::security::rate_limit::{RateLedger, RatePolicy};

pub struct LedgerSweeper {
    ledger: Arc<dyn RateLedger>,
    clock: Arc<dyn Clock>,
    policy: RatePolicy,
    interval: Duration,
}

impl LedgerSweeper {
    pub fn new(
        ledger: Arc<dyn RateLedger>,
        clock: Arc<dyn Clock>,
        policy: RatePolicy,
        interval: Duration,
    ) -> Self {
        Self {
            ledger,
            clock,
            policy,
            interval,
        }
    }

    /// One pass over the ledger. Returns the number of keys dropped.
    pub fn sweep_once(&self) -> usize {
        let removed = self.ledger.sweep(self.clock.now_ms(), &self.policy);
        let remaining = self.ledger.tracked_keys();
        metrics::record_ledger_keys(remaining);

        if removed > 0 {
            tracing::debug!(removed, remaining, "Evicted idle rate limit entries");
        }
        removed
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(interval = ?self.interval, "Ledger sweeper starting");

        let mut ticker = time::interval(self.interval);
        // The first tick completes immediately; nothing to sweep at startup.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep_once();
                }
                _ = shutdown.recv() => {
                    tracing::info!("Ledger sweeper received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
