//! Periodic driver of the aggregator.
//!
//! # Design Decisions
//! - First cycle runs inline so readiness has data before traffic is accepted
//! - Cycles are awaited inside the task loop, so two cycles never overlap
//! - Ticks missed while a slow cycle runs are skipped, not replayed

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::health::aggregator::Aggregator;
use crate::health::probe::NodeProbe;
use crate::observability::metrics::GaugeSink;

pub struct Scheduler<P, G> {
    aggregator: Aggregator<P, G>,
    interval: Duration,
}

impl<P, G> Scheduler<P, G>
where
    P: NodeProbe + 'static,
    G: GaugeSink + 'static,
{
    pub fn new(aggregator: Aggregator<P, G>, interval: Duration) -> Self {
        Self {
            aggregator,
            interval,
        }
    }

    /// Run the first cycle, then hand off to a background task that runs one
    /// cycle per interval until `shutdown` fires.
    pub async fn start(self, shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        self.aggregator.run_cycle().await;
        tokio::spawn(self.run(shutdown))
    }

    async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs_f64(),
            endpoints = self.aggregator.endpoints().len(),
            "Health check scheduler starting"
        );

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.aggregator.run_cycle().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Health check scheduler received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
