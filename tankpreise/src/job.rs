//! Scheduled jobs.

use std::future::Future;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::collector::{CollectionSummary, PriceCollector};
use crate::sink::Sink;
use crate::tankerkoenig::FuelApi;

/// Default polling interval between runs (6 min 23 s).
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(6 * 60 + 23);

/// A unit of work run on a fixed interval.
pub trait Job {
    /// Stable name used in logs.
    fn name(&self) -> &str;

    /// Run once. Failures are handled inside the job.
    fn execute(&mut self) -> impl Future<Output = ()>;
}

/// Collects fuel prices and queues them on a sink.
pub struct TankpreiseJob<A, S> {
    collector: PriceCollector<A>,
    sink: S,
    today: fn() -> NaiveDate,
}

impl<A: FuelApi, S: Sink> TankpreiseJob<A, S> {
    pub const NAME: &'static str = "Tankpreise";

    pub fn new(collector: PriceCollector<A>, sink: S) -> Self {
        Self {
            collector,
            sink,
            today: || Local::now().date_naive(),
        }
    }

    /// Use a different source for the current day.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn collector(&self) -> &PriceCollector<A> {
        &self.collector
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run one collection and return its counters.
    pub async fn run_once(&mut self) -> CollectionSummary {
        let today = (self.today)();
        let summary = self.collector.collect(today, &self.sink).await;
        info!(
            job = Self::NAME,
            stations = summary.stations,
            batches = summary.batches,
            failed_batches = summary.failed_batches,
            entries = summary.entries,
            "Collection finished"
        );
        summary
    }
}

impl<A: FuelApi, S: Sink> Job for TankpreiseJob<A, S> {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn execute(&mut self) {
        self.run_once().await;
    }
}

/// Run `job` every `interval` until `shutdown` completes.
///
/// The first run starts immediately. A run is never interrupted and runs
/// never overlap; if one overruns the interval the next starts as soon as
/// it finishes.
pub async fn run_polling<J: Job>(job: &mut J, interval: Duration, shutdown: impl Future<Output = ()>) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    info!(job = job.name(), interval_secs = interval.as_secs(), "Scheduling job");

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!(job = job.name(), "Shutting down");
                break;
            }
            _ = ticker.tick() => {
                debug!(job = job.name(), "Running job");
                job.execute().await;
            }
        }
    }
}
