//! Price collection.
//!
//! One call to [`PriceCollector::collect`] is one job run:
//! 1. clear the station cache if the day changed
//! 2. refill it from every location if it is empty
//! 3. fetch prices in batches of [`BATCH_SIZE`] ids
//! 4. map open stations' prices to entries and queue them, one sink call
//!    per batch
//!
//! Upstream failures only ever cost the affected location or batch.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::cache::StationCache;
use crate::domain::{FuelType, LocationSet, PriceObservation};
use crate::entry::{EntryMapper, TimeSeriesEntry};
use crate::sink::Sink;
use crate::tankerkoenig::{FuelApi, PriceEntry};

/// Maximum number of station ids per price request (upstream limit).
pub const BATCH_SIZE: usize = 10;

/// Retry hint passed to the sink with every batch.
pub const RETRY_HINT: u32 = 5;

/// Counters for one collection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionSummary {
    /// Stations in the cache when prices were requested.
    pub stations: usize,
    /// Price requests made.
    pub batches: usize,
    /// Price requests that failed.
    pub failed_batches: usize,
    /// Entries handed to the sink.
    pub entries: usize,
}

/// Collects prices for the stations around a fixed set of locations.
pub struct PriceCollector<A> {
    api: A,
    locations: LocationSet,
    cache: StationCache,
    target: String,
}

impl<A: FuelApi> PriceCollector<A> {
    /// `target` is the database the sink writes to.
    pub fn new(api: A, locations: LocationSet, target: impl Into<String>) -> Self {
        Self {
            api,
            locations,
            cache: StationCache::new(),
            target: target.into(),
        }
    }

    pub fn cache(&self) -> &StationCache {
        &self.cache
    }

    pub fn locations(&self) -> &LocationSet {
        &self.locations
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Run one collection for `today`, queueing entries on `sink`.
    pub async fn collect<S: Sink + ?Sized>(
        &mut self,
        today: NaiveDate,
        sink: &S,
    ) -> CollectionSummary {
        self.cache.roll_over(today);

        if self.cache.should_refresh(today) {
            info!("No stations known, requesting station list");
            self.refresh(today).await;
        }

        let ids = self.cache.ids();
        let mut summary = CollectionSummary {
            stations: ids.len(),
            ..Default::default()
        };

        for batch in batches(&ids) {
            summary.batches += 1;
            info!(ids = ?batch, "Requesting prices");

            let prices = match self.api.fetch_prices(batch).await {
                Ok(prices) => prices,
                Err(e) => {
                    warn!(error = %e, batch_size = batch.len(), "Price request failed, skipping batch");
                    summary.failed_batches += 1;
                    continue;
                }
            };

            let entries: Vec<TimeSeriesEntry> = observations(&self.cache, &prices)
                .iter()
                .map(EntryMapper::map)
                .collect();

            if entries.is_empty() {
                debug!("No open stations with prices in batch");
                continue;
            }

            summary.entries += entries.len();
            sink.enqueue(entries, RETRY_HINT, &self.target);
        }

        summary
    }

    /// Query every location and fill the cache with what comes back.
    async fn refresh(&mut self, today: NaiveDate) {
        for location in &self.locations {
            info!(%location, "Requesting station list");
            match self.api.list_stations(location).await {
                Ok(stations) => {
                    debug!(%location, count = stations.len(), "Received stations");
                    self.cache.populate(stations);
                }
                Err(e) => {
                    warn!(%location, error = %e, "Station list request failed");
                }
            }
        }

        // Advances even after a partial failure; a failed location is only
        // retried once the cache empties or the day changes.
        self.cache.mark_refreshed(today);
        info!(count = self.cache.len(), day = %today, "Station cache refreshed");
    }
}

/// Split ids into request batches of at most [`BATCH_SIZE`].
pub fn batches(ids: &[String]) -> std::slice::Chunks<'_, String> {
    ids.chunks(BATCH_SIZE)
}

/// Turn a price response into observations.
///
/// Skips stations that are not open or not cached, and fuel grades
/// without a numeric price.
pub fn observations<'a>(
    cache: &'a StationCache,
    prices: &BTreeMap<String, PriceEntry>,
) -> Vec<PriceObservation<'a>> {
    let mut observations = Vec::new();

    for (id, entry) in prices {
        if !entry.is_open() {
            continue;
        }
        let Some(station) = cache.get(id) else {
            continue;
        };

        for fuel in FuelType::ALL {
            if let Some(price) = entry.price(fuel) {
                observations.push(PriceObservation::new(station, fuel, price));
            }
        }
    }

    observations
}
