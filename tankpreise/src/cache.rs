//! Daily station cache.
//!
//! The station list changes rarely, so it is fetched once per calendar day
//! and reused for every price collection that day. The cache is either
//! empty or holds the stations of a single refresh day; it is never
//! partially cleared.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::Station;

/// Stations keyed by id, plus the day they were fetched.
#[derive(Debug, Clone, Default)]
pub struct StationCache {
    stations: BTreeMap<String, Station>,
    last_refresh_day: Option<NaiveDate>,
}

impl StationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the station list must be fetched before collecting prices.
    pub fn should_refresh(&self, today: NaiveDate) -> bool {
        self.stations.is_empty() || self.last_refresh_day != Some(today)
    }

    /// Clear the cache if it was filled on a different day.
    ///
    /// Returns `true` if the day changed.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.last_refresh_day == Some(today) {
            return false;
        }

        info!(
            last_day = ?self.last_refresh_day,
            cached = self.stations.len(),
            "New day reached, clearing station cache"
        );
        self.clear();
        true
    }

    /// Remove all stations.
    pub fn clear(&mut self) {
        self.stations.clear();
    }

    /// Add stations keyed by id. A station whose id is already cached
    /// replaces the earlier one.
    pub fn populate(&mut self, stations: impl IntoIterator<Item = Station>) {
        for station in stations {
            self.stations.insert(station.id.clone(), station);
        }
    }

    /// Record that a refresh pass for `today` has finished.
    ///
    /// Called even when some locations failed, so a partially filled cache
    /// is not refetched until the next day.
    pub fn mark_refreshed(&mut self, today: NaiveDate) {
        self.last_refresh_day = Some(today);
    }

    pub fn last_refresh_day(&self) -> Option<NaiveDate> {
        self.last_refresh_day
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.stations.contains_key(id)
    }

    /// Snapshot of all cached ids, in id order.
    pub fn ids(&self) -> Vec<String> {
        self.stations.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
