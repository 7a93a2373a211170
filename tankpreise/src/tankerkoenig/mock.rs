//! In-memory fuel API for testing without network access.
//!
//! Serves canned station lists and price entries, and records every call
//! so tests can check which locations and batches were requested.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{Location, Station};

use super::api::FuelApi;
use super::error::TankerkoenigError;
use super::types::PriceEntry;

/// A request made against [`MockFuelApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    List(Location),
    Prices(Vec<String>),
}

#[derive(Debug, Default)]
struct MockState {
    stations: Vec<(Location, Vec<Station>)>,
    prices: BTreeMap<String, PriceEntry>,
    failing_ids: HashSet<String>,
    calls: Vec<MockCall>,
}

/// Fuel API double.
///
/// Listing a location with no registered stations fails, as does fetching
/// a batch that contains an id marked with [`MockFuelApi::fail_prices_for`].
/// Price lookups return only the registered entries for the requested ids.
#[derive(Debug, Clone, Default)]
pub struct MockFuelApi {
    state: Arc<Mutex<MockState>>,
}

impl MockFuelApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register the stations returned for a location, replacing any earlier set.
    pub fn set_stations(&self, location: Location, stations: Vec<Station>) {
        let mut state = self.state();
        state.stations.retain(|(l, _)| *l != location);
        state.stations.push((location, stations));
    }

    /// Make every location fail from now on.
    pub fn clear_stations(&self) {
        self.state().stations.clear();
    }

    /// Register the price entry returned for a station id.
    pub fn set_price(&self, id: impl Into<String>, entry: PriceEntry) {
        self.state().prices.insert(id.into(), entry);
    }

    /// Fail any price batch that contains this id.
    pub fn fail_prices_for(&self, id: impl Into<String>) {
        self.state().failing_ids.insert(id.into());
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    /// The id batches passed to `fetch_prices`, in order.
    pub fn price_batches(&self) -> Vec<Vec<String>> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                MockCall::Prices(ids) => Some(ids.clone()),
                MockCall::List(_) => None,
            })
            .collect()
    }

    /// Number of `list_stations` calls made so far.
    pub fn list_calls(&self) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| matches!(call, MockCall::List(_)))
            .count()
    }
}

impl FuelApi for MockFuelApi {
    async fn list_stations(&self, location: &Location) -> Result<Vec<Station>, TankerkoenigError> {
        let mut state = self.state();
        state.calls.push(MockCall::List(*location));

        state
            .stations
            .iter()
            .find(|(l, _)| l == location)
            .map(|(_, stations)| stations.clone())
            .ok_or_else(|| TankerkoenigError::Api {
                status: 503,
                message: format!("no mock stations for {location}"),
            })
    }

    async fn fetch_prices(
        &self,
        ids: &[String],
    ) -> Result<BTreeMap<String, PriceEntry>, TankerkoenigError> {
        let mut state = self.state();
        state.calls.push(MockCall::Prices(ids.to_vec()));

        if ids.iter().any(|id| state.failing_ids.contains(id)) {
            return Err(TankerkoenigError::Rejected {
                message: "mock batch failure".to_string(),
            });
        }

        Ok(ids
            .iter()
            .filter_map(|id| state.prices.get(id).map(|entry| (id.clone(), entry.clone())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(id: &str) -> Station {
        Station {
            id: id.into(),
            name: format!("Station {id}"),
            brand: "ESSO".into(),
            city: "Bremen".into(),
            postal_code: "28195".into(),
            street: "Am Wall 1".into(),
        }
    }

    #[tokio::test]
    async fn unknown_location_fails() {
        let api = MockFuelApi::new();
        let result = api.list_stations(&Location::new(1.0, 2.0, 3)).await;
        assert!(result.is_err());
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn serves_registered_stations() {
        let api = MockFuelApi::new();
        let here = Location::new(53.07, 8.8, 2);
        api.set_stations(here, vec![station("a"), station("b")]);

        let stations = api.list_stations(&here).await.unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(api.calls(), vec![MockCall::List(here)]);
    }

    #[tokio::test]
    async fn prices_only_for_requested_ids() {
        let api = MockFuelApi::new();
        api.set_price("a", PriceEntry::open(Some(1.5), None, None));
        api.set_price("b", PriceEntry::with_status("closed"));

        let prices = api.fetch_prices(&["a".to_string()]).await.unwrap();
        assert_eq!(prices.len(), 1);
        assert!(prices.contains_key("a"));
        assert_eq!(api.price_batches(), vec![vec!["a".to_string()]]);
    }

    #[tokio::test]
    async fn failing_id_fails_whole_batch() {
        let api = MockFuelApi::new();
        api.set_price("a", PriceEntry::open(Some(1.5), None, None));
        api.fail_prices_for("b");

        let result = api.fetch_prices(&["a".to_string(), "b".to_string()]).await;
        assert!(result.is_err());
    }
}
