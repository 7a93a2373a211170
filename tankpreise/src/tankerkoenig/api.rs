//! The seam between the collector and the upstream API.

use std::collections::BTreeMap;
use std::future::Future;

use crate::domain::{Location, Station};

use super::error::TankerkoenigError;
use super::types::PriceEntry;

/// Upstream operations the price collector needs.
///
/// An `Err` means "no result": callers skip the location or batch and
/// carry on with the rest of the run.
pub trait FuelApi: Send + Sync {
    /// List stations within `location.radius_km` of the location.
    fn list_stations(
        &self,
        location: &Location,
    ) -> impl Future<Output = Result<Vec<Station>, TankerkoenigError>> + Send;

    /// Fetch current prices for the given station ids, keyed by id.
    ///
    /// Upstream accepts at most ten ids per request.
    fn fetch_prices(
        &self,
        ids: &[String],
    ) -> impl Future<Output = Result<BTreeMap<String, PriceEntry>, TankerkoenigError>> + Send;
}
