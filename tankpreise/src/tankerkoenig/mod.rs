//! Tankerkönig fuel price API client.
//!
//! Two endpoints are used:
//! - `list.php` returns the stations within a radius of a point
//! - `prices.php` returns current prices for up to ten station ids
//!
//! Both wrap their payload in an envelope with an `ok` flag; `ok: false`
//! carries a human-readable `message` and is surfaced as an error.

mod api;
mod client;
mod convert;
mod error;
#[cfg(test)]
mod mock;
mod types;

pub use api::FuelApi;
pub use client::{TankerkoenigClient, TankerkoenigConfig};
pub use convert::to_station;
pub use error::TankerkoenigError;
#[cfg(test)]
pub use mock::{MockCall, MockFuelApi};
pub use types::{ListResponse, ListStation, PriceEntry, PricesResponse};
