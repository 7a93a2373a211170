//! Single price readings.

use super::{FuelType, Station};

/// One fuel price reading for one station.
///
/// Borrows the station from the cache; observations are mapped to
/// entries straight away and never outlive a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceObservation<'a> {
    pub station: &'a Station,
    pub fuel: FuelType,
    pub price: f64,
}

impl<'a> PriceObservation<'a> {
    pub fn new(station: &'a Station, fuel: FuelType, price: f64) -> Self {
        Self {
            station,
            fuel,
            price,
        }
    }
}
