//! Domain types for fuel price collection.
//!
//! Locations are validated once at startup; stations and observations
//! are plain data handed between the cache, the collector and the mapper.

mod fuel;
mod location;
mod observation;
mod station;

pub use fuel::FuelType;
pub use location::{
    InvalidLocation, LOCATION_DELIMITER, Location, LocationSet, PARAMETER_DELIMITER,
};
pub use observation::PriceObservation;
pub use station::Station;
