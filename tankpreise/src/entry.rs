//! Time-series entries and the mapping from price observations.

use crate::domain::PriceObservation;

/// Measurement name for all fuel price entries.
pub const MEASUREMENT: &str = "tankstellenPreise";

/// A generic time-series point: measurement, ordered tags, ordered fields.
///
/// Entries carry no timestamp; the sink stamps them when they are queued.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesEntry {
    pub measurement: String,
    pub tags: Vec<(String, String)>,
    pub fields: Vec<(String, f64)>,
}

impl TimeSeriesEntry {
    /// Look up a tag value by key.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a field value by key.
    pub fn field(&self, key: &str) -> Option<f64> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }
}

/// Maps price observations to `tankstellenPreise` entries.
pub struct EntryMapper;

impl EntryMapper {
    /// Build the entry for one observation.
    ///
    /// Tag order is `name`, `brand`, `sorte`, `tankstellenid`, `Ort`,
    /// `PLZ`, `Strasse`; the single field is `value`.
    pub fn map(observation: &PriceObservation<'_>) -> TimeSeriesEntry {
        let station = observation.station;
        let tags = [
            ("name", station.display_name()),
            ("brand", station.brand.clone()),
            ("sorte", observation.fuel.label().to_string()),
            ("tankstellenid", station.id.clone()),
            ("Ort", station.city.clone()),
            ("PLZ", station.postal_code.clone()),
            ("Strasse", station.street.clone()),
        ];

        TimeSeriesEntry {
            measurement: MEASUREMENT.to_string(),
            tags: tags
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            fields: vec![("value".to_string(), observation.price)],
        }
    }
}
