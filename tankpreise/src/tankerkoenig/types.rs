//! Tankerkönig API response DTOs.
//!
//! Upstream is loosely typed: postcodes arrive as numbers, house numbers
//! may be `null`, and an unavailable fuel is reported as `false` instead of
//! being omitted. These quirks are resolved here so the rest of the crate
//! only sees `String` and `Option<f64>`.

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::FuelType;

/// Status value of a price entry for a station that is currently open.
pub const STATUS_OPEN: &str = "open";

/// Response from `list.php`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    pub ok: bool,

    /// Error description when `ok` is false.
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub stations: Vec<ListStation>,
}

/// A station in the `list.php` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStation {
    pub id: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub brand: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub street: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub house_number: String,

    /// Sent as a JSON number by upstream.
    #[serde(default, deserialize_with = "lenient_string")]
    pub post_code: String,

    /// City.
    #[serde(default, deserialize_with = "lenient_string")]
    pub place: String,

    #[serde(default)]
    pub lat: Option<f64>,

    #[serde(default)]
    pub lng: Option<f64>,

    /// Distance from the query point in km.
    #[serde(default)]
    pub dist: Option<f64>,
}

/// Response from `prices.php`.
#[derive(Debug, Clone, Deserialize)]
pub struct PricesResponse {
    pub ok: bool,

    #[serde(default)]
    pub message: Option<String>,

    /// Price entries keyed by station id.
    #[serde(default)]
    pub prices: BTreeMap<String, PriceEntry>,
}

/// Current prices for one station.
///
/// `status` is `"open"`, `"closed"` or `"no prices"`; a missing or
/// non-text status decodes as empty and counts as not open. Fuel values are
/// `None` when upstream sent anything other than a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,

    #[serde(default, deserialize_with = "lenient_price")]
    pub diesel: Option<f64>,

    #[serde(default, deserialize_with = "lenient_price")]
    pub e5: Option<f64>,

    #[serde(default, deserialize_with = "lenient_price")]
    pub e10: Option<f64>,
}

impl PriceEntry {
    /// An open station with the given prices.
    pub fn open(diesel: Option<f64>, e5: Option<f64>, e10: Option<f64>) -> Self {
        Self {
            status: STATUS_OPEN.to_string(),
            diesel,
            e5,
            e10,
        }
    }

    /// An entry with the given status and no prices.
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            diesel: None,
            e5: None,
            e10: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == STATUS_OPEN
    }

    /// The price for a fuel grade, if upstream reported a number.
    pub fn price(&self, fuel: FuelType) -> Option<f64> {
        match fuel {
            FuelType::Diesel => self.diesel,
            FuelType::Super => self.e5,
            FuelType::E10 => self.e10,
        }
    }
}

/// Strings pass through and numbers are rendered; anything else (`null`,
/// booleans, arrays, objects) becomes empty so one odd field never fails
/// the whole response.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Numbers become `Some`, anything else (`false`, `null`, strings) `None`.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}
