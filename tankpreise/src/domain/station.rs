//! Fuel station metadata.

/// A fuel station as returned by the station list endpoint.
///
/// Stations are keyed by `id`, which upstream guarantees to be a stable
/// UUID. All other fields are display metadata used as time-series tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub city: String,
    pub postal_code: String,
    /// Street and house number, separated by a single space.
    pub street: String,
}

impl Station {
    /// Label used for the `name` tag: `"<city> - <name>"`.
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.city, self.name)
    }
}
