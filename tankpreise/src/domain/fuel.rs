//! Fuel grades reported by the price endpoint.

use std::fmt;

/// A fuel grade.
///
/// Upstream calls Super `e5`; the stored label is `"Super"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelType {
    Diesel,
    Super,
    E10,
}

impl FuelType {
    /// All grades, in the order observations are emitted.
    pub const ALL: [FuelType; 3] = [FuelType::Diesel, FuelType::Super, FuelType::E10];

    /// Label written to the `sorte` tag.
    pub fn label(self) -> &'static str {
        match self {
            FuelType::Diesel => "Diesel",
            FuelType::Super => "Super",
            FuelType::E10 => "E10",
        }
    }

    /// Field name used by the upstream API.
    pub fn api_name(self) -> &'static str {
        match self {
            FuelType::Diesel => "diesel",
            FuelType::Super => "e5",
            FuelType::E10 => "e10",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        let labels: Vec<&str> = FuelType::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, vec!["Diesel", "Super", "E10"]);
    }

    #[test]
    fn super_is_e5_upstream() {
        assert_eq!(FuelType::Super.api_name(), "e5");
        assert_eq!(FuelType::Super.to_string(), "Super");
    }
}
