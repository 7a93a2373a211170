//! Query locations for the station list endpoint.

use std::fmt;

use tracing::error;

/// Separates one location from the next in the configured location string.
pub const LOCATION_DELIMITER: char = '|';

/// Separates latitude, longitude and radius within one location.
pub const PARAMETER_DELIMITER: char = ';';

/// Error returned for a location segment that cannot be parsed.
///
/// `position` is 1-based and counts the non-empty segments of the input,
/// so it matches what an operator sees when reading the setting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "part {position} of location string does not match format \"<lat>;<lng>;<radius>\": {reason}"
)]
pub struct InvalidLocation {
    pub position: usize,
    pub reason: &'static str,
}

/// A point around which stations are listed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: u32,
}

impl Location {
    /// Create a location. Coordinates are not range-checked; the upstream
    /// API answers out-of-range queries with an empty list.
    pub fn new(latitude: f64, longitude: f64, radius_km: u32) -> Self {
        Self {
            latitude,
            longitude,
            radius_km,
        }
    }

    /// Parse one `<lat>;<lng>;<radius>` segment.
    ///
    /// Numbers use `.` as the decimal separator regardless of locale.
    /// Surrounding whitespace around each field is ignored.
    pub fn parse_segment(segment: &str, delimiter: char) -> Result<Self, &'static str> {
        let fields: Vec<&str> = segment
            .split(delimiter)
            .filter(|f| !f.is_empty())
            .collect();

        let [lat, lng, radius] = fields.as_slice() else {
            return Err("expected exactly 3 fields");
        };

        let latitude = parse_coordinate(lat).ok_or("latitude is not a number")?;
        let longitude = parse_coordinate(lng).ok_or("longitude is not a number")?;
        let radius_km = radius
            .trim()
            .parse::<u32>()
            .map_err(|_| "radius is not a non-negative integer")?;

        Ok(Self::new(latitude, longitude, radius_km))
    }
}

fn parse_coordinate(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{} km",
            self.latitude, self.longitude, self.radius_km
        )
    }
}

/// The ordered set of locations the job queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationSet(Vec<Location>);

impl LocationSet {
    /// Parse a location string using the default delimiters.
    ///
    /// Invalid segments are logged and skipped. Empty or entirely invalid
    /// input gives an empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// use tankpreise::domain::LocationSet;
    ///
    /// let set = LocationSet::parse("52.1;9.2;3|bad|52.3;9.4;5");
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(set.as_slice()[1].radius_km, 5);
    /// ```
    pub fn parse(raw: &str) -> Self {
        Self::parse_with(raw, LOCATION_DELIMITER, PARAMETER_DELIMITER)
    }

    /// Parse a location string with custom delimiters.
    pub fn parse_with(raw: &str, location_delimiter: char, parameter_delimiter: char) -> Self {
        let (set, rejected) = Self::parse_report(raw, location_delimiter, parameter_delimiter);
        for invalid in &rejected {
            error!(position = invalid.position, reason = invalid.reason, "{invalid}");
        }
        set
    }

    /// Parse a location string and return the rejected segments alongside
    /// the accepted locations, without logging.
    pub fn parse_report(
        raw: &str,
        location_delimiter: char,
        parameter_delimiter: char,
    ) -> (Self, Vec<InvalidLocation>) {
        let mut locations = Vec::new();
        let mut rejected = Vec::new();

        let segments = raw.split(location_delimiter).filter(|s| !s.is_empty());
        for (index, segment) in segments.enumerate() {
            match Location::parse_segment(segment, parameter_delimiter) {
                Ok(location) => locations.push(location),
                Err(reason) => rejected.push(InvalidLocation {
                    position: index + 1,
                    reason,
                }),
            }
        }

        (Self(locations), rejected)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Location> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Location] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Location>> for LocationSet {
    fn from(locations: Vec<Location>) -> Self {
        Self(locations)
    }
}

impl<'a> IntoIterator for &'a LocationSet {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(raw: &str) -> (LocationSet, Vec<InvalidLocation>) {
        LocationSet::parse_report(raw, LOCATION_DELIMITER, PARAMETER_DELIMITER)
    }

    #[test]
    fn skips_invalid_segment_and_reports_position() {
        let (set, rejected) = report("52.1;9.2;3|bad|52.3;9.4;5");

        assert_eq!(
            set.as_slice(),
            &[Location::new(52.1, 9.2, 3), Location::new(52.3, 9.4, 5)]
        );
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].position, 2);
        assert_eq!(rejected[0].reason, "expected exactly 3 fields");
    }

    #[test]
    fn empty_input_gives_empty_set() {
        let (set, rejected) = report("");
        assert!(set.is_empty());
        assert!(rejected.is_empty());
    }

    #[test]
    fn all_invalid_gives_empty_set() {
        let (set, rejected) = report("a;b;c|1;2|1;2;3;4");
        assert!(set.is_empty());
        let positions: Vec<usize> = rejected.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn trailing_delimiters_are_tolerated() {
        let (set, rejected) = report("52.1;9.2;3;|52.3;9.4;5|");
        assert_eq!(set.len(), 2);
        assert!(rejected.is_empty());
    }

    #[test]
    fn whitespace_around_fields_is_ignored() {
        let (set, _) = report(" 52.1 ; 9.2 ; 3 ");
        assert_eq!(set.as_slice(), &[Location::new(52.1, 9.2, 3)]);
    }

    #[test]
    fn negative_coordinates_parse() {
        let (set, _) = report("-33.86;151.2;10");
        assert_eq!(set.as_slice(), &[Location::new(-33.86, 151.2, 10)]);
    }

    #[test]
    fn rejects_negative_radius() {
        let (set, rejected) = report("52.1;9.2;-3");
        assert!(set.is_empty());
        assert_eq!(rejected[0].reason, "radius is not a non-negative integer");
    }

    #[test]
    fn rejects_fractional_radius() {
        let (_, rejected) = report("52.1;9.2;2.5");
        assert_eq!(rejected[0].reason, "radius is not a non-negative integer");
    }

    #[test]
    fn rejects_comma_decimal_separator() {
        let (_, rejected) = report("52,1;9.2;3");
        assert_eq!(rejected[0].reason, "latitude is not a number");
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let (_, rejected) = report("52.1;NaN;3");
        assert_eq!(rejected[0].reason, "longitude is not a number");
    }

    #[test]
    fn custom_delimiters() {
        let set = LocationSet::parse_with("52.1,9.2,3 52.3,9.4,5", ' ', ',');
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn error_display() {
        let err = InvalidLocation {
            position: 4,
            reason: "expected exactly 3 fields",
        };
        assert_eq!(
            err.to_string(),
            "part 4 of location string does not match format \"<lat>;<lng>;<radius>\": expected exactly 3 fields"
        );
    }

    #[test]
    fn display() {
        let location = Location::new(52.1, 9.25, 3);
        assert_eq!(location.to_string(), "52.1\t9.25\t3 km");
    }
}
