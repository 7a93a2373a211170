//! Conversion from API DTOs to domain types.

use crate::domain::Station;

use super::types::ListStation;

/// Convert a listed station into the cached domain form.
///
/// Street and house number are joined with a space; an empty house number
/// leaves the street as-is.
pub fn to_station(dto: ListStation) -> Station {
    let street = match dto.house_number.trim() {
        "" => dto.street,
        number => format!("{} {}", dto.street, number),
    };

    Station {
        id: dto.id,
        name: dto.name,
        brand: dto.brand,
        city: dto.place,
        postal_code: dto.post_code,
        street,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(house_number: &str) -> ListStation {
        ListStation {
            id: "005056ba-7cb6-1ed2-bceb-82ea369c0d2d".into(),
            name: "Aral Tankstelle".into(),
            brand: "ARAL".into(),
            street: "Podbielskistraße".into(),
            house_number: house_number.into(),
            post_code: "30177".into(),
            place: "Hannover".into(),
            lat: Some(52.39),
            lng: Some(9.76),
            dist: Some(0.8),
        }
    }

    #[test]
    fn joins_street_and_house_number() {
        let station = to_station(dto("285"));
        assert_eq!(station.street, "Podbielskistraße 285");
        assert_eq!(station.city, "Hannover");
        assert_eq!(station.postal_code, "30177");
        assert_eq!(station.brand, "ARAL");
    }

    #[test]
    fn missing_house_number_leaves_street() {
        assert_eq!(to_station(dto("")).street, "Podbielskistraße");
        assert_eq!(to_station(dto("  ")).street, "Podbielskistraße");
    }
}
