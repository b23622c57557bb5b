//! Static catalog of Maldivian cities the dashboard offers.
//!
//! Coordinates point at the inhabited island the city is named after; the
//! upstream provider resolves them to its nearest grid cell.

use crate::types::City;

pub const CITIES: &[City] = &[
    City {
        name: "Malé",
        atoll: "Kaafu",
        latitude: 4.1755,
        longitude: 73.5093,
    },
    City {
        name: "Hulhumalé",
        atoll: "Kaafu",
        latitude: 4.2119,
        longitude: 73.5400,
    },
    City {
        name: "Addu City",
        atoll: "Seenu",
        latitude: -0.6301,
        longitude: 73.1585,
    },
    City {
        name: "Fuvahmulah",
        atoll: "Gnaviyani",
        latitude: -0.2988,
        longitude: 73.4239,
    },
    City {
        name: "Kulhudhuffushi",
        atoll: "Haa Dhaalu",
        latitude: 6.6221,
        longitude: 73.0700,
    },
    City {
        name: "Thinadhoo",
        atoll: "Gaafu Dhaalu",
        latitude: 0.5306,
        longitude: 72.9967,
    },
    City {
        name: "Naifaru",
        atoll: "Lhaviyani",
        latitude: 5.4442,
        longitude: 73.3662,
    },
    City {
        name: "Eydhafushi",
        atoll: "Baa",
        latitude: 5.1039,
        longitude: 73.0706,
    },
    City {
        name: "Mahibadhoo",
        atoll: "Alif Dhaalu",
        latitude: 3.7575,
        longitude: 72.9686,
    },
    City {
        name: "Dhidhdhoo",
        atoll: "Haa Alif",
        latitude: 6.8874,
        longitude: 73.1140,
    },
];

/// Look up a city by exact name, case-insensitively.
pub fn find(name: &str) -> Option<&'static City> {
    CITIES
        .iter()
        .find(|city| city.name.eq_ignore_ascii_case(name.trim()))
}

/// All cities whose name starts with `prefix`, case-insensitively.
/// An empty prefix matches the whole catalog.
pub fn search(prefix: &str) -> Vec<&'static City> {
    let needle = prefix.trim().to_lowercase();
    CITIES
        .iter()
        .filter(|city| city.name.to_lowercase().starts_with(&needle))
        .collect()
}
