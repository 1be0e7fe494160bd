//! Real Sri Lankan sights for realistic test fixtures.
//!
//! Coordinates are approximate (OpenStreetMap), good enough for haversine
//! travel estimates.

use itinerary_planner::traits::Coordinates;
use itinerary_planner::visit_time::Category;

/// A named sight with coordinates and labels.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lon: f64,
    pub lat: f64,
    pub category: Category,
    pub region: &'static str,
    pub locality: &'static str,
}

impl Location {
    pub const fn new(
        name: &'static str,
        lon: f64,
        lat: f64,
        category: Category,
        region: &'static str,
        locality: &'static str,
    ) -> Self {
        Self {
            name,
            lon,
            lat,
            category,
            region,
            locality,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lon, self.lat)
    }
}

// ============================================================================
// Western Province
// ============================================================================

pub const COLOMBO: &[Location] = &[
    Location::new("Gangaramaya Temple", 79.8562, 6.9166, Category::Religious, "Western Province", "Colombo"),
    Location::new("Galle Face Green", 79.8450, 6.9271, Category::Viewpoint, "Western Province", "Colombo"),
    Location::new("National Museum of Colombo", 79.8612, 6.9101, Category::Museum, "Western Province", "Colombo"),
    Location::new("Pettah Market", 79.8531, 6.9367, Category::Shopping, "Western Province", "Colombo"),
];

// ============================================================================
// Central Province / Cultural Triangle
// ============================================================================

pub const HILL_COUNTRY: &[Location] = &[
    Location::new("Temple of the Tooth", 80.6413, 7.2936, Category::Religious, "Central Province", "Kandy"),
    Location::new("Royal Botanic Gardens Peradeniya", 80.5964, 7.2691, Category::Nature, "Central Province", "Peradeniya"),
    Location::new("Sigiriya Rock Fortress", 80.7600, 7.9570, Category::Heritage, "Central Province", "Sigiriya"),
    Location::new("Dambulla Cave Temple", 80.6490, 7.8567, Category::Heritage, "Central Province", "Dambulla"),
    Location::new("Nine Arches Bridge", 81.0607, 6.8768, Category::Viewpoint, "Uva Province", "Ella"),
];

// ============================================================================
// Southern Province
// ============================================================================

pub const SOUTH_COAST: &[Location] = &[
    Location::new("Galle Fort", 80.2170, 6.0260, Category::Heritage, "Southern Province", "Galle"),
    Location::new("Mirissa Beach", 80.4580, 5.9450, Category::Beach, "Southern Province", "Mirissa"),
    Location::new("Yala National Park", 81.5290, 6.3726, Category::Adventure, "Southern Province", "Yala"),
];

/// Every fixture location, west to south.
pub fn all_locations() -> Vec<Location> {
    COLOMBO
        .iter()
        .chain(HILL_COUNTRY)
        .chain(SOUTH_COAST)
        .cloned()
        .collect()
}
