use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoastalSite {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub kind: &'static str,
}

const fn site(name: &'static str, lat: f64, lon: f64, kind: &'static str) -> CoastalSite {
    CoastalSite {
        name,
        lat,
        lon,
        kind,
    }
}

/// Zoom level used when flying to a site.
pub const SITE_ZOOM: u8 = 13;

pub static COASTAL_SITES: [CoastalSite; 25] = [
    // India
    site("Puri Beach, Odisha", 19.798, 85.824, "Erosion Risk"),
    site("Marine Drive, Mumbai", 18.944, 72.823, "Urban Coast"),
    site("Marina Beach, Chennai", 13.050, 80.282, "Sandy"),
    site("Varkala, Kerala", 8.737, 76.716, "Cliff"),
    site("Visakhapatnam", 17.704, 83.332, "Port City"),
    site("Lakshadweep", 10.566, 72.641, "Atoll"),
    site("Digha, WB", 21.626, 87.507, "Deltaic"),
    site("Rameswaram", 9.287, 79.312, "Coral"),
    site("Andaman Islands", 11.976, 92.987, "Mangrove"),
    site("Calangute, Goa", 15.549, 73.753, "Recreational"),
    // Global
    site("Gold Coast, Australia", -28.016, 153.400, "High Energy"),
    site("Miami Beach, USA", 25.790, -80.130, "Flood Risk"),
    site("Maldives", 3.202, 73.220, "Critical Level"),
    site("Dubai, UAE", 25.204, 55.270, "Artificial"),
    site("Cancun, Mexico", 21.161, -86.851, "Tourism"),
    site("Copacabana, Brazil", -22.969, -43.182, "Urban"),
    site("Nice, France", 43.696, 7.265, "Pebble"),
    site("Phuket, Thailand", 7.880, 98.392, "Tropical"),
    site("Bali, Indonesia", -8.409, 115.188, "Volcanic"),
    site("Cape Town, SA", -33.924, 18.424, "Rocky"),
    site("Santorini, Greece", 36.393, 25.461, "Caldera"),
    site("Bora Bora", -16.500, -151.741, "Lagoon"),
    site("Bondi Beach, Aus", -33.891, 151.277, "Bay"),
    site("Outer Banks, USA", 35.558, -75.466, "Barrier"),
    site("Cornwall, UK", 50.266, -5.052, "Rugged"),
];

pub fn find_site(name: &str) -> Option<&'static CoastalSite> {
    COASTAL_SITES.iter().find(|s| s.name == name)
}
