//! Named reference-point presets.

use super::{ReferencePoint, ReferenceSet};

/// Reference center of a supported country.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryCenter {
    /// ISO 3166-1 alpha-2 code
    pub code: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Latin American country reference centers.
pub const LATAM_COUNTRIES: &[CountryCenter] = &[
    CountryCenter { code: "BR", name: "Brazil", latitude: -15.7801, longitude: -47.9292 },
    CountryCenter { code: "AR", name: "Argentina", latitude: -34.6037, longitude: -58.3816 },
    CountryCenter { code: "CL", name: "Chile", latitude: -33.4489, longitude: -70.6693 },
    CountryCenter { code: "CO", name: "Colombia", latitude: 4.7110, longitude: -74.0721 },
    CountryCenter { code: "MX", name: "Mexico", latitude: 19.4326, longitude: -99.1332 },
    CountryCenter { code: "PE", name: "Peru", latitude: -12.0464, longitude: -77.0428 },
    CountryCenter { code: "EC", name: "Ecuador", latitude: -0.1807, longitude: -78.4678 },
    CountryCenter { code: "UY", name: "Uruguay", latitude: -34.9011, longitude: -56.1645 },
    CountryCenter { code: "PY", name: "Paraguay", latitude: -25.2637, longitude: -57.5759 },
    CountryCenter { code: "BO", name: "Bolivia", latitude: -16.5000, longitude: -68.1500 },
];

const BRAZIL_MAJOR_CITIES: &[(&str, f64, f64)] = &[
    ("São Paulo", -23.5505, -46.6333),
    ("Rio de Janeiro", -22.9068, -43.1729),
    ("Brasília", -15.7939, -47.8828),
    ("Salvador", -12.9714, -38.5014),
    ("Fortaleza", -3.7172, -38.5434),
];

impl CountryCenter {
    /// Look up a country by ISO code, case-insensitively.
    #[must_use]
    pub fn by_code(code: &str) -> Option<&'static Self> {
        LATAM_COUNTRIES
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    #[must_use]
    pub fn reference_point(&self) -> ReferencePoint {
        ReferencePoint::new(self.name, self.latitude, self.longitude)
    }
}

impl ReferenceSet {
    /// Brazil's five largest metropolitan centers.
    #[must_use]
    pub fn brazil_major_cities() -> Self {
        Self::new(
            BRAZIL_MAJOR_CITIES
                .iter()
                .map(|&(name, lat, lon)| ReferencePoint::new(name, lat, lon))
                .collect(),
        )
    }

    /// One reference center per supported Latin American country.
    #[must_use]
    pub fn latam_centers() -> Self {
        Self::new(
            LATAM_COUNTRIES
                .iter()
                .map(CountryCenter::reference_point)
                .collect(),
        )
    }

    /// Resolve a preset by name: `brazil`, `latam`, or a country code.
    ///
    /// `BR` maps to the major-city set; other codes yield a single center.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "brazil" | "br" => Some(Self::brazil_major_cities()),
            "latam" => Some(Self::latam_centers()),
            other => CountryCenter::by_code(other).map(|c| Self::new(vec![c.reference_point()])),
        }
    }

    /// All accepted preset names.
    #[must_use]
    pub fn preset_names() -> Vec<String> {
        let mut names = vec!["brazil".to_string(), "latam".to_string()];
        names.extend(LATAM_COUNTRIES.iter().map(|c| c.code.to_string()));
        names
    }
}
