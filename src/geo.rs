// ---------------------------------------------------------------------------
// ISO-3 geocoding table for the country map
// ---------------------------------------------------------------------------

/// A geocodable country: ISO-3 code, display name, and centroid (WGS84).
#[derive(Debug, Clone, Copy)]
pub struct CountryGeo {
    pub code: &'static str,
    pub name: &'static str,
    pub lon: f64,
    pub lat: f64,
}

const fn c(code: &'static str, name: &'static str, lon: f64, lat: f64) -> CountryGeo {
    CountryGeo {
        code,
        name,
        lon,
        lat,
    }
}

/// Countries the map can place. Codes absent from this table are silently
/// skipped by the renderer (ungeocoded), never an error.
pub const COUNTRIES: &[CountryGeo] = &[
    c("PRT", "Portugal", -8.0, 39.5),
    c("GBR", "United Kingdom", -2.0, 54.0),
    c("FRA", "France", 2.2, 46.6),
    c("ESP", "Spain", -3.7, 40.4),
    c("DEU", "Germany", 10.4, 51.1),
    c("ITA", "Italy", 12.6, 42.5),
    c("IRL", "Ireland", -8.0, 53.2),
    c("BEL", "Belgium", 4.5, 50.6),
    c("NLD", "Netherlands", 5.3, 52.2),
    c("CHE", "Switzerland", 8.2, 46.8),
    c("AUT", "Austria", 14.6, 47.6),
    c("SWE", "Sweden", 15.0, 62.0),
    c("NOR", "Norway", 9.0, 61.0),
    c("DNK", "Denmark", 9.5, 56.0),
    c("FIN", "Finland", 26.0, 64.0),
    c("POL", "Poland", 19.4, 52.1),
    c("CZE", "Czechia", 15.5, 49.8),
    c("HUN", "Hungary", 19.4, 47.2),
    c("ROU", "Romania", 25.0, 45.9),
    c("GRC", "Greece", 22.0, 39.0),
    c("TUR", "Turkey", 35.0, 39.0),
    c("RUS", "Russia", 90.0, 60.0),
    c("UKR", "Ukraine", 31.2, 49.0),
    c("BGR", "Bulgaria", 25.5, 42.7),
    c("HRV", "Croatia", 15.2, 45.1),
    c("SRB", "Serbia", 20.8, 44.0),
    c("SVK", "Slovakia", 19.7, 48.7),
    c("SVN", "Slovenia", 14.8, 46.1),
    c("EST", "Estonia", 25.0, 58.6),
    c("LVA", "Latvia", 24.6, 56.9),
    c("LTU", "Lithuania", 23.9, 55.2),
    c("LUX", "Luxembourg", 6.1, 49.8),
    c("ISL", "Iceland", -18.6, 65.0),
    c("MLT", "Malta", 14.4, 35.9),
    c("CYP", "Cyprus", 33.2, 35.0),
    c("ALB", "Albania", 20.0, 41.0),
    c("USA", "United States", -98.6, 39.8),
    c("CAN", "Canada", -106.3, 56.1),
    c("MEX", "Mexico", -102.5, 23.6),
    c("BRA", "Brazil", -51.9, -10.8),
    c("ARG", "Argentina", -64.0, -34.0),
    c("CHL", "Chile", -71.0, -35.7),
    c("COL", "Colombia", -74.3, 4.6),
    c("URY", "Uruguay", -55.8, -32.5),
    c("CHN", "China", 104.2, 35.9),
    c("JPN", "Japan", 138.3, 36.2),
    c("KOR", "South Korea", 127.8, 36.5),
    c("IND", "India", 78.9, 22.0),
    c("IDN", "Indonesia", 113.9, -0.8),
    c("THA", "Thailand", 101.0, 15.0),
    c("SGP", "Singapore", 103.8, 1.4),
    c("MYS", "Malaysia", 102.0, 4.2),
    c("PHL", "Philippines", 122.0, 13.0),
    c("VNM", "Vietnam", 106.0, 16.0),
    c("ISR", "Israel", 35.0, 31.4),
    c("ARE", "United Arab Emirates", 54.0, 24.0),
    c("SAU", "Saudi Arabia", 45.0, 24.0),
    c("IRN", "Iran", 53.0, 32.4),
    c("EGY", "Egypt", 30.0, 26.8),
    c("MAR", "Morocco", -7.1, 31.8),
    c("DZA", "Algeria", 2.6, 28.0),
    c("TUN", "Tunisia", 9.5, 34.0),
    c("ZAF", "South Africa", 24.7, -29.0),
    c("NGA", "Nigeria", 8.1, 9.1),
    c("AGO", "Angola", 17.9, -11.2),
    c("MOZ", "Mozambique", 35.5, -18.7),
    c("CPV", "Cabo Verde", -23.6, 15.1),
    c("AUS", "Australia", 133.8, -25.3),
    c("NZL", "New Zealand", 172.8, -41.3),
];

/// Look up a country by its ISO-3 code.
pub fn lookup(code: &str) -> Option<&'static CountryGeo> {
    COUNTRIES.iter().find(|g| g.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_codes_resolve() {
        let prt = lookup("PRT").unwrap();
        assert_eq!(prt.name, "Portugal");
        assert!(lookup("XYZ").is_none());
        assert!(lookup("UNK").is_none());
    }

    #[test]
    fn codes_are_unique_and_coordinates_in_range() {
        let mut seen = HashSet::new();
        for g in COUNTRIES {
            assert!(seen.insert(g.code), "duplicate code {}", g.code);
            assert!((-180.0..=180.0).contains(&g.lon), "{}", g.code);
            assert!((-90.0..=90.0).contains(&g.lat), "{}", g.code);
        }
    }
}
