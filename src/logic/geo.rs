//! Geo Resolver
//!
//! Static lookup from a 2-letter country code to display name and
//! coordinates. Pure and total: unknown codes resolve to the sentinel
//! entry, never fail.

/// One geo table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub lat: &'static str,
    pub lon: &'static str,
}

/// Sentinel code for origins that cannot be placed
pub const UNKNOWN_CODE: &str = "??";

/// Placeholder entry for unknown origins
pub const UNKNOWN_ENTRY: GeoEntry = GeoEntry {
    code: UNKNOWN_CODE,
    name: "Deep Web Proxy",
    lat: "0.00",
    lon: "0.00",
};

/// Fixed geo table. The sentinel is a regular member so the heuristics
/// generator can draw it like any other origin.
pub const GEO_TABLE: &[GeoEntry] = &[
    GeoEntry { code: "DE", name: "Germany", lat: "52.52", lon: "13.40" },
    GeoEntry { code: "RU", name: "Russia", lat: "55.75", lon: "37.61" },
    GeoEntry { code: "US", name: "USA", lat: "37.77", lon: "-122.41" },
    GeoEntry { code: "CN", name: "China", lat: "39.90", lon: "116.40" },
    GeoEntry { code: "IN", name: "India", lat: "28.61", lon: "77.20" },
    GeoEntry { code: "BR", name: "Brazil", lat: "-23.55", lon: "-46.63" },
    GeoEntry { code: "KP", name: "North Korea", lat: "39.03", lon: "125.75" },
    GeoEntry { code: "UA", name: "Ukraine", lat: "50.45", lon: "30.52" },
    GeoEntry { code: "GB", name: "UK", lat: "51.50", lon: "-0.12" },
    GeoEntry { code: "FR", name: "France", lat: "48.85", lon: "2.35" },
    GeoEntry { code: "NL", name: "Netherlands", lat: "52.36", lon: "4.89" },
    GeoEntry { code: "IL", name: "Israel", lat: "31.76", lon: "35.21" },
    GeoEntry { code: "JP", name: "Japan", lat: "35.67", lon: "139.65" },
    UNKNOWN_ENTRY,
];

/// Resolve a country code to its geo entry. Unrecognized codes fall back
/// to the unknown sentinel.
pub fn resolve(code: &str) -> &'static GeoEntry {
    GEO_TABLE
        .iter()
        .find(|entry| entry.code == code)
        .unwrap_or(&UNKNOWN_ENTRY)
}

// ============================================================================
// TESTS
// ============================================================================
