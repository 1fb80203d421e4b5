//! Domain Entities - Core business objects
//!
//! These entities carry the outcome of a geolocation lookup. They have no
//! external dependencies and contain only business logic.

use serde::Serialize;

/// Sentinel written for any attribute that could not be determined.
pub const UNKNOWN: &str = "unknown";

/// Geographic attributes resolved for one IP address.
///
/// Produced per lookup and owned by the request that asked for it.
/// The Country variant leaves `region` and `city` at [`UNKNOWN`] and never
/// sets `postal_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoResult {
    /// Country code (ISO 3166-1 alpha-2)
    pub country: String,
    /// First-level subdivision code (ISO 3166-2 suffix, e.g. "CA" for California)
    pub region: String,
    /// City name (English)
    pub city: String,
    /// Postal code, City variant only
    pub postal_code: Option<String>,
}

impl GeoResult {
    pub fn new(country: String, region: String, city: String) -> Self {
        Self {
            country,
            region,
            city,
            postal_code: None,
        }
    }

    /// Attach a postal code.
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    /// The all-sentinel result used whenever a lookup fails.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN.to_string(), UNKNOWN.to_string(), UNKNOWN.to_string())
    }

    /// Whether every attribute is the sentinel.
    pub fn is_unknown(&self) -> bool {
        self.country == UNKNOWN
            && self.region == UNKNOWN
            && self.city == UNKNOWN
            && self.postal_code.is_none()
    }
}

/// Map an optional attribute to its value or the sentinel.
pub(crate) fn or_unknown(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_result() {
        let result = GeoResult::unknown();
        assert_eq!(result.country, "unknown");
        assert_eq!(result.region, "unknown");
        assert_eq!(result.city, "unknown");
        assert!(result.postal_code.is_none());
        assert!(result.is_unknown());
    }

    #[test]
    fn test_with_postal_code() {
        let result = GeoResult::new("US".into(), "CA".into(), "Mountain View".into())
            .with_postal_code("94043");

        assert_eq!(result.postal_code.as_deref(), Some("94043"));
        assert!(!result.is_unknown());
    }

    #[test]
    fn test_unknown_with_postal_is_not_unknown() {
        let result = GeoResult::unknown().with_postal_code("10115");
        assert!(!result.is_unknown());
    }

    #[test]
    fn test_or_unknown() {
        assert_eq!(or_unknown(Some("DE")), "DE");
        assert_eq!(or_unknown(Some("")), UNKNOWN);
        assert_eq!(or_unknown(None), UNKNOWN);
    }

    #[test]
    fn test_geo_result_equality() {
        let a = GeoResult::new("FR".into(), "IDF".into(), "Paris".into());
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, GeoResult::unknown());
    }

    #[test]
    fn test_geo_result_serializes() {
        let result = GeoResult::new("BR".into(), "SP".into(), "São Paulo".into());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["country"], "BR");
        assert_eq!(json["city"], "São Paulo");
        assert!(json["postal_code"].is_null());
    }
}
