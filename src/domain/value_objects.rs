//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};

/// Which MaxMind database schema is loaded.
///
/// City databases resolve down to city and postal code; Country databases
/// only carry the country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseType {
    /// GeoIP2/GeoLite2 City
    City,
    /// GeoIP2/GeoLite2 Country
    Country,
}

impl DatabaseType {
    /// Parse an explicit `dbType` setting.
    ///
    /// Matching is case-insensitive; anything else is `None`.
    ///
    /// # Examples
    /// ```
    /// use geoip_headers::DatabaseType;
    ///
    /// assert_eq!(DatabaseType::parse("City"), Some(DatabaseType::City));
    /// assert_eq!(DatabaseType::parse("country"), Some(DatabaseType::Country));
    /// assert_eq!(DatabaseType::parse("ASN"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "city" => Some(Self::City),
            "country" => Some(Self::Country),
            _ => None,
        }
    }

    /// Infer the variant from a database file path.
    ///
    /// "City" is checked before "Country", so a path carrying both markers
    /// resolves to City. Matching is case-sensitive, following MaxMind's
    /// `GeoLite2-City.mmdb` naming.
    pub fn infer_from_path(path: &str) -> Option<Self> {
        if path.contains(Self::City.as_str()) {
            Some(Self::City)
        } else if path.contains(Self::Country.as_str()) {
            Some(Self::Country)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::City => "City",
            Self::Country => "Country",
        }
    }

    /// Whether a database's own metadata type belongs to this variant.
    ///
    /// Enterprise databases are a superset of City.
    pub fn accepts_metadata(&self, database_type: &str) -> bool {
        match self {
            Self::City => database_type.contains("City") || database_type.contains("Enterprise"),
            Self::Country => database_type.contains("Country"),
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
