//! Domain errors
//!
//! None of these ever reach a request's caller: initialization errors put
//! the registry into degraded mode, lookup errors become sentinel headers.

use crate::domain::value_objects::DatabaseType;
use std::net::IpAddr;

/// Failure to bring up the lookup capability.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("database not found: {path}")]
    DatabaseNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported database type {0:?}")]
    UnsupportedType(String),
    #[error("failed to load database {path}: {reason}")]
    Load { path: String, reason: String },
    #[error("database {path} is {found:?}, expected a {expected} database")]
    IncompatibleDatabase {
        path: String,
        expected: DatabaseType,
        found: String,
    },
}

/// Failure of a single lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("invalid IP address {0:?}")]
    InvalidAddress(String),
    #[error("no record for {0}")]
    NotFound(IpAddr),
    #[error("database read failed: {0}")]
    Database(String),
    #[error("lookup database is not initialized")]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::net::Ipv4Addr;

    #[test]
    fn test_init_error_messages() {
        let err = InitError::UnsupportedType("ASN".to_string());
        assert_eq!(err.to_string(), "unsupported database type \"ASN\"");

        let err = InitError::IncompatibleDatabase {
            path: "GeoLite2-City.mmdb".to_string(),
            expected: DatabaseType::City,
            found: "GeoLite2-Country".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "database GeoLite2-City.mmdb is \"GeoLite2-Country\", expected a City database"
        );
    }

    #[test]
    fn test_not_found_keeps_io_source() {
        let err = InitError::DatabaseNotFound {
            path: "missing.mmdb".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("missing.mmdb"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_lookup_error_messages() {
        let ip = std::net::IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));
        assert_eq!(LookupError::NotFound(ip).to_string(), "no record for 192.0.2.1");
        assert_eq!(
            LookupError::InvalidAddress("not-an-ip".into()).to_string(),
            "invalid IP address \"not-an-ip\""
        );
        assert_eq!(
            LookupError::Unavailable.to_string(),
            "lookup database is not initialized"
        );
    }
}
