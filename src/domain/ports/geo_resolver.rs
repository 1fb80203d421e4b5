//! GeoIP Resolver Port
//!
//! Defines the interface for resolving IP addresses to geographic locations,
//! and for constructing a resolver from a database file.

use crate::domain::entities::GeoResult;
use crate::domain::errors::{InitError, LookupError};
use crate::domain::value_objects::DatabaseType;
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;

/// Resolver for IP address to geographic location.
///
/// This is an outbound port that abstracts one loaded database variant.
/// Implementations must be safe for concurrent lookups without locking.
pub trait GeoResolver: Send + Sync {
    /// Resolve an IP address to geographic information.
    ///
    /// Returns `LookupError::NotFound` when the database has no record for
    /// the address.
    fn resolve(&self, ip: IpAddr) -> Result<GeoResult, LookupError>;

    /// The variant this resolver was built for.
    fn database_type(&self) -> DatabaseType;
}

/// Builds a [`GeoResolver`] for a database file of a given variant.
///
/// Loading is expensive; callers are expected to do it once per process.
pub trait ResolverLoader: Send + Sync {
    fn load(&self, path: &Path, db_type: DatabaseType) -> Result<Arc<dyn GeoResolver>, InitError>;
}
