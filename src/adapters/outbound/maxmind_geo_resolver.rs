//! MaxMind GeoIP Resolvers
//!
//! Implements GeoResolver for the GeoIP2/GeoLite2 City and Country
//! databases, and the loader that picks between them.

use crate::domain::entities::{or_unknown, GeoResult, UNKNOWN};
use crate::domain::errors::{InitError, LookupError};
use crate::domain::ports::{GeoResolver, ResolverLoader};
use crate::domain::value_objects::DatabaseType;
use maxminddb::{geoip2, MaxMindDBError, Reader};
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;

/// Open a database file and check that its metadata matches `expected`.
fn open_reader(path: &Path, expected: DatabaseType) -> Result<Reader<Vec<u8>>, InitError> {
    let reader = Reader::open_readfile(path).map_err(|e| InitError::Load {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let found = &reader.metadata.database_type;
    if !expected.accepts_metadata(found) {
        return Err(InitError::IncompatibleDatabase {
            path: path.display().to_string(),
            expected,
            found: found.clone(),
        });
    }

    Ok(reader)
}

fn lookup_error(ip: IpAddr, err: MaxMindDBError) -> LookupError {
    match err {
        MaxMindDBError::AddressNotFoundError(_) => LookupError::NotFound(ip),
        other => LookupError::Database(other.to_string()),
    }
}

/// Resolver backed by a City database.
///
/// Region is the first subdivision's ISO code, city the English name.
pub struct MaxMindCityResolver {
    reader: Reader<Vec<u8>>,
}

impl MaxMindCityResolver {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InitError> {
        Ok(Self {
            reader: open_reader(path.as_ref(), DatabaseType::City)?,
        })
    }
}

impl GeoResolver for MaxMindCityResolver {
    fn resolve(&self, ip: IpAddr) -> Result<GeoResult, LookupError> {
        let record: geoip2::City = self.reader.lookup(ip).map_err(|e| lookup_error(ip, e))?;

        let country = or_unknown(record.country.as_ref().and_then(|c| c.iso_code));
        let region = or_unknown(
            record
                .subdivisions
                .as_ref()
                .and_then(|subs| subs.first())
                .and_then(|s| s.iso_code),
        );
        let city = or_unknown(
            record
                .city
                .as_ref()
                .and_then(|c| c.names.as_ref())
                .and_then(|names| names.get("en").copied()),
        );

        let result = GeoResult::new(country, region, city);
        match record.postal.and_then(|p| p.code) {
            Some(code) if !code.is_empty() => Ok(result.with_postal_code(code)),
            _ => Ok(result),
        }
    }

    fn database_type(&self) -> DatabaseType {
        DatabaseType::City
    }
}

/// Resolver backed by a Country database.
pub struct MaxMindCountryResolver {
    reader: Reader<Vec<u8>>,
}

impl MaxMindCountryResolver {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InitError> {
        Ok(Self {
            reader: open_reader(path.as_ref(), DatabaseType::Country)?,
        })
    }
}

impl GeoResolver for MaxMindCountryResolver {
    fn resolve(&self, ip: IpAddr) -> Result<GeoResult, LookupError> {
        let record: geoip2::Country = self.reader.lookup(ip).map_err(|e| lookup_error(ip, e))?;

        let country = or_unknown(record.country.and_then(|c| c.iso_code));
        Ok(GeoResult::new(country, UNKNOWN.to_string(), UNKNOWN.to_string()))
    }

    fn database_type(&self) -> DatabaseType {
        DatabaseType::Country
    }
}

/// Production loader: dispatches to the City or Country reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaxMindLoader;

impl ResolverLoader for MaxMindLoader {
    fn load(&self, path: &Path, db_type: DatabaseType) -> Result<Arc<dyn GeoResolver>, InitError> {
        let resolver: Arc<dyn GeoResolver> = match db_type {
            DatabaseType::City => Arc::new(MaxMindCityResolver::from_file(path)?),
            DatabaseType::Country => Arc::new(MaxMindCountryResolver::from_file(path)?),
        };
        Ok(resolver)
    }
}
