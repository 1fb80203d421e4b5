//! geoip-headers Library
//!
//! Request-enrichment middleware: resolves the client IP against a MaxMind
//! City or Country database and injects the result as `X-GeoIP2-*` request
//! headers before calling the next service.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use adapters::inbound::{GeoIpLayer, GeoIpService, IpExtractor};
pub use adapters::outbound::MaxMindLoader;
pub use application::{Enrichment, EnrichmentService, InitOutcome, LookupRegistry};
pub use config::{load_config, GeoIpConfig};
pub use domain::entities::{GeoResult, UNKNOWN};
pub use domain::errors::{InitError, LookupError};
pub use domain::ports::{GeoResolver, ResolverLoader};
pub use domain::value_objects::DatabaseType;
