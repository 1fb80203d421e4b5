//! Enrichment Service - the single fallback policy
//!
//! Turns an extracted IP string into an [`Enrichment`]. Every failure kind
//! (unparseable address, no record, read error) collapses here into the
//! sentinel result, so the inbound adapter only has to write headers.

use crate::application::lookup_registry::LookupRegistry;
use crate::domain::entities::GeoResult;
use crate::domain::errors::LookupError;
use std::net::IpAddr;
use std::sync::Arc;

/// What the middleware should write for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    /// No lookup capability is bound.
    Degraded,
    /// A lookup was attempted; the sentinel result on failure.
    Resolved(GeoResult),
}

pub struct EnrichmentService {
    registry: Arc<LookupRegistry>,
}

impl EnrichmentService {
    pub fn new(registry: Arc<LookupRegistry>) -> Self {
        Self { registry }
    }

    /// Whether lookups can currently be served.
    pub fn is_degraded(&self) -> bool {
        !self.registry.is_initialized()
    }

    /// Enrich a request whose client address is `ip`.
    pub fn enrich(&self, ip: &str) -> Enrichment {
        let Some(resolver) = self.registry.current() else {
            return Enrichment::Degraded;
        };

        let result = ip
            .parse::<IpAddr>()
            .map_err(|_| LookupError::InvalidAddress(ip.to_string()))
            .and_then(|addr| resolver.resolve(addr));

        let geo = match result {
            Ok(geo) => {
                tracing::debug!("resolved ip={} country={} city={}", ip, geo.country, geo.city);
                geo
            }
            Err(e) => {
                tracing::warn!("unable to find: ip={}, err={}", ip, e);
                GeoResult::unknown()
            }
        };

        Enrichment::Resolved(geo)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::GeoIpConfig;
    use crate::domain::errors::InitError;
    use crate::domain::ports::{GeoResolver, ResolverLoader};
    use crate::domain::value_objects::DatabaseType;
    use std::net::Ipv4Addr;
    use std::path::Path;
    use tracing_test::traced_test;

    struct FixedResolver;

    impl GeoResolver for FixedResolver {
        fn resolve(&self, ip: IpAddr) -> Result<GeoResult, LookupError> {
            match ip {
                IpAddr::V4(v4) if v4 == Ipv4Addr::new(203, 0, 113, 7) => Ok(GeoResult::new(
                    "US".into(),
                    "CA".into(),
                    "San Jose".into(),
                )
                .with_postal_code("95141")),
                IpAddr::V4(v4) if v4 == Ipv4Addr::new(192, 0, 2, 99) => {
                    Err(LookupError::Database("bad record".into()))
                }
                other => Err(LookupError::NotFound(other)),
            }
        }

        fn database_type(&self) -> DatabaseType {
            DatabaseType::City
        }
    }

    struct FixedLoader;

    impl ResolverLoader for FixedLoader {
        fn load(&self, _: &Path, _: DatabaseType) -> Result<Arc<dyn GeoResolver>, InitError> {
            Ok(Arc::new(FixedResolver))
        }
    }

    fn ready_service() -> (EnrichmentService, tempfile::NamedTempFile) {
        let file = tempfile::Builder::new()
            .prefix("GeoLite2-City")
            .suffix(".mmdb")
            .tempfile()
            .unwrap();
        let registry = Arc::new(LookupRegistry::new(Arc::new(FixedLoader)));
        registry.initialize(
            &GeoIpConfig::new(file.path().to_string_lossy().into_owned()),
            "test",
        );
        (EnrichmentService::new(registry), file)
    }

    #[test]
    fn test_degraded_when_unset() {
        let service = EnrichmentService::new(Arc::new(LookupRegistry::new(Arc::new(FixedLoader))));
        assert!(service.is_degraded());
        assert_eq!(service.enrich("203.0.113.7"), Enrichment::Degraded);
    }

    #[test]
    fn test_enrich_success() {
        let (service, _file) = ready_service();
        assert!(!service.is_degraded());

        match service.enrich("203.0.113.7") {
            Enrichment::Resolved(geo) => {
                assert_eq!(geo.country, "US");
                assert_eq!(geo.region, "CA");
                assert_eq!(geo.city, "San Jose");
                assert_eq!(geo.postal_code.as_deref(), Some("95141"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    #[traced_test]
    fn test_enrich_invalid_address_is_unknown() {
        let (service, _file) = ready_service();

        for input in ["", "not-an-ip", "203.0.113.7:80", "[::1]", "999.1.1.1"] {
            assert_eq!(
                service.enrich(input),
                Enrichment::Resolved(GeoResult::unknown()),
                "input: {:?}",
                input
            );
        }
        assert!(logs_contain("unable to find"));
    }

    #[test]
    fn test_enrich_miss_and_read_error_match_parse_error() {
        let (service, _file) = ready_service();

        let miss = service.enrich("198.51.100.1");
        let read_error = service.enrich("192.0.2.99");
        let parse_error = service.enrich("garbage");

        for outcome in [miss, read_error, parse_error] {
            match outcome {
                Enrichment::Resolved(geo) => assert!(geo.is_unknown()),
                Enrichment::Degraded => panic!("service should not be degraded"),
            }
        }
    }

    #[test]
    fn test_enrich_ipv6_miss() {
        let (service, _file) = ready_service();
        match service.enrich("2001:db8::1") {
            Enrichment::Resolved(geo) => assert!(geo.is_unknown()),
            Enrichment::Degraded => panic!("service should not be degraded"),
        }
    }
}
