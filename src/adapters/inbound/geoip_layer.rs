//! GeoIP Enrichment Middleware
//!
//! A `tower` layer that geolocates each request's client address and writes
//! the result into request headers before calling the inner service. It
//! never touches the response and never fails a request.

use crate::adapters::inbound::ip_extractor::IpExtractor;
use crate::application::{Enrichment, EnrichmentService, LookupRegistry};
use crate::config::GeoIpConfig;
use crate::domain::entities::{GeoResult, UNKNOWN};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

pub const COUNTRY_HEADER: HeaderName = HeaderName::from_static("x-geoip2-country");
pub const REGION_HEADER: HeaderName = HeaderName::from_static("x-geoip2-region");
pub const CITY_HEADER: HeaderName = HeaderName::from_static("x-geoip2-city");
pub const IP_ADDRESS_HEADER: HeaderName = HeaderName::from_static("x-geoip2-ipaddress");
pub const POSTAL_CODE_HEADER: HeaderName = HeaderName::from_static("x-geoip2-postalcode");

/// Layer producing [`GeoIpService`].
///
/// Building a layer initializes the shared registry from its config (a
/// no-op if another instance already did).
#[derive(Clone)]
pub struct GeoIpLayer {
    name: Arc<str>,
    service: Arc<EnrichmentService>,
    extractor: IpExtractor,
}

impl GeoIpLayer {
    pub fn new(registry: Arc<LookupRegistry>, config: &GeoIpConfig, name: &str) -> Self {
        registry.initialize(config, name);
        Self {
            name: Arc::from(name),
            service: Arc::new(EnrichmentService::new(registry)),
            extractor: IpExtractor::new(config.effective_ip_header()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<S> Layer<S> for GeoIpLayer {
    type Service = GeoIpService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GeoIpService {
            inner,
            layer: self.clone(),
        }
    }
}

/// Service wrapper that enriches requests, then forwards them.
#[derive(Clone)]
pub struct GeoIpService<S> {
    inner: S,
    layer: GeoIpLayer,
}

impl<S> GeoIpService<S> {
    fn enrich<B>(&self, req: &mut Request<B>) {
        if self.layer.service.is_degraded() {
            write_unknown(req.headers_mut());
            return;
        }

        let raw_ip = self.layer.extractor.extract(req);
        let enrichment = self
            .layer
            .service
            .enrich(&String::from_utf8_lossy(raw_ip.as_bytes()));
        match enrichment {
            Enrichment::Degraded => write_unknown(req.headers_mut()),
            Enrichment::Resolved(geo) => write_resolved(&geo, raw_ip, req.headers_mut()),
        }
    }
}

impl<S, B> Service<Request<B>> for GeoIpService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        self.enrich(&mut req);
        self.inner.call(req)
    }
}

fn header_value(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static(UNKNOWN))
}

/// Degraded mode: every geo header, postal code included, is the sentinel.
fn write_unknown(headers: &mut HeaderMap) {
    let unknown = HeaderValue::from_static(UNKNOWN);
    headers.insert(COUNTRY_HEADER, unknown.clone());
    headers.insert(REGION_HEADER, unknown.clone());
    headers.insert(CITY_HEADER, unknown.clone());
    headers.insert(IP_ADDRESS_HEADER, unknown.clone());
    headers.insert(POSTAL_CODE_HEADER, unknown);
}

/// A lookup was attempted. The postal code header is left as received.
fn write_resolved(geo: &GeoResult, ip: HeaderValue, headers: &mut HeaderMap) {
    headers.insert(COUNTRY_HEADER, header_value(&geo.country));
    headers.insert(REGION_HEADER, header_value(&geo.region));
    headers.insert(CITY_HEADER, header_value(&geo.city));
    headers.insert(IP_ADDRESS_HEADER, ip);
}
