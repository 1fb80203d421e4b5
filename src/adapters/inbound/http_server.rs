//! HTTP Server Adapter
//!
//! Serves a small echo application behind the geoip layer. The echo handler
//! stands in for the downstream service and reports the geo headers it saw.

use crate::adapters::inbound::geoip_layer::{
    GeoIpLayer, CITY_HEADER, COUNTRY_HEADER, IP_ADDRESS_HEADER, POSTAL_CODE_HEADER, REGION_HEADER,
};
use crate::infrastructure::shutdown_signal;
use axum::{
    http::{HeaderMap, HeaderName},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Geo headers as received by the downstream handler.
#[derive(Debug, Serialize)]
pub struct EchoResponse {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub ip_address: Option<String>,
    pub postal_code: Option<String>,
}

impl EchoResponse {
    fn from_headers(headers: &HeaderMap) -> Self {
        let get = |name: &HeaderName| {
            headers
                .get(name)
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        };
        Self {
            country: get(&COUNTRY_HEADER),
            region: get(&REGION_HEADER),
            city: get(&CITY_HEADER),
            ip_address: get(&IP_ADDRESS_HEADER),
            postal_code: get(&POSTAL_CODE_HEADER),
        }
    }
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn echo_handler(headers: HeaderMap) -> impl IntoResponse {
    Json(EchoResponse::from_headers(&headers))
}

/// Build the application router with `geoip` in front of every route.
pub fn router(geoip: GeoIpLayer) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .fallback(echo_handler)
        .layer(geoip)
        .layer(TraceLayer::new_for_http())
}

/// HTTP server hosting the enrichment middleware.
pub struct HttpServer {
    listen_addr: String,
    geoip: GeoIpLayer,
}

impl HttpServer {
    pub fn new(listen_addr: String, geoip: GeoIpLayer) -> Self {
        Self { listen_addr, geoip }
    }

    /// Run until Ctrl+C or SIGTERM.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self) -> anyhow::Result<()> {
        let app = router(self.geoip.clone());

        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!(
            "geoip middleware {} listening on {}",
            self.geoip.name(),
            self.listen_addr
        );

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}
