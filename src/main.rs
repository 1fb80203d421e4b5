//! geoip-headers - GeoIP request enrichment server
//!
//! This is the composition root that wires together all the components.

use geoip_headers::adapters::inbound::{GeoIpLayer, HttpServer};
use geoip_headers::application::LookupRegistry;
use geoip_headers::config::load_config;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting geoip-headers name={} listen={} db={}",
        cfg.middleware_name,
        cfg.listen_addr,
        cfg.geoip.db_path
    );

    // ===== COMPOSITION ROOT =====

    // One registry per process, shared by every middleware instance
    let registry = Arc::new(LookupRegistry::maxmind());

    let geoip = GeoIpLayer::new(registry.clone(), &cfg.geoip, &cfg.middleware_name);
    if !registry.is_initialized() {
        tracing::warn!("running in degraded mode: all geo headers will be unknown");
    }

    let server = HttpServer::new(cfg.listen_addr, geoip);
    server.run().await
}
