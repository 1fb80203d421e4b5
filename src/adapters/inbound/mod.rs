mod geoip_layer;
mod http_server;
mod ip_extractor;

pub use geoip_layer::{
    GeoIpLayer, GeoIpService, CITY_HEADER, COUNTRY_HEADER, IP_ADDRESS_HEADER, POSTAL_CODE_HEADER,
    REGION_HEADER,
};
pub use http_server::{router, EchoResponse, HttpServer};
pub use ip_extractor::IpExtractor;
