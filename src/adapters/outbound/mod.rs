mod maxmind_geo_resolver;

pub use maxmind_geo_resolver::{MaxMindCityResolver, MaxMindCountryResolver, MaxMindLoader};
