use serde::Deserialize;

/// Default database file, matching MaxMind's download name.
pub const DEFAULT_DB_PATH: &str = "GeoLite2-Country.mmdb";

/// Settings for one geoip middleware instance.
///
/// Field names in JSON follow the plugin convention (`dbPath`,
/// `customIPHeader`, `dbType`).
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GeoIpConfig {
    #[serde(rename = "dbPath")]
    pub db_path: String,
    #[serde(rename = "customIPHeader")]
    pub custom_ip_header: Option<String>,
    #[serde(rename = "dbType")]
    pub db_type: Option<String>,
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            custom_ip_header: None,
            db_type: None,
        }
    }
}

impl GeoIpConfig {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }

    pub fn custom_ip_header(mut self, header: impl Into<String>) -> Self {
        self.custom_ip_header = Some(header.into());
        self
    }

    pub fn db_type(mut self, db_type: impl Into<String>) -> Self {
        self.db_type = Some(db_type.into());
        self
    }

    /// The custom IP header, if one is set and non-empty.
    pub fn effective_ip_header(&self) -> Option<&str> {
        self.custom_ip_header.as_deref().filter(|h| !h.is_empty())
    }

    /// The explicit database type, if one is set and non-empty.
    pub fn effective_db_type(&self) -> Option<&str> {
        self.db_type.as_deref().filter(|t| !t.is_empty())
    }

    /// Parse the JSON plugin form. Missing keys take their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub middleware_name: String,
    pub debug: bool,
    pub geoip: GeoIpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            middleware_name: "geoip".to_string(),
            debug: false,
            geoip: GeoIpConfig::default(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

pub fn load_config() -> anyhow::Result<Config> {
    let listen_addr = std::env::var("GEOIP_LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let middleware_name = std::env::var("GEOIP_MIDDLEWARE_NAME")
        .unwrap_or_else(|_| "geoip".to_string());

    let debug = std::env::var("DEBUG").is_ok();

    // File first, env on top
    let mut geoip = match non_empty_var("GEOIP_CONFIG_FILE") {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            GeoIpConfig::from_json(&raw)?
        }
        None => GeoIpConfig::default(),
    };

    if let Some(db_path) = non_empty_var("GEOIP_DB_PATH") {
        geoip.db_path = db_path;
    }
    if let Some(header) = non_empty_var("GEOIP_CUSTOM_IP_HEADER") {
        geoip.custom_ip_header = Some(header);
    }
    if let Some(db_type) = non_empty_var("GEOIP_DB_TYPE") {
        geoip.db_type = Some(db_type);
    }

    Ok(Config {
        listen_addr,
        middleware_name,
        debug,
        geoip,
    })
}
