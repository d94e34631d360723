use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `ADPULSE__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

/// Analysis thresholds. Read-only after startup; injected into the
/// analyzer at construction so tests can vary them per instance.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ThresholdConfig {
    /// ROAS above this counts as strong (multiples of spend).
    #[serde(default = "default_good_roas")]
    pub good_roas: f64,
    /// CTR above this counts as strong, expressed in percent (2.0 = 2%).
    #[serde(default = "default_good_ctr")]
    pub good_ctr: f64,
    /// CPC above this is flagged, in account currency.
    #[serde(default = "default_high_cpc")]
    pub high_cpc: f64,
    /// Conversion counts below this are flagged.
    #[serde(default = "default_low_conversions")]
    pub low_conversions: u64,
    /// Shown to the same person more than this many times.
    #[serde(default = "default_high_frequency")]
    pub high_frequency: f64,
}

// Default functions
fn default_node_id() -> String {
    "node-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_good_roas() -> f64 {
    3.0
}
fn default_good_ctr() -> f64 {
    2.0
}
fn default_high_cpc() -> f64 {
    2.00
}
fn default_low_conversions() -> u64 {
    5
}
fn default_high_frequency() -> f64 {
    5.0
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            good_roas: default_good_roas(),
            good_ctr: default_good_ctr(),
            high_cpc: default_high_cpc(),
            low_conversions: default_low_conversions(),
            high_frequency: default_high_frequency(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("ADPULSE")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
