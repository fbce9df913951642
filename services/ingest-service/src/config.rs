use std::time::Duration;

use relay_common::env_or;

/// Settings for the downstream InfluxDB v2 write endpoint.
#[derive(Clone)]
pub struct InfluxConfig {
    pub url: String,
    pub org: String,
    pub bucket: String,
    pub token: String,
    /// `None` waits on the downstream indefinitely.
    pub timeout: Option<Duration>,
}

/// Process configuration, resolved once at startup and shared read-only.
#[derive(Clone)]
pub struct RelayConfig {
    pub port: u16,
    pub api_token: String,
    pub max_body_bytes: usize,
    pub influx: InfluxConfig,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        let timeout_ms = env_or("INFLUXDB_TIMEOUT_MS", 0u64);
        Self {
            port: env_or("PORT", 7777u16),
            api_token: env_or("API_TOKEN", "1234567890".to_string()),
            max_body_bytes: env_or("MAX_BODY_BYTES", 100 * 1024usize),
            influx: InfluxConfig {
                url: env_or("INFLUXDB_URL", "http://localhost:8086".to_string()),
                org: env_or("INFLUXDB_ORG", "myorg".to_string()),
                bucket: env_or("INFLUXDB_BUCKET", "mybucket".to_string()),
                token: env_or("INFLUXDB_TOKEN", "1234567890".to_string()),
                timeout: (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms)),
            },
        }
    }

    pub fn log_startup(&self) {
        // Tokens stay out of the logs.
        tracing::info!(
            port = self.port,
            influx_url = %self.influx.url,
            influx_org = %self.influx.org,
            influx_bucket = %self.influx.bucket,
            influx_timeout_ms = self.influx.timeout.map(|timeout| timeout.as_millis() as u64),
            max_body_bytes = self.max_body_bytes,
            "relay configuration loaded"
        );
    }
}
