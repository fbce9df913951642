use std::sync::Arc;

use crate::config::RelayConfig;
use crate::influx::InfluxWriter;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub writer: Arc<InfluxWriter>,
}

impl AppState {
    pub fn new(config: RelayConfig, writer: InfluxWriter) -> Self {
        Self {
            config: Arc::new(config),
            writer: Arc::new(writer),
        }
    }
}
