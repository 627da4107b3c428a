use mediaforge_core::{BatchConverter, Config, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    batch: BatchConverter,
}

impl AppState {
    pub fn new(config: Config, batch: BatchConverter) -> Self {
        Self { config, batch }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn batch(&self) -> &BatchConverter {
        &self.batch
    }
}
