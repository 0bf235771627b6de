use std::sync::Arc;

use crate::config::Settings;
use crate::matrix::{DeliveryError, MatrixClient, NoticeSink};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub sink: Arc<dyn NoticeSink>,
}

impl AppState {
    /// State delivering to the configured Matrix room
    pub fn new(settings: Settings) -> Result<Self, DeliveryError> {
        let client = MatrixClient::new(&settings.matrix)?;
        Ok(Self::with_sink(settings, Arc::new(client)))
    }

    pub fn with_sink(settings: Settings, sink: Arc<dyn NoticeSink>) -> Self {
        Self {
            settings: Arc::new(settings),
            sink,
        }
    }
}
