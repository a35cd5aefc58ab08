use std::sync::Arc;

use portada_core::{CardRenderer, DestinationConfig};

pub struct AppState {
    pub renderer: Arc<dyn CardRenderer>,
    pub config: DestinationConfig,
}
