use crate::config::Config;
use crate::service::KittenService;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: KittenService,
    pub config: Arc<Config>,
}
