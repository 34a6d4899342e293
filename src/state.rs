use crate::config::Config;
use crate::lastfm::LastFmClient;
use crate::relay::RelayService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayService>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let client = LastFmClient::new(config.api_base.clone(), config.api_key.clone());
        Self {
            relay: Arc::new(RelayService::new(client, config.default_user.clone())),
        }
    }
}
