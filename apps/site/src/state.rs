use std::sync::Arc;

use crate::cms_client::ContentApi;
use crate::config::Config;
use crate::contact::desk::ContactDesk;
use crate::theme::ThemeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Content API backend. Default: `CmsClient`.
    pub cms: Arc<dyn ContentApi>,
    pub config: Config,
    pub theme: ThemeStore,
    pub contact: ContactDesk,
}

impl AppState {
    pub fn new(cms: Arc<dyn ContentApi>, config: Config) -> Self {
        let theme = ThemeStore::new(config.default_theme);
        let contact = ContactDesk::new(Arc::clone(&cms), config.contact_reset);
        Self {
            cms,
            config,
            theme,
            contact,
        }
    }

    pub fn media_base(&self) -> &str {
        &self.config.media_base_url
    }
}
