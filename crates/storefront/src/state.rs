//! Application state shared across handlers.

use std::sync::Arc;

use pehenava_core::{Catalog, MarketDirectory};

use crate::config::StorefrontConfig;
use crate::data::StoreData;
use crate::services::MailRelay;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything behind it is
/// immutable after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    data: StoreData,
    relay: Arc<dyn MailRelay>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `data` - Catalog and market directory loaded at startup
    /// * `relay` - Outbound mail relay used for seller applications
    #[must_use]
    pub fn new(config: StorefrontConfig, data: StoreData, relay: Arc<dyn MailRelay>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                data,
                relay,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.data.catalog
    }

    #[must_use]
    pub fn markets(&self) -> &MarketDirectory {
        &self.inner.data.markets
    }

    /// Get the mail relay.
    #[must_use]
    pub fn relay(&self) -> &dyn MailRelay {
        self.inner.relay.as_ref()
    }
}
