//! Application state for the postal tariff API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::TariffConfig;

/// Shared application state.
///
/// Holds the loaded tariff behind an `Arc`; handlers only read it, so no
/// locking is needed.
#[derive(Clone)]
pub struct AppState {
    config: Arc<TariffConfig>,
}

impl AppState {
    /// Creates a new application state with the given tariff.
    pub fn new(config: TariffConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the tariff.
    pub fn config(&self) -> &TariffConfig {
        &self.config
    }
}
