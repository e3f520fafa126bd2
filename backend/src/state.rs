//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! The estimator is built and its constants validated once at startup;
//! handlers only ever read from it.

use crate::config::AppConfig;
use crate::services::EstimationService;
use anyhow::Result;
use std::sync::Arc;

/// Shared application state
///
/// All fields are wrapped in Arc so cloning per request is O(1).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Estimation service bound to the configured constants
    pub estimation: Arc<EstimationService>,
}

impl AppState {
    /// Create a new application state
    ///
    /// Fails if the configured estimation constants or macro defaults are
    /// invalid.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let estimation = EstimationService::new(&config)?;

        Ok(Self {
            config: Arc::new(config),
            estimation: Arc::new(estimation),
        })
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the estimation service
    #[inline]
    pub fn estimation(&self) -> &EstimationService {
        &self.estimation
    }
}
