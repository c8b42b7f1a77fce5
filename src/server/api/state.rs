//! Centralized state management for the Actix web server
use std::fmt;
use std::sync::Arc;

use crate::db;
use crate::server::pipeline::AuthPipeline;
use crate::utils::config::Settings;

/// Global, read-only state
pub trait Global {
    /// Database connection
    fn db(&self) -> &db::DatabaseConnection;
    /// Third-party auth pipeline
    fn pipeline(&self) -> &dyn AuthPipeline;
    /// Service settings
    fn settings(&self) -> &Settings;
}

/// Application state
#[derive(Clone)]
pub struct App {
    /// Database connection
    pub db: db::DatabaseConnection,
    /// Third-party auth pipeline
    pub pipeline: Arc<dyn AuthPipeline>,
    /// Service settings
    pub settings: Settings,
}

impl Global for App {
    fn db(&self) -> &db::DatabaseConnection {
        &self.db
    }

    fn pipeline(&self) -> &dyn AuthPipeline {
        self.pipeline.as_ref()
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl fmt::Debug for App {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter
            .debug_struct("App")
            .field("db", &self.db)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
