//! Bookshelf
//!
//! A small book catalog: a REST JSON API over an in-memory collection, and a
//! client-side state container that mirrors the collection and drives it.

use std::sync::Arc;

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the state (repository and services) described by `config`
    pub fn new(config: AppConfig) -> Self {
        let repository = repository::Repository::new(config.catalog.seed_sample_books);
        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
        }
    }
}
