//! Application state - shared across all handlers.
//!
//! Repositories are injected here at construction time; handlers never
//! reach for a global connection.

use std::sync::Arc;

use quill_core::ports::{BlogRepository, UserRepository};
use quill_infra::database::{
    DatabaseConfig, DatabaseConnections, InMemoryBlogRepository, InMemoryUserRepository,
    PostgresBlogRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub blogs: Arc<dyn BlogRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        match db_config {
            Some(config) => match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    let users = Arc::new(PostgresUserRepository::new(connections.main.clone()));
                    let blogs = Arc::new(PostgresBlogRepository::new(connections.main));
                    tracing::info!("Application state initialized (postgres)");
                    Self { users, blogs }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        }
    }

    /// State backed entirely by in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            blogs: Arc::new(InMemoryBlogRepository::new()),
        }
    }
}
