//! Database adapters: connection management, PostgreSQL repositories, and
//! in-memory fallbacks.

mod connections;
mod memory;
mod postgres_base;
mod postgres_repo;

pub mod entity;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use memory::{InMemoryBlogRepository, InMemoryUserRepository};
pub use postgres_repo::{PostgresBlogRepository, PostgresUserRepository};
