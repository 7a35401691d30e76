//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! PostgreSQL repositories via SeaORM, in-memory repositories for
//! database-less runs and tests, and JWT/Argon2 auth services.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    DatabaseConfig, DatabaseConnections, InMemoryBlogRepository, InMemoryUserRepository,
    PostgresBlogRepository, PostgresUserRepository,
};
