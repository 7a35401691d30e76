use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Blog, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// Create and update are split rather than folded into a single upsert so
/// that handlers state which side of the lifecycle they are on.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Persist changes to an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Blog repository.
#[async_trait]
pub trait BlogRepository: BaseRepository<Blog, Uuid> {
    /// All blogs ordered by creation time, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Blog>, RepoError>;
}
