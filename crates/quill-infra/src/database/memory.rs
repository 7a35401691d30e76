//! In-memory repositories - used as fallback when no database is
//! configured, and by the API integration tests.
//!
//! Note: Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Blog, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, BlogRepository, UserRepository};

/// In-memory blog store using a HashMap behind an async RwLock.
#[derive(Default)]
pub struct InMemoryBlogRepository {
    store: RwLock<HashMap<Uuid, Blog>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Blog, Uuid> for InMemoryBlogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn insert(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&blog.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn update(&self, blog: Blog) -> Result<Blog, RepoError> {
        let mut store = self.store.write().await;
        if !store.contains_key(&blog.id) {
            return Err(RepoError::NotFound);
        }
        store.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn list_newest_first(&self) -> Result<Vec<Blog>, RepoError> {
        let store = self.store.read().await;
        let mut blogs: Vec<Blog> = store.values().cloned().collect();
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(blogs)
    }
}

/// In-memory user store, mirroring [`InMemoryBlogRepository`].
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&user.id) || store.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if !store.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }
}
