use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Blog entity - a post owned by the user who created it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Create a new blog owned by `user_id`.
    pub fn new(user_id: Uuid, title: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `identity` is the owner recorded at creation time.
    ///
    /// Ownership gates update and delete; the `user_id` field itself is
    /// never reassignable.
    pub fn is_owned_by(&self, identity: Uuid) -> bool {
        self.user_id == identity
    }

    /// Apply an edit to the mutable fields, refreshing `updated_at`.
    pub fn edited(mut self, title: String, description: String) -> Self {
        self.title = title;
        self.description = description;
        self.updated_at = Utc::now();
        self
    }
}
