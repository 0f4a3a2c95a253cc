// src/store/mod.rs

//! Persistence for users, attempts and questions.
//!
//! All three collections live in one [`Document`]. Services only see the
//! [`Store`] trait, which exposes scoped per-collection operations; every
//! lookup is a linear scan.

pub mod json_file;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{attempt::Attempt, question::Question, user::User};

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("email '{0}' is already registered")]
    DuplicateEmail(String),
}

/// The whole persisted state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub attempts: Vec<Attempt>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Document {
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn find_user_by_id(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Appends `user`, rejecting an email that is already present.
    pub fn push_user(&mut self, user: User) -> Result<(), StoreError> {
        if self.find_user_by_email(&user.email).is_some() {
            return Err(StoreError::DuplicateEmail(user.email));
        }
        self.users.push(user);
        Ok(())
    }

    pub fn attempts_by_user(&self, user_id: &str) -> Vec<Attempt> {
        self.attempts
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::DuplicateEmail`] if the email is taken.
    async fn insert_user(&self, user: User) -> Result<(), StoreError>;

    async fn count_users(&self) -> Result<usize, StoreError>;

    async fn list_questions(&self) -> Result<Vec<Question>, StoreError>;

    /// Stores `questions` only if the collection is empty.
    /// Returns whether anything was written.
    async fn seed_questions(&self, questions: Vec<Question>) -> Result<bool, StoreError>;

    async fn insert_attempt(&self, attempt: Attempt) -> Result<(), StoreError>;

    async fn count_attempts(&self) -> Result<usize, StoreError>;

    async fn attempts_by_user(&self, user_id: &str) -> Result<Vec<Attempt>, StoreError>;
}

pub type SharedStore = Arc<dyn Store>;
