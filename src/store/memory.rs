// src/store/memory.rs

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Document, Store, StoreError};
use crate::models::{attempt::Attempt, question::Question, user::User};

/// Store that never touches disk. Used by tests.
#[derive(Default)]
pub struct MemoryStore {
    document: RwLock<Document>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> Document {
        self.document.read().await.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.document.read().await.find_user_by_email(email).cloned())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.document.read().await.find_user_by_id(id).cloned())
    }

    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        self.document.write().await.push_user(user)
    }

    async fn count_users(&self) -> Result<usize, StoreError> {
        Ok(self.document.read().await.users.len())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        Ok(self.document.read().await.questions.clone())
    }

    async fn seed_questions(&self, questions: Vec<Question>) -> Result<bool, StoreError> {
        let mut doc = self.document.write().await;
        if !doc.questions.is_empty() {
            return Ok(false);
        }
        doc.questions = questions;
        Ok(true)
    }

    async fn insert_attempt(&self, attempt: Attempt) -> Result<(), StoreError> {
        self.document.write().await.attempts.push(attempt);
        Ok(())
    }

    async fn count_attempts(&self) -> Result<usize, StoreError> {
        Ok(self.document.read().await.attempts.len())
    }

    async fn attempts_by_user(&self, user_id: &str) -> Result<Vec<Attempt>, StoreError> {
        Ok(self.document.read().await.attempts_by_user(user_id))
    }
}
