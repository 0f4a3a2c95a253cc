// src/seed.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::Config,
    models::{
        question::Question,
        user::{Role, User},
    },
    store::{Store, StoreError},
    utils::hash::hash_password_blocking,
};

/// Question set shipped with the binary, used when `QUESTIONS_FILE` is unset.
const BUNDLED_QUESTIONS: &str = include_str!("../data/questions.json");

/// Ensures the admin account and a non-empty question set exist.
/// Safe to run on every startup; the question source is only read while the
/// collection is still empty.
pub async fn seed_database(
    store: &dyn Store,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    seed_admin_user(store, config).await?;

    if !store.list_questions().await?.is_empty() {
        return Ok(());
    }

    let questions = load_questions(config).await?;
    if store.seed_questions(questions).await? {
        tracing::info!("Quiz questions seeded.");
    }
    Ok(())
}

async fn seed_admin_user(
    store: &dyn Store,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if store.find_user_by_email(&config.admin_email).await?.is_some() {
        return Ok(());
    }

    tracing::info!("Seeding admin user: {}", config.admin_email);
    let password = hash_password_blocking(config.admin_password.clone()).await?;

    let admin = User {
        id: Uuid::new_v4().to_string(),
        name: "Admin User".to_string(),
        email: config.admin_email.clone(),
        password,
        role: Role::Admin,
        created_at: Utc::now(),
    };

    match store.insert_user(admin).await {
        Ok(()) => tracing::info!("Admin user created successfully."),
        // Lost a race with another seeder; the account exists either way.
        Err(StoreError::DuplicateEmail(_)) => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn load_questions(
    config: &Config,
) -> Result<Vec<Question>, Box<dyn std::error::Error + Send + Sync>> {
    let questions: Vec<Question> = match &config.questions_file {
        Some(path) => serde_json::from_str(&tokio::fs::read_to_string(path).await?)?,
        None => serde_json::from_str(BUNDLED_QUESTIONS)?,
    };

    if questions.is_empty() {
        return Err("question set must not be empty".into());
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{store::MemoryStore, utils::hash::verify_password};

    #[test]
    fn bundled_questions_use_lettered_options() {
        let questions: Vec<Question> = serde_json::from_str(BUNDLED_QUESTIONS).unwrap();
        assert!(!questions.is_empty());
        for q in &questions {
            let ids: Vec<_> = q.options.iter().map(|o| o.id.as_str()).collect();
            assert_eq!(ids, ["A", "B", "C", "D"], "question {}", q.id);
        }
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let store = MemoryStore::new();
        let config = Config::for_tests("seed_test_secret");

        seed_database(&store, &config).await.unwrap();
        seed_database(&store, &config).await.unwrap();

        let doc = store.snapshot().await;
        assert_eq!(doc.users.len(), 1);
        assert_eq!(doc.users[0].role, Role::Admin);
        assert!(verify_password(&config.admin_password, &doc.users[0].password).unwrap());
        assert!(!doc.questions.is_empty());
    }

    #[tokio::test]
    async fn missing_questions_file_is_an_error() {
        let store = MemoryStore::new();
        let mut config = Config::for_tests("seed_test_secret");
        config.questions_file = Some("/definitely/not/here.json".to_string());

        assert!(seed_database(&store, &config).await.is_err());
    }

    #[tokio::test]
    async fn seeded_questions_skip_the_questions_file() {
        let store = MemoryStore::new();
        let mut config = Config::for_tests("seed_test_secret");
        seed_database(&store, &config).await.unwrap();
        let before = store.snapshot().await.questions;

        config.questions_file = Some("/definitely/not/here.json".to_string());
        seed_database(&store, &config).await.unwrap();

        assert_eq!(store.snapshot().await.questions, before);
    }
}
