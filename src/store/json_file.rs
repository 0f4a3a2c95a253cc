// src/store/json_file.rs

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    time::SystemTime,
};

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};

use super::{Document, Store, StoreError};
use crate::models::{attempt::Attempt, question::Question, user::User};

/// Store backed by a single JSON file.
///
/// The document is cached in memory and re-read whenever the file's
/// modification time no longer matches the one seen at the last read or
/// write. Every mutation rewrites the whole file through a temp file and a
/// rename, so readers never see a half-written document. Mutations are
/// serialized by one mutex; a second process writing the same file is not
/// coordinated with.
pub struct JsonFileStore {
    path: PathBuf,
    cache: Mutex<Cache>,
}

#[derive(Default)]
struct Cache {
    document: Option<Document>,
    modified: Option<SystemTime>,
}

impl JsonFileStore {
    /// Opens (or prepares to create) the document at `path` and reads it once,
    /// so an unreadable file fails at startup rather than on the first request.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let store = Self {
            path,
            cache: Mutex::new(Cache::default()),
        };
        store.load().await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the full snapshot, reading the file if the cache is stale.
    pub async fn load(&self) -> Result<Document, StoreError> {
        let mut cache = self.cache.lock().await;
        Ok(self.refresh(&mut cache).await?.clone())
    }

    /// Writes the current snapshot back to disk.
    pub async fn persist(&self) -> Result<(), StoreError> {
        let mut cache = self.cache.lock().await;
        let document = self.refresh(&mut cache).await?.clone();
        cache.modified = self.write_document(&document).await?;
        Ok(())
    }

    async fn refresh<'c>(&self, cache: &'c mut Cache) -> Result<&'c Document, StoreError> {
        let modified = file_modified(&self.path).await?;
        if cache.document.is_none() || cache.modified != modified {
            let document = match fs::read(&self.path).await {
                Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Document::default(),
                Ok(bytes) => serde_json::from_slice(&bytes)?,
                Err(e) if e.kind() == ErrorKind::NotFound => Document::default(),
                Err(e) => return Err(e.into()),
            };
            tracing::debug!(path = %self.path.display(), "document loaded from disk");
            cache.document = Some(document);
            cache.modified = modified;
        }
        Ok(cache.document.get_or_insert_with(Document::default))
    }

    async fn write_document(&self, document: &Document) -> Result<Option<SystemTime>, StoreError> {
        let bytes = serde_json::to_vec_pretty(document)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &self.path).await?;

        file_modified(&self.path).await
    }

    async fn read<R, F>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&Document) -> R + Send,
    {
        let mut cache = self.cache.lock().await;
        let document = self.refresh(&mut cache).await?;
        Ok(f(document))
    }

    /// Applies `f` to a copy of the snapshot and persists it. The cache is
    /// only replaced once the write succeeded, so a failed mutation leaves
    /// no trace.
    async fn mutate<R, F>(&self, f: F) -> Result<R, StoreError>
    where
        R: Send,
        F: FnOnce(&mut Document) -> Result<R, StoreError> + Send,
    {
        let mut cache = self.cache.lock().await;
        let mut next = self.refresh(&mut cache).await?.clone();
        let out = f(&mut next)?;
        let modified = self.write_document(&next).await?;
        cache.document = Some(next);
        cache.modified = modified;
        Ok(out)
    }
}

async fn file_modified(path: &Path) -> Result<Option<SystemTime>, StoreError> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(meta.modified().ok()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl Store for JsonFileStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.read(|d| d.find_user_by_email(email).cloned()).await
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.read(|d| d.find_user_by_id(id).cloned()).await
    }

    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        self.mutate(|d| d.push_user(user)).await
    }

    async fn count_users(&self) -> Result<usize, StoreError> {
        self.read(|d| d.users.len()).await
    }

    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        self.read(|d| d.questions.clone()).await
    }

    async fn seed_questions(&self, questions: Vec<Question>) -> Result<bool, StoreError> {
        if !self.read(|d| d.questions.is_empty()).await? {
            return Ok(false);
        }
        self.mutate(|d| {
            if !d.questions.is_empty() {
                return Ok(false);
            }
            d.questions = questions;
            Ok(true)
        })
        .await
    }

    async fn insert_attempt(&self, attempt: Attempt) -> Result<(), StoreError> {
        self.mutate(|d| {
            d.attempts.push(attempt);
            Ok(())
        })
        .await
    }

    async fn count_attempts(&self) -> Result<usize, StoreError> {
        self.read(|d| d.attempts.len()).await
    }

    async fn attempts_by_user(&self, user_id: &str) -> Result<Vec<Attempt>, StoreError> {
        self.read(|d| d.attempts_by_user(user_id)).await
    }
}
