//! Saved quotes, kept as a JSON list in a single file.
//!
//! Writers append by reading the whole list, pushing, and writing it back.
//! The read-modify-write is serialized with a mutex and the file is replaced
//! through a temporary file, so concurrent saves never lose a quote.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Errors that can occur while reading or writing quotes
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Quote file error: {0}")]
    Io(#[from] io::Error),

    #[error("Quote file is corrupt: {0}")]
    Json(#[from] serde_json::Error),

    #[error("A quote cannot be empty")]
    Empty,
}

/// Result type for quote operations
pub type QuoteResult<T> = Result<T, QuoteError>;

pub struct QuoteStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl QuoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a quote. Returns how many quotes are saved afterwards.
    pub async fn append(&self, quote: &str) -> QuoteResult<usize> {
        let quote = quote.trim();
        if quote.is_empty() {
            return Err(QuoteError::Empty);
        }

        let _guard = self.write_lock.lock().await;
        let mut quotes = self.load().await?;
        quotes.push(quote.to_string());
        self.save(&quotes).await?;

        info!("Saved quote #{} to {}", quotes.len(), self.path.display());
        Ok(quotes.len())
    }

    /// Every saved quote, oldest first. A missing file means no quotes yet.
    pub async fn all(&self) -> QuoteResult<Vec<String>> {
        let _guard = self.write_lock.lock().await;
        self.load().await
    }

    /// A random saved quote, if there is any.
    pub async fn random(&self) -> QuoteResult<Option<String>> {
        let mut quotes = self.all().await?;
        if quotes.is_empty() {
            return Ok(None);
        }
        let index = rand::random_range(0..quotes.len());
        Ok(Some(quotes.swap_remove(index)))
    }

    async fn load(&self) -> QuoteResult<Vec<String>> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No quote file at {}, starting empty", self.path.display());
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, quotes: &[String]) -> QuoteResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec(quotes)?).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
