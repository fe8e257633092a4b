use crate::errors::AppError;
use crate::models::VoteRecord;
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};
use tracing::error;

/// Append-only JSON-lines log of votes. There is no read path.
#[derive(Debug)]
pub struct VoteLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl VoteLog {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the parent directory so the first append does not fail on a fresh checkout.
    pub async fn prepare(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent).await,
            _ => Ok(()),
        }
    }

    /// Writes one record as a single line. The cause of a failed write is
    /// logged here; callers only see a generic internal error.
    pub async fn append(&self, record: &VoteRecord) -> Result<(), AppError> {
        self.write_line(record).await.map_err(|err| {
            error!(path = %self.path.display(), error = %err, "failed to append vote");
            AppError::internal("Failed to record vote")
        })
    }

    /// The file handle is flushed and closed before returning, on success and on error alike.
    async fn write_line(&self, record: &VoteRecord) -> io::Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        let written = file.write_all(&line).await;
        let flushed = file.flush().await;
        written?;
        flushed
    }
}
