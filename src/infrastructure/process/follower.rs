//! Polling file follower

use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};

use crate::application::ports::{LineFollower, TailError};

/// Reads a file from the start and keeps reading as it grows.
///
/// At end of file it sleeps for the poll interval. If the file shrinks below
/// the read position it was truncated, and reading restarts from the top.
pub struct FileFollower {
    path: PathBuf,
    reader: BufReader<File>,
    position: u64,
    poll_interval: Duration,
    partial: Vec<u8>,
}

impl FileFollower {
    pub async fn open(path: impl AsRef<Path>, poll_interval: Duration) -> Result<Self, TailError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).await.map_err(|e| TailError::Open {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            path,
            reader: BufReader::new(file),
            position: 0,
            poll_interval,
            partial: Vec::new(),
        })
    }

    fn read_error(&self, e: std::io::Error) -> TailError {
        TailError::Read {
            path: self.path.clone(),
            message: e.to_string(),
        }
    }

    async fn was_truncated(&self) -> bool {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) => meta.len() < self.position,
            Err(_) => false,
        }
    }

    fn take_line(&mut self) -> String {
        let mut bytes = std::mem::take(&mut self.partial);
        while matches!(bytes.last(), Some(b'\n') | Some(b'\r')) {
            bytes.pop();
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[async_trait]
impl LineFollower for FileFollower {
    async fn next_line(&mut self) -> Result<String, TailError> {
        loop {
            let mut chunk = Vec::new();
            let read = self
                .reader
                .read_until(b'\n', &mut chunk)
                .await
                .map_err(|e| self.read_error(e))?;

            if read > 0 {
                self.position += read as u64;
                self.partial.extend_from_slice(&chunk);
                if self.partial.ends_with(b"\n") {
                    return Ok(self.take_line());
                }
                continue;
            }

            if self.was_truncated().await {
                tracing::debug!(path = %self.path.display(), "File truncated, rewinding");
                self.reader
                    .seek(SeekFrom::Start(0))
                    .await
                    .map_err(|e| self.read_error(e))?;
                self.position = 0;
                self.partial.clear();
                continue;
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
