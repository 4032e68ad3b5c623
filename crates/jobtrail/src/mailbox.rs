//! Message source over a directory of `.eml` files.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jobtrail_core::{MessageSource, RawMessage, Result};
use tracing::debug;

/// Yields every `*.eml` file in a directory, sorted by file name.
#[derive(Debug)]
pub struct EmlDirectory {
    pending: VecDeque<PathBuf>,
    cutoff: Option<DateTime<Utc>>,
}

impl EmlDirectory {
    /// Lists the directory. Subdirectories and other files are ignored.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let mut entries = tokio::fs::read_dir(dir.as_ref()).await?;
        let mut paths = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_eml = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("eml"));
            if is_eml && entry.file_type().await?.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        debug!("Found {} message files in {}", paths.len(), dir.as_ref().display());
        Ok(Self {
            pending: paths.into(),
            cutoff: None,
        })
    }

    /// Skips messages delivered before `cutoff`. Undated messages still pass.
    #[must_use]
    pub const fn since(mut self, cutoff: DateTime<Utc>) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    /// Files not yet read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

#[async_trait]
impl MessageSource for EmlDirectory {
    async fn next_message(&mut self) -> Result<Option<RawMessage>> {
        while let Some(path) = self.pending.pop_front() {
            let bytes = tokio::fs::read(&path).await?;
            let message = RawMessage::from_rfc822(&bytes);

            if let (Some(cutoff), Some(date)) = (self.cutoff, message.date) {
                if date < cutoff {
                    debug!("Skipping {}: older than {cutoff}", path.display());
                    continue;
                }
            }

            return Ok(Some(message));
        }
        Ok(None)
    }
}
