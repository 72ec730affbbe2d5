// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem export reader.
//!
//! Expected layout under the export directory:
//!
//! ```text
//! project.json                      manifest
//! workitems/<id>.json               one document per shared step / test case
//! attachments/<owner-id>/<file>     attachment payloads
//! ```

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use cp_core::{ProjectManifest, SharedStep, TestCase};

use super::api::{ExportSource, SourceError, SourceFuture, SourceResult};

/// Attachments at or above this size get a warning before transfer; archival
/// is the storage platform's concern, not the reader's.
const LARGE_ATTACHMENT_BYTES: u64 = 1 << 30;

/// Reads an export from a local directory.
pub struct FsExportSource {
    root: PathBuf,
}

impl FsExportSource {
    /// Creates a reader rooted at the export directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsExportSource { root: root.into() }
    }

    fn manifest_path(&self) -> PathBuf {
        self.root.join("project.json")
    }

    fn work_item_path(&self, id: Uuid) -> PathBuf {
        self.root.join("workitems").join(format!("{id}.json"))
    }

    fn attachment_path(&self, owner_id: Uuid, filename: &str) -> PathBuf {
        self.root
            .join("attachments")
            .join(owner_id.to_string())
            .join(filename)
    }
}

/// Reads a file, mapping absence and emptiness to their own errors.
async fn read_bytes(path: &Path) -> SourceResult<Vec<u8>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SourceError::Missing {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(SourceError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    if bytes.is_empty() {
        return Err(SourceError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(bytes)
}

/// Reads and parses one JSON document.
async fn read_json<T: DeserializeOwned>(path: &Path) -> SourceResult<T> {
    let bytes = read_bytes(path).await?;
    serde_json::from_slice(&bytes).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })
}

impl ExportSource for FsExportSource {
    fn read_manifest(&self) -> SourceFuture<'_, ProjectManifest> {
        Box::pin(async move { read_json(&self.manifest_path()).await })
    }

    fn read_shared_step(&self, id: Uuid) -> SourceFuture<'_, SharedStep> {
        Box::pin(async move { read_json(&self.work_item_path(id)).await })
    }

    fn read_test_case(&self, id: Uuid) -> SourceFuture<'_, TestCase> {
        Box::pin(async move { read_json(&self.work_item_path(id)).await })
    }

    fn read_attachment(&self, owner_id: Uuid, filename: &str) -> SourceFuture<'_, Vec<u8>> {
        let path = self.attachment_path(owner_id, filename);
        Box::pin(async move {
            let bytes = read_bytes(&path).await?;
            if bytes.len() as u64 >= LARGE_ATTACHMENT_BYTES {
                tracing::warn!(
                    path = %path.display(),
                    size = bytes.len(),
                    "large attachment, transfer may be slow"
                );
            }
            Ok(bytes)
        })
    }
}
