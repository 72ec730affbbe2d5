// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Export source trait and error type.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use thiserror::Error;
use uuid::Uuid;

use cp_core::{ProjectManifest, SharedStep, TestCase};

/// All possible errors that can occur reading an export.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("export file missing: {}", path.display())]
    Missing { path: PathBuf },

    #[error("export file is empty: {}", path.display())]
    Empty { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for export source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Boxed future returned by [`ExportSource`] methods.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = SourceResult<T>> + Send + 'a>>;

/// Reader for a hierarchical test-management export.
///
/// This trait abstracts over the storage holding the export, allowing for
/// easy testing with mock implementations.
pub trait ExportSource: Send + Sync {
    /// Reads the project manifest at the root of the export.
    fn read_manifest(&self) -> SourceFuture<'_, ProjectManifest>;

    /// Reads one shared step document by id.
    fn read_shared_step(&self, id: Uuid) -> SourceFuture<'_, SharedStep>;

    /// Reads one test case document by id.
    fn read_test_case(&self, id: Uuid) -> SourceFuture<'_, TestCase>;

    /// Reads an attachment payload by owning work item id and filename.
    fn read_attachment(&self, owner_id: Uuid, filename: &str) -> SourceFuture<'_, Vec<u8>>;
}
