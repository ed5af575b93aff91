//! Artifact store for uploaded originals and grid pieces.
//!
//! Everything lives under one static root so a single `ServeDir` mount can
//! expose it:
//!
//! ```text
//! {static_root}/
//! ├── uploads/        original uploads:  {unique_name}_{original_filename}
//! └── grid_images/    grid pieces:       {unique_name}_{sequence}.jpg
//! ```
//!
//! Public references are paths under the `/static` prefix, e.g.
//! `/static/grid_images/a1b2c3_5.jpg`. Directory creation happens once at
//! startup via [`ArtifactStore::bootstrap`]; request handling only writes
//! files.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::error::StorageError;
use crate::grid::PieceArtifact;

/// URL prefix under which the static root is served.
pub const STATIC_URL_PREFIX: &str = "/static";

/// Subdirectory for original uploads.
pub const UPLOADS_SUBDIR: &str = "uploads";

/// Subdirectory for grid pieces.
pub const GRID_SUBDIR: &str = "grid_images";

// =============================================================================
// Artifact Store
// =============================================================================

/// Writes artifacts under the static root and builds their public URLs.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the given directory.
    ///
    /// Call [`bootstrap`](Self::bootstrap) before handling requests.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The static root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding original uploads.
    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join(UPLOADS_SUBDIR)
    }

    /// Directory holding grid pieces.
    pub fn grid_dir(&self) -> PathBuf {
        self.root.join(GRID_SUBDIR)
    }

    /// Create the artifact directories if they do not exist.
    pub async fn bootstrap(&self) -> Result<(), StorageError> {
        for dir in [self.uploads_dir(), self.grid_dir()] {
            fs::create_dir_all(&dir)
                .await
                .map_err(|e| StorageError::CreateDir {
                    path: dir.display().to_string(),
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }

    /// Persist the original upload and return its public URL.
    pub async fn persist_upload(
        &self,
        filename: &str,
        data: &[u8],
    ) -> Result<String, StorageError> {
        let path = self.uploads_dir().join(filename);
        write_file(&path, data).await?;

        debug!(filename, bytes = data.len(), "original upload persisted");
        Ok(upload_url(filename))
    }

    /// Persist one encoded grid piece and return its public URL.
    pub async fn persist_piece(&self, artifact: &PieceArtifact) -> Result<String, StorageError> {
        let path = self.grid_dir().join(&artifact.filename);
        write_file(&path, &artifact.data).await?;

        debug!(
            sequence = artifact.sequence,
            filename = %artifact.filename,
            bytes = artifact.data.len(),
            "grid piece persisted"
        );
        Ok(piece_url(&artifact.filename))
    }
}

async fn write_file(path: &Path, data: &[u8]) -> Result<(), StorageError> {
    fs::write(path, data).await.map_err(|e| StorageError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

// =============================================================================
// URL Construction
// =============================================================================

/// Public URL for an original upload.
pub fn upload_url(filename: &str) -> String {
    format!("{}/{}/{}", STATIC_URL_PREFIX, UPLOADS_SUBDIR, filename)
}

/// Public URL for a grid piece.
pub fn piece_url(filename: &str) -> String {
    format!("{}/{}/{}", STATIC_URL_PREFIX, GRID_SUBDIR, filename)
}

// =============================================================================
// Tests
// =============================================================================
