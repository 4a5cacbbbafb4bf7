//! On-disk storage for uploaded avatars.
//!
//! Files live under `{root}/staff/{id}/` with timestamp-based names and are
//! served back under the fixed `/uploads` URL prefix, mirroring the on-disk
//! relative path.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::domain::types::StaffId;

/// Uploads larger than this are rejected before anything touches disk.
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Accepted avatar content types.
pub const ALLOWED_AVATAR_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

const PUBLIC_PREFIX: &str = "/uploads";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// File-system store rooted at the configured uploads directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map an accepted content type to the stored file extension.
    pub fn extension_for(content_type: &str) -> Option<&'static str> {
        match content_type {
            "image/jpeg" => Some("jpg"),
            "image/png" => Some("png"),
            "image/webp" => Some("webp"),
            _ => None,
        }
    }

    /// Copy a received upload into the member's directory and return its
    /// public URL.
    pub fn store_avatar(
        &self,
        staff_id: StaffId,
        source: &Path,
        extension: &str,
    ) -> Result<String, UploadError> {
        let relative = format!("staff/{}/{}.{extension}", staff_id.get(), timestamp_millis());
        let target = self.root.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, &target)?;
        Ok(format!("{PUBLIC_PREFIX}/{relative}"))
    }

    /// Best-effort removal of the file behind a public URL. A missing or
    /// undeletable file is logged and otherwise ignored.
    pub fn delete_by_public_url(&self, url: &str) {
        let Some(path) = self.path_for_public_url(url) else {
            log::warn!("Refusing to delete URL outside the uploads prefix: {url}");
            return;
        };
        if let Err(e) = fs::remove_file(&path) {
            log::warn!("Failed to delete upload {}: {e}", path.display());
        }
    }

    /// Resolve a `/uploads/...` URL back to the on-disk path. Rejects URLs
    /// outside the prefix and path-traversal segments.
    pub fn path_for_public_url(&self, url: &str) -> Option<PathBuf> {
        let relative = url.strip_prefix(PUBLIC_PREFIX)?.strip_prefix('/')?;
        if relative.is_empty() || relative.split('/').any(|s| s.is_empty() || s == "..") {
            return None;
        }
        Some(self.root.join(relative))
    }
}

fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
