//! Staged tree checksum calculation.
//!
//! Computes a SHA256 digest over a directory tree so successive staging runs
//! can be compared without diffing files.

use crate::bundler::error::{CopyError, ErrorExt};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Calculates the SHA256 checksum of a directory tree.
///
/// Recursively traverses the directory, hashing each regular file's path and
/// content in sorted order so results are deterministic. Symlinks contribute
/// their target path rather than the linked content.
///
/// # Returns
///
/// * `Ok((file_count, hex_digest))` - number of entries hashed and the 64-character digest
/// * `Err` - If the tree cannot be traversed or a file cannot be read
pub async fn calculate_directory_sha256(dir_path: &Path) -> Result<(usize, String), CopyError> {
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(dir_path).follow_links(false) {
        let entry = entry
            .map_err(std::io::Error::from)
            .fs_context("walking tree for hashing", dir_path)?;
        if !entry.file_type().is_dir() {
            entries.push(entry);
        }
    }

    // Sort by path for deterministic ordering
    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    for entry in &entries {
        // Include relative path in hash (preserves directory structure)
        if let Ok(rel_path) = entry.path().strip_prefix(dir_path) {
            hasher.update(rel_path.to_string_lossy().as_bytes());
            hasher.update([0u8]);
        }

        if entry.file_type().is_symlink() {
            let target = tokio::fs::read_link(entry.path())
                .await
                .fs_context("reading symlink for hashing", entry.path())?;
            hasher.update(b"->");
            hasher.update(target.to_string_lossy().as_bytes());
            hasher.update([0u8]);
            continue;
        }

        let mut file = tokio::fs::File::open(entry.path())
            .await
            .fs_context("opening file for hashing", entry.path())?;

        loop {
            let n = file
                .read(&mut buffer)
                .await
                .fs_context("reading file for hash calculation", entry.path())?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
        hasher.update([0u8]);
    }

    Ok((entries.len(), format!("{:x}", hasher.finalize())))
}
