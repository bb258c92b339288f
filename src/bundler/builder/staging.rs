//! Staging of the install tree into the package layout.

use super::checksum::calculate_directory_sha256;
use crate::bundler::{error::CopyError, utils::fs::replace_dir};
use std::path::{Path, PathBuf};

/// Install subtrees copied into the package, in copy order.
pub const STAGED_SUBDIRS: [&str; 2] = ["include", "lib"];

/// One subtree placed into the staging layout.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StagedArtifact {
    /// Subtree name (`include` or `lib`)
    pub name: &'static str,
    /// Destination path of the staged subtree
    pub path: PathBuf,
    /// Number of files and symlinks staged
    pub file_count: usize,
    /// SHA256 over relative paths and contents
    pub checksum: String,
}

/// Replaces `<dest_prefix>/include` and `<dest_prefix>/lib` with copies of
/// the matching subtrees under `install_dir`.
///
/// Both sources are checked before any destination is touched. Each
/// destination is swapped in whole, so it ends up either an exact copy of
/// its source or unchanged.
pub async fn copy_artifacts(
    install_dir: &Path,
    dest_prefix: &Path,
) -> Result<Vec<StagedArtifact>, CopyError> {
    for name in STAGED_SUBDIRS {
        let source = install_dir.join(name);
        if !tokio::fs::metadata(&source)
            .await
            .is_ok_and(|m| m.is_dir())
        {
            return Err(CopyError::MissingSource { path: source });
        }
    }

    let mut staged = Vec::with_capacity(STAGED_SUBDIRS.len());
    for name in STAGED_SUBDIRS {
        let source = install_dir.join(name);
        let dest = dest_prefix.join(name);

        log::info!("Staging {} -> {}", source.display(), dest.display());
        replace_dir(&source, &dest).await?;

        let (file_count, checksum) = calculate_directory_sha256(&dest).await?;
        log::debug!("{}: {} files, sha256 {}", dest.display(), file_count, checksum);

        staged.push(StagedArtifact {
            name,
            path: dest,
            file_count,
            checksum,
        });
    }

    Ok(staged)
}
