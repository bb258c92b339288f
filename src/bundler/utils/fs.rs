//! File system utilities for staging.
//!
//! Provides recursive tree copy with symlink preservation and a replace
//! operation that swaps a freshly copied tree into place by rename, so the
//! destination is never observed half-written.

use crate::bundler::error::{CopyError, ErrorExt};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

type Result<T> = std::result::Result<T, CopyError>;

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks on platforms that support them.
/// Fails if the source path is not a directory or doesn't exist,
/// or if the destination path already exists.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !fs::metadata(from).await.is_ok_and(|m| m.is_dir()) {
        return Err(CopyError::MissingSource {
            path: from.to_path_buf(),
        });
    }
    if fs::symlink_metadata(to).await.is_ok() {
        return Err(io::Error::from(io::ErrorKind::AlreadyExists))
            .fs_context("copying tree into", to);
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();
    let task_path = to.clone();

    tokio::task::spawn_blocking(move || copy_tree_blocking(&from, &to))
        .await
        .map_err(io::Error::other)
        .fs_context("copying tree into", &task_path)?
}

fn copy_tree_blocking(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent).fs_context("creating parent directory", parent)?;
    }

    for entry in walkdir::WalkDir::new(from) {
        let entry = entry
            .map_err(io::Error::from)
            .fs_context("reading source tree", from)?;
        debug_assert!(entry.path().starts_with(from));
        let rel_path = entry
            .path()
            .strip_prefix(from)
            .map_err(io::Error::other)
            .fs_context("resolving relative path", entry.path())?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_symlink() {
            let target = std::fs::read_link(entry.path()).fs_context("reading symlink", entry.path())?;
            let linked = if entry.path().is_dir() {
                symlink_dir(&target, &dest_path)
            } else {
                symlink_file(&target, &dest_path)
            };
            linked.fs_context("creating symlink", &dest_path)?;
        } else if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
        } else {
            std::fs::copy(entry.path(), &dest_path).fs_context("copying file", &dest_path)?;
        }
    }

    Ok(())
}

/// Replaces `to` with a recursive copy of `from`.
///
/// The copy is assembled in a scratch directory next to `to` and renamed
/// into place, so after an error `to` still holds its previous contents (or
/// still does not exist). The replaced tree is deleted afterwards.
pub async fn replace_dir(from: &Path, to: &Path) -> Result<()> {
    let name = to.file_name().ok_or_else(|| CopyError::Filesystem {
        operation: "resolving destination name".to_string(),
        path: to.to_path_buf(),
        source: io::Error::from(io::ErrorKind::InvalidInput),
    })?;
    let parent = match to.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)
        .await
        .fs_context("creating destination parent", &parent)?;

    let scratch = tempfile::Builder::new()
        .prefix(&format!(".{}.staging-", name.to_string_lossy()))
        .tempdir_in(&parent)
        .fs_context("creating scratch directory in", &parent)?;

    let staged = scratch.path().join("new");
    copy_dir(from, &staged).await?;

    let previous = scratch.path().join("old");
    let had_previous = match fs::symlink_metadata(to).await {
        Ok(_) => {
            fs::rename(to, &previous)
                .await
                .fs_context("moving old tree aside", to)?;
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => return Err(e).fs_context("inspecting destination", to),
    };

    if let Err(e) = fs::rename(&staged, to).await {
        if had_previous {
            if let Err(restore) = fs::rename(&previous, to).await {
                log::warn!(
                    "Failed to restore previous tree at {}: {}",
                    to.display(),
                    restore
                );
            }
        }
        return Err(e).fs_context("moving new tree into place", to);
    }

    // Old tree now lives inside the scratch directory
    let scratch_path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        log::warn!(
            "Failed to remove scratch directory {}: {}",
            scratch_path.display(),
            e
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as sfs;

    #[tokio::test]
    async fn copy_dir_copies_nested_files() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        sfs::create_dir_all(src.join("urdf_model")).unwrap();
        sfs::write(src.join("urdf_model/joint.h"), "joint").unwrap();
        sfs::write(src.join("top.h"), "top").unwrap();

        let dst = tmp.path().join("out/dst");
        copy_dir(&src, &dst).await.unwrap();

        assert_eq!(sfs::read_to_string(dst.join("urdf_model/joint.h")).unwrap(), "joint");
        assert_eq!(sfs::read_to_string(dst.join("top.h")).unwrap(), "top");
    }

    #[tokio::test]
    async fn copy_dir_refuses_existing_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        sfs::create_dir_all(&src).unwrap();
        sfs::create_dir_all(&dst).unwrap();

        let err = copy_dir(&src, &dst).await.unwrap_err();
        assert!(matches!(err, CopyError::Filesystem { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn copy_dir_preserves_symlinks() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("lib");
        sfs::create_dir_all(&src).unwrap();
        sfs::write(src.join("liburdf.so.1.0"), "elf").unwrap();
        std::os::unix::fs::symlink("liburdf.so.1.0", src.join("liburdf.so")).unwrap();

        let dst = tmp.path().join("copy");
        copy_dir(&src, &dst).await.unwrap();

        let link = dst.join("liburdf.so");
        assert!(sfs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(sfs::read_link(&link).unwrap(), Path::new("liburdf.so.1.0"));
    }

    #[tokio::test]
    async fn replace_dir_drops_stale_files() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        sfs::create_dir_all(&src).unwrap();
        sfs::write(src.join("new.h"), "new").unwrap();

        let dst = tmp.path().join("pkg/include");
        sfs::create_dir_all(&dst).unwrap();
        sfs::write(dst.join("stale.h"), "stale").unwrap();

        replace_dir(&src, &dst).await.unwrap();

        assert!(dst.join("new.h").exists());
        assert!(!dst.join("stale.h").exists());
        // No scratch directories left behind
        let leftovers: Vec<_> = sfs::read_dir(tmp.path().join("pkg"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("include")]);
    }

    #[tokio::test]
    async fn replace_dir_keeps_destination_when_source_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let dst = tmp.path().join("include");
        sfs::create_dir_all(&dst).unwrap();
        sfs::write(dst.join("keep.h"), "keep").unwrap();

        let err = replace_dir(&tmp.path().join("absent"), &dst).await.unwrap_err();

        assert!(matches!(err, CopyError::MissingSource { .. }));
        assert_eq!(sfs::read_to_string(dst.join("keep.h")).unwrap(), "keep");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn replace_dir_failing_mid_copy_keeps_old_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        sfs::create_dir_all(&src).unwrap();
        sfs::write(src.join("good.h"), "good").unwrap();
        // Opening a socket as a file fails with ENXIO, even as root
        let _socket = std::os::unix::net::UnixListener::bind(src.join("broken.sock")).unwrap();

        let pkg = tmp.path().join("pkg");
        let dst = pkg.join("include");
        sfs::create_dir_all(&dst).unwrap();
        sfs::write(dst.join("old.h"), "old").unwrap();

        let err = replace_dir(&src, &dst).await.unwrap_err();

        assert!(matches!(err, CopyError::Filesystem { .. }), "got {err:?}");
        assert_eq!(sfs::read_to_string(dst.join("old.h")).unwrap(), "old");
        assert!(!dst.join("good.h").exists());
        let leftovers: Vec<_> = sfs::read_dir(&pkg)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(leftovers, ["include"]);
    }
}
