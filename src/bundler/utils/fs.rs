//! File system utilities for embedding.
//!
//! Provides directory copying with symlink preservation and
//! overwrite-in-place semantics.

use crate::bundler::error::{Context, Error, ErrorExt, Result};
use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        match tokio::fs::remove_dir_all(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e).fs_context("erasing directory", path),
        }
    }

    tokio::fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

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

/// Lists the names of a directory's immediate entries, sorted.
pub async fn list_entries(dir: &Path) -> Result<Vec<OsString>> {
    let mut read_dir = tokio::fs::read_dir(dir)
        .await
        .fs_context("reading directory", dir)?;

    let mut names = Vec::new();
    while let Some(entry) = read_dir
        .next_entry()
        .await
        .fs_context("reading directory entry", dir)?
    {
        names.push(entry.file_name());
    }
    names.sort();
    Ok(names)
}

/// Recursively copies every entry of `from` into the existing directory `to`.
///
/// Entries already present in `to` under the same name are replaced.
/// Symlinks are recreated rather than followed. Returns the top-level names
/// that were copied.
///
/// Each entry is copied to a hidden sibling first and only then moved over
/// the existing one, so a failed copy leaves the existing entry in place.
pub async fn copy_dir_contents(from: &Path, to: &Path) -> Result<Vec<OsString>> {
    if !from.is_dir() {
        return Err(Error::GenericError(format!(
            "{from:?} is not a directory"
        )));
    }

    let names = list_entries(from).await?;
    let from = from.to_path_buf();
    let to = to.to_path_buf();
    let copied = names.clone();

    // Offload blocking work to dedicated thread pool
    tokio::task::spawn_blocking(move || -> Result<()> {
        for name in &names {
            let staged = sibling(&to, name, "incoming");
            remove_existing(&staged)?;
            if let Err(e) = copy_tree(&from.join(name), &staged) {
                let _ = remove_existing(&staged);
                return Err(e).with_context(|| format!("copying {}", name.to_string_lossy()));
            }
            replace_entry(&staged, &to.join(name), &sibling(&to, name, "previous"))?;
        }
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))??;

    Ok(copied)
}

/// Hidden sibling of `dir/name` used while replacing it.
fn sibling(dir: &Path, name: &OsString, tag: &str) -> PathBuf {
    let mut hidden = OsString::from(".");
    hidden.push(name);
    hidden.push(".");
    hidden.push(tag);
    dir.join(hidden)
}

/// Moves `staged` onto `dest`, parking any existing entry at `backup` until
/// the move has succeeded.
fn replace_entry(staged: &Path, dest: &Path, backup: &Path) -> Result<()> {
    remove_existing(backup)?;
    let had_existing = std::fs::symlink_metadata(dest).is_ok();
    if had_existing {
        std::fs::rename(dest, backup).fs_context("moving existing entry aside", dest)?;
    }

    if let Err(e) = std::fs::rename(staged, dest) {
        if had_existing {
            let _ = std::fs::rename(backup, dest);
        }
        let _ = remove_existing(staged);
        return Err(e).fs_context("moving copied entry into place", dest);
    }

    remove_existing(backup)
}

/// Removes a file, symlink or directory tree if present.
fn remove_existing(path: &Path) -> Result<()> {
    let metadata = match std::fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).fs_context("inspecting existing entry", path),
    };

    if metadata.is_dir() {
        std::fs::remove_dir_all(path).fs_context("removing existing directory", path)
    } else {
        std::fs::remove_file(path).fs_context("removing existing file", path)
    }
}

/// Copies one entry (file, symlink or directory tree) to `dest`.
fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    for entry in walkdir::WalkDir::new(src) {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(src)?;
        let dest_path: PathBuf = if rel_path.as_os_str().is_empty() {
            dest.to_path_buf()
        } else {
            dest.join(rel_path)
        };

        if entry.file_type().is_symlink() {
            let target = std::fs::read_link(entry.path())
                .fs_context("reading symlink", entry.path())?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn copies_nested_entries_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let from = tmp.path().join("from");
        let to = tmp.path().join("to");
        fs::create_dir_all(from.join("Kit.swiftmodule")).unwrap();
        fs::write(from.join("Kit.swiftmodule/arm64.swiftinterface"), "new").unwrap();
        fs::write(from.join("Kit.swiftdoc"), "doc").unwrap();
        fs::create_dir_all(to.join("Kit.swiftmodule")).unwrap();
        fs::write(to.join("Kit.swiftmodule/stale.swiftinterface"), "old").unwrap();
        fs::write(to.join("module.modulemap"), "keep").unwrap();

        let copied = copy_dir_contents(&from, &to).await.unwrap();

        assert_eq!(copied, vec![OsString::from("Kit.swiftdoc"), OsString::from("Kit.swiftmodule")]);
        assert_eq!(fs::read_to_string(to.join("Kit.swiftmodule/arm64.swiftinterface")).unwrap(), "new");
        assert!(!to.join("Kit.swiftmodule/stale.swiftinterface").exists());
        assert_eq!(fs::read_to_string(to.join("module.modulemap")).unwrap(), "keep");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn preserves_symlinks() {
        let tmp = tempfile::tempdir().unwrap();
        let from = tmp.path().join("from");
        let to = tmp.path().join("to");
        fs::create_dir_all(&from).unwrap();
        fs::create_dir_all(&to).unwrap();
        fs::write(from.join("real"), "x").unwrap();
        std::os::unix::fs::symlink("real", from.join("link")).unwrap();

        copy_dir_contents(&from, &to).await.unwrap();

        assert_eq!(fs::read_link(to.join("link")).unwrap(), Path::new("real"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failed_copy_keeps_existing_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let from = tmp.path().join("from");
        let to = tmp.path().join("to");
        fs::create_dir_all(from.join("Kit.swiftmodule")).unwrap();
        fs::write(from.join("Kit.swiftmodule/arm64.swiftinterface"), "new").unwrap();
        // Sockets cannot be opened for reading, so copying this entry fails.
        let _listener =
            std::os::unix::net::UnixListener::bind(from.join("Kit.swiftmodule/sock")).unwrap();
        fs::create_dir_all(to.join("Kit.swiftmodule")).unwrap();
        fs::write(to.join("Kit.swiftmodule/arm64.swiftinterface"), "old").unwrap();

        assert!(copy_dir_contents(&from, &to).await.is_err());

        assert_eq!(
            fs::read_to_string(to.join("Kit.swiftmodule/arm64.swiftinterface")).unwrap(),
            "old"
        );
        assert_eq!(list_entries(&to).await.unwrap(), vec![OsString::from("Kit.swiftmodule")]);
    }

    #[tokio::test]
    async fn replaces_file_with_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let from = tmp.path().join("from");
        let to = tmp.path().join("to");
        fs::create_dir_all(from.join("Kit.swiftmodule")).unwrap();
        fs::write(from.join("Kit.swiftmodule/arm64.swiftinterface"), "new").unwrap();
        fs::create_dir_all(&to).unwrap();
        fs::write(to.join("Kit.swiftmodule"), "flat").unwrap();

        copy_dir_contents(&from, &to).await.unwrap();

        assert!(to.join("Kit.swiftmodule/arm64.swiftinterface").is_file());
        assert_eq!(list_entries(&to).await.unwrap(), vec![OsString::from("Kit.swiftmodule")]);
    }

    #[tokio::test]
    async fn create_dir_all_can_erase() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("Modules");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("stale.swiftmodule"), "old").unwrap();

        create_dir_all(&dir, false).await.unwrap();
        assert!(dir.join("stale.swiftmodule").exists());

        create_dir_all(&dir, true).await.unwrap();
        assert!(dir.is_dir());
        assert!(!dir.join("stale.swiftmodule").exists());
    }

    #[tokio::test]
    async fn rejects_missing_source() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(copy_dir_contents(&tmp.path().join("nope"), tmp.path()).await.is_err());
    }
}
