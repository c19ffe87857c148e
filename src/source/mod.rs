//! Interface source collection

use crate::{bail, bundler::error::Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Extension of interface source files.
pub const SOURCE_EXTENSION: &str = "swift";

/// Expands files and directories into a sorted, de-duplicated list of
/// `.swift` sources.
///
/// Files are taken as given regardless of extension; directories are walked
/// recursively. A path that does not exist is an error.
pub fn collect_interface_sources<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>> {
    let mut sources = BTreeSet::new();

    for path in paths {
        let path = path.as_ref();
        if path.is_file() {
            sources.insert(path.to_path_buf());
        } else if path.is_dir() {
            for entry in walkdir::WalkDir::new(path).follow_links(true) {
                let entry = entry?;
                if entry.file_type().is_file() && is_interface_source(entry.path()) {
                    sources.insert(entry.into_path());
                }
            }
        } else {
            bail!("Source path does not exist: {}", path.display());
        }
    }

    log::debug!("Collected {} interface source(s)", sources.len());
    Ok(sources.into_iter().collect())
}

fn is_interface_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}
