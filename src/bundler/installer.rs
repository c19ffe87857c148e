//! Interface package installation.
//!
//! Copies the compiled `.swiftmodule` / `.swiftinterface` files into the
//! framework's `Modules` directory so consumers importing the framework see
//! the overlay's API.

use crate::bundler::{error::InstallError, settings::Logger, utils::fs};
use std::path::{Path, PathBuf};

/// Inputs of one install.
#[derive(Clone, Debug, Default)]
pub struct InstallConfig {
    pub dry_run: bool,
    pub logger: Logger,
}

/// Resolves the framework's `Modules` directory.
///
/// Prefers `Modules` at the bundle root (a plain directory, or the
/// `Versions/Current/Modules` symlink of a versioned bundle), then
/// `Versions/A/Modules`. A missing directory is never created.
pub fn resolve_modules_dir(bundle_dir: &Path) -> Option<PathBuf> {
    [
        bundle_dir.join("Modules"),
        bundle_dir.join("Versions").join("A").join("Modules"),
    ]
    .into_iter()
    .find(|candidate| candidate.is_dir())
}

/// Installs the interface package at `module_dir` into `bundle_dir`.
///
/// Returns the `Modules` directory written to. In dry-run mode the package
/// need not exist yet; only the bundle layout is checked.
pub async fn install(
    module_dir: &Path,
    bundle_dir: &Path,
    config: &InstallConfig,
) -> Result<PathBuf, InstallError> {
    if !config.dry_run && !module_dir.is_dir() {
        return Err(InstallError::MissingPackage(module_dir.to_path_buf()));
    }

    let modules_dir = resolve_modules_dir(bundle_dir)
        .ok_or_else(|| InstallError::UnresolvedModulesDir(bundle_dir.to_path_buf()))?;

    if config.dry_run {
        config.logger.log(&format!(
            "[dry-run] would copy {}/* into {}",
            module_dir.display(),
            modules_dir.display()
        ));
        return Ok(modules_dir);
    }

    if fs::list_entries(module_dir).await?.is_empty() {
        return Err(InstallError::EmptyPackage(module_dir.to_path_buf()));
    }

    let copied = fs::copy_dir_contents(module_dir, &modules_dir).await?;
    for name in &copied {
        log::debug!("  installed {}", name.to_string_lossy());
    }

    config.logger.log(&format!(
        "✓ Installed {} interface file(s) into {}",
        copied.len(),
        modules_dir.display()
    ));
    Ok(modules_dir)
}
