//! Relocatable merge of overlay objects into a framework binary.
//!
//! Runs `ld -r` over the original binary plus the new object files. Output is
//! staged in `<binary>.merged` and only renamed onto its destination once the
//! linker succeeds, so a failed merge leaves the original bytes untouched.

use crate::bundler::{
    error::{ErrorExt, MergeError},
    framework::triple_arch,
    process::{CommandRunner, ToolCommand},
    settings::Logger,
};
use std::io;
use std::path::{Path, PathBuf};

/// Suffix of the staging file written next to the original binary.
pub const STAGING_SUFFIX: &str = "merged";

/// Inputs of one merge.
#[derive(Clone, Debug)]
pub struct MergeConfig {
    /// Framework binary being extended.
    pub binary_path: PathBuf,
    /// Target triple; its architecture is passed to `-arch`.
    pub target_triple: String,
    /// Write here instead of replacing the original.
    pub output_path: Option<PathBuf>,
    /// Linker program.
    pub linker: PathBuf,
    pub dry_run: bool,
    pub logger: Logger,
}

impl MergeConfig {
    /// Final location of the merged binary.
    pub fn destination(&self) -> &Path {
        self.output_path.as_deref().unwrap_or(&self.binary_path)
    }

    /// `<binary>.merged`, next to the original.
    pub fn staging_path(&self) -> PathBuf {
        let mut name = self
            .binary_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(STAGING_SUFFIX);
        self.binary_path.with_file_name(name)
    }
}

/// Builds `ld -r -arch <arch> <binary> <objects...> -o <output>`.
pub fn build_command(
    linker: &Path,
    binary_path: &Path,
    object_files: &[PathBuf],
    target_triple: &str,
    output: &Path,
) -> ToolCommand {
    ToolCommand::new(linker)
        .args(["-r", "-arch", triple_arch(target_triple)])
        .arg(binary_path)
        .args(object_files)
        .arg("-o")
        .arg(output)
}

/// Merges `object_files` into the framework binary.
///
/// Returns the path of the merged binary. Fails without spawning anything
/// when `object_files` is empty or an input is missing; object files are not
/// checked in dry-run mode since no compile has produced them.
pub async fn merge<R: CommandRunner>(
    object_files: &[PathBuf],
    config: &MergeConfig,
    runner: &R,
) -> Result<PathBuf, MergeError> {
    if object_files.is_empty() {
        return Err(MergeError::NoObjectFiles);
    }
    if !config.binary_path.is_file() {
        return Err(MergeError::MissingBinary(config.binary_path.clone()));
    }
    if !config.dry_run {
        if let Some(missing) = object_files.iter().find(|o| !o.is_file()) {
            return Err(MergeError::MissingObject(missing.clone()));
        }
    }

    let staging = config.staging_path();
    let destination = config.destination().to_path_buf();
    let command = build_command(
        &config.linker,
        &config.binary_path,
        object_files,
        &config.target_triple,
        &staging,
    );

    if config.dry_run {
        config
            .logger
            .log(&format!("[dry-run] {}", command.display_line()));
        config.logger.log(&format!(
            "[dry-run] would move {} to {}",
            staging.display(),
            destination.display()
        ));
        return Ok(destination);
    }

    config.logger.log(&format!(
        "Merging {} object file(s) into {}",
        object_files.len(),
        config.binary_path.display()
    ));

    // Leftover from an interrupted run.
    remove_if_exists(&staging)
        .await
        .fs_context("removing stale staging file", &staging)?;

    let result = match runner.run(&command).await {
        Ok(result) => result,
        Err(error) => {
            discard_staging(&staging).await;
            return Err(MergeError::Spawn {
                program: config.linker.display().to_string(),
                error,
            });
        }
    };

    if !result.success() {
        discard_staging(&staging).await;
        log::debug!("Linker output:\n{}", result.output);
        return Err(MergeError::LinkerFailed {
            code: result.code,
            output: result.output,
        });
    }

    if let Err(e) = promote(&staging, &destination).await {
        discard_staging(&staging).await;
        return Err(e.into());
    }

    config
        .logger
        .log(&format!("✓ Merged binary: {}", destination.display()));
    Ok(destination)
}

/// Moves the staged output onto `destination`.
///
/// Same-directory renames replace atomically. An explicit destination on
/// another filesystem falls back to copy-then-remove.
async fn promote(staging: &Path, destination: &Path) -> crate::bundler::Result<()> {
    match tokio::fs::rename(staging, destination).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            tokio::fs::copy(staging, destination)
                .await
                .fs_context("copying merged binary", destination)?;
            tokio::fs::remove_file(staging)
                .await
                .fs_context("removing staging file", staging)
        }
        Err(e) => Err(e).fs_context("replacing binary", destination),
    }
}

async fn remove_if_exists(path: &Path) -> io::Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

async fn discard_staging(staging: &Path) {
    if let Err(e) = remove_if_exists(staging).await {
        log::warn!("Failed to remove {}: {}", staging.display(), e);
    }
}
