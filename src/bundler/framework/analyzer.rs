//! Framework bundle inspection.
//!
//! Recovers the framework name, binary location, platform, architecture and
//! deployment version of an already-built `.framework` directory. Platform
//! and architecture come from keywords in the bundle's path (the build
//! output layout, e.g. `build/bin/iosArm64/releaseFramework/Kit.framework`),
//! so they are only as reliable as that naming convention.

use super::BundleInfo;
use crate::bundler::error::AnalysisError;
use crate::bundler::settings::{Arch, Platform};
use std::path::{Path, PathBuf};

/// Directory extension of a framework bundle.
pub const FRAMEWORK_EXTENSION: &str = "framework";

/// Info.plist locations, flat (iOS-style) layout first.
const INFO_PLIST_CANDIDATES: &[&str] = &[
    "Info.plist",
    "Resources/Info.plist",
    "Versions/A/Resources/Info.plist",
];

/// Inspects a framework bundle.
///
/// # Errors
///
/// - [`AnalysisError::NotFound`] if `bundle_dir` does not exist
/// - [`AnalysisError::NotAFramework`] if it lacks the `.framework` extension
/// - [`AnalysisError::MissingBinary`] if neither `<Name>` nor
///   `Versions/A/<Name>` exists inside it
///
/// Platform, architecture and version detection never fail; missing signals
/// fall back to [`Platform::MacOs`], [`Arch::Arm64`] and the platform's
/// default deployment version.
pub fn analyze(bundle_dir: &Path) -> Result<BundleInfo, AnalysisError> {
    if !bundle_dir.is_dir() {
        return Err(AnalysisError::NotFound(bundle_dir.to_path_buf()));
    }

    let bundle_path = std::path::absolute(bundle_dir).unwrap_or_else(|_| bundle_dir.to_path_buf());
    let name = framework_name(&bundle_path)
        .ok_or_else(|| AnalysisError::NotAFramework(bundle_path.clone()))?;

    let binary_path =
        locate_binary(&bundle_path, &name).ok_or_else(|| AnalysisError::MissingBinary {
            name: name.clone(),
            bundle: bundle_path.clone(),
        })?;

    let path_str = bundle_path.to_string_lossy();
    let platform = Platform::detect(&path_str);
    let arch = Arch::detect(&path_str);
    let deployment_version = read_deployment_version(&bundle_path, platform)
        .unwrap_or_else(|| platform.default_deployment_version().to_string());

    log::debug!(
        "Analyzed {}: platform={}, arch={}, version={}",
        name,
        platform,
        arch,
        deployment_version
    );

    Ok(BundleInfo::new(
        name,
        bundle_path,
        binary_path,
        platform,
        arch,
        deployment_version,
    ))
}

/// Like [`analyze`], discarding the reason for failure.
pub fn try_analyze(bundle_dir: &Path) -> Option<BundleInfo> {
    match analyze(bundle_dir) {
        Ok(info) => Some(info),
        Err(e) => {
            log::debug!("Framework analysis failed: {}", e);
            None
        }
    }
}

/// `Kit` for `.../Kit.framework`.
fn framework_name(bundle_path: &Path) -> Option<String> {
    if bundle_path.extension()? != FRAMEWORK_EXTENSION {
        return None;
    }
    let stem = bundle_path.file_stem()?.to_str()?;
    (!stem.is_empty()).then(|| stem.to_string())
}

/// First existing of `<Name>` and `Versions/A/<Name>`.
fn locate_binary(bundle_path: &Path, name: &str) -> Option<PathBuf> {
    [
        bundle_path.join(name),
        bundle_path.join("Versions").join("A").join(name),
    ]
    .into_iter()
    .find(|candidate| candidate.is_file())
}

/// Minimum OS version from the first readable Info.plist carrying it.
fn read_deployment_version(bundle_path: &Path, platform: Platform) -> Option<String> {
    let key = platform.version_key();

    INFO_PLIST_CANDIDATES
        .iter()
        .map(|relative| bundle_path.join(relative))
        .filter(|path| path.is_file())
        .find_map(|path| match plist::Value::from_file(&path) {
            Ok(value) => value
                .as_dictionary()
                .and_then(|dict| dict.get(key))
                .and_then(|v| v.as_string())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            Err(e) => {
                log::warn!("Ignoring unreadable {}: {}", path.display(), e);
                None
            }
        })
}
