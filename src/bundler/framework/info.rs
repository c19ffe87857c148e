//! Build parameters recovered from a framework bundle.

use crate::bundler::settings::{Arch, Platform};
use std::path::{Path, PathBuf};

/// Everything needed to compile and link against an existing framework.
///
/// Produced once per run by [`analyze`](super::analyze) and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleInfo {
    name: String,
    bundle_path: PathBuf,
    binary_path: PathBuf,
    platform: Platform,
    arch: Arch,
    deployment_version: String,
    target_triple: String,
}

impl BundleInfo {
    pub(crate) fn new(
        name: String,
        bundle_path: PathBuf,
        binary_path: PathBuf,
        platform: Platform,
        arch: Arch,
        deployment_version: String,
    ) -> Self {
        let target_triple = target_triple(platform, arch, &deployment_version);
        Self {
            name,
            bundle_path,
            binary_path,
            platform,
            arch,
            deployment_version,
            target_triple,
        }
    }

    /// Framework name, e.g. `SampleKit` for `SampleKit.framework`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute path of the `.framework` directory.
    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    /// Absolute path of the framework's binary.
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    pub fn deployment_version(&self) -> &str {
        &self.deployment_version
    }

    /// Compiler target, e.g. `arm64-apple-ios12.0`.
    pub fn target_triple(&self) -> &str {
        &self.target_triple
    }
}

/// Formats `<arch>-apple-<os><version>`.
pub fn target_triple(platform: Platform, arch: Arch, deployment_version: &str) -> String {
    format!(
        "{}-apple-{}{}",
        arch.as_str(),
        platform.triple_os(),
        deployment_version
    )
}

/// Architecture component of a target triple, as passed to `ld -arch`.
pub fn triple_arch(target_triple: &str) -> &str {
    target_triple.split('-').next().unwrap_or(target_triple)
}
