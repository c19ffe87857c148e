//! Main embedding orchestration.
//!
//! This module provides the [`Embedder`] that runs the four pipeline stages
//! in order and stops at the first failure.

use crate::bundler::{
    EmbedConfig, EmbedError,
    compiler::{self, CompileConfig},
    framework::{self, BundleInfo},
    installer::{self, InstallConfig},
    merger::{self, MergeConfig},
    process::{CommandRunner, ProcessRunner},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Summary of a successful embedding run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmbedOutput {
    /// Framework name.
    pub bundle_name: String,
    /// Path of the merged binary (planned path in a dry run).
    pub binary_path: PathBuf,
    /// Number of interface sources compiled into the framework.
    pub sources_embedded: usize,
    /// Whether commands were only reported.
    pub dry_run: bool,
}

/// Main embedding orchestrator.
///
/// Runs analysis → compilation → merge → installation. Every stage gets the
/// same dry-run flag and logger from the [`EmbedConfig`]; a failure is
/// returned as an [`EmbedError`] naming the stage, and later stages do not
/// run. Nothing is retried.
///
/// Callers must not run two embeddings against the same framework at once:
/// the binary replace is not safe under concurrent writers.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_embed::bundler::{EmbedConfigBuilder, Embedder};
/// use std::path::{Path, PathBuf};
///
/// # async fn example() -> Result<(), kodegen_bundler_embed::bundler::EmbedError> {
/// let embedder = Embedder::new(EmbedConfigBuilder::new().dry_run(true).build());
/// let output = embedder
///     .embed(
///         Path::new("build/bin/iosArm64/releaseFramework/Shared.framework"),
///         &[PathBuf::from("build/generated/swift/Shared.swift")],
///     )
///     .await?;
/// println!("{} -> {}", output.bundle_name, output.binary_path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Embedder<R = ProcessRunner> {
    config: EmbedConfig,
    runner: R,
}

impl Embedder<ProcessRunner> {
    /// Creates an embedder that spawns real processes.
    pub fn new(config: EmbedConfig) -> Self {
        Self::with_runner(config, ProcessRunner)
    }
}

impl<R: CommandRunner> Embedder<R> {
    /// Creates an embedder with a custom command runner.
    pub fn with_runner(config: EmbedConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Returns a reference to the embed config.
    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    /// Returns a reference to the command runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Compiles `sources` and embeds them into the framework at `bundle_dir`.
    pub async fn embed(
        &self,
        bundle_dir: &Path,
        sources: &[PathBuf],
    ) -> Result<EmbedOutput, EmbedError> {
        if sources.is_empty() {
            return Err(EmbedError::NoSources);
        }

        let logger = self.config.logger();
        let info = framework::analyze(bundle_dir).map_err(EmbedError::Analysis)?;
        logger.log(&format!(
            "Embedding {} source file(s) into {} ({})",
            sources.len(),
            info.name(),
            info.target_triple()
        ));

        let compiled = compiler::compile(sources, &self.compile_config(&info), &self.runner)
            .await
            .map_err(EmbedError::Compilation)?;

        let binary_path = merger::merge(
            &compiled.object_files,
            &self.merge_config(&info),
            &self.runner,
        )
        .await
        .map_err(EmbedError::Merge)?;

        installer::install(
            &compiled.module_dir,
            info.bundle_path(),
            &self.install_config(),
        )
        .await
        .map_err(EmbedError::Installation)?;

        logger.log(&format!("✓ Embedded overlay into {}", info.name()));

        Ok(EmbedOutput {
            bundle_name: info.name().to_string(),
            binary_path,
            sources_embedded: sources.len(),
            dry_run: self.config.dry_run(),
        })
    }

    fn compile_config(&self, info: &BundleInfo) -> CompileConfig {
        CompileConfig {
            bundle_path: info.bundle_path().to_path_buf(),
            target_triple: info.target_triple().to_string(),
            sdk_path: self.config.sdk_path().map(Path::to_path_buf),
            output_directory: self.config.working_directory().map(Path::to_path_buf),
            compiler: self.config.compiler().to_path_buf(),
            dry_run: self.config.dry_run(),
            logger: self.config.logger().clone(),
        }
    }

    fn merge_config(&self, info: &BundleInfo) -> MergeConfig {
        MergeConfig {
            binary_path: info.binary_path().to_path_buf(),
            target_triple: info.target_triple().to_string(),
            output_path: None,
            linker: self.config.linker().to_path_buf(),
            dry_run: self.config.dry_run(),
            logger: self.config.logger().clone(),
        }
    }

    fn install_config(&self) -> InstallConfig {
        InstallConfig {
            dry_run: self.config.dry_run(),
            logger: self.config.logger().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        EmbedConfigBuilder, framework::testing::neutral_tempdir, process::testing::ScriptedRunner,
    };
    use std::fs;

    struct Workspace {
        _tmp: tempfile::TempDir,
        bundle: PathBuf,
        sources: Vec<PathBuf>,
        work: PathBuf,
    }

    fn workspace(with_modules: bool) -> Workspace {
        let tmp = neutral_tempdir();
        let bundle = tmp
            .path()
            .join("bin/iosArm64/releaseFramework/SampleKit.framework");
        fs::create_dir_all(&bundle).unwrap();
        fs::write(bundle.join("SampleKit"), b"original").unwrap();
        if with_modules {
            fs::create_dir_all(bundle.join("Modules")).unwrap();
        }
        let src_dir = tmp.path().join("generated");
        fs::create_dir_all(&src_dir).unwrap();
        let source = src_dir.join("SampleKit+Overlay.swift");
        fs::write(&source, "public func greet() {}").unwrap();
        let work = tmp.path().join("work");
        Workspace {
            _tmp: tmp,
            bundle,
            sources: vec![source],
            work,
        }
    }

    fn embedder(ws: &Workspace, runner: ScriptedRunner, dry_run: bool) -> Embedder<ScriptedRunner> {
        let config = EmbedConfigBuilder::new()
            .working_directory(&ws.work)
            .dry_run(dry_run)
            .build();
        Embedder::with_runner(config, runner)
    }

    #[tokio::test]
    async fn all_stages_succeed() {
        let ws = workspace(true);
        let embedder = embedder(&ws, ScriptedRunner::default(), false);

        let out = embedder.embed(&ws.bundle, &ws.sources).await.unwrap();

        assert_eq!(out.bundle_name, "SampleKit");
        assert_eq!(out.binary_path, ws.bundle.join("SampleKit"));
        assert_eq!(out.sources_embedded, 1);
        assert_eq!(fs::read(&out.binary_path).unwrap(), b"merged");
        assert!(ws.bundle.join("Modules/SampleKitOverlay.swiftmodule").is_file());
        assert_eq!(embedder.runner.call_count(), 2);
    }

    #[tokio::test]
    async fn empty_sources_short_circuit() {
        let ws = workspace(true);
        let embedder = embedder(&ws, ScriptedRunner::default(), false);

        let err = embedder.embed(&ws.bundle, &[]).await.unwrap_err();

        assert!(matches!(err, EmbedError::NoSources));
        assert_eq!(embedder.runner.call_count(), 0);
    }

    #[tokio::test]
    async fn analysis_failure_is_attributed() {
        let ws = workspace(true);
        let embedder = embedder(&ws, ScriptedRunner::default(), false);

        let err = embedder
            .embed(&ws.bundle.with_file_name("Missing.framework"), &ws.sources)
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("analysis failed"));
        assert_eq!(embedder.runner.call_count(), 0);
    }

    #[tokio::test]
    async fn compile_failure_stops_before_merge() {
        let ws = workspace(true);
        let embedder = embedder(&ws, ScriptedRunner::failing("swiftc", 1), false);

        let err = embedder.embed(&ws.bundle, &ws.sources).await.unwrap_err();

        assert!(err.to_string().starts_with("compilation failed"));
        assert_eq!(embedder.runner.call_count(), 1);
        assert_eq!(fs::read(ws.bundle.join("SampleKit")).unwrap(), b"original");
    }

    #[tokio::test]
    async fn merge_failure_is_attributed() {
        let ws = workspace(true);
        let embedder = embedder(&ws, ScriptedRunner::failing("ld", 1), false);

        let err = embedder.embed(&ws.bundle, &ws.sources).await.unwrap_err();

        assert!(err.to_string().starts_with("merge failed"));
        assert_eq!(fs::read(ws.bundle.join("SampleKit")).unwrap(), b"original");
        assert!(!ws.bundle.join("Modules/SampleKitOverlay.swiftmodule").exists());
    }

    #[tokio::test]
    async fn install_failure_is_attributed() {
        let ws = workspace(false);
        let embedder = embedder(&ws, ScriptedRunner::default(), false);

        let err = embedder.embed(&ws.bundle, &ws.sources).await.unwrap_err();

        assert!(err.to_string().starts_with("installation failed"));
    }

    #[tokio::test]
    async fn dry_run_spawns_nothing_and_succeeds() {
        let ws = workspace(true);
        let embedder = embedder(&ws, ScriptedRunner::default(), true);

        let out = embedder.embed(&ws.bundle, &ws.sources).await.unwrap();

        assert!(out.dry_run);
        assert_eq!(out.binary_path, ws.bundle.join("SampleKit"));
        assert_eq!(embedder.runner.call_count(), 0);
        assert_eq!(fs::read(ws.bundle.join("SampleKit")).unwrap(), b"original");
        assert!(!ws.work.exists());
    }
}
