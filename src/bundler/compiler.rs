//! Overlay compilation.
//!
//! Compiles a batch of Swift interface sources against an existing framework
//! into a single relocatable object plus a library-evolution-enabled module
//! (`.swiftmodule` + `.swiftinterface`). The module is named
//! `<Framework>Overlay` and links the framework itself, so the new sources
//! can call the framework's exported API directly.

use crate::bundler::{
    error::CompileError,
    process::{CommandRunner, ToolCommand},
    settings::Logger,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Name of the interface package directory inside the output directory.
pub const INTERFACE_PACKAGE_DIR: &str = "Modules";

/// Inputs of one compiler invocation.
#[derive(Clone, Debug)]
pub struct CompileConfig {
    /// The `.framework` directory being extended.
    pub bundle_path: PathBuf,
    /// Target passed verbatim as `-target`.
    pub target_triple: String,
    /// SDK root passed as `-sdk`.
    pub sdk_path: Option<PathBuf>,
    /// Where outputs go; defaults to the first source's directory. Relative
    /// paths resolve against the current directory.
    pub output_directory: Option<PathBuf>,
    /// Compiler program.
    pub compiler: PathBuf,
    pub dry_run: bool,
    pub logger: Logger,
}

impl CompileConfig {
    /// Framework name, from the bundle directory's stem.
    pub fn bundle_name(&self) -> String {
        self.bundle_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Module name of the compiled overlay.
    pub fn module_name(&self) -> String {
        format!("{}Overlay", self.bundle_name())
    }
}

/// Artifacts of a successful compile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOutput {
    /// Exactly one object file under whole-module optimization.
    pub object_files: Vec<PathBuf>,
    /// Directory holding the `.swiftmodule` / `.swiftinterface` files.
    pub module_dir: PathBuf,
}

/// Planned compiler invocation and the paths it will produce.
#[derive(Clone, Debug)]
pub struct CompilePlan {
    pub command: ToolCommand,
    pub object_file: PathBuf,
    pub module_dir: PathBuf,
}

/// Builds the compiler invocation for `sources`.
///
/// Pure; touches neither the filesystem nor any process.
pub fn build_command(sources: &[PathBuf], config: &CompileConfig) -> CompilePlan {
    let module_name = config.module_name();
    let output_dir = output_directory(sources, config);
    let module_dir = output_dir.join(INTERFACE_PACKAGE_DIR);
    let module_path = module_dir.join(format!("{module_name}.swiftmodule"));
    let object_file = output_dir.join(format!("{module_name}.o"));

    let search_dir = config
        .bundle_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut command = ToolCommand::new(&config.compiler)
        .args(["-module-name", module_name.as_str()])
        .args([
            "-emit-object",
            "-emit-module",
            "-emit-module-interface",
            "-enable-library-evolution",
            "-whole-module-optimization",
        ])
        .arg("-emit-module-path")
        .arg(&module_path)
        .args(["-target", config.target_triple.as_str()]);

    if let Some(sdk) = &config.sdk_path {
        command = command.arg("-sdk").arg(sdk);
    }

    let bundle_name = config.bundle_name();
    let command = command
        .arg("-F")
        .arg(&search_dir)
        .args(["-framework", bundle_name.as_str()])
        .arg("-o")
        .arg(&object_file)
        .args(sources);

    CompilePlan {
        command,
        object_file,
        module_dir,
    }
}

/// Compiles `sources` into one object file and an interface package.
///
/// Fails without spawning anything when `sources` is empty or any source is
/// missing. In dry-run mode the command is only logged and the planned
/// output paths are returned.
pub async fn compile<R: CommandRunner>(
    sources: &[PathBuf],
    config: &CompileConfig,
    runner: &R,
) -> Result<CompileOutput, CompileError> {
    if sources.is_empty() {
        return Err(CompileError::NoSources);
    }
    if let Some(missing) = sources.iter().find(|s| !s.is_file()) {
        return Err(CompileError::MissingSource(missing.clone()));
    }

    let plan = build_command(sources, config);
    let output = CompileOutput {
        object_files: vec![plan.object_file.clone()],
        module_dir: plan.module_dir.clone(),
    };

    if config.dry_run {
        config
            .logger
            .log(&format!("[dry-run] {}", plan.command.display_line()));
        return Ok(output);
    }

    config.logger.log(&format!(
        "Compiling {} source file(s) into {}",
        sources.len(),
        config.module_name()
    ));

    // Leftovers from an earlier run would be installed alongside this overlay.
    fs::create_dir_all(&plan.module_dir, true).await?;

    let result = runner
        .run(&plan.command)
        .await
        .map_err(|error| CompileError::Spawn {
            program: config.compiler.display().to_string(),
            error,
        })?;

    if !result.success() {
        log::debug!("Compiler output:\n{}", result.output);
        return Err(CompileError::CompilerFailed {
            code: result.code,
            output: result.output,
        });
    }

    config
        .logger
        .log(&format!("✓ Compiled {}", plan.object_file.display()));
    Ok(output)
}

fn output_directory(sources: &[PathBuf], config: &CompileConfig) -> PathBuf {
    let dir = config
        .output_directory
        .clone()
        .or_else(|| {
            sources
                .first()
                .and_then(|s| s.parent())
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
        })
        .unwrap_or_else(|| PathBuf::from("."));

    std::path::absolute(&dir).unwrap_or(dir)
}
