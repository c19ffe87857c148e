//! Error types for the embedding pipeline.
//!
//! Each pipeline stage reports failures through its own error enum so the
//! orchestrator can attribute a failure to the stage that produced it.
//! [`Error`] is the generic error used by filesystem helpers and source
//! collection.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for generic bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Generic bundler error.
#[derive(Error, Debug)]
pub enum Error {
    /// Free-form error message.
    #[error("{0}")]
    GenericError(String),

    /// IO error annotated with what was being done and where.
    #[error("{context} ({}): {error}", .path.display())]
    Fs {
        /// What the operation was doing
        context: String,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying IO error
        error: std::io::Error,
    },

    /// Directory walk failed.
    #[error("directory traversal failed: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix stripping failed.
    #[error("path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),
}

/// Attaches filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wraps an IO error with a description and the path involved.
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Attaches a message to a failure or to a missing value.
pub trait Context<T> {
    /// Adds a lazily built message.
    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{}: {e}", f())))
    }
}

impl<T> Context<T> for Option<T> {
    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

/// Failure to recover build parameters from a framework bundle.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The bundle directory does not exist.
    #[error("framework directory does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// The directory name lacks the `.framework` extension.
    #[error("not a framework bundle (expected a .framework directory): {}", .0.display())]
    NotAFramework(PathBuf),

    /// Neither `<Name>` nor `Versions/A/<Name>` exists inside the bundle.
    #[error("no binary named {name} found in {} (checked {name} and Versions/A/{name})", .bundle.display())]
    MissingBinary {
        /// Framework name
        name: String,
        /// Bundle directory
        bundle: PathBuf,
    },
}

/// Failure to compile interface sources.
#[derive(Error, Debug)]
pub enum CompileError {
    /// Nothing to compile.
    #[error("No source files provided")]
    NoSources,

    /// A listed source file does not exist.
    #[error("source file not found: {}", .0.display())]
    MissingSource(PathBuf),

    /// The compiler could not be started.
    #[error("failed to launch {program}: {error}")]
    Spawn {
        /// Program that failed to launch
        program: String,
        /// Underlying IO error
        error: std::io::Error,
    },

    /// The compiler exited unsuccessfully.
    #[error("compiler exited with {}: {output}", exit_label(.code))]
    CompilerFailed {
        /// Exit code, `None` when killed by a signal
        code: Option<i32>,
        /// Combined stdout and stderr
        output: String,
    },

    /// Output directory could not be prepared.
    #[error(transparent)]
    Io(#[from] Error),
}

/// Failure to merge object code into the framework binary.
#[derive(Error, Debug)]
pub enum MergeError {
    /// Nothing to merge.
    #[error("No object files provided")]
    NoObjectFiles,

    /// The framework binary does not exist.
    #[error("original binary not found: {}", .0.display())]
    MissingBinary(PathBuf),

    /// A listed object file does not exist.
    #[error("object file not found: {}", .0.display())]
    MissingObject(PathBuf),

    /// The linker could not be started.
    #[error("failed to launch {program}: {error}")]
    Spawn {
        /// Program that failed to launch
        program: String,
        /// Underlying IO error
        error: std::io::Error,
    },

    /// The linker exited unsuccessfully.
    #[error("linker exited with {}: {output}", exit_label(.code))]
    LinkerFailed {
        /// Exit code, `None` when killed by a signal
        code: Option<i32>,
        /// Combined stdout and stderr
        output: String,
    },

    /// Replacing or staging the binary failed.
    #[error(transparent)]
    Io(#[from] Error),
}

/// Failure to install the interface package into the bundle.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The compiled interface package directory does not exist.
    #[error("interface package not found: {}", .0.display())]
    MissingPackage(PathBuf),

    /// The interface package directory is empty.
    #[error("interface package is empty: {}", .0.display())]
    EmptyPackage(PathBuf),

    /// Neither `Modules` nor `Versions/A/Modules` exists in the bundle.
    #[error("could not resolve Modules directory in {} (checked Modules and Versions/A/Modules)", .0.display())]
    UnresolvedModulesDir(PathBuf),

    /// Copying the package failed.
    #[error(transparent)]
    Io(#[from] Error),
}

/// Failure of a whole embedding run, attributed to its stage.
#[derive(Error, Debug)]
pub enum EmbedError {
    /// No interface sources were given.
    #[error("No source files provided")]
    NoSources,

    /// Bundle analysis failed.
    #[error("analysis failed: {0}")]
    Analysis(#[source] AnalysisError),

    /// Compilation failed.
    #[error("compilation failed: {0}")]
    Compilation(#[source] CompileError),

    /// Merging into the binary failed.
    #[error("merge failed: {0}")]
    Merge(#[source] MergeError),

    /// Installing the interface package failed.
    #[error("installation failed: {0}")]
    Installation(#[source] InstallError),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
