//! Framework embedding pipeline.
//!
//! Extends an already-built Apple `.framework` with newly compiled Swift
//! code and the matching interface files:
//!
//! 1. [`framework`] recovers the name, binary and target triple of the bundle
//! 2. [`compiler`] builds the overlay sources into one object + module
//! 3. [`merger`] folds the object into the framework binary with `ld -r`
//! 4. [`installer`] copies the module files into the bundle's `Modules/`
//!
//! [`Embedder`] runs the stages in order. Stages run strictly one after
//! another; the only suspension points are the compiler and linker
//! subprocesses, which are awaited to completion with no timeout.

pub mod builder;
pub mod compiler;
pub mod error;
pub mod framework;
pub mod installer;
pub mod merger;
pub mod process;
pub mod settings;
pub mod utils;

pub use builder::{EmbedOutput, Embedder};
pub use error::{
    AnalysisError, CompileError, EmbedError, Error, InstallError, MergeError, Result,
};
pub use framework::{BundleInfo, FRAMEWORK_EXTENSION};
pub use process::{CommandRunner, ProcessRunner, ToolCommand, ToolOutput};
pub use settings::{Arch, EmbedConfig, EmbedConfigBuilder, Logger, Platform};
