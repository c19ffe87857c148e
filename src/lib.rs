//! Framework embedding library.
//!
//! Augments an already-built Apple `.framework` with additional compiled
//! Swift code and interface files, producing a single self-contained bundle
//! that exposes both the original and the added API:
//! - Recovers build parameters from the bundle layout
//! - Compiles overlay sources with `swiftc`
//! - Merges the object code into the framework binary with `ld -r`
//! - Installs the `.swiftmodule`/`.swiftinterface` into `Modules/`
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod source;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
