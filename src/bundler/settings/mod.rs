//! Configuration structures for embedding runs.
//!
//! This module provides the top-level [`EmbedConfig`] with its builder, the
//! shared [`Logger`], and the platform/architecture vocabulary recovered
//! from framework bundles.

mod arch;
mod builder;
mod core;
mod platform;

// Re-export all public types
pub use arch::Arch;
pub use builder::EmbedConfigBuilder;
pub use self::core::{DEFAULT_COMPILER, DEFAULT_LINKER, EmbedConfig, Logger};
pub use platform::Platform;
