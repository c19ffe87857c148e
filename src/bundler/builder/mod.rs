//! Embedding orchestration and coordination.
//!
//! This module provides the main [`Embedder`] orchestrator that sequences
//! the pipeline stages against one framework bundle.
//!
//! # Overview
//!
//! The embedder:
//! 1. Analyzes the framework ([`crate::bundler::framework`])
//! 2. Compiles the overlay sources ([`crate::bundler::compiler`])
//! 3. Merges the object code into the binary ([`crate::bundler::merger`])
//! 4. Installs the interface package ([`crate::bundler::installer`])
//! 5. Returns an [`EmbedOutput`] summary
//!
//! # Module Organization
//!
//! - [`orchestrator`] - Main [`Embedder`] struct and the stage sequence
//! - [`tool_detection`] - Compiler/linker lookup on `PATH`

mod orchestrator;
mod tool_detection;

pub use orchestrator::{EmbedOutput, Embedder};
pub use tool_detection::resolve_tool;
