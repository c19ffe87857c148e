//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, and the mapping
//! from arguments to an [`EmbedConfig`].

use crate::bundler::{EmbedConfig, EmbedConfigBuilder, FRAMEWORK_EXTENSION};
use clap::Parser;
use std::path::PathBuf;

/// Embed Swift overlays into Apple framework bundles
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_embed",
    version,
    about = "Embed Swift overlays into Apple framework bundles",
    long_about = "Compiles Swift interface sources against an existing .framework, merges the
resulting object code into the framework binary (ld -r) and installs the
generated .swiftmodule/.swiftinterface files into the framework's Modules/.

Usage:
  kodegen_bundler_embed --framework build/bin/iosArm64/releaseFramework/Shared.framework --sources build/generated/swift
  kodegen_bundler_embed -f Shared.framework -s A.swift -s B.swift --sdk \"$(xcrun --sdk iphoneos --show-sdk-path)\"
  kodegen_bundler_embed -f Shared.framework -s generated --dry-run --json

Exit code 0 = the framework binary and Modules/ contain the overlay."
)]
pub struct Args {
    /// Framework bundle to extend (the .framework directory)
    #[arg(short = 'f', long, value_name = "PATH")]
    pub framework: PathBuf,

    /// Interface sources: .swift files or directories containing them
    #[arg(short = 's', long = "sources", value_name = "PATH", required = true, num_args = 1..)]
    pub sources: Vec<PathBuf>,

    /// SDK root passed to the compiler
    #[arg(long, value_name = "PATH", env = "SDKROOT")]
    pub sdk: Option<PathBuf>,

    /// Directory for the compiled object and module files
    #[arg(short = 'w', long, value_name = "PATH")]
    pub work_dir: Option<PathBuf>,

    /// Swift compiler to invoke
    #[arg(long, value_name = "PROGRAM", env = "SWIFTC", default_value = "swiftc")]
    pub compiler: PathBuf,

    /// Relocatable linker to invoke
    #[arg(long, value_name = "PROGRAM", env = "LD", default_value = "ld")]
    pub linker: PathBuf,

    /// Print the commands that would run without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self
            .framework
            .extension()
            .is_none_or(|ext| ext != FRAMEWORK_EXTENSION)
        {
            return Err(format!(
                "Invalid framework: {}. Expected a .{} directory",
                self.framework.display(),
                FRAMEWORK_EXTENSION
            ));
        }

        if self.sources.is_empty() {
            return Err("At least one source path is required".to_string());
        }

        Ok(())
    }
}

impl From<&Args> for EmbedConfig {
    fn from(args: &Args) -> Self {
        let mut builder = EmbedConfigBuilder::new()
            .dry_run(args.dry_run)
            .compiler(&args.compiler)
            .linker(&args.linker);

        if let Some(sdk) = &args.sdk {
            builder = builder.sdk_path(sdk);
        }
        if let Some(dir) = &args.work_dir {
            builder = builder.working_directory(dir);
        }

        builder.build()
    }
}
