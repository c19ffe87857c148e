//! Kodegen Bundler Embed - Swift overlay embedding for Apple frameworks.
//!
//! This binary compiles interface sources against an existing .framework and
//! folds the result into the framework's binary and Modules/ directory.

use kodegen_bundler_embed::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
