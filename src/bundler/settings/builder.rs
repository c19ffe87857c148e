//! Builder for constructing EmbedConfig.

use super::{DEFAULT_COMPILER, DEFAULT_LINKER, EmbedConfig, Logger};
use std::path::{Path, PathBuf};

/// Builder for constructing [`EmbedConfig`].
///
/// Every field is optional; unset fields take the documented defaults of
/// [`EmbedConfig::default`].
///
/// # Examples
///
/// ```
/// use kodegen_bundler_embed::bundler::{EmbedConfigBuilder, Logger};
///
/// let config = EmbedConfigBuilder::new()
///     .sdk_path("/Applications/Xcode.app/Contents/Developer/Platforms/iPhoneOS.platform/Developer/SDKs/iPhoneOS.sdk")
///     .compiler("/usr/bin/swiftc")
///     .logger(Logger::new(|line| eprintln!("{line}")))
///     .build();
/// assert_eq!(config.compiler().to_str(), Some("/usr/bin/swiftc"));
/// ```
#[derive(Default)]
pub struct EmbedConfigBuilder {
    sdk_path: Option<PathBuf>,
    working_directory: Option<PathBuf>,
    dry_run: bool,
    compiler: Option<PathBuf>,
    linker: Option<PathBuf>,
    logger: Option<Logger>,
}

impl EmbedConfigBuilder {
    /// Creates a new config builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the SDK root passed to the compiler.
    ///
    /// Default: None (the compiler's own default)
    pub fn sdk_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sdk_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory for compiled outputs.
    ///
    /// Default: None (directory of the first source file)
    pub fn working_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.working_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Report intended commands without executing them.
    ///
    /// Default: false
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets the compiler program.
    ///
    /// Default: `swiftc`
    pub fn compiler<P: AsRef<Path>>(mut self, program: P) -> Self {
        self.compiler = Some(program.as_ref().to_path_buf());
        self
    }

    /// Sets the relocatable linker program.
    ///
    /// Default: `ld`
    pub fn linker<P: AsRef<Path>>(mut self, program: P) -> Self {
        self.linker = Some(program.as_ref().to_path_buf());
        self
    }

    /// Sets the progress logger.
    ///
    /// Default: forwards to `log::info!`
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the config.
    pub fn build(self) -> EmbedConfig {
        EmbedConfig::new(
            self.sdk_path,
            self.working_directory,
            self.dry_run,
            self.compiler
                .unwrap_or_else(|| PathBuf::from(DEFAULT_COMPILER)),
            self.linker.unwrap_or_else(|| PathBuf::from(DEFAULT_LINKER)),
            self.logger.unwrap_or_default(),
        )
    }
}
