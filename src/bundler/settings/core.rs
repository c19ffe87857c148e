//! Core EmbedConfig struct and the run logger.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Compiler used when none is configured.
pub const DEFAULT_COMPILER: &str = "swiftc";

/// Relocatable linker used when none is configured.
pub const DEFAULT_LINKER: &str = "ld";

/// Progress sink shared by every stage of one embedding run.
///
/// The default forwards each line to `log::info!`.
#[derive(Clone)]
pub struct Logger(Arc<dyn Fn(&str) + Send + Sync>);

impl Logger {
    /// Wraps a callback.
    pub fn new(f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Emits one line.
    pub fn log(&self, message: &str) {
        (self.0)(message)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(|message| log::info!("{message}"))
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Logger(<callback>)")
    }
}

/// Configuration for one embedding run.
///
/// Constructed via [`EmbedConfigBuilder`](super::EmbedConfigBuilder) or
/// [`EmbedConfig::default`], which means: no explicit SDK, outputs next to
/// the first source file, real execution, `swiftc` and `ld` from `PATH`,
/// and progress forwarded to the `log` facade.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_embed::bundler::EmbedConfigBuilder;
///
/// let config = EmbedConfigBuilder::new()
///     .working_directory("build/embed")
///     .dry_run(true)
///     .build();
/// assert!(config.dry_run());
/// ```
#[derive(Clone, Debug)]
pub struct EmbedConfig {
    /// SDK root passed to the compiler as `-sdk`.
    sdk_path: Option<PathBuf>,

    /// Directory receiving the object file and interface package.
    working_directory: Option<PathBuf>,

    /// Report commands instead of running them.
    dry_run: bool,

    /// Compiler program.
    compiler: PathBuf,

    /// Linker program.
    linker: PathBuf,

    logger: Logger,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            sdk_path: None,
            working_directory: None,
            dry_run: false,
            compiler: PathBuf::from(DEFAULT_COMPILER),
            linker: PathBuf::from(DEFAULT_LINKER),
            logger: Logger::default(),
        }
    }
}

impl EmbedConfig {
    pub(crate) fn new(
        sdk_path: Option<PathBuf>,
        working_directory: Option<PathBuf>,
        dry_run: bool,
        compiler: PathBuf,
        linker: PathBuf,
        logger: Logger,
    ) -> Self {
        Self {
            sdk_path,
            working_directory,
            dry_run,
            compiler,
            linker,
            logger,
        }
    }

    /// Returns the SDK root, if one was configured.
    pub fn sdk_path(&self) -> Option<&Path> {
        self.sdk_path.as_deref()
    }

    /// Returns the output directory, if one was configured.
    pub fn working_directory(&self) -> Option<&Path> {
        self.working_directory.as_deref()
    }

    /// Returns whether this is a dry run.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the compiler program.
    pub fn compiler(&self) -> &Path {
        &self.compiler
    }

    /// Returns the linker program.
    pub fn linker(&self) -> &Path {
        &self.linker
    }

    /// Returns the run logger.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}
