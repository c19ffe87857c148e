//! Framework bundle analysis.
//!
//! - [`analyzer`] - inspects a `.framework` directory
//! - [`info`] - the recovered [`BundleInfo`] and target-triple formatting

mod analyzer;
mod info;

pub use analyzer::{FRAMEWORK_EXTENSION, analyze, try_analyze};
pub use info::{BundleInfo, target_triple, triple_arch};

#[cfg(test)]
pub(crate) mod testing {
    use crate::bundler::settings::{Arch, Platform};

    /// Every triple handed to the compiler and linker has this shape.
    pub(crate) const TRIPLE_PATTERN: &str =
        r"^(arm64|x86_64|armv7)-apple-(ios|macos|watchos|tvos)[0-9.]*$";

    pub(crate) fn assert_triple_shape(triple: &str) {
        let re = regex::Regex::new(TRIPLE_PATTERN).unwrap();
        assert!(re.is_match(triple), "malformed target triple: {triple}");
    }

    /// Temp directory whose own path names no platform or architecture, so
    /// detection only sees the fixture's build directories.
    pub(crate) fn neutral_tempdir() -> tempfile::TempDir {
        loop {
            let tmp = tempfile::tempdir().unwrap();
            let neutral = {
                let path = tmp.path().to_string_lossy();
                Platform::find(&path).is_none() && Arch::find(&path).is_none()
            };
            if neutral {
                return tmp;
            }
        }
    }
}
