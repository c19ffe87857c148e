//! CPU architecture types and utilities.

use serde::Serialize;
use std::fmt;

/// CPU architecture of a framework binary.
///
/// Detected from the framework's location in the build output tree
/// (e.g. `iosArm64`, `iosX64`, `watchosArm32`), not from the binary itself.
///
/// # Examples
///
/// ```
/// use kodegen_bundler_embed::bundler::Arch;
///
/// let arch = Arch::detect("/build/bin/iosX64/releaseFramework/Kit.framework");
/// assert_eq!(arch, Arch::X86_64);
/// assert_eq!(arch.as_str(), "x86_64");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// ARM64 (64-bit) - Apple Silicon, all current devices
    #[default]
    Arm64,
    /// x86_64 (64-bit) - Intel Macs and Intel-hosted simulators
    X86_64,
    /// ARMv7 (32-bit) - older watchOS devices
    Armv7,
}

/// Ordered keyword table; first match wins.
const ARCH_KEYWORDS: &[(&str, Arch)] = &[
    ("arm64", Arch::Arm64),
    ("aarch64", Arch::Arm64),
    ("x86_64", Arch::X86_64),
    ("x64", Arch::X86_64),
    ("arm32", Arch::Armv7),
    ("armv7", Arch::Armv7),
];

impl Arch {
    /// Detects the architecture from a path by keyword, defaulting to [`Arch::Arm64`].
    ///
    /// Matching is case-insensitive and a pure function of the input string.
    pub fn detect(path: &str) -> Self {
        Self::find(path).unwrap_or_default()
    }

    /// Architecture named by the first matching keyword in `path`, if any.
    pub fn find(path: &str) -> Option<Self> {
        let lowered = path.to_ascii_lowercase();
        ARCH_KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, arch)| *arch)
    }

    /// Name as used in target triples and by `ld -arch`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arm64 => "arm64",
            Self::X86_64 => "x86_64",
            Self::Armv7 => "armv7",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
