//! Apple platform families a framework can target.

use serde::Serialize;
use std::fmt;

/// Operating system family of a framework.
///
/// Like [`Arch`](super::Arch), this is inferred from the framework's path
/// in the build output tree. Simulator builds map onto their device family.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// iOS and the iOS simulator
    Ios,
    /// watchOS and the watchOS simulator
    WatchOs,
    /// tvOS and the tvOS simulator
    TvOs,
    /// macOS
    #[default]
    MacOs,
}

/// Ordered keyword table; first match wins.
///
/// `iosSimulator*` directories hit `ios` and keep the device triple; the
/// simulator variant of the target is not expressed.
const PLATFORM_KEYWORDS: &[(&str, Platform)] = &[
    ("ios", Platform::Ios),
    ("watchos", Platform::WatchOs),
    ("tvos", Platform::TvOs),
    ("macos", Platform::MacOs),
];

impl Platform {
    /// Detects the platform from a path by keyword, defaulting to [`Platform::MacOs`].
    pub fn detect(path: &str) -> Self {
        Self::find(path).unwrap_or_default()
    }

    /// Platform named by the first matching keyword in `path`, if any.
    pub fn find(path: &str) -> Option<Self> {
        let lowered = path.to_ascii_lowercase();
        PLATFORM_KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, platform)| *platform)
    }

    /// OS component of the target triple.
    pub fn triple_os(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::WatchOs => "watchos",
            Self::TvOs => "tvos",
            Self::MacOs => "macos",
        }
    }

    /// Info.plist key carrying the minimum deployment version.
    pub fn version_key(&self) -> &'static str {
        match self {
            Self::MacOs => "LSMinimumSystemVersion",
            Self::Ios | Self::WatchOs | Self::TvOs => "MinimumOSVersion",
        }
    }

    /// Deployment version used when the bundle's Info.plist has none.
    pub fn default_deployment_version(&self) -> &'static str {
        match self {
            Self::Ios => "12.0",
            Self::WatchOs => "5.0",
            Self::TvOs => "12.0",
            Self::MacOs => "10.15",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.triple_os())
    }
}
