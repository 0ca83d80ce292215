//! Operating system identification and name normalization

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating systems a support policy can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperatingSystem {
    /// Linux distributions
    Linux,
    /// Microsoft Windows
    Windows,
    /// Apple macOS
    MacOS,
}

impl OperatingSystem {
    /// Normalizes a platform-reported OS name to the canonical enumeration
    ///
    /// Accepts both `platform.system()`-style names ("Linux", "Windows",
    /// "Darwin") and `std::env::consts::OS` names ("linux", "windows",
    /// "macos"). Anything else is unrecognized.
    pub fn from_platform_name(name: &str) -> Option<Self> {
        match name {
            "Linux" | "linux" => Some(OperatingSystem::Linux),
            "Windows" | "windows" => Some(OperatingSystem::Windows),
            // The kernel identifies macOS hosts as Darwin
            "Darwin" | "darwin" | "macos" | "MacOS" => Some(OperatingSystem::MacOS),
            _ => None,
        }
    }

    /// Returns the display name for this operating system
    pub fn display_name(&self) -> &'static str {
        match self {
            OperatingSystem::Linux => "Linux",
            OperatingSystem::Windows => "Windows",
            OperatingSystem::MacOS => "MacOS",
        }
    }

    /// Returns all recognized operating systems
    pub fn all() -> &'static [OperatingSystem] {
        &[
            OperatingSystem::Linux,
            OperatingSystem::Windows,
            OperatingSystem::MacOS,
        ]
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_names_normalize() {
        assert_eq!(
            OperatingSystem::from_platform_name("Linux"),
            Some(OperatingSystem::Linux)
        );
        assert_eq!(
            OperatingSystem::from_platform_name("linux"),
            Some(OperatingSystem::Linux)
        );
        assert_eq!(
            OperatingSystem::from_platform_name("Windows"),
            Some(OperatingSystem::Windows)
        );
    }

    #[test]
    fn test_darwin_normalizes_to_macos() {
        assert_eq!(
            OperatingSystem::from_platform_name("Darwin"),
            Some(OperatingSystem::MacOS)
        );
        assert_eq!(
            OperatingSystem::from_platform_name("macos"),
            Some(OperatingSystem::MacOS)
        );
    }

    #[test]
    fn test_unrecognized_names() {
        assert_eq!(OperatingSystem::from_platform_name("FreeBSD"), None);
        assert_eq!(OperatingSystem::from_platform_name(""), None);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(OperatingSystem::Linux.to_string(), "Linux");
        assert_eq!(OperatingSystem::MacOS.to_string(), "MacOS");
        assert_eq!(OperatingSystem::all().len(), 3);
    }
}
