//! Platform identifiers and validation

use std::collections::HashSet;

/// Validates the platform identifiers a check declares
pub trait PlatformValidator: Send + Sync {
    /// True when every identifier in `platforms` is known
    fn valid(&self, platforms: &[String]) -> bool;
}

/// Validator backed by the fixed set of platform identifiers the engine
/// understands
#[derive(Debug, Clone)]
pub struct KnownPlatforms {
    known: HashSet<&'static str>,
}

/// Platform identifiers recognized out of the box
pub const PLATFORM_IDS: &[&str] = &[
    // Operating systems
    "linux", "windows", "unix", "bsd",
    // Web servers
    "apache", "nginx", "iis",
    // Languages / frameworks
    "php", "java", "python", "ruby", "dotnet", "nodejs",
    // Databases
    "mysql", "postgres", "mssql", "sqlite", "oracle",
];

impl Default for KnownPlatforms {
    fn default() -> Self {
        Self {
            known: PLATFORM_IDS.iter().copied().collect(),
        }
    }
}

impl KnownPlatforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the known set with custom identifiers
    pub fn with_platform(mut self, id: &'static str) -> Self {
        self.known.insert(id);
        self
    }
}

impl PlatformValidator for KnownPlatforms {
    fn valid(&self, platforms: &[String]) -> bool {
        platforms.iter().all(|p| self.known.contains(p.as_str()))
    }
}
