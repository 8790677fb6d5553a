//! Audit configuration - which content kinds are in scope for a scan

use serde::{Deserialize, Serialize};

/// Toggles controlling which page elements get audited.
///
/// Body, path and server auditing have no toggle; they are structural and
/// always in scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Audit links discovered on pages
    #[serde(default = "default_true")]
    pub audit_links: bool,
    /// Audit HTML forms
    #[serde(default = "default_true")]
    pub audit_forms: bool,
    /// Audit cookies
    #[serde(default = "default_true")]
    pub audit_cookies: bool,
    /// Audit response headers
    #[serde(default = "default_true")]
    pub audit_headers: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            audit_links: true,
            audit_forms: true,
            audit_cookies: true,
            audit_headers: true,
        }
    }
}

impl AuditConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_links(mut self, enabled: bool) -> Self {
        self.audit_links = enabled;
        self
    }

    pub fn with_forms(mut self, enabled: bool) -> Self {
        self.audit_forms = enabled;
        self
    }

    pub fn with_cookies(mut self, enabled: bool) -> Self {
        self.audit_cookies = enabled;
        self
    }

    pub fn with_headers(mut self, enabled: bool) -> Self {
        self.audit_headers = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_audit_everything() {
        let config = AuditConfig::default();
        assert!(config.audit_links);
        assert!(config.audit_forms);
        assert!(config.audit_cookies);
        assert!(config.audit_headers);
    }

    #[test]
    fn test_builder_toggles() {
        let config = AuditConfig::new().with_links(false).with_cookies(false);
        assert!(!config.audit_links);
        assert!(!config.audit_cookies);
        assert!(config.audit_forms);
    }
}
