//! Check trait and descriptor data - the interface all page checks implement

use crate::config::AuditConfig;
use crate::error::Result;
use crate::issue::Issue;
use crate::page::{Element, Page};
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Classification of a check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    /// Inspects content without probing; issues are deduplicated only
    /// within a single submission batch
    #[default]
    Passive,
    /// Attack-type check; its issues are deduplicated by digest across
    /// the whole scan
    Active,
}

/// Descriptor data for a check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInfo {
    /// Unique check name (e.g. "security_headers")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// Check version
    pub version: String,

    /// Passive or active
    pub kind: CheckKind,

    /// Default severity of issues from this check
    pub severity: Severity,

    /// Content kinds this check targets; empty = applies unconditionally
    #[serde(default)]
    pub elements: Vec<Element>,

    /// Platform identifiers this check is restricted to; empty = unrestricted
    #[serde(default)]
    pub platforms: Vec<String>,

    /// Names of checks this one prefers to run after. Advisory only; the
    /// scheduler honors them best-effort.
    #[serde(default)]
    pub preferred: Vec<String>,

    /// Stop gating this check in once it has logged this many issues
    pub max_issues: Option<usize>,

    /// Reference URLs
    #[serde(default)]
    pub references: Vec<String>,
}

impl CheckInfo {
    /// Create new check info
    pub fn new(name: impl Into<String>, kind: CheckKind, severity: Severity) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: String::from("1.0.0"),
            kind,
            severity,
            elements: Vec::new(),
            platforms: Vec::new(),
            preferred: Vec::new(),
            max_issues: None,
            references: Vec::new(),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platforms.push(platform.into());
        self
    }

    pub fn with_preferred(mut self, check: impl Into<String>) -> Self {
        self.preferred.push(check.into());
        self
    }

    pub fn with_max_issues(mut self, limit: usize) -> Self {
        self.max_issues = Some(limit);
        self
    }

    pub fn with_reference(mut self, url: impl Into<String>) -> Self {
        self.references.push(url.into());
        self
    }
}

/// Destination for issues logged during a check run. Implemented by the
/// audit engine's issue registry.
pub trait IssueSink: Send + Sync {
    /// Submit a batch of issues. Returns the original input, never the
    /// deduplicated subset.
    fn register(&self, issues: Vec<Issue>) -> Vec<Issue>;
}

/// Context passed to a check for one page audit
pub struct AuditContext<'a> {
    /// The page under audit
    pub page: &'a Page,
    /// Audit scope configuration
    pub config: &'a AuditConfig,
    info: &'a CheckInfo,
    sink: &'a dyn IssueSink,
    logged: Cell<usize>,
}

impl<'a> AuditContext<'a> {
    pub fn new(
        page: &'a Page,
        config: &'a AuditConfig,
        info: &'a CheckInfo,
        sink: &'a dyn IssueSink,
    ) -> Self {
        Self {
            page,
            config,
            info,
            sink,
            logged: Cell::new(0),
        }
    }

    /// Info of the check this context was built for
    pub fn info(&self) -> &CheckInfo {
        self.info
    }

    /// Submit an issue. Stamps the owning check's name, the active
    /// classification derived from the check kind and the page URL (when
    /// the check left it empty) before forwarding to the registry.
    pub fn log_issue(&self, mut issue: Issue) {
        issue.check = self.info.name.clone();
        issue.active = self.info.kind == CheckKind::Active;
        if issue.url.is_empty() {
            issue.url = self.page.url.clone();
        }
        issue.digest = crate::issue::fingerprint(&issue);

        self.logged.set(self.logged.get() + 1);
        self.sink.register(vec![issue]);
    }

    /// Number of issues logged through this context so far
    pub fn issues_logged(&self) -> usize {
        self.logged.get()
    }
}

/// The trait all page checks implement.
///
/// The audit engine drives the fixed lifecycle `prepare -> run -> clean_up`
/// at most once per (check, page) pair. A failure in any step aborts the
/// remaining steps for that check only.
pub trait Check: Send + Sync {
    /// Descriptor data for this check
    fn info(&self) -> &CheckInfo;

    /// Set up state before the run step
    fn prepare(&self, _ctx: &AuditContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Inspect the page and log issues through the context
    fn run(&self, ctx: &AuditContext<'_>) -> Result<()>;

    /// Release state after the run step
    fn clean_up(&self, _ctx: &AuditContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Unique check name
    fn name(&self) -> &str {
        &self.info().name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct VecSink(Mutex<Vec<Issue>>);

    impl IssueSink for VecSink {
        fn register(&self, issues: Vec<Issue>) -> Vec<Issue> {
            self.0.lock().unwrap().extend(issues.iter().cloned());
            issues
        }
    }

    #[test]
    fn test_log_issue_stamps_check_and_classification() {
        let page = Page::new("https://example.com/");
        let config = AuditConfig::default();
        let info = CheckInfo::new("probe", CheckKind::Active, Severity::High);
        let sink = VecSink(Mutex::new(Vec::new()));
        let ctx = AuditContext::new(&page, &config, &info, &sink);

        ctx.log_issue(Issue::builder("Echoed parameter", Element::Link).build());

        let logged = sink.0.lock().unwrap();
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].check, "probe");
        assert!(logged[0].active);
        assert_eq!(logged[0].url, "https://example.com/");
        assert_eq!(ctx.issues_logged(), 1);
    }

    #[test]
    fn test_stamping_reaches_the_digest() {
        let page = Page::new("https://example.com/");
        let config = AuditConfig::default();
        let sink = VecSink(Mutex::new(Vec::new()));

        let info_a = CheckInfo::new("check_a", CheckKind::Passive, Severity::Low);
        let info_b = CheckInfo::new("check_b", CheckKind::Passive, Severity::Low);
        let ctx_a = AuditContext::new(&page, &config, &info_a, &sink);
        let ctx_b = AuditContext::new(&page, &config, &info_b, &sink);

        ctx_a.log_issue(Issue::builder("Same title", Element::Body).build());
        ctx_b.log_issue(Issue::builder("Same title", Element::Body).build());

        let logged = sink.0.lock().unwrap();
        assert_ne!(logged[0].digest, logged[1].digest);
    }
}
