//! Issue definitions - findings produced by checks during an audit

use crate::page::Element;
use crate::severity::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// A finding produced by a check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Unique record id for this occurrence
    pub record_id: Uuid,

    /// Structural fingerprint used for deduplication. Derived from the
    /// check, element, url, title and proof - never from the record id
    /// or timestamp, so identical findings share a digest.
    pub digest: u64,

    /// Produced by an active (attack-type) check. Active issues are
    /// deduplicated by digest across the whole scan; passive issues only
    /// within a single submission batch.
    pub active: bool,

    /// Name of the check that produced this issue
    pub check: String,

    /// Issue details
    pub title: String,
    pub description: String,
    pub severity: Severity,

    /// Content kind the issue was found in
    pub element: Element,

    /// URL the issue was found at
    pub url: String,

    /// Evidence supporting the finding
    pub proof: String,

    /// Suggested fix
    pub remediation: Option<String>,

    /// Reference URLs
    #[serde(default)]
    pub references: Vec<String>,

    /// When the issue was detected
    pub detected_at: DateTime<Utc>,
}

impl Issue {
    /// Create a new issue builder
    pub fn builder(title: impl Into<String>, element: Element) -> IssueBuilder {
        IssueBuilder::new(title, element)
    }
}

/// Builder for constructing issues
pub struct IssueBuilder {
    issue: Issue,
}

impl IssueBuilder {
    pub fn new(title: impl Into<String>, element: Element) -> Self {
        Self {
            issue: Issue {
                record_id: Uuid::new_v4(),
                digest: 0,
                active: false,
                check: String::new(),
                title: title.into(),
                description: String::new(),
                severity: Severity::Info,
                element,
                url: String::new(),
                proof: String::new(),
                remediation: None,
                references: Vec::new(),
                detected_at: Utc::now(),
            },
        }
    }

    pub fn check(mut self, check: impl Into<String>) -> Self {
        self.issue.check = check.into();
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.issue.description = desc.into();
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.issue.severity = severity;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.issue.url = url.into();
        self
    }

    pub fn proof(mut self, proof: impl Into<String>) -> Self {
        self.issue.proof = proof.into();
        self
    }

    pub fn remediation(mut self, remediation: impl Into<String>) -> Self {
        self.issue.remediation = Some(remediation.into());
        self
    }

    pub fn reference(mut self, url: impl Into<String>) -> Self {
        self.issue.references.push(url.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.issue.active = active;
        self
    }

    pub fn build(mut self) -> Issue {
        self.issue.digest = fingerprint(&self.issue);
        self.issue
    }
}

/// Compute the structural fingerprint of an issue
pub(crate) fn fingerprint(issue: &Issue) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(issue.check.as_bytes());
    hasher.update([0]);
    hasher.update(issue.element.as_str().as_bytes());
    hasher.update([0]);
    hasher.update(issue.url.as_bytes());
    hasher.update([0]);
    hasher.update(issue.title.as_bytes());
    hasher.update([0]);
    hasher.update(issue.proof.as_bytes());

    let hash = hasher.finalize();
    u64::from_be_bytes(hash[..8].try_into().unwrap())
}
