//! Audit orchestration - schedules, gates and executes checks per page

use crate::gate;
use crate::results::IssueRegistry;
use crate::scheduler::schedule;
use serde::Serialize;
use sitecheck_checks::{CheckRegistry, RegisteredCheck};
use sitecheck_core::{AuditConfig, AuditContext, Page, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Summary of one page audit
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditSummary {
    /// Checks considered
    pub total: usize,
    /// Checks that ran their lifecycle to completion
    pub executed: usize,
    /// Checks the gate filtered out
    pub skipped: usize,
    /// Checks that failed mid-lifecycle (suppressed, see below)
    pub failed: usize,
    /// Issues logged during this run, pre-deduplication
    pub issues_logged: usize,
}

/// Runs scheduled, gated checks against pages and routes their findings
/// into a shared issue registry.
pub struct Auditor {
    checks: Arc<CheckRegistry>,
    issues: Arc<IssueRegistry>,
    config: AuditConfig,
}

impl Auditor {
    pub fn new(checks: Arc<CheckRegistry>, issues: Arc<IssueRegistry>, config: AuditConfig) -> Self {
        Self {
            checks,
            issues,
            config,
        }
    }

    /// The check registry backing this session
    pub fn checks(&self) -> &Arc<CheckRegistry> {
        &self.checks
    }

    /// The issue registry backing this session
    pub fn issues(&self) -> &Arc<IssueRegistry> {
        &self.issues
    }

    /// Compute the run order for the currently loaded checks
    pub fn schedule(&self) -> Vec<Arc<RegisteredCheck>> {
        schedule(&self.checks.all())
    }

    /// Audit one page with every applicable loaded check.
    ///
    /// A failing check is logged and counted, never propagated: one broken
    /// check must not keep the rest from running against the page.
    pub fn run(&self, page: &Page) -> AuditSummary {
        let order = self.schedule();
        info!(url = %page.url, checks = order.len(), "auditing page");

        let mut summary = AuditSummary {
            total: order.len(),
            ..Default::default()
        };

        for entry in &order {
            if !gate::applies(entry, page, &self.config) {
                debug!(check = entry.name(), "skipped by gate");
                summary.skipped += 1;
                continue;
            }

            match self.run_one(entry, page) {
                Ok(logged) => {
                    summary.executed += 1;
                    summary.issues_logged += logged;
                }
                Err(e) => {
                    warn!(check = entry.name(), error = %e, "check failed; continuing");
                    summary.failed += 1;
                }
            }
        }

        info!(
            executed = summary.executed,
            skipped = summary.skipped,
            failed = summary.failed,
            issues = summary.issues_logged,
            "audit complete"
        );
        summary
    }

    /// Drive one check's lifecycle against one page.
    ///
    /// Returns early (a no-op) when the gate says the check does not apply.
    /// Otherwise `prepare`, `run` and `clean_up` execute in order, at most
    /// once; the first failure aborts the remaining steps. Issues logged
    /// before a failure still count toward the check's issue limit.
    pub fn run_one(&self, entry: &RegisteredCheck, page: &Page) -> Result<usize> {
        if !gate::applies(entry, page, &self.config) {
            return Ok(0);
        }

        debug!(check = entry.name(), "running check");
        let ctx = AuditContext::new(page, &self.config, entry.info(), self.issues.as_ref());

        let outcome = entry
            .check()
            .prepare(&ctx)
            .and_then(|_| entry.check().run(&ctx))
            .and_then(|_| entry.check().clean_up(&ctx));

        let logged = ctx.issues_logged();
        if logged > 0 {
            entry.note_issues(logged);
        }

        outcome.map(|_| logged)
    }

    /// Start a fresh scan session: clear stored issues, the dedup set and
    /// all hooks, and unregister every loaded check.
    ///
    /// Not safe to call while audits are in flight; coordinate externally.
    pub fn reset(&self) {
        self.issues.clear();
        self.checks.clear();
    }
}
