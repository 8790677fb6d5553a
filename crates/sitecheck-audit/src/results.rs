//! Issue registry - deduplicating, hook-driving result store
//!
//! One registry instance is shared by every check running in a scan
//! session. A single mutex serializes hook invocation, dedup-set mutation,
//! stored-issue mutation and store-mode toggling, so hooks always observe a
//! consistent, ordered view of registrations.
//!
//! Hooks execute while the lock is held. A hook that re-enters the registry
//! will deadlock; keep hooks fast and self-contained.

use sitecheck_core::{Issue, IssueSink};
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::debug;

/// Callback handle invoked with a batch of issues
pub type IssueHook = Box<dyn Fn(&[Issue]) + Send>;

/// Thread-safe, deduplicating store of issues found during a scan session
pub struct IssueRegistry {
    inner: Mutex<Inner>,
}

struct Inner {
    /// Stored findings, append-only while store mode is on
    stored: Vec<Issue>,
    /// Digests of every ACTIVE issue ever accepted. Passive issues are
    /// never filtered through this set.
    seen_active: HashSet<u64>,
    store_enabled: bool,
    /// Invoked with every submission, pre-deduplication
    raw_hooks: Vec<IssueHook>,
    /// Invoked with the unique subset of a submission
    dedup_hooks: Vec<IssueHook>,
}

impl Inner {
    fn fresh() -> Self {
        Self {
            stored: Vec::new(),
            seen_active: HashSet::new(),
            store_enabled: true,
            raw_hooks: Vec::new(),
            dedup_hooks: Vec::new(),
        }
    }
}

impl IssueRegistry {
    /// Create an empty registry with store mode enabled
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::fresh()),
        }
    }

    /// Submit a batch of issues.
    ///
    /// Always returns the caller's original batch, never the deduplicated
    /// subset - the unique subset is observable only through dedup hooks
    /// and the store. This keeps the call chainable regardless of how much
    /// of the batch was new.
    ///
    /// Raw hooks fire with the full input even when the batch is empty or
    /// nothing in it survives deduplication; dedup hooks fire only when
    /// something did.
    pub fn register(&self, issues: Vec<Issue>) -> Vec<Issue> {
        let mut inner = self.inner.lock().unwrap();

        for hook in &inner.raw_hooks {
            hook(&issues);
        }

        // Collapse exact structural duplicates within this batch (first
        // occurrence wins), then drop active issues already seen in
        // earlier submissions. Passive issues are never dropped by the
        // cross-call set.
        let mut in_batch: HashSet<u64> = HashSet::with_capacity(issues.len());
        let unique: Vec<Issue> = issues
            .iter()
            .filter(|issue| {
                in_batch.insert(issue.digest)
                    && !(issue.active && inner.seen_active.contains(&issue.digest))
            })
            .cloned()
            .collect();

        if unique.is_empty() {
            return issues;
        }

        // Active digests are recorded before dedup hooks run, so a hook
        // resubmitting elsewhere cannot race the same finding back in
        for issue in unique.iter().filter(|i| i.active) {
            inner.seen_active.insert(issue.digest);
        }

        for hook in &inner.dedup_hooks {
            hook(&unique);
        }

        if inner.store_enabled {
            debug!(count = unique.len(), "storing issues");
            inner.stored.extend(unique);
        }

        issues
    }

    /// Register a hook invoked with every submission before deduplication
    pub fn on_issue_raw(&self, hook: impl Fn(&[Issue]) + Send + 'static) {
        self.inner.lock().unwrap().raw_hooks.push(Box::new(hook));
    }

    /// Register a hook invoked with the unique subset of each submission
    pub fn on_issue(&self, hook: impl Fn(&[Issue]) + Send + 'static) {
        self.inner.lock().unwrap().dedup_hooks.push(Box::new(hook));
    }

    /// Resume appending accepted issues to the store
    pub fn enable_store(&self) {
        self.inner.lock().unwrap().store_enabled = true;
    }

    /// Stop appending accepted issues to the store. Hooks and the
    /// active-dedup set are unaffected; already-stored issues stay.
    pub fn disable_store(&self) {
        self.inner.lock().unwrap().store_enabled = false;
    }

    pub fn is_storing(&self) -> bool {
        self.inner.lock().unwrap().store_enabled
    }

    /// Snapshot of the stored issues
    pub fn issues(&self) -> Vec<Issue> {
        self.inner.lock().unwrap().stored.clone()
    }

    /// Number of stored issues
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().stored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the cross-call active-issue dedup set
    pub fn seen_active(&self) -> usize {
        self.inner.lock().unwrap().seen_active.len()
    }

    /// Drop stored issues, the active-dedup set and every hook; re-enable
    /// store mode.
    ///
    /// Intended for the start of a fresh scan session. Individual
    /// mutations serialize on the registry lock, but a clear can still
    /// interleave between two in-flight submissions - coordinate
    /// externally so no scan workers are active.
    pub fn clear(&self) {
        *self.inner.lock().unwrap() = Inner::fresh();
    }
}

impl Default for IssueRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueSink for IssueRegistry {
    fn register(&self, issues: Vec<Issue>) -> Vec<Issue> {
        IssueRegistry::register(self, issues)
    }
}
