//! Check registry - name-keyed index of registered checks
//!
//! Checks are registered explicitly at start-up. Platform identifiers are
//! validated on the way in, and re-validated on lookup so a descriptor whose
//! platforms no longer validate is purged on first access.

use sitecheck_core::{Check, CheckInfo, Error, PlatformValidator, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// A check admitted to the registry, together with its mutable audit state
pub struct RegisteredCheck {
    check: Box<dyn Check>,
    issue_limit_reached: AtomicBool,
    issues_logged: AtomicUsize,
}

impl RegisteredCheck {
    fn new(check: Box<dyn Check>) -> Self {
        Self {
            check,
            issue_limit_reached: AtomicBool::new(false),
            issues_logged: AtomicUsize::new(0),
        }
    }

    /// The check implementation
    pub fn check(&self) -> &dyn Check {
        self.check.as_ref()
    }

    /// Descriptor data
    pub fn info(&self) -> &CheckInfo {
        self.check.info()
    }

    /// Unique check name
    pub fn name(&self) -> &str {
        self.check.name()
    }

    /// True once the check has hit its issue limit; the gate then skips it
    pub fn issue_limit_reached(&self) -> bool {
        self.issue_limit_reached.load(Ordering::Relaxed)
    }

    /// Total issues this check has logged across the scan
    pub fn issues_logged(&self) -> usize {
        self.issues_logged.load(Ordering::Relaxed)
    }

    /// Record `count` freshly logged issues and trip the limit flag when
    /// `max_issues` is reached
    pub fn note_issues(&self, count: usize) {
        let total = self.issues_logged.fetch_add(count, Ordering::Relaxed) + count;
        if let Some(limit) = self.info().max_issues {
            if total >= limit && !self.issue_limit_reached.swap(true, Ordering::Relaxed) {
                debug!(check = self.name(), total, limit, "issue limit reached");
            }
        }
    }
}

impl std::fmt::Debug for RegisteredCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredCheck")
            .field("name", &self.name())
            .field("issue_limit_reached", &self.issue_limit_reached())
            .field("issues_logged", &self.issues_logged())
            .finish()
    }
}

/// Registry of all loaded checks
pub struct CheckRegistry {
    validator: Box<dyn PlatformValidator>,
    entries: RwLock<Entries>,
}

#[derive(Default)]
struct Entries {
    by_name: HashMap<String, Arc<RegisteredCheck>>,
    // registration order, so enumeration is deterministic
    order: Vec<String>,
}

impl CheckRegistry {
    /// Create an empty registry using the given platform validator
    pub fn new(validator: Box<dyn PlatformValidator>) -> Self {
        Self {
            validator,
            entries: RwLock::new(Entries::default()),
        }
    }

    /// Register a check.
    ///
    /// Refuses descriptors whose declared platforms fail validation; the
    /// check is not admitted.
    pub fn register(&self, check: Box<dyn Check>) -> Result<()> {
        let info = check.info().clone();

        if !self.validator.valid(&info.platforms) {
            warn!(check = %info.name, platforms = ?info.platforms, "refusing check with unknown platforms");
            return Err(Error::InvalidPlatforms {
                check: info.name,
                platforms: info.platforms,
            });
        }

        let mut entries = self.entries.write().unwrap();
        if entries.by_name.contains_key(&info.name) {
            return Err(Error::DuplicateCheck { check: info.name });
        }

        debug!(check = %info.name, "registered check");
        entries
            .by_name
            .insert(info.name.clone(), Arc::new(RegisteredCheck::new(check)));
        entries.order.push(info.name);
        Ok(())
    }

    /// Look up a check by name.
    ///
    /// Re-validates the descriptor's platforms on access; a descriptor that
    /// no longer validates is evicted as a side effect and
    /// `Error::InvalidPlatforms` is surfaced, so a bad entry is purged on
    /// first access and will not be returned again.
    pub fn lookup(&self, name: &str) -> Result<Arc<RegisteredCheck>> {
        let entry = {
            let entries = self.entries.read().unwrap();
            entries.by_name.get(name).cloned()
        };

        let entry = entry.ok_or_else(|| Error::CheckNotFound {
            check: name.to_string(),
        })?;

        let info = entry.info();
        if !self.validator.valid(&info.platforms) {
            warn!(check = name, "evicting check with invalid platforms");
            self.evict(name);
            return Err(Error::InvalidPlatforms {
                check: info.name.clone(),
                platforms: info.platforms.clone(),
            });
        }

        Ok(entry)
    }

    /// Remove a check from the registry
    pub fn evict(&self, name: &str) -> Option<Arc<RegisteredCheck>> {
        let mut entries = self.entries.write().unwrap();
        let removed = entries.by_name.remove(name);
        if removed.is_some() {
            entries.order.retain(|n| n != name);
        }
        removed
    }

    /// All registered checks, in registration order
    pub fn all(&self) -> Vec<Arc<RegisteredCheck>> {
        let entries = self.entries.read().unwrap();
        entries
            .order
            .iter()
            .filter_map(|name| entries.by_name.get(name).cloned())
            .collect()
    }

    /// Number of registered checks
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().by_name.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unregister every check
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap();
        entries.by_name.clear();
        entries.order.clear();
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new(Box::new(sitecheck_core::KnownPlatforms::new()))
    }
}
