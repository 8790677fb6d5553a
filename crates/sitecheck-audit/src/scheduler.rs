//! Run-order scheduling from declared run-after preferences
//!
//! Preferences are advisory. The scheduler propagates them best-effort: a
//! constrained check becomes eligible as soon as ANY ONE of its preferred
//! names has been scheduled, not all of them, and propagation stops after a
//! bounded number of passes. This is deliberately weaker than a topological
//! sort; a fallback union guarantees every check still appears exactly once.

use sitecheck_checks::RegisteredCheck;
use std::collections::HashSet;
use std::sync::Arc;

/// Linearize `checks` into a run order honoring run-after preferences
/// best-effort.
///
/// Each check appears exactly once (first position wins). When no check
/// declares a preference, or every check does, the natural enumeration
/// order is returned untouched.
pub fn schedule(checks: &[Arc<RegisteredCheck>]) -> Vec<Arc<RegisteredCheck>> {
    let (unconstrained, constrained): (Vec<_>, Vec<_>) = checks
        .iter()
        .cloned()
        .partition(|c| c.info().preferred.is_empty());

    // Nothing to order against
    if unconstrained.is_empty() || constrained.is_empty() {
        return checks.to_vec();
    }

    let mut out: Vec<Arc<RegisteredCheck>> = Vec::with_capacity(checks.len());
    let mut scheduled: HashSet<String> = HashSet::with_capacity(checks.len());
    let mut append = |check: &Arc<RegisteredCheck>, out: &mut Vec<Arc<RegisteredCheck>>| {
        if scheduled.insert(check.name().to_string()) {
            out.push(check.clone());
        }
    };

    let pass_budget = constrained.len();
    let mut ready = unconstrained;
    let mut pending = constrained;

    for _ in 0..pass_budget {
        if ready.is_empty() {
            break;
        }

        let satisfied: HashSet<String> =
            ready.iter().map(|c| c.name().to_string()).collect();
        for check in &ready {
            append(check, &mut out);
        }

        let mut promoted = Vec::new();
        pending.retain(|check| {
            if check.info().preferred.iter().any(|p| satisfied.contains(p)) {
                promoted.push(check.clone());
                false
            } else {
                true
            }
        });

        for check in &promoted {
            append(check, &mut out);
        }
        ready = promoted;
    }

    // Pass budget exhausted (or propagation dried up): union in whatever
    // never resolved so coverage stays total
    for check in &pending {
        append(check, &mut out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecheck_checks::CheckRegistry;
    use sitecheck_core::{AuditContext, Check, CheckInfo, CheckKind, Result, Severity};

    struct StubCheck {
        info: CheckInfo,
    }

    impl Check for StubCheck {
        fn info(&self) -> &CheckInfo {
            &self.info
        }

        fn run(&self, _ctx: &AuditContext<'_>) -> Result<()> {
            Ok(())
        }
    }

    fn registry_with(checks: &[(&str, &[&str])]) -> CheckRegistry {
        let registry = CheckRegistry::default();
        for (name, preferred) in checks {
            let mut info = CheckInfo::new(*name, CheckKind::Passive, Severity::Low);
            for p in *preferred {
                info = info.with_preferred(*p);
            }
            registry.register(Box::new(StubCheck { info })).unwrap();
        }
        registry
    }

    fn names(order: &[Arc<RegisteredCheck>]) -> Vec<String> {
        order.iter().map(|c| c.name().to_string()).collect()
    }

    fn position(order: &[String], name: &str) -> usize {
        order.iter().position(|n| n == name).unwrap()
    }

    #[test]
    fn test_no_preferences_yields_each_check_once() {
        let registry = registry_with(&[("a", &[]), ("b", &[]), ("c", &[])]);
        let order = names(&schedule(&registry.all()));
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_all_constrained_yields_natural_order() {
        let registry = registry_with(&[("a", &["b"]), ("b", &["a"])]);
        let order = names(&schedule(&registry.all()));
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_preference_chain_is_honored() {
        let registry = registry_with(&[("c", &["b"]), ("b", &["a"]), ("a", &[])]);
        let order = names(&schedule(&registry.all()));

        assert_eq!(order.len(), 3);
        assert!(position(&order, "a") < position(&order, "b"));
        assert!(position(&order, "b") < position(&order, "c"));
    }

    #[test]
    fn test_unknown_preferred_name_still_covered() {
        let registry = registry_with(&[("a", &[]), ("ghost_chaser", &["ghost"])]);
        let order = names(&schedule(&registry.all()));

        assert_eq!(order.len(), 2);
        assert!(order.contains(&"ghost_chaser".to_string()));
    }

    #[test]
    fn test_single_satisfied_preference_is_enough() {
        // b prefers both a and z; scheduling a alone must release b
        let registry = registry_with(&[("a", &[]), ("b", &["a", "z"])]);
        let order = names(&schedule(&registry.all()));

        assert_eq!(order.len(), 2);
        assert!(position(&order, "a") < position(&order, "b"));
    }

    #[test]
    fn test_output_has_set_semantics() {
        let registry = registry_with(&[
            ("a", &[]),
            ("b", &[]),
            ("fan_in", &["a", "b"]),
            ("tail", &["fan_in"]),
        ]);
        let order = names(&schedule(&registry.all()));

        assert_eq!(order.len(), 4);
        let mut dedup = order.clone();
        dedup.dedup();
        assert_eq!(order, dedup);
    }
}
