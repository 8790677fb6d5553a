//! Sitecheck Audit - the audit engine core
//!
//! This crate ties the page-audit machinery together:
//! - `scheduler`: best-effort run ordering from run-after preferences
//! - `gate`: per-check, per-page applicability decisions
//! - `results`: the deduplicating, hook-driving issue registry
//! - `auditor`: the composition root that schedules, gates and executes
//!   checks with per-check fault isolation
//!
//! Scheduling and gating are pure and lock-free; the issue registry is the
//! single shared mutable resource and serializes everything behind one
//! mutex.

pub mod auditor;
pub mod gate;
pub mod results;
pub mod scheduler;

pub use auditor::{AuditSummary, Auditor};
pub use gate::applies;
pub use results::{IssueHook, IssueRegistry};
pub use scheduler::schedule;
