//! Sitecheck Core - Foundation types, traits, and error handling
//!
//! This crate provides the core abstractions used throughout the Sitecheck
//! engine:
//! - `Page`: the unit of scanned content (links, forms, cookies, headers, body)
//! - `Issue`: a deduplicatable finding with a structural digest
//! - `Check`: the lifecycle trait all page checks implement
//! - `AuditConfig`, `Severity`, `Element`: supporting types
//! - `PlatformValidator`: gate for the platform identifiers checks declare

pub mod check;
pub mod config;
pub mod error;
pub mod issue;
pub mod page;
pub mod platform;
pub mod severity;

// Re-export commonly used types at crate root
pub use check::{AuditContext, Check, CheckInfo, CheckKind, IssueSink};
pub use config::AuditConfig;
pub use error::{Error, Result};
pub use issue::{Issue, IssueBuilder};
pub use page::{Cookie, Element, Form, FormInput, Header, Link, Page};
pub use platform::{KnownPlatforms, PlatformValidator, PLATFORM_IDS};
pub use severity::Severity;
