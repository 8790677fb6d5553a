//! Sitecheck Checks - check registry and built-in page checks
//!
//! This crate provides:
//! - `CheckRegistry`: explicit, platform-validated registration of checks
//! - `builtin`: the checks that ship with the engine

pub mod builtin;
pub mod registry;

pub use registry::{CheckRegistry, RegisteredCheck};
