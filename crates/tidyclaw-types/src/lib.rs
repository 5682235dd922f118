//! Shared types for tidyclaw.

pub mod checker;
pub mod error;

pub use checker::{FsPathChecker, PathChecker};
pub use error::TidyError;
