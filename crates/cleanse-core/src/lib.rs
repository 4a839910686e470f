//! Core redaction logic for cleanse
//!
//! This crate contains:
//! - The banner written over sensitive files
//! - The redactor (line overlay and file rewrite)
//! - The batch runner with its missing-file policy

pub mod banner;
pub mod error;
pub mod redactor;
pub mod runner;

pub use banner::{Banner, DEFAULT_PLACEHOLDER};
pub use error::{Error, Result};
pub use redactor::{Outcome, Redactor, count_lines};
pub use runner::{MissingPolicy, RunReport, Runner};
