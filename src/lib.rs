//! mindvault - Personal mood journal
//!
//! A local journaling application: dated entries tagged with a mood, an
//! optional image, full-text search over past entries and aggregate mood
//! statistics. Everything is persisted to a key-value slot inside a vault
//! directory.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::VaultError;
