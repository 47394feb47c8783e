//! # TagVault Common Library
//!
//! Shared code for the TagVault audio library service:
//! - Database initialization and row models
//! - Error types
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
