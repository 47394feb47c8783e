//! Shared database access for TagVault

pub mod init;
pub mod models;

pub use init::init_database;
pub use models::{AudioFileRecord, AudioFormat, MetadataPatch, User};
