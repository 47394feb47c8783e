//! HTTP API handlers for tagvault-server

pub mod audio_files;
pub mod health;
pub mod identity;

pub use audio_files::audio_file_routes;
pub use health::health_routes;
pub use identity::Identity;
