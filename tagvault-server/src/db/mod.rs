//! Database access for tagvault-server

pub mod audio_files;
pub mod users;
