pub mod config;
pub mod constants;
pub mod core_cli;
pub mod core_fs;
pub mod core_ftp;
pub mod core_log;
pub mod core_task;
pub mod helpers;
pub mod uploader;

pub use config::Config;
