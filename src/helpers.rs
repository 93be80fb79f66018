use crate::config::Config;
use crate::core_cli::Cli;
use crate::core_fs::FileSet;
use log::info;

// Helper function to log configuration options
pub fn log_config(config: &Config) {
    info!("  Host: {}", config.server.host);
    info!(
        "  Port: {}",
        config
            .server
            .port
            .map_or_else(|| "default".to_string(), |port| port.to_string())
    );
    info!("  Username: {}", config.server.username);
    info!("  Remote Directory: {}", config.upload.remote_dir);
    if let Some(base_dir) = &config.upload.base_dir {
        info!("  Base Directory: {}", base_dir);
    }
}

/// Command-line options override the configuration file.
pub fn apply_cli_overrides(config: &mut Config, args: &Cli) -> anyhow::Result<()> {
    if let Some(url) = &args.url {
        config.apply_url(url)?;
    }
    if let Some(remote_dir) = &args.remote_dir {
        config.upload.remote_dir = remote_dir.clone();
    }
    if let Some(base_dir) = &args.base_dir {
        config.upload.base_dir = Some(base_dir.clone());
    }
    Ok(())
}

pub fn build_file_set(config: &Config, files: &[String]) -> FileSet {
    FileSet::new(config.upload.base_dir.clone(), files.iter().cloned())
}
