use crate::config::Config;
use crate::core_fs::{FileSet, LocalFileSystem};
use crate::core_ftp::{FtpSessionFactory, TcpFtpChannelFactory};
use crate::core_task::AbortFlag;
use crate::helpers::log_config;
use anyhow::{Context, Result};
use log::{error, info};
use std::sync::Arc;

/// Logs in with the configured server and uploads `files` below the
/// configured remote directory.
///
/// The session is always ended, also when the upload fails.
pub async fn run(config: Config, files: FileSet, abort: AbortFlag) -> Result<()> {
    info!("Starting upload with config:");
    log_config(&config);

    let factory = FtpSessionFactory::new(
        Arc::new(TcpFtpChannelFactory),
        Arc::new(LocalFileSystem),
    );
    let mut session = factory.create_session();

    let mut uploaded = 0usize;
    let result = async {
        session
            .begin_session(config.connection_data())
            .await
            .with_context(|| format!("Failed to log in to {}", config.server.host))?;

        session
            .upload_files(
                Some(&abort),
                &files,
                &config.upload.remote_dir,
                Some(&mut |dir: &str| info!("Creating remote directory {}", dir)),
                Some(&mut |local: &str, remote: &str| {
                    uploaded += 1;
                    info!("Uploading {} -> {}", local, remote);
                }),
            )
            .await
            .context("Upload failed")
    }
    .await;

    factory.destroy(session).await;

    match &result {
        Ok(()) => info!("{} of {} file(s) uploaded", uploaded, files.files().len()),
        Err(e) => error!("{:#}", e),
    }
    result
}
