use anyhow::Result;
use clap::Parser;
use libroftp::constants::DEFAULT_CONFIG_PATH;
use libroftp::core_cli::Cli;
use libroftp::core_log::init_logger;
use libroftp::core_task::{start_abort_watcher, AbortFlag};
use libroftp::helpers::{apply_cli_overrides, build_file_set};
use libroftp::{uploader, Config};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    init_logger(args.verbose);

    // An explicit config file must exist; the default one is optional.
    let mut config = if !args.config.is_empty() {
        Config::load_from_file(&args.config)?
    } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
        Config::load_from_file(DEFAULT_CONFIG_PATH)?
    } else {
        Config::default()
    };
    apply_cli_overrides(&mut config, &args)?;

    let files = build_file_set(&config, &args.files);

    let abort = AbortFlag::new();
    start_abort_watcher(abort.clone());

    uploader::run(config, files, abort).await?;

    Ok(())
}
