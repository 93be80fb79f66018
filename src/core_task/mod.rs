use log::{error, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lets a long-running batch find out whether it should stop early.
pub trait ExecutionContext: Send + Sync {
    fn should_abort(&self) -> bool;
}

/// A shared abort switch. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct AbortFlag {
    aborted: Arc<AtomicBool>,
}

impl AbortFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.aborted.store(true, Ordering::SeqCst);
    }
}

impl ExecutionContext for AbortFlag {
    fn should_abort(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }
}

/// Raises `flag` on Ctrl-C. The current file still finishes uploading.
pub fn start_abort_watcher(flag: AbortFlag) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("Interrupt received, stopping after the current file");
                flag.abort();
            }
            Err(e) => error!("Failed to listen for Ctrl-C: {}", e),
        }
    });
}
