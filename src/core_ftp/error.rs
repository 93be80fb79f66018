// Error handling for the FTP client layer
use crate::core_ftp::response::FtpServerResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FtpError {
    #[error("FTP protocol error: {0}")]
    Protocol(String),

    #[error("{context}: {response}")]
    Command {
        context: &'static str,
        response: FtpServerResponse,
    },

    #[error("{0}")]
    Communication(String),

    #[error("Not all of file was uploaded ({sent} of {expected} bytes sent)")]
    IncompleteUpload { sent: usize, expected: usize },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Not connected to an FTP channel")]
    NotConnected,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FtpError {
    /// Builds the error for a reply outside the expected success set.
    pub fn command(context: &'static str, response: FtpServerResponse) -> Self {
        FtpError::Command { context, response }
    }

    /// The server return code, for errors caused by a server reply.
    pub fn code(&self) -> Option<u16> {
        match self {
            FtpError::Command { response, .. } => Some(response.return_code()),
            _ => None,
        }
    }
}
