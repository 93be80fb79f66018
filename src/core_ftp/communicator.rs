use crate::core_ftp::channel::FtpChannel;
use crate::core_ftp::error::FtpError;
use crate::core_ftp::response::{is_multiline_response, is_singleline_response, FtpServerResponse};
use async_trait::async_trait;
use log::{debug, trace};
use std::collections::VecDeque;

/// Speaks the control-connection dialogue: sends command lines and reads
/// back one complete reply per command.
///
/// While attached, the communicator holds the control channel; detaching
/// hands it back to the caller.
#[async_trait]
pub trait FtpCommunicator: Send {
    fn attach_to_channel(&mut self, channel: Box<dyn FtpChannel>);

    fn detach_from_channel(&mut self) -> Option<Box<dyn FtpChannel>>;

    async fn read_response(&mut self) -> Result<FtpServerResponse, FtpError>;

    async fn send_command(&mut self, command: &str) -> Result<(), FtpError>;
}

/// Splits the byte stream received on the control channel into reply
/// lines and assembles multi-line replies.
#[derive(Default)]
pub struct FramedFtpCommunicator {
    channel: Option<Box<dyn FtpChannel>>,
    response_lines: VecDeque<String>,
    partial_line: Vec<u8>,
}

/// Position of the first `\r\n` in `data`.
fn find_line_end(data: &[u8]) -> Option<usize> {
    data.windows(2).position(|pair| pair == b"\r\n")
}

impl FramedFtpCommunicator {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset_buffers(&mut self) {
        self.response_lines.clear();
        self.partial_line.clear();
    }

    /// Next reply line, or `None` once the server closed the connection.
    async fn read_response_line(&mut self) -> Result<Option<String>, FtpError> {
        while self.response_lines.is_empty() {
            let channel = self.channel.as_mut().ok_or(FtpError::NotConnected)?;
            let data = channel.receive().await?;

            if data.is_empty() {
                if self.partial_line.is_empty() {
                    return Ok(None);
                }
                let line = std::mem::take(&mut self.partial_line);
                self.response_lines
                    .push_back(String::from_utf8_lossy(&line).into_owned());
                break;
            }

            // Lines are decoded only once complete, so a character split
            // between two receives survives.
            self.partial_line.extend_from_slice(&data);
            while let Some(end) = find_line_end(&self.partial_line) {
                let line: Vec<u8> = self.partial_line.drain(..end + 2).collect();
                self.response_lines
                    .push_back(String::from_utf8_lossy(&line[..end]).into_owned());
            }
        }

        let line = self.response_lines.pop_front();
        if let Some(line) = &line {
            trace!("Response: '{}'", line);
        }
        Ok(line)
    }
}

#[async_trait]
impl FtpCommunicator for FramedFtpCommunicator {
    fn attach_to_channel(&mut self, channel: Box<dyn FtpChannel>) {
        self.reset_buffers();
        self.channel = Some(channel);
    }

    fn detach_from_channel(&mut self) -> Option<Box<dyn FtpChannel>> {
        self.reset_buffers();
        self.channel.take()
    }

    async fn read_response(&mut self) -> Result<FtpServerResponse, FtpError> {
        let response_text = self
            .read_response_line()
            .await?
            .ok_or_else(|| FtpError::Protocol("response text is null".to_string()))?;

        if is_singleline_response(&response_text) {
            let response = FtpServerResponse::parse(&response_text)?;
            debug!("Received response: {}", response);
            return Ok(response);
        }

        if !is_multiline_response(&response_text) {
            return Err(FtpError::Protocol(format!(
                "Unexpected response line: '{}'",
                response_text
            )));
        }

        // The first line's text is what callers get; the closing line only
        // ends the reply.
        let first_line = FtpServerResponse::parse(&response_text)?;

        loop {
            let response_text = self.read_response_line().await?.ok_or_else(|| {
                FtpError::Protocol(format!(
                    "Multi-line response {} was not terminated",
                    first_line.return_code()
                ))
            })?;

            if !is_singleline_response(&response_text) {
                continue;
            }

            let response = FtpServerResponse::parse(&response_text)?;
            if response.return_code() == first_line.return_code() {
                debug!("Received multi-line response: {}", first_line);
                return Ok(first_line);
            }
        }
    }

    async fn send_command(&mut self, command: &str) -> Result<(), FtpError> {
        match command.strip_prefix("PASS ") {
            Some(_) => debug!("Sending 'PASS ****'"),
            None => debug!("Sending '{}'", command),
        }

        let command_bytes = format!("{}\r\n", command).into_bytes();
        let channel = self.channel.as_mut().ok_or(FtpError::NotConnected)?;
        let sent_count = channel.send(&command_bytes).await?;

        if sent_count != command_bytes.len() {
            return Err(FtpError::Communication("Communication error".to_string()));
        }

        Ok(())
    }
}
