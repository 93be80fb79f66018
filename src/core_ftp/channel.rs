use crate::constants::{DEFAULT_FTP_PORT, RECEIVE_BUFFER_SIZE};
use async_trait::async_trait;
use log::{debug, warn};
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{lookup_host, TcpStream};

/// A bidirectional byte stream to the FTP server, used both for the
/// control connection and for short-lived data connections.
#[async_trait]
pub trait FtpChannel: Send {
    /// Resolves `host` and connects to its first IPv4 address.
    async fn connect(&mut self, host: &str, port: Option<u16>) -> io::Result<()>;

    async fn connect_to_address(&mut self, address: Ipv4Addr, port: u16) -> io::Result<()>;

    async fn disconnect(&mut self);

    /// Returns whatever the peer sent next. An empty buffer means the
    /// peer closed the connection.
    async fn receive(&mut self) -> io::Result<Vec<u8>>;

    /// Returns the number of bytes actually sent.
    async fn send(&mut self, data: &[u8]) -> io::Result<usize>;
}

/// Creates and releases channels for the session.
pub trait FtpChannelFactory: Send + Sync {
    fn create_channel(&self) -> Box<dyn FtpChannel>;

    fn destroy(&self, channel: Box<dyn FtpChannel>);
}

#[derive(Debug, Default)]
pub struct TcpFtpChannel {
    stream: Option<TcpStream>,
}

impl TcpFtpChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn stream(&mut self) -> io::Result<&mut TcpStream> {
        self.stream.as_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotConnected, "FTP channel is not connected")
        })
    }
}

#[async_trait]
impl FtpChannel for TcpFtpChannel {
    async fn connect(&mut self, host: &str, port: Option<u16>) -> io::Result<()> {
        let port = port.unwrap_or(DEFAULT_FTP_PORT);
        let address = lookup_host((host, port))
            .await?
            .find_map(|addr| match addr.ip() {
                IpAddr::V4(ip) => Some(ip),
                IpAddr::V6(_) => None,
            })
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("No host addresses found for '{}'.", host),
                )
            })?;

        self.connect_to_address(address, port).await
    }

    async fn connect_to_address(&mut self, address: Ipv4Addr, port: u16) -> io::Result<()> {
        let endpoint = SocketAddr::new(IpAddr::V4(address), port);
        debug!("Connecting FTP channel to {}", endpoint);
        self.stream = Some(TcpStream::connect(endpoint).await?);
        Ok(())
    }

    async fn disconnect(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            if let Err(e) = stream.shutdown().await {
                warn!("Error shutting down FTP channel: {}", e);
            }
        }
    }

    async fn receive(&mut self) -> io::Result<Vec<u8>> {
        let stream = self.stream()?;
        let mut buffer = [0u8; RECEIVE_BUFFER_SIZE];

        // One read per call: the communicator reassembles lines split
        // across chunks, and a second read could wait on an idle server.
        let bytes_read = stream.read(&mut buffer).await?;
        Ok(buffer[..bytes_read].to_vec())
    }

    async fn send(&mut self, data: &[u8]) -> io::Result<usize> {
        let stream = self.stream()?;
        let mut sent = 0;

        while sent < data.len() {
            match stream.write(&data[sent..]).await? {
                0 => break,
                n => sent += n,
            }
        }
        stream.flush().await?;

        Ok(sent)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TcpFtpChannelFactory;

impl FtpChannelFactory for TcpFtpChannelFactory {
    fn create_channel(&self) -> Box<dyn FtpChannel> {
        Box::new(TcpFtpChannel::new())
    }

    fn destroy(&self, channel: Box<dyn FtpChannel>) {
        drop(channel);
    }
}
