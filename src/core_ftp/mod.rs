// FTP client: channels, reply framing and the session state machine
pub mod channel;
pub mod communicator;
pub mod connection_data;
pub mod error;
pub mod response;
pub mod return_code;
pub mod session;


pub use channel::{FtpChannel, FtpChannelFactory, TcpFtpChannel, TcpFtpChannelFactory};
pub use communicator::{FramedFtpCommunicator, FtpCommunicator};
pub use connection_data::{FtpConnectionData, FtpCredentials};
pub use error::FtpError;
pub use response::FtpServerResponse;
pub use return_code::FtpReturnCode;
pub use session::{FtpSession, FtpSessionFactory};
