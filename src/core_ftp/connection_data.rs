use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct FtpCredentials {
    pub user_name: String,
    pub password: String,
}

impl FtpCredentials {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            password: password.into(),
        }
    }
}

// Keeps passwords out of logs.
impl fmt::Debug for FtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FtpCredentials")
            .field("user_name", &self.user_name)
            .field("password", &"****")
            .finish()
    }
}

/// Where and as whom to log in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpConnectionData {
    pub credentials: FtpCredentials,
    pub host: String,
    /// Defaults to 21.
    pub port: Option<u16>,
}

impl FtpConnectionData {
    pub fn new(credentials: FtpCredentials, host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            credentials,
            host: host.into(),
            port,
        }
    }
}
