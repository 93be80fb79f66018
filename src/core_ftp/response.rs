use crate::constants::{MULTILINE_RESPONSE_REGEX, SINGLELINE_RESPONSE_REGEX};
use crate::core_ftp::error::FtpError;
use crate::core_ftp::return_code::FtpReturnCode;
use regex::Regex;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::OnceLock;

fn singleline_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(SINGLELINE_RESPONSE_REGEX).expect("valid reply regex"))
}

fn multiline_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(MULTILINE_RESPONSE_REGEX).expect("valid reply regex"))
}

/// `NNN text`: a final reply line.
pub fn is_singleline_response(line: &str) -> bool {
    singleline_regex().is_match(line)
}

/// `NNN-text`: opens a multi-line reply.
pub fn is_multiline_response(line: &str) -> bool {
    multiline_regex().is_match(line)
}

/// A single reply from the server: the numeric code and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpServerResponse {
    return_code: u16,
    message: String,
}

impl FtpServerResponse {
    pub fn new(return_code: u16, message: impl Into<String>) -> Self {
        Self {
            return_code,
            message: message.into(),
        }
    }

    pub fn from_code(return_code: FtpReturnCode, message: impl Into<String>) -> Self {
        Self::new(return_code.code(), message)
    }

    /// Parses a raw reply line such as `200 Command okay.` or `220-Welcome`.
    pub fn parse(line: &str) -> Result<Self, FtpError> {
        let return_code = Self::parse_response_code(line)?;
        // the code is ASCII, so byte 3 starts the separator character
        let mut rest = line[3..].chars();
        rest.next();
        let message = rest.as_str();

        Ok(Self {
            return_code,
            message: message.trim().to_string(),
        })
    }

    pub fn parse_response_code(line: &str) -> Result<u16, FtpError> {
        let bytes = line.as_bytes();
        if bytes.len() < 4 || !bytes[..3].iter().all(u8::is_ascii_digit) {
            return Err(FtpError::Protocol(format!(
                "Malformed response line: '{}'",
                line
            )));
        }

        Ok(bytes[..3]
            .iter()
            .fold(0u16, |code, digit| code * 10 + (digit - b'0') as u16))
    }

    pub fn return_code(&self) -> u16 {
        self.return_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is(&self, code: FtpReturnCode) -> bool {
        self.return_code == code.code()
    }

    /// Extracts the data channel endpoint from a `227` reply, e.g.
    /// `Entering Passive Mode (10,20,30,40,1,2)` gives `10.20.30.40:258`.
    pub fn passive_address(&self) -> Result<SocketAddrV4, FtpError> {
        let unexpected =
            || FtpError::Protocol(format!("Unexpected response message: '{}'", self.message));

        let start = self.message.find('(').ok_or_else(unexpected)? + 1;
        let end = self.message[start..].find(')').ok_or_else(unexpected)? + start;

        let fields = self.message[start..end]
            .split(',')
            .map(|field| field.trim().parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()
            .map_err(|_| unexpected())?;
        if fields.len() < 6 {
            return Err(unexpected());
        }

        let address = Ipv4Addr::new(fields[0], fields[1], fields[2], fields[3]);
        let port = (fields[4] as u16) * 256 + fields[5] as u16;
        Ok(SocketAddrV4::new(address, port))
    }
}

impl fmt::Display for FtpServerResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.return_code, self.message)
    }
}
