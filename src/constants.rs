// src/constants.rs

pub const DEFAULT_FTP_PORT: u16 = 21;
pub const RECEIVE_BUFFER_SIZE: usize = 1000;

pub const SINGLELINE_RESPONSE_REGEX: &str = r"^[0-9]{3} ";
pub const MULTILINE_RESPONSE_REGEX: &str = r"^[0-9]{3}-";

pub const DEFAULT_CONFIG_PATH: &str = "/etc/libroftp.conf";
