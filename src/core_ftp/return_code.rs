/// Reply codes the client acts upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum FtpReturnCode {
    DataConnectionAlreadyOpen = 125,
    FileStatusOk = 150,
    CommandOk = 200,
    ServiceReadyForNewUser = 220,
    ClosingDataConnection = 226,
    EnteringPassiveMode = 227,
    UserLoggedIn = 230,
    RequestedFileActionOkayCompleted = 250,
    Created = 257,
    UserNameOkNeedPassword = 331,
    FileUnavailable = 550,
}

impl FtpReturnCode {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<FtpReturnCode> {
        match code {
            125 => Some(FtpReturnCode::DataConnectionAlreadyOpen),
            150 => Some(FtpReturnCode::FileStatusOk),
            200 => Some(FtpReturnCode::CommandOk),
            220 => Some(FtpReturnCode::ServiceReadyForNewUser),
            226 => Some(FtpReturnCode::ClosingDataConnection),
            227 => Some(FtpReturnCode::EnteringPassiveMode),
            230 => Some(FtpReturnCode::UserLoggedIn),
            250 => Some(FtpReturnCode::RequestedFileActionOkayCompleted),
            257 => Some(FtpReturnCode::Created),
            331 => Some(FtpReturnCode::UserNameOkNeedPassword),
            550 => Some(FtpReturnCode::FileUnavailable),
            _ => None,
        }
    }
}
