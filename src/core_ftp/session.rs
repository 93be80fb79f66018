use crate::constants::DEFAULT_FTP_PORT;
use crate::core_fs::path::{combine_unix_path, debase_path, file_name, parent_unix_path};
use crate::core_fs::{FileSet, FileSystem};
use crate::core_ftp::channel::{FtpChannel, FtpChannelFactory};
use crate::core_ftp::communicator::{FramedFtpCommunicator, FtpCommunicator};
use crate::core_ftp::connection_data::FtpConnectionData;
use crate::core_ftp::error::FtpError;
use crate::core_ftp::response::FtpServerResponse;
use crate::core_ftp::return_code::FtpReturnCode;
use crate::core_task::ExecutionContext;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;

/// Called with the remote directory about to be created.
pub type DirectoryCallback<'a> = dyn FnMut(&str) + Send + 'a;

/// Called with the local and remote file names before each upload.
pub type FileCallback<'a> = dyn FnMut(&str, &str) + Send + 'a;

/// A client session on one FTP control connection.
///
/// Operations run strictly one after another: every command waits for its
/// reply, and a data channel is only used between the `PASV` negotiation
/// and the final transfer reply. A session must not be shared between
/// tasks.
pub struct FtpSession {
    channel_factory: Arc<dyn FtpChannelFactory>,
    communicator: Box<dyn FtpCommunicator>,
    file_system: Arc<dyn FileSystem>,
    connection_data: Option<FtpConnectionData>,
    current_directory: Option<String>,
    connected: bool,
    disposed: bool,
}

impl FtpSession {
    pub fn new(
        channel_factory: Arc<dyn FtpChannelFactory>,
        communicator: Box<dyn FtpCommunicator>,
        file_system: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            channel_factory,
            communicator,
            file_system,
            connection_data: None,
            current_directory: None,
            connected: false,
            disposed: false,
        }
    }

    /// The directory set by the last successful [`change_directory`](Self::change_directory).
    pub fn current_directory(&self) -> Option<&str> {
        self.current_directory.as_deref()
    }

    pub fn connection_data(&self) -> Option<&FtpConnectionData> {
        self.connection_data.as_ref()
    }

    /// Connects, logs in and switches to binary transfer mode.
    pub async fn begin_session(
        &mut self,
        connection_data: FtpConnectionData,
    ) -> Result<(), FtpError> {
        let port = connection_data.port.unwrap_or(DEFAULT_FTP_PORT);
        info!("Connecting to FTP server {}:{}", connection_data.host, port);

        let mut channel = self.channel_factory.create_channel();
        if let Err(e) = channel.connect(&connection_data.host, Some(port)).await {
            self.channel_factory.destroy(channel);
            return Err(e.into());
        }
        self.communicator.attach_to_channel(channel);
        self.connected = true;

        let user_name = connection_data.credentials.user_name.clone();
        let password = connection_data.credentials.password.clone();
        self.connection_data = Some(connection_data);

        let response = self.communicator.read_response().await?;
        if !response.is(FtpReturnCode::ServiceReadyForNewUser) {
            return Err(FtpError::command(
                "Could not connect to the FTP server",
                response,
            ));
        }

        let mut response = self.send_command(&format!("USER {}", user_name)).await?;
        if response.is(FtpReturnCode::UserNameOkNeedPassword) {
            response = self.send_command(&format!("PASS {}", password)).await?;
        }

        if !response.is(FtpReturnCode::UserLoggedIn) {
            return Err(FtpError::command(
                "Could not log in to the FTP server",
                response,
            ));
        }

        self.set_binary_mode().await?;
        info!("Logged in as {}", user_name);
        Ok(())
    }

    pub async fn change_directory(&mut self, directory: &str) -> Result<(), FtpError> {
        let response = self.send_command(&format!("CWD {}", directory)).await?;
        if !response.is(FtpReturnCode::RequestedFileActionOkayCompleted) {
            return Err(FtpError::command(
                "Could not change the current directory",
                response,
            ));
        }

        self.current_directory = Some(directory.to_string());
        Ok(())
    }

    /// Creates a remote directory. With `fail_if_exists` unset, a `550`
    /// reply is taken to mean the directory is already there.
    pub async fn create_directory(
        &mut self,
        directory: &str,
        fail_if_exists: bool,
    ) -> Result<(), FtpError> {
        let response = self.send_command(&format!("MKD {}", directory)).await?;
        if response.is(FtpReturnCode::Created) {
            debug!("Created directory {}", directory);
            return Ok(());
        }

        if !fail_if_exists && response.is(FtpReturnCode::FileUnavailable) {
            warn!(
                "Directory {} not created ({}), assuming it exists",
                directory, response
            );
            return Ok(());
        }

        Err(FtpError::command("Could not create the directory", response))
    }

    /// Creates every ancestor directory of `path`, parents first. `path`
    /// itself is not created and `/` is assumed to exist.
    ///
    /// Directories listed in `created_directories` are skipped, and every
    /// directory created here is added to it.
    pub async fn ensure_path_exists<'cb>(
        &mut self,
        path: &str,
        mut created_directories: Option<&mut HashSet<String>>,
        mut before_directory_created: Option<&mut DirectoryCallback<'cb>>,
    ) -> Result<(), FtpError> {
        let mut missing_directories = Vec::new();
        let mut current = path.to_string();

        while let Some(parent) = parent_unix_path(&current) {
            let already_created = created_directories
                .as_ref()
                .is_some_and(|created| created.contains(&parent));
            if parent == "/" || already_created {
                break;
            }
            missing_directories.push(parent.clone());
            current = parent;
        }

        for directory in missing_directories.into_iter().rev() {
            if let Some(callback) = before_directory_created.as_mut() {
                callback(directory.as_str());
            }

            self.create_directory(&directory, false).await?;

            if let Some(created) = created_directories.as_mut() {
                created.insert(directory);
            }
        }

        Ok(())
    }

    pub async fn upload_file(
        &mut self,
        local_file_name: &str,
        remote_file_name: &str,
    ) -> Result<(), FtpError> {
        self.ensure_path_exists(remote_file_name, None, None).await?;
        self.upload_file_without_checks(local_file_name, remote_file_name)
            .await
    }

    /// Uploads every file of `local_files` below `root_remote_directory`,
    /// creating remote directories as needed.
    ///
    /// With a base directory, files keep their path relative to it;
    /// otherwise only the file name is used. The execution context is
    /// checked before each file.
    pub async fn upload_files<'cb>(
        &mut self,
        execution_context: Option<&dyn ExecutionContext>,
        local_files: &FileSet,
        root_remote_directory: &str,
        mut before_directory_created: Option<&mut DirectoryCallback<'cb>>,
        mut before_file_uploaded: Option<&mut FileCallback<'cb>>,
    ) -> Result<(), FtpError> {
        let mut created_directories = HashSet::new();

        for local_file_name in local_files.files() {
            if execution_context.is_some_and(|context| context.should_abort()) {
                info!("Upload aborted before {}", local_file_name);
                return Ok(());
            }

            let debased_file_name = match local_files.base_dir() {
                Some(base_dir) => debase_path(base_dir, local_file_name, true).ok_or_else(|| {
                    FtpError::InvalidPath(format!(
                        "'{}' is not located under '{}'",
                        local_file_name, base_dir
                    ))
                })?,
                None => file_name(local_file_name)
                    .ok_or_else(|| {
                        FtpError::InvalidPath(format!("'{}' has no file name", local_file_name))
                    })?
                    .to_string(),
            };

            let remote_file_name = combine_unix_path(root_remote_directory, &debased_file_name);
            self.ensure_path_exists(
                &remote_file_name,
                Some(&mut created_directories),
                before_directory_created.as_deref_mut(),
            )
            .await?;

            if let Some(callback) = before_file_uploaded.as_mut() {
                callback(local_file_name.as_str(), remote_file_name.as_str());
            }

            self.upload_file_without_checks(local_file_name, &remote_file_name)
                .await?;
        }

        Ok(())
    }

    /// Stores one file through a passive data channel. The data channel is
    /// released before the transfer reply is read, whether or not the
    /// transfer succeeded.
    pub async fn upload_file_without_checks(
        &mut self,
        local_file_name: &str,
        remote_file_name: &str,
    ) -> Result<(), FtpError> {
        let mut data_channel = self.open_data_channel().await?;

        let transfer = self
            .send_file(data_channel.as_mut(), local_file_name, remote_file_name)
            .await;

        data_channel.disconnect().await;
        self.channel_factory.destroy(data_channel);
        transfer?;

        let response = self.communicator.read_response().await?;
        if !response.is(FtpReturnCode::RequestedFileActionOkayCompleted)
            && !response.is(FtpReturnCode::ClosingDataConnection)
        {
            return Err(FtpError::command("Could not upload file", response));
        }

        info!("Uploaded {} to {}", local_file_name, remote_file_name);
        Ok(())
    }

    /// Releases the control channel. Safe to call more than once.
    pub async fn end_session(&mut self) {
        if let Some(mut channel) = self.communicator.detach_from_channel() {
            channel.disconnect().await;
            self.channel_factory.destroy(channel);
            info!("FTP session ended");
        }
        self.connected = false;
    }

    pub async fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.end_session().await;
        self.disposed = true;
    }

    async fn send_file(
        &mut self,
        data_channel: &mut dyn FtpChannel,
        local_file_name: &str,
        remote_file_name: &str,
    ) -> Result<(), FtpError> {
        let response = self
            .send_command(&format!("STOR {}", remote_file_name))
            .await?;
        if !response.is(FtpReturnCode::DataConnectionAlreadyOpen)
            && !response.is(FtpReturnCode::FileStatusOk)
        {
            return Err(FtpError::command("Could not upload file", response));
        }

        let data = self.file_system.read_file_as_bytes(local_file_name).await?;
        let sent = data_channel.send(&data).await?;
        if sent != data.len() {
            return Err(FtpError::IncompleteUpload {
                sent,
                expected: data.len(),
            });
        }

        Ok(())
    }

    async fn send_command(&mut self, command: &str) -> Result<FtpServerResponse, FtpError> {
        self.communicator.send_command(command).await?;
        self.communicator.read_response().await
    }

    async fn set_binary_mode(&mut self) -> Result<(), FtpError> {
        let response = self.send_command("TYPE I").await?;
        if !response.is(FtpReturnCode::CommandOk) {
            return Err(FtpError::command("Could not execute command", response));
        }
        Ok(())
    }

    async fn open_data_channel(&mut self) -> Result<Box<dyn FtpChannel>, FtpError> {
        let response = self.send_command("PASV").await?;
        if !response.is(FtpReturnCode::EnteringPassiveMode) {
            return Err(FtpError::command("Could not upload file", response));
        }

        let address = response.passive_address()?;
        debug!("Opening data channel to {}", address);

        let mut data_channel = self.channel_factory.create_channel();
        if let Err(e) = data_channel
            .connect_to_address(*address.ip(), address.port())
            .await
        {
            self.channel_factory.destroy(data_channel);
            return Err(e.into());
        }

        Ok(data_channel)
    }
}

impl Drop for FtpSession {
    fn drop(&mut self) {
        if self.connected {
            warn!("FTP session dropped without end_session, closing control channel");
        }
    }
}

/// Hands out sessions that share one channel factory and file system.
#[derive(Clone)]
pub struct FtpSessionFactory {
    channel_factory: Arc<dyn FtpChannelFactory>,
    file_system: Arc<dyn FileSystem>,
}

impl FtpSessionFactory {
    pub fn new(
        channel_factory: Arc<dyn FtpChannelFactory>,
        file_system: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            channel_factory,
            file_system,
        }
    }

    pub fn create_session(&self) -> FtpSession {
        FtpSession::new(
            Arc::clone(&self.channel_factory),
            Box::new(FramedFtpCommunicator::new()),
            Arc::clone(&self.file_system),
        )
    }

    pub async fn destroy(&self, mut session: FtpSession) {
        session.dispose().await;
    }
}
