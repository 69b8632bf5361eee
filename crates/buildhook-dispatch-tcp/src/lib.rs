//! Line-delimited JSON controller channel over TCP.
//!
//! Every call is one request line, answered by one reply line carrying the
//! same identifier:
//!
//! ```text
//! -> {"id":1,"method":"login","params":{"username":"change","password":"..."}}
//! <- {"id":1,"ok":true}
//! -> {"id":2,"method":"addChange","params":{"revision":"...", ...}}
//! <- {"id":2,"error":"unknown branch"}
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod protocol;

use async_trait::async_trait;
use buildhook_dispatch_interface::{
    ControllerConnection, ControllerService, Credentials, DispatchError,
};
use buildhook_models::{ChangeRecord, ControllerAddress};
use serde::Serialize;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{
        tcp::{OwnedReadHalf, OwnedWriteHalf},
        TcpStream,
    },
};
use tracing::debug;

use self::protocol::{LoginParams, Reply, Request};

/// Method used to log in.
pub const LOGIN_METHOD: &str = "login";
/// Method used to submit a change.
pub const ADD_CHANGE_METHOD: &str = "addChange";

/// TCP controller service.
#[derive(Clone, Default)]
pub struct TcpControllerService {
    _private: (),
}

impl TcpControllerService {
    /// Creates a TCP controller service.
    pub fn new() -> Self {
        Self { _private: () }
    }

    async fn open_stream(address: &ControllerAddress) -> Result<TcpStream, DispatchError> {
        TcpStream::connect((address.host(), address.port()))
            .await
            .map_err(|e| DispatchError::ConnectError {
                address: address.clone(),
                source: e,
            })
    }
}

#[async_trait]
impl ControllerService for TcpControllerService {
    #[tracing::instrument(skip_all, fields(address = %address))]
    async fn connect(
        &self,
        address: &ControllerAddress,
    ) -> Result<Box<dyn ControllerConnection>, DispatchError> {
        let stream = Self::open_stream(address).await?;
        Ok(Box::new(TcpControllerConnection::new(stream)))
    }

    #[tracing::instrument(skip_all, fields(address = %address))]
    async fn health_check(&self, address: &ControllerAddress) -> Result<(), DispatchError> {
        Self::open_stream(address).await.map(|_| ())
    }
}

/// One TCP connection to the controller.
pub struct TcpControllerConnection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    last_id: u64,
}

impl TcpControllerConnection {
    fn new(stream: TcpStream) -> Self {
        let (reader, writer) = stream.into_split();

        Self {
            reader: BufReader::new(reader),
            writer,
            last_id: 0,
        }
    }

    /// Send one request and wait for its reply.
    ///
    /// Returns the remote error message, if any.
    async fn call<P: Serialize + Sync>(
        &mut self,
        method: &str,
        params: &P,
    ) -> Result<Option<String>, DispatchError> {
        self.last_id += 1;
        let request = Request {
            id: self.last_id,
            method,
            params,
        };

        let mut line = serde_json::to_string(&request).map_err(|e| DispatchError::ProtocolError {
            reason: format!("could not encode '{method}' request: {e}"),
        })?;
        line.push('\n');

        debug!(id = self.last_id, method = method, message = "Calling controller");
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| DispatchError::IoError { source: e })?;
        self.writer
            .flush()
            .await
            .map_err(|e| DispatchError::IoError { source: e })?;

        let mut reply = String::new();
        let read = self
            .reader
            .read_line(&mut reply)
            .await
            .map_err(|e| DispatchError::IoError { source: e })?;
        if read == 0 {
            return Err(DispatchError::IoError {
                source: std::io::ErrorKind::UnexpectedEof.into(),
            });
        }

        let reply: Reply =
            serde_json::from_str(reply.trim_end()).map_err(|e| DispatchError::ProtocolError {
                reason: format!("malformed reply to '{method}': {e}"),
            })?;
        reply.into_outcome(self.last_id)
    }
}

#[async_trait]
impl ControllerConnection for TcpControllerConnection {
    #[tracing::instrument(skip_all, fields(username = credentials.username))]
    async fn authenticate(&mut self, credentials: &Credentials) -> Result<(), DispatchError> {
        let params = LoginParams {
            username: &credentials.username,
            password: &credentials.password,
        };

        match self.call(LOGIN_METHOD, &params).await? {
            None => Ok(()),
            Some(reason) => Err(DispatchError::AuthenticationError {
                username: credentials.username.clone(),
                reason,
            }),
        }
    }

    #[tracing::instrument(skip_all, fields(revision = change.short_revision()))]
    async fn add_change(&mut self, change: &ChangeRecord) -> Result<(), DispatchError> {
        match self.call(ADD_CHANGE_METHOD, change).await? {
            None => Ok(()),
            Some(reason) => Err(DispatchError::RemoteCallError {
                method: ADD_CHANGE_METHOD.into(),
                reason,
            }),
        }
    }

    async fn close(&mut self) -> Result<(), DispatchError> {
        self.writer
            .shutdown()
            .await
            .map_err(|e| DispatchError::IoError { source: e })
    }
}
