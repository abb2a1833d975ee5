//! In-memory data source

use std::sync::Mutex;

use async_trait::async_trait;

use super::DataSource;
use crate::error::SourceError;
use crate::model::Row;

/// A request seen by a [`StaticSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenRequest {
    pub path: String,
    pub credentials: bool,
}

enum Reply {
    Rows(Vec<Row>),
    Fail { status: u16, message: String },
}

/// A data source serving fixed rows, or a fixed failure.
///
/// Every request is recorded so callers can check what was asked for.
pub struct StaticSource {
    reply: Mutex<Reply>,
    requests: Mutex<Vec<SeenRequest>>,
}

impl StaticSource {
    /// Serve `rows` for every path.
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            reply: Mutex::new(Reply::Rows(rows)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every request with an HTTP error.
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        let source = Self::new(Vec::new());
        source.set_failure(status, message);
        source
    }

    /// Replace the rows served from now on.
    pub fn set_rows(&self, rows: Vec<Row>) {
        if let Ok(mut reply) = self.reply.lock() {
            *reply = Reply::Rows(rows);
        }
    }

    /// Fail requests from now on.
    pub fn set_failure(&self, status: u16, message: impl Into<String>) {
        if let Ok(mut reply) = self.reply.lock() {
            *reply = Reply::Fail {
                status,
                message: message.into(),
            };
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DataSource for StaticSource {
    async fn fetch(&self, path: &str, credentials: bool) -> Result<Vec<Row>, SourceError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(SeenRequest {
                path: path.to_string(),
                credentials,
            });
        }
        let reply = self
            .reply
            .lock()
            .map_err(|_| SourceError::parse("static source poisoned"))?;
        match &*reply {
            Reply::Rows(rows) => Ok(rows.clone()),
            Reply::Fail { status, message } if *status == 401 => {
                Err(SourceError::Unauthorized(message.clone()))
            }
            Reply::Fail { status, message } => Err(SourceError::http(*status, message.clone())),
        }
    }
}
