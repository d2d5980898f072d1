//! Response envelope decoding
//!
//! Namenode answers are JSON objects keyed by the kind of payload they carry
//! (`boolean`, `FileStatus`, `FileStatuses`, ...) or by `RemoteException`.
//! [`decode`] turns raw bytes into an [`Envelope`], checking for a remote
//! exception before anything else.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exception raised on the service side and shipped back as JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteException {
    pub exception: String,
    pub java_class_name: String,
    pub message: String,
}

impl RemoteException {
    fn is_populated(&self) -> bool {
        !self.exception.is_empty() || !self.java_class_name.is_empty() || !self.message.is_empty()
    }
}

impl fmt::Display for RemoteException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.exception, self.message)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileType {
    #[default]
    File,
    Directory,
    Symlink,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::File => "FILE",
            FileType::Directory => "DIRECTORY",
            FileType::Symlink => "SYMLINK",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileStatus {
    /// Milliseconds since epoch
    pub access_time: i64,
    pub block_size: u64,
    pub group: String,
    pub length: u64,
    /// Milliseconds since epoch
    pub modification_time: i64,
    pub owner: String,
    pub path_suffix: String,
    /// Octal, e.g. `"644"`
    pub permission: String,
    pub replication: u16,
    #[serde(rename = "type")]
    pub file_type: FileType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symlink: Option<String>,
}

impl FileStatus {
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentSummary {
    pub directory_count: u64,
    pub file_count: u64,
    pub length: u64,
    /// `-1` when no quota is set
    pub quota: i64,
    pub space_consumed: u64,
    pub space_quota: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChecksum {
    pub algorithm: String,
    /// Hex-encoded checksum
    pub bytes: String,
    pub length: u32,
}

impl FileChecksum {
    /// Decode the hex checksum into raw bytes
    pub fn digest(&self) -> Result<Vec<u8>> {
        hex::decode(self.bytes.trim())
            .map_err(|e| Error::Other(format!("invalid checksum bytes: {}", e)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Token {
    pub url_string: String,
}

/// What a response carried
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// No body, or an object with none of the known keys
    Empty,
    Boolean(bool),
    Long(i64),
    FileStatus(FileStatus),
    FileStatuses(Vec<FileStatus>),
    ContentSummary(ContentSummary),
    FileChecksum(FileChecksum),
    Token(Token),
    Tokens(Vec<Token>),
    Path(String),
}

impl Envelope {
    pub fn is_empty(&self) -> bool {
        matches!(self, Envelope::Empty)
    }

    pub fn into_boolean(self) -> Result<bool> {
        match self {
            Envelope::Boolean(b) => Ok(b),
            _ => Err(Error::MissingField("boolean")),
        }
    }

    pub fn into_long(self) -> Result<i64> {
        match self {
            Envelope::Long(l) => Ok(l),
            _ => Err(Error::MissingField("long")),
        }
    }

    pub fn into_file_status(self) -> Result<FileStatus> {
        match self {
            Envelope::FileStatus(s) => Ok(s),
            _ => Err(Error::MissingField("FileStatus")),
        }
    }

    pub fn into_file_statuses(self) -> Result<Vec<FileStatus>> {
        match self {
            Envelope::FileStatuses(list) => Ok(list),
            _ => Err(Error::MissingField("FileStatuses")),
        }
    }

    pub fn into_content_summary(self) -> Result<ContentSummary> {
        match self {
            Envelope::ContentSummary(s) => Ok(s),
            _ => Err(Error::MissingField("ContentSummary")),
        }
    }

    pub fn into_file_checksum(self) -> Result<FileChecksum> {
        match self {
            Envelope::FileChecksum(c) => Ok(c),
            _ => Err(Error::MissingField("FileChecksum")),
        }
    }

    pub fn into_token(self) -> Result<Token> {
        match self {
            Envelope::Token(t) => Ok(t),
            _ => Err(Error::MissingField("Token")),
        }
    }

    pub fn into_tokens(self) -> Result<Vec<Token>> {
        match self {
            Envelope::Tokens(t) => Ok(t),
            _ => Err(Error::MissingField("Tokens")),
        }
    }

    pub fn into_path(self) -> Result<String> {
        match self {
            Envelope::Path(p) => Ok(p),
            _ => Err(Error::MissingField("Path")),
        }
    }
}

/// Wire shape; every key optional so one struct covers all responses
#[derive(Debug, Default, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "RemoteException")]
    remote_exception: Option<RemoteException>,
    #[serde(rename = "boolean", alias = "Boolean")]
    boolean: Option<bool>,
    #[serde(rename = "long", alias = "Long")]
    long: Option<i64>,
    #[serde(rename = "FileStatus")]
    file_status: Option<FileStatus>,
    #[serde(rename = "FileStatuses")]
    file_statuses: Option<FileStatusList>,
    #[serde(rename = "ContentSummary")]
    content_summary: Option<ContentSummary>,
    #[serde(rename = "FileChecksum")]
    file_checksum: Option<FileChecksum>,
    #[serde(rename = "Token")]
    token: Option<Token>,
    #[serde(rename = "Tokens")]
    tokens: Option<TokenList>,
    #[serde(rename = "Path")]
    path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileStatusList {
    #[serde(rename = "FileStatus", default)]
    file_status: Vec<FileStatus>,
}

#[derive(Debug, Default, Deserialize)]
struct TokenList {
    #[serde(rename = "Token", default)]
    token: Vec<Token>,
}

/// Decode a response body.
///
/// Empty input is an empty envelope. A populated `RemoteException` becomes
/// [`Error::Remote`] whatever else the object holds.
pub fn decode(body: &[u8]) -> Result<Envelope> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Envelope::Empty);
    }

    let raw: RawEnvelope = serde_json::from_slice(body)?;

    if let Some(exception) = raw.remote_exception.filter(RemoteException::is_populated) {
        return Err(Error::Remote(exception));
    }

    let envelope = if let Some(b) = raw.boolean {
        Envelope::Boolean(b)
    } else if let Some(l) = raw.long {
        Envelope::Long(l)
    } else if let Some(s) = raw.file_status {
        Envelope::FileStatus(s)
    } else if let Some(list) = raw.file_statuses {
        Envelope::FileStatuses(list.file_status)
    } else if let Some(s) = raw.content_summary {
        Envelope::ContentSummary(s)
    } else if let Some(c) = raw.file_checksum {
        Envelope::FileChecksum(c)
    } else if let Some(t) = raw.token {
        Envelope::Token(t)
    } else if let Some(list) = raw.tokens {
        Envelope::Tokens(list.token)
    } else if let Some(p) = raw.path {
        Envelope::Path(p)
    } else {
        Envelope::Empty
    };

    Ok(envelope)
}

/// The remote exception inside an error body, if it is JSON-shaped and has one
pub fn remote_exception_in(body: &[u8]) -> Option<RemoteException> {
    match decode(body) {
        Err(Error::Remote(exception)) => Some(exception),
        _ => None,
    }
}
