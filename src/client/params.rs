//! Operation codes and typed query parameters
//!
//! Every request carries an `op=<CODE>` plus a handful of op-specific
//! fields. [`OpParams`] collects them in insertion order and is what the URL
//! builder serializes; the typed constructors below validate values before
//! anything goes on the wire.

use crate::{Error, Result};
use reqwest::Method;
use std::fmt;

/// Default block size from hdfs-default.xml
pub const DEFAULT_BLOCK_SIZE: u64 = 134_217_728;
pub const DEFAULT_REPLICATION: u16 = 3;
pub const DEFAULT_WRITE_BUFFER: u32 = 4096;
pub const DEFAULT_READ_BUFFER: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Open,
    Create,
    Append,
    Concat,
    Rename,
    Delete,
    SetPermission,
    SetOwner,
    SetReplication,
    SetTimes,
    MkDirs,
    CreateSymlink,
    ListStatus,
    GetFileStatus,
    GetContentSummary,
    GetFileChecksum,
    GetHomeDirectory,
    GetDelegationToken,
    GetDelegationTokens,
    RenewDelegationToken,
    CancelDelegationToken,
}

impl Op {
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Open => "OPEN",
            Op::Create => "CREATE",
            Op::Append => "APPEND",
            Op::Concat => "CONCAT",
            Op::Rename => "RENAME",
            Op::Delete => "DELETE",
            Op::SetPermission => "SETPERMISSION",
            Op::SetOwner => "SETOWNER",
            Op::SetReplication => "SETREPLICATION",
            Op::SetTimes => "SETTIMES",
            Op::MkDirs => "MKDIRS",
            Op::CreateSymlink => "CREATESYMLINK",
            Op::ListStatus => "LISTSTATUS",
            Op::GetFileStatus => "GETFILESTATUS",
            Op::GetContentSummary => "GETCONTENTSUMMARY",
            Op::GetFileChecksum => "GETFILECHECKSUM",
            Op::GetHomeDirectory => "GETHOMEDIRECTORY",
            Op::GetDelegationToken => "GETDELEGATIONTOKEN",
            Op::GetDelegationTokens => "GETDELEGATIONTOKENS",
            Op::RenewDelegationToken => "RENEWDELEGATIONTOKEN",
            Op::CancelDelegationToken => "CANCELDELEGATIONTOKEN",
        }
    }

    /// HTTP method the namenode expects for this op
    pub fn method(&self) -> Method {
        match self {
            Op::Open
            | Op::ListStatus
            | Op::GetFileStatus
            | Op::GetContentSummary
            | Op::GetFileChecksum
            | Op::GetHomeDirectory
            | Op::GetDelegationToken
            | Op::GetDelegationTokens => Method::GET,
            Op::Append | Op::Concat => Method::POST,
            Op::Delete => Method::DELETE,
            Op::Create
            | Op::Rename
            | Op::SetPermission
            | Op::SetOwner
            | Op::SetReplication
            | Op::SetTimes
            | Op::MkDirs
            | Op::CreateSymlink
            | Op::RenewDelegationToken
            | Op::CancelDelegationToken => Method::PUT,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission bits, `0..=0o1777` (sticky bit plus rwx for user/group/other)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permission(u32);

impl Permission {
    pub const MAX: u32 = 0o1777;

    pub fn new(mode: u32) -> Result<Self> {
        if mode > Self::MAX {
            return Err(Error::InvalidParam(format!(
                "permission {:o} out of range (0-1777)",
                mode
            )));
        }
        Ok(Self(mode))
    }

    /// Parse an octal string such as `"755"` or `"0644"`
    pub fn parse(octal: &str) -> Result<Self> {
        let mode = u32::from_str_radix(octal.trim(), 8)
            .map_err(|_| Error::InvalidParam(format!("invalid octal permission: {}", octal)))?;
        Self::new(mode)
    }

    pub fn mode(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:o}", self.0)
    }
}

/// Options for `CREATE`; unset fields fall back to the HDFS defaults
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub overwrite: bool,
    pub block_size: Option<u64>,
    pub replication: Option<u16>,
    pub permission: Option<Permission>,
    pub buffer_size: Option<u32>,
}

/// Byte range for `OPEN`; `length: None` reads to the end of the file
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenOptions {
    pub offset: u64,
    pub length: Option<u64>,
    pub buffer_size: Option<u32>,
}

/// Query parameters for one request, `op` first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpParams {
    op: Op,
    pairs: Vec<(&'static str, String)>,
}

impl OpParams {
    pub fn new(op: Op) -> Self {
        Self {
            op,
            pairs: Vec::new(),
        }
    }

    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All pairs as they go on the wire, including `op`
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        std::iter::once::<(&str, &str)>(("op", self.op.as_str()))
            .chain(self.pairs.iter().map(|(k, v)| (*k, v.as_str())))
    }

    pub fn open(options: &OpenOptions) -> Self {
        let mut params = Self::new(Op::Open).with("offset", options.offset);
        if let Some(length) = options.length.filter(|l| *l > 0) {
            params = params.with("length", length);
        }
        params.with(
            "buffersize",
            options
                .buffer_size
                .filter(|b| *b > 0)
                .unwrap_or(DEFAULT_READ_BUFFER),
        )
    }

    pub fn create(options: &CreateOptions) -> Self {
        let permission = options
            .permission
            .unwrap_or(Permission(0o700));
        Self::new(Op::Create)
            .with("overwrite", options.overwrite)
            .with(
                "blocksize",
                options
                    .block_size
                    .filter(|b| *b > 0)
                    .unwrap_or(DEFAULT_BLOCK_SIZE),
            )
            .with(
                "replication",
                options
                    .replication
                    .filter(|r| *r > 0)
                    .unwrap_or(DEFAULT_REPLICATION),
            )
            .with("permission", permission)
            .with(
                "buffersize",
                options
                    .buffer_size
                    .filter(|b| *b > 0)
                    .unwrap_or(DEFAULT_WRITE_BUFFER),
            )
    }

    pub fn append(buffer_size: Option<u32>) -> Self {
        Self::new(Op::Append).with(
            "buffersize",
            buffer_size.filter(|b| *b > 0).unwrap_or(DEFAULT_WRITE_BUFFER),
        )
    }

    pub fn concat<S: AsRef<str>>(sources: &[S]) -> Result<Self> {
        if sources.is_empty() {
            return Err(Error::InvalidParam("concat needs at least one source".into()));
        }
        let joined = sources
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
        Ok(Self::new(Op::Concat).with("sources", joined))
    }

    pub fn rename(destination: &str) -> Result<Self> {
        if destination.is_empty() {
            return Err(Error::InvalidParam("rename destination cannot be empty".into()));
        }
        Ok(Self::new(Op::Rename).with("destination", destination))
    }

    pub fn delete(recursive: bool) -> Self {
        Self::new(Op::Delete).with("recursive", recursive)
    }

    pub fn set_permission(permission: Permission) -> Self {
        Self::new(Op::SetPermission).with("permission", permission)
    }

    /// At least one of owner or group must be non-empty; empty ones are left out
    pub fn set_owner(owner: &str, group: &str) -> Result<Self> {
        if owner.is_empty() && group.is_empty() {
            return Err(Error::InvalidParam(
                "set_owner needs an owner or a group".into(),
            ));
        }
        let mut params = Self::new(Op::SetOwner);
        if !owner.is_empty() {
            params = params.with("owner", owner);
        }
        if !group.is_empty() {
            params = params.with("group", group);
        }
        Ok(params)
    }

    pub fn set_replication(replication: u16) -> Result<Self> {
        if replication == 0 {
            return Err(Error::InvalidParam("replication must be positive".into()));
        }
        Ok(Self::new(Op::SetReplication).with("replication", replication))
    }

    /// `-1` leaves the corresponding timestamp unchanged
    pub fn set_times(access_time: i64, modification_time: i64) -> Self {
        Self::new(Op::SetTimes)
            .with("accesstime", access_time)
            .with("modificationtime", modification_time)
    }

    pub fn mkdirs(permission: Permission) -> Self {
        Self::new(Op::MkDirs).with("permission", permission)
    }

    pub fn create_symlink(destination: &str, create_parent: bool) -> Result<Self> {
        if destination.is_empty() {
            return Err(Error::InvalidParam("symlink destination cannot be empty".into()));
        }
        Ok(Self::new(Op::CreateSymlink)
            .with("destination", destination)
            .with("createParent", create_parent))
    }

    pub fn renewer(op: Op, renewer: &str) -> Self {
        let params = Self::new(op);
        if renewer.is_empty() {
            params
        } else {
            params.with("renewer", renewer)
        }
    }

    pub fn token(op: Op, token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(Error::InvalidParam("token cannot be empty".into()));
        }
        Ok(Self::new(op).with("token", token))
    }
}
