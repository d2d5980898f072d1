//! # webhdfs
//!
//! A synchronous client for the WebHDFS REST API with:
//! - Namenode failover across a rotating endpoint pool
//! - Typed request parameters and response envelopes
//! - Two-phase CREATE/APPEND writes (namenode redirect, then datanode upload)
//! - Delegation token operations
//! - A shell-style helper layer and a `webhdfs` CLI
//!
//! ## Architecture

#![allow(clippy::result_large_err)]
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   FsShell / webhdfs CLI                 │
//! └───────────┬─────────────────────────────┘
//!             │
//! ┌───────────▼─────────────────────────────┐
//! │   FileSystem (one method per op)        │
//! └───────────┬─────────────────────────────┘
//!             │ OpParams
//! ┌───────────▼─────────────────────────────┐
//! │   Dispatcher                            │
//! │   - URL builder                         │
//! │   - EndpointPool rotation on failure    │
//! │   - Envelope decoding                   │
//! └───────────┬─────────────────────────────┘
//!             │ Transport (reqwest)
//!   ┌─────────┴──────────┬──────────────┐
//!   │                    │              │
//! ┌─▼──────────┐   ┌─────▼──────┐   ┌───▼──────────┐
//! │ Namenode 1 │   │ Namenode 2 │   │ Datanode     │
//! │ (active)   │   │ (standby)  │   │ (redirected) │
//! └────────────┘   └────────────┘   └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use webhdfs::{Configuration, CreateOptions, FileSystem, Permission};
//!
//! # fn main() -> webhdfs::Result<()> {
//! let config = Configuration::new("nn1:50070;nn2:50070", "", "webuser", false);
//! let mut fs = FileSystem::new(config)?;
//!
//! fs.mkdirs("/data", Permission::new(0o755)?)?;
//! fs.create("/data/hello.txt", "hello", &CreateOptions::default())?;
//! for status in fs.list_status("/data")? {
//!     println!("{} {}", status.path_suffix, status.length);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Use the CLI
//! ```bash
//! webhdfs --namenodes "nn1:50070;nn2:50070" ls /data
//! webhdfs put ./local.bin /data
//! webhdfs cat /data/local.bin
//! ```

pub mod client;
pub mod common;
pub mod fs;
pub mod shell;

// Re-export commonly used types
pub use client::{
    ContentSummary, CreateOptions, Envelope, FileChecksum, FileStatus, FileType, Op,
    OpenOptions, Permission, RemoteException, Token, UploadTicket,
};
pub use common::{Configuration, Error, Result};
pub use fs::FileSystem;
pub use shell::FsShell;

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build info
pub const BUILD_INFO: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CARGO_PKG_NAME"), ")");
