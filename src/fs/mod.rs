//! Typed filesystem operations
//!
//! [`FileSystem`] mirrors HDFS's `FileSystem` class: one method per WebHDFS
//! op, each assembling its parameters and driving the dispatcher or the
//! two-phase write protocol.
//!
//! - `io`: open, create, append, concat
//! - `admin`: namespace and metadata operations
//! - `token`: delegation tokens

mod admin;
mod io;
mod token;

use crate::client::{Dispatcher, EndpointPool, HttpTransport, Transport};
use crate::{Configuration, Result};

/// A WebHDFS client bound to one set of namenodes.
///
/// Calls take `&mut self` because a failed namenode rotates the endpoint
/// pool; share across threads only behind a lock.
pub struct FileSystem<T = HttpTransport> {
    dispatcher: Dispatcher<T>,
}

impl FileSystem<HttpTransport> {
    pub fn new(config: Configuration) -> Result<Self> {
        Ok(Self {
            dispatcher: Dispatcher::new(config)?,
        })
    }
}

impl<T: Transport> FileSystem<T> {
    pub fn with_transport(config: Configuration, transport: T) -> Result<Self> {
        Ok(Self {
            dispatcher: Dispatcher::with_transport(config, transport)?,
        })
    }

    pub fn config(&self) -> &Configuration {
        self.dispatcher.config()
    }

    pub fn endpoints(&self) -> &EndpointPool {
        self.dispatcher.pool()
    }

    /// The `user.name` sent with every request
    pub fn user(&self) -> &str {
        self.dispatcher.identity()
    }

    pub fn dispatcher(&mut self) -> &mut Dispatcher<T> {
        &mut self.dispatcher
    }
}
