//! WebHDFS protocol engine
//!
//! - Endpoint pool (namenode rotation)
//! - Request URL construction
//! - Dispatch with failover
//! - Two-phase CREATE/APPEND writes
//! - Response envelope decoding

pub mod dispatcher;
pub mod endpoint;
pub mod envelope;
pub mod params;
pub mod transport;
pub mod upload;
pub mod url;

pub use dispatcher::{Dispatcher, Redirects};
pub use endpoint::EndpointPool;
pub use envelope::{
    ContentSummary, Envelope, FileChecksum, FileStatus, FileType, RemoteException, Token,
};
pub use params::{CreateOptions, Op, OpParams, OpenOptions, Permission};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport};
pub use upload::UploadTicket;
