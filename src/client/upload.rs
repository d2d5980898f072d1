//! Two-phase write protocol (CREATE / APPEND)
//!
//! 1. Control: the namenode is asked for a write location and answers with a
//!    redirect whose `Location` names a datanode URL. This step fails over
//!    like any other request.
//! 2. Data: the payload goes to exactly that URL. The location belongs to
//!    the namenode that issued it, so this step is never retried elsewhere.

use crate::client::dispatcher::{Dispatcher, Redirects};
use crate::client::envelope::remote_exception_in;
use crate::client::params::{Op, OpParams};
use crate::client::transport::{HttpRequest, Transport};
use crate::{Error, Result};
use bytes::Bytes;
use reqwest::{Method, Url};
use tracing::{debug, info};

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Datanode location handed out by the control step, consumed by the upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    location: Url,
    method: Method,
}

impl UploadTicket {
    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

impl<T: Transport> Dispatcher<T> {
    /// Control step: ask the namenode where to send the bytes.
    pub fn request_upload(&mut self, path: &str, params: &OpParams) -> Result<UploadTicket> {
        let op = params.op();
        if !matches!(op, Op::Create | Op::Append) {
            return Err(Error::InvalidParam(format!(
                "{} does not take a payload",
                op
            )));
        }

        let response = self.dispatch(Some(path), params, None, Redirects::Capture)?;
        let raw = response
            .location
            .filter(|l| !l.trim().is_empty())
            .ok_or(Error::MissingLocation {
                status: response.status,
            })?;
        let location = Url::parse(raw.trim())
            .map_err(|e| Error::InvalidLocation(format!("{}: {}", raw, e)))?;

        debug!(%location, "{} {} redirected to datanode", op, path);
        Ok(UploadTicket {
            location,
            method: op.method(),
        })
    }

    /// Data step: send the payload to the ticket's location.
    ///
    /// Succeeds only on 200 or 201.
    pub fn upload(
        &self,
        ticket: UploadTicket,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<()> {
        let size = data.len();
        let request = HttpRequest {
            method: ticket.method,
            url: ticket.location,
            body: Some(data),
            content_type: Some(content_type.unwrap_or(DEFAULT_CONTENT_TYPE).to_string()),
            follow_redirects: true,
        };
        let url = request.url.to_string();

        let response = self.transport().execute(request)?;
        match response.status {
            200 | 201 => {
                info!("Uploaded {} bytes to {}", size, url);
                Ok(())
            }
            status => Err(Error::UploadRejected {
                status,
                exception: remote_exception_in(&response.body),
            }),
        }
    }
}
