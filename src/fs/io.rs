use super::FileSystem;
use crate::client::{
    CreateOptions, OpParams, OpenOptions, Redirects, Transport, UploadTicket,
};
use crate::Result;
use bytes::Bytes;
use tracing::debug;

impl<T: Transport> FileSystem<T> {
    /// Read a file (or a byte range of it).
    ///
    /// The namenode redirects to a datanode; the redirect is followed and the
    /// datanode's bytes are returned.
    pub fn open(&mut self, path: &str, options: &OpenOptions) -> Result<Bytes> {
        let params = OpParams::open(options);
        let response = self
            .dispatcher
            .dispatch(Some(path), &params, None, Redirects::Follow)?;
        debug!("Read {} bytes from {}", response.body.len(), path);
        Ok(response.body)
    }

    /// First half of a create: returns the datanode location to write to.
    pub fn begin_create(&mut self, path: &str, options: &CreateOptions) -> Result<UploadTicket> {
        self.dispatcher
            .request_upload(path, &OpParams::create(options))
    }

    /// First half of an append.
    pub fn begin_append(&mut self, path: &str, buffer_size: Option<u32>) -> Result<UploadTicket> {
        self.dispatcher
            .request_upload(path, &OpParams::append(buffer_size))
    }

    /// Second half of a create/append: ship the payload to the ticket's location.
    pub fn write(
        &self,
        ticket: UploadTicket,
        data: impl Into<Bytes>,
        content_type: Option<&str>,
    ) -> Result<()> {
        self.dispatcher.upload(ticket, data.into(), content_type)
    }

    /// Create `path` with `data` as its content.
    pub fn create(
        &mut self,
        path: &str,
        data: impl Into<Bytes>,
        options: &CreateOptions,
    ) -> Result<()> {
        let ticket = self.begin_create(path, options)?;
        self.write(ticket, data, None)
    }

    /// Append `data` to an existing file.
    pub fn append(
        &mut self,
        path: &str,
        data: impl Into<Bytes>,
        buffer_size: Option<u32>,
    ) -> Result<()> {
        let ticket = self.begin_append(path, buffer_size)?;
        self.write(ticket, data, None)
    }

    /// Concatenate `sources` onto the end of `target`; the sources are removed.
    pub fn concat<S: AsRef<str>>(&mut self, target: &str, sources: &[S]) -> Result<()> {
        let params = OpParams::concat(sources)?;
        self.dispatcher.call(Some(target), &params)?;
        Ok(())
    }
}
