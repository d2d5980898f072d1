//! Request dispatch with namenode failover
//!
//! One logical request is tried against the pool's current namenode; a
//! transport error or a status outside 200-399 rotates the pool and tries
//! the next one, at most once per namenode. Rotation is sticky: the next
//! call starts wherever the last one left off.

use crate::client::endpoint::EndpointPool;
use crate::client::envelope::{self, remote_exception_in, Envelope};
use crate::client::params::OpParams;
use crate::client::transport::{HttpRequest, HttpResponse, HttpTransport, Transport};
use crate::client::url::build_request_url;
use crate::{Configuration, Error, Result};
use bytes::Bytes;
use once_cell::unsync::OnceCell;
use tracing::{debug, error, warn};

/// Whether a 3xx answer should be followed by the HTTP client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirects {
    Follow,
    /// Hand the redirect back to the caller (write protocol control step)
    Capture,
}

pub struct Dispatcher<T = HttpTransport> {
    config: Configuration,
    pool: EndpointPool,
    transport: T,
    identity: OnceCell<String>,
}

impl Dispatcher<HttpTransport> {
    pub fn new(config: Configuration) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn with_transport(config: Configuration, transport: T) -> Result<Self> {
        let pool = EndpointPool::new(config.endpoints())?;
        Ok(Self {
            config,
            pool,
            transport,
            identity: OnceCell::new(),
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn pool(&self) -> &EndpointPool {
        &self.pool
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `user.name` value, resolved on first use and then fixed
    pub fn identity(&self) -> &str {
        self.identity.get_or_init(|| self.config.resolve_user())
    }

    /// Send one request, failing over across namenodes.
    ///
    /// Returns the raw response of the first namenode that answers with a
    /// status in 200-399. Non-retryable errors (bad config, bad URL) are
    /// returned immediately.
    pub fn dispatch(
        &mut self,
        path: Option<&str>,
        params: &OpParams,
        body: Option<Bytes>,
        redirects: Redirects,
    ) -> Result<HttpResponse> {
        let attempts = self.pool.size();
        if attempts == 0 {
            return Err(Error::InvalidConfig("no namenode address configured".into()));
        }

        let mut tried = Vec::with_capacity(attempts);
        let mut last_failure = None;
        let mut service_answer = None;

        for attempt in 0..attempts {
            let url = build_request_url(&self.config, self.identity(), &self.pool, path, params)?;
            let endpoint = self.pool.current()?.to_string();
            debug!(%url, attempt, "sending {} request", params.op());

            let request = HttpRequest {
                method: params.op().method(),
                url: url.clone(),
                body: body.clone(),
                content_type: None,
                follow_redirects: redirects == Redirects::Follow,
            };

            let failure = match self.transport.execute(request) {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => Error::Status {
                    status: response.status,
                    url: url.to_string(),
                    exception: remote_exception_in(&response.body),
                },
                Err(e) if e.is_retryable() => e,
                Err(e) => return Err(e),
            };

            warn!(
                "Request to namenode {} failed (attempt {}/{}): {}",
                endpoint,
                attempt + 1,
                attempts,
                failure
            );
            tried.push(endpoint);
            if service_answer.is_none() && failure.is_service_answer() {
                service_answer = Some(failure);
            } else {
                last_failure = Some(failure);
            }

            if tried.len() < attempts {
                self.pool.rotate();
            }
        }

        error!("All {} namenode(s) failed for {}", attempts, params.op());
        Err(Error::EndpointsExhausted {
            attempts,
            tried,
            cause: Box::new(service_answer.or(last_failure).unwrap_or_else(|| {
                Error::Other("no namenode attempt was made".into())
            })),
        })
    }

    /// Dispatch and decode the body into an envelope
    pub fn call(&mut self, path: Option<&str>, params: &OpParams) -> Result<Envelope> {
        let response = self.dispatch(path, params, None, Redirects::Follow)?;
        envelope::decode(&response.body)
    }
}
