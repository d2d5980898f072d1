//! HTTP transport abstraction
//!
//! The dispatcher talks to a [`Transport`] rather than to reqwest directly,
//! so failover and the write protocol can be exercised against scripted
//! responses. [`HttpTransport`] is the real implementation.

use crate::{Configuration, Result};
use bytes::Bytes;
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::{Method, Url};

/// One outgoing HTTP exchange
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub body: Option<Bytes>,
    pub content_type: Option<String>,
    /// When false a 3xx answer is returned as-is instead of being followed
    pub follow_redirects: bool,
}

impl HttpRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            body: None,
            content_type: None,
            follow_redirects: true,
        }
    }
}

/// The parts of a response the protocol cares about
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub location: Option<String>,
    pub body: Bytes,
}

impl HttpResponse {
    /// 200-399 counts as the namenode having handled the request
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }
}

/// Trait for HTTP backends
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// reqwest-backed transport with one pooled client per redirect policy
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    control: Client,
}

impl HttpTransport {
    pub fn new(config: &Configuration) -> Result<Self> {
        let client = Self::builder(config).build()?;
        let control = Self::builder(config)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client, control })
    }

    fn builder(config: &Configuration) -> reqwest::blocking::ClientBuilder {
        // The blocking client only exposes a whole-request deadline, so the
        // response header timeout bounds the full exchange.
        let mut builder = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.response_header_timeout)
            .gzip(!config.disable_compression);

        if config.disable_keep_alives {
            builder = builder.pool_max_idle_per_host(0);
        } else if let Some(max_idle) = config.max_idle_conns_per_host {
            builder = builder.pool_max_idle_per_host(max_idle);
        }
        builder
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let client = if request.follow_redirects {
            &self.client
        } else {
            &self.control
        };

        let mut builder = client.request(request.method, request.url);
        if let Some(content_type) = request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
        let body = response.bytes()?;

        Ok(HttpResponse {
            status,
            location,
            body,
        })
    }
}
