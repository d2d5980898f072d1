//! Request URL construction
//!
//! `<scheme>://<namenode>/webhdfs/v1<base-path><path>?op=CODE&...&user.name=<id>`

use crate::client::endpoint::EndpointPool;
use crate::client::params::OpParams;
use crate::common::utils::encode_path;
use crate::{Configuration, Error, Result};
use reqwest::Url;

/// Fixed REST prefix of the WebHDFS API
pub const WEBHDFS_PREFIX: &str = "/webhdfs/v1";

/// Query parameter carrying the acting user
pub const USER_PARAM: &str = "user.name";

/// Build the URL for one request against the pool's current namenode.
///
/// `user.name` is always appended. Never touches the pool's order.
pub fn build_request_url(
    config: &Configuration,
    identity: &str,
    pool: &EndpointPool,
    path: Option<&str>,
    params: &OpParams,
) -> Result<Url> {
    let endpoint = pool.current()?;

    let mut raw = format!(
        "{}://{}{}{}",
        config.scheme(),
        endpoint,
        WEBHDFS_PREFIX,
        normalize(&config.base_path)
    );
    if let Some(path) = path {
        if !path.starts_with('/') {
            raw.push('/');
        }
        raw.push_str(&encode_path(path));
    }

    let mut url = Url::parse(&raw)
        .map_err(|e| Error::InvalidConfig(format!("invalid request url {}: {}", raw, e)))?;

    {
        let mut query = url.query_pairs_mut();
        for (key, value) in params.pairs() {
            query.append_pair(key, value);
        }
        query.append_pair(USER_PARAM, identity);
    }

    Ok(url)
}

fn normalize(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
