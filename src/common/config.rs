//! Configuration for webhdfs clients

use crate::common::utils::{current_user, format_duration, parse_duration};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable naming the TOML file read by [`Configuration::load`]
pub const CONFIG_ENV: &str = "WEBHDFS_CONFIG";

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "webhdfs.toml";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Namenode addresses, `host:port;host:port`
    #[serde(default)]
    pub addr: String,

    /// Prefix prepended to every remote path
    #[serde(default)]
    pub base_path: String,

    /// Talk https to the namenodes
    #[serde(default)]
    pub use_https: bool,

    /// Value sent as `user.name`; empty means the local process owner
    #[serde(default)]
    pub user: String,

    #[serde(default = "default_timeout", with = "duration_str")]
    pub connect_timeout: Duration,

    #[serde(default = "default_timeout", with = "duration_str")]
    pub response_header_timeout: Duration,

    #[serde(default)]
    pub disable_keep_alives: bool,

    #[serde(default = "default_disable_compression")]
    pub disable_compression: bool,

    /// Idle pooled connections kept per namenode/datanode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_idle_conns_per_host: Option<usize>,
}

fn default_timeout() -> Duration {
    Duration::from_secs(17)
}

fn default_disable_compression() -> bool {
    true
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            addr: String::new(),
            base_path: String::new(),
            use_https: false,
            user: String::new(),
            connect_timeout: default_timeout(),
            response_header_timeout: default_timeout(),
            disable_keep_alives: false,
            disable_compression: default_disable_compression(),
            max_idle_conns_per_host: None,
        }
    }
}

impl Configuration {
    pub fn new(addr_list: &str, base_path: &str, user: &str, https: bool) -> Self {
        Self {
            addr: addr_list.to_string(),
            base_path: base_path.to_string(),
            use_https: https,
            user: user.to_string(),
            ..Default::default()
        }
    }

    /// Load from `$WEBHDFS_CONFIG` (or `webhdfs.toml`), then `WEBHDFS_*` env vars.
    ///
    /// A missing file is not an error; env vars override file values, e.g.
    /// `WEBHDFS_ADDR="nn1:50070;nn2:50070"` or `WEBHDFS_CONNECT_TIMEOUT=5s`.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&path).required(false))
            .add_source(config::Environment::with_prefix("WEBHDFS"))
            .build()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Parse a TOML document (used by tests and embedders with their own files)
    pub fn from_toml(doc: &str) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(doc, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Namenode addresses in configured order, blanks dropped
    pub fn endpoints(&self) -> Vec<String> {
        self.addr
            .split(';')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn scheme(&self) -> &'static str {
        if self.use_https {
            "https"
        } else {
            "http"
        }
    }

    /// The identity to assert: configured user, else the process owner
    pub fn resolve_user(&self) -> String {
        if self.user.trim().is_empty() {
            current_user()
        } else {
            self.user.clone()
        }
    }
}

mod duration_str {
    use super::{format_duration, parse_duration};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_duration(*d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(d)?;
        parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let conf = Configuration::new("localhost:50070", "", "webuser", false);
        assert_eq!(conf.connect_timeout, Duration::from_secs(17));
        assert_eq!(conf.response_header_timeout, Duration::from_secs(17));
        assert!(conf.disable_compression);
        assert!(!conf.disable_keep_alives);
        assert_eq!(conf.scheme(), "http");
    }

    #[test]
    fn test_endpoints_split() {
        let conf = Configuration::new("nn1:50070; nn2:50070;;", "", "", true);
        assert_eq!(conf.endpoints(), vec!["nn1:50070", "nn2:50070"]);
        assert_eq!(conf.scheme(), "https");
    }

    #[test]
    fn test_resolve_user() {
        let conf = Configuration::new("nn:50070", "", "hdfs", false);
        assert_eq!(conf.resolve_user(), "hdfs");

        let anonymous = Configuration::new("nn:50070", "", "", false);
        assert!(!anonymous.resolve_user().is_empty());
    }

    #[test]
    fn test_from_toml() {
        let conf = Configuration::from_toml(
            r#"
            addr = "nn1:50070;nn2:50070"
            base_path = "/data"
            user = "etl"
            connect_timeout = "5s"
            response_header_timeout = "750ms"
            max_idle_conns_per_host = 4
            "#,
        )
        .unwrap();

        assert_eq!(conf.endpoints().len(), 2);
        assert_eq!(conf.base_path, "/data");
        assert_eq!(conf.connect_timeout, Duration::from_secs(5));
        assert_eq!(conf.response_header_timeout, Duration::from_millis(750));
        assert_eq!(conf.max_idle_conns_per_host, Some(4));
        assert!(conf.disable_compression);
    }

    #[test]
    fn test_from_toml_bad_duration() {
        let result = Configuration::from_toml("addr = \"nn:1\"\nconnect_timeout = \"soon\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let conf = Configuration::new("nn:50070", "/base", "web", false);
        let json = serde_json::to_string(&conf).unwrap();
        assert!(json.contains("\"connect_timeout\":\"17s\""));
        let back: Configuration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, conf);
    }
}
