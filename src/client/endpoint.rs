//! Namenode endpoint pool
//!
//! An ordered ring of `host:port` strings. The front entry is the preferred
//! namenode; a failed request rotates it to the back. Rotation never drops
//! an endpoint.

use crate::{Error, Result};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPool {
    endpoints: VecDeque<String>,
}

impl EndpointPool {
    /// Build a pool; at least one endpoint is required.
    pub fn new<I, S>(endpoints: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let endpoints: VecDeque<String> = endpoints.into_iter().map(Into::into).collect();
        if endpoints.is_empty() {
            return Err(Error::InvalidConfig(
                "no namenode address configured".into(),
            ));
        }
        Ok(Self { endpoints })
    }

    /// Parse a `host:port;host:port` list.
    pub fn parse(addr_list: &str) -> Result<Self> {
        Self::new(
            addr_list
                .split(';')
                .map(str::trim)
                .filter(|a| !a.is_empty()),
        )
    }

    /// The namenode the next request goes to.
    pub fn current(&self) -> Result<&str> {
        self.endpoints
            .front()
            .map(String::as_str)
            .ok_or_else(|| Error::InvalidConfig("no available namenode address".into()))
    }

    /// Move the front endpoint to the back.
    pub fn rotate(&mut self) {
        self.endpoints.rotate_left(1.min(self.endpoints.len()));
    }

    pub fn size(&self) -> usize {
        self.endpoints.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.endpoints.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let pool = EndpointPool::parse("nn1:50070;nn2:50070; nn3:50070 ;").unwrap();
        assert_eq!(pool.size(), 3);
        assert_eq!(pool.current().unwrap(), "nn1:50070");
        assert_eq!(
            pool.iter().collect::<Vec<_>>(),
            vec!["nn1:50070", "nn2:50070", "nn3:50070"]
        );
    }

    #[test]
    fn test_empty_pool_rejected() {
        assert!(matches!(
            EndpointPool::parse(""),
            Err(Error::InvalidConfig(_))
        ));
        assert!(EndpointPool::parse(" ; ;").is_err());
        assert!(EndpointPool::new(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_rotate_cycles_without_loss() {
        let mut pool = EndpointPool::new(["a:1", "b:2", "c:3"]).unwrap();

        pool.rotate();
        assert_eq!(pool.current().unwrap(), "b:2");
        pool.rotate();
        assert_eq!(pool.current().unwrap(), "c:3");
        pool.rotate();
        assert_eq!(pool.current().unwrap(), "a:1");
        assert_eq!(pool.size(), 3);
    }

    #[test]
    fn test_rotate_single() {
        let mut pool = EndpointPool::new(["only:1"]).unwrap();
        pool.rotate();
        assert_eq!(pool.current().unwrap(), "only:1");
        assert_eq!(pool.size(), 1);
    }
}
