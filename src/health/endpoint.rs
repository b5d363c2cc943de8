//! Monitored node endpoint.

use std::fmt;

/// Websocket URL of one monitored node.
///
/// Used both as the probe target and as the `url` label of its gauge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeEndpoint(String);

impl NodeEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeEndpoint {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for NodeEndpoint {
    fn from(url: String) -> Self {
        Self(url)
    }
}
