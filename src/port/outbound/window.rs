//! Browser window port used by the push notification click handler.

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

/// A controllable window of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClient {
    pub id: String,
    pub url: Url,
    pub focused: bool,
}

#[async_trait]
pub trait WindowHost: Send + Sync {
    /// Open windows, including ones not yet controlled by the worker.
    async fn windows(&self) -> Result<Vec<WindowClient>>;

    async fn focus(&self, id: &str) -> Result<()>;

    async fn navigate(&self, id: &str, url: &Url) -> Result<()>;

    async fn open(&self, url: &Url) -> Result<()>;
}
