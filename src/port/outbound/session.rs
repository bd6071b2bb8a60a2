//! Session lookup port.

use async_trait::async_trait;

use crate::domain::viewer::Viewer;
use crate::error::Result;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Viewer for an unexpired session token, or `None`.
    async fn resolve(&self, token: &str) -> Result<Option<Viewer>>;
}
