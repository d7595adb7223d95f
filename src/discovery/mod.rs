use anyhow::{Context, Result};
use url::Url;

/// Static descriptor for an upstream service: where its root lives and which
/// link relation leads from there to the event collection. Configured once
/// at startup, immutable after.
#[derive(Debug, Clone)]
pub struct RemoteResource {
    service: String,
    host: String,
    port: u16,
    secure: bool,
    relation: String,
}

impl RemoteResource {
    pub fn new(
        service: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        secure: bool,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            host: host.into(),
            port,
            secure,
            relation: relation.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn root_url(&self) -> Result<Url> {
        let scheme = if self.secure { "https" } else { "http" };

        Url::parse(&format!("{scheme}://{}:{}/", self.host, self.port))
            .with_context(|| format!("invalid root url for service {}", self.service))
    }
}
