use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::discovery::RemoteResource;
use crate::feed::resources::{EventResource, HalCollection, Links, OrderCompleted, ProductAdded};
use crate::feed::{EventFeed, ORDER_COMPLETED, PRODUCTS_ADDED};

/// Feed client that reaches each stream's event collection by following the
/// configured link relation from the upstream service root, then fetches
/// the page published after the given cursor position.
#[derive(Debug)]
pub struct HalEventFeed {
    http: reqwest::Client,
    streams: HashMap<&'static str, RemoteResource>,
}

impl Default for HalEventFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl HalEventFeed {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            streams: HashMap::new(),
        }
    }

    /// Registers the upstream resource serving `stream`. Called once per
    /// stream at startup; the registry is static afterwards.
    pub fn register(mut self, stream: &'static str, resource: RemoteResource) -> Self {
        self.streams.insert(stream, resource);
        self
    }

    async fn events_url(&self, stream: &str) -> Result<Url> {
        let resource = self
            .streams
            .get(stream)
            .ok_or_else(|| anyhow!("no upstream registered for stream {stream}"))?;

        let root = resource.root_url()?;
        let body: RootResource = self
            .http
            .get(root.clone())
            .send()
            .await
            .with_context(|| format!("GET {root} failed"))?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("decode root resource of {} failed", resource.service()))?;

        let link = body.links.get(resource.relation()).ok_or_else(|| {
            anyhow!(
                "service {} exposes no \"{}\" link",
                resource.service(),
                resource.relation()
            )
        })?;

        root.join(&link.href)
            .with_context(|| format!("invalid \"{}\" link href: {}", resource.relation(), link.href))
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        stream: &str,
        since: Option<NaiveDateTime>,
    ) -> Result<Vec<EventResource<T>>> {
        let mut url = self.events_url(stream).await?;

        if let Some(since) = since {
            url.query_pairs_mut()
                .append_pair("since", &since.format("%Y-%m-%dT%H:%M:%S").to_string());
        }

        let page: HalCollection<T> = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("decode {stream} page failed"))?;

        Ok(page.into_events())
    }
}

#[derive(Debug, Deserialize)]
struct RootResource {
    #[serde(rename = "_links", default)]
    links: Links,
}

#[async_trait]
impl EventFeed for HalEventFeed {
    async fn fetch_product_added(
        &self,
        since: Option<NaiveDateTime>,
    ) -> Result<Vec<EventResource<ProductAdded>>> {
        self.fetch_page(PRODUCTS_ADDED, since).await
    }

    async fn fetch_order_completed(
        &self,
        since: Option<NaiveDateTime>,
    ) -> Result<Vec<EventResource<OrderCompleted>>> {
        self.fetch_page(ORDER_COMPLETED, since).await
    }
}
