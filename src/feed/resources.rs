use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links(HashMap<String, Link>);

impl Links {
    pub fn get(&self, relation: &str) -> Option<&Link> {
        self.0.get(relation)
    }
}

/// One decoded event resource: the payload plus its hypermedia links.
#[derive(Debug, Clone, Deserialize)]
pub struct EventResource<T> {
    #[serde(flatten)]
    pub content: T,

    #[serde(rename = "_links", default)]
    pub links: Links,
}

impl<T> EventResource<T> {
    pub fn link(&self, relation: &str) -> Option<&str> {
        self.links.get(relation).map(|link| link.href.as_str())
    }
}

/// Spring-HATEOAS-shaped collection. The embedded key is named after the
/// resource type upstream, so the decoder takes whatever single collection
/// is present rather than hard-coding the name.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct HalCollection<T> {
    #[serde(rename = "_embedded", default)]
    embedded: HashMap<String, Vec<EventResource<T>>>,
}

impl<T> HalCollection<T> {
    /// Events in page order; an absent `_embedded` is an empty page.
    pub fn into_events(self) -> Vec<EventResource<T>> {
        self.embedded.into_values().flatten().collect()
    }
}

/// Payload of a catalog "product added" event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAdded {
    pub product: Product,
    pub publication_date: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub description: String,
    pub price: Decimal,
}

/// Payload of an orders "order completed" event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCompleted {
    pub publication_date: NaiveDateTime,
}
