use std::fmt;

use anyhow::{Result, bail};

/// Externally assigned product identifier, derived from the href of a
/// `"product"` link.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Takes the final path segment of the link href, so both
    /// `/products/42` and `http://catalog/products/42` yield `42`.
    pub fn from_href(href: &str) -> Result<Self> {
        let id = href
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();

        if id.is_empty() || id.contains(':') {
            bail!("no product id in link href: {href}");
        }

        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl fmt::Debug for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductId({})", self.0)
    }
}
