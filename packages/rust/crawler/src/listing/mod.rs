//! Listing adapters that turn the index document into entity references.
//!
//! Adapters are tried in priority order; the first one that finds any entries
//! wins. The A–Z index layout is preferred, with anchor harvesting as the
//! fallback for when the site structure changes.

mod az_index;
mod link_harvest;

use std::collections::HashSet;

use tracing::{debug, info, instrument, warn};

use dinodir_shared::{EntityReference, Result};

use crate::client::SourceClient;
use crate::document::Document;

pub use az_index::AzIndexAdapter;
pub use link_harvest::LinkHarvestAdapter;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Strategy for extracting directory entries from an index document.
pub trait ListingAdapter: Send + Sync {
    /// Extract references in document order. Duplicates are allowed here.
    fn extract(&self, doc: &Document) -> Vec<EntityReference>;

    /// Human-readable adapter name for tracing.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Holds listing adapters in priority order.
pub struct ListingRegistry {
    adapters: Vec<Box<dyn ListingAdapter>>,
}

impl ListingRegistry {
    /// Registry with the built-in adapters for a source rooted at `base_path`.
    pub fn new(base_path: &str) -> Self {
        Self {
            adapters: vec![
                Box::new(AzIndexAdapter),
                Box::new(LinkHarvestAdapter::new(base_path)),
            ],
        }
    }

    /// Deduplicated references from the first adapter that finds any.
    pub fn list(&self, doc: &Document) -> Vec<EntityReference> {
        for adapter in &self.adapters {
            let found = adapter.extract(doc);
            if !found.is_empty() {
                debug!(adapter = adapter.name(), found = found.len(), "listing adapter matched");
                return dedup_by_link(found);
            }
        }
        warn!("no listing adapter found any entries");
        Vec::new()
    }
}

/// Drop references whose `link` was already seen; first occurrence wins.
pub fn dedup_by_link(references: Vec<EntityReference>) -> Vec<EntityReference> {
    let mut seen = HashSet::new();
    references
        .into_iter()
        .filter(|r| seen.insert(r.link.clone()))
        .collect()
}

/// Parse an index document body into deduplicated references.
pub fn parse_listing(body: &str, base_path: &str) -> Result<Vec<EntityReference>> {
    let doc = Document::parse(body)?;
    Ok(ListingRegistry::new(base_path).list(&doc))
}

/// Fetch the configured index document and list its entries.
#[instrument(skip_all, fields(index = %client.config().index_path))]
pub async fn list_references(client: &SourceClient) -> Result<Vec<EntityReference>> {
    let base_path = client.config().base_path()?;
    let body = client.fetch(&client.config().index_path).await?;
    let references = parse_listing(&body, &base_path)?;

    info!(entries = references.len(), "directory listed");
    Ok(references)
}
