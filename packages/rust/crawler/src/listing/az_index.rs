//! A–Z index layout: one `.dinosaurfilter--dinosaur` item per entry.

use std::sync::LazyLock;

use scraper::Selector;
use tracing::debug;

use dinodir_shared::{EntityReference, clean_text};

use super::ListingAdapter;
use crate::document::{Document, element_text, selector};

static ITEM: LazyLock<Selector> = LazyLock::new(|| selector(".dinosaurfilter--dinosaur"));
static NAME: LazyLock<Selector> =
    LazyLock::new(|| selector("a .dinosaurfilter--name-unhyphenated"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));

/// Reads the dedicated A–Z listing page.
pub struct AzIndexAdapter;

impl ListingAdapter for AzIndexAdapter {
    fn extract(&self, doc: &Document) -> Vec<EntityReference> {
        let mut entries = Vec::new();

        for item in doc.select(&ITEM) {
            let name: String = item.select(&NAME).map(element_text).collect();
            let link = item
                .select(&LINK)
                .next()
                .and_then(|a| a.value().attr("href"));

            match link {
                Some(link) if !link.is_empty() => {
                    entries.push(EntityReference::new(clean_text(&name), link));
                }
                _ => debug!(name = %clean_text(&name), "listing item without link, skipping"),
            }
        }

        entries
    }

    fn name(&self) -> &str {
        "az-index"
    }
}
