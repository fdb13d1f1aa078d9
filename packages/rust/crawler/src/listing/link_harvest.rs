//! Fallback layout: harvest detail-page anchors from any page.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

use dinodir_shared::{EntityReference, humanize_slug};

use super::ListingAdapter;
use crate::document::{Document, selector};

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

/// Keeps anchors shaped like `<base path>/<slug>.html` and names them from the slug.
pub struct LinkHarvestAdapter {
    pattern: Regex,
}

impl LinkHarvestAdapter {
    pub fn new(base_path: &str) -> Self {
        let base = regex::escape(base_path.trim_end_matches('/'));
        let pattern = Regex::new(&format!(r"^{base}/([^/]+)\.html$"))
            .unwrap_or_else(|e| panic!("escaped base path must form a valid regex: {e}"));
        Self { pattern }
    }

    /// The slug of `href` if it points at a detail page.
    fn slug<'h>(&self, href: &'h str) -> Option<&'h str> {
        self.pattern
            .captures(href)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

impl ListingAdapter for LinkHarvestAdapter {
    fn extract(&self, doc: &Document) -> Vec<EntityReference> {
        doc.select(&ANCHOR)
            .filter_map(|a| a.value().attr("href"))
            .filter_map(|href| {
                self.slug(href)
                    .map(|slug| EntityReference::new(humanize_slug(slug), href))
            })
            .collect()
    }

    fn name(&self) -> &str {
        "link-harvest"
    }
}
