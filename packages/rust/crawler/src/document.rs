//! Parsed document wrapper with text and attribute accessors.

use scraper::{ElementRef, Html, Selector};

use dinodir_shared::{DinoDirError, Result};

/// A parsed HTML document.
///
/// Not `Send`: parse and query it synchronously, never across an `.await`.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse raw document text. Empty or whitespace-only bodies are rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(DinoDirError::parse("document body is empty"));
        }
        Ok(Self {
            html: Html::parse_document(raw),
        })
    }

    /// All elements matching `selector`, in document order.
    pub fn select<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html.select(selector)
    }

    /// Concatenated text of every matching element (empty if none match).
    pub fn text(&self, selector: &Selector) -> String {
        self.select(selector).map(element_text).collect()
    }

    /// Text of the first matching element.
    pub fn first_text(&self, selector: &Selector) -> Option<String> {
        self.select(selector).next().map(element_text)
    }

    /// Attribute `name` of the first matching element.
    pub fn attr(&self, selector: &Selector, name: &str) -> Option<String> {
        self.select(selector)
            .next()
            .and_then(|el| el.value().attr(name))
            .map(String::from)
    }

    /// Whether anything matches `selector`.
    pub fn exists(&self, selector: &Selector) -> bool {
        self.select(selector).next().is_some()
    }
}

/// All descendant text of an element, unmodified.
pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Compile a selector known at build time.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}
