//! Document access, directory listing, and detail extraction.
//!
//! This crate provides:
//! - [`SourceClient`]: fetches raw documents relative to the source base URL
//! - [`Document`]: parsed HTML with text/attribute accessors
//! - [`listing`]: listing adapters and [`list_references`]
//! - [`detail`]: detail page extraction and [`fetch_detail`]

pub mod client;
pub mod detail;
pub mod document;
pub mod listing;

pub use client::SourceClient;
pub use detail::{detail_path, fetch_detail, format_range, parse_detail};
pub use document::Document;
pub use listing::{
    AzIndexAdapter, LinkHarvestAdapter, ListingAdapter, ListingRegistry, dedup_by_link,
    list_references, parse_listing,
};
