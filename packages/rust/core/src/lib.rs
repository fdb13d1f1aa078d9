//! Pipeline orchestration for dinodir.
//!
//! This crate ties listing and detail extraction together into the two public
//! workflows: list-only and list-plus-enrich.

pub mod enrichment;
pub mod pipeline;

pub use enrichment::{EnrichmentProgress, SilentProgress, enrich};
pub use pipeline::Directory;
