// ABOUTME: Extraction of article fields from a parsed document.
// ABOUTME: Groups the platform table, the selector cache, selector helpers and the field extractor.

//! Content extraction module.
//!
//! Submodules:
//! - `platforms`: built-in per-site selector profiles and host resolution.
//! - `compiled`: process-wide cache of compiled selectors.
//! - `select`: selector helpers shared by extraction and cleaning.
//! - `article`: title, description and content extraction.

pub mod article;
pub mod compiled;
pub mod platforms;
pub mod select;
