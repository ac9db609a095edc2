// ABOUTME: In-place DOM mutation passes run before field extraction.
// ABOUTME: Noise removal deletes subtrees; image repair rewrites img src attributes.

//! DOM utilities for HTML document manipulation.
//!
//! The parsed document owns every node; these passes only touch it through
//! attribute replacement and subtree deletion.

pub mod cleaners;
pub mod images;
