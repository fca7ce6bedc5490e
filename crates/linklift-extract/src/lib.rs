//! # LinkLift Extract
//!
//! The pattern extractor and proximity matcher: pure text mining over
//! captured document content. No DOM, no async, no I/O.

pub mod pattern;
pub mod proximity;

pub use pattern::extract_link;
pub use proximity::{BlobMatcher, Occurrence, match_occurrences};
