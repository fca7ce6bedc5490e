//! # LinkLift Navigator
//!
//! Walks the share-disclosure UI of one rendering surface to a minted link,
//! and scans the shared-listing page to resolve many targets at once. All
//! timing follows the fixed contract in `linklift_protocols::limits`; the
//! surfaces themselves come from the caller and are never torn down here.

pub mod navigator;
pub mod probes;
pub mod scanner;
pub mod state;

pub use navigator::{DialogNavigator, extract_existing};
pub use scanner::ListingScanner;
pub use state::NavigatorState;
