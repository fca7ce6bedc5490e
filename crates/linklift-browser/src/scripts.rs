//! Embedded page scripts.
//!
//! Each script evaluates to a single expression via `Runtime.evaluate`.
//! Parameterized scripts are function expressions; the loaders here append
//! the call with JSON-encoded arguments.

/// Capture everything the pattern extractor searches.
pub(crate) fn snapshot_script() -> String {
    include_str!("js/snapshot.js").to_string()
}

/// Enumerate candidate controls within a scope and refresh the activation
/// registry. `scope_json` is the serialized scope object.
pub(crate) fn controls_script(scope_json: &str) -> String {
    format!("({})({})", include_str!("js/controls.js"), scope_json)
}

/// Activate a registered control. `args_json` carries the handle and
/// gesture kind.
pub(crate) fn activate_script(args_json: &str) -> String {
    format!("({})({})", include_str!("js/activate.js"), args_json)
}

/// Install the structural-mutation observer (idempotent).
pub(crate) fn observer_script() -> String {
    include_str!("js/observer.js").to_string()
}

/// Scrape album tiles from the listing page.
pub(crate) fn albums_script() -> String {
    include_str!("js/albums.js").to_string()
}
