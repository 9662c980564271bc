//! Canonical default values shared by the editor and the headless client.

/// Evaluation service base URL (the bundled editor server listens here).
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:32123";
/// Path of the evaluation route, joined onto the endpoint.
pub const EVALUATE_PATH: &str = "/evaluate";
/// Inserted in place of a focus-shifting Tab: four non-breaking spaces.
pub const TAB_TOKEN: &str = "\u{a0}\u{a0}\u{a0}\u{a0}";
