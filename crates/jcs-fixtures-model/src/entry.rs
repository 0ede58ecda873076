/// Manifest ids of the JSON-literal tests the JCS suite consumes.
pub const JCS_TESTS: [&str; 5] = ["#tjs09", "#tjs10", "#tjs11", "#tjs12", "#tjs13"];

/// Whether a manifest id belongs to the fixed allowlist.
pub fn is_allowlisted(id: &str) -> bool {
    JCS_TESTS.contains(&id)
}

/// One accepted test-case description from the manifest page.
///
/// Only built once every field has been found, so all four are always present.
/// Links are kept exactly as written in the page (usually relative to the
/// manifest's base URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestEntry {
    /// Manifest anchor id, e.g. `#tjs09`.
    pub id: String,
    /// Human-readable purpose line.
    pub purpose: String,
    /// Link to the JSON-LD input document (`*-in.jsonld`).
    pub input_link: String,
    /// Link to the expected N-Quads output (`*-out.nq`).
    pub output_link: String,
}
