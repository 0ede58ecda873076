use crate::normalize;
use jcs_fixtures_model::{is_allowlisted, TestEntry};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static ENTRY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("dl.entry").expect("valid selector"));
static LABEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("dt").expect("valid selector"));
static VALUE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("dd").expect("valid selector"));
static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

/// Result of scanning a manifest page.
#[derive(Debug, Default)]
pub struct ManifestScan {
    /// Number of `dl.entry` blocks on the page.
    pub seen: usize,
    /// Allowlisted entries with every field present, in document order.
    pub entries: Vec<TestEntry>,
}

/// Parse a manifest page and keep the allowlisted, complete entries.
pub fn scan(html: &str) -> ManifestScan {
    let document = Html::parse_document(html);
    let nodes = entry_nodes(&document);

    let entries: Vec<TestEntry> = nodes.iter().copied().filter_map(parse_entry).collect();
    tracing::info!(seen = nodes.len(), accepted = entries.len(), "Scanned manifest entries");

    ManifestScan {
        seen: nodes.len(),
        entries,
    }
}

/// All test-case description blocks (`<dl class="entry">`), in document order.
pub fn entry_nodes(document: &Html) -> Vec<ElementRef<'_>> {
    document.select(&ENTRY).collect()
}

/// Read the `dt`/`dd` pairs of one entry block.
///
/// Returns `None` as soon as an `id` outside the allowlist is seen, or at the
/// end if any of id, purpose, input or expect is missing.
pub fn parse_entry(entry: ElementRef<'_>) -> Option<TestEntry> {
    let mut id = None;
    let mut purpose = None;
    let mut input_link = None;
    let mut output_link = None;

    for (dt, dd) in entry.select(&LABEL).zip(entry.select(&VALUE)) {
        let label = element_text(dt).trim().to_lowercase();
        match label.as_str() {
            "id" => {
                let value = element_text(dd).trim().to_string();
                if !is_allowlisted(&value) {
                    tracing::debug!(id = %value, "Skipping entry outside allowlist");
                    return None;
                }
                id = Some(value);
            }
            "purpose" => {
                // Whitespace-only text still counts; only an empty cell is missing
                let text = element_text(dd);
                purpose = (!text.is_empty()).then(|| normalize::normalize_text(&text));
            }
            "input" => {
                if let Some(href) = first_link(dd) {
                    input_link = Some(href);
                }
            }
            "expect" => {
                if let Some(href) = first_link(dd) {
                    output_link = Some(href);
                }
            }
            _ => {}
        }
    }

    let has = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
    if !(has(&id) && purpose.is_some() && has(&input_link) && has(&output_link)) {
        tracing::debug!(
            id = ?id,
            purpose = purpose.is_some(),
            input = has(&input_link),
            expect = has(&output_link),
            "Skipping incomplete entry"
        );
        return None;
    }

    let entry = TestEntry {
        id: id?,
        purpose: purpose?,
        input_link: input_link?,
        output_link: output_link?,
    };
    tracing::info!("parsed test {}: {}", entry.id, entry.purpose);
    Some(entry)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Target of the first `<a href>` inside an element.
fn first_link(element: ElementRef<'_>) -> Option<String> {
    element
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}
