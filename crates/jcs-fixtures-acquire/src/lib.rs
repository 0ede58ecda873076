use anyhow::{Context, Result};
use jcs_fixtures_model::{FixturePair, TestEntry};
use reqwest::Url;
use serde::Deserialize;
use std::path::PathBuf;

pub mod fetch;
pub mod manifest;
pub mod normalize;
pub mod output;

pub use fetch::{Fetch, HttpFetcher};

pub const BASE_URL: &str = "https://w3c.github.io/json-ld-api/tests/";
pub const MANIFEST: &str = "toRdf-manifest";
pub const INPUT_DIR: &str = "../test/fixtures/input/";
pub const OUTPUT_DIR: &str = "../test/fixtures/output/";

/// Where to scrape from and where to write to.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL that the manifest path and every resource link resolve against.
    pub base_url: String,
    /// Manifest page path, relative to `base_url`.
    pub manifest: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            manifest: MANIFEST.to_string(),
            input_dir: PathBuf::from(INPUT_DIR),
            output_dir: PathBuf::from(OUTPUT_DIR),
        }
    }
}

/// What one run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub entries_seen: usize,
    pub entries_accepted: usize,
    pub inputs_written: usize,
    pub outputs_written: usize,
}

/// The JSON-LD input documents carry the test value under `e`.
#[derive(Deserialize)]
struct InputDocument {
    e: serde_json::Value,
}

/// Scrape the manifest and write one fixture pair per accepted entry.
///
/// Fetches run one after another. Anything that goes wrong with a single
/// entry (missing page, bad JSON, no JSON literal) skips that entry or its
/// output file; only filesystem errors are returned.
pub async fn acquire<F: Fetch>(fetcher: &F, settings: &Settings) -> Result<RunReport> {
    let base = Url::parse(&settings.base_url)
        .with_context(|| format!("Invalid base URL: {}", settings.base_url))?;
    let manifest_url = base
        .join(&settings.manifest)
        .with_context(|| format!("Invalid manifest path: {}", settings.manifest))?;

    tracing::info!(url = %manifest_url, "Fetching test manifest");
    let Some(html) = fetcher.get_text(&manifest_url).await else {
        tracing::warn!(url = %manifest_url, "Manifest unavailable, nothing written");
        return Ok(RunReport::default());
    };
    tracing::info!(bytes = html.len(), "Received HTML");

    let scan = manifest::scan(&html);
    let mut report = RunReport {
        entries_seen: scan.seen,
        entries_accepted: scan.entries.len(),
        ..RunReport::default()
    };

    for entry in &scan.entries {
        write_entry(fetcher, &base, entry, settings, &mut report).await?;
    }

    tracing::info!(
        seen = report.entries_seen,
        accepted = report.entries_accepted,
        inputs = report.inputs_written,
        outputs = report.outputs_written,
        "Done"
    );
    Ok(report)
}

async fn write_entry<F: Fetch>(
    fetcher: &F,
    base: &Url,
    entry: &TestEntry,
    settings: &Settings,
    report: &mut RunReport,
) -> Result<()> {
    let pair = match FixturePair::for_entry(entry, &settings.input_dir, &settings.output_dir) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::warn!(id = %entry.id, error = %e, "Skipping entry");
            return Ok(());
        }
    };

    let Some(input) = fetch_resource(fetcher, base, &entry.input_link).await else {
        tracing::warn!(id = %entry.id, link = %entry.input_link, "Input unavailable, skipping entry");
        return Ok(());
    };
    let document: InputDocument = match serde_json::from_str(&input) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(id = %entry.id, error = %e, "Input is not a JSON-LD test document, skipping entry");
            return Ok(());
        }
    };
    output::write_input_fixture(&pair.input_file, &document.e)?;
    report.inputs_written += 1;

    let Some(nquads) = fetch_resource(fetcher, base, &entry.output_link).await else {
        tracing::warn!(id = %entry.id, link = %entry.output_link, "Expected output unavailable");
        return Ok(());
    };
    match jcs_fixtures_nquads::extract_json_literal(&nquads) {
        Ok(Some(literal)) => {
            output::write_output_fixture(&pair.output_file, &literal)?;
            report.outputs_written += 1;
        }
        Ok(None) => {
            tracing::warn!(id = %entry.id, "No rdf:JSON literal in expected output");
        }
        Err(e) => {
            tracing::warn!(id = %entry.id, error = %e, "Could not unescape rdf:JSON literal");
        }
    }

    Ok(())
}

async fn fetch_resource<F: Fetch>(fetcher: &F, base: &Url, link: &str) -> Option<String> {
    let url = match base.join(link) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(link = %link, error = %e, "Unresolvable link");
            return None;
        }
    };
    tracing::debug!(url = %url, "Fetching resource");
    fetcher.get_text(&url).await
}
