use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write the input fixture: pretty JSON with two-space indent, UTF-8 kept
/// unescaped, trailing newline.
///
/// Key order is kept. Numbers go through `f64`, so `4.50` is written `4.5`
/// and `1.5E3` as `1500.0`, the same as Python's `json.dump`.
///
/// The target directory must already exist. Existing files are overwritten.
pub fn write_input_fixture(path: &Path, value: &serde_json::Value) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(path, &json)
        .with_context(|| format!("Failed to write input fixture {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = json.len(), "Wrote input fixture");
    Ok(())
}

/// Write the output fixture: the unescaped JSON literal, verbatim.
pub fn write_output_fixture(path: &Path, literal: &str) -> Result<()> {
    fs::write(path, literal)
        .with_context(|| format!("Failed to write output fixture {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = literal.len(), "Wrote output fixture");
    Ok(())
}
