use crate::entry::TestEntry;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Suffix of the input resources in the manifest (`js09-in.jsonld`).
pub const INPUT_SUFFIX: &str = "-in.jsonld";
/// Suffix of the expected-output resources in the manifest (`js09-out.nq`).
pub const OUTPUT_SUFFIX: &str = "-out.nq";
/// Prefix added to every fixture file name.
pub const FIXTURE_PREFIX: &str = "t";
/// Extension of every fixture file.
pub const FIXTURE_EXTENSION: &str = ".json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("link has no file name: {0}")]
    EmptyBaseName(String),

    #[error("link '{link}' does not end with '{suffix}'")]
    UnexpectedSuffix { link: String, suffix: String },
}

/// The two fixture files written for one test entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePair {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
}

impl FixturePair {
    /// Derive both fixture paths from an entry's links.
    pub fn for_entry(
        entry: &TestEntry,
        input_dir: &Path,
        output_dir: &Path,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            input_file: input_dir.join(fixture_name(&entry.input_link, INPUT_SUFFIX)?),
            output_file: output_dir.join(fixture_name(&entry.output_link, OUTPUT_SUFFIX)?),
        })
    }
}

/// Base name of a link: the last path segment, without query or fragment.
pub fn base_name(link: &str) -> &str {
    let end = link.find(['?', '#']).unwrap_or(link.len());
    let path = &link[..end];
    path.rsplit('/').next().unwrap_or(path)
}

/// Fixture file name for a resource link: `toRdf/js09-in.jsonld` -> `tjs09.json`.
pub fn fixture_name(link: &str, suffix: &str) -> Result<String, ModelError> {
    let name = base_name(link);
    if name.is_empty() {
        return Err(ModelError::EmptyBaseName(link.to_string()));
    }

    let stem = name
        .strip_suffix(suffix)
        .ok_or_else(|| ModelError::UnexpectedSuffix {
            link: link.to_string(),
            suffix: suffix.to_string(),
        })?;

    Ok(format!("{FIXTURE_PREFIX}{stem}{FIXTURE_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> TestEntry {
        TestEntry {
            id: "#tjs09".into(),
            purpose: "Bool is preserved".into(),
            input_link: "toRdf/js09-in.jsonld".into(),
            output_link: "toRdf/js09-out.nq".into(),
        }
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("toRdf/js09-in.jsonld"), "js09-in.jsonld");
        assert_eq!(base_name("js09-in.jsonld"), "js09-in.jsonld");
        assert_eq!(
            base_name("https://example.org/tests/toRdf/js10-out.nq?raw=1#top"),
            "js10-out.nq"
        );
        assert_eq!(base_name("toRdf/"), "");
    }

    #[test]
    fn test_fixture_name() {
        assert_eq!(
            fixture_name("toRdf/js09-in.jsonld", INPUT_SUFFIX).unwrap(),
            "tjs09.json"
        );
        assert_eq!(
            fixture_name("toRdf/js13-out.nq", OUTPUT_SUFFIX).unwrap(),
            "tjs13.json"
        );
    }

    #[test]
    fn test_fixture_name_rejects_unexpected_links() {
        assert_eq!(
            fixture_name("toRdf/", INPUT_SUFFIX),
            Err(ModelError::EmptyBaseName("toRdf/".into()))
        );
        assert!(matches!(
            fixture_name("toRdf/js09-out.nq", INPUT_SUFFIX),
            Err(ModelError::UnexpectedSuffix { .. })
        ));
    }

    #[test]
    fn test_fixture_pair_for_entry() {
        let pair = FixturePair::for_entry(
            &entry(),
            Path::new("../test/fixtures/input"),
            Path::new("../test/fixtures/output"),
        )
        .unwrap();

        assert_eq!(pair.input_file, PathBuf::from("../test/fixtures/input/tjs09.json"));
        assert_eq!(pair.output_file, PathBuf::from("../test/fixtures/output/tjs09.json"));
    }
}
