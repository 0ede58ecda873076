use unicode_normalization::UnicodeNormalization;

/// Normalize text scraped from the manifest to NFC and collapse whitespace.
///
/// Manifest cells wrap across source lines; the purpose text reads better
/// as a single line in the console output.
pub fn normalize_text(input: &str) -> String {
    let nfc: String = input.nfc().collect();
    nfc.split_whitespace().collect::<Vec<_>>().join(" ")
}
