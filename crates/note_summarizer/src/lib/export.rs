/// Render the plain-text export document pairing a note with its summary.
///
/// This is the only persisted artifact format; consumers match on the
/// literal `ORIGINAL NOTE:` and `SUMMARY:` labels.
pub fn export_document(original: &str, summary: &str) -> String {
    format!("ORIGINAL NOTE:\n{original}\n\nSUMMARY:\n{summary}")
}
