//! Best-effort pretty-printing of JSON payloads.

use serde_json::Value;

use crate::http::render::Transcript;

/// Render `raw` as indented JSON, or fall back to the raw bytes with a
/// diagnostic line. Never fails; parse problems are cosmetic.
pub fn format_json(out: &mut Transcript, raw: &[u8]) {
    let value: Value = match serde_json::from_slice(raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(error = %err, len = raw.len(), "body is not valid JSON");
            out.line(format_args!("Unable to parse JSON: {err}"));
            out.newline();
            out.raw(raw);
            out.newline();
            return;
        }
    };

    // Object keys come back in lexicographic order (BTreeMap-backed Value).
    match serde_json::to_vec_pretty(&value) {
        Ok(pretty) => {
            out.raw(&pretty);
            out.newline();
        }
        Err(err) => {
            out.line(format_args!("Unable to re-marshal JSON: {err}"));
            out.raw(raw);
            out.newline();
        }
    }
}
