//! Ready-made display filters.

use crate::parser::schema::TraceEntry;

/// Rewrite `.module.exports.` in call-site labels to ` - `
///
/// `Object.module.exports.run` reads as `Object - run`.
pub fn module_exports(mut entry: TraceEntry, _index: usize) -> TraceEntry {
    if let Some(frame) = entry.as_frame_mut() {
        if frame.call_site_label.contains(".module.exports.") {
            frame.call_site_label = frame.call_site_label.replace(".module.exports.", " - ");
        }
    }
    entry
}
