//! Span arithmetic for highlight rendering
//!
//! Matchers produce byte spans into a document; these helpers normalize
//! overlapping and adjacent spans and turn a span set into the alternating
//! run sequence renderers consume.

use lodestone_core::{CharSpan, HighlightRun};

/// Sort spans and merge every overlapping or adjacent pair.
///
/// Two spans merge when the second starts no later than one byte past the
/// end of the first, so `3..7` together with `8..12` becomes `3..12` and the
/// single separating byte is absorbed. The result is sorted, pairwise
/// disjoint, and separated by at least two bytes; merging an already merged
/// set returns it unchanged.
pub fn merge_spans(mut spans: Vec<CharSpan>) -> Vec<CharSpan> {
    spans.sort();
    let mut merged: Vec<CharSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end + 1 => {
                last.end = last.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Partition `target` into alternating plain and highlighted runs.
///
/// `spans` must be sorted, disjoint, and computed against `target` (the
/// shape [`merge_spans`] returns), so every offset lies on a character
/// boundary. Run texts concatenate back to `target` exactly: a document
/// with no spans comes back as one plain run, and only an empty document
/// produces no runs at all. Zero-length spans are skipped.
pub fn spans_to_runs(target: &str, spans: &[CharSpan]) -> Vec<HighlightRun> {
    let mut runs = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;
    for span in spans {
        if span.is_empty() {
            continue;
        }
        if span.start > cursor {
            runs.push(HighlightRun::plain(&target[cursor..span.start]));
        }
        runs.push(HighlightRun::highlighted(&target[span.start..span.end]));
        cursor = span.end;
    }
    if cursor < target.len() {
        runs.push(HighlightRun::plain(&target[cursor..]));
    }
    runs
}
