// string_width.rs - Column width of whole strings.
//
// Each grapheme cluster is as wide as its first codepoint with a nonzero
// width. A variation selector right after that codepoint overrides it:
// VS15 forces text presentation (1), VS16 emoji presentation (2).

use crate::engine::WidthEngine;
use crate::table::CompiledTable;
use crate::width::{WidthOptions, VARIATION_SELECTOR_15, VARIATION_SELECTOR_16};

pub(crate) fn measure(engine: &WidthEngine, text: &str, options: WidthOptions) -> usize {
    if text.is_empty() {
        return 0;
    }
    let table = engine.width_table(options);

    // Every ASCII byte is its own cluster apart from CR LF, and both of
    // those are zero width, so per-byte lookups give the same total.
    if text.is_ascii() {
        let total: isize = text.bytes().map(|b| table.get(b as u32) as isize).sum();
        return total.max(0) as usize;
    }

    let total: isize = engine
        .graphemes(text)
        .map(|cluster| cluster_width(table, cluster.text) as isize)
        .sum();
    total.max(0) as usize
}

/// Width of one grapheme cluster; -1 only for a lone backspace.
pub fn cluster_width(table: &CompiledTable<i8>, cluster: &str) -> i32 {
    let mut chars = cluster.chars();
    while let Some(c) = chars.next() {
        let width = table.get(c as u32);
        if width == 0 {
            continue;
        }
        return match chars.next().map(|next| next as u32) {
            Some(VARIATION_SELECTOR_15) => 1,
            Some(VARIATION_SELECTOR_16) => 2,
            _ => width as i32,
        };
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> WidthEngine {
        WidthEngine::embedded().unwrap()
    }

    #[test]
    fn ascii_fast_path_matches_cluster_path() {
        let engine = engine();
        let opts = WidthOptions::default();
        let table = engine.width_table(opts);
        for s in ["hello", "a\x08b", "\r\n", "tab\there", "\x1b[31m"] {
            let slow: i32 = engine.graphemes(s).map(|c| cluster_width(table, c.text)).sum();
            assert_eq!(measure(&engine, s, opts), slow.max(0) as usize, "{s:?}");
        }
    }

    #[test]
    fn variation_selectors() {
        let engine = engine();
        let table = engine.width_table(WidthOptions::default());
        // U+231A WATCH is emoji-presentation wide; VS15 narrows it.
        assert_eq!(cluster_width(table, "\u{231A}"), 2);
        assert_eq!(cluster_width(table, "\u{231A}\u{FE0E}"), 1);
        // U+2764 HEAVY BLACK HEART is text-presentation; VS16 widens it.
        assert_eq!(cluster_width(table, "\u{2764}"), 1);
        assert_eq!(cluster_width(table, "\u{2764}\u{FE0F}"), 2);
    }

    #[test]
    fn zero_width_prefix_is_skipped() {
        let engine = engine();
        let table = engine.width_table(WidthOptions::default());
        assert_eq!(cluster_width(table, "\u{200B}"), 0);
        assert_eq!(cluster_width(table, "\u{0300}\u{0301}"), 0);
        assert_eq!(cluster_width(table, "\u{200D}\u{1F600}"), 2);
    }

    #[test]
    fn backspace_saturates() {
        let engine = engine();
        let opts = WidthOptions::default();
        assert_eq!(measure(&engine, "a\x08\x08", opts), 0);
        assert_eq!(measure(&engine, "\u{4E00}\x08", opts), 1);
    }
}
