// api_test.rs - Integration tests for the free functions and WidthEngine.

use cellwidth::prelude::*;
use cellwidth::CharacterWidth;

fn narrow() -> WidthOptions {
    WidthOptions::default()
}

fn wide() -> WidthOptions {
    WidthOptions::default().ambiguous_is_narrow(false)
}

// === string_width ===

#[test]
fn empty_string() {
    assert_eq!(string_width("", narrow()), 0);
}

#[test]
fn ascii() {
    assert_eq!(string_width("hello", narrow()), 5);
    assert_eq!(string_width("hello, world!", narrow()), 13);
}

#[test]
fn cjk_is_double() {
    assert_eq!(string_width("你好", narrow()), 4);
    assert_eq!(string_width("日本語テキスト", narrow()), 14);
    assert_eq!(string_width("한국어", narrow()), 6);
}

#[test]
fn combining_marks_add_nothing() {
    assert_eq!(string_width("a\u{0300}", narrow()), 1);
    assert_eq!(string_width("e\u{0301}\u{0300}", narrow()), 1);
}

#[test]
fn conjoining_jamo_cluster() {
    // HIEUH + A + NIEUN, decomposed 한
    assert_eq!(string_width("\u{1112}\u{1161}\u{11AB}", narrow()), 2);
}

#[test]
fn flags() {
    assert_eq!(string_width("🇸🇦", narrow()), 2);
    assert_eq!(string_width("🇯🇵🇸🇦", narrow()), 4);
}

#[test]
fn skin_tone_modifier() {
    assert_eq!(string_width("🏃🏽", narrow()), 2);
    assert_eq!(string_width("🏃", narrow()), 2);
}

#[test]
fn zwj_family() {
    assert_eq!(string_width("👨\u{200D}👩\u{200D}👧\u{200D}👦", narrow()), 2);
}

#[test]
fn variation_selector_16_widens() {
    assert_eq!(string_width("⛹\u{FE0F}", narrow()), 2);
    assert_eq!(string_width("⛹", narrow()), 1);
    assert_eq!(string_width("⛹", wide()), 2);
    assert_eq!(string_width("❤\u{FE0F}", narrow()), 2);
}

#[test]
fn variation_selector_15_narrows() {
    assert_eq!(string_width("⌚\u{FE0E}", narrow()), 1);
    assert_eq!(string_width("⌚", narrow()), 2);
}

#[test]
fn backspace_subtracts() {
    assert_eq!(string_width("abc\x08", narrow()), 2);
    assert_eq!(string_width("\x08", narrow()), 0);
    assert_eq!(string_width("\x08\x08abc", narrow()), 1);
}

#[test]
fn ansi_escape_counting() {
    assert_eq!(string_width("\x1b[31m", narrow()), 4);
    assert_eq!(
        string_width("\x1b[31m", narrow().count_ansi_escape_codes(true)),
        6
    );
    assert_eq!(string_width("a\tb", narrow()), 2);
    assert_eq!(string_width("a\tb", narrow().count_ansi_escape_codes(true)), 4);
}

#[test]
fn line_endings_are_zero() {
    assert_eq!(string_width("a\r\nb\n", narrow()), 2);
}

#[test]
fn ambiguous_follows_option() {
    assert_eq!(string_width("±×÷", narrow()), 3);
    assert_eq!(string_width("±×÷", wide()), 6);
}

#[test]
fn em_dashes() {
    assert_eq!(string_width("\u{2E3A}", narrow()), 2);
    assert_eq!(string_width("\u{2E3B}", narrow()), 3);
}

#[test]
fn long_mixed_text() {
    let line = "status: 完了 ✅ ok ";
    let per_line = string_width(line, narrow());
    let text = line.repeat(40);
    assert_eq!(string_width(&text, narrow()), per_line * 40);
}

// === rune_width / char_width ===

#[test]
fn rune_width_values() {
    assert_eq!(rune_width('A' as u32, narrow()), 1);
    assert_eq!(rune_width(0x4E00, narrow()), 2);
    assert_eq!(rune_width(0x0300, narrow()), 0);
    assert_eq!(rune_width(0x200B, narrow()), 0);
    assert_eq!(rune_width(0x00AD, narrow()), 1);
    assert_eq!(rune_width(0x08, narrow()), -1);
    assert_eq!(rune_width(0x0600, narrow()), 1);
}

#[test]
fn out_of_range_is_zero() {
    for cp in [0x11_0000, 0x20_0000, u32::MAX] {
        assert_eq!(rune_width(cp, narrow()), 0);
        assert_eq!(rune_width(cp, wide().count_ansi_escape_codes(true)), 0);
    }
}

#[test]
fn unassigned_cjk_blocks_are_wide() {
    assert_eq!(rune_width(0x2_A6DF, narrow()), 2);
    assert_eq!(rune_width(0x3_FFFD, narrow()), 2);
}

#[test]
fn marks_across_scripts_are_zero() {
    // Bengali, Tamil, Tibetan, Myanmar, Kawi, Nag Mundari.
    for cp in [0x09CD, 0x0BCD, 0x0F71, 0x102D, 0x11F00, 0x1E4EC] {
        assert_eq!(rune_width(cp, narrow()), 0, "{cp:#x}");
    }
}

#[test]
fn wide_blocks_outside_cjk_ideographs() {
    // Ideographic description, Nushu, Kana Extended-B, emoji 15.0, CJK Extension I.
    for cp in [0x2FF0, 0x2FFC, 0x31EF, 0x1B170, 0x1AFF0, 0x1F6DC, 0x1FAE8, 0x2EBF0] {
        assert_eq!(rune_width(cp, narrow()), 2, "{cp:#x}");
    }
    assert_eq!(string_width(&"\u{2FF0}".repeat(3), narrow()), 6);
    assert_eq!(string_width("\u{1FAF7}\u{1F3FD}", narrow()), 2);
}

#[test]
fn narrow_letters_across_scripts() {
    for cp in [0x0E01, 0x10330, 0x0995, 0x13000] {
        assert_eq!(rune_width(cp, wide()), 1, "{cp:#x}");
    }
    assert_eq!(rune_width(0x0451, narrow()), 1);
    assert_eq!(rune_width(0x0451, wide()), 2);
}

#[test]
fn char_width_matches_rune_width() {
    for c in ['a', '日', '\u{301}', '±', '😀'] {
        assert_eq!(char_width(c, wide()), rune_width(c as u32, wide()));
    }
}

// === graphemes ===

#[test]
fn grapheme_clusters_split() {
    let parts: Vec<&str> = grapheme_clusters("a\u{300}bc🇸🇦").collect();
    assert_eq!(parts, ["a\u{300}", "b", "c", "🇸🇦"]);
}

#[test]
fn clusters_report_offsets() {
    let all: Vec<Cluster<'_>> = clusters("ab\u{301}c").collect();
    assert_eq!(all.len(), 3);
    assert_eq!(all[1].start, 1);
    assert_eq!(all[1].end(), 4);
    assert_eq!(all[2].start, 4);
}

// === engine ===

#[test]
fn engine_matches_global() {
    let engine = WidthEngine::embedded().unwrap();
    for s in ["", "hello", "你好", "🏃🏽", "⛹\u{FE0F}", "\x1b[0m"] {
        for opts in [narrow(), wide(), narrow().count_ansi_escape_codes(true)] {
            assert_eq!(engine.string_width(s, opts), string_width(s, opts), "{s:?}");
        }
    }
}

#[test]
fn width_table_is_shared() {
    let engine = WidthEngine::global();
    let a = engine.width_table(wide()) as *const _;
    let b = engine.width_table(wide()) as *const _;
    assert_eq!(a, b);
}

#[test]
fn global_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let opts = WidthOptions::from_cache_index(i);
                string_width("表示幅 ±", opts)
            })
        })
        .collect();
    let widths: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    // Index bit 0 is ambiguous_is_narrow.
    assert_eq!(widths, [9, 8, 9, 8]);
}

#[test]
fn classify_is_exposed() {
    let engine = WidthEngine::global();
    let facts = engine.facts(0x00B1);
    assert_eq!(cellwidth::width::classify(0xB1, &facts), CharacterWidth::Ambiguous);
    assert_eq!(CharacterWidth::Ambiguous.columns(narrow()), 1);
    assert_eq!(CharacterWidth::Ambiguous.columns(wide()), 2);
}

// === styled ===

#[test]
fn visible_width_skips_escapes() {
    let tokens = [
        Token {
            kind: TokenKind::Csi,
            text: "\x1b[32m",
        },
        Token::text("ok"),
        Token {
            kind: TokenKind::Csi,
            text: "\x1b[0m",
        },
    ];
    assert_eq!(visible_width(tokens, narrow()), 2);
}
