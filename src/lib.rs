//! # Cellwidth
//!
//! Terminal display width of Unicode text: how many monospace columns a
//! codepoint, a grapheme cluster, or a whole string occupies.
//!
//! Widths come from the Unicode Character Database, compiled into compact
//! 3-stage lookup tables, and a fixed list of terminal rules on top
//! (controls, combining marks, emoji presentation, East Asian Width).
//!
//! ## Quick Start
//!
//! ```rust
//! use cellwidth::prelude::*;
//!
//! let opts = WidthOptions::default();
//! assert_eq!(string_width("hello", opts), 5);
//! assert_eq!(string_width("你好", opts), 4);
//! assert_eq!(string_width("e\u{301}", opts), 1);
//! assert_eq!(string_width("🇸🇦", opts), 2);
//! ```
//!
//! Ambiguous-width characters are narrow unless asked otherwise:
//!
//! ```rust
//! use cellwidth::prelude::*;
//!
//! let cjk = WidthOptions::default().ambiguous_is_narrow(false);
//! assert_eq!(char_width('±', WidthOptions::default()), 1);
//! assert_eq!(char_width('±', cjk), 2);
//! ```
//!
//! ## Pinning a Unicode version
//!
//! The free functions use [`WidthEngine::global`], built from the UCD
//! snapshot bundled with the crate (or the directory named by
//! `CELLWIDTH_UCD_DIR`). A [`WidthEngine`] can also be built from any
//! [`UcdDatabase`]:
//!
//! ```rust,no_run
//! use cellwidth::{UcdDatabase, WidthEngine, WidthOptions};
//!
//! let db = UcdDatabase::load_dir("/usr/share/unicode").unwrap();
//! let engine = WidthEngine::new(db).unwrap();
//! println!("{}", engine.string_width("👨‍👩‍👧‍👦", WidthOptions::default()));
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`ucd`] | UCD file parsing and the property database |
//! | [`table`] | 3-stage table compiler and lookup |
//! | [`width`] | Per-codepoint width rules and [`WidthOptions`] |
//! | [`cache`] | One compiled table per option combination |
//! | [`engine`] | [`WidthEngine`] and the global instance |
//! | [`segment`] | Windowed extended grapheme segmentation |
//! | [`string_width`] | Cluster-aware string measurement |
//! | [`styled`] | Width of tokenized output with escape sequences |
//! | [`error`] | Error types |

pub mod cache;
pub mod engine;
pub mod error;
pub mod prelude;
pub mod segment;
pub mod string_width;
pub mod styled;
pub mod table;
pub mod ucd;
pub mod width;

pub use engine::WidthEngine;
pub use error::{EngineError, TableOverflowError, UcdError, UnknownPropertyError};
pub use segment::{Cluster, GraphemeClusters};
pub use styled::{Token, TokenKind};
pub use ucd::UcdDatabase;
pub use width::{CharacterWidth, WidthOptions};

/// Column width of codepoint `cp`, see [`WidthEngine::rune_width`].
///
/// ```
/// use cellwidth::{rune_width, WidthOptions};
///
/// let opts = WidthOptions::default();
/// assert_eq!(rune_width(0x41, opts), 1);
/// assert_eq!(rune_width(0x08, opts), -1);
/// assert_eq!(rune_width(0x1B, opts), 0);
/// assert_eq!(rune_width(0x1B, opts.count_ansi_escape_codes(true)), 2);
/// assert_eq!(rune_width(0x11_0000, opts), 0);
/// ```
#[inline]
pub fn rune_width(cp: u32, options: WidthOptions) -> i32 {
    WidthEngine::global().rune_width(cp, options)
}

#[inline]
pub fn char_width(c: char, options: WidthOptions) -> i32 {
    WidthEngine::global().char_width(c, options)
}

/// Column width of `text`. Backspaces subtract, but the result never goes
/// below zero.
pub fn string_width(text: &str, options: WidthOptions) -> usize {
    WidthEngine::global().string_width(text, options)
}

/// Extended grapheme clusters of `text`, with byte offsets.
pub fn clusters(text: &str) -> GraphemeClusters<'_> {
    WidthEngine::global().graphemes(text)
}

/// Extended grapheme clusters of `text`.
///
/// ```
/// let parts: Vec<&str> = cellwidth::grapheme_clusters("a\u{300}🏃🏽\r\n").collect();
/// assert_eq!(parts, ["a\u{300}", "🏃🏽", "\r\n"]);
/// ```
pub fn grapheme_clusters(text: &str) -> impl Iterator<Item = &str> + Clone {
    clusters(text).map(|c| c.text)
}

/// Width of the visible tokens of `tokens`, see [`styled::visible_width`].
pub fn visible_width<'a>(
    tokens: impl IntoIterator<Item = Token<'a>>,
    options: WidthOptions,
) -> usize {
    styled::visible_width(WidthEngine::global(), tokens, options)
}
