// width.rs - Codepoint -> terminal column rules.
//
// `resolve` evaluates an ordered rule list; the first rule that matches
// decides. Rules 1-3 depend only on the codepoint, the rest read the UCD
// facts compiled for it.

use crate::ucd::{CharFlags, CodepointFacts, EastAsianWidth, EmojiFlags, GeneralCategory};

/// Options that change how some codepoints are measured.
///
/// Every combination gets its own compiled width table, see
/// [`WidthOptions::cache_index`].
///
/// # Examples
///
/// ```
/// use cellwidth::WidthOptions;
///
/// let opts = WidthOptions::new().ambiguous_is_narrow(false);
/// assert_eq!(cellwidth::char_width('±', opts), 2);
/// assert_eq!(cellwidth::char_width('±', WidthOptions::default()), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidthOptions {
    /// Measure East_Asian_Width=Ambiguous codepoints as 1 column (default)
    /// instead of 2.
    pub ambiguous_is_narrow: bool,
    /// Measure C0/C1 controls without a dedicated rule (ESC, DEL, CSI, ...)
    /// as 2 columns instead of 0.
    pub count_ansi_escape_codes: bool,
}

impl Default for WidthOptions {
    fn default() -> Self {
        WidthOptions {
            ambiguous_is_narrow: true,
            count_ansi_escape_codes: false,
        }
    }
}

impl WidthOptions {
    /// Number of distinct option combinations.
    pub const COMBINATIONS: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }

    /// Treat ambiguous-width codepoints as narrow.
    pub fn ambiguous_is_narrow(mut self, yes: bool) -> Self {
        self.ambiguous_is_narrow = yes;
        self
    }

    /// Give otherwise silent control codes a width of 2.
    pub fn count_ansi_escape_codes(mut self, yes: bool) -> Self {
        self.count_ansi_escape_codes = yes;
        self
    }

    /// Two-bit index: bit 0 is `ambiguous_is_narrow`, bit 1 is
    /// `count_ansi_escape_codes`.
    #[inline]
    pub fn cache_index(self) -> usize {
        (self.ambiguous_is_narrow as usize) | ((self.count_ansi_escape_codes as usize) << 1)
    }

    /// Inverse of [`cache_index`](Self::cache_index). Only the low two bits are read.
    pub fn from_cache_index(index: usize) -> Self {
        WidthOptions {
            ambiguous_is_narrow: index & 1 != 0,
            count_ansi_escape_codes: index & 2 != 0,
        }
    }
}

/// Width class of a codepoint before options are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterWidth {
    Zero,
    Single,
    Double,
    /// East_Asian_Width=Ambiguous: 1 or 2 depending on
    /// [`WidthOptions::ambiguous_is_narrow`].
    Ambiguous,
}

impl CharacterWidth {
    #[inline]
    pub fn columns(self, options: WidthOptions) -> i8 {
        match self {
            CharacterWidth::Zero => 0,
            CharacterWidth::Single => 1,
            CharacterWidth::Double => 2,
            CharacterWidth::Ambiguous if options.ambiguous_is_narrow => 1,
            CharacterWidth::Ambiguous => 2,
        }
    }
}

/// Blocks that render wide whether or not they are assigned.
const FIXED_WIDE: [(u32, u32); 5] = [
    (0x3400, 0x4DBF),
    (0x4E00, 0x9FFF),
    (0xF900, 0xFAFF),
    (0x2_0000, 0x2_FFFD),
    (0x3_0000, 0x3_FFFD),
];

pub const BACKSPACE: u32 = 0x08;
pub const SOFT_HYPHEN: u32 = 0x00AD;
pub const TWO_EM_DASH: u32 = 0x2E3A;
pub const THREE_EM_DASH: u32 = 0x2E3B;
pub const VARIATION_SELECTOR_15: u32 = 0xFE0E;
pub const VARIATION_SELECTOR_16: u32 = 0xFE0F;

/// Columns occupied by `cp`.
///
/// Returns -1 for backspace and 0..=3 for everything else.
pub fn resolve(cp: u32, facts: &CodepointFacts, options: WidthOptions) -> i8 {
    // 1. Printable ASCII.
    if (0x20..=0x7E).contains(&cp) {
        return 1;
    }
    // 2. C0, DEL and C1 controls.
    if cp < 0x20 || (0x7F..=0x9F).contains(&cp) {
        return match cp {
            // NUL ENQ BEL, LF VT FF CR SO SI
            0x00 | 0x05 | 0x07 | 0x0A..=0x0F => 0,
            BACKSPACE => -1,
            _ if options.count_ansi_escape_codes => 2,
            _ => 0,
        };
    }
    // 3. Fixed overrides.
    match cp {
        SOFT_HYPHEN => return 1,
        TWO_EM_DASH => return 2,
        THREE_EM_DASH => return 3,
        _ => {}
    }
    classify(cp, facts).columns(options)
}

/// Rules 4-9 as a width class.
pub fn classify(cp: u32, facts: &CodepointFacts) -> CharacterWidth {
    // 4. Invisible characters.
    if is_invisible(facts) {
        return CharacterWidth::Zero;
    }
    // 5. Hangul medial vowels and final consonants.
    if matches!(cp, 0x1160..=0x11FF | 0xD7B0..=0xD7FF) {
        return CharacterWidth::Zero;
    }
    // 6. Emoji.
    if facts.emoji.contains(EmojiFlags::MODIFIER) {
        return CharacterWidth::Zero;
    }
    if facts.emoji.contains(EmojiFlags::PRESENTATION) {
        return CharacterWidth::Double;
    }
    if facts.emoji.contains(EmojiFlags::COMPONENT) {
        return CharacterWidth::Zero;
    }
    // 7. Wide and fullwidth.
    if facts.east_asian_width.is_wide() || is_fixed_wide(cp) {
        return CharacterWidth::Double;
    }
    // 8. Ambiguous.
    if facts.east_asian_width == EastAsianWidth::Ambiguous {
        return CharacterWidth::Ambiguous;
    }
    // 9.
    CharacterWidth::Single
}

#[inline]
fn is_invisible(facts: &CodepointFacts) -> bool {
    if facts.flags.contains(CharFlags::DEFAULT_IGNORABLE) || facts.category.is_mark_or_separator() {
        return true;
    }
    match facts.category {
        // Arabic prepended marks (number signs, end of ayah) stay visible.
        GeneralCategory::Format => !facts.flags.contains(CharFlags::ARABIC_NAME),
        GeneralCategory::Surrogate => true,
        _ => false,
    }
}

#[inline]
fn is_fixed_wide(cp: u32) -> bool {
    FIXED_WIDE.iter().any(|&(lo, hi)| (lo..=hi).contains(&cp))
}
