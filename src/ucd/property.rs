// ucd/property.rs - Closed property types extracted from the UCD.
//
// Every enumerated property accepts both its short alias (as used in data
// lines) and its long alias (as used in `# @missing:` directives). Anything
// else is rejected by the caller as an unknown property.

use bitflags::bitflags;

// === General_Category ===

/// Unicode General_Category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum GeneralCategory {
    UppercaseLetter,
    LowercaseLetter,
    TitlecaseLetter,
    ModifierLetter,
    OtherLetter,
    NonspacingMark,
    SpacingMark,
    EnclosingMark,
    DecimalNumber,
    LetterNumber,
    OtherNumber,
    ConnectorPunctuation,
    DashPunctuation,
    OpenPunctuation,
    ClosePunctuation,
    InitialPunctuation,
    FinalPunctuation,
    OtherPunctuation,
    MathSymbol,
    CurrencySymbol,
    ModifierSymbol,
    OtherSymbol,
    SpaceSeparator,
    LineSeparator,
    ParagraphSeparator,
    Control,
    Format,
    Surrogate,
    PrivateUse,
    #[default]
    Unassigned,
}

impl GeneralCategory {
    /// Parse a short (`Mn`) or long (`Nonspacing_Mark`) alias.
    pub fn from_alias(s: &str) -> Option<Self> {
        use GeneralCategory::*;
        let gc = match s {
            "Lu" | "Uppercase_Letter" => UppercaseLetter,
            "Ll" | "Lowercase_Letter" => LowercaseLetter,
            "Lt" | "Titlecase_Letter" => TitlecaseLetter,
            "Lm" | "Modifier_Letter" => ModifierLetter,
            "Lo" | "Other_Letter" => OtherLetter,
            "Mn" | "Nonspacing_Mark" => NonspacingMark,
            "Mc" | "Spacing_Mark" => SpacingMark,
            "Me" | "Enclosing_Mark" => EnclosingMark,
            "Nd" | "Decimal_Number" => DecimalNumber,
            "Nl" | "Letter_Number" => LetterNumber,
            "No" | "Other_Number" => OtherNumber,
            "Pc" | "Connector_Punctuation" => ConnectorPunctuation,
            "Pd" | "Dash_Punctuation" => DashPunctuation,
            "Ps" | "Open_Punctuation" => OpenPunctuation,
            "Pe" | "Close_Punctuation" => ClosePunctuation,
            "Pi" | "Initial_Punctuation" => InitialPunctuation,
            "Pf" | "Final_Punctuation" => FinalPunctuation,
            "Po" | "Other_Punctuation" => OtherPunctuation,
            "Sm" | "Math_Symbol" => MathSymbol,
            "Sc" | "Currency_Symbol" => CurrencySymbol,
            "Sk" | "Modifier_Symbol" => ModifierSymbol,
            "So" | "Other_Symbol" => OtherSymbol,
            "Zs" | "Space_Separator" => SpaceSeparator,
            "Zl" | "Line_Separator" => LineSeparator,
            "Zp" | "Paragraph_Separator" => ParagraphSeparator,
            "Cc" | "Control" => Control,
            "Cf" | "Format" => Format,
            "Cs" | "Surrogate" => Surrogate,
            "Co" | "Private_Use" => PrivateUse,
            "Cn" | "Unassigned" => Unassigned,
            _ => return None,
        };
        Some(gc)
    }

    /// Two-letter short alias.
    pub fn short_name(self) -> &'static str {
        use GeneralCategory::*;
        match self {
            UppercaseLetter => "Lu",
            LowercaseLetter => "Ll",
            TitlecaseLetter => "Lt",
            ModifierLetter => "Lm",
            OtherLetter => "Lo",
            NonspacingMark => "Mn",
            SpacingMark => "Mc",
            EnclosingMark => "Me",
            DecimalNumber => "Nd",
            LetterNumber => "Nl",
            OtherNumber => "No",
            ConnectorPunctuation => "Pc",
            DashPunctuation => "Pd",
            OpenPunctuation => "Ps",
            ClosePunctuation => "Pe",
            InitialPunctuation => "Pi",
            FinalPunctuation => "Pf",
            OtherPunctuation => "Po",
            MathSymbol => "Sm",
            CurrencySymbol => "Sc",
            ModifierSymbol => "Sk",
            OtherSymbol => "So",
            SpaceSeparator => "Zs",
            LineSeparator => "Zl",
            ParagraphSeparator => "Zp",
            Control => "Cc",
            Format => "Cf",
            Surrogate => "Cs",
            PrivateUse => "Co",
            Unassigned => "Cn",
        }
    }

    /// Marks and line/paragraph separators (Mn, Mc, Me, Zl, Zp).
    #[inline]
    pub fn is_mark_or_separator(self) -> bool {
        matches!(
            self,
            GeneralCategory::NonspacingMark
                | GeneralCategory::SpacingMark
                | GeneralCategory::EnclosingMark
                | GeneralCategory::LineSeparator
                | GeneralCategory::ParagraphSeparator
        )
    }
}

// === East_Asian_Width ===

/// Unicode East_Asian_Width (UAX #11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum EastAsianWidth {
    Ambiguous,
    Fullwidth,
    Halfwidth,
    #[default]
    Neutral,
    Narrow,
    Wide,
}

impl EastAsianWidth {
    pub fn from_alias(s: &str) -> Option<Self> {
        let eaw = match s {
            "A" | "Ambiguous" => EastAsianWidth::Ambiguous,
            "F" | "Fullwidth" => EastAsianWidth::Fullwidth,
            "H" | "Halfwidth" => EastAsianWidth::Halfwidth,
            "N" | "Neutral" => EastAsianWidth::Neutral,
            "Na" | "Narrow" => EastAsianWidth::Narrow,
            "W" | "Wide" => EastAsianWidth::Wide,
            _ => return None,
        };
        Some(eaw)
    }

    /// `W` or `F`.
    #[inline]
    pub fn is_wide(self) -> bool {
        matches!(self, EastAsianWidth::Wide | EastAsianWidth::Fullwidth)
    }
}

// === Grapheme_Cluster_Break ===

/// Grapheme_Cluster_Break property values (UAX #29).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum GraphemeBreak {
    #[default]
    Other,
    CR,
    LF,
    Control,
    Extend,
    ZWJ,
    RegionalIndicator,
    Prepend,
    SpacingMark,
    L,
    V,
    T,
    LV,
    LVT,
}

impl GraphemeBreak {
    pub fn from_alias(s: &str) -> Option<Self> {
        let gb = match s {
            "Other" | "XX" => GraphemeBreak::Other,
            "CR" => GraphemeBreak::CR,
            "LF" => GraphemeBreak::LF,
            "Control" | "CN" => GraphemeBreak::Control,
            "Extend" | "EX" => GraphemeBreak::Extend,
            "ZWJ" => GraphemeBreak::ZWJ,
            "Regional_Indicator" | "RI" => GraphemeBreak::RegionalIndicator,
            "Prepend" | "PP" => GraphemeBreak::Prepend,
            "SpacingMark" | "SM" => GraphemeBreak::SpacingMark,
            "L" => GraphemeBreak::L,
            "V" => GraphemeBreak::V,
            "T" => GraphemeBreak::T,
            "LV" => GraphemeBreak::LV,
            "LVT" => GraphemeBreak::LVT,
            _ => return None,
        };
        Some(gb)
    }
}

// === Numeric_Type ===

/// Unicode Numeric_Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum NumericType {
    #[default]
    None,
    Decimal,
    Digit,
    Numeric,
}

impl NumericType {
    pub fn from_alias(s: &str) -> Option<Self> {
        let nt = match s {
            "None" => NumericType::None,
            "De" | "Decimal" => NumericType::Decimal,
            "Di" | "Digit" => NumericType::Digit,
            "Nu" | "Numeric" => NumericType::Numeric,
            _ => return None,
        };
        Some(nt)
    }
}

// === Binary properties ===

/// Binary property names published in PropList.txt, DerivedCoreProperties.txt
/// and emoji-data.txt.
///
/// Only a handful feed the width tables; the rest are recognised so that a
/// complete UCD file parses without tripping the unknown-property check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryProperty {
    // PropList.txt
    WhiteSpace,
    BidiControl,
    JoinControl,
    Dash,
    Hyphen,
    QuotationMark,
    TerminalPunctuation,
    OtherMath,
    HexDigit,
    AsciiHexDigit,
    OtherAlphabetic,
    Ideographic,
    Diacritic,
    Extender,
    OtherLowercase,
    OtherUppercase,
    NoncharacterCodePoint,
    OtherGraphemeExtend,
    IdsBinaryOperator,
    IdsTrinaryOperator,
    IdsUnaryOperator,
    Radical,
    UnifiedIdeograph,
    OtherDefaultIgnorableCodePoint,
    Deprecated,
    SoftDotted,
    LogicalOrderException,
    OtherIdStart,
    OtherIdContinue,
    IdCompatMathStart,
    IdCompatMathContinue,
    SentenceTerminal,
    VariationSelector,
    PatternWhiteSpace,
    PatternSyntax,
    PrependedConcatenationMark,
    RegionalIndicator,
    ModifierCombiningMark,
    // DerivedCoreProperties.txt
    Math,
    Alphabetic,
    Lowercase,
    Uppercase,
    Cased,
    CaseIgnorable,
    ChangesWhenLowercased,
    ChangesWhenUppercased,
    ChangesWhenTitlecased,
    ChangesWhenCasefolded,
    ChangesWhenCasemapped,
    IdStart,
    IdContinue,
    XidStart,
    XidContinue,
    DefaultIgnorableCodePoint,
    GraphemeExtend,
    GraphemeBase,
    GraphemeLink,
    /// `InCB` carries a value (`Linker`, `Consonant`, `Extend`) in a third field.
    IndicConjunctBreak,
    // emoji-data.txt
    Emoji,
    EmojiPresentation,
    EmojiModifier,
    EmojiModifierBase,
    EmojiComponent,
    ExtendedPictographic,
}

impl BinaryProperty {
    pub fn from_name(s: &str) -> Option<Self> {
        use BinaryProperty::*;
        let prop = match s {
            "White_Space" => WhiteSpace,
            "Bidi_Control" => BidiControl,
            "Join_Control" => JoinControl,
            "Dash" => Dash,
            "Hyphen" => Hyphen,
            "Quotation_Mark" => QuotationMark,
            "Terminal_Punctuation" => TerminalPunctuation,
            "Other_Math" => OtherMath,
            "Hex_Digit" => HexDigit,
            "ASCII_Hex_Digit" => AsciiHexDigit,
            "Other_Alphabetic" => OtherAlphabetic,
            "Ideographic" => Ideographic,
            "Diacritic" => Diacritic,
            "Extender" => Extender,
            "Other_Lowercase" => OtherLowercase,
            "Other_Uppercase" => OtherUppercase,
            "Noncharacter_Code_Point" => NoncharacterCodePoint,
            "Other_Grapheme_Extend" => OtherGraphemeExtend,
            "IDS_Binary_Operator" => IdsBinaryOperator,
            "IDS_Trinary_Operator" => IdsTrinaryOperator,
            "IDS_Unary_Operator" => IdsUnaryOperator,
            "Radical" => Radical,
            "Unified_Ideograph" => UnifiedIdeograph,
            "Other_Default_Ignorable_Code_Point" => OtherDefaultIgnorableCodePoint,
            "Deprecated" => Deprecated,
            "Soft_Dotted" => SoftDotted,
            "Logical_Order_Exception" => LogicalOrderException,
            "Other_ID_Start" => OtherIdStart,
            "Other_ID_Continue" => OtherIdContinue,
            "ID_Compat_Math_Start" => IdCompatMathStart,
            "ID_Compat_Math_Continue" => IdCompatMathContinue,
            "Sentence_Terminal" => SentenceTerminal,
            "Variation_Selector" => VariationSelector,
            "Pattern_White_Space" => PatternWhiteSpace,
            "Pattern_Syntax" => PatternSyntax,
            "Prepended_Concatenation_Mark" => PrependedConcatenationMark,
            "Regional_Indicator" => RegionalIndicator,
            "Modifier_Combining_Mark" => ModifierCombiningMark,
            "Math" => Math,
            "Alphabetic" => Alphabetic,
            "Lowercase" => Lowercase,
            "Uppercase" => Uppercase,
            "Cased" => Cased,
            "Case_Ignorable" => CaseIgnorable,
            "Changes_When_Lowercased" => ChangesWhenLowercased,
            "Changes_When_Uppercased" => ChangesWhenUppercased,
            "Changes_When_Titlecased" => ChangesWhenTitlecased,
            "Changes_When_Casefolded" => ChangesWhenCasefolded,
            "Changes_When_Casemapped" => ChangesWhenCasemapped,
            "ID_Start" => IdStart,
            "ID_Continue" => IdContinue,
            "XID_Start" => XidStart,
            "XID_Continue" => XidContinue,
            "Default_Ignorable_Code_Point" => DefaultIgnorableCodePoint,
            "Grapheme_Extend" => GraphemeExtend,
            "Grapheme_Base" => GraphemeBase,
            "Grapheme_Link" => GraphemeLink,
            "InCB" => IndicConjunctBreak,
            "Emoji" => Emoji,
            "Emoji_Presentation" => EmojiPresentation,
            "Emoji_Modifier" => EmojiModifier,
            "Emoji_Modifier_Base" => EmojiModifierBase,
            "Emoji_Component" => EmojiComponent,
            "Extended_Pictographic" => ExtendedPictographic,
            _ => return None,
        };
        Some(prop)
    }

    /// The emoji sub-flag this property sets, if any.
    pub fn emoji_flag(self) -> Option<EmojiFlags> {
        let flag = match self {
            BinaryProperty::Emoji => EmojiFlags::EMOJI,
            BinaryProperty::EmojiPresentation => EmojiFlags::PRESENTATION,
            BinaryProperty::EmojiModifier => EmojiFlags::MODIFIER,
            BinaryProperty::EmojiModifierBase => EmojiFlags::MODIFIER_BASE,
            BinaryProperty::EmojiComponent => EmojiFlags::COMPONENT,
            BinaryProperty::ExtendedPictographic => EmojiFlags::EXTENDED_PICTOGRAPHIC,
            _ => return None,
        };
        Some(flag)
    }

    /// The character flag this property sets, if any.
    pub fn char_flag(self) -> Option<CharFlags> {
        match self {
            BinaryProperty::DefaultIgnorableCodePoint => Some(CharFlags::DEFAULT_IGNORABLE),
            BinaryProperty::WhiteSpace => Some(CharFlags::WHITE_SPACE),
            _ => None,
        }
    }
}

bitflags! {
    /// Emoji membership and sub-classes from emoji-data.txt.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EmojiFlags: u8 {
        const EMOJI = 1 << 0;
        const PRESENTATION = 1 << 1;
        const MODIFIER = 1 << 2;
        const MODIFIER_BASE = 1 << 3;
        const COMPONENT = 1 << 4;
        const EXTENDED_PICTOGRAPHIC = 1 << 5;
    }
}

bitflags! {
    /// Per-codepoint facts that are not emoji-related.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CharFlags: u8 {
        const DEFAULT_IGNORABLE = 1 << 0;
        const WHITE_SPACE = 1 << 1;
        /// The UnicodeData.txt name contains `ARABIC`.
        const ARABIC_NAME = 1 << 2;
    }
}
