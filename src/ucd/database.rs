// ucd/database.rs - UcdDatabase: every property the width rules read.
//
// Files are ingested in `UcdFile::ALL` order; when two files assign the
// same property to a codepoint the later assignment wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::map::{PropertyMap, PropertyMapBuilder};
use super::parse::{records, unicode_data, Record};
use super::property::{
    BinaryProperty, CharFlags, EastAsianWidth, EmojiFlags, GeneralCategory, GraphemeBreak,
    NumericType,
};
use super::sequences::{self, EmojiSequence};
use super::snapshot;
use crate::error::UcdError;

/// The UCD source files this crate understands, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UcdFile {
    UnicodeData,
    DerivedGeneralCategory,
    DerivedEastAsianWidth,
    DerivedCoreProperties,
    PropList,
    GraphemeBreakProperty,
    EmojiData,
    DerivedNumericType,
    EmojiSequences,
    EmojiZwjSequences,
}

impl UcdFile {
    pub const ALL: [UcdFile; 10] = [
        UcdFile::UnicodeData,
        UcdFile::DerivedGeneralCategory,
        UcdFile::DerivedEastAsianWidth,
        UcdFile::DerivedCoreProperties,
        UcdFile::PropList,
        UcdFile::GraphemeBreakProperty,
        UcdFile::EmojiData,
        UcdFile::DerivedNumericType,
        UcdFile::EmojiSequences,
        UcdFile::EmojiZwjSequences,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            UcdFile::UnicodeData => "UnicodeData.txt",
            UcdFile::DerivedGeneralCategory => "DerivedGeneralCategory.txt",
            UcdFile::DerivedEastAsianWidth => "DerivedEastAsianWidth.txt",
            UcdFile::DerivedCoreProperties => "DerivedCoreProperties.txt",
            UcdFile::PropList => "PropList.txt",
            UcdFile::GraphemeBreakProperty => "GraphemeBreakProperty.txt",
            UcdFile::EmojiData => "emoji-data.txt",
            UcdFile::DerivedNumericType => "DerivedNumericType.txt",
            UcdFile::EmojiSequences => "emoji-sequences.txt",
            UcdFile::EmojiZwjSequences => "emoji-zwj-sequences.txt",
        }
    }

    /// Sub-directory of the standard UCD distribution holding this file.
    pub fn subdir(self) -> Option<&'static str> {
        match self {
            UcdFile::DerivedGeneralCategory
            | UcdFile::DerivedEastAsianWidth
            | UcdFile::DerivedNumericType => Some("extracted"),
            UcdFile::GraphemeBreakProperty => Some("auxiliary"),
            UcdFile::EmojiData | UcdFile::EmojiSequences | UcdFile::EmojiZwjSequences => {
                Some("emoji")
            }
            _ => None,
        }
    }

    /// Without these two a directory cannot describe widths at all.
    pub fn is_required(self) -> bool {
        matches!(self, UcdFile::UnicodeData | UcdFile::DerivedEastAsianWidth)
    }
}

/// Everything the width rules need to know about one codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CodepointFacts {
    pub category: GeneralCategory,
    pub east_asian_width: EastAsianWidth,
    pub grapheme_break: GraphemeBreak,
    pub emoji: EmojiFlags,
    pub flags: CharFlags,
}

/// Parsed Unicode Character Database.
#[derive(Debug, Clone)]
pub struct UcdDatabase {
    category: PropertyMap<GeneralCategory>,
    east_asian_width: PropertyMap<EastAsianWidth>,
    grapheme_break: PropertyMap<GraphemeBreak>,
    emoji: PropertyMap<EmojiFlags>,
    flags: PropertyMap<CharFlags>,
    numeric_type: PropertyMap<NumericType>,
    names: HashMap<u32, String>,
    sequences: Vec<EmojiSequence>,
}

impl UcdDatabase {
    pub fn builder() -> UcdDatabaseBuilder {
        UcdDatabaseBuilder::new()
    }

    /// The UCD snapshot shipped inside the crate.
    pub fn embedded() -> Result<Self, UcdError> {
        let mut builder = Self::builder();
        for (file, text) in snapshot::SOURCES {
            builder.ingest(file, text)?;
        }
        Ok(builder.build())
    }

    /// Load UCD files from `dir`.
    ///
    /// Each file is looked up as `dir/<name>` and then in its standard
    /// sub-directory (`extracted/`, `auxiliary/`, `emoji/`). Missing optional
    /// files are skipped with a warning.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, UcdError> {
        let dir = dir.as_ref();
        let mut builder = Self::builder();
        for file in UcdFile::ALL {
            let Some(path) = locate(dir, file) else {
                if file.is_required() {
                    return Err(UcdError::Io {
                        path: dir.join(file.file_name()),
                        source: std::io::ErrorKind::NotFound.into(),
                    });
                }
                warn!(dir = %dir.display(), file = file.file_name(), "optional UCD file not found");
                continue;
            };
            let text = std::fs::read_to_string(&path).map_err(|source| UcdError::Io {
                path: path.clone(),
                source,
            })?;
            builder.ingest(file, &text)?;
        }
        Ok(builder.build())
    }

    pub fn facts(&self, cp: u32) -> CodepointFacts {
        CodepointFacts {
            category: self.category.get(cp),
            east_asian_width: self.east_asian_width.get(cp),
            grapheme_break: self.grapheme_break.get(cp),
            emoji: self.emoji.get(cp),
            flags: self.flags.get(cp),
        }
    }

    pub fn general_category(&self, cp: u32) -> GeneralCategory {
        self.category.get(cp)
    }

    pub fn east_asian_width(&self, cp: u32) -> EastAsianWidth {
        self.east_asian_width.get(cp)
    }

    pub fn grapheme_break(&self, cp: u32) -> GraphemeBreak {
        self.grapheme_break.get(cp)
    }

    pub fn numeric_type(&self, cp: u32) -> NumericType {
        self.numeric_type.get(cp)
    }

    /// Character name from UnicodeData.txt. Codepoints covered only by a
    /// `<..., First>`/`<..., Last>` range have no individual name.
    pub fn name(&self, cp: u32) -> Option<&str> {
        self.names.get(&cp).map(String::as_str)
    }

    pub fn emoji_sequences(&self) -> &[EmojiSequence] {
        &self.sequences
    }
}

/// Apply a record's value, as a default for `@missing` lines.
fn paint<V: Copy + PartialEq>(
    map: &mut PropertyMapBuilder<V>,
    record: &Record<'_>,
    value: V,
) -> Result<(), UcdError> {
    let range = record.range()?;
    if record.missing {
        map.assign_default(range, value);
    } else {
        map.assign(range, value);
    }
    Ok(())
}

fn locate(dir: &Path, file: UcdFile) -> Option<PathBuf> {
    let direct = dir.join(file.file_name());
    if direct.is_file() {
        return Some(direct);
    }
    let nested = dir.join(file.subdir()?).join(file.file_name());
    nested.is_file().then_some(nested)
}

/// Accumulates UCD files into a [`UcdDatabase`].
#[derive(Debug, Clone)]
pub struct UcdDatabaseBuilder {
    category: PropertyMapBuilder<GeneralCategory>,
    east_asian_width: PropertyMapBuilder<EastAsianWidth>,
    grapheme_break: PropertyMapBuilder<GraphemeBreak>,
    emoji: PropertyMapBuilder<EmojiFlags>,
    flags: PropertyMapBuilder<CharFlags>,
    numeric_type: PropertyMapBuilder<NumericType>,
    names: HashMap<u32, String>,
    sequences: Vec<EmojiSequence>,
}

impl Default for UcdDatabaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl UcdDatabaseBuilder {
    pub fn new() -> Self {
        UcdDatabaseBuilder {
            category: PropertyMap::builder(GeneralCategory::Unassigned),
            east_asian_width: PropertyMap::builder(EastAsianWidth::Neutral),
            grapheme_break: PropertyMap::builder(GraphemeBreak::Other),
            emoji: PropertyMap::builder(EmojiFlags::empty()),
            flags: PropertyMap::builder(CharFlags::empty()),
            numeric_type: PropertyMap::builder(NumericType::None),
            names: HashMap::new(),
            sequences: Vec::new(),
        }
    }

    /// Ingest the text of one UCD file.
    ///
    /// `# @missing:` defaults are applied before the file's explicit records,
    /// and only reach codepoints that no record of any file has assigned.
    pub fn ingest(&mut self, file: UcdFile, text: &str) -> Result<&mut Self, UcdError> {
        let name = file.file_name();
        let count = if file == UcdFile::UnicodeData {
            self.ingest_unicode_data(name, text)?
        } else {
            for record in records(name, text).filter(|r| r.missing) {
                self.apply(file, &record)?;
            }
            let mut count = 0;
            for record in records(name, text).filter(|r| !r.missing) {
                self.apply(file, &record)?;
                count += 1;
            }
            count
        };
        debug!(file = name, records = count, "ingested UCD file");
        Ok(self)
    }

    fn ingest_unicode_data(&mut self, name: &str, text: &str) -> Result<usize, UcdError> {
        let mut count = 0;
        for entry in unicode_data(name, text) {
            let entry = entry?;
            let category = GeneralCategory::from_alias(entry.category)
                .ok_or_else(|| UcdError::unknown(name, entry.line, entry.category))?;
            self.category.assign(entry.range.clone(), category);
            if !entry.is_range() {
                let cp = *entry.range.start();
                if entry.name.contains("ARABIC") {
                    self.flags.update(entry.range.clone(), |f| *f |= CharFlags::ARABIC_NAME);
                }
                self.names.insert(cp, entry.name.to_string());
            }
            count += 1;
        }
        Ok(count)
    }

    fn apply(&mut self, file: UcdFile, record: &Record<'_>) -> Result<(), UcdError> {
        match file {
            // Read by `ingest_unicode_data`.
            UcdFile::UnicodeData => {}
            UcdFile::DerivedGeneralCategory => {
                let value = record.required(1)?;
                let gc = GeneralCategory::from_alias(value).ok_or_else(|| record.unknown(value))?;
                paint(&mut self.category, record, gc)?;
            }
            UcdFile::DerivedEastAsianWidth => {
                let value = record.required(1)?;
                let eaw = EastAsianWidth::from_alias(value).ok_or_else(|| record.unknown(value))?;
                paint(&mut self.east_asian_width, record, eaw)?;
            }
            UcdFile::GraphemeBreakProperty => {
                let value = record.required(1)?;
                let gb = GraphemeBreak::from_alias(value).ok_or_else(|| record.unknown(value))?;
                paint(&mut self.grapheme_break, record, gb)?;
            }
            UcdFile::DerivedNumericType => {
                let value = record.required(1)?;
                let nt = NumericType::from_alias(value).ok_or_else(|| record.unknown(value))?;
                paint(&mut self.numeric_type, record, nt)?;
            }
            UcdFile::DerivedCoreProperties | UcdFile::PropList | UcdFile::EmojiData => {
                // Binary properties default to "No"; their @missing lines say nothing.
                if record.missing {
                    return Ok(());
                }
                let value = record.required(1)?;
                let prop = BinaryProperty::from_name(value).ok_or_else(|| record.unknown(value))?;
                let range = record.range()?;
                if let Some(flag) = prop.emoji_flag() {
                    self.emoji.update(range, |f| *f |= flag);
                } else if let Some(flag) = prop.char_flag() {
                    self.flags.update(range, |f| *f |= flag);
                }
            }
            UcdFile::EmojiSequences | UcdFile::EmojiZwjSequences => {
                if !record.missing {
                    sequences::push_record(record, &mut self.sequences)?;
                }
            }
        }
        Ok(())
    }

    pub fn build(self) -> UcdDatabase {
        UcdDatabase {
            category: self.category.build(),
            east_asian_width: self.east_asian_width.build(),
            grapheme_break: self.grapheme_break.build(),
            emoji: self.emoji.build(),
            flags: self.flags.build(),
            numeric_type: self.numeric_type.build(),
            names: self.names,
            sequences: self.sequences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_files_win() {
        let mut b = UcdDatabase::builder();
        b.ingest(UcdFile::UnicodeData, "0300;COMBINING GRAVE ACCENT;Mn;230;NSM;;;;;N;;;;;\n")
            .unwrap();
        b.ingest(UcdFile::DerivedGeneralCategory, "0300 ; Lo\n").unwrap();
        let db = b.build();
        assert_eq!(db.general_category(0x300), GeneralCategory::OtherLetter);
        assert_eq!(db.name(0x300), Some("COMBINING GRAVE ACCENT"));
    }

    #[test]
    fn missing_defaults_lose_to_records() {
        let text = "0020 ; Na\n# @missing: 0000..10FFFF; Neutral\n# @missing: 3400..4DBF; Wide\n";
        let mut b = UcdDatabase::builder();
        b.ingest(UcdFile::DerivedEastAsianWidth, text).unwrap();
        let db = b.build();
        assert_eq!(db.east_asian_width(0x20), EastAsianWidth::Narrow);
        assert_eq!(db.east_asian_width(0x3400), EastAsianWidth::Wide);
        assert_eq!(db.east_asian_width(0x1F), EastAsianWidth::Neutral);
    }

    #[test]
    fn missing_defaults_keep_earlier_files() {
        let mut b = UcdDatabase::builder();
        b.ingest(UcdFile::UnicodeData, "0300;COMBINING GRAVE ACCENT;Mn;230;NSM;;;;;N;;;;;\n")
            .unwrap();
        b.ingest(
            UcdFile::DerivedGeneralCategory,
            "# @missing: 0000..10FFFF; Unassigned\n0041 ; Lu\n",
        )
        .unwrap();
        let db = b.build();
        assert_eq!(db.general_category(0x300), GeneralCategory::NonspacingMark);
        assert_eq!(db.general_category(0x41), GeneralCategory::UppercaseLetter);
        assert_eq!(db.general_category(0x42), GeneralCategory::Unassigned);
    }

    #[test]
    fn binary_flags_accumulate() {
        let mut b = UcdDatabase::builder();
        b.ingest(
            UcdFile::EmojiData,
            "1F3FB..1F3FF ; Emoji\n1F3FB..1F3FF ; Emoji_Modifier\n1F3FB..1F3FF ; Emoji_Component\n",
        )
        .unwrap();
        let facts = b.build().facts(0x1F3FD);
        assert_eq!(
            facts.emoji,
            EmojiFlags::EMOJI | EmojiFlags::MODIFIER | EmojiFlags::COMPONENT
        );
    }

    #[test]
    fn untracked_properties_are_accepted() {
        let mut b = UcdDatabase::builder();
        b.ingest(
            UcdFile::DerivedCoreProperties,
            "0041..005A ; Alphabetic\n094D ; InCB; Linker\n00AD ; Default_Ignorable_Code_Point\n",
        )
        .unwrap();
        let db = b.build();
        assert!(db.facts(0xAD).flags.contains(CharFlags::DEFAULT_IGNORABLE));
        assert!(db.facts(0x41).flags.is_empty());
    }

    #[test]
    fn unknown_property_is_an_error() {
        let mut b = UcdDatabase::builder();
        let err = b
            .ingest(UcdFile::PropList, "0020 ; White_Space\n0021 ; Shouty\n")
            .unwrap_err();
        match err {
            UcdError::UnknownProperty(e) => {
                assert_eq!(e.file, "PropList.txt");
                assert_eq!(e.line, 2);
                assert_eq!(e.name, "Shouty");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn arabic_names_flagged() {
        let mut b = UcdDatabase::builder();
        b.ingest(
            UcdFile::UnicodeData,
            "0600;ARABIC NUMBER SIGN;Cf;0;AN;;;;;N;;;;;\n200B;ZERO WIDTH SPACE;Cf;0;BN;;;;;N;;;;;\n",
        )
        .unwrap();
        let db = b.build();
        assert!(db.facts(0x600).flags.contains(CharFlags::ARABIC_NAME));
        assert!(!db.facts(0x200B).flags.contains(CharFlags::ARABIC_NAME));
    }

    #[test]
    fn subdirectories() {
        assert_eq!(UcdFile::EmojiData.subdir(), Some("emoji"));
        assert_eq!(UcdFile::GraphemeBreakProperty.subdir(), Some("auxiliary"));
        assert_eq!(UcdFile::PropList.subdir(), None);
    }
}
