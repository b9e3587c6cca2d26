// ucd/snapshot.rs - UCD text bundled into the crate.
//
// The Unicode 15.1 property files, kept in the original file format so the
// same reader handles both this and a UCD directory. The two sequence
// files carry a selection of the RGI sequences only.

use super::database::UcdFile;

pub(crate) const SOURCES: [(UcdFile, &str); 10] = [
    (
        UcdFile::UnicodeData,
        include_str!("../../data/ucd/UnicodeData.txt"),
    ),
    (
        UcdFile::DerivedGeneralCategory,
        include_str!("../../data/ucd/DerivedGeneralCategory.txt"),
    ),
    (
        UcdFile::DerivedEastAsianWidth,
        include_str!("../../data/ucd/DerivedEastAsianWidth.txt"),
    ),
    (
        UcdFile::DerivedCoreProperties,
        include_str!("../../data/ucd/DerivedCoreProperties.txt"),
    ),
    (UcdFile::PropList, include_str!("../../data/ucd/PropList.txt")),
    (
        UcdFile::GraphemeBreakProperty,
        include_str!("../../data/ucd/GraphemeBreakProperty.txt"),
    ),
    (UcdFile::EmojiData, include_str!("../../data/ucd/emoji-data.txt")),
    (
        UcdFile::DerivedNumericType,
        include_str!("../../data/ucd/DerivedNumericType.txt"),
    ),
    (
        UcdFile::EmojiSequences,
        include_str!("../../data/ucd/emoji-sequences.txt"),
    ),
    (
        UcdFile::EmojiZwjSequences,
        include_str!("../../data/ucd/emoji-zwj-sequences.txt"),
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_follow_processing_order() {
        let files: Vec<UcdFile> = SOURCES.iter().map(|(f, _)| *f).collect();
        assert_eq!(files, UcdFile::ALL);
    }

    #[test]
    fn sources_are_not_empty() {
        for (file, text) in SOURCES {
            assert!(!text.trim().is_empty(), "{} is empty", file.file_name());
        }
    }
}
