// ucd/sequences.rs - RGI emoji sequence lists.

use smallvec::SmallVec;

use super::parse::Record;
use crate::error::UcdError;

/// `type_field` of emoji-sequences.txt and emoji-zwj-sequences.txt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    BasicEmoji,
    Keycap,
    Flag,
    Tag,
    Modifier,
    Zwj,
}

impl SequenceKind {
    pub fn from_name(s: &str) -> Option<Self> {
        let kind = match s {
            "Basic_Emoji" => SequenceKind::BasicEmoji,
            "Emoji_Keycap_Sequence" => SequenceKind::Keycap,
            "RGI_Emoji_Flag_Sequence" => SequenceKind::Flag,
            "RGI_Emoji_Tag_Sequence" => SequenceKind::Tag,
            "RGI_Emoji_Modifier_Sequence" => SequenceKind::Modifier,
            "RGI_Emoji_ZWJ_Sequence" => SequenceKind::Zwj,
            _ => return None,
        };
        Some(kind)
    }
}

/// One recommended-for-general-interchange emoji sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiSequence {
    pub kind: SequenceKind,
    pub codepoints: SmallVec<[u32; 8]>,
    pub description: String,
}

impl EmojiSequence {
    /// The sequence as text. Every codepoint was validated at parse time;
    /// surrogates, which cannot appear in a `String`, are skipped.
    pub fn to_text(&self) -> String {
        self.codepoints
            .iter()
            .filter_map(|&cp| char::from_u32(cp))
            .collect()
    }
}

/// Parse one record into `out`. `Basic_Emoji` ranges expand to one
/// single-codepoint sequence per codepoint.
pub(crate) fn push_record(record: &Record<'_>, out: &mut Vec<EmojiSequence>) -> Result<(), UcdError> {
    let type_field = record.required(1)?;
    let kind = SequenceKind::from_name(type_field).ok_or_else(|| record.unknown(type_field))?;
    let description = record.field(2);

    if record.field(0).contains("..") {
        for cp in record.range()? {
            out.push(EmojiSequence {
                kind,
                codepoints: SmallVec::from_slice(&[cp]),
                description: description.to_string(),
            });
        }
    } else {
        out.push(EmojiSequence {
            kind,
            codepoints: record.sequence()?,
            description: description.to_string(),
        });
    }
    Ok(())
}
