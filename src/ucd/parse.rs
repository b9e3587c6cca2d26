// ucd/parse.rs - Record reader for the UCD text format.
//
// A UCD data line is `FIELD ; FIELD ; ... # comment`. The first field is a
// codepoint (`XXXX`), a range (`XXXX..YYYY`), or, in the emoji sequence
// files, a space-separated codepoint sequence. `# @missing:` lines carry
// the default value for codepoints not listed anywhere else in the file.

use std::ops::RangeInclusive;

use memchr::memchr;
use smallvec::SmallVec;

use crate::error::UcdError;

/// Highest valid Unicode scalar (and surrogate) codepoint.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// One `;`-separated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    file: &'a str,
    /// 1-based line number in the source file.
    pub line: usize,
    /// Trimmed fields; `fields[0]` is the codepoint field.
    pub fields: SmallVec<[&'a str; 4]>,
    /// The record came from a `# @missing:` directive.
    pub missing: bool,
}

impl<'a> Record<'a> {
    /// Field `i`, or `""` if the record is shorter.
    #[inline]
    pub fn field(&self, i: usize) -> &'a str {
        self.fields.get(i).copied().unwrap_or("")
    }

    /// Field `i`, failing with a malformed-record error if it is absent or empty.
    pub fn required(&self, i: usize) -> Result<&'a str, UcdError> {
        match self.fields.get(i) {
            Some(&f) if !f.is_empty() => Ok(f),
            _ => Err(self.malformed(format!("missing field {i}"))),
        }
    }

    /// The codepoint field as an inclusive range.
    pub fn range(&self) -> Result<RangeInclusive<u32>, UcdError> {
        parse_range(self.file, self.line, self.field(0))
    }

    /// The codepoint field as a space-separated sequence.
    pub fn sequence(&self) -> Result<SmallVec<[u32; 8]>, UcdError> {
        parse_sequence(self.file, self.line, self.field(0))
    }

    pub fn malformed(&self, reason: impl Into<String>) -> UcdError {
        UcdError::malformed(self.file, self.line, reason)
    }

    pub fn unknown(&self, name: &str) -> UcdError {
        UcdError::unknown(self.file, self.line, name)
    }
}

/// Iterator over the records of one UCD file.
///
/// Blank and comment-only lines are skipped; `# @missing:` lines are
/// yielded with [`Record::missing`] set.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    file: &'a str,
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

/// Read the records of `text`; `file` names the source in errors.
pub fn records<'a>(file: &'a str, text: &'a str) -> Records<'a> {
    Records {
        file,
        lines: text.lines().enumerate(),
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Record<'a>> {
        for (idx, raw) in self.lines.by_ref() {
            let (content, missing) = match raw.trim_start().strip_prefix('#') {
                Some(comment) => match comment.trim_start().strip_prefix("@missing:") {
                    Some(directive) => (strip_comment(directive), true),
                    None => continue,
                },
                None => (strip_comment(raw), false),
            };
            let content = content.trim();
            if content.is_empty() {
                continue;
            }
            return Some(Record {
                file: self.file,
                line: idx + 1,
                fields: content.split(';').map(str::trim).collect(),
                missing,
            });
        }
        None
    }
}

#[inline]
fn strip_comment(line: &str) -> &str {
    match memchr(b'#', line.as_bytes()) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse a single hex codepoint, rejecting values above U+10FFFF.
pub fn parse_codepoint(file: &str, line: usize, s: &str) -> Result<u32, UcdError> {
    if s.is_empty() || s.len() > 6 {
        return Err(UcdError::malformed(file, line, format!("bad codepoint `{s}`")));
    }
    let cp = u32::from_str_radix(s, 16)
        .map_err(|_| UcdError::malformed(file, line, format!("bad hex `{s}`")))?;
    if cp > MAX_CODEPOINT {
        return Err(UcdError::malformed(
            file,
            line,
            format!("codepoint {cp:04X} is beyond U+10FFFF"),
        ));
    }
    Ok(cp)
}

/// Parse `XXXX` or `XXXX..YYYY`.
pub fn parse_range(file: &str, line: usize, s: &str) -> Result<RangeInclusive<u32>, UcdError> {
    match s.split_once("..") {
        Some((lo, hi)) => {
            let lo = parse_codepoint(file, line, lo.trim())?;
            let hi = parse_codepoint(file, line, hi.trim())?;
            if lo > hi {
                return Err(UcdError::malformed(
                    file,
                    line,
                    format!("range start {lo:04X} is after end {hi:04X}"),
                ));
            }
            Ok(lo..=hi)
        }
        None => {
            let cp = parse_codepoint(file, line, s)?;
            Ok(cp..=cp)
        }
    }
}

/// Parse a space-separated codepoint sequence such as `1F468 200D 1F469`.
pub fn parse_sequence(file: &str, line: usize, s: &str) -> Result<SmallVec<[u32; 8]>, UcdError> {
    let seq: SmallVec<[u32; 8]> = s
        .split_ascii_whitespace()
        .map(|cp| parse_codepoint(file, line, cp))
        .collect::<Result<_, _>>()?;
    if seq.is_empty() {
        return Err(UcdError::malformed(file, line, "empty codepoint sequence"));
    }
    Ok(seq)
}

// === UnicodeData.txt ===

/// One logical UnicodeData.txt entry. `<..., First>` / `<..., Last>` pairs
/// are folded into a single ranged entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnicodeDataEntry<'a> {
    pub line: usize,
    pub range: RangeInclusive<u32>,
    /// Character name; for folded ranges, the bracketed label without the
    /// `, First>` suffix (e.g. `<CJK Ideograph Extension A`).
    pub name: &'a str,
    pub category: &'a str,
}

impl UnicodeDataEntry<'_> {
    /// Names are only meaningful for entries that cover one codepoint.
    pub fn is_range(&self) -> bool {
        self.range.start() != self.range.end()
    }
}

/// Iterator over UnicodeData.txt entries.
#[derive(Debug, Clone)]
pub struct UnicodeDataEntries<'a> {
    records: Records<'a>,
}

pub fn unicode_data<'a>(file: &'a str, text: &'a str) -> UnicodeDataEntries<'a> {
    UnicodeDataEntries {
        records: records(file, text),
    }
}

impl<'a> Iterator for UnicodeDataEntries<'a> {
    type Item = Result<UnicodeDataEntry<'a>, UcdError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(self.entry(record))
    }
}

impl<'a> UnicodeDataEntries<'a> {
    fn entry(&mut self, record: Record<'a>) -> Result<UnicodeDataEntry<'a>, UcdError> {
        if record.fields.len() < 3 {
            return Err(record.malformed(format!(
                "expected at least 3 fields, found {}",
                record.fields.len()
            )));
        }
        let cp = parse_codepoint(record.file, record.line, record.field(0))?;
        let name = record.field(1);
        let category = record.required(2)?;

        if let Some(label) = name.strip_suffix(", First>") {
            let last = self
                .records
                .next()
                .ok_or_else(|| record.malformed("range start without a matching `Last>` entry"))?;
            let end = parse_codepoint(last.file, last.line, last.field(0))?;
            let last_label = last.field(1).strip_suffix(", Last>");
            if last_label != Some(label) || end < cp {
                return Err(last.malformed(format!("`{}` does not close `{name}`", last.field(1))));
            }
            return Ok(UnicodeDataEntry {
                line: record.line,
                range: cp..=end,
                name: label,
                category,
            });
        }
        if name.ends_with(", Last>") {
            return Err(record.malformed("range end without a preceding `First>` entry"));
        }
        Ok(UnicodeDataEntry {
            line: record.line,
            range: cp..=cp,
            name,
            category,
        })
    }
}
