// error.rs - Error types for UCD ingestion and table compilation.
//
// Lookups never fail at runtime; every error here is raised while turning
// UCD text into compiled tables.

use std::fmt;
use std::path::PathBuf;

/// A UCD record named a property or property value this crate does not know.
///
/// Unknown names are rejected instead of defaulted: a silently mis-tagged
/// range would corrupt widths for every codepoint in it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown property `{name}` in {file} at line {line}")]
pub struct UnknownPropertyError {
    pub file: String,
    pub line: usize,
    pub name: String,
}

/// Error type for parsing UCD files and building a [`crate::ucd::UcdDatabase`].
#[derive(Debug, thiserror::Error)]
pub enum UcdError {
    /// Unrecognised property name or value.
    #[error(transparent)]
    UnknownProperty(#[from] UnknownPropertyError),
    /// A record whose codepoint field or field layout cannot be parsed.
    #[error("malformed record in {file} at line {line}: {reason}")]
    MalformedRecord {
        file: String,
        line: usize,
        reason: String,
    },
    /// A UCD file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UcdError {
    pub(crate) fn malformed(file: &str, line: usize, reason: impl Into<String>) -> Self {
        UcdError::MalformedRecord {
            file: file.to_string(),
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown(file: &str, line: usize, name: &str) -> Self {
        UcdError::UnknownProperty(UnknownPropertyError {
            file: file.to_string(),
            line,
            name: name.to_string(),
        })
    }

    /// Line number of the offending record, if the error came from a record.
    pub fn line(&self) -> Option<usize> {
        match self {
            UcdError::UnknownProperty(e) => Some(e.line),
            UcdError::MalformedRecord { line, .. } => Some(*line),
            UcdError::Io { .. } => None,
        }
    }
}

/// One of the three arrays of a [`crate::table::CompiledTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Stage1,
    Stage2,
    Stage3,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Stage1 => write!(f, "stage 1"),
            Stage::Stage2 => write!(f, "stage 2"),
            Stage::Stage3 => write!(f, "stage 3"),
        }
    }
}

/// A stage array would exceed the 16-bit index budget.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{stage} needs {required} entries, limit is {}", crate::table::MAX_STAGE_LEN)]
pub struct TableOverflowError {
    pub stage: Stage,
    pub required: usize,
}

/// A pre-built stage triple failed validation in
/// [`crate::table::CompiledTable::from_stages`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error(transparent)]
    Overflow(#[from] TableOverflowError),
    #[error("stage 3 is empty")]
    EmptyValues,
    #[error("stage 1 entry {index} points at block offset {offset}, past the end of stage 2")]
    BlockOutOfBounds { index: usize, offset: usize },
    #[error("stage 2 entry {index} points at value {value}, past the end of stage 3")]
    ValueOutOfBounds { index: usize, value: usize },
}

/// Error type for building a [`crate::engine::WidthEngine`] from UCD files.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Ucd(#[from] UcdError),
    #[error(transparent)]
    Table(#[from] TableOverflowError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_property_display() {
        let err = UcdError::unknown("emoji-data.txt", 12, "Emoji_Sparkle");
        assert_eq!(
            err.to_string(),
            "unknown property `Emoji_Sparkle` in emoji-data.txt at line 12"
        );
        assert_eq!(err.line(), Some(12));
    }

    #[test]
    fn malformed_display() {
        let err = UcdError::malformed("PropList.txt", 3, "bad hex `XYZ`");
        assert!(matches!(err, UcdError::MalformedRecord { line: 3, .. }));
        assert!(err.to_string().contains("bad hex"));
    }

    #[test]
    fn overflow_display() {
        let err = TableOverflowError {
            stage: Stage::Stage3,
            required: 65537,
        };
        assert_eq!(err.to_string(), "stage 3 needs 65537 entries, limit is 65536");
    }

    #[test]
    fn io_error_has_no_line() {
        let err = UcdError::Io {
            path: PathBuf::from("/nope/UnicodeData.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.line(), None);
        assert!(err.to_string().contains("/nope/UnicodeData.txt"));
    }

    #[test]
    fn error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(TableOverflowError {
            stage: Stage::Stage2,
            required: 70000,
        });
        assert!(err.to_string().starts_with("stage 2"));
    }
}
