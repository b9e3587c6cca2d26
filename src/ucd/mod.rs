//! Unicode Character Database ingestion.
//!
//! [`UcdDatabase`] is built from the UCD text files, either the snapshot
//! bundled with the crate ([`UcdDatabase::embedded`]) or a directory laid
//! out like the official distribution ([`UcdDatabase::load_dir`]).

pub mod database;
pub mod map;
pub mod parse;
pub mod property;
pub mod sequences;
mod snapshot;

pub use database::{CodepointFacts, UcdDatabase, UcdDatabaseBuilder, UcdFile};
pub use map::PropertyMap;
pub use property::{
    BinaryProperty, CharFlags, EastAsianWidth, EmojiFlags, GeneralCategory, GraphemeBreak,
    NumericType,
};
pub use sequences::{EmojiSequence, SequenceKind};
