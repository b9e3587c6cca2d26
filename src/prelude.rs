// prelude.rs - Convenient re-exports for measuring text.
//
//! # Prelude
//!
//! ```
//! use cellwidth::prelude::*;
//!
//! assert_eq!(string_width("⛹\u{FE0F}", WidthOptions::default()), 2);
//! assert_eq!(string_width("⛹", WidthOptions::default()), 1);
//! ```

pub use crate::engine::WidthEngine;
pub use crate::error::{EngineError, TableOverflowError, UcdError};
pub use crate::segment::{Cluster, GraphemeClusters};
pub use crate::styled::{Token, TokenKind};
pub use crate::ucd::UcdDatabase;
pub use crate::width::WidthOptions;
pub use crate::{char_width, clusters, grapheme_clusters, rune_width, string_width, visible_width};
