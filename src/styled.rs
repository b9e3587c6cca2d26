// styled.rs - Width of text interleaved with terminal escape sequences.
//
// Tokenizing ANSI/VT input is left to the caller; this module only defines
// the token shape and measures the visible parts.

use crate::engine::WidthEngine;
use crate::width::WidthOptions;

/// Kind of a tokenized span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Printable text.
    Text,
    /// Control Sequence Introducer sequence (`ESC [ ...`).
    Csi,
    /// Operating System Command (`ESC ] ... BEL`).
    Osc,
    /// Device Control String (`ESC P ... ST`).
    Dcs,
    /// Any other escape or control sequence.
    Other,
}

/// A span of styled terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn text(text: &'a str) -> Self {
        Token {
            kind: TokenKind::Text,
            text,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.kind == TokenKind::Text
    }
}

/// Sum of the widths of the [`TokenKind::Text`] tokens; escape sequences
/// occupy no columns.
pub fn visible_width<'a, I>(engine: &WidthEngine, tokens: I, options: WidthOptions) -> usize
where
    I: IntoIterator<Item = Token<'a>>,
{
    tokens
        .into_iter()
        .filter(Token::is_visible)
        .map(|token| engine.string_width(token.text, options))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_text_counts() {
        let engine = WidthEngine::embedded().unwrap();
        let tokens = [
            Token {
                kind: TokenKind::Csi,
                text: "\x1b[1;31m",
            },
            Token::text("エラー"),
            Token {
                kind: TokenKind::Csi,
                text: "\x1b[0m",
            },
            Token::text(": disk"),
            Token {
                kind: TokenKind::Osc,
                text: "\x1b]0;title\x07",
            },
        ];
        let opts = WidthOptions::default().count_ansi_escape_codes(true);
        assert_eq!(visible_width(&engine, tokens, opts), 6 + 6);
    }
}
