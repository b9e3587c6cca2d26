// segment.rs - Extended grapheme clusters over bounded windows.
//
// The boundary pass runs over windows of at most WINDOW bytes. Every window
// starts and ends on a cluster boundary of the whole string, so running the
// pass window by window gives the same clusters as running it over the
// whole string while no single pass sees more than WINDOW bytes.

use std::fmt;
use std::iter::FusedIterator;

use tracing::trace;
use unicode_segmentation::{GraphemeCursor, GraphemeIndices, UnicodeSegmentation};

use crate::table::CompiledTable;
use crate::ucd::{CharFlags, CodepointFacts};

/// Tentative window length in UTF-8 bytes.
pub const WINDOW: usize = 100;

/// Where the segmenter looks first for a window cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BoundaryClass {
    #[default]
    Other,
    /// ASCII or White_Space, which usually begins a new cluster.
    Starter,
}

impl BoundaryClass {
    pub fn of(cp: u32, facts: &CodepointFacts) -> Self {
        if cp < 0x80 || facts.flags.contains(CharFlags::WHITE_SPACE) {
            BoundaryClass::Starter
        } else {
            BoundaryClass::Other
        }
    }
}

/// One extended grapheme cluster and its byte offset in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster<'a> {
    pub text: &'a str,
    pub start: usize,
}

impl Cluster<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Iterator over the extended grapheme clusters of a string.
///
/// Cloning the iterator restarts segmentation from the clone's position.
#[derive(Clone)]
pub struct GraphemeClusters<'a> {
    text: &'a str,
    /// Start of the next window.
    pos: usize,
    /// Start of the current window.
    base: usize,
    inner: Option<GraphemeIndices<'a>>,
    boundaries: &'a CompiledTable<BoundaryClass>,
}

impl<'a> GraphemeClusters<'a> {
    pub(crate) fn new(text: &'a str, boundaries: &'a CompiledTable<BoundaryClass>) -> Self {
        GraphemeClusters {
            text,
            pos: 0,
            base: 0,
            inner: None,
            boundaries,
        }
    }

    /// The text being segmented.
    pub fn source(&self) -> &'a str {
        self.text
    }

    /// End of the next window starting at `self.pos`.
    ///
    /// The cut is the last cluster boundary in the window that precedes a
    /// [`BoundaryClass::Starter`], else the last cluster boundary of any
    /// kind, else the window end.
    fn next_cut(&self) -> usize {
        let len = self.text.len();
        if len - self.pos <= WINDOW {
            return len;
        }
        let mut cut = self.pos + WINDOW;
        while !self.text.is_char_boundary(cut) {
            cut -= 1;
        }
        // Codepoints starting in (pos, cut].
        let tail = match self.text[cut..].chars().next() {
            Some(c) => cut + c.len_utf8(),
            None => cut,
        };
        let (pos, window) = (self.pos, &self.text[self.pos..tail]);
        let candidates = move || {
            window
                .char_indices()
                .rev()
                .filter(|&(i, _)| i > 0)
                .map(move |(i, c)| (pos + i, c))
        };
        let starter = candidates()
            .filter(|&(_, c)| self.class(c) == BoundaryClass::Starter)
            .map(|(at, _)| at)
            .find(|&at| self.is_boundary(at));
        let found = starter.or_else(|| {
            candidates()
                .map(|(at, _)| at)
                .find(|&at| self.is_boundary(at))
        });
        if let Some(at) = found {
            return at;
        }
        trace!(
            offset = self.pos,
            window = cut - self.pos,
            "no cluster boundary in window, splitting at window end"
        );
        cut
    }

    /// Whether a cluster boundary of the whole text falls at `at`.
    fn is_boundary(&self, at: usize) -> bool {
        GraphemeCursor::new(at, self.text.len(), true)
            .is_boundary(self.text, 0)
            .unwrap_or(false)
    }

    #[inline]
    fn class(&self, c: char) -> BoundaryClass {
        self.boundaries.get(c as u32)
    }
}

impl<'a> Iterator for GraphemeClusters<'a> {
    type Item = Cluster<'a>;

    fn next(&mut self) -> Option<Cluster<'a>> {
        loop {
            if let Some(inner) = &mut self.inner {
                if let Some((offset, text)) = inner.next() {
                    return Some(Cluster {
                        text,
                        start: self.base + offset,
                    });
                }
                self.inner = None;
            }
            if self.pos >= self.text.len() {
                return None;
            }
            let end = self.next_cut();
            self.base = self.pos;
            self.pos = end;
            self.inner = Some(self.text[self.base..end].grapheme_indices(true));
        }
    }
}

impl FusedIterator for GraphemeClusters<'_> {}

impl fmt::Debug for GraphemeClusters<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphemeClusters")
            .field("len", &self.text.len())
            .field("pos", &self.pos)
            .field("base", &self.base)
            .finish()
    }
}
