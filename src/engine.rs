// engine.rs - WidthEngine: UCD facts, compiled tables and the global instance.

use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::cache::TableCache;
use crate::error::{EngineError, TableOverflowError};
use crate::segment::{BoundaryClass, GraphemeClusters};
use crate::string_width;
use crate::table::{CompiledTable, TableCompiler};
use crate::ucd::{CodepointFacts, UcdDatabase};
use crate::width::{self, WidthOptions};

/// Environment variable naming a UCD directory for the global engine.
pub const UCD_DIR_ENV: &str = "CELLWIDTH_UCD_DIR";

/// Measures codepoints, grapheme clusters and strings against one UCD version.
///
/// Width tables are compiled on first use of each [`WidthOptions`]
/// combination and shared by every later call, including across threads.
///
/// # Examples
///
/// ```
/// use cellwidth::{UcdDatabase, WidthEngine, WidthOptions};
///
/// let engine = WidthEngine::new(UcdDatabase::embedded().unwrap()).unwrap();
/// assert_eq!(engine.string_width("日本語", WidthOptions::default()), 6);
/// ```
#[derive(Debug)]
pub struct WidthEngine {
    db: UcdDatabase,
    boundaries: CompiledTable<BoundaryClass>,
    widths: TableCache<i8>,
}

impl WidthEngine {
    /// Build an engine over `db`.
    ///
    /// Compiles the segmentation table and the default width table up front,
    /// so a database too irregular for 16-bit stage indices is rejected here.
    ///
    /// Only widths and the segmenter's preferred cut points follow `db`.
    /// Cluster boundaries themselves come from the Unicode version built
    /// into `unicode-segmentation` (17.0 for 1.13), whatever version `db`
    /// was loaded from.
    pub fn new(db: UcdDatabase) -> Result<Self, TableOverflowError> {
        let boundaries = TableCompiler::new().compile(
            |cp| BoundaryClass::of(cp, &db.facts(cp)),
            |class| *class,
        )?;
        let engine = WidthEngine {
            db,
            boundaries,
            widths: TableCache::new(),
        };
        engine.try_width_table(WidthOptions::default())?;
        Ok(engine)
    }

    /// Engine over the UCD snapshot bundled with the crate.
    pub fn embedded() -> Result<Self, EngineError> {
        Ok(Self::new(UcdDatabase::embedded()?)?)
    }

    /// Engine over the UCD files in `dir`, see [`UcdDatabase::load_dir`].
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, EngineError> {
        Ok(Self::new(UcdDatabase::load_dir(dir)?)?)
    }

    /// The process-wide engine used by the crate's free functions.
    ///
    /// On first use it loads the directory named by `CELLWIDTH_UCD_DIR` if
    /// set, falling back to the bundled snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the bundled snapshot itself fails to load.
    pub fn global() -> &'static WidthEngine {
        static GLOBAL: OnceLock<WidthEngine> = OnceLock::new();
        GLOBAL.get_or_init(init_global)
    }

    pub fn database(&self) -> &UcdDatabase {
        &self.db
    }

    pub fn facts(&self, cp: u32) -> CodepointFacts {
        self.db.facts(cp)
    }

    /// Column width of codepoint `cp`: -1 for backspace, 0 for codepoints
    /// above U+10FFFF, otherwise 0..=3.
    #[inline]
    pub fn rune_width(&self, cp: u32, options: WidthOptions) -> i32 {
        self.width_table(options).get(cp) as i32
    }

    #[inline]
    pub fn char_width(&self, c: char, options: WidthOptions) -> i32 {
        self.rune_width(c as u32, options)
    }

    /// Total column width of `text`, never negative.
    pub fn string_width(&self, text: &str, options: WidthOptions) -> usize {
        string_width::measure(self, text, options)
    }

    /// Extended grapheme clusters of `text`.
    pub fn graphemes<'a>(&'a self, text: &'a str) -> GraphemeClusters<'a> {
        GraphemeClusters::new(text, &self.boundaries)
    }

    /// The compiled width table for `options`.
    ///
    /// # Panics
    ///
    /// Panics if the table does not fit the 16-bit stage budget. The default
    /// options were checked in [`WidthEngine::new`]; use
    /// [`try_width_table`](Self::try_width_table) to handle the other
    /// combinations explicitly.
    pub fn width_table(&self, options: WidthOptions) -> &CompiledTable<i8> {
        match self.try_width_table(options) {
            Ok(table) => table,
            Err(err) => panic!("width table for {options:?} does not fit: {err}"),
        }
    }

    pub fn try_width_table(
        &self,
        options: WidthOptions,
    ) -> Result<&CompiledTable<i8>, TableOverflowError> {
        self.widths
            .get_or_try_insert(options, || self.compile_widths(options))
    }

    fn compile_widths(&self, options: WidthOptions) -> Result<CompiledTable<i8>, TableOverflowError> {
        let start = Instant::now();
        let table = TableCompiler::new().compile(
            |cp| width::resolve(cp, &self.db.facts(cp), options),
            |w| *w,
        )?;
        debug!(
            ambiguous_is_narrow = options.ambiguous_is_narrow,
            count_ansi_escape_codes = options.count_ansi_escape_codes,
            blocks = table.block_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "compiled width table"
        );
        Ok(table)
    }
}

fn init_global() -> WidthEngine {
    if let Some(dir) = std::env::var_os(UCD_DIR_ENV) {
        let dir = Path::new(&dir);
        match WidthEngine::from_dir(dir) {
            Ok(engine) => {
                info!(source = %dir.display(), "width engine initialised");
                return engine;
            }
            Err(err) => {
                warn!(
                    dir = %dir.display(),
                    error = %err,
                    "cannot load UCD directory, using the bundled snapshot"
                );
            }
        }
    }
    match WidthEngine::embedded() {
        Ok(engine) => {
            info!(source = "embedded", "width engine initialised");
            engine
        }
        Err(err) => panic!("bundled UCD snapshot is invalid: {err}"),
    }
}
