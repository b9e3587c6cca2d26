// cache.rs - One compiled table per WidthOptions combination.
//
// The option space is four values, so the cache is a fixed array of
// once-cells and never evicts.

use std::sync::OnceLock;

use crate::table::CompiledTable;
use crate::width::WidthOptions;

/// Lazily populated tables keyed by [`WidthOptions::cache_index`].
#[derive(Debug)]
pub struct TableCache<V> {
    slots: [OnceLock<CompiledTable<V>>; WidthOptions::COMBINATIONS],
}

impl<V> Default for TableCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TableCache<V> {
    pub fn new() -> Self {
        TableCache {
            slots: std::array::from_fn(|_| OnceLock::new()),
        }
    }

    pub fn get(&self, options: WidthOptions) -> Option<&CompiledTable<V>> {
        self.slots[options.cache_index()].get()
    }

    /// Return the table for `options`, building it on first use.
    ///
    /// Concurrent first calls may each run `build`; exactly one result is
    /// stored and every caller receives that one. `build` must therefore be
    /// deterministic.
    pub fn get_or_try_insert<E>(
        &self,
        options: WidthOptions,
        build: impl FnOnce() -> Result<CompiledTable<V>, E>,
    ) -> Result<&CompiledTable<V>, E> {
        let slot = &self.slots[options.cache_index()];
        if let Some(table) = slot.get() {
            return Ok(table);
        }
        let table = build()?;
        Ok(slot.get_or_init(|| table))
    }

    /// Number of populated slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
