// table.rs - 3-stage codepoint lookup tables.
//
// lookup(cp) = stage3[stage2[stage1[cp >> 8] + (cp & 0xFF)]]
//
// Stage 1 holds one Stage 2 offset per 256-codepoint block. Identical
// blocks share one copy in Stage 2, and identical values share one slot in
// Stage 3, so every index fits in 16 bits.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

use tracing::debug;

use crate::error::{Stage, StageError, TableOverflowError};

/// Maximum number of entries in any stage (16-bit indices).
pub const MAX_STAGE_LEN: usize = 1 << 16;

/// Codepoints per Stage 2 block.
pub const BLOCK_LEN: usize = 256;

/// One past the highest codepoint.
pub const CODEPOINT_LIMIT: u32 = 0x11_0000;

const BLOCK_SHIFT: u32 = 8;
const BLOCK_MASK: u32 = 0xFF;

/// Compiled, immutable 3-stage table.
///
/// Codepoints outside the compiled range resolve to `stage3[0]`, which is
/// always the value of codepoint 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTable<V> {
    stage1: Box<[u16]>,
    stage2: Box<[u16]>,
    stage3: Box<[V]>,
}

impl<V> CompiledTable<V> {
    /// Assemble a table from pre-built stages, checking every index.
    pub fn from_stages(
        stage1: Vec<u16>,
        stage2: Vec<u16>,
        stage3: Vec<V>,
    ) -> Result<Self, StageError> {
        for (stage, len) in [
            (Stage::Stage1, stage1.len()),
            (Stage::Stage2, stage2.len()),
            (Stage::Stage3, stage3.len()),
        ] {
            if len > MAX_STAGE_LEN {
                return Err(TableOverflowError {
                    stage,
                    required: len,
                }
                .into());
            }
        }
        if stage3.is_empty() {
            return Err(StageError::EmptyValues);
        }
        for (index, &offset) in stage1.iter().enumerate() {
            let offset = offset as usize;
            if offset + BLOCK_LEN > stage2.len() {
                return Err(StageError::BlockOutOfBounds { index, offset });
            }
        }
        for (index, &value) in stage2.iter().enumerate() {
            if value as usize >= stage3.len() {
                return Err(StageError::ValueOutOfBounds {
                    index,
                    value: value as usize,
                });
            }
        }
        Ok(CompiledTable {
            stage1: stage1.into_boxed_slice(),
            stage2: stage2.into_boxed_slice(),
            stage3: stage3.into_boxed_slice(),
        })
    }

    #[inline]
    pub fn lookup(&self, cp: u32) -> &V {
        match self.stage1.get((cp >> BLOCK_SHIFT) as usize) {
            Some(&offset) => {
                let index = self.stage2[offset as usize + (cp & BLOCK_MASK) as usize];
                &self.stage3[index as usize]
            }
            None => &self.stage3[0],
        }
    }

    /// Value used for padding and out-of-range codepoints.
    #[inline]
    pub fn default_value(&self) -> &V {
        &self.stage3[0]
    }

    pub fn stage1(&self) -> &[u16] {
        &self.stage1
    }

    pub fn stage2(&self) -> &[u16] {
        &self.stage2
    }

    pub fn stage3(&self) -> &[V] {
        &self.stage3
    }

    /// Number of distinct Stage 2 blocks.
    pub fn block_count(&self) -> usize {
        self.stage2.len() / BLOCK_LEN
    }

    /// Approximate heap footprint in bytes.
    pub fn heap_size(&self) -> usize {
        (self.stage1.len() + self.stage2.len()) * std::mem::size_of::<u16>()
            + self.stage3.len() * std::mem::size_of::<V>()
    }
}

impl<V: Copy> CompiledTable<V> {
    #[inline]
    pub fn get(&self, cp: u32) -> V {
        *self.lookup(cp)
    }
}

/// Builds a [`CompiledTable`] from a per-codepoint value function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCompiler {
    limit: u32,
}

impl Default for TableCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl TableCompiler {
    pub fn new() -> Self {
        TableCompiler {
            limit: CODEPOINT_LIMIT,
        }
    }

    /// Only compile codepoints below `limit` (clamped to `1..=0x110000`).
    /// The last block is zero-padded when `limit` is not a multiple of 256.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, CODEPOINT_LIMIT);
        self
    }

    /// Compile `value(cp)` for every codepoint below the limit.
    ///
    /// `key` maps a value to its identity in Stage 3; values with equal keys
    /// share a slot. `value(0)` is evaluated first so that zero padding
    /// resolves to it.
    pub fn compile<V, K, F, G>(&self, mut value: F, key: G) -> Result<CompiledTable<V>, TableOverflowError>
    where
        F: FnMut(u32) -> V,
        G: Fn(&V) -> K,
        K: Hash + Eq,
    {
        let start = Instant::now();
        let block_total = (self.limit as usize).div_ceil(BLOCK_LEN);

        let mut stage1 = Vec::with_capacity(block_total);
        let mut blocks = BlockInterner::default();
        let mut values = ValueInterner::new(key);
        let mut block = [0u16; BLOCK_LEN];

        for block_index in 0..block_total {
            let base = (block_index * BLOCK_LEN) as u32;
            let fill = ((self.limit - base) as usize).min(BLOCK_LEN);
            for (slot, entry) in block.iter_mut().enumerate() {
                *entry = if slot < fill {
                    values.intern(value(base + slot as u32))?
                } else {
                    0
                };
            }
            stage1.push(blocks.intern(&block)?);
        }

        let table = CompiledTable {
            stage1: stage1.into_boxed_slice(),
            stage2: blocks.stage2.into_boxed_slice(),
            stage3: values.stage3.into_boxed_slice(),
        };
        debug!(
            limit = self.limit,
            stage1 = table.stage1.len(),
            stage2 = table.stage2.len(),
            stage3 = table.stage3.len(),
            bytes = table.heap_size(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "compiled 3-stage table"
        );
        Ok(table)
    }
}

#[derive(Default)]
struct BlockInterner {
    stage2: Vec<u16>,
    offsets: HashMap<[u16; BLOCK_LEN], u16>,
}

impl BlockInterner {
    fn intern(&mut self, block: &[u16; BLOCK_LEN]) -> Result<u16, TableOverflowError> {
        if let Some(&offset) = self.offsets.get(block) {
            return Ok(offset);
        }
        let offset = self.stage2.len();
        let required = offset + BLOCK_LEN;
        // The offset itself must also fit in a u16 stage 1 entry.
        if required > MAX_STAGE_LEN {
            return Err(TableOverflowError {
                stage: Stage::Stage2,
                required,
            });
        }
        self.stage2.extend_from_slice(block);
        self.offsets.insert(*block, offset as u16);
        Ok(offset as u16)
    }
}

struct ValueInterner<V, K, G> {
    stage3: Vec<V>,
    index: HashMap<K, u16>,
    key: G,
}

impl<V, K, G> ValueInterner<V, K, G>
where
    G: Fn(&V) -> K,
    K: Hash + Eq,
{
    fn new(key: G) -> Self {
        ValueInterner {
            stage3: Vec::new(),
            index: HashMap::new(),
            key,
        }
    }

    fn intern(&mut self, value: V) -> Result<u16, TableOverflowError> {
        let k = (self.key)(&value);
        if let Some(&i) = self.index.get(&k) {
            return Ok(i);
        }
        let i = self.stage3.len();
        if i >= MAX_STAGE_LEN {
            return Err(TableOverflowError {
                stage: Stage::Stage3,
                required: i + 1,
            });
        }
        self.index.insert(k, i as u16);
        self.stage3.push(value);
        Ok(i as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_table_is_one_block() {
        let t = TableCompiler::new().compile(|_| 1u8, |v| *v).unwrap();
        assert_eq!(t.stage1().len(), 0x1100);
        assert_eq!(t.block_count(), 1);
        assert_eq!(t.stage3(), &[1]);
        assert_eq!(t.get(0x10FFFF), 1);
    }

    #[test]
    fn values_round_trip() {
        let f = |cp: u32| (cp % 7) as u8 + if (0x4E00..0xA000).contains(&cp) { 10 } else { 0 };
        let t = TableCompiler::new().compile(f, |v| *v).unwrap();
        for cp in (0..CODEPOINT_LIMIT).step_by(97) {
            assert_eq!(t.get(cp), f(cp), "cp {cp:X}");
        }
    }

    #[test]
    fn padding_and_out_of_range_use_value_of_zero() {
        let t = TableCompiler::new()
            .limit(0x141)
            .compile(|cp| if cp == 0 { 9u8 } else { 1 }, |v| *v)
            .unwrap();
        assert_eq!(t.stage1().len(), 2);
        assert_eq!(t.get(0x140), 1);
        // Zero-padded tail of the partial block.
        assert_eq!(t.get(0x141), 9);
        assert_eq!(t.get(0x1FF), 9);
        // Past stage 1.
        assert_eq!(t.get(0x200), 9);
        assert_eq!(t.get(u32::MAX), 9);
        assert_eq!(*t.default_value(), 9);
    }

    #[test]
    fn dedup_uses_key() {
        #[derive(Debug, Clone)]
        struct Tagged(u8, &'static str);
        let t = TableCompiler::new()
            .limit(512)
            .compile(|cp| Tagged((cp % 2) as u8, "ignored"), |v| v.0)
            .unwrap();
        assert_eq!(t.stage3().len(), 2);
        assert_eq!(t.lookup(3).0, 1);
        assert_eq!(t.lookup(3).1, "ignored");
    }

    #[test]
    fn stage3_overflow() {
        let err = TableCompiler::new().compile(|cp| cp, |v| *v).unwrap_err();
        assert_eq!(err.stage, Stage::Stage3);
        assert_eq!(err.required, MAX_STAGE_LEN + 1);
    }

    #[test]
    fn limit_is_clamped() {
        let t = TableCompiler::new().limit(0).compile(|_| 4u8, |v| *v).unwrap();
        assert_eq!(t.stage1().len(), 1);
        assert_eq!(t.get(0), 4);
    }

    #[test]
    fn from_stages_validates() {
        let ok = CompiledTable::from_stages(vec![0], vec![0; BLOCK_LEN], vec!['a']).unwrap();
        assert_eq!(ok.get(5), 'a');

        assert_eq!(
            CompiledTable::<u8>::from_stages(vec![0], vec![0; BLOCK_LEN], vec![]),
            Err(StageError::EmptyValues)
        );
        assert_eq!(
            CompiledTable::from_stages(vec![0, 1], vec![0; BLOCK_LEN], vec![0u8]),
            Err(StageError::BlockOutOfBounds { index: 1, offset: 1 })
        );
        let mut stage2 = vec![0; BLOCK_LEN];
        stage2[7] = 2;
        assert_eq!(
            CompiledTable::from_stages(vec![0], stage2, vec![0u8, 1]),
            Err(StageError::ValueOutOfBounds { index: 7, value: 2 })
        );
        assert!(matches!(
            CompiledTable::from_stages(vec![0], vec![0; MAX_STAGE_LEN + 1], vec![0u8]),
            Err(StageError::Overflow(TableOverflowError { stage: Stage::Stage2, .. }))
        ));
    }

    #[test]
    fn compiled_stages_reassemble() {
        let t = TableCompiler::new()
            .limit(0x3000)
            .compile(|cp| (cp >> 9) as u8, |v| *v)
            .unwrap();
        let copy = CompiledTable::from_stages(
            t.stage1().to_vec(),
            t.stage2().to_vec(),
            t.stage3().to_vec(),
        )
        .unwrap();
        assert_eq!(copy, t);
    }
}
