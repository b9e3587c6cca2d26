// ucd/map.rs - Total codepoint -> value maps.
//
// A map is painted densely while UCD files are ingested (later ranges
// overwrite earlier ones, defaults never overwrite an explicit value) and
// then frozen into sorted runs, which is all a
// lookup needs and a fraction of the memory.

use std::ops::RangeInclusive;

use super::parse::MAX_CODEPOINT;

/// Number of codepoints in U+0000..=U+10FFFF.
pub const CODEPOINT_COUNT: usize = MAX_CODEPOINT as usize + 1;

/// Frozen map from every codepoint to a value.
///
/// Codepoints above U+10FFFF map to the default value the map was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMap<V> {
    /// Run start codepoints, strictly increasing, `starts[0] == 0`.
    starts: Box<[u32]>,
    values: Box<[V]>,
    default: V,
}

impl<V: Copy + PartialEq> PropertyMap<V> {
    pub fn builder(default: V) -> PropertyMapBuilder<V> {
        PropertyMapBuilder {
            values: vec![default; CODEPOINT_COUNT].into_boxed_slice(),
            explicit: vec![0; CODEPOINT_COUNT.div_ceil(64)].into_boxed_slice(),
            default,
        }
    }

    /// Map every codepoint to `value`.
    pub fn constant(value: V) -> Self {
        PropertyMap {
            starts: Box::new([0]),
            values: Box::new([value]),
            default: value,
        }
    }

    #[inline]
    pub fn get(&self, cp: u32) -> V {
        if cp > MAX_CODEPOINT {
            return self.default;
        }
        // `starts[0] == 0`, so the partition point is at least 1.
        let run = self.starts.partition_point(|&s| s <= cp) - 1;
        self.values[run]
    }

    /// Maximal runs of equal values, in codepoint order.
    pub fn runs(&self) -> impl Iterator<Item = (RangeInclusive<u32>, V)> + '_ {
        self.starts.iter().enumerate().map(move |(i, &start)| {
            let end = match self.starts.get(i + 1) {
                Some(&next) => next - 1,
                None => MAX_CODEPOINT,
            };
            (start..=end, self.values[i])
        })
    }

    pub fn run_count(&self) -> usize {
        self.starts.len()
    }
}

/// Dense, mutable form of a [`PropertyMap`].
#[derive(Debug, Clone)]
pub struct PropertyMapBuilder<V> {
    values: Box<[V]>,
    /// One bit per codepoint, set once a record has assigned it.
    explicit: Box<[u64]>,
    default: V,
}

impl<V: Copy + PartialEq> PropertyMapBuilder<V> {
    /// Set every codepoint in `range` to `value`.
    ///
    /// Ranges come from [`super::parse`], which rejects anything past
    /// U+10FFFF; an out-of-range tail is ignored here.
    pub fn assign(&mut self, range: RangeInclusive<u32>, value: V) {
        let Some((start, end)) = clamp(range) else {
            return;
        };
        self.values[start..=end].fill(value);
        for cp in start..=end {
            self.explicit[cp / 64] |= 1 << (cp % 64);
        }
    }

    /// Set `value` on the codepoints in `range` that no [`assign`] call has
    /// reached yet. Later defaults replace earlier defaults.
    ///
    /// [`assign`]: Self::assign
    pub fn assign_default(&mut self, range: RangeInclusive<u32>, value: V) {
        let Some((start, end)) = clamp(range) else {
            return;
        };
        for cp in start..=end {
            if self.explicit[cp / 64] & (1 << (cp % 64)) == 0 {
                self.values[cp] = value;
            }
        }
    }

    /// Whether a record (not a default) has set `cp`.
    pub fn is_explicit(&self, cp: u32) -> bool {
        let cp = cp as usize;
        cp < CODEPOINT_COUNT && self.explicit[cp / 64] & (1 << (cp % 64)) != 0
    }

    /// Apply `f` to every codepoint in `range`.
    pub fn update(&mut self, range: RangeInclusive<u32>, mut f: impl FnMut(&mut V)) {
        if let Some(slots) = self.slots(range) {
            slots.iter_mut().for_each(&mut f);
        }
    }

    #[inline]
    pub fn get(&self, cp: u32) -> V {
        self.values.get(cp as usize).copied().unwrap_or(self.default)
    }

    fn slots(&mut self, range: RangeInclusive<u32>) -> Option<&mut [V]> {
        let (start, end) = clamp(range)?;
        Some(&mut self.values[start..=end])
    }

    pub fn build(&self) -> PropertyMap<V> {
        let mut starts = Vec::new();
        let mut values = Vec::new();
        for (cp, &value) in self.values.iter().enumerate() {
            if values.last() != Some(&value) {
                starts.push(cp as u32);
                values.push(value);
            }
        }
        PropertyMap {
            starts: starts.into_boxed_slice(),
            values: values.into_boxed_slice(),
            default: self.default,
        }
    }
}

fn clamp(range: RangeInclusive<u32>) -> Option<(usize, usize)> {
    let start = *range.start() as usize;
    let end = (*range.end()).min(MAX_CODEPOINT) as usize;
    (start <= end).then_some((start, end))
}
