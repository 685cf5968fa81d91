//! Two-level rank dictionary over the occupancy bitmap, per spec §4.5.
//!
//! Grounded on `beling-bsuccinct-rs/bitm/src/array_with_rank.rs`'s
//! `ArrayWithRank101111` for the "cumulative counters at two granularities"
//! idiom, scaled down to the super-block (256 bits) / block (64 bits)
//! granularity the spec calls for rather than that crate's denser
//! 32-bit/11-bit packed scheme.

use crate::garray::GArray;
use crate::util::BitSet;

const BITS_PER_BLOCK: u32 = 64;
const BLOCKS_PER_SUPERBLOCK: usize = 4; // 256 / 64

/// Supports `rank1(i)` — the number of set bits in `[0, i)` — in O(1), using
/// O(m / 64) additional 16-bit counters plus O(m / 256) 64-bit counters.
#[derive(Debug, Clone)]
pub struct RankDict {
    /// Cumulative rank at the start of each super-block.
    superblock: Vec<u64>,
    /// Cumulative rank within its super-block at the start of each block.
    block: Vec<u16>,
    /// The occupancy bitmap itself, needed for the final partial-word
    /// popcount within a rank query.
    words: Vec<u64>,
    m: u32,
    total_ones: u64,
}

/// Derives the occupancy bitmap words (`b[i] = g[i] != GArray::UNUSED`)
/// directly from a g-array, per the invariant `g[i] = 3 ⇔ b[i] = 0`.
pub fn occupancy_words(g: &GArray) -> Vec<u64> {
    let m = g.m() as usize;
    let mut bits = BitSet::new(m);
    for i in 0..g.m() {
        if !g.is_unused(i) {
            bits.set(i as usize);
        }
    }
    bits.words().to_vec()
}

impl RankDict {
    /// Builds the rank structure over `words` (an occupancy bitmap of `m`
    /// bits, word `ceil(m/64)` long).
    pub fn build(words: Vec<u64>, m: u32) -> Self {
        debug_assert_eq!(words.len(), ((m as usize) + 63) / 64);
        let mut superblock = Vec::with_capacity(words.len().div_ceil(BLOCKS_PER_SUPERBLOCK));
        let mut block = Vec::with_capacity(words.len());
        let mut total: u64 = 0;
        for chunk in words.chunks(BLOCKS_PER_SUPERBLOCK) {
            superblock.push(total);
            let mut within: u16 = 0;
            for &w in chunk {
                block.push(within);
                within += w.count_ones() as u16;
            }
            total += within as u64;
        }
        Self {
            superblock,
            block,
            words,
            m,
            total_ones: total,
        }
    }

    /// Rebuilds the rank structure directly from a g-array, as permitted by
    /// spec §6 ("recomputed on load from g alone").
    pub fn from_garray(g: &GArray) -> Self {
        Self::build(occupancy_words(g), g.m())
    }

    #[inline]
    pub fn total_ones(&self) -> u64 {
        self.total_ones
    }

    /// Number of set bits in `b[0..index)`.
    #[inline]
    pub fn rank1(&self, index: u32) -> u32 {
        debug_assert!(index <= self.m);
        if index == self.m {
            return self.total_ones as u32;
        }
        let block_idx = (index / BITS_PER_BLOCK) as usize;
        let sb_idx = block_idx / BLOCKS_PER_SUPERBLOCK;
        let mut r = self.superblock[sb_idx] + self.block[block_idx] as u64;
        let bit_in_word = index % BITS_PER_BLOCK;
        if bit_in_word > 0 {
            let word = self.words[block_idx];
            let mask = (1u64 << bit_in_word) - 1;
            r += (word & mask).count_ones() as u64;
        }
        r as u32
    }
}
