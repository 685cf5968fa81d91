//! The `MinimalPerfectHash` facade: `PerfectHash` plus the rank fold-down
//! that collapses `[0, m)` onto `[0, n)`.
//!
//! This is the one piece with no counterpart in the teacher, which only
//! builds the non-minimal BDZ array directly. The formula itself follows
//! spec §4.7: `get_hash(key) = rank1(ph.get_hash(key))`.

use crate::config::BuildConfig;
use crate::error::MphError;
use crate::garray::GArray;
use crate::key_bytes::KeyBytes;
use crate::perfect_hash::PerfectHash;
use crate::rank::RankDict;

/// An immutable bijection from a built key set `S` onto `[0, n)`.
#[derive(Debug, Clone)]
pub struct MinimalPerfectHash {
    ph: PerfectHash,
    rank: RankDict,
}

impl MinimalPerfectHash {
    /// Builds a `MinimalPerfectHash` over `keys`.
    pub fn build<K: KeyBytes>(keys: &[K], cfg: &BuildConfig) -> Result<Self, MphError> {
        let ph = PerfectHash::build(keys, cfg)?;
        let rank = RankDict::from_garray(ph.garray());
        log::info!(
            "minimal build: derived rank index over {} bits ({} occupied)",
            ph.garray().m(),
            rank.total_ones()
        );
        Ok(Self { ph, rank })
    }

    /// Returns the index assigned to `key`, in `[0, get_range())`. Defined
    /// only for keys that were part of the set this instance was built
    /// from.
    #[inline]
    pub fn get_hash<K: KeyBytes>(&self, key: &K) -> u32 {
        if self.ph.is_empty() {
            return 0;
        }
        self.rank.rank1(self.ph.get_hash(key))
    }

    /// Returns `N`, the number of keys this instance was built from.
    #[inline]
    pub fn get_range(&self) -> u32 {
        self.ph.len() as u32
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.ph.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ph.is_empty()
    }

    pub(crate) fn ph(&self) -> &PerfectHash {
        &self.ph
    }

    pub(crate) fn from_parts(n: u64, seed: u64, g: GArray) -> Self {
        let rank = RankDict::from_garray(&g);
        Self {
            ph: PerfectHash::from_parts(n, seed, g),
            rank,
        }
    }
}
