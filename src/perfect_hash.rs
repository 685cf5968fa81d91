//! The `PerfectHash` facade: build + query over the non-minimal range `M`.
//!
//! Grounded on the teacher's `bdz::Builder`/`bdz::Mphf` split (a config
//! struct, a builder that owns the retry loop, and an immutable result
//! struct holding `(n, m, seed, g)`).

use std::collections::HashSet;

use crate::config::{mix_seed, BuildConfig};
use crate::error::MphError;
use crate::garray::GArray;
use crate::hash::vertices;
use crate::key_bytes::KeyBytes;
use crate::peel;

/// An immutable, injective map from a built key set `S` into `[0, m)`.
///
/// `get_hash` is undefined for keys outside the set the instance was built
/// with — the structure does not store keys and cannot detect foreign
/// input.
#[derive(Debug, Clone)]
pub struct PerfectHash {
    pub(crate) n: u64,
    pub(crate) seed: u64,
    pub(crate) g: GArray,
}

impl PerfectHash {
    /// Builds a `PerfectHash` over `keys`. Keys must be pairwise distinct
    /// under `KeyBytes::to_bytes`; duplicates are rejected with
    /// `MphError::DuplicateKey` rather than silently corrupting the build.
    pub fn build<K: KeyBytes>(keys: &[K], cfg: &BuildConfig) -> Result<Self, MphError> {
        let keys_bytes = to_unique_bytes(keys)?;
        let n = keys_bytes.len();

        if n == 0 {
            log::info!("build: empty key set, trivially succeeds with m=0");
            return Ok(Self {
                n: 0,
                seed: cfg.seed.0,
                g: GArray::from_values(&[], 0),
            });
        }

        let m = table_size(n as u32, cfg.load_factor);

        for attempt in 0..=cfg.max_attempts {
            let seed = mix_seed(cfg.seed.0, attempt);
            match peel::try_peel(&keys_bytes, seed, m) {
                Some(values) => {
                    log::info!(
                        "build: succeeded after {} attempt(s) (n={n}, m={m})",
                        attempt + 1
                    );
                    return Ok(Self {
                        n: n as u64,
                        seed,
                        g: GArray::from_values(&values, m),
                    });
                }
                None => {
                    log::debug!("build: attempt {attempt} (seed={seed}) failed to peel");
                }
            }
        }

        Err(MphError::BuildExhausted {
            attempts: cfg.max_attempts + 1,
        })
    }

    /// Returns the slot assigned to `key`. Defined only for keys that were
    /// part of the set this instance was built from.
    #[inline]
    pub fn get_hash<K: KeyBytes>(&self, key: &K) -> u32 {
        if self.g.m() == 0 {
            return 0;
        }
        let bytes = key.to_bytes();
        let v = vertices(&bytes, self.seed, self.g.m());
        let ga = self.g.get(v.v0);
        let gb = self.g.get(v.v1);
        let gc = self.g.get(v.v2);
        let j = (ga as u32 + gb as u32 + gc as u32) % 3;
        v.as_array()[j as usize]
    }

    /// Returns `M`, the exclusive upper bound of this instance's range.
    #[inline]
    pub fn get_range(&self) -> u32 {
        self.g.m()
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub(crate) fn garray(&self) -> &GArray {
        &self.g
    }

    pub(crate) fn seed(&self) -> u64 {
        self.seed
    }

    pub(crate) fn from_parts(n: u64, seed: u64, g: GArray) -> Self {
        Self { n, seed, g }
    }
}

/// Converts every key to bytes and rejects the build on the first
/// duplicate, matching the teacher's `HashSet`-based pre-pass.
pub(crate) fn to_unique_bytes<K: KeyBytes>(keys: &[K]) -> Result<Vec<Vec<u8>>, MphError> {
    let mut seen = HashSet::with_capacity(keys.len());
    let mut out = Vec::with_capacity(keys.len());
    for k in keys {
        let bytes = k.to_bytes();
        if !seen.insert(bytes.clone()) {
            return Err(MphError::DuplicateKey);
        }
        out.push(bytes);
    }
    Ok(out)
}

/// `m = ceil(load_factor * n)`, rounded up to the next multiple of 3 so
/// each of h0/h1/h2 gets an equal-sized third of the table.
pub(crate) fn table_size(n: u32, load_factor: f64) -> u32 {
    let raw = (load_factor * n as f64).ceil() as u32;
    let rounded = raw.max(3).div_ceil(3) * 3;
    rounded
}
