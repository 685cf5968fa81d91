//! minimal_perfect_hash — BDZ (3-hypergraph peeling) minimal perfect hashing.
//!
//! - Build once on a set of **unique** keys (integers, byte strings, pairs,
//!   sequences, and composites thereof via [`KeyBytes`]).
//! - O(1) lookups: key -> slot in `[0, m)` ([`PerfectHash`]) or index in
//!   `[0, n)` ([`MinimalPerfectHash`]).
//! - Robust: if a build attempt finds the hypergraph's 2-core non-empty, it
//!   retries with a fresh, deterministically-derived seed.
//! - Behavior on keys outside the built set is undefined by design — the
//!   structure stores no keys and cannot detect foreign input.

mod config;
mod error;
mod garray;
mod hash;
mod key_bytes;
mod minimal_perfect_hash;
mod peel;
mod perfect_hash;
mod rank;
mod util;
mod wire;

pub use config::{BuildConfig, Seed};
pub use error::MphError;
pub use key_bytes::{KeyBytes, Seq};
pub use minimal_perfect_hash::MinimalPerfectHash;
pub use perfect_hash::PerfectHash;
