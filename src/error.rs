//! Error kinds surfaced by build and deserialize.
//!
//! Grounded on the teacher's `bdz::MphError`, kept as a `thiserror` enum and
//! extended with `DeserializeCorrupt` for the hand-rolled canonical wire
//! format this crate introduces in place of the teacher's opaque `bincode`
//! round-trip.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MphError {
    /// A pre-pass over `KeyBytes` output found two equal keys. The peeler
    /// would otherwise silently corrupt on identical hyperedges.
    #[error("duplicate key detected during build")]
    DuplicateKey,

    /// The hypergraph did not peel within the configured attempt cap.
    #[error("hypergraph was not peelable after {attempts} attempt(s)")]
    BuildExhausted { attempts: u32 },

    /// Magic/version mismatch, a truncated payload, or a loaded structure
    /// that fails the invariants checked after deserialization.
    #[error("corrupt serialized data: {0}")]
    DeserializeCorrupt(&'static str),

    /// I/O failure while reading or writing a wire form.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A textual-form field was not a valid unsigned decimal.
    #[error("malformed textual field: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}
