//! Canonical serialization: a fixed binary layout and a whitespace-decimal
//! textual layout, per spec §6.
//!
//! The spec's redesign note in §9 ("Persistence framework") replaces the
//! original's host-framework serialization (`boost::archive::text_oarchive`)
//! with a direct reader/writer over a fixed byte layout; this module is
//! that direct reader/writer. Auxiliaries (the occupancy bitmap, the rank
//! index) are never stored — they are always recomputed from `g` on load,
//! the space-saving option spec §6 explicitly allows.

use std::io::{BufRead, Read, Write};

use crate::error::MphError;
use crate::garray::GArray;
use crate::minimal_perfect_hash::MinimalPerfectHash;
use crate::perfect_hash::PerfectHash;

const MAGIC: &[u8; 4] = b"MPHF";
const VERSION: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Perfect = 0,
    Minimal = 1,
}

impl Kind {
    fn from_u8(b: u8) -> Result<Self, MphError> {
        match b {
            0 => Ok(Kind::Perfect),
            1 => Ok(Kind::Minimal),
            _ => Err(MphError::DeserializeCorrupt("unknown kind tag")),
        }
    }
}

fn write_header<W: Write>(w: &mut W, kind: Kind, n: u64, m: u64, seed: u64) -> std::io::Result<()> {
    w.write_all(MAGIC)?;
    w.write_all(&VERSION.to_le_bytes())?;
    w.write_all(&[kind as u8])?;
    w.write_all(&n.to_le_bytes())?;
    w.write_all(&m.to_le_bytes())?;
    w.write_all(&seed.to_le_bytes())?;
    Ok(())
}

struct Header {
    kind: Kind,
    n: u64,
    m: u64,
    seed: u64,
}

fn read_header<R: Read>(r: &mut R) -> Result<Header, MphError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(MphError::DeserializeCorrupt("bad magic"));
    }
    let mut version = [0u8; 2];
    r.read_exact(&mut version)?;
    if u16::from_le_bytes(version) != VERSION {
        return Err(MphError::DeserializeCorrupt("unsupported version"));
    }
    let mut kind_byte = [0u8; 1];
    r.read_exact(&mut kind_byte)?;
    let kind = Kind::from_u8(kind_byte[0])?;
    let mut n_buf = [0u8; 8];
    r.read_exact(&mut n_buf)?;
    let n = u64::from_le_bytes(n_buf);
    let mut m_buf = [0u8; 8];
    r.read_exact(&mut m_buf)?;
    let m = u64::from_le_bytes(m_buf);
    let mut seed_buf = [0u8; 8];
    r.read_exact(&mut seed_buf)?;
    let seed = u64::from_le_bytes(seed_buf);
    Ok(Header { kind, n, m, seed })
}

fn validate(n: u64, m: u64) -> Result<u32, MphError> {
    if m > u32::MAX as u64 || n > m {
        return Err(MphError::DeserializeCorrupt("n/m out of range"));
    }
    if m != 0 && m % 3 != 0 {
        return Err(MphError::DeserializeCorrupt("m is not a multiple of 3"));
    }
    Ok(m as u32)
}

fn read_garray<R: Read>(r: &mut R, m: u32, n: u64) -> Result<GArray, MphError> {
    let byte_len = ((m as usize) + 3) / 4;
    let mut bytes = vec![0u8; byte_len];
    r.read_exact(&mut bytes)?;
    let g = GArray::from_bytes(bytes, m)
        .ok_or(MphError::DeserializeCorrupt("g payload length mismatch"))?;
    check_occupancy(&g, n)?;
    Ok(g)
}

/// Spec §3's data-model invariant: exactly `n` slots are occupied. A loaded
/// `g` that violates this is corrupt even if every individual value and
/// length check above it passed.
fn check_occupancy(g: &GArray, n: u64) -> Result<(), MphError> {
    if g.occupied_count() as u64 != n {
        return Err(MphError::DeserializeCorrupt(
            "occupied slot count does not match n",
        ));
    }
    Ok(())
}

impl PerfectHash {
    /// Writes the canonical binary layout.
    pub fn serialize<W: Write>(&self, mut w: W) -> Result<(), MphError> {
        write_header(&mut w, Kind::Perfect, self.len(), self.get_range() as u64, self.seed())?;
        w.write_all(self.garray().as_bytes())?;
        Ok(())
    }

    /// Reads a binary payload written by [`PerfectHash::serialize`].
    pub fn deserialize<R: Read>(mut r: R) -> Result<Self, MphError> {
        let header = read_header(&mut r)?;
        if header.kind != Kind::Perfect {
            return Err(MphError::DeserializeCorrupt("expected PerfectHash, found MinimalPerfectHash"));
        }
        let m = validate(header.n, header.m)?;
        let g = read_garray(&mut r, m, header.n)?;
        Ok(PerfectHash::from_parts(header.n, header.seed, g))
    }

    /// Writes the whitespace-delimited textual layout: version, kind, n, m,
    /// seed, then `m` decimal g-values.
    pub fn serialize_text<W: Write>(&self, mut w: W) -> Result<(), MphError> {
        write!(w, "{} {} {} {} {}", VERSION, Kind::Perfect as u8, self.len(), self.get_range(), self.seed())?;
        for i in 0..self.get_range() {
            write!(w, " {}", self.garray().get(i))?;
        }
        writeln!(w)?;
        Ok(())
    }

    /// Reads a textual payload written by [`PerfectHash::serialize_text`].
    pub fn deserialize_text<R: BufRead>(r: R) -> Result<Self, MphError> {
        let (kind, n, m_u64, seed, values) = read_text_fields(r)?;
        if kind != Kind::Perfect {
            return Err(MphError::DeserializeCorrupt("expected PerfectHash, found MinimalPerfectHash"));
        }
        let m = validate(n, m_u64)?;
        let g = values_to_garray(values, m, n)?;
        Ok(PerfectHash::from_parts(n, seed, g))
    }
}

impl MinimalPerfectHash {
    pub fn serialize<W: Write>(&self, mut w: W) -> Result<(), MphError> {
        let ph = self.ph();
        write_header(&mut w, Kind::Minimal, ph.len(), ph.get_range() as u64, ph.seed())?;
        w.write_all(ph.garray().as_bytes())?;
        Ok(())
    }

    pub fn deserialize<R: Read>(mut r: R) -> Result<Self, MphError> {
        let header = read_header(&mut r)?;
        if header.kind != Kind::Minimal {
            return Err(MphError::DeserializeCorrupt("expected MinimalPerfectHash, found PerfectHash"));
        }
        let m = validate(header.n, header.m)?;
        let g = read_garray(&mut r, m, header.n)?;
        Ok(MinimalPerfectHash::from_parts(header.n, header.seed, g))
    }

    pub fn serialize_text<W: Write>(&self, mut w: W) -> Result<(), MphError> {
        let ph = self.ph();
        write!(w, "{} {} {} {} {}", VERSION, Kind::Minimal as u8, ph.len(), ph.get_range(), ph.seed())?;
        for i in 0..ph.get_range() {
            write!(w, " {}", ph.garray().get(i))?;
        }
        writeln!(w)?;
        Ok(())
    }

    pub fn deserialize_text<R: BufRead>(r: R) -> Result<Self, MphError> {
        let (kind, n, m_u64, seed, values) = read_text_fields(r)?;
        if kind != Kind::Minimal {
            return Err(MphError::DeserializeCorrupt("expected MinimalPerfectHash, found PerfectHash"));
        }
        let m = validate(n, m_u64)?;
        let g = values_to_garray(values, m, n)?;
        Ok(MinimalPerfectHash::from_parts(n, seed, g))
    }
}

fn values_to_garray(values: Vec<u8>, m: u32, n: u64) -> Result<GArray, MphError> {
    if values.len() != m as usize {
        return Err(MphError::DeserializeCorrupt("g value count mismatch"));
    }
    if values.iter().any(|&v| v > 3) {
        return Err(MphError::DeserializeCorrupt("g value out of range"));
    }
    let g = GArray::from_values(&values, m);
    check_occupancy(&g, n)?;
    Ok(g)
}

#[allow(clippy::type_complexity)]
fn read_text_fields<R: BufRead>(mut r: R) -> Result<(Kind, u64, u64, u64, Vec<u8>), MphError> {
    let mut line = String::new();
    r.read_line(&mut line)?;
    let mut it = line.split_ascii_whitespace();
    let version: u16 = it
        .next()
        .ok_or(MphError::DeserializeCorrupt("missing version field"))?
        .parse()?;
    if version != VERSION {
        return Err(MphError::DeserializeCorrupt("unsupported version"));
    }
    let kind_raw: u8 = it
        .next()
        .ok_or(MphError::DeserializeCorrupt("missing kind field"))?
        .parse()?;
    let kind = Kind::from_u8(kind_raw)?;
    let n: u64 = it
        .next()
        .ok_or(MphError::DeserializeCorrupt("missing n field"))?
        .parse()?;
    let m: u64 = it
        .next()
        .ok_or(MphError::DeserializeCorrupt("missing m field"))?
        .parse()?;
    let seed: u64 = it
        .next()
        .ok_or(MphError::DeserializeCorrupt("missing seed field"))?
        .parse()?;
    let mut values = Vec::with_capacity(m as usize);
    for tok in it {
        values.push(tok.parse::<u8>()?);
    }
    Ok((kind, n, m, seed, values))
}
