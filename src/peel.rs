//! The hypergraph peeler — the heart of Build.
//!
//! Grounded on the teacher's `bdz.rs::try_build_bdz`: CSR adjacency build,
//! a degree-1 queue, a peel stack, and reverse-order assignment. The
//! assignment arithmetic itself is generalized from the teacher's "assign
//! the key's final output value directly" scheme to the spec's "g[v]
//! selects which of h0/h1/h2 a query should read" scheme (§4.3), which is
//! what makes the separate rank dictionary in `rank.rs` necessary.

use crate::hash::vertices;
use crate::util::BitSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One build attempt: given the vertex triples for every key (already
/// confined to `[0, m)`, `m` a multiple of 3), tries to peel the
/// hypergraph and, on success, returns the assignment array values
/// (length `m`, each in `0..=3`, `3` meaning "unused").
///
/// Returns `None` if the hypergraph's 2-core is non-empty (peeling did not
/// remove all `n` edges) — the caller should retry with a new seed.
pub fn try_peel(keys_bytes: &[Vec<u8>], seed: u64, m: u32) -> Option<Vec<u8>> {
    let n = keys_bytes.len();
    if n == 0 {
        return Some(Vec::new());
    }

    #[cfg(feature = "parallel")]
    let verts: Vec<[u32; 3]> = keys_bytes
        .par_iter()
        .map(|k| vertices(k, seed, m).as_array())
        .collect();
    #[cfg(not(feature = "parallel"))]
    let verts: Vec<[u32; 3]> = keys_bytes
        .iter()
        .map(|k| vertices(k, seed, m).as_array())
        .collect();

    // CSR adjacency: for each vertex, the list of incident edge ids.
    let mut degree = vec![0u32; m as usize];
    for v in &verts {
        for &u in v {
            degree[u as usize] += 1;
        }
    }
    let mut offset = vec![0u32; m as usize + 1];
    for i in 0..m as usize {
        offset[i + 1] = offset[i] + degree[i];
    }
    let mut cursor = offset.clone();
    let mut adj = vec![0u32; offset[m as usize] as usize];
    for (eid, v) in verts.iter().enumerate() {
        for &u in v {
            let c = cursor[u as usize] as usize;
            adj[c] = eid as u32;
            cursor[u as usize] += 1;
        }
    }

    let mut live_degree = degree.clone();
    let mut queue: Vec<u32> = (0..m)
        .filter(|&v| live_degree[v as usize] == 1)
        .collect();
    let mut qhead = 0usize;

    #[derive(Clone, Copy)]
    struct Peeled {
        edge: u32,
        pivot_pos: u8, // 0, 1, or 2: which corner of the edge the vertex is
    }
    let mut peel_order = Vec::<Peeled>::with_capacity(n);
    let mut edge_removed = BitSet::new(n);

    while qhead < queue.len() {
        let v = queue[qhead];
        qhead += 1;

        let start = offset[v as usize] as usize;
        let end = offset[v as usize + 1] as usize;
        for i in start..end {
            let e = adj[i];
            if edge_removed.test(e as usize) {
                continue;
            }
            let edge = verts[e as usize];
            let pivot_pos = match edge.iter().position(|&u| u == v) {
                Some(p) => p as u8,
                None => continue,
            };
            // This vertex might no longer actually be the unique remaining
            // endpoint if it was already consumed by another queue entry
            // for the same edge; skip if the edge was already peeled via a
            // different corner.
            if live_degree[v as usize] == 0 {
                continue;
            }

            peel_order.push(Peeled { edge: e, pivot_pos });
            edge_removed.set(e as usize);

            for (pos, &u) in edge.iter().enumerate() {
                if pos as u8 == pivot_pos {
                    continue;
                }
                let d = &mut live_degree[u as usize];
                if *d > 0 {
                    *d -= 1;
                    if *d == 1 {
                        queue.push(u);
                    }
                }
            }
            live_degree[v as usize] = 0;
        }
    }

    if peel_order.len() != n {
        return None; // 2-core non-empty: this attempt failed
    }

    const UNASSIGNED: u8 = u8::MAX;
    let mut g = vec![UNASSIGNED; m as usize];
    for rec in peel_order.iter().rev() {
        let edge = verts[rec.edge as usize];
        let pivot = edge[rec.pivot_pos as usize];
        let mut sum: u32 = 0;
        for (pos, &u) in edge.iter().enumerate() {
            if pos as u8 == rec.pivot_pos {
                continue;
            }
            let gu = g[u as usize];
            sum += if gu == UNASSIGNED { 0 } else { gu as u32 };
        }
        let pos = rec.pivot_pos as u32;
        let want = (pos + 3 - (sum % 3)) % 3;
        g[pivot as usize] = want as u8;
    }

    for v in &mut g {
        if *v == UNASSIGNED {
            *v = 3; // never peeled: unused slot
        }
    }

    Some(g)
}
