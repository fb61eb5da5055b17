//! Cheap isomorphism-invariant keys used to bucket graphs before exact
//! matching.
//!
//! A key never distinguishes isomorphic graphs; it may (and does) collide
//! across non-isomorphic ones, which the matcher then separates. Two methods
//! are supported:
//!
//! - `"triangle"`: the number of 3-cliques. Fastest, coarsest.
//! - `"sub_3"`: the full census of induced 3-vertex subgraphs (no edge, one
//!   edge, path, triangle). Finer buckets at slightly higher cost.

use crate::graph::Graph;
use std::fmt;

/// An invariant-key value: equal for isomorphic graphs under the same method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InvariantKey {
    /// Number of triangles (`"triangle"` method).
    Triangle(u64),
    /// Counts of induced 3-vertex subgraphs with 0, 1, 2, 3 edges
    /// (`"sub_3"` method).
    Sub3([u64; 4]),
}

/// An unrecognized hashing method name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidMethod {
    /// The rejected method name.
    pub name: String,
}

impl InvalidMethod {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl fmt::Display for InvalidMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid method {:?} (expected \"triangle\", \"sub_3\", or \"vf2pp_iter\")",
            self.name
        )
    }
}

impl std::error::Error for InvalidMethod {}

/// Computes the invariant key of `g` under `method`.
///
/// # Errors
/// Returns [`InvalidMethod`] if `method` is not `"triangle"` or `"sub_3"`.
/// (`"vf2pp_iter"` is a resolver method, not a keying method.)
pub fn generate_key(g: &Graph, method: &str) -> Result<InvariantKey, InvalidMethod> {
    match method {
        "triangle" => Ok(InvariantKey::Triangle(triangle_count(g))),
        "sub_3" => Ok(InvariantKey::Sub3(sub3_census(g))),
        other => Err(InvalidMethod::new(other)),
    }
}

/// Counts the triangles (3-cliques) of `g`.
///
/// For each edge `(i, j)` the common neighborhood `N(i) & N(j)` contributes
/// one triangle per member; summing over ordered edge endpoints counts each
/// triangle six times, so each unordered edge pair counts it three times.
pub fn triangle_count(g: &Graph) -> u64 {
    let adj = g.adjacency();
    let n = g.order();
    let mut triple: u64 = 0;
    for i in 0..n {
        let mut t = adj[i] & !crate::graph::all_bits(i + 1); // neighbors j > i
        while t != 0 {
            let j = t.trailing_zeros() as usize;
            t &= t - 1;
            triple += u64::from((adj[i] & adj[j]).count_ones());
        }
    }
    triple / 3
}

/// Counts the induced 3-vertex subgraphs of `g` by edge count.
///
/// Returns `[c0, c1, c2, c3]` where `ck` is the number of vertex triples
/// spanning exactly `k` edges; the entries sum to `C(n, 3)`.
pub fn sub3_census(g: &Graph) -> [u64; 4] {
    let adj = g.adjacency();
    let n = g.order();
    let mut census = [0u64; 4];
    for i in 0..n {
        for j in (i + 1)..n {
            let eij = u32::from(g.has_edge(i, j));
            for k in (j + 1)..n {
                let edges = eij
                    + u32::from((adj[i] >> k) & 1 == 1)
                    + u32::from((adj[j] >> k) & 1 == 1);
                census[edges as usize] += 1;
            }
        }
    }
    census
}

// ============================================================================
// Tests
// ============================================================================
