//! Exact graph-isomorphism testing by backtracking search.
//!
//! The matcher assigns vertices of the query graph to vertices of the
//! candidate graph one at a time. A partial assignment survives only if the
//! already-mapped neighborhood of the next query vertex maps *exactly* onto
//! the already-used neighborhood of its candidate image (bitset equality), so
//! both adjacency and non-adjacency are enforced at every step. The next
//! query vertex is always the unmapped one with the most mapped neighbors
//! (ties broken by degree), which keeps the branching factor low on the
//! dense-ish graphs this crate targets.
//!
//! Worst case remains exponential; the cheap prechecks (order, edge count,
//! degree sequence) and the invariant-key bucketing upstream keep that case
//! out of the common path.

use crate::graph::{all_bits, bit, Graph};

/// Searches for an isomorphism from `g` onto `h`.
///
/// Returns `Some(mapping)` where `mapping[i]` is the position in `h` assigned
/// to position `i` of `g`, or `None` if the graphs are not isomorphic. The
/// returned mapping is always a full edge-preserving bijection.
pub fn find_isomorphism(g: &Graph, h: &Graph) -> Option<Vec<usize>> {
    let n = g.order();
    if n != h.order() || g.edge_count() != h.edge_count() {
        return None;
    }
    if n == 0 {
        return Some(Vec::new());
    }
    if g.degree_sequence() != h.degree_sequence() {
        return None;
    }

    let mut state = MatchState {
        g,
        h,
        mapping: vec![usize::MAX; n],
        mapped: 0,
        used: 0,
    };
    if state.extend(0) {
        Some(state.mapping)
    } else {
        None
    }
}

/// Checks that `mapping` is a valid isomorphism from `g` onto `h`: a
/// bijection on positions that preserves both edges and non-edges.
pub fn verify_isomorphism(g: &Graph, h: &Graph, mapping: &[usize]) -> bool {
    let n = g.order();
    if h.order() != n || mapping.len() != n {
        return false;
    }
    let mut seen = 0u64;
    for &img in mapping {
        if img >= n || seen & bit(img) != 0 {
            return false;
        }
        seen |= bit(img);
    }
    for u in 0..n {
        for v in (u + 1)..n {
            if g.has_edge(u, v) != h.has_edge(mapping[u], mapping[v]) {
                return false;
            }
        }
    }
    true
}

struct MatchState<'a> {
    g: &'a Graph,
    h: &'a Graph,
    /// `mapping[u]` is the `h`-position assigned to `g`-position `u`.
    mapping: Vec<usize>,
    /// Bitset of mapped `g` positions.
    mapped: u64,
    /// Bitset of used `h` positions.
    used: u64,
}

impl MatchState<'_> {
    fn extend(&mut self, depth: usize) -> bool {
        let n = self.g.order();
        if depth == n {
            return true;
        }

        let u = self.select_next();
        let deg_u = self.g.degree(u);

        // Image of u's already-mapped neighborhood; a candidate v is feasible
        // iff its used neighborhood equals this set exactly.
        let mut required = 0u64;
        let mut t = self.g.row(u) & self.mapped;
        while t != 0 {
            let w = t.trailing_zeros() as usize;
            t &= t - 1;
            required |= bit(self.mapping[w]);
        }

        let mut candidates = !self.used & all_bits(n);
        while candidates != 0 {
            let v = candidates.trailing_zeros() as usize;
            candidates &= candidates - 1;

            if self.h.degree(v) != deg_u {
                continue;
            }
            if self.h.row(v) & self.used != required {
                continue;
            }

            self.mapping[u] = v;
            self.mapped |= bit(u);
            self.used |= bit(v);
            if self.extend(depth + 1) {
                return true;
            }
            self.mapping[u] = usize::MAX;
            self.mapped &= !bit(u);
            self.used &= !bit(v);
        }
        false
    }

    /// Picks the unmapped `g` vertex with the most mapped neighbors, breaking
    /// ties toward higher degree.
    fn select_next(&self) -> usize {
        let n = self.g.order();
        let mut best = usize::MAX;
        let mut best_score = (0u32, 0u32);
        let mut t = !self.mapped & all_bits(n);
        while t != 0 {
            let u = t.trailing_zeros() as usize;
            t &= t - 1;
            let score = (
                (self.g.row(u) & self.mapped).count_ones(),
                self.g.degree(u),
            );
            if best == usize::MAX || score > best_score {
                best = u;
                best_score = score;
            }
        }
        best
    }
}

// ============================================================================
// Tests
// ============================================================================
