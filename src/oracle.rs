//! Exact clique and independent-set detection for small graphs.
//!
//! Independent sets of size `k` are found as cliques of size `k` in the
//! complement graph. The clique search is a branch-and-bound over candidate
//! bitsets with a greedy-coloring upper bound for pruning (Tomita-style).

use crate::graph::{all_bits, bit, Graph};

// ============================================================================
// SubsetOracle
// ============================================================================

/// Exact oracle for clique and independent-set existence queries.
///
/// Holds scratch buffers so repeated queries avoid reallocation; one oracle
/// is reusable across graphs of different orders.
#[derive(Clone, Debug, Default)]
pub struct SubsetOracle {
    comp: Vec<u64>,
}

impl SubsetOracle {
    /// Creates a new oracle.
    pub fn new() -> Self {
        Self { comp: Vec::new() }
    }

    /// Returns `true` iff `g` contains a clique of size `k`.
    pub fn has_clique_of_size(&mut self, g: &Graph, k: usize) -> bool {
        let n = g.order();
        if k == 0 {
            return true;
        }
        if k > n {
            return false;
        }
        search_clique_exists(g.adjacency(), k, 0, all_bits(n))
    }

    /// Returns `true` iff `g` contains an independent set of size `k`.
    pub fn has_independent_set_of_size(&mut self, g: &Graph, k: usize) -> bool {
        let n = g.order();
        if k == 0 {
            return true;
        }
        if k > n {
            return false;
        }
        self.build_complement(g);
        search_clique_exists(&self.comp, k, 0, all_bits(n))
    }

    /// Returns the clique number ω(G).
    pub fn clique_number(&mut self, g: &Graph) -> usize {
        max_clique_size(g.adjacency(), 0, all_bits(g.order()), 0)
    }

    /// Returns the independence number α(G).
    pub fn independence_number(&mut self, g: &Graph) -> usize {
        self.build_complement(g);
        max_clique_size(&self.comp, 0, all_bits(g.order()), 0)
    }

    fn build_complement(&mut self, g: &Graph) {
        let n = g.order();
        let mask = all_bits(n);
        self.comp.clear();
        self.comp
            .extend((0..n).map(|v| !g.row(v) & mask & !bit(v)));
    }
}

fn search_clique_exists(adj: &[u64], k: usize, size: usize, mut candidates: u64) -> bool {
    if size >= k {
        return true;
    }
    let remaining = candidates.count_ones() as usize;
    if size + remaining < k {
        return false;
    }

    let mut order = [0usize; 64];
    let mut colors = [0u8; 64];
    let len = color_sort(adj, candidates, &mut order, &mut colors);

    for idx in (0..len).rev() {
        let color_bound = colors[idx] as usize;
        if size + color_bound < k {
            return false;
        }

        let v = order[idx];
        let next_candidates = candidates & adj[v];
        if search_clique_exists(adj, k, size + 1, next_candidates) {
            return true;
        }
        candidates &= !bit(v);
    }
    false
}

fn max_clique_size(adj: &[u64], size: usize, mut candidates: u64, mut best: usize) -> usize {
    if candidates == 0 {
        return size.max(best);
    }

    let mut order = [0usize; 64];
    let mut colors = [0u8; 64];
    let len = color_sort(adj, candidates, &mut order, &mut colors);

    if size > best {
        best = size;
    }
    for idx in (0..len).rev() {
        let color_bound = colors[idx] as usize;
        if size + color_bound <= best {
            break;
        }

        let v = order[idx];
        let next_candidates = candidates & adj[v];
        let found = max_clique_size(adj, size + 1, next_candidates, best);
        if found > best {
            best = found;
        }
        candidates &= !bit(v);
    }
    best
}

/// Greedy coloring of the candidate set; vertices come out grouped by color,
/// and a vertex's color number bounds the largest clique it can extend.
#[inline]
fn color_sort(adj: &[u64], mut candidates: u64, order: &mut [usize; 64], colors: &mut [u8; 64]) -> usize {
    let mut len = 0usize;
    let mut color: u8 = 0;

    while candidates != 0 {
        color = color.wrapping_add(1);
        let mut available = candidates;
        while available != 0 {
            let v = available.trailing_zeros() as usize;
            let v_mask = bit(v);
            order[len] = v;
            colors[len] = color;
            len += 1;
            candidates &= !v_mask;
            available &= !v_mask;
            available &= !adj[v];
        }
    }
    len
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    fn is_clique(g: &Graph, subset: u64) -> bool {
        let mut t = subset;
        while t != 0 {
            let v = t.trailing_zeros() as usize;
            t &= t - 1;
            if (g.row(v) & subset) != (subset & !bit(v)) {
                return false;
            }
        }
        true
    }

    fn is_independent(g: &Graph, subset: u64) -> bool {
        let mut t = subset;
        while t != 0 {
            let v = t.trailing_zeros() as usize;
            t &= t - 1;
            if (g.row(v) & subset) != 0 {
                return false;
            }
        }
        true
    }

    fn brute_omega(g: &Graph) -> usize {
        let n = g.order();
        let mut best = 0;
        for subset in 0..(1u64 << n) {
            let sz = subset.count_ones() as usize;
            if sz > best && is_clique(g, subset) {
                best = sz;
            }
        }
        best
    }

    fn brute_alpha(g: &Graph) -> usize {
        let n = g.order();
        let mut best = 0;
        for subset in 0..(1u64 << n) {
            let sz = subset.count_ones() as usize;
            if sz > best && is_independent(g, subset) {
                best = sz;
            }
        }
        best
    }

    #[test]
    fn oracle_matches_brute_force_on_random_graphs() {
        let mut rng = XorShiftRng::seed_from_u64(0xDEADBEEF);
        let mut oracle = SubsetOracle::new();

        for _ in 0..30 {
            let n = 6 + rng.random_range(0..7usize); // 6..=12
            let g = Graph::random(&mut rng, n, 0.45);
            let omega = brute_omega(&g);
            let alpha = brute_alpha(&g);

            assert_eq!(oracle.clique_number(&g), omega);
            assert_eq!(oracle.independence_number(&g), alpha);
            for k in 0..=n {
                assert_eq!(oracle.has_clique_of_size(&g, k), omega >= k, "omega, k={k}");
                assert_eq!(
                    oracle.has_independent_set_of_size(&g, k),
                    alpha >= k,
                    "alpha, k={k}"
                );
            }
        }
    }

    #[test]
    fn base_cases() {
        let empty = Graph::from_edges(&[0, 1, 2], &[]).unwrap();
        let mut oracle = SubsetOracle::new();
        assert!(oracle.has_clique_of_size(&empty, 0));
        assert!(oracle.has_clique_of_size(&empty, 1));
        assert!(!oracle.has_clique_of_size(&empty, 2));
        assert!(oracle.has_independent_set_of_size(&empty, 3));
        assert!(!oracle.has_independent_set_of_size(&empty, 4));
    }

    #[test]
    fn complete_graph_extremes() {
        let labels: Vec<u32> = (0..8).collect();
        let mut edges = Vec::new();
        for i in 0..8u32 {
            for j in (i + 1)..8 {
                edges.push((i, j));
            }
        }
        let k8 = Graph::from_edges(&labels, &edges).unwrap();
        let mut oracle = SubsetOracle::new();
        assert_eq!(oracle.clique_number(&k8), 8);
        assert_eq!(oracle.independence_number(&k8), 1);
    }

    #[test]
    fn c5_avoids_both_triangle_and_is3() {
        // The 5-cycle is the unique witness for R(3,3) > 5.
        let c5 = Graph::from_edges(
            &[0, 1, 2, 3, 4],
            &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)],
        )
        .unwrap();
        let mut oracle = SubsetOracle::new();
        assert!(!oracle.has_clique_of_size(&c5, 3));
        assert!(!oracle.has_independent_set_of_size(&c5, 3));
    }

    #[test]
    fn ramsey_r33_forces_structure_on_six_vertices() {
        // R(3,3) = 6: every 6-vertex graph has a K3 or an IS of size 3.
        let mut rng = XorShiftRng::seed_from_u64(0x3366);
        let mut oracle = SubsetOracle::new();
        for _ in 0..200 {
            let g = Graph::random(&mut rng, 6, 0.5);
            assert!(
                oracle.has_clique_of_size(&g, 3) || oracle.has_independent_set_of_size(&g, 3)
            );
        }
    }
}
