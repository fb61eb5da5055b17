//! Ramsey witness checking: is a graph a valid `R(s, t, n)` counterexample
//! candidate, and how many survive a decrement pass?

use crate::dict::ClassDict;
use crate::graph::Graph;
use crate::oracle::SubsetOracle;

/// Returns `true` iff `g` witnesses `R(s, t) > n`: it contains no clique of
/// size `s` and no independent set of size `t` on its `n` vertices.
pub fn is_witness(g: &Graph, s: usize, t: usize) -> bool {
    let mut oracle = SubsetOracle::new();
    is_witness_with(&mut oracle, g, s, t)
}

/// Like [`is_witness`], reusing a caller-provided oracle across many checks.
pub fn is_witness_with(oracle: &mut SubsetOracle, g: &Graph, s: usize, t: usize) -> bool {
    !oracle.has_clique_of_size(g, s) && !oracle.has_independent_set_of_size(g, t)
}

/// Counts the isomorphism classes in `dict` whose representative is a valid
/// `(s, t)` witness.
///
/// This is the counterexample-decision surface: after a decrement pass over
/// the witnesses on `n` vertices, a zero here means no witness exists on
/// `n - 1` vertices among the generated candidates.
pub fn count_witness_classes<P>(dict: &ClassDict<P>, s: usize, t: usize) -> usize {
    let mut oracle = SubsetOracle::new();
    dict.representatives()
        .filter(|g| is_witness_with(&mut oracle, g, s, t))
        .count()
}

/// Collects the representatives in `dict` that are valid `(s, t)` witnesses,
/// in insertion order.
pub fn witness_classes<'a, P>(dict: &'a ClassDict<P>, s: usize, t: usize) -> Vec<&'a Graph> {
    let mut oracle = SubsetOracle::new();
    dict.representatives()
        .filter(|g| is_witness_with(&mut oracle, g, s, t))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
