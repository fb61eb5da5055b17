//! Dictionary construction: the insert-or-merge protocol over a stream of
//! candidate graphs.
//!
//! Every candidate is resolved against the dictionary built so far. A match
//! bumps the matched class's member count; `NoIsomorphismFound` (the expected
//! first-of-its-kind signal) registers the candidate as a new representative.
//! An optional `early_stopping` bound aborts the pass deterministically once
//! that many classes exist; everything committed stays duplicate-free.
//!
//! The parallel variant splits the candidate list into fixed-size chunks,
//! indexes each chunk into a local dictionary on the rayon pool, and then
//! merges the local dictionaries left to right on the calling thread. All
//! dictionary mutation happens in that single-writer merge, and the fixed
//! chunk boundaries make the resulting class census identical to the
//! sequential pass over the same input order.

use crate::dict::ClassDict;
use crate::key::generate_key;
use crate::resolve::{resolve, ResolveError};
use crate::Graph;
use rayon::prelude::*;

/// Candidates per parallel chunk. Small enough to keep the pool busy on the
/// passes this crate targets, large enough that per-chunk dictionaries
/// amortize their setup.
const PARALLEL_CHUNK: usize = 64;

/// Satellite payload tracked per class during construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassStats {
    /// Number of candidates merged into this class, representative included.
    pub members: usize,
}

/// Builds a dictionary from `candidates` under `method`, sequentially.
///
/// Stops early once the class count reaches `early_stopping`, if given.
///
/// # Errors
/// Propagates [`ResolveError::InvalidMethod`]; `NoIsomorphismFound` is
/// consumed internally as the new-class signal.
pub fn index_candidates<I>(
    candidates: I,
    method: &str,
    early_stopping: Option<usize>,
) -> Result<ClassDict<ClassStats>, ResolveError>
where
    I: IntoIterator<Item = Graph>,
{
    let mut dict = ClassDict::new();
    for g in candidates {
        if at_bound(&dict, early_stopping) {
            break;
        }
        insert_or_merge(&mut dict, g, method)?;
    }
    Ok(dict)
}

/// Builds a dictionary from `candidates` in parallel
/// (merge-after-parallel-scan), with the same result as the sequential pass.
///
/// `early_stopping` is applied during the sequential merge phase.
///
/// # Errors
/// Propagates [`ResolveError::InvalidMethod`].
pub fn index_candidates_parallel(
    candidates: Vec<Graph>,
    method: &str,
    early_stopping: Option<usize>,
) -> Result<ClassDict<ClassStats>, ResolveError> {
    // Validate the method before spawning any work.
    if !matches!(method, "triangle" | "sub_3" | "vf2pp_iter") {
        return Err(crate::key::InvalidMethod::new(method).into());
    }

    let locals: Vec<ClassDict<ClassStats>> = candidates
        .par_chunks(PARALLEL_CHUNK)
        .map(|chunk| {
            // Method already validated, and NoIsomorphismFound never escapes
            // insert_or_merge.
            index_candidates(chunk.iter().cloned(), method, None)
                .unwrap_or_else(|_| unreachable!())
        })
        .collect();

    // Single-writer merge, left to right.
    let mut dict = ClassDict::new();
    'merge: for local in locals {
        for entry in local.classes() {
            if at_bound(&dict, early_stopping) {
                break 'merge;
            }
            merge_class(&mut dict, entry.graph.clone(), entry.payload, method)?;
        }
    }
    Ok(dict)
}

fn at_bound<P>(dict: &ClassDict<P>, early_stopping: Option<usize>) -> bool {
    early_stopping.is_some_and(|bound| dict.len() >= bound)
}

/// Resolves one candidate and either bumps the matched class or registers a
/// new one with a member count of 1.
fn insert_or_merge(
    dict: &mut ClassDict<ClassStats>,
    g: Graph,
    method: &str,
) -> Result<(), ResolveError> {
    merge_class(dict, g, ClassStats { members: 1 }, method)
}

/// Like [`insert_or_merge`] but folds in an entire already-counted class
/// (used when merging local dictionaries).
fn merge_class(
    dict: &mut ClassDict<ClassStats>,
    g: Graph,
    stats: ClassStats,
    method: &str,
) -> Result<(), ResolveError> {
    match resolve(&g, dict, method) {
        Ok(res) => {
            dict.merge_into_class(res.class, |p| p.members += stats.members);
            Ok(())
        }
        Err(ResolveError::NoIsomorphismFound) => {
            if method == "vf2pp_iter" {
                dict.insert_unbucketed(g, stats);
            } else {
                let key = generate_key(&g, method)?;
                dict.insert_new_class(key, g, stats);
            }
            Ok(())
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::find_isomorphism;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    fn graph(labels: &[u32], edges: &[(u32, u32)]) -> Graph {
        Graph::from_edges(labels, edges).unwrap()
    }

    fn cycle(n: u32) -> Graph {
        let labels: Vec<u32> = (0..n).collect();
        let edges: Vec<(u32, u32)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        Graph::from_edges(&labels, &edges).unwrap()
    }

    fn relabel<R: Rng>(rng: &mut R, g: &Graph) -> Graph {
        let n = g.order();
        let mut perm: Vec<u32> = (0..n as u32).collect();
        perm.shuffle(rng);
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if g.has_edge(i, j) {
                    edges.push((perm[i], perm[j]));
                }
            }
        }
        let labels: Vec<u32> = (0..n as u32).collect();
        Graph::from_edges(&labels, &edges).unwrap()
    }

    /// A shuffled pile of relabelings of three pairwise non-isomorphic bases.
    fn mixed_candidates(rng: &mut XorShiftRng, copies: usize) -> Vec<Graph> {
        let bases = [
            cycle(6),
            graph(
                &[0, 1, 2, 3, 4, 5],
                &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5)],
            ),
            graph(&[0, 1, 2, 3, 4, 5], &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]),
        ];
        let mut all = Vec::new();
        for base in &bases {
            for _ in 0..copies {
                all.push(relabel(rng, base));
            }
        }
        all.shuffle(rng);
        all
    }

    #[test]
    fn no_two_representatives_are_isomorphic() {
        let mut rng = XorShiftRng::seed_from_u64(0xD1C7);
        let candidates = mixed_candidates(&mut rng, 8);

        for method in ["triangle", "sub_3", "vf2pp_iter"] {
            let dict = index_candidates(candidates.iter().cloned(), method, None).unwrap();
            assert_eq!(dict.len(), 3, "method {method}");

            let reps: Vec<&Graph> = dict.representatives().collect();
            for i in 0..reps.len() {
                for j in (i + 1)..reps.len() {
                    assert!(
                        find_isomorphism(reps[i], reps[j]).is_none(),
                        "duplicate classes under {method}"
                    );
                }
            }
            // All 24 candidates are accounted for.
            let total: usize = dict.classes().map(|e| e.payload.members).sum();
            assert_eq!(total, candidates.len());
        }
    }

    #[test]
    fn member_counts_follow_merges() {
        let c4 = cycle(4);
        let rev = graph(&[0, 1, 2, 3], &[(3, 2), (2, 1), (1, 0), (0, 3)]);
        let dict = index_candidates([c4, rev], "triangle", None).unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.classes().next().unwrap().payload.members, 2);
    }

    #[test]
    fn early_stopping_caps_the_class_count() {
        let mut rng = XorShiftRng::seed_from_u64(0xCA9);
        let candidates = mixed_candidates(&mut rng, 5);
        let dict = index_candidates(candidates, "triangle", Some(2)).unwrap();
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn early_stopping_zero_builds_nothing() {
        let dict = index_candidates([cycle(4)], "triangle", Some(0)).unwrap();
        assert!(dict.is_empty());
    }

    #[test]
    fn parallel_matches_sequential_census() {
        let mut rng = XorShiftRng::seed_from_u64(0x9A7A11E1);
        let candidates = mixed_candidates(&mut rng, 60); // several chunks

        for method in ["triangle", "sub_3"] {
            let seq = index_candidates(candidates.iter().cloned(), method, None).unwrap();
            let par = index_candidates_parallel(candidates.clone(), method, None).unwrap();
            assert_eq!(seq.len(), par.len(), "method {method}");

            let mut seq_counts: Vec<usize> = seq.classes().map(|e| e.payload.members).collect();
            let mut par_counts: Vec<usize> = par.classes().map(|e| e.payload.members).collect();
            seq_counts.sort_unstable();
            par_counts.sort_unstable();
            assert_eq!(seq_counts, par_counts, "method {method}");
        }
    }

    #[test]
    fn parallel_honors_early_stopping() {
        let mut rng = XorShiftRng::seed_from_u64(0xEA51);
        let candidates = mixed_candidates(&mut rng, 40);
        let dict = index_candidates_parallel(candidates, "triangle", Some(1)).unwrap();
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn invalid_method_propagates() {
        let err = index_candidates([cycle(3)], "nope", None).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidMethod(_)));
        let err = index_candidates_parallel(vec![cycle(3)], "nope", None).unwrap_err();
        assert!(matches!(err, ResolveError::InvalidMethod(_)));
    }

    #[test]
    fn vf2pp_iter_pass_builds_unkeyed_classes() {
        let mut rng = XorShiftRng::seed_from_u64(0x1F2);
        let candidates = mixed_candidates(&mut rng, 3);
        let dict = index_candidates(candidates, "vf2pp_iter", None).unwrap();
        assert_eq!(dict.len(), 3);
        assert!(dict.classes().all(|e| e.key.is_none()));
    }
}
