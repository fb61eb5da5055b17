//! Candidate generation by vertex removal.
//!
//! From a witness on `n` vertices, every single-vertex deletion yields a
//! candidate on `n - 1` vertices. The removed label is carried as provenance
//! for downstream consumers; the indexing core never reads it.

use crate::graph::Graph;

/// One decremented candidate: the child graph and the label that was removed
/// from its parent.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// The graph on `n - 1` vertices, labels inherited from the parent.
    pub graph: Graph,
    /// The parent vertex that was deleted.
    pub removed: u32,
}

/// Produces the `n` candidates obtained by deleting each vertex of `g` in
/// turn, in label order.
pub fn decrement(g: &Graph) -> Vec<Candidate> {
    g.labels()
        .iter()
        .map(|&label| Candidate {
            // The label comes straight from the vertex list, so removal
            // cannot miss.
            graph: g.remove_vertex(label).unwrap_or_else(|| unreachable!()),
            removed: label,
        })
        .collect()
}

/// Produces the decremented candidates of every graph in `parents`,
/// concatenated in parent order.
pub fn decrement_all<'a>(parents: impl IntoIterator<Item = &'a Graph>) -> Vec<Candidate> {
    parents.into_iter().flat_map(decrement).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(n: u32) -> Graph {
        let labels: Vec<u32> = (0..n).collect();
        let edges: Vec<(u32, u32)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        Graph::from_edges(&labels, &edges).unwrap()
    }

    #[test]
    fn decrement_produces_one_candidate_per_vertex() {
        let c5 = cycle(5);
        let kids = decrement(&c5);
        assert_eq!(kids.len(), 5);
        for (i, c) in kids.iter().enumerate() {
            assert_eq!(c.removed, i as u32);
            assert_eq!(c.graph.order(), 4);
            assert!(c.graph.position_of(c.removed).is_none());
        }
    }

    #[test]
    fn children_inherit_parent_labels() {
        let g = Graph::from_edges(&[2, 5, 9], &[(2, 5), (5, 9)]).unwrap();
        let kids = decrement(&g);
        assert_eq!(kids[0].removed, 2);
        assert_eq!(kids[0].graph.labels(), &[5, 9]);
        assert_eq!(kids[1].graph.labels(), &[2, 9]);
        assert_eq!(kids[2].graph.labels(), &[2, 5]);
    }

    #[test]
    fn decrement_all_concatenates_in_parent_order() {
        let a = cycle(4);
        let b = cycle(3);
        let kids = decrement_all([&a, &b]);
        assert_eq!(kids.len(), 7);
        assert!(kids[..4].iter().all(|c| c.graph.order() == 3));
        assert!(kids[4..].iter().all(|c| c.graph.order() == 2));
    }
}
