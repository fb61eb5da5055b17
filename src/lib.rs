//! # roveac
//!
//! Removal-of-vertices counterexample search for Ramsey-number claims.
//!
//! Given a witness for `R(s, t) > n` (a graph on `n` vertices with no clique
//! of size `s` and no independent set of size `t`), every single-vertex
//! deletion yields a candidate witness on `n - 1` vertices. This crate is the
//! deduplication engine for that process: candidates are bucketed by cheap
//! isomorphism invariants, resolved against known class representatives with
//! an exact backtracking matcher, and collected into a dictionary of distinct
//! isomorphism classes from which surviving witnesses are read off.
//!
//! ## Quick start
//!
//! ```
//! use roveac::construct::index_candidates;
//! use roveac::decrement::decrement;
//! use roveac::graph::Graph;
//! use roveac::witness::count_witness_classes;
//!
//! // C5, the unique witness for R(3,3) > 5.
//! let c5 = Graph::from_edges(
//!     &[0, 1, 2, 3, 4],
//!     &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)],
//! ).unwrap();
//!
//! // All five vertex deletions produce the same 4-vertex path: one class.
//! let candidates = decrement(&c5).into_iter().map(|c| c.graph);
//! let dict = index_candidates(candidates, "triangle", None).unwrap();
//! assert_eq!(dict.len(), 1);
//! assert_eq!(count_witness_classes(&dict, 3, 3), 1);
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: labeled bitset graphs, validation, matrix parsing.
//! - [`key`]: invariant-key generation (`"triangle"`, `"sub_3"`).
//! - [`matcher`]: exact backtracking isomorphism test.
//! - [`dict`]: the two-level isomorphism-class dictionary.
//! - [`resolve`]: bucket lookup plus exhaustive in-bucket matching.
//! - [`construct`]: insert-or-merge dictionary construction, sequential and
//!   parallel, with optional early stopping.
//! - [`oracle`]: exact clique / independent-set detection.
//! - [`witness`]: Ramsey witness checks over graphs and dictionaries.
//! - [`decrement`]: vertex-removal candidate generation.
//! - [`search`]: the descent driver tying the passes together.
//!
//! Hashing methods are selected by name: `"triangle"` (fastest bucketing,
//! coarsest), `"sub_3"` (finer buckets via the full 3-subgraph census), and
//! `"vf2pp_iter"` (no bucketing; linear scan baseline).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::inline_always)] // Intentional for hot-path code
#![allow(clippy::many_single_char_names)] // Mathematical variable names

pub mod construct;
pub mod decrement;
pub mod dict;
pub mod graph;
pub mod key;
pub mod matcher;
pub mod oracle;
pub mod resolve;
pub mod search;
pub mod witness;

pub use graph::Graph;

/// Re-export of the commonly used surface.
pub mod prelude {
    pub use crate::construct::{index_candidates, index_candidates_parallel, ClassStats};
    pub use crate::decrement::{decrement, decrement_all, Candidate};
    pub use crate::dict::{ClassDict, ClassId};
    pub use crate::graph::{parse_adjacency_matrix, Graph, GraphError};
    pub use crate::key::{generate_key, InvariantKey};
    pub use crate::matcher::{find_isomorphism, verify_isomorphism};
    pub use crate::resolve::{resolve, Resolution, ResolveError};
    pub use crate::search::{descend, DescentConfig, DescentReport, Verdict};
    pub use crate::witness::{count_witness_classes, is_witness};
}
