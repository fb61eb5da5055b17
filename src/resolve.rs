//! The resolver: finds the isomorphism class of a graph inside a
//! [`ClassDict`], or reports that it starts a new class.
//!
//! Resolution is read-only; registering a new class is a separate, explicit
//! step by the caller (see [`crate::construct`]).

use crate::dict::{ClassDict, ClassId};
use crate::graph::Graph;
use crate::key::{generate_key, InvalidMethod, InvariantKey};
use crate::matcher::{find_isomorphism, verify_isomorphism};
use std::fmt;

/// A positive resolution: the matched class plus the vertex correspondence.
#[derive(Clone, Debug)]
pub struct Resolution {
    /// The invariant key the match was found under; `None` for the
    /// `"vf2pp_iter"` method, which bypasses bucketing.
    pub key: Option<InvariantKey>,
    /// Handle of the matched class.
    pub class: ClassId,
    /// `mapping[i]` is the representative's position assigned to position `i`
    /// of the query graph.
    pub mapping: Vec<usize>,
}

impl Resolution {
    /// Expresses the mapping as `(query label, representative label)` pairs.
    pub fn label_pairs<P>(&self, query: &Graph, dict: &ClassDict<P>) -> Vec<(u32, u32)> {
        let rep = dict.representative(self.class);
        self.mapping
            .iter()
            .enumerate()
            .map(|(i, &j)| (query.label(i), rep.label(j)))
            .collect()
    }
}

/// Errors of a resolution attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// The method name is not `"triangle"`, `"sub_3"`, or `"vf2pp_iter"`.
    InvalidMethod(InvalidMethod),
    /// No indexed class is isomorphic to the query. Expected on every
    /// first-of-its-kind graph; callers respond by registering a new class.
    NoIsomorphismFound,
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::InvalidMethod(e) => e.fmt(f),
            ResolveError::NoIsomorphismFound => {
                write!(f, "no isomorphic class indexed for this graph")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

impl From<InvalidMethod> for ResolveError {
    fn from(e: InvalidMethod) -> Self {
        ResolveError::InvalidMethod(e)
    }
}

/// Resolves `g` against the dictionary under `method`.
///
/// For `"triangle"` and `"sub_3"` the invariant key is computed and only that
/// bucket is scanned, each representative at most once, in insertion order.
/// For `"vf2pp_iter"` every representative in the dictionary is scanned
/// linearly, ignoring keys entirely (the no-bucketing baseline; cost is
/// O(classes × match) per call).
///
/// # Errors
/// [`ResolveError::NoIsomorphismFound`] when the bucket (or, for
/// `"vf2pp_iter"`, the whole dictionary) is exhausted without a match;
/// [`ResolveError::InvalidMethod`] for any other method name.
pub fn resolve<P>(
    g: &Graph,
    dict: &ClassDict<P>,
    method: &str,
) -> Result<Resolution, ResolveError> {
    match method {
        "triangle" | "sub_3" => {
            let key = generate_key(g, method)?;
            for &id in dict.bucket(&key) {
                if let Some(mapping) = find_isomorphism(g, dict.representative(id)) {
                    debug_assert!(verify_isomorphism(g, dict.representative(id), &mapping));
                    return Ok(Resolution {
                        key: Some(key),
                        class: id,
                        mapping,
                    });
                }
            }
            Err(ResolveError::NoIsomorphismFound)
        }
        "vf2pp_iter" => {
            for entry in dict.classes() {
                if let Some(mapping) = find_isomorphism(g, &entry.graph) {
                    debug_assert!(verify_isomorphism(g, &entry.graph, &mapping));
                    return Ok(Resolution {
                        key: None,
                        class: entry.id,
                        mapping,
                    });
                }
            }
            Err(ResolveError::NoIsomorphismFound)
        }
        other => Err(InvalidMethod::new(other).into()),
    }
}

// ============================================================================
// Tests
// ============================================================================
