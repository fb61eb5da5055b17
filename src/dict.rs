//! The isomorphism-indexed dictionary: invariant key → representatives →
//! satellite payload.
//!
//! `ClassDict` performs no isomorphism checking of its own. Callers are
//! expected to run the resolver first and insert a new class only after the
//! relevant bucket has been exhausted without a match; under that protocol,
//! representatives within one bucket are pairwise non-isomorphic.
//!
//! Representatives are never used as map keys. Each class receives an opaque,
//! monotonically increasing [`ClassId`] at insertion; the outer map stores
//! `InvariantKey -> Vec<ClassId>` and the class store is indexed by handle.
//! Iteration over classes and over a bucket follows insertion order; that
//! order is a documented reproducibility aid, not a semantic guarantee.

use crate::graph::Graph;
use crate::key::InvariantKey;
use std::collections::HashMap;

/// Opaque handle of one isomorphism class, assigned at insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(u32);

impl ClassId {
    /// Returns the handle as an index (insertion rank).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One isomorphism class: its representative graph plus satellite payload.
#[derive(Clone, Debug)]
pub struct ClassEntry<P> {
    /// Handle of this class.
    pub id: ClassId,
    /// The invariant key the class was bucketed under, if any. `None` for
    /// classes registered through the unbucketed (`"vf2pp_iter"`) path.
    pub key: Option<InvariantKey>,
    /// The representative graph. Fixed at insertion; never replaced.
    pub graph: Graph,
    /// Caller-owned satellite data (count, members, provenance, ...).
    pub payload: P,
}

/// Two-level dictionary of isomorphism classes, generic over the satellite
/// payload `P`.
#[derive(Clone, Debug, Default)]
pub struct ClassDict<P> {
    buckets: HashMap<InvariantKey, Vec<ClassId>>,
    classes: Vec<ClassEntry<P>>,
}

impl<P> ClassDict<P> {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self {
            buckets: HashMap::new(),
            classes: Vec::new(),
        }
    }

    /// Returns the class handles bucketed under `key`; an absent key yields
    /// an empty slice, never an error.
    pub fn bucket(&self, key: &InvariantKey) -> &[ClassId] {
        self.buckets.get(key).map_or(&[], Vec::as_slice)
    }

    /// Registers `graph` as the representative of a new class under `key`.
    ///
    /// The caller must already have verified (via the resolver) that no
    /// representative in that bucket is isomorphic to `graph`.
    pub fn insert_new_class(&mut self, key: InvariantKey, graph: Graph, payload: P) -> ClassId {
        let id = self.next_id();
        self.buckets.entry(key).or_default().push(id);
        self.classes.push(ClassEntry {
            id,
            key: Some(key),
            graph,
            payload,
        });
        id
    }

    /// Registers `graph` as a new class without bucketing it under any key.
    ///
    /// Used by the `"vf2pp_iter"` path, which scans all classes linearly and
    /// never consults the key index.
    pub fn insert_unbucketed(&mut self, graph: Graph, payload: P) -> ClassId {
        let id = self.next_id();
        self.classes.push(ClassEntry {
            id,
            key: None,
            graph,
            payload,
        });
        id
    }

    /// Updates the payload of an existing class in place. The representative
    /// graph itself is never altered.
    pub fn merge_into_class(&mut self, id: ClassId, update: impl FnOnce(&mut P)) {
        update(&mut self.classes[id.index()].payload);
    }

    /// Returns the representative graph of `id`.
    pub fn representative(&self, id: ClassId) -> &Graph {
        &self.classes[id.index()].graph
    }

    /// Returns the payload of `id`.
    pub fn payload(&self, id: ClassId) -> &P {
        &self.classes[id.index()].payload
    }

    /// Returns the number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns whether the dictionary holds no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterates over all classes in insertion order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassEntry<P>> {
        self.classes.iter()
    }

    /// Iterates over all distinct representatives in insertion order.
    pub fn representatives(&self) -> impl Iterator<Item = &Graph> {
        self.classes.iter().map(|c| &c.graph)
    }

    fn next_id(&self) -> ClassId {
        ClassId(self.classes.len() as u32)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::generate_key;

    fn graph(labels: &[u32], edges: &[(u32, u32)]) -> Graph {
        Graph::from_edges(labels, edges).unwrap()
    }

    #[test]
    fn absent_key_yields_empty_bucket() {
        let d: ClassDict<u32> = ClassDict::new();
        assert!(d.bucket(&InvariantKey::Triangle(7)).is_empty());
        assert!(d.is_empty());
    }

    #[test]
    fn insert_and_lookup() {
        let mut d: ClassDict<u32> = ClassDict::new();
        let k3 = graph(&[0, 1, 2], &[(0, 1), (1, 2), (0, 2)]);
        let key = generate_key(&k3, "triangle").unwrap();
        let id = d.insert_new_class(key, k3.clone(), 1);

        assert_eq!(d.bucket(&key), &[id]);
        assert_eq!(d.representative(id), &k3);
        assert_eq!(*d.payload(id), 1);
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn classes_under_one_key_share_a_bucket() {
        let mut d: ClassDict<u32> = ClassDict::new();
        let key = InvariantKey::Triangle(0);
        let a = d.insert_new_class(key, graph(&[0, 1], &[(0, 1)]), 0);
        let b = d.insert_new_class(key, graph(&[0, 1, 2], &[(0, 1)]), 0);
        assert_eq!(d.bucket(&key), &[a, b]);
    }

    #[test]
    fn merge_updates_payload_only() {
        let mut d: ClassDict<u32> = ClassDict::new();
        let g = graph(&[0, 1], &[(0, 1)]);
        let id = d.insert_new_class(InvariantKey::Triangle(0), g.clone(), 1);

        d.merge_into_class(id, |p| *p += 4);
        assert_eq!(*d.payload(id), 5);
        assert_eq!(d.representative(id), &g);
    }

    #[test]
    fn handles_are_insertion_ranked() {
        let mut d: ClassDict<()> = ClassDict::new();
        let a = d.insert_new_class(InvariantKey::Triangle(0), graph(&[0], &[]), ());
        let b = d.insert_unbucketed(graph(&[0, 1], &[]), ());
        let c = d.insert_new_class(InvariantKey::Triangle(1), graph(&[0, 1, 2], &[]), ());
        assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));

        let orders: Vec<usize> = d.classes().map(|e| e.graph.order()).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn unbucketed_classes_have_no_key() {
        let mut d: ClassDict<()> = ClassDict::new();
        let id = d.insert_unbucketed(graph(&[0, 1], &[(0, 1)]), ());
        let entry = d.classes().find(|e| e.id == id).unwrap();
        assert_eq!(entry.key, None);
        // And they are invisible to every bucket.
        assert!(d.bucket(&InvariantKey::Triangle(0)).is_empty());
    }
}
