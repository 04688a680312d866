//! Candidate sets handed to and returned from evaluation.

use std::collections::BTreeSet;
use std::collections::btree_set;

use crate::ids::ObjectId;

/// An ordered, duplicate-free set of candidate objects.
///
/// Iteration is always in ascending id order. Sets hold ids only; the
/// objects themselves stay in the `Universe`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ObjectSet(BTreeSet<ObjectId>);

impl ObjectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.0.contains(&id)
    }

    /// Returns true if the id was not already present.
    pub fn insert(&mut self, id: ObjectId) -> bool {
        self.0.insert(id)
    }

    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.0.remove(&id)
    }

    /// Move every candidate of `other` into this set, leaving `other` empty.
    pub fn append(&mut self, other: &mut ObjectSet) {
        self.0.append(&mut other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.0.iter().copied()
    }

    pub fn first(&self) -> Option<ObjectId> {
        self.0.first().copied()
    }

    /// Ids in ascending order.
    pub fn to_vec(&self) -> Vec<ObjectId> {
        self.iter().collect()
    }

    pub fn is_disjoint(&self, other: &ObjectSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    pub fn intersection(&self, other: &ObjectSet) -> ObjectSet {
        self.0.intersection(&other.0).copied().collect()
    }

    pub fn union(&self, other: &ObjectSet) -> ObjectSet {
        self.0.union(&other.0).copied().collect()
    }
}

impl FromIterator<ObjectId> for ObjectSet {
    fn from_iter<I: IntoIterator<Item = ObjectId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<ObjectId> for ObjectSet {
    fn extend<I: IntoIterator<Item = ObjectId>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ObjectSet {
    type Item = ObjectId;
    type IntoIter = btree_set::IntoIter<ObjectId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ObjectSet {
    type Item = ObjectId;
    type IntoIter = std::iter::Copied<btree_set::Iter<'a, ObjectId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl<const N: usize> From<[ObjectId; N]> for ObjectSet {
    fn from(ids: [ObjectId; N]) -> Self {
        ids.into_iter().collect()
    }
}

/// Result of evaluating a condition over a candidate pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub matches: ObjectSet,
    pub non_matches: ObjectSet,
}

impl Partition {
    /// Total number of candidates across both sides.
    pub fn len(&self) -> usize {
        self.matches.len() + self.non_matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.non_matches.is_empty()
    }
}
