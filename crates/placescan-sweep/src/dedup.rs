//! Accumulates places across provider calls, keyed by place id.

use std::collections::HashMap;

use placescan_core::Place;

/// Counts from one [`UniquePlaces::merge`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub inserted: usize,
    pub duplicates: usize,
    /// Incoming places with an empty id, which can never be deduplicated.
    pub skipped_no_id: usize,
}

/// First-seen-wins set of places.
///
/// Iteration follows first insertion, so results stay deterministic when
/// origins are merged in a fixed order. The set never shrinks.
#[derive(Debug, Clone, Default)]
pub struct UniquePlaces {
    index: HashMap<String, usize>,
    places: Vec<Place>,
}

impl UniquePlaces {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert every incoming place whose id has not been seen yet.
    ///
    /// A duplicate id keeps the stored record untouched, even when the
    /// incoming copy differs.
    pub fn merge<I>(&mut self, incoming: I) -> MergeStats
    where
        I: IntoIterator<Item = Place>,
    {
        let mut stats = MergeStats::default();
        for place in incoming {
            if place.id.is_empty() {
                stats.skipped_no_id += 1;
                continue;
            }
            if self.index.contains_key(&place.id) {
                stats.duplicates += 1;
                continue;
            }
            self.index.insert(place.id.clone(), self.places.len());
            self.places.push(place);
            stats.inserted += 1;
        }
        stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Place> {
        self.index.get(id).map(|&i| &self.places[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }
}

impl<'a> IntoIterator for &'a UniquePlaces {
    type Item = &'a Place;
    type IntoIter = std::slice::Iter<'a, Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::place;

    #[test]
    fn inserts_unseen_ids() {
        let mut set = UniquePlaces::new();
        let stats = set.merge(vec![place("a"), place("b")]);
        assert_eq!(stats.inserted, 2);
        assert_eq!(set.len(), 2);
        assert!(set.contains("a") && set.contains("b"));
    }

    #[test]
    fn first_seen_record_wins() {
        let mut set = UniquePlaces::new();
        let mut first = place("a");
        first.rating = Some(4.0);
        let mut second = place("a");
        second.rating = Some(1.0);

        set.merge(vec![first]);
        let stats = set.merge(vec![second]);

        assert_eq!(stats.inserted, 0);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("a").and_then(|p| p.rating), Some(4.0));
    }

    #[test]
    fn duplicates_within_one_batch_are_dropped() {
        let mut set = UniquePlaces::new();
        let stats = set.merge(vec![place("a"), place("a"), place("b")]);
        assert_eq!(stats.inserted, 2);
        assert_eq!(stats.duplicates, 1);
    }

    #[test]
    fn empty_ids_are_never_stored() {
        let mut set = UniquePlaces::new();
        let stats = set.merge(vec![place(""), place("a")]);
        assert_eq!(stats.skipped_no_id, 1);
        assert_eq!(set.len(), 1);
        assert!(set.iter().all(|p| !p.id.is_empty()));
    }

    #[test]
    fn iteration_follows_first_insertion() {
        let mut set = UniquePlaces::new();
        set.merge(vec![place("c"), place("a")]);
        set.merge(vec![place("b"), place("c")]);
        let ids: Vec<&str> = set.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn size_never_decreases() {
        let mut set = UniquePlaces::new();
        let mut last = 0;
        for batch in [vec![place("a")], vec![], vec![place("a"), place("b")]] {
            set.merge(batch);
            assert!(set.len() >= last);
            last = set.len();
        }
        assert_eq!(last, 2);
    }
}
