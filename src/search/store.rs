//! Generation-checked holder for the active result set.

use crate::model::types::SearchResult;

/// Owns the displayed results plus a monotonic generation counter. A fetch
/// outcome is applied only while its generation is still current, so a late
/// reply from a superseded query can never clobber a newer one.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: Vec<SearchResult>,
    generation: u64,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call synchronously at submission time, before the fetch starts.
    /// Returns the generation the eventual commit must present.
    pub fn begin_query(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Replaces the stored set iff `generation` is still current.
    /// Returns false when the commit was dropped as stale.
    pub fn commit(&mut self, results: Vec<SearchResult>, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.results = results;
        true
    }

    pub fn current(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn get(&self, idx: usize) -> Option<&SearchResult> {
        self.results.get(idx)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Empties the set without touching the generation, for transient
    /// loading feedback between submit and resolve.
    pub fn clear(&mut self) {
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str) -> SearchResult {
        SearchResult {
            index: 1,
            title: title.into(),
            url: format!("http://example.com/{title}"),
            snippet: String::new(),
        }
    }

    #[test]
    fn late_reply_from_superseded_query_is_dropped() {
        let mut store = ResultStore::new();
        let gen_a = store.begin_query();
        let gen_b = store.begin_query();

        // B resolves first, then A's stale reply arrives.
        assert!(store.commit(vec![hit("b")], gen_b));
        assert!(!store.commit(vec![hit("a")], gen_a));
        assert_eq!(store.current()[0].title, "b");
    }

    #[test]
    fn replies_arriving_in_submission_order_still_converge_on_newest() {
        let mut store = ResultStore::new();
        let gen_a = store.begin_query();
        let gen_b = store.begin_query();

        assert!(!store.commit(vec![hit("a")], gen_a));
        assert!(store.commit(vec![hit("b")], gen_b));
        assert_eq!(store.current()[0].title, "b");
    }

    #[test]
    fn commit_of_current_generation_replaces_wholesale() {
        let mut store = ResultStore::new();
        let generation = store.begin_query();
        assert!(store.commit(vec![hit("x"), hit("y")], generation));
        assert_eq!(store.len(), 2);

        let next = store.begin_query();
        assert!(store.commit(vec![hit("z")], next));
        assert_eq!(store.len(), 1);
        assert_eq!(store.current()[0].title, "z");
    }

    #[test]
    fn clear_keeps_the_generation() {
        let mut store = ResultStore::new();
        let generation = store.begin_query();
        assert!(store.commit(vec![hit("x")], generation));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.generation(), generation);
        // The in-flight fetch for this generation still lands after a clear.
        assert!(store.commit(vec![hit("x")], generation));
    }

    #[test]
    fn generations_strictly_increase() {
        let mut store = ResultStore::new();
        let a = store.begin_query();
        let b = store.begin_query();
        let c = store.begin_query();
        assert!(a < b && b < c);
    }
}
