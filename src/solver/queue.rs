use std::hash::{BuildHasherDefault, Hash};

use hashbrown::HashMap;

type FastHasher = BuildHasherDefault<ahash::AHasher>;

/// Append-only queue with O(1) membership: a grow-only arena of pairs, a key
/// to arena-index map, and a head cursor standing in for destructive dequeue.
///
/// Dequeued entries stay addressable because bidirectional search replays the
/// winning side's entire discovered ancestry during path reconstruction.
/// Duplicate insertion and dequeue past the end are programming invariants of
/// the callers, not user-facing errors.
#[derive(Debug)]
pub struct UnremovableQueue<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize, FastHasher>,
    head: usize,
}

impl<K: Clone + Eq + Hash, V: Clone> UnremovableQueue<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::default(),
            head: 0,
        }
    }

    /// Number of entries not yet dequeued.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len() - self.head
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Historical access by arena index; valid for every entry ever enqueued.
    #[inline]
    pub fn pair(&self, index: usize) -> &(K, V) {
        &self.entries[index]
    }

    pub fn enqueue(&mut self, key: K, value: V) {
        assert!(
            !self.contains(&key),
            "duplicate key inserted into history queue"
        );
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }

    pub fn dequeue(&mut self) -> (K, V) {
        assert!(
            self.head < self.entries.len(),
            "dequeue past the end of history queue"
        );
        let pair = self.entries[self.head].clone();
        self.head += 1;
        pair
    }
}

impl<K: Clone + Eq + Hash, V: Clone> Default for UnremovableQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
