//! LRU Store Module
//!
//! Byte-bounded least-recently-used store. Not thread-safe on its own,
//! see [`CacheStore`](crate::cache::CacheStore) for the locked wrapper.

use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, warn};

use crate::cache::Value;

/// Callback invoked with each entry removed under capacity pressure.
pub type OnEvicted<V> = Box<dyn FnMut(String, V) + Send>;

/// Bytes an entry charges against the budget.
pub fn entry_size<V: Value>(key: &str, value: &V) -> u64 {
    (key.len() + value.size()) as u64
}

#[derive(Debug)]
struct Node<V> {
    key: String,
    value: V,
    prev: Option<Index>,
    next: Option<Index>,
}

// == LRU Store ==
/// Size-bounded, recency-ordered key-value store.
///
/// Entries live in an arena and are threaded into a doubly linked list by
/// index:
/// - head = Most recently used
/// - tail = Least recently used
///
/// A `capacity_bytes` of 0 disables eviction entirely.
pub struct LruStore<V> {
    /// Byte budget, 0 = unbounded
    capacity_bytes: u64,
    /// Sum of `key.len() + value.size()` over all entries
    used_bytes: u64,
    nodes: Arena<Node<V>>,
    lookup: HashMap<String, Index>,
    head: Option<Index>,
    tail: Option<Index>,
    /// Entries removed by `remove_oldest` so far
    evictions: u64,
    on_evicted: Option<OnEvicted<V>>,
}

impl<V: Value> LruStore<V> {
    // == Constructor ==
    /// Creates an empty store with a byte budget and no eviction callback.
    pub fn new(capacity_bytes: u64) -> Self {
        Self {
            capacity_bytes,
            used_bytes: 0,
            nodes: Arena::new(),
            lookup: HashMap::new(),
            head: None,
            tail: None,
            evictions: 0,
            on_evicted: None,
        }
    }

    /// Creates an empty store that reports evictions to `on_evicted`.
    ///
    /// The callback runs synchronously after the entry has been unlinked and
    /// its bytes released, so it never sees the evicted entry in the store.
    pub fn with_eviction_callback(
        capacity_bytes: u64,
        on_evicted: impl FnMut(String, V) + Send + 'static,
    ) -> Self {
        Self::from_parts(capacity_bytes, Some(Box::new(on_evicted)))
    }

    pub(crate) fn from_parts(capacity_bytes: u64, on_evicted: Option<OnEvicted<V>>) -> Self {
        Self {
            on_evicted,
            ..Self::new(capacity_bytes)
        }
    }

    // == Get ==
    /// Looks up a key and marks it as most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let index = *self.lookup.get(key)?;
        self.move_to_front(index);
        Some(&self.nodes[index].value)
    }

    // == Peek ==
    /// Looks up a key without touching recency order.
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.lookup.get(key).map(|&index| &self.nodes[index].value)
    }

    /// Returns the least recently used entry without removing it.
    pub fn peek_oldest(&self) -> Option<(&str, &V)> {
        self.tail.map(|index| {
            let node = &self.nodes[index];
            (node.key.as_str(), &node.value)
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup.contains_key(key)
    }

    // == Add ==
    /// Inserts or updates an entry and moves it to the front.
    ///
    /// Least recently used entries are evicted until the new total fits the
    /// budget. An entry that alone exceeds the budget is still stored once
    /// everything else has been evicted.
    pub fn add(&mut self, key: String, value: V) {
        let new_size = entry_size(&key, &value);

        if let Some(&index) = self.lookup.get(&key) {
            let old_size = entry_size(&key, &self.nodes[index].value);

            // At the head the entry can only reach the tail once it is alone.
            self.move_to_front(index);
            if self.capacity_bytes > 0 {
                while self.used_bytes - old_size + new_size > self.capacity_bytes
                    && self.tail != Some(index)
                {
                    self.remove_oldest();
                }
            }

            self.nodes[index].value = value;
            self.used_bytes = self.used_bytes - old_size + new_size;
        } else {
            if self.capacity_bytes > 0 {
                while self.used_bytes + new_size > self.capacity_bytes && !self.is_empty() {
                    self.remove_oldest();
                }
            }

            let index = self.nodes.insert(Node {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            });
            self.push_front(index);
            self.lookup.insert(key, index);
            self.used_bytes += new_size;
        }

        if self.capacity_bytes > 0 && self.used_bytes > self.capacity_bytes {
            warn!(
                used_bytes = self.used_bytes,
                capacity_bytes = self.capacity_bytes,
                "Single entry exceeds cache capacity"
            );
        }
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry, if any.
    pub fn remove_oldest(&mut self) {
        let Some(index) = self.tail else {
            return;
        };

        self.unlink(index);
        if let Some(node) = self.nodes.remove(index) {
            self.lookup.remove(&node.key);
            let freed = entry_size(&node.key, &node.value);
            self.used_bytes -= freed;
            self.evictions += 1;

            debug!(
                key = %node.key,
                freed_bytes = freed,
                used_bytes = self.used_bytes,
                "Evicted least recently used entry"
            );

            if let Some(on_evicted) = self.on_evicted.as_mut() {
                on_evicted(node.key, node.value);
            }
        }
    }

    // == Accessors ==
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    pub fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    pub fn capacity_bytes(&self) -> u64 {
        self.capacity_bytes
    }

    /// Number of entries evicted over the store's lifetime.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    // == Iteration ==
    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            store: self,
            cursor: self.head,
        }
    }
}

impl<V> LruStore<V> {
    fn unlink(&mut self, index: Index) {
        let (prev, next) = {
            let node = &self.nodes[index];
            (node.prev, node.next)
        };

        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
    }

    fn push_front(&mut self, index: Index) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[index];
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => self.nodes[old_head].prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
    }

    fn move_to_front(&mut self, index: Index) {
        if self.head != Some(index) {
            self.unlink(index);
            self.push_front(index);
        }
    }
}

impl<V> fmt::Debug for LruStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruStore")
            .field("capacity_bytes", &self.capacity_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("len", &self.lookup.len())
            .field("evictions", &self.evictions)
            .field("has_on_evicted", &self.on_evicted.is_some())
            .finish()
    }
}

// == Iterator ==
/// Most-to-least recently used iterator over an [`LruStore`].
pub struct Iter<'a, V> {
    store: &'a LruStore<V>,
    cursor: Option<Index>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let store = self.store;
        let node = &store.nodes[self.cursor?];
        self.cursor = node.next;
        Some((node.key.as_str(), &node.value))
    }
}
