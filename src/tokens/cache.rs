//! Bounded color cache with first-in-first-out eviction.

use std::collections::{HashMap, VecDeque};

use super::color::Rgb;

/// Map of normalized color keys to resolved triples (or cached misses).
///
/// Holds at most `capacity` entries. When a new key would exceed the capacity,
/// the oldest inserted key is evicted. Reads do not refresh an entry's age and
/// re-inserting an existing key keeps its original position.
#[derive(Debug, Clone)]
pub struct ColorCache {
    capacity: usize,
    entries: HashMap<String, Option<Rgb>>,
    order: VecDeque<String>,
}

impl ColorCache {
    /// Create an empty cache. A capacity of zero stores nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    /// Look up a key. The outer `Option` is presence; the inner one is the cached result.
    pub fn get(&self, key: &str) -> Option<Option<Rgb>> {
        self.entries.get(key).copied()
    }

    /// Insert or update an entry, returning the key evicted to make room, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<Rgb>) -> Option<String> {
        let key = key.into();
        if self.capacity == 0 {
            return None;
        }
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value;
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.order.pop_front().inspect(|oldest| {
                self.entries.remove(oldest);
            })
        } else {
            None
        };

        self.order.push_back(key.clone());
        self.entries.insert(key, value);
        evicted
    }

    /// Whether `key` is cached, hit or miss.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys in insertion order, oldest first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
