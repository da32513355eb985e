// Copyright 2025-2026 Neil Henderson
//
//! The `string_pool` module defines [StringPool], which deduplicates the string literals referenced by the emitted
//! code and gives each one a label.

use std::sync::RwLock;

use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
struct PoolEntries {
    ids: FxHashMap<String, usize>,
    texts: Vec<String>,
}

/// An append-only pool of string literals.
///
/// Each distinct text gets a dense id in first-use order. The pool is shared by reference during emission, so its
/// entries sit behind a lock.
#[derive(Debug, Default)]
pub struct StringPool {
    entries: RwLock<PoolEntries>,
}

impl StringPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of the given text, adding it to the pool if it's new.
    pub fn intern(&self, text: &str) -> usize {
        if let Some(id) = self.lookup(text) {
            return id;
        }

        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());

        // Another writer may have added the text between the read and the write lock.
        if let Some(id) = entries.ids.get(text) {
            return *id;
        }

        let id = entries.texts.len();
        entries.ids.insert(text.to_string(), id);
        entries.texts.push(text.to_string());
        id
    }

    /// Returns the id of the given text, if it has been interned.
    pub fn lookup(&self, text: &str) -> Option<usize> {
        let entries = self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.ids.get(text).copied()
    }

    /// The number of distinct strings in the pool.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner()).texts.len()
    }

    /// Is the pool empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The pooled strings, in id order.
    pub fn entries(&self) -> Vec<(usize, String)> {
        let entries = self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.texts.iter().cloned().enumerate().collect()
    }
}
