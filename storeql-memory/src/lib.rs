//! In-process backend for tests and local development.
//!
//! Records live in a `HashMap` behind `std::sync::RwLock`; guards never cross
//! an await point. Term search is brute-force occurrence counting over string
//! fields, most occurrences first, insertion order breaking ties.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use storeql_core::{Doc, DocumentCollection, Result, SearchIndex, StoreError};

struct Entry {
    fields: Doc,
    seq: u64,
}

pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
    next_seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn occurrences(value: &Value, needle: &str) -> usize {
    match value {
        Value::String(s) => s.to_lowercase().matches(needle).count(),
        Value::Array(items) => items.iter().map(|v| occurrences(v, needle)).sum(),
        _ => 0,
    }
}

#[async_trait]
impl DocumentCollection for MemoryStore {
    async fn get(&self, id: &str) -> Result<Doc> {
        let entries = self.entries.read().unwrap();
        entries
            .get(id)
            .map(|e| e.fields.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn insert(&self, id: &str, fields: Doc) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        if entries.contains_key(id) {
            return Err(StoreError::AlreadyExists(id.to_string()));
        }
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        entries.insert(id.to_string(), Entry { fields, seq });
        Ok(())
    }

    async fn replace(&self, id: &str, fields: Doc) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        match entries.get_mut(id) {
            Some(entry) => {
                entry.fields = fields;
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        entries
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn replace_field(&self, id: &str, path: &str, value: Value) -> Result<()> {
        let mut entries = self.entries.write().unwrap();
        let entry = entries
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if !entry.fields.contains_key(path) {
            return Err(StoreError::NotFound(format!("{id}.{path}")));
        }
        entry.fields.insert(path.to_string(), value);
        Ok(())
    }
}

#[async_trait]
impl SearchIndex for MemoryStore {
    async fn matching_ids(&self, term: &str, limit: usize) -> Result<Vec<String>> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let entries = self.entries.read().unwrap();
        let mut hits: Vec<(usize, u64, String)> = entries
            .iter()
            .filter_map(|(id, entry)| {
                let score: usize = entry.fields.values().map(|v| occurrences(v, &needle)).sum();
                (score > 0).then(|| (score, entry.seq, id.clone()))
            })
            .collect();

        hits.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        hits.truncate(limit);
        Ok(hits.into_iter().map(|(_, _, id)| id).collect())
    }
}
