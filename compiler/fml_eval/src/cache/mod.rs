//! Compiled formula cache.
//!
//! Entries are keyed by call site, formula text and binding signature and
//! live until [`FormulaCache::clear`]. Compilation runs outside the lock;
//! when two threads race on the same key the first stored entry wins, so
//! every caller sees the same `Arc`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use fml_parse::CompiledFormula;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::BindingSignature;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub uid: Arc<str>,
    pub formula: Arc<str>,
    pub signature: BindingSignature,
}

impl CacheKey {
    pub fn new(uid: &str, formula: &str, signature: BindingSignature) -> Self {
        CacheKey {
            uid: Arc::from(uid),
            formula: Arc::from(formula),
            signature,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Default)]
pub struct FormulaCache {
    entries: Mutex<FxHashMap<CacheKey, Arc<CompiledFormula>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FormulaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached formula for `key`, compiling it on a miss.
    pub fn get_or_compile(
        &self,
        key: CacheKey,
        compile: impl FnOnce() -> CompiledFormula,
    ) -> Arc<CompiledFormula> {
        if let Some(hit) = self.entries.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(uid = %key.uid, "formula cache hit");
            return Arc::clone(hit);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(uid = %key.uid, signature = %key.signature, "formula cache miss");
        let compiled = Arc::new(compile());
        Arc::clone(self.entries.lock().entry(key).or_insert(compiled))
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<CompiledFormula>> {
        self.entries.lock().get(key).cloned()
    }

    /// Drop every entry. Counters are kept.
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        tracing::debug!(entries = entries.len(), "formula cache cleared");
        entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}
