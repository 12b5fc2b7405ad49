//! Selector Cache
//!
//! Maps selector text to compiled matchers so repeated queries skip the
//! compiler. One cache is shared between documents through an `Arc`; the map
//! sits behind an `RwLock` and lookups take the read lock only.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::SelectorResult;
use crate::matcher::{Compiler, CssCompiler, Matcher};

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Store compiled selectors
    pub enabled: bool,
    /// The map is flushed once it holds this many entries
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: 256,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// Hits over total lookups, 0.0 before the first lookup
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Compiled-selector cache
#[derive(Debug)]
pub struct SelectorCache {
    compiler: Box<dyn Compiler>,
    entries: RwLock<HashMap<String, Arc<dyn Matcher>>>,
    enabled: AtomicBool,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SelectorCache {
    /// Cache in front of the built-in [`CssCompiler`]
    pub fn new(config: CacheConfig) -> Self {
        Self::with_compiler(config, CssCompiler)
    }

    pub fn with_compiler(config: CacheConfig, compiler: impl Compiler + 'static) -> Self {
        Self {
            compiler: Box::new(compiler),
            entries: RwLock::new(HashMap::new()),
            enabled: AtomicBool::new(config.enabled),
            max_entries: config.max_entries.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Compiled matcher for `selector`, from the cache when possible.
    /// Failed compilations are never stored.
    pub fn compile(&self, selector: &str) -> SelectorResult<Arc<dyn Matcher>> {
        if !self.is_enabled() {
            return self.compiler.compile(selector);
        }

        // Fast path: read lock
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(matcher) = entries.get(selector) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(selector, "selector cache hit");
                return Ok(Arc::clone(matcher));
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let matcher = self.compiler.compile(selector).inspect_err(|err| {
            tracing::debug!(selector, %err, "selector compilation failed");
        })?;

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= self.max_entries && !entries.contains_key(selector) {
            tracing::debug!(entries = entries.len(), "selector cache full, flushing");
            entries.clear();
        }
        entries.insert(selector.to_string(), Arc::clone(&matcher));
        tracing::trace!(selector, "selector compiled and cached");
        Ok(matcher)
    }

    /// Turn caching on or off. Existing entries are kept but not consulted
    /// while disabled.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Drop every entry and reset the counters
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for SelectorCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
