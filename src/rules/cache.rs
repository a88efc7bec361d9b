//! Process-lifetime rule table cache
//!
//! Single entry. Transitions once from empty to populated and is read-only
//! afterwards. Concurrent first callers block on the same initialization, so
//! the loader runs at most once per successful population and no caller ever
//! sees a partially built table. A failed load leaves the cache empty.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::errors::RulesResult;
use super::loader::{LoadedRuleTable, RuleTableLoader};
use crate::observability::{log_event_with_fields, Event};

/// Lazily loaded rule table for one configuration path
#[derive(Debug)]
pub struct RuleTableCache {
    path: PathBuf,
    cell: OnceCell<Arc<LoadedRuleTable>>,
    /// Number of load attempts, successful or not
    load_attempts: AtomicUsize,
}

impl RuleTableCache {
    /// Creates an empty cache that loads from `path` on first use
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
            load_attempts: AtomicUsize::new(0),
        }
    }

    /// Creates a cache that is already populated
    pub fn preloaded(loaded: LoadedRuleTable) -> Self {
        Self {
            path: PathBuf::from(&loaded.source),
            cell: OnceCell::with_value(Arc::new(loaded)),
            load_attempts: AtomicUsize::new(0),
        }
    }

    /// Returns the configuration path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached table, loading it on first use
    pub fn get_or_load(&self) -> RulesResult<Arc<LoadedRuleTable>> {
        self.get_or_load_with(|_| {})
    }

    /// Returns the cached table, loading it on first use.
    ///
    /// `on_load` runs exactly once, after the successful load that populates
    /// the cache and before any caller observes the table.
    pub fn get_or_load_with<F>(&self, on_load: F) -> RulesResult<Arc<LoadedRuleTable>>
    where
        F: FnOnce(&LoadedRuleTable),
    {
        self.cell
            .get_or_try_init(|| {
                self.load_attempts.fetch_add(1, Ordering::SeqCst);
                match RuleTableLoader::load_from_path(&self.path) {
                    Ok(loaded) => {
                        on_load(&loaded);
                        Ok(Arc::new(loaded))
                    }
                    Err(e) => {
                        let code = e.code().code();
                        let path = self.path.display().to_string();
                        log_event_with_fields(
                            Event::RuleTableLoadFailed,
                            &[("code", code), ("source", path.as_str())],
                        );
                        Err(e)
                    }
                }
            })
            .map(Arc::clone)
    }

    /// Returns the cached table without loading
    pub fn get(&self) -> Option<Arc<LoadedRuleTable>> {
        self.cell.get().map(Arc::clone)
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Number of times the loader has been invoked
    pub fn load_attempts(&self) -> usize {
        self.load_attempts.load(Ordering::SeqCst)
    }
}
