//! The root catalogue: occurrence counting, gloss merging, persistence.

use std::collections::{BTreeMap, HashMap};

use rootlex_core::traits::RootStore;
use rootlex_core::types::RootId;
use tracing::debug;

use crate::assembler::AssembledWord;

/// Catalogue of every distinct root seen across the assembled words,
/// with per-run occurrence counts and merged human-curated glosses.
#[derive(Debug, Default)]
pub struct RootRegistry {
    // BTreeMap so persistence (and therefore fresh id allocation) happens
    // in a fixed order run after run.
    counts: BTreeMap<String, u32>,
    meanings_tr: HashMap<String, String>,
    meanings_en: HashMap<String, String>,
}

impl RootRegistry {
    /// Group assembled words by their resolved root. Exact string match;
    /// spelling variants are distinct roots.
    pub fn from_words(words: &[AssembledWord]) -> Self {
        let mut registry = Self::default();
        for word in words {
            if let Some(root) = &word.root {
                *registry.counts.entry(root.clone()).or_insert(0) += 1;
            }
        }
        debug!(roots = registry.counts.len(), "root registry built");
        registry
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn occurrence_count(&self, root: &str) -> Option<u32> {
        self.counts.get(root).copied()
    }

    /// Merge one Turkish meaning dictionary. Dictionaries are applied in
    /// load order; a later entry for the same root overwrites an earlier
    /// one. Entries for roots absent from the corpus are ignored at
    /// persist time.
    pub fn merge_meanings_tr(&mut self, entries: impl IntoIterator<Item = (String, String)>) {
        self.meanings_tr.extend(entries);
    }

    /// Merge one English meaning dictionary; same precedence rules as
    /// [`Self::merge_meanings_tr`].
    pub fn merge_meanings_en(&mut self, entries: impl IntoIterator<Item = (String, String)>) {
        self.meanings_en.extend(entries);
    }

    /// Upsert every root through the store, keyed by the root string so
    /// re-ingestion reuses existing surrogate ids. Returns the
    /// root-string → id table the linker resolves against.
    pub fn persist(&self, store: &mut dyn RootStore) -> anyhow::Result<HashMap<String, RootId>> {
        let mut ids = HashMap::with_capacity(self.counts.len());
        for (root, &count) in &self.counts {
            let id = store.upsert_root(
                root,
                count,
                self.meanings_tr.get(root).map(String::as_str),
                self.meanings_en.get(root).map(String::as_str),
            )?;
            ids.insert(root.clone(), id);
        }
        Ok(ids)
    }
}
