//! Seams between the morphology pipeline and its collaborators.
//!
//! The pipeline never talks to a concrete storage engine; it is handed a
//! verse-identity snapshot and write sinks for roots and words. Any store
//! that offers indexed lookup and insert-or-replace can implement these.

use crate::types::{ChapterNo, RootId, VerseId, VerseNo, WordRecord};
use std::collections::HashMap;

/// Read-only snapshot of the canonical verse table, taken before the
/// linker stage begins.
pub trait VerseLookup {
    fn verse_id(&self, chapter: ChapterNo, verse: VerseNo) -> Option<VerseId>;
}

impl VerseLookup for HashMap<(ChapterNo, VerseNo), VerseId> {
    fn verse_id(&self, chapter: ChapterNo, verse: VerseNo) -> Option<VerseId> {
        self.get(&(chapter, verse)).copied()
    }
}

/// Insert-or-replace persistence for the root catalogue.
pub trait RootStore {
    /// Upsert keyed by the root string. An existing row keeps its
    /// surrogate id; a new row gets a fresh one. Returns the id either way.
    fn upsert_root(
        &mut self,
        root: &str,
        occurrence_count: u32,
        meaning_tr: Option<&str>,
        meaning_en: Option<&str>,
    ) -> anyhow::Result<RootId>;

    fn root_id(&self, root: &str) -> anyhow::Result<Option<RootId>>;
}

/// Insert-or-replace persistence for assembled words, keyed by
/// (verse_id, word_position).
pub trait WordStore {
    fn upsert_word(&mut self, word: &WordRecord) -> anyhow::Result<()>;
}
