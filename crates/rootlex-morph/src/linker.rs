//! Resolution of assembled words into persisted word records.

use std::collections::HashMap;

use rootlex_core::traits::{VerseLookup, WordStore};
use rootlex_core::types::{RootId, WordRecord};
use rootlex_core::Error;
use tracing::debug;

use crate::assembler::AssembledWord;

/// Outcome counters for one linking pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinkReport {
    pub words_linked: usize,
    /// Words whose (chapter, verse) had no row in the verse table. The
    /// corpus is allowed to reference divisions the canonical tables
    /// never loaded; those words are dropped, not errors.
    pub orphans_dropped: usize,
}

/// Resolve verse identity, root identity and an optional gloss for every
/// assembled word, then upsert the surviving records.
///
/// A non-null root missing from `root_ids` means the registry and the
/// linker were run over different word sets; that aborts the batch.
pub fn link_words(
    words: &[AssembledWord],
    root_ids: &HashMap<String, RootId>,
    verses: &dyn VerseLookup,
    glosses: &HashMap<String, String>,
    store: &mut dyn WordStore,
) -> anyhow::Result<LinkReport> {
    let mut report = LinkReport::default();

    for word in words {
        let Some(verse_id) = verses.verse_id(word.key.chapter, word.key.verse) else {
            report.orphans_dropped += 1;
            debug!(
                chapter = word.key.chapter,
                verse = word.key.verse,
                "no verse row for assembled word, dropping"
            );
            continue;
        };

        let root_id = match &word.root {
            None => None,
            Some(root) => Some(*root_ids.get(root).ok_or_else(|| {
                Error::RegistryInconsistent { root: root.clone() }
            })?),
        };

        // Gloss lookup: lemma first, assembled surface as fallback.
        let gloss = word
            .lemma
            .as_ref()
            .and_then(|lemma| glosses.get(lemma))
            .or_else(|| glosses.get(&word.surface))
            .cloned();

        store.upsert_word(&WordRecord {
            verse_id,
            word_position: word.key.word,
            surface_text: word.surface.clone(),
            root_id,
            lemma: word.lemma.clone(),
            part_of_speech: Some(word.part_of_speech.as_str().to_string()),
            gloss,
        })?;
        report.words_linked += 1;
    }

    Ok(report)
}
