//! Domain records shared by the morphology pipeline and the store.

use serde::{Deserialize, Serialize};

/// Chapter number as it appears in the canonical division (1-based).
pub type ChapterNo = u16;
/// Verse number within a chapter (1-based).
pub type VerseNo = u16;
/// Surrogate id of a persisted verse row.
pub type VerseId = i64;
/// Surrogate id of a persisted root row.
pub type RootId = i64;

/// A canonical chapter of the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub id: ChapterNo,
    pub name: String,
    pub arabic_name: String,
    pub english_name: String,
    pub total_verses: u16,
    pub revelation_type: String,
    pub revelation_order: u16,
}

/// One verse of original-language text, anchored to its chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verse {
    pub id: VerseId,
    pub chapter_id: ChapterNo,
    pub verse_number: VerseNo,
    pub text: String,
}

/// A human translation source (one row per translator edition).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translator {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub language: String,
}

/// A consonantal root with its corpus-wide occurrence count and
/// optional curated glosses.
///
/// Identity is the `root` string itself; `id` is a surrogate that is
/// allocated once and preserved across re-ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Root {
    pub id: RootId,
    pub root: String,
    pub occurrence_count: u32,
    pub meaning_tr: Option<String>,
    pub meaning_en: Option<String>,
}

/// Final pipeline output: one reconstructed word anchored to a verse.
///
/// `root_id` is NULL for function words whose segments never carried a
/// root feature. `part_of_speech` holds the winning tag code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub verse_id: VerseId,
    pub word_position: u16,
    pub surface_text: String,
    pub root_id: Option<RootId>,
    pub lemma: Option<String>,
    pub part_of_speech: Option<String>,
    pub gloss: Option<String>,
}
