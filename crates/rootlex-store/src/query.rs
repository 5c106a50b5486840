//! Read side: catalogue queries over the ingested tables.
//!
//! These are direct pass-throughs for the root-detail, verse-detail and
//! search views; no scoring or ranking is applied anywhere (`LIKE` only).

use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;

use rootlex_core::types::{
    Chapter, ChapterNo, Root, RootId, Translator, Verse, VerseId, VerseNo, WordRecord,
};

use crate::store::SqliteStore;

/// Sort order for root listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootSort {
    /// Most frequent first (the default view).
    Count,
    /// Alphabetical by root string.
    Alpha,
}

/// One place a root occurs, joined up to its verse and chapter.
#[derive(Debug, Clone, Serialize)]
pub struct RootOccurrence {
    pub chapter_id: ChapterNo,
    pub chapter_name: String,
    pub verse_number: VerseNo,
    pub verse_text: String,
    pub word_position: u16,
    pub surface_text: String,
    pub lemma: Option<String>,
    pub part_of_speech: Option<String>,
}

/// A distinct surface form derived from a root, with its frequency.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedForm {
    pub surface_text: String,
    pub lemma: Option<String>,
    pub part_of_speech: Option<String>,
    pub count: u32,
}

/// Per-chapter occurrence distribution of a root.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterCount {
    pub chapter_id: ChapterNo,
    pub chapter_name: String,
    pub count: u32,
}

/// One substring-search hit over translation text.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationHit {
    pub chapter_id: ChapterNo,
    pub verse_number: VerseNo,
    pub translator_code: String,
    pub translator_name: String,
    pub text: String,
}

/// Row counts per table, for validating an ingestion run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct TableCounts {
    pub chapters: u64,
    pub verses: u64,
    pub translators: u64,
    pub translations: u64,
    pub roots: u64,
    pub words: u64,
}

/// One verse of a chapter listing, with the requested translation (if
/// any) alongside the original text.
#[derive(Debug, Clone, Serialize)]
pub struct ChapterVerse {
    pub verse_number: VerseNo,
    pub text: String,
    pub translation: Option<String>,
}

fn chapter_from_row(row: &Row<'_>) -> rusqlite::Result<Chapter> {
    Ok(Chapter {
        id: row.get(0)?,
        name: row.get(1)?,
        arabic_name: row.get(2)?,
        english_name: row.get(3)?,
        total_verses: row.get(4)?,
        revelation_type: row.get(5)?,
        revelation_order: row.get(6)?,
    })
}

fn root_from_row(row: &Row<'_>) -> rusqlite::Result<Root> {
    Ok(Root {
        id: row.get(0)?,
        root: row.get(1)?,
        occurrence_count: row.get(2)?,
        meaning_tr: row.get(3)?,
        meaning_en: row.get(4)?,
    })
}

fn word_from_row(row: &Row<'_>) -> rusqlite::Result<WordRecord> {
    Ok(WordRecord {
        verse_id: row.get(0)?,
        word_position: row.get(1)?,
        surface_text: row.get(2)?,
        root_id: row.get(3)?,
        lemma: row.get(4)?,
        part_of_speech: row.get(5)?,
        gloss: row.get(6)?,
    })
}

impl SqliteStore {
    pub fn list_chapters(&self) -> Result<Vec<Chapter>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, arabic_name, english_name, total_verses,
                    revelation_type, revelation_order
               FROM chapters ORDER BY id",
        )?;
        let rows = stmt.query_map([], chapter_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn chapter_by_id(&self, chapter: ChapterNo) -> Result<Option<Chapter>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, arabic_name, english_name, total_verses,
                        revelation_type, revelation_order
                   FROM chapters WHERE id = ?1",
                params![chapter],
                chapter_from_row,
            )
            .optional()?)
    }

    /// Verses of one chapter in reading order, each carrying the text of
    /// the requested translation edition when one is given and has a row.
    pub fn chapter_verses(
        &self,
        chapter: ChapterNo,
        translator: Option<&str>,
    ) -> Result<Vec<ChapterVerse>> {
        let translator_id: Option<i64> = match translator {
            Some(code) => self
                .conn
                .query_row(
                    "SELECT id FROM translators WHERE code = ?1",
                    params![code],
                    |row| row.get(0),
                )
                .optional()?,
            None => None,
        };
        let mut stmt = self.conn.prepare(
            "SELECT v.verse_number, v.text, tr.text
               FROM verses v
               LEFT JOIN translations tr
                 ON tr.verse_id = v.id AND tr.translator_id = ?2
              WHERE v.chapter_id = ?1
              ORDER BY v.verse_number",
        )?;
        let rows = stmt.query_map(params![chapter, translator_id], |row| {
            Ok(ChapterVerse {
                verse_number: row.get(0)?,
                text: row.get(1)?,
                translation: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn list_roots(&self, sort: RootSort, limit: u32, offset: u32) -> Result<Vec<Root>> {
        let order = match sort {
            RootSort::Count => "occurrence_count DESC",
            RootSort::Alpha => "root ASC",
        };
        let sql = format!(
            "SELECT id, root, occurrence_count, meaning_tr, meaning_en
               FROM roots ORDER BY {order} LIMIT ?1 OFFSET ?2"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit, offset], root_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn root_by_name(&self, root: &str) -> Result<Option<Root>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, root, occurrence_count, meaning_tr, meaning_en
                   FROM roots WHERE root = ?1",
                params![root],
                root_from_row,
            )
            .optional()?)
    }

    /// Substring search over root strings and their glosses.
    pub fn search_roots(&self, query: &str, limit: u32) -> Result<Vec<Root>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, root, occurrence_count, meaning_tr, meaning_en
               FROM roots
              WHERE root LIKE ?1 OR meaning_tr LIKE ?1 OR meaning_en LIKE ?1
              ORDER BY occurrence_count DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![format!("%{query}%"), limit], root_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Every word carrying this root, in canonical corpus order.
    pub fn root_occurrences(&self, root_id: RootId) -> Result<Vec<RootOccurrence>> {
        let mut stmt = self.conn.prepare(
            "SELECT v.chapter_id, c.name, v.verse_number, v.text,
                    w.word_position, w.surface_text, w.lemma, w.part_of_speech
               FROM words w
               JOIN verses v ON v.id = w.verse_id
               JOIN chapters c ON c.id = v.chapter_id
              WHERE w.root_id = ?1
              ORDER BY v.chapter_id, v.verse_number, w.word_position",
        )?;
        let rows = stmt.query_map(params![root_id], |row| {
            Ok(RootOccurrence {
                chapter_id: row.get(0)?,
                chapter_name: row.get(1)?,
                verse_number: row.get(2)?,
                verse_text: row.get(3)?,
                word_position: row.get(4)?,
                surface_text: row.get(5)?,
                lemma: row.get(6)?,
                part_of_speech: row.get(7)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn derived_forms(&self, root_id: RootId, limit: u32) -> Result<Vec<DerivedForm>> {
        let mut stmt = self.conn.prepare(
            "SELECT surface_text, lemma, part_of_speech, COUNT(*) as count
               FROM words WHERE root_id = ?1
              GROUP BY surface_text ORDER BY count DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![root_id, limit], |row| {
            Ok(DerivedForm {
                surface_text: row.get(0)?,
                lemma: row.get(1)?,
                part_of_speech: row.get(2)?,
                count: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn root_distribution(&self, root_id: RootId) -> Result<Vec<ChapterCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.id, c.name, COUNT(*) as count
               FROM words w
               JOIN verses v ON v.id = w.verse_id
               JOIN chapters c ON c.id = v.chapter_id
              WHERE w.root_id = ?1
              GROUP BY c.id ORDER BY count DESC",
        )?;
        let rows = stmt.query_map(params![root_id], |row| {
            Ok(ChapterCount {
                chapter_id: row.get(0)?,
                chapter_name: row.get(1)?,
                count: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// One verse by canonical reference.
    pub fn verse_by_ref(&self, chapter: ChapterNo, verse: VerseNo) -> Result<Option<Verse>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, chapter_id, verse_number, text
                   FROM verses WHERE chapter_id = ?1 AND verse_number = ?2",
                params![chapter, verse],
                |row| {
                    Ok(Verse {
                        id: row.get(0)?,
                        chapter_id: row.get(1)?,
                        verse_number: row.get(2)?,
                        text: row.get(3)?,
                    })
                },
            )
            .optional()?)
    }

    /// All translation editions, optionally narrowed by language.
    pub fn list_translators(&self, language: Option<&str>) -> Result<Vec<Translator>> {
        let mut sql = String::from("SELECT id, code, name, language FROM translators");
        if language.is_some() {
            sql.push_str(" WHERE language = ?1");
        }
        sql.push_str(" ORDER BY language, name");
        let mut stmt = self.conn.prepare(&sql)?;
        let map = |row: &Row<'_>| -> rusqlite::Result<Translator> {
            Ok(Translator {
                id: row.get(0)?,
                code: row.get(1)?,
                name: row.get(2)?,
                language: row.get(3)?,
            })
        };
        let rows = match language {
            Some(lang) => stmt.query_map(params![lang], map)?.collect::<rusqlite::Result<Vec<_>>>()?,
            None => stmt.query_map([], map)?.collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
    }

    /// Every translation of one verse, with its edition metadata.
    pub fn verse_translations(&self, verse_id: VerseId) -> Result<Vec<TranslationHit>> {
        let mut stmt = self.conn.prepare(
            "SELECT v.chapter_id, v.verse_number, t.code, t.name, tr.text
               FROM translations tr
               JOIN translators t ON t.id = tr.translator_id
               JOIN verses v ON v.id = tr.verse_id
              WHERE tr.verse_id = ?1
              ORDER BY t.language, t.name",
        )?;
        let rows = stmt.query_map(params![verse_id], |row| {
            Ok(TranslationHit {
                chapter_id: row.get(0)?,
                verse_number: row.get(1)?,
                translator_code: row.get(2)?,
                translator_name: row.get(3)?,
                text: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Words of one verse, in reading order.
    pub fn verse_words(&self, verse_id: VerseId) -> Result<Vec<WordRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT verse_id, word_position, surface_text, root_id, lemma, part_of_speech, gloss
               FROM words WHERE verse_id = ?1 ORDER BY word_position",
        )?;
        let rows = stmt.query_map(params![verse_id], word_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Words resolved to one root, across the whole corpus.
    pub fn words_by_root(&self, root_id: RootId) -> Result<Vec<WordRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT verse_id, word_position, surface_text, root_id, lemma, part_of_speech, gloss
               FROM words WHERE root_id = ?1 ORDER BY verse_id, word_position",
        )?;
        let rows = stmt.query_map(params![root_id], word_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Substring search over translation text, optionally narrowed by
    /// translator code and/or language.
    pub fn search_translations(
        &self,
        query: &str,
        translator: Option<&str>,
        language: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TranslationHit>> {
        let mut sql = String::from(
            "SELECT v.chapter_id, v.verse_number, t.code, t.name, tr.text
               FROM translations tr
               JOIN translators t ON t.id = tr.translator_id
               JOIN verses v ON v.id = tr.verse_id
              WHERE tr.text LIKE ?1",
        );
        let pattern = format!("%{query}%");
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(pattern)];
        if let Some(code) = translator {
            sql.push_str(&format!(" AND t.code = ?{}", args.len() + 1));
            args.push(Box::new(code.to_string()));
        }
        if let Some(lang) = language {
            sql.push_str(&format!(" AND t.language = ?{}", args.len() + 1));
            args.push(Box::new(lang.to_string()));
        }
        sql.push_str(&format!(
            " ORDER BY v.chapter_id, v.verse_number LIMIT ?{} OFFSET ?{}",
            args.len() + 1,
            args.len() + 2
        ));
        args.push(Box::new(limit));
        args.push(Box::new(offset));

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(args), |row| {
            Ok(TranslationHit {
                chapter_id: row.get(0)?,
                verse_number: row.get(1)?,
                translator_code: row.get(2)?,
                translator_name: row.get(3)?,
                text: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Substring search over original-language verse text.
    pub fn search_verse_text(&self, query: &str, limit: u32, offset: u32) -> Result<Vec<(ChapterNo, VerseNo, String)>> {
        let mut stmt = self.conn.prepare(
            "SELECT chapter_id, verse_number, text FROM verses
              WHERE text LIKE ?1
              ORDER BY chapter_id, verse_number LIMIT ?2 OFFSET ?3",
        )?;
        let rows = stmt.query_map(params![format!("%{query}%"), limit, offset], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn counts(&self) -> Result<TableCounts> {
        let count = |table: &str| -> Result<u64> {
            Ok(self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?)
        };
        Ok(TableCounts {
            chapters: count("chapters")?,
            verses: count("verses")?,
            translators: count("translators")?,
            translations: count("translations")?,
            roots: count("roots")?,
            words: count("words")?,
        })
    }
}
