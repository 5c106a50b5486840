//! SQLite-backed store implementing the pipeline's collaborator seams.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use rootlex_core::traits::{RootStore, WordStore};
use rootlex_core::types::{Chapter, ChapterNo, RootId, VerseId, VerseNo, WordRecord};

use crate::schema;

pub struct SqliteStore {
    pub(crate) conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    pub fn init_schema(&self) -> Result<()> {
        schema::init(&self.conn)?;
        info!("schema ready");
        Ok(())
    }

    /// Run `f` inside one transaction. Commit on `Ok`, roll back on `Err`
    /// so a failed batch leaves the previous persisted state untouched.
    pub fn transaction<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        match f(self) {
            Ok(value) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(value)
            }
            Err(e) => {
                let _ = self.conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }

    // -- canonical data ---------------------------------------------------

    pub fn upsert_chapter(&mut self, chapter: &Chapter) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO chapters
               (id, name, arabic_name, english_name, total_verses, revelation_type, revelation_order)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                chapter.id,
                chapter.name,
                chapter.arabic_name,
                chapter.english_name,
                chapter.total_verses,
                chapter.revelation_type,
                chapter.revelation_order,
            ],
        )?;
        Ok(())
    }

    /// Upsert keyed by (chapter, verse); an existing row keeps its id.
    pub fn upsert_verse(
        &mut self,
        chapter: ChapterNo,
        verse: VerseNo,
        text: &str,
    ) -> Result<VerseId> {
        let existing: Option<VerseId> = self
            .conn
            .query_row(
                "SELECT id FROM verses WHERE chapter_id = ?1 AND verse_number = ?2",
                params![chapter, verse],
                |row| row.get(0),
            )
            .optional()?;
        match existing {
            Some(id) => {
                self.conn.execute(
                    "UPDATE verses SET text = ?1 WHERE id = ?2",
                    params![text, id],
                )?;
                Ok(id)
            }
            None => {
                self.conn.execute(
                    "INSERT INTO verses (chapter_id, verse_number, text) VALUES (?1, ?2, ?3)",
                    params![chapter, verse, text],
                )?;
                Ok(self.conn.last_insert_rowid())
            }
        }
    }

    pub fn upsert_translator(&mut self, code: &str, name: &str, language: &str) -> Result<i64> {
        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM translators WHERE code = ?1",
                params![code],
                |row| row.get(0),
            )
            .optional()?;
        match existing {
            Some(id) => {
                self.conn.execute(
                    "UPDATE translators SET name = ?1, language = ?2 WHERE id = ?3",
                    params![name, language, id],
                )?;
                Ok(id)
            }
            None => {
                self.conn.execute(
                    "INSERT INTO translators (code, name, language) VALUES (?1, ?2, ?3)",
                    params![code, name, language],
                )?;
                Ok(self.conn.last_insert_rowid())
            }
        }
    }

    pub fn upsert_translation(
        &mut self,
        verse_id: VerseId,
        translator_id: i64,
        text: &str,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO translations (verse_id, translator_id, text)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (verse_id, translator_id) DO UPDATE SET text = excluded.text",
            params![verse_id, translator_id, text],
        )?;
        Ok(())
    }

    /// Full in-memory snapshot of (chapter, verse) → verse id, taken once
    /// before the linker stage.
    pub fn verse_lookup(&self) -> Result<HashMap<(ChapterNo, VerseNo), VerseId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT chapter_id, verse_number, id FROM verses")?;
        let rows = stmt.query_map([], |row| {
            Ok(((row.get::<_, ChapterNo>(0)?, row.get::<_, VerseNo>(1)?), row.get::<_, VerseId>(2)?))
        })?;
        let mut lookup = HashMap::new();
        for row in rows {
            let ((chapter, verse), id) = row?;
            lookup.insert((chapter, verse), id);
        }
        Ok(lookup)
    }
}

impl RootStore for SqliteStore {
    fn upsert_root(
        &mut self,
        root: &str,
        occurrence_count: u32,
        meaning_tr: Option<&str>,
        meaning_en: Option<&str>,
    ) -> Result<RootId> {
        // Lookup-before-insert rather than INSERT OR REPLACE: a REPLACE
        // would delete and re-insert the row, forking the surrogate id
        // and breaking word foreign keys from earlier runs.
        let existing: Option<RootId> = self
            .conn
            .query_row(
                "SELECT id FROM roots WHERE root = ?1",
                params![root],
                |row| row.get(0),
            )
            .optional()?;
        match existing {
            Some(id) => {
                // Counts are recomputed every run; glosses are not.
                // COALESCE keeps a previously stored meaning when the
                // current run carries no dictionary entry for the root,
                // so a dictionaryless re-ingestion refreshes counts
                // without erasing curated meanings. A root never named
                // by any dictionary still has NULL glosses.
                self.conn.execute(
                    "UPDATE roots
                        SET occurrence_count = ?1,
                            meaning_tr = COALESCE(?2, meaning_tr),
                            meaning_en = COALESCE(?3, meaning_en)
                      WHERE id = ?4",
                    params![occurrence_count, meaning_tr, meaning_en, id],
                )?;
                Ok(id)
            }
            None => {
                self.conn.execute(
                    "INSERT INTO roots (root, occurrence_count, meaning_tr, meaning_en)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![root, occurrence_count, meaning_tr, meaning_en],
                )?;
                Ok(self.conn.last_insert_rowid())
            }
        }
    }

    fn root_id(&self, root: &str) -> Result<Option<RootId>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id FROM roots WHERE root = ?1",
                params![root],
                |row| row.get(0),
            )
            .optional()?)
    }
}

impl WordStore for SqliteStore {
    fn upsert_word(&mut self, word: &WordRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO words
               (verse_id, word_position, surface_text, root_id, lemma, part_of_speech, gloss)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT (verse_id, word_position) DO UPDATE SET
               surface_text = excluded.surface_text,
               root_id = excluded.root_id,
               lemma = excluded.lemma,
               part_of_speech = excluded.part_of_speech,
               gloss = excluded.gloss",
            params![
                word.verse_id,
                word.word_position,
                word.surface_text,
                word.root_id,
                word.lemma,
                word.part_of_speech,
                word.gloss,
            ],
        )?;
        Ok(())
    }
}
