//! Database schema.
//!
//! Surrogate ids on `verses` and `roots` are allocated once and then
//! preserved by lookup-before-insert upserts; `translations` and `words`
//! are keyed purely by their natural composite keys.

use rusqlite::Connection;

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS chapters (
    id               INTEGER PRIMARY KEY,
    name             TEXT NOT NULL,
    arabic_name      TEXT NOT NULL,
    english_name     TEXT NOT NULL,
    total_verses     INTEGER NOT NULL,
    revelation_type  TEXT,
    revelation_order INTEGER
);

CREATE TABLE IF NOT EXISTS verses (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    chapter_id   INTEGER NOT NULL REFERENCES chapters(id),
    verse_number INTEGER NOT NULL,
    text         TEXT NOT NULL,
    UNIQUE (chapter_id, verse_number)
);
CREATE INDEX IF NOT EXISTS idx_verses_chapter ON verses(chapter_id);

CREATE TABLE IF NOT EXISTS translators (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    code     TEXT NOT NULL UNIQUE,
    name     TEXT NOT NULL,
    language TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS translations (
    verse_id      INTEGER NOT NULL REFERENCES verses(id),
    translator_id INTEGER NOT NULL REFERENCES translators(id),
    text          TEXT NOT NULL,
    PRIMARY KEY (verse_id, translator_id)
);

CREATE TABLE IF NOT EXISTS roots (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    root             TEXT NOT NULL UNIQUE,
    occurrence_count INTEGER NOT NULL DEFAULT 0,
    meaning_tr       TEXT,
    meaning_en       TEXT
);

CREATE TABLE IF NOT EXISTS words (
    verse_id       INTEGER NOT NULL REFERENCES verses(id),
    word_position  INTEGER NOT NULL,
    surface_text   TEXT NOT NULL,
    root_id        INTEGER REFERENCES roots(id),
    lemma          TEXT,
    part_of_speech TEXT,
    gloss          TEXT,
    PRIMARY KEY (verse_id, word_position)
);
CREATE INDEX IF NOT EXISTS idx_words_root ON words(root_id);
"#;

pub fn init(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
