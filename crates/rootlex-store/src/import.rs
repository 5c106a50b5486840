//! Canonical-data import: chapters, verses, translators, translations.
//!
//! The verse table must be populated before the morphology pipeline
//! runs; the linker resolves word→verse identity against it. Input is
//! the JSON layout of the upstream data drop: a chapter array, one
//! original-text file and one file per translation, each shaped
//! `{"quran": [{"chapter": n, "verse": n, "text": "..."}]}`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use rootlex_core::types::Chapter;

use crate::store::SqliteStore;

/// The known translation editions, keyed by file code.
pub const TRANSLATORS: &[(&str, &str, &str)] = &[
    ("tr.diyanet", "Diyanet Isleri", "tr"),
    ("tr.yazir", "Elmalili Hamdi Yazir", "tr"),
    ("tr.ates", "Suleyman Ates", "tr"),
    ("tr.bulac", "Ali Bulac", "tr"),
    ("tr.ozturk", "Yasar Nuri Ozturk", "tr"),
    ("tr.vakfi", "Diyanet Vakfi", "tr"),
    ("tr.golpinarli", "Abdulbaki Golpinarli", "tr"),
    ("en.yusufali", "Abdullah Yusuf Ali", "en"),
    ("en.arberry", "Arthur John Arberry", "en"),
    ("en.haleem", "Abdel Haleem", "en"),
    ("en.kamal", "Dr Kamal Omar", "en"),
    ("ar.uthmani", "Arapca (Uthmani)", "ar"),
];

/// Code of the original-language edition that seeds the verse table.
pub const ORIGINAL_TEXT_CODE: &str = "ar.uthmani";

/// Files shorter than this are placeholder downloads, not data.
const MIN_TRANSLATION_BYTES: u64 = 100;

#[derive(Debug, Deserialize)]
struct ChapterSeed {
    number: u16,
    name: String,
    #[serde(rename = "arabicName")]
    arabic_name: String,
    #[serde(rename = "englishName")]
    english_name: String,
    verses: u16,
    revelation: String,
    #[serde(rename = "revelationOrder")]
    revelation_order: u16,
}

#[derive(Debug, Deserialize)]
struct VerseFile {
    quran: Vec<VerseSeed>,
}

#[derive(Debug, Deserialize)]
struct VerseSeed {
    chapter: u16,
    verse: u16,
    text: String,
}

/// Counters for one import run.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImportReport {
    pub chapters: usize,
    pub verses: usize,
    pub translators: usize,
    pub translations: usize,
    pub translation_rows_dropped: usize,
}

/// Import every canonical input under `data_dir`:
/// `chapters.json`, `translations/<code>.json` for the original text and
/// each known translation.
pub fn import_data_dir(store: &mut SqliteStore, data_dir: &Path) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    let chapters_path = data_dir.join("chapters.json");
    report.chapters = import_chapters(store, &chapters_path)
        .with_context(|| format!("importing {}", chapters_path.display()))?;

    for (code, name, language) in TRANSLATORS {
        store.upsert_translator(code, name, language)?;
        report.translators += 1;
    }

    let translations_dir = data_dir.join("translations");

    // Original text first: it seeds the verse rows every translation
    // and every word record hangs off.
    let original = translations_dir.join(format!("{ORIGINAL_TEXT_CODE}.json"));
    report.verses = import_verses(store, &original)
        .with_context(|| format!("importing {}", original.display()))?;

    for (code, _, _) in TRANSLATORS {
        if *code == ORIGINAL_TEXT_CODE {
            continue;
        }
        let path = translations_dir.join(format!("{code}.json"));
        match import_translation(store, &path, code) {
            Ok((linked, dropped)) => {
                report.translations += linked;
                report.translation_rows_dropped += dropped;
            }
            Err(e) => warn!(code, error = %e, "translation skipped"),
        }
    }

    info!(
        chapters = report.chapters,
        verses = report.verses,
        translations = report.translations,
        dropped = report.translation_rows_dropped,
        "canonical data import complete"
    );
    Ok(report)
}

pub fn import_chapters(store: &mut SqliteStore, path: &Path) -> Result<usize> {
    let seeds: Vec<ChapterSeed> = serde_json::from_str(&fs::read_to_string(path)?)?;
    let count = seeds.len();
    for seed in seeds {
        store.upsert_chapter(&Chapter {
            id: seed.number,
            name: seed.name,
            arabic_name: seed.arabic_name,
            english_name: seed.english_name,
            total_verses: seed.verses,
            revelation_type: seed.revelation,
            revelation_order: seed.revelation_order,
        })?;
    }
    Ok(count)
}

/// Seed the verse table from the original-language text file.
pub fn import_verses(store: &mut SqliteStore, path: &Path) -> Result<usize> {
    let file: VerseFile = serde_json::from_str(&fs::read_to_string(path)?)?;
    let count = file.quran.len();
    for seed in &file.quran {
        store.upsert_verse(seed.chapter, seed.verse, &seed.text)?;
    }
    Ok(count)
}

/// Import one translation file. Rows pointing at verses absent from the
/// verse table are dropped, mirroring the linker's orphan policy.
/// Returns (rows linked, rows dropped).
pub fn import_translation(
    store: &mut SqliteStore,
    path: &Path,
    code: &str,
) -> Result<(usize, usize)> {
    let meta = fs::metadata(path)?;
    if meta.len() < MIN_TRANSLATION_BYTES {
        warn!(code, "translation file too small, skipped");
        return Ok((0, 0));
    }

    let file: VerseFile = serde_json::from_str(&fs::read_to_string(path)?)?;
    let (_, name, language) = TRANSLATORS
        .iter()
        .find(|(c, _, _)| *c == code)
        .ok_or_else(|| anyhow::anyhow!("unknown translator code '{code}'"))?;
    let translator_id = store.upsert_translator(code, name, language)?;

    let lookup = store.verse_lookup()?;
    let mut linked = 0;
    let mut dropped = 0;
    for seed in &file.quran {
        match lookup.get(&(seed.chapter, seed.verse)) {
            Some(&verse_id) => {
                store.upsert_translation(verse_id, translator_id, &seed.text)?;
                linked += 1;
            }
            None => dropped += 1,
        }
    }
    Ok((linked, dropped))
}

/// Load a flat `{"key": "value"}` dictionary file (root meanings or word
/// glosses).
pub fn load_dictionary(path: &Path) -> Result<HashMap<String, String>> {
    let map: HashMap<String, String> = serde_json::from_str(&fs::read_to_string(path)?)
        .with_context(|| format!("loading dictionary {}", path.display()))?;
    Ok(map)
}
