use std::fs;

use tempfile::TempDir;

use rootlex_store::import;
use rootlex_store::SqliteStore;

fn write_data_dir(tmp: &TempDir) {
    let dir = tmp.path();
    fs::write(
        dir.join("chapters.json"),
        r#"[
          {"number": 1, "name": "Fatiha", "arabicName": "x", "englishName": "The Opening",
           "verses": 2, "revelation": "meccan", "revelationOrder": 5}
        ]"#,
    )
    .expect("chapters.json");

    let translations = dir.join("translations");
    fs::create_dir(&translations).expect("translations dir");
    fs::write(
        translations.join("ar.uthmani.json"),
        r#"{"quran": [
          {"chapter": 1, "verse": 1, "text": "first verse text in the original script"},
          {"chapter": 1, "verse": 2, "text": "second verse text in the original script"}
        ]}"#,
    )
    .expect("original text");
    fs::write(
        translations.join("en.yusufali.json"),
        r#"{"quran": [
          {"chapter": 1, "verse": 1, "text": "In the name of God, long enough to count"},
          {"chapter": 1, "verse": 3, "text": "refers to a verse the original never loaded"}
        ]}"#,
    )
    .expect("translation");
    // Placeholder download, under the sanity threshold: must be skipped.
    fs::write(translations.join("en.arberry.json"), "{}").expect("placeholder");
}

#[test]
fn import_data_dir_loads_and_links() {
    let tmp = TempDir::new().expect("tempdir");
    write_data_dir(&tmp);

    let mut store = SqliteStore::open_in_memory().expect("open");
    store.init_schema().expect("schema");
    let report = store
        .transaction(|s| import::import_data_dir(s, tmp.path()))
        .expect("import");

    assert_eq!(report.chapters, 1);
    assert_eq!(report.verses, 2);
    assert_eq!(report.translators, import::TRANSLATORS.len());
    assert_eq!(report.translations, 1, "row for the unknown verse is dropped");
    assert_eq!(report.translation_rows_dropped, 1);

    let counts = store.counts().expect("counts");
    assert_eq!(counts.verses, 2);
    assert_eq!(counts.translations, 1);
}

#[test]
fn reimport_does_not_duplicate_rows() {
    let tmp = TempDir::new().expect("tempdir");
    write_data_dir(&tmp);

    let mut store = SqliteStore::open_in_memory().expect("open");
    store.init_schema().expect("schema");
    store.transaction(|s| import::import_data_dir(s, tmp.path())).expect("first");
    let lookup_first = store.verse_lookup().expect("lookup");

    store.transaction(|s| import::import_data_dir(s, tmp.path())).expect("second");
    let lookup_second = store.verse_lookup().expect("lookup");

    assert_eq!(lookup_first, lookup_second, "verse ids must be stable across imports");
    let counts = store.counts().expect("counts");
    assert_eq!(counts.verses, 2);
    assert_eq!(counts.translators, import::TRANSLATORS.len() as u64);
    assert_eq!(counts.translations, 1);
}

#[test]
fn load_dictionary_reads_flat_maps() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("meanings.json");
    fs::write(&path, r#"{"ktb": "to write", "qwl": "to say"}"#).expect("write");

    let dict = import::load_dictionary(&path).expect("load");
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.get("ktb").map(String::as_str), Some("to write"));
}
