use std::collections::HashMap;

use rootlex_core::traits::RootStore;
use rootlex_core::types::Chapter;
use rootlex_morph::MorphPipeline;
use rootlex_store::query::RootSort;
use rootlex_store::SqliteStore;

fn chapter(id: u16, name: &str) -> Chapter {
    Chapter {
        id,
        name: name.to_string(),
        arabic_name: format!("ar-{name}"),
        english_name: format!("en-{name}"),
        total_verses: 2,
        revelation_type: "meccan".to_string(),
        revelation_order: id,
    }
}

/// Schema + two chapters with two verses each.
fn seeded_store() -> SqliteStore {
    let mut store = SqliteStore::open_in_memory().expect("open");
    store.init_schema().expect("schema");
    for ch in [chapter(1, "Opening"), chapter(2, "Heifer")] {
        store.upsert_chapter(&ch).expect("chapter");
    }
    for (c, v) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
        store.upsert_verse(c, v, &format!("verse text {c}:{v}")).expect("verse");
    }
    store
}

const CORPUS: &str = "\
1:1:1:1\tbi\tP\tLEM:bi
1:1:1:2\tsmi\tN\tROOT:smw|LEM:{som
1:1:2:1\tAllahi\tPN\tROOT:Alh|LEM:{ll~ah
1:2:1:1\tAl\tDET\tLEM:Al
1:2:1:2\tkitAbu\tN\tROOT:ktb|LEM:kitAb
2:1:1:1\tkutiba\tV\tROOT:ktb|LEM:kataba
9:9:1:1\torphan\tN\tROOT:orp
";

#[test]
fn ingest_persists_words_roots_and_counts() {
    let mut store = seeded_store();
    let verses = store.verse_lookup().expect("lookup");

    let report = store
        .transaction(|s| MorphPipeline::new().run(CORPUS, &verses, s))
        .expect("ingest");

    assert_eq!(report.words_assembled, 5);
    assert_eq!(report.words_linked, 4);
    assert_eq!(report.orphans_dropped, 1);
    assert_eq!(report.roots_registered, 4);

    let counts = store.counts().expect("counts");
    assert_eq!(counts.words, 4);
    assert_eq!(counts.roots, 4);

    // ktb occurs in two assembled words; the persisted count agrees with
    // the word rows referencing it.
    let ktb = store.root_by_name("ktb").expect("query").expect("ktb row");
    assert_eq!(ktb.occurrence_count, 2);
    assert_eq!(store.words_by_root(ktb.id).expect("words").len(), 2);

    // Orphan root was registered but links to no surviving word.
    let orp = store.root_by_name("orp").expect("query").expect("orp row");
    assert_eq!(orp.occurrence_count, 1);
    assert!(store.words_by_root(orp.id).expect("words").is_empty());
}

#[test]
fn reingestion_preserves_root_ids_and_word_rows() {
    let mut store = seeded_store();
    let verses = store.verse_lookup().expect("lookup");
    let pipeline = MorphPipeline::new();

    store.transaction(|s| pipeline.run(CORPUS, &verses, s)).expect("first");
    let roots_first = store.list_roots(RootSort::Alpha, 100, 0).expect("roots");
    let ktb_words_first = {
        let id = store.root_by_name("ktb").expect("q").expect("row").id;
        store.words_by_root(id).expect("words")
    };

    store.transaction(|s| pipeline.run(CORPUS, &verses, s)).expect("second");
    let roots_second = store.list_roots(RootSort::Alpha, 100, 0).expect("roots");
    let ktb_words_second = {
        let id = store.root_by_name("ktb").expect("q").expect("row").id;
        store.words_by_root(id).expect("words")
    };

    assert_eq!(roots_first, roots_second, "same ids, same fields after re-run");
    assert_eq!(ktb_words_first, ktb_words_second);
    assert_eq!(store.counts().expect("counts").words, 4, "no duplicate word rows");
}

#[test]
fn failed_batch_rolls_back_to_previous_state() {
    let mut store = seeded_store();
    let verses = store.verse_lookup().expect("lookup");

    store
        .transaction(|s| MorphPipeline::new().run(CORPUS, &verses, s))
        .expect("baseline ingest");
    let before = store.counts().expect("counts");

    let result: anyhow::Result<()> = store.transaction(|s| {
        s.upsert_root("zzz", 1, None, None)?;
        anyhow::bail!("simulated mid-batch failure")
    });
    assert!(result.is_err());

    let after = store.counts().expect("counts");
    assert_eq!(before.roots, after.roots, "rolled-back root must not persist");
    assert!(store.root_by_name("zzz").expect("query").is_none());
}

#[test]
fn meanings_survive_a_dictionaryless_rerun() {
    let mut store = seeded_store();
    let verses = store.verse_lookup().expect("lookup");

    let meanings: HashMap<_, _> = [("ktb".to_string(), "to write".to_string())].into();
    store
        .transaction(|s| MorphPipeline::new().with_meanings_en(meanings).run(CORPUS, &verses, s))
        .expect("first");

    // Re-ingest without dictionaries: glosses stay, counts refresh.
    store
        .transaction(|s| MorphPipeline::new().run(CORPUS, &verses, s))
        .expect("second");
    let ktb = store.root_by_name("ktb").expect("q").expect("row");
    assert_eq!(ktb.meaning_en.as_deref(), Some("to write"));
}

#[test]
fn root_views_join_verses_and_chapters() {
    let mut store = seeded_store();
    let verses = store.verse_lookup().expect("lookup");
    store
        .transaction(|s| MorphPipeline::new().run(CORPUS, &verses, s))
        .expect("ingest");

    let ktb = store.root_by_name("ktb").expect("q").expect("row");

    let occurrences = store.root_occurrences(ktb.id).expect("occurrences");
    assert_eq!(occurrences.len(), 2);
    assert_eq!(occurrences[0].chapter_id, 1);
    assert_eq!(occurrences[0].chapter_name, "Opening");
    assert_eq!(occurrences[1].chapter_id, 2);
    assert_eq!(occurrences[1].surface_text, "kutiba");

    let forms = store.derived_forms(ktb.id, 50).expect("forms");
    assert_eq!(forms.len(), 2, "two distinct surface forms");

    let distribution = store.root_distribution(ktb.id).expect("distribution");
    assert_eq!(distribution.len(), 2);
    assert!(distribution.iter().all(|c| c.count == 1));
}

#[test]
fn chapter_views_list_detail_and_verses_with_translation() {
    let mut store = seeded_store();
    let verses = store.verse_lookup().expect("lookup");
    let tr_id = store.upsert_translator("tr.test", "Test TR", "tr").expect("translator");
    store
        .upsert_translation(verses[&(1, 1)], tr_id, "ilk ayet")
        .expect("translation");

    let chapters = store.list_chapters().expect("chapters");
    assert_eq!(chapters.len(), 2);
    assert_eq!(chapters[0].id, 1);
    assert_eq!(chapters[0].name, "Opening");

    let heifer = store.chapter_by_id(2).expect("query").expect("row");
    assert_eq!(heifer.english_name, "en-Heifer");
    assert!(store.chapter_by_id(99).expect("query").is_none());

    // With an edition: translated verses carry its text, others None.
    let with_tr = store.chapter_verses(1, Some("tr.test")).expect("verses");
    assert_eq!(with_tr.len(), 2);
    assert_eq!(with_tr[0].verse_number, 1);
    assert_eq!(with_tr[0].translation.as_deref(), Some("ilk ayet"));
    assert_eq!(with_tr[1].translation, None);

    // Without one: original text only.
    let plain = store.chapter_verses(1, None).expect("verses");
    assert_eq!(plain[0].text, "verse text 1:1");
    assert_eq!(plain[0].translation, None);
}

#[test]
fn verse_words_come_back_in_reading_order() {
    let mut store = seeded_store();
    let verses = store.verse_lookup().expect("lookup");
    store
        .transaction(|s| MorphPipeline::new().run(CORPUS, &verses, s))
        .expect("ingest");

    let verse_id = verses[&(1, 1)];
    let words = store.verse_words(verse_id).expect("words");
    assert_eq!(words.len(), 2);
    assert_eq!(words[0].word_position, 1);
    assert_eq!(words[0].surface_text, "bismi");
    assert_eq!(words[1].surface_text, "Allahi");
}

#[test]
fn translation_search_filters_by_language() {
    let mut store = seeded_store();
    let verses = store.verse_lookup().expect("lookup");
    let tr_id = store.upsert_translator("tr.test", "Test TR", "tr").expect("translator");
    let en_id = store.upsert_translator("en.test", "Test EN", "en").expect("translator");
    store
        .upsert_translation(verses[&(1, 1)], tr_id, "rahman ve rahim olan")
        .expect("translation");
    store
        .upsert_translation(verses[&(1, 1)], en_id, "the most merciful")
        .expect("translation");

    let all = store.search_translations("r", None, None, 50, 0).expect("search");
    assert_eq!(all.len(), 2);

    let turkish = store
        .search_translations("rah", None, Some("tr"), 50, 0)
        .expect("search");
    assert_eq!(turkish.len(), 1);
    assert_eq!(turkish[0].translator_code, "tr.test");

    let by_code = store
        .search_translations("merciful", Some("en.test"), None, 50, 0)
        .expect("search");
    assert_eq!(by_code.len(), 1);

    let verse_hits = store.search_verse_text("text 1:1", 50, 0).expect("search");
    assert_eq!(verse_hits.len(), 1);
    assert_eq!(verse_hits[0].0, 1);

    let verse_translations = store.verse_translations(verses[&(1, 1)]).expect("translations");
    assert_eq!(verse_translations.len(), 2);
    // Ordered by language, then name.
    assert_eq!(verse_translations[0].translator_code, "en.test");

    let turkish_editions = store.list_translators(Some("tr")).expect("translators");
    assert_eq!(turkish_editions.len(), 1);
    assert_eq!(turkish_editions[0].code, "tr.test");
    assert_eq!(store.list_translators(None).expect("translators").len(), 2);
}

#[test]
fn verse_by_ref_resolves_canonical_reference() {
    let store = seeded_store();
    let verse = store.verse_by_ref(2, 1).expect("query").expect("row");
    assert_eq!(verse.chapter_id, 2);
    assert_eq!(verse.verse_number, 1);
    assert_eq!(verse.text, "verse text 2:1");
    assert!(store.verse_by_ref(2, 99).expect("query").is_none());
}
