//! End-to-end morphology ingestion batch.
//!
//! Single-threaded, single-pass: every input is in memory before the
//! first stage runs, and nothing is written except through the store
//! handed in by the caller. Run the batch inside the store's transaction
//! boundary to get all-or-nothing persistence.

use std::collections::HashMap;

use rootlex_core::traits::{RootStore, VerseLookup, WordStore};
use tracing::{info, warn};

use crate::assembler::WordAssembler;
use crate::linker;
use crate::registry::RootRegistry;
use crate::segment::{self, LineOutcome};

/// Counters for one ingestion run. The skip counters are the minimum
/// observability needed to validate a run against the source corpus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub lines_read: usize,
    pub segments_parsed: usize,
    pub lines_malformed: usize,
    pub lines_unknown_tag: usize,
    pub words_assembled: usize,
    pub roots_registered: usize,
    pub words_linked: usize,
    pub orphans_dropped: usize,
}

/// The four-stage batch: parse → assemble → register roots → link.
///
/// Meaning and gloss dictionaries are optional; attach them before
/// calling [`MorphPipeline::run`]. Dictionaries of the same language
/// merge in attach order, later entries overriding earlier ones.
#[derive(Debug, Default)]
pub struct MorphPipeline {
    meanings_tr: Vec<HashMap<String, String>>,
    meanings_en: Vec<HashMap<String, String>>,
    glosses: HashMap<String, String>,
}

impl MorphPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meanings_tr(mut self, dict: HashMap<String, String>) -> Self {
        self.meanings_tr.push(dict);
        self
    }

    pub fn with_meanings_en(mut self, dict: HashMap<String, String>) -> Self {
        self.meanings_en.push(dict);
        self
    }

    /// Word-gloss dictionary, keyed by lemma or assembled surface text.
    pub fn with_glosses(mut self, dict: HashMap<String, String>) -> Self {
        self.glosses.extend(dict);
        self
    }

    /// Run the whole batch over the raw corpus text.
    ///
    /// Per-line and per-word problems are counted and skipped; a
    /// registry inconsistency or a store failure aborts with an error
    /// and nothing of the run should be kept (run inside a transaction).
    pub fn run<S>(
        &self,
        corpus: &str,
        verses: &dyn VerseLookup,
        store: &mut S,
    ) -> anyhow::Result<IngestReport>
    where
        S: RootStore + WordStore,
    {
        let mut report = IngestReport::default();

        let mut assembler = WordAssembler::new();
        for (line_no, line) in corpus.lines().enumerate() {
            report.lines_read += 1;
            match segment::parse_line(line) {
                LineOutcome::Segment(segment) => {
                    report.segments_parsed += 1;
                    assembler.push(segment);
                }
                LineOutcome::Blank => {}
                LineOutcome::Malformed => {
                    report.lines_malformed += 1;
                    warn!(line = line_no + 1, "malformed corpus line skipped");
                }
                LineOutcome::UnknownTag => {
                    report.lines_unknown_tag += 1;
                    warn!(line = line_no + 1, "unknown part-of-speech tag, line skipped");
                }
            }
        }
        let words = assembler.into_words();
        report.words_assembled = words.len();
        info!(
            segments = report.segments_parsed,
            words = report.words_assembled,
            malformed = report.lines_malformed,
            unknown_tag = report.lines_unknown_tag,
            "assembly pass complete"
        );

        let mut registry = RootRegistry::from_words(&words);
        for dict in &self.meanings_tr {
            registry.merge_meanings_tr(dict.clone());
        }
        for dict in &self.meanings_en {
            registry.merge_meanings_en(dict.clone());
        }
        report.roots_registered = registry.len();
        let root_ids = registry.persist(store)?;

        let linked = linker::link_words(&words, &root_ids, verses, &self.glosses, store)?;
        report.words_linked = linked.words_linked;
        report.orphans_dropped = linked.orphans_dropped;
        info!(
            roots = report.roots_registered,
            linked = report.words_linked,
            orphans = report.orphans_dropped,
            "ingestion batch complete"
        );

        Ok(report)
    }
}
