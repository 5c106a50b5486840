//! Reconstruction of whole words from sub-word segments.
//!
//! The corpus tags morphemes, not words: a single written word may span a
//! conjunction prefix, a preposition, a stem and a pronoun suffix, each on
//! its own line. The assembler folds the segment stream into one
//! [`AssembledWord`] per (chapter, verse, word) key, concatenating surface
//! text in arrival order and electing one lemma/part-of-speech per word.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::segment::{PartOfSpeech, PosClass, Segment};

/// Identity of a written word: (chapter, verse, word position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WordKey {
    pub chapter: u16,
    pub verse: u16,
    pub word: u16,
}

/// Per-segment snapshot retained for traceability. Not consulted when
/// reading the word's final fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentTrace {
    pub surface: String,
    pub part_of_speech: PartOfSpeech,
    pub root: Option<String>,
    pub lemma: Option<String>,
}

/// One reconstructed word. Immutable once the whole corpus has been
/// consumed and the assembler is drained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledWord {
    pub key: WordKey,
    pub surface: String,
    pub root: Option<String>,
    pub lemma: Option<String>,
    pub part_of_speech: PartOfSpeech,
    pub segments: Vec<SegmentTrace>,
}

/// Stateful fold over the segment stream, keyed by word identity.
///
/// The corpus delivers segments in key order, but nothing here relies on
/// adjacency: a segment for an already-seen key is routed to its word
/// wherever it arrives. Iteration order of the result is the key order,
/// which keeps downstream persistence deterministic.
#[derive(Debug, Default)]
pub struct WordAssembler {
    words: BTreeMap<WordKey, AssembledWord>,
}

impl WordAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Fold one segment into its word.
    pub fn push(&mut self, segment: Segment) {
        let key = WordKey {
            chapter: segment.location.chapter,
            verse: segment.location.verse,
            word: segment.location.word,
        };
        let trace = SegmentTrace {
            surface: segment.surface.clone(),
            part_of_speech: segment.part_of_speech,
            root: segment.root.clone(),
            lemma: segment.lemma.clone(),
        };

        match self.words.entry(key) {
            Entry::Vacant(slot) => {
                // First segment for the key seeds every field directly.
                slot.insert(AssembledWord {
                    key,
                    surface: segment.surface,
                    root: segment.root,
                    lemma: segment.lemma,
                    part_of_speech: segment.part_of_speech,
                    segments: vec![trace],
                });
            }
            Entry::Occupied(slot) => {
                let word = slot.into_mut();
                // Original script carries no spacing between morphemes.
                word.surface.push_str(&segment.surface);

                // First non-null root wins, in arrival order.
                if word.root.is_none() {
                    word.root = segment.root.clone();
                }

                // Lemma/POS contest, most specific wins:
                //  (a) a main-class segment with a lemma always takes over;
                //  (b) a lemma+root segment takes over while the word still
                //      holds a clitic-class resolution. Note the asymmetry:
                //      the incoming segment's own class is NOT re-checked
                //      here, only the recorded one. That matches the source
                //      corpus tooling and is kept as-is pending review.
                //  (c) anything else is discarded.
                if segment.lemma.is_some()
                    && segment.part_of_speech.class() == PosClass::Main
                {
                    word.lemma = segment.lemma;
                    word.part_of_speech = segment.part_of_speech;
                } else if segment.lemma.is_some()
                    && segment.root.is_some()
                    && word.part_of_speech.class() == PosClass::Clitic
                {
                    word.lemma = segment.lemma;
                    word.part_of_speech = segment.part_of_speech;
                }

                // The trace records the segment whether or not it won.
                word.segments.push(trace);
            }
        }
    }

    /// Hand off the finished words in key order.
    pub fn into_words(self) -> Vec<AssembledWord> {
        self.words.into_values().collect()
    }
}
