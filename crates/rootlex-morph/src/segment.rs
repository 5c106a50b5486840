//! Parsing of raw morphology corpus lines.
//!
//! One line describes one sub-word segment:
//!
//! ```text
//! chapter:verse:word:segment<TAB>surface<TAB>POS[<TAB>KEY:VALUE|KEY:VALUE|...]
//! ```
//!
//! Only the `ROOT` and `LEM` feature keys are extracted; everything else
//! in the feature string is ignored. Blank lines and `#` comments are
//! skipped, as are lines the corpus sources are known to garble.

/// Position of a segment in the corpus. All components are 1-based and
/// the corpus emits them in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    pub chapter: u16,
    pub verse: u16,
    pub word: u16,
    pub segment: u16,
}

/// Whether a tag carries the word's core lexical meaning or marks an
/// attached function morpheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosClass {
    /// Noun, verb, adjective, proper noun, adverb.
    Main,
    /// Prepositions, conjunctions, pronouns, particles and the rest.
    Clitic,
}

/// Closed part-of-speech tagset of the morphology corpus.
///
/// Deliberately an enum rather than a string-membership check: a tag the
/// corpus grows that we have never seen fails classification loudly
/// instead of silently landing in one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfSpeech {
    Noun,
    ProperNoun,
    Adjective,
    Verb,
    Adverb,
    Preposition,
    Conjunction,
    SubConjunction,
    Pronoun,
    Demonstrative,
    Relative,
    Determiner,
    TimeAdverb,
    LocationAdverb,
    Negative,
    Future,
    Emphatic,
    Interrogative,
    Vocative,
    Conditional,
    Restriction,
    Exceptive,
    Certainty,
    Resumption,
    Purpose,
    Answer,
    Initials,
    Accusative,
    Amendment,
    Aversion,
    Cause,
    Circumstantial,
    Comitative,
    Equalization,
    Exhortation,
    Explanation,
    ImperativeNoun,
    Imperative,
    Inceptive,
    Interpretation,
    Preventive,
    Prohibition,
    Retraction,
    Result,
    Supplemental,
    Surprise,
}

impl PartOfSpeech {
    /// Parse a corpus tag code. Returns `None` for tags outside the
    /// closed set so the caller can surface them.
    pub fn parse(tag: &str) -> Option<Self> {
        use PartOfSpeech::*;
        Some(match tag {
            "N" => Noun,
            "PN" => ProperNoun,
            "ADJ" => Adjective,
            "V" => Verb,
            "ADV" => Adverb,
            "P" => Preposition,
            "CONJ" => Conjunction,
            "SUB" => SubConjunction,
            "PRON" => Pronoun,
            "DEM" => Demonstrative,
            "REL" => Relative,
            "DET" => Determiner,
            "T" => TimeAdverb,
            "LOC" => LocationAdverb,
            "NEG" => Negative,
            "FUT" => Future,
            "EMPH" => Emphatic,
            "INTG" => Interrogative,
            "VOC" => Vocative,
            "COND" => Conditional,
            "RES" => Restriction,
            "EXP" => Exceptive,
            "CERT" => Certainty,
            "REM" => Resumption,
            "PRP" => Purpose,
            "ANS" => Answer,
            "INL" => Initials,
            "ACC" => Accusative,
            "AMD" => Amendment,
            "AVR" => Aversion,
            "CAUS" => Cause,
            "CIRC" => Circumstantial,
            "COM" => Comitative,
            "EQ" => Equalization,
            "EXH" => Exhortation,
            "EXL" => Explanation,
            "IMPN" => ImperativeNoun,
            "IMPV" => Imperative,
            "INC" => Inceptive,
            "INT" => Interpretation,
            "PREV" => Preventive,
            "PRO" => Prohibition,
            "RET" => Retraction,
            "RSLT" => Result,
            "SUP" => Supplemental,
            "SUR" => Surprise,
            _ => return None,
        })
    }

    /// The corpus tag code, as persisted in word records.
    pub fn as_str(self) -> &'static str {
        use PartOfSpeech::*;
        match self {
            Noun => "N",
            ProperNoun => "PN",
            Adjective => "ADJ",
            Verb => "V",
            Adverb => "ADV",
            Preposition => "P",
            Conjunction => "CONJ",
            SubConjunction => "SUB",
            Pronoun => "PRON",
            Demonstrative => "DEM",
            Relative => "REL",
            Determiner => "DET",
            TimeAdverb => "T",
            LocationAdverb => "LOC",
            Negative => "NEG",
            Future => "FUT",
            Emphatic => "EMPH",
            Interrogative => "INTG",
            Vocative => "VOC",
            Conditional => "COND",
            Restriction => "RES",
            Exceptive => "EXP",
            Certainty => "CERT",
            Resumption => "REM",
            Purpose => "PRP",
            Answer => "ANS",
            Initials => "INL",
            Accusative => "ACC",
            Amendment => "AMD",
            Aversion => "AVR",
            Cause => "CAUS",
            Circumstantial => "CIRC",
            Comitative => "COM",
            Equalization => "EQ",
            Exhortation => "EXH",
            Explanation => "EXL",
            ImperativeNoun => "IMPN",
            Imperative => "IMPV",
            Inceptive => "INC",
            Interpretation => "INT",
            Preventive => "PREV",
            Prohibition => "PRO",
            Retraction => "RET",
            Result => "RSLT",
            Supplemental => "SUP",
            Surprise => "SUR",
        }
    }

    pub fn class(self) -> PosClass {
        use PartOfSpeech::*;
        match self {
            Noun | ProperNoun | Adjective | Verb | Adverb => PosClass::Main,
            _ => PosClass::Clitic,
        }
    }
}

/// One morphologically tagged sub-unit of a word, as read from the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub location: Location,
    pub surface: String,
    pub part_of_speech: PartOfSpeech,
    pub root: Option<String>,
    pub lemma: Option<String>,
}

/// Result of parsing one raw corpus line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Segment(Segment),
    /// Blank line or `#` comment.
    Blank,
    /// Missing fields or a bad location; the line is dropped, the
    /// ingestion continues.
    Malformed,
    /// Structurally fine but tagged with a code outside the closed set.
    UnknownTag,
}

/// Parse one corpus line. Never fails the batch: every problem maps to
/// a skip outcome.
pub fn parse_line(line: &str) -> LineOutcome {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    if trimmed.trim().is_empty() || trimmed.starts_with('#') {
        return LineOutcome::Blank;
    }

    let mut fields = trimmed.split('\t');
    let (Some(location), Some(surface), Some(tag)) =
        (fields.next(), fields.next(), fields.next())
    else {
        return LineOutcome::Malformed;
    };
    let features = fields.next().unwrap_or("");

    let Some(location) = parse_location(location) else {
        return LineOutcome::Malformed;
    };
    if surface.is_empty() {
        return LineOutcome::Malformed;
    }
    let Some(part_of_speech) = PartOfSpeech::parse(tag) else {
        return LineOutcome::UnknownTag;
    };

    let (root, lemma) = parse_features(features);
    LineOutcome::Segment(Segment {
        location,
        surface: surface.to_string(),
        part_of_speech,
        root,
        lemma,
    })
}

/// `chapter:verse:word:segment`, exactly four integer components.
fn parse_location(raw: &str) -> Option<Location> {
    let mut parts = raw.split(':');
    let chapter = parts.next()?.parse().ok()?;
    let verse = parts.next()?.parse().ok()?;
    let word = parts.next()?.parse().ok()?;
    let segment = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Location { chapter, verse, word, segment })
}

/// Pull `ROOT` and `LEM` out of a `|`-joined feature string. Tokens with
/// other keys, or with no `:` at all, contribute nothing.
fn parse_features(features: &str) -> (Option<String>, Option<String>) {
    let mut root = None;
    let mut lemma = None;
    for token in features.split('|') {
        match token.split_once(':') {
            Some(("ROOT", value)) if !value.is_empty() => root = Some(value.to_string()),
            Some(("LEM", value)) if !value.is_empty() => lemma = Some(value.to_string()),
            _ => {}
        }
    }
    (root, lemma)
}
