use rootlex_morph::segment::{parse_line, LineOutcome, PartOfSpeech, PosClass};

fn expect_segment(line: &str) -> rootlex_morph::Segment {
    match parse_line(line) {
        LineOutcome::Segment(s) => s,
        other => panic!("expected segment, got {other:?}"),
    }
}

#[test]
fn parses_full_line_with_features() {
    let seg = expect_segment("2:30:5:2\tXYZ\tN\tROOT:ktb|LEM:kitAb");
    assert_eq!(seg.location.chapter, 2);
    assert_eq!(seg.location.verse, 30);
    assert_eq!(seg.location.word, 5);
    assert_eq!(seg.location.segment, 2);
    assert_eq!(seg.surface, "XYZ");
    assert_eq!(seg.part_of_speech, PartOfSpeech::Noun);
    assert_eq!(seg.root.as_deref(), Some("ktb"));
    assert_eq!(seg.lemma.as_deref(), Some("kitAb"));
}

#[test]
fn features_field_is_optional() {
    let seg = expect_segment("1:1:1:1\tbi\tP");
    assert_eq!(seg.part_of_speech, PartOfSpeech::Preposition);
    assert_eq!(seg.root, None);
    assert_eq!(seg.lemma, None);
}

#[test]
fn unrecognized_feature_keys_contribute_nothing() {
    let seg = expect_segment("1:1:1:1\tx\tV\tPOS:V|MOOD:IND|ROOT:qwl|ASP:PERF");
    assert_eq!(seg.root.as_deref(), Some("qwl"));
    assert_eq!(seg.lemma, None);
}

#[test]
fn blank_and_comment_lines_skip_quietly() {
    assert_eq!(parse_line(""), LineOutcome::Blank);
    assert_eq!(parse_line("   "), LineOutcome::Blank);
    assert_eq!(parse_line("# morphology v0.4"), LineOutcome::Blank);
}

#[test]
fn truncated_location_is_malformed() {
    assert_eq!(parse_line("1:1:1\tx\tN"), LineOutcome::Malformed);
}

#[test]
fn five_part_location_is_malformed() {
    assert_eq!(parse_line("1:1:1:1:9\tx\tN"), LineOutcome::Malformed);
}

#[test]
fn non_integer_location_is_malformed() {
    assert_eq!(parse_line("1:one:1:1\tx\tN"), LineOutcome::Malformed);
}

#[test]
fn missing_pos_field_is_malformed() {
    assert_eq!(parse_line("1:1:1:1\tx"), LineOutcome::Malformed);
}

#[test]
fn unknown_tag_is_reported_not_defaulted() {
    assert_eq!(parse_line("1:1:1:1\tx\tZZZ"), LineOutcome::UnknownTag);
}

#[test]
fn tag_classification_is_closed() {
    for tag in ["N", "PN", "ADJ", "V", "ADV"] {
        let pos = PartOfSpeech::parse(tag).expect(tag);
        assert_eq!(pos.class(), PosClass::Main, "{tag} should be main-class");
        assert_eq!(pos.as_str(), tag);
    }
    for tag in ["P", "CONJ", "PRON", "DET", "NEG", "EMPH", "REL", "INTG"] {
        let pos = PartOfSpeech::parse(tag).expect(tag);
        assert_eq!(pos.class(), PosClass::Clitic, "{tag} should be clitic-class");
        assert_eq!(pos.as_str(), tag);
    }
    assert_eq!(PartOfSpeech::parse("NOUN"), None);
}

#[test]
fn every_corpus_particle_tag_parses_as_clitic() {
    // The long tail of particle tags the tagged corpus actually uses.
    for tag in [
        "ACC", "AMD", "AVR", "CAUS", "CIRC", "COM", "EQ", "EXH", "EXL", "IMPN", "IMPV", "INC",
        "INT", "PREV", "PRO", "RET", "RSLT", "SUP", "SUR",
    ] {
        let pos = PartOfSpeech::parse(tag).expect(tag);
        assert_eq!(pos.class(), PosClass::Clitic, "{tag} should be clitic-class");
        assert_eq!(pos.as_str(), tag);
    }
}
