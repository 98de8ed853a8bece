/*!
 * Tests for transcript extraction, corrected text parsing and reconstruction
 */

use wordsync::alignment::TimingInterval;
use wordsync::errors::TranscriptError;
use wordsync::transcript::{split_speaker_label, AlignedTranscript, CorrectedTranscript, MachineTranscript, ParagraphSpan};
use wordsync::AlignedWord;
use crate::common;

/// Test extraction of the sample machine transcript
#[test]
fn test_extract_sampleTranscript_shouldKeepOrderAndTimings() {
    let machine = MachineTranscript::from_json(common::SAMPLE_MACHINE_JSON).unwrap();
    let source = machine.extract().unwrap();

    assert_eq!(source.len(), 8);
    assert_eq!(source.words[0], "Hello,");
    assert_eq!(source.words[7], "everyone.");
    assert_eq!(source.timings[4], TimingInterval::new(0.9, 1.3));
    assert_eq!(machine.paragraphs.len(), 2);
}

/// Test that extraction rejects an inverted interval with its word index
#[test]
fn test_extract_invertedInterval_shouldReportIndex() {
    let json = r#"{"words": [
        {"start": 0.0, "end": 0.5, "text": "fine"},
        {"start": 0.5, "end": 0.6, "text": "fine"},
        {"start": 0.9, "end": 0.7, "text": "broken"}
    ]}"#;

    let machine = MachineTranscript::from_json(json).unwrap();
    match machine.extract() {
        Err(TranscriptError::InvalidTiming { index, reason, .. }) => {
            assert_eq!(index, 2);
            assert_eq!(reason, "end before start");
        }
        other => panic!("expected invalid timing, got {:?}", other),
    }
}

/// Test that unknown JSON fields are ignored
#[test]
fn test_fromJson_extraFields_shouldBeIgnored() {
    let json = r#"{"words": [{"start": 0, "end": 1, "text": "hi", "confidence": 0.9}], "language": "en"}"#;
    let machine = MachineTranscript::from_json(json).unwrap();
    assert_eq!(machine.words[0].text, "hi");
}

/// Test parsing of the sample corrected text
#[test]
fn test_parse_sampleText_shouldSplitSpeakersAndWords() {
    let parsed = CorrectedTranscript::parse(common::SAMPLE_CORRECTED_TEXT);

    assert_eq!(parsed.word_count(), 10);
    assert_eq!(
        parsed.paragraphs,
        vec![
            ParagraphSpan { speaker: Some("Alice".to_string()), word_range: 0..6 },
            ParagraphSpan { speaker: Some("Bob".to_string()), word_range: 6..10 },
        ]
    );
    assert!(!parsed.words.iter().any(|w| w.contains("Alice") || w.contains("Bob")));
}

/// Test all three speaker label forms
#[test]
fn test_splitSpeakerLabel_allForms_shouldBeRecognized() {
    assert_eq!(split_speaker_label("[Jane Doe]: hi there"), (Some("Jane Doe".to_string()), "hi there"));
    assert_eq!(split_speaker_label("[Jane Doe] hi there"), (Some("Jane Doe".to_string()), "hi there"));
    assert_eq!(split_speaker_label("Jane Doe: hi there"), (Some("Jane Doe".to_string()), "hi there"));
    assert_eq!(split_speaker_label("no label here"), (None, "no label here"));
}

/// Test that bracketed text with too many words is kept as text
#[test]
fn test_splitSpeakerLabel_longBracket_shouldBeText() {
    let line = "[laughs and then keeps laughing for a while] okay";
    assert_eq!(split_speaker_label(line), (None, line));
}

/// Test reconstruction output shapes
#[test]
fn test_reconstruct_shouldProduceJsonAndText() {
    let words = vec![
        AlignedWord::new("Hi", TimingInterval::new(0.0, 0.2)),
        AlignedWord::new("there.", TimingInterval::new(0.2, 0.6)),
    ];
    let spans = vec![ParagraphSpan { speaker: Some("Ann".to_string()), word_range: 0..2 }];
    let transcript = AlignedTranscript::build(words, &spans);

    let value: serde_json::Value = serde_json::from_str(&transcript.to_json(true).unwrap()).unwrap();
    assert_eq!(value["transcript"], "Hi there.");
    assert_eq!(value["paragraphs"][0]["speaker"], "Ann");
    assert_eq!(value["paragraphs"][0]["end"], 0.6);
    assert_eq!(value["words"][1]["start"], 0.2);

    assert_eq!(transcript.to_text(), "[Ann]: Hi there.\n");
}
