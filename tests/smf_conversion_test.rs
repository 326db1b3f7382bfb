// End-to-end conversion of Standard MIDI File bytes to MusicXML

use midi2xml_wasm::converters::smf::parse_smf;
use midi2xml_wasm::{smf_to_musicxml, ConversionError, ConversionSettings};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

fn event(delta: u32, kind: TrackEventKind<'static>) -> TrackEvent<'static> {
    TrackEvent {
        delta: delta.into(),
        kind,
    }
}

fn midi(message: MidiMessage) -> TrackEventKind<'static> {
    TrackEventKind::Midi {
        channel: 0.into(),
        message,
    }
}

fn on(delta: u32, key: u8) -> TrackEvent<'static> {
    event(delta, midi(MidiMessage::NoteOn { key: key.into(), vel: 90.into() }))
}

/// NoteOn with velocity 0, the running-status friendly noteOff
fn off(delta: u32, key: u8) -> TrackEvent<'static> {
    event(delta, midi(MidiMessage::NoteOn { key: key.into(), vel: 0.into() }))
}

fn end_of_track() -> TrackEvent<'static> {
    event(0, TrackEventKind::Meta(MetaMessage::EndOfTrack))
}

/// Format 1 file: a conductor track (3/4, 100 bpm) and a violin melody
/// D4 F#4 A4 (quarters) then D5 (half)
fn violin_arpeggio_bytes() -> Vec<u8> {
    let conductor = vec![
        event(0, TrackEventKind::Meta(MetaMessage::TimeSignature(3, 2, 24, 8))),
        event(0, TrackEventKind::Meta(MetaMessage::Tempo(600_000.into()))),
        end_of_track(),
    ];
    let melody = vec![
        event(0, midi(MidiMessage::ProgramChange { program: 40.into() })),
        on(0, 62),
        off(480, 62),
        on(0, 66),
        off(480, 66),
        on(0, 69),
        off(480, 69),
        on(0, 74),
        off(960, 74),
        end_of_track(),
    ];

    let smf = Smf {
        header: Header::new(Format::Parallel, Timing::Metrical(480.into())),
        tracks: vec![conductor, melody],
    };
    let mut bytes = Vec::new();
    smf.write(&mut bytes).expect("in-memory SMF write should succeed");
    bytes
}

fn parse(xml: &str) -> roxmltree::Document<'_> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    roxmltree::Document::parse_with_options(xml, options).expect("MusicXML should be well-formed")
}

fn text_of<'a>(doc: &'a roxmltree::Document, tag: &str) -> Vec<&'a str> {
    doc.descendants()
        .filter(|n| n.has_tag_name(tag))
        .filter_map(|n| n.text())
        .collect()
}

fn settings() -> ConversionSettings {
    ConversionSettings {
        title: "Arpeggio".to_string(),
        encoding_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 31),
        ..ConversionSettings::default()
    }
}

#[test]
fn test_decoded_events_keep_program_and_meta() {
    let midi = parse_smf(&violin_arpeggio_bytes()).expect("bytes should decode");
    assert_eq!(midi.header.ticks_per_beat, 480);
    assert_eq!(midi.header.format_type, 1);
    assert_eq!(midi.tracks.len(), 2);
    assert_eq!(midi.tracks[1][0].channel(), Some(0));
}

#[test]
fn test_smf_converts_to_partwise_score() {
    let xml = smf_to_musicxml(&violin_arpeggio_bytes(), &settings()).expect("conversion should succeed");
    let doc = parse(&xml);

    assert_eq!(doc.root_element().tag_name().name(), "score-partwise");
    assert_eq!(text_of(&doc, "work-title"), vec!["Arpeggio"]);
    assert_eq!(text_of(&doc, "encoding-date"), vec!["2024-01-31"]);

    // Conductor track has no notes, so only the melody becomes a part
    let part_ids: Vec<&str> = doc
        .descendants()
        .filter(|n| n.has_tag_name("part"))
        .filter_map(|n| n.attribute("id"))
        .collect();
    assert_eq!(part_ids, vec!["P1"]);

    assert_eq!(text_of(&doc, "part-name"), vec!["Violin"]);
    assert_eq!(text_of(&doc, "midi-program"), vec!["41"]);
    assert_eq!(text_of(&doc, "midi-channel"), vec!["1"]);
}

#[test]
fn test_smf_attributes_and_tempo() {
    let xml = smf_to_musicxml(&violin_arpeggio_bytes(), &settings()).unwrap();
    let doc = parse(&xml);

    assert_eq!(text_of(&doc, "divisions"), vec!["480"]);
    assert_eq!(text_of(&doc, "beats"), vec!["3"]);
    assert_eq!(text_of(&doc, "beat-type"), vec!["4"]);
    assert_eq!(text_of(&doc, "per-minute"), vec!["100"]);
    assert_eq!(text_of(&doc, "beat-unit"), vec!["quarter"]);

    // D, F# and A first fit G major on the fifths sweep
    assert_eq!(text_of(&doc, "fifths"), vec!["1"]);
    assert_eq!(text_of(&doc, "mode"), vec!["major"]);
}

#[test]
fn test_smf_measures_and_pitches() {
    let xml = smf_to_musicxml(&violin_arpeggio_bytes(), &settings()).unwrap();
    let doc = parse(&xml);

    let measures: Vec<roxmltree::Node> = doc.descendants().filter(|n| n.has_tag_name("measure")).collect();
    assert_eq!(measures.len(), 2, "3/4 at 480 ticks per beat gives 1440-tick measures");

    let durations: Vec<Vec<&str>> = measures
        .iter()
        .map(|m| {
            m.descendants()
                .filter(|n| n.has_tag_name("duration"))
                .filter_map(|n| n.text())
                .collect()
        })
        .collect();
    assert_eq!(durations, vec![vec!["480", "480", "480"], vec!["960"]]);

    assert_eq!(text_of(&doc, "step"), vec!["D", "F", "A", "D"]);
    assert_eq!(text_of(&doc, "alter"), vec!["1"]);
    assert_eq!(text_of(&doc, "octave"), vec!["4", "4", "4", "5"]);
}

#[test]
fn test_settings_from_json_apply() {
    let settings = ConversionSettings::from_json(r#"{"title":"From JSON","indent":0,"encodingDate":"2023-12-25"}"#)
        .expect("settings JSON should parse");
    let xml = smf_to_musicxml(&violin_arpeggio_bytes(), &settings).unwrap();

    assert!(xml.contains("<work-title>From JSON</work-title>"));
    assert!(xml.contains("<encoding-date>2023-12-25</encoding-date>"));
    assert!(!xml.contains("\n  <"), "indent 0 should not indent nested elements");
}

#[test]
fn test_undecodable_bytes_rejected() {
    let result = smf_to_musicxml(b"MThd but not really", &ConversionSettings::default());
    assert!(matches!(result, Err(ConversionError::Decode(_))));
}

#[test]
fn test_dangling_note_in_smf_rejected() {
    let melody = vec![on(0, 60), end_of_track()];
    let smf = Smf {
        header: Header::new(Format::SingleTrack, Timing::Metrical(96.into())),
        tracks: vec![melody],
    };
    let mut bytes = Vec::new();
    smf.write(&mut bytes).unwrap();

    let result = smf_to_musicxml(&bytes, &ConversionSettings::default());
    assert!(matches!(
        result,
        Err(ConversionError::MalformedTrack { track: 0, started: 1, ended: 0 })
    ));
}
