//! Score document parser — converts the saved JSON document into the Score
//! data model and back.
//!
//! Loading walks the `serde_json::Value` tree by hand instead of deriving
//! `Deserialize` so every rejection names the exact field path and the
//! offending value. Saving goes through the derived `Serialize` impls.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::ScoreError;
use crate::model::*;

/// Parse a score document from a JSON string.
pub fn parse_score_json(json: &str) -> Result<Score, ScoreError> {
    let value: Value = serde_json::from_str(json)?;
    parse_score_value(&value)
}

/// Tempo must be a positive, finite number of beats per minute.
pub(crate) fn is_valid_tempo(bpm: f64) -> bool {
    bpm > 0.0 && bpm.is_finite()
}

/// `deserialize_with` hook that routes embedded score documents through
/// the same validation as [`parse_score_value`].
pub(crate) fn deserialize_score<'de, D>(deserializer: D) -> Result<Score, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
    parse_score_value(&value).map_err(serde::de::Error::custom)
}

/// Parse a score from an already decoded JSON value.
pub fn parse_score_value(value: &Value) -> Result<Score, ScoreError> {
    let root = as_object(value, "score")?;

    let title = match root.get("title") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => return Err(invalid("title", other, "a string")),
    };

    let tempo = match root.get("tempo") {
        None | Some(Value::Null) => None,
        Some(v) => match v.as_f64() {
            Some(t) if is_valid_tempo(t) => Some(t),
            _ => return Err(invalid("tempo", v, "a positive number")),
        },
    };

    let rendering_mode = match root.get("renderingMode") {
        None => RenderingMode::Staff,
        Some(v) => vocabulary(v, "renderingMode", RenderingMode::from_name, "\"staff\" or \"circles\"")?,
    };

    let clef = match root.get("clef") {
        None => Clef::Treble,
        Some(v) => vocabulary(v, "clef", Clef::from_name, "\"treble\" or \"bass\"")?,
    };

    let time_signature = match root.get("timeSignature") {
        None => TimeSignature::default(),
        Some(v) => parse_time_signature(v)?,
    };

    let parts = match root.get("parts") {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, p)| parse_part(p, i))
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => return Err(invalid("parts", other, "an array")),
    };

    let score = Score {
        title,
        tempo,
        rendering_mode,
        time_signature,
        clef,
        parts,
    };
    log::debug!(
        "parsed score '{}': {} parts, {} notes",
        score.title,
        score.parts.len(),
        score.note_count()
    );
    Ok(score)
}

/// Serialize a score as a pretty-printed JSON document.
pub fn score_to_json(score: &Score) -> Result<String, ScoreError> {
    Ok(serde_json::to_string_pretty(score)?)
}

/// Read and parse a score document from disk.
pub fn load_file(path: impl AsRef<Path>) -> Result<Score, ScoreError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| ScoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_score_json(&json)
}

/// Write a score document to disk.
pub fn save_file(score: &Score, path: impl AsRef<Path>) -> Result<(), ScoreError> {
    let path = path.as_ref();
    let json = score_to_json(score)?;
    std::fs::write(path, json).map_err(|source| ScoreError::Io {
        path: path.display().to_string(),
        source,
    })
}

// ─── Time signature ─────────────────────────────────────────────────

fn parse_time_signature(value: &Value) -> Result<TimeSignature, ScoreError> {
    let obj = as_object(value, "timeSignature")?;
    let beats = integer(obj, "beats", "timeSignature.beats")?;
    let beat_value = integer(obj, "beatValue", "timeSignature.beatValue")?;
    if beats <= 0 || beat_value <= 0 {
        return Err(ScoreError::InvalidTimeSignature { beats, beat_value });
    }
    let to_u32 = |n: i64, field: &str| {
        u32::try_from(n).map_err(|_| ScoreError::InvalidField {
            field: field.to_string(),
            value: n.to_string(),
            expected: "a positive integer",
        })
    };
    Ok(TimeSignature {
        beats: to_u32(beats, "timeSignature.beats")?,
        beat_value: to_u32(beat_value, "timeSignature.beatValue")?,
    })
}

fn integer(obj: &Map<String, Value>, key: &str, field: &str) -> Result<i64, ScoreError> {
    let value = obj.get(key).ok_or_else(|| missing(field))?;
    value
        .as_i64()
        .ok_or_else(|| invalid(field, value, "an integer"))
}

// ─── Parts ──────────────────────────────────────────────────────────

fn parse_part(value: &Value, index: usize) -> Result<Part, ScoreError> {
    let path = format!("parts[{index}]");
    let obj = as_object(value, &path)?;

    let name = match obj.get("name") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => return Err(invalid(&format!("{path}.name"), other, "a string")),
    };

    let notes_path = format!("{path}.notes");
    let notes = match obj.get("notes") {
        None => return Err(missing(&notes_path)),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, n)| parse_note_or_rest(n, &format!("{notes_path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => return Err(invalid(&notes_path, other, "an array")),
    };

    Ok(Part { name, notes })
}

// ─── Notes and rests ────────────────────────────────────────────────

fn parse_note_or_rest(value: &Value, path: &str) -> Result<NoteOrRest, ScoreError> {
    let obj = as_object(value, path)?;
    let kind_path = format!("{path}.type");
    let kind = obj.get("type").ok_or_else(|| missing(&kind_path))?;

    match kind.as_str() {
        Some("note") => parse_note(obj, path).map(NoteOrRest::Note),
        Some("rest") => {
            for key in ["pitch", "octave", "lyric", "accented"] {
                if let Some(v) = obj.get(key) {
                    return Err(invalid(&format!("{path}.{key}"), v, "no such field on a rest"));
                }
            }
            let duration = required(obj, path, "duration", Duration::from_name, DURATION_NAMES)?;
            Ok(NoteOrRest::Rest(Rest { duration }))
        }
        _ => Err(invalid(&kind_path, kind, "\"note\" or \"rest\"")),
    }
}

const PITCH_NAMES: &str = "one of C, D, E, F, G, A, H";
const OCTAVE_NAMES: &str = "one of lower, middle, upper";
const DURATION_NAMES: &str = "one of whole, half, quarter, eighth, sixteenth";

fn parse_note(obj: &Map<String, Value>, path: &str) -> Result<Note, ScoreError> {
    let pitch = required(obj, path, "pitch", Pitch::from_name, PITCH_NAMES)?;
    let octave = required(obj, path, "octave", Octave::from_name, OCTAVE_NAMES)?;
    let duration = required(obj, path, "duration", Duration::from_name, DURATION_NAMES)?;

    let lyric = match obj.get("lyric") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => return Err(invalid(&format!("{path}.lyric"), other, "a string")),
    };

    let accented = match obj.get("accented") {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(other) => return Err(invalid(&format!("{path}.accented"), other, "a boolean")),
    };

    if accented == Some(true) && pitch.upper_neighbor().is_none() {
        log::debug!("{path}: accented {} has no upper neighbor, drawn unsplit", pitch.as_str());
    }

    Ok(Note {
        pitch,
        octave,
        duration,
        lyric,
        accented,
    })
}

// ─── Helpers ────────────────────────────────────────────────────────

fn as_object<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>, ScoreError> {
    value.as_object().ok_or_else(|| ScoreError::NotAnObject {
        field: field.to_string(),
    })
}

fn required<T>(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    from_name: fn(&str) -> Option<T>,
    expected: &'static str,
) -> Result<T, ScoreError> {
    let field = format!("{path}.{key}");
    let value = obj.get(key).ok_or_else(|| missing(&field))?;
    vocabulary(value, &field, from_name, expected)
}

fn vocabulary<T>(
    value: &Value,
    field: &str,
    from_name: fn(&str) -> Option<T>,
    expected: &'static str,
) -> Result<T, ScoreError> {
    value
        .as_str()
        .and_then(from_name)
        .ok_or_else(|| invalid(field, value, expected))
}

fn missing(field: &str) -> ScoreError {
    ScoreError::MissingField {
        field: field.to_string(),
    }
}

fn invalid(field: &str, value: &Value, expected: &'static str) -> ScoreError {
    ScoreError::InvalidField {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = r#"{
        "title": "Skákal pes",
        "tempo": 96,
        "renderingMode": "circles",
        "timeSignature": { "beats": 3, "beatValue": 4 },
        "clef": "bass",
        "parts": [
            { "name": "Melody", "notes": [
                { "type": "note", "pitch": "G", "octave": "middle", "duration": "quarter", "lyric": "Ská" },
                { "type": "note", "pitch": "F", "octave": "lower", "duration": "eighth", "accented": true },
                { "type": "rest", "duration": "half" }
            ]},
            { "notes": [] }
        ]
    }"#;

    #[test]
    fn parses_full_document() {
        let score = parse_score_json(DOC).expect("valid document");
        assert_eq!(score.title, "Skákal pes");
        assert_eq!(score.tempo, Some(96.0));
        assert_eq!(score.rendering_mode, RenderingMode::Circles);
        assert_eq!(score.time_signature, TimeSignature { beats: 3, beat_value: 4 });
        assert_eq!(score.clef, Clef::Bass);
        assert_eq!(score.parts.len(), 2);
        assert_eq!(score.parts[0].name.as_deref(), Some("Melody"));
        assert_eq!(score.parts[1].name, None);

        let notes = &score.parts[0].notes;
        let first = notes[0].as_note().expect("note");
        assert_eq!(first.lyric.as_deref(), Some("Ská"));
        assert_eq!(first.accented, None);
        assert_eq!(notes[1].as_note().map(|n| n.accented), Some(Some(true)));
        assert_eq!(notes[2], NoteOrRest::rest(Duration::Half));
    }

    #[test]
    fn missing_top_level_fields_take_defaults() {
        let score = parse_score_json("{}").expect("empty object is a score");
        assert_eq!(score, Score::new());
    }

    #[test]
    fn round_trip_preserves_optional_fields() {
        let score = parse_score_json(DOC).expect("valid document");
        let json = score_to_json(&score).expect("serializes");
        let again = parse_score_json(&json).expect("reparses");
        assert_eq!(score, again);
        // Absent optionals stay absent.
        assert!(!json.contains("\"lyric\": null"));
        assert!(json.contains("\"beatValue\": 4"));
    }

    #[test]
    fn non_object_root_is_rejected() {
        let err = parse_score_json("[1, 2]").unwrap_err();
        assert!(matches!(err, ScoreError::NotAnObject { ref field } if field == "score"));
    }

    #[test]
    fn syntax_errors_surface_as_json_errors() {
        assert!(matches!(parse_score_json("{"), Err(ScoreError::Json(_))));
    }

    #[test]
    fn invalid_pitch_names_field_and_value() {
        let doc = r#"{"parts":[{"notes":[
            {"type":"rest","duration":"quarter"},
            {"type":"note","pitch":"B","octave":"middle","duration":"quarter"}
        ]}]}"#;
        let err = parse_score_json(doc).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value \"B\" for 'parts[0].notes[1].pitch' (expected one of C, D, E, F, G, A, H)"
        );
    }

    #[test]
    fn invalid_vocabulary_is_rejected() {
        let cases = [
            (r#"{"renderingMode":"piano-roll"}"#, "renderingMode"),
            (r#"{"clef":"alto"}"#, "clef"),
            (r#"{"parts":[{"notes":[{"type":"chord"}]}]}"#, "parts[0].notes[0].type"),
            (
                r#"{"parts":[{"notes":[{"type":"note","pitch":"C","octave":"high","duration":"quarter"}]}]}"#,
                "parts[0].notes[0].octave",
            ),
            (r#"{"parts":[{"notes":[{"type":"rest","duration":"dotted"}]}]}"#, "parts[0].notes[0].duration"),
            (r#"{"tempo":"fast"}"#, "tempo"),
            (r#"{"parts":{}}"#, "parts"),
        ];
        for (doc, expected_field) in cases {
            match parse_score_json(doc) {
                Err(ScoreError::InvalidField { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("{doc}: expected InvalidField, got {other:?}"),
            }
        }
    }

    #[test]
    fn missing_note_fields_are_reported() {
        let doc = r#"{"parts":[{"notes":[{"type":"note","pitch":"C","duration":"quarter"}]}]}"#;
        match parse_score_json(doc) {
            Err(ScoreError::MissingField { field }) => assert_eq!(field, "parts[0].notes[0].octave"),
            other => panic!("expected MissingField, got {other:?}"),
        }

        match parse_score_json(r#"{"parts":[{"name":"x"}]}"#) {
            Err(ScoreError::MissingField { field }) => assert_eq!(field, "parts[0].notes"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn rest_with_pitch_is_rejected() {
        let doc = r#"{"parts":[{"notes":[{"type":"rest","duration":"quarter","pitch":"C"}]}]}"#;
        match parse_score_json(doc) {
            Err(ScoreError::InvalidField { field, .. }) => assert_eq!(field, "parts[0].notes[0].pitch"),
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn time_signature_must_be_positive_integers() {
        assert!(matches!(
            parse_score_json(r#"{"timeSignature":{"beats":0,"beatValue":4}}"#),
            Err(ScoreError::InvalidTimeSignature { beats: 0, beat_value: 4 })
        ));
        assert!(matches!(
            parse_score_json(r#"{"timeSignature":{"beats":3.5,"beatValue":4}}"#),
            Err(ScoreError::InvalidField { .. })
        ));
        assert!(matches!(
            parse_score_json(r#"{"timeSignature":{"beats":3}}"#),
            Err(ScoreError::MissingField { .. })
        ));
        assert!(matches!(
            parse_score_json(r#"{"timeSignature":"3/4"}"#),
            Err(ScoreError::NotAnObject { .. })
        ));
    }

    #[test]
    fn accented_e_is_accepted() {
        let doc = r#"{"parts":[{"notes":[{"type":"note","pitch":"E","octave":"upper","duration":"whole","accented":true}]}]}"#;
        let score = parse_score_json(doc).expect("accented E is not an error");
        assert_eq!(score.parts[0].notes[0].as_note().map(|n| n.is_accented()), Some(true));
    }
}
