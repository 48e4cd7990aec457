//! Data model for a color-notation score.
//!
//! These structures are the shared vocabulary of the layout engines, the
//! renderers and the JSON document format. Field names serialize in the
//! camelCase shape of the saved document.

use serde::{Deserialize, Serialize};

/// A complete score. Documents are loaded through the parser, which
/// validates every field, so only `Serialize` is derived here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Title of the piece (may be empty)
    pub title: String,
    /// Tempo in beats per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<f64>,
    /// Which notation the score is displayed in
    pub rendering_mode: RenderingMode,
    pub time_signature: TimeSignature,
    pub clef: Clef,
    /// Voices, rendered one after another
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderingMode {
    Staff,
    Circles,
}

/// Time signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSignature {
    /// Numerator (e.g., 3 in 3/4)
    pub beats: u32,
    /// Denominator (e.g., 4 in 3/4)
    pub beat_value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clef {
    Treble,
    Bass,
}

/// A named voice.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub notes: Vec<NoteOrRest>,
}

/// A single note or rest, tagged by `type` in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NoteOrRest {
    Note(Note),
    Rest(Rest),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub pitch: Pitch,
    pub octave: Octave,
    pub duration: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyric: Option<String>,
    /// Chromatically raised; drawn as a two-color split shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accented: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rest {
    pub duration: Duration,
}

/// The seven diatonic pitch names, in Central European spelling (`H` is
/// English B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pitch {
    C,
    D,
    E,
    F,
    G,
    A,
    H,
}

/// Coarse three-level register, seven diatonic steps apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Octave {
    Lower,
    Middle,
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Duration {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

/// Address of a note or rest: index identity within the current score.
/// Deleting or reordering shifts the indices of everything after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRef {
    pub part_index: usize,
    pub note_index: usize,
}

/// The currently selected note or rest, owned by the interaction layer.
pub type Selection = NoteRef;

impl Score {
    /// Create a new empty score in 4/4, treble clef, staff mode.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            tempo: None,
            rendering_mode: RenderingMode::Staff,
            time_signature: TimeSignature::default(),
            clef: Clef::Treble,
            parts: Vec::new(),
        }
    }

    /// All notes and rests of every part, concatenated part after part.
    pub fn entries(&self) -> impl Iterator<Item = (NoteRef, &NoteOrRest)> + '_ {
        self.parts.iter().enumerate().flat_map(|(part_index, part)| {
            part.notes.iter().enumerate().map(move |(note_index, item)| {
                (NoteRef { part_index, note_index }, item)
            })
        })
    }

    /// Look up the note or rest at an address, if it exists.
    pub fn get(&self, at: NoteRef) -> Option<&NoteOrRest> {
        self.parts.get(at.part_index)?.notes.get(at.note_index)
    }

    /// Total number of notes and rests across all parts.
    pub fn note_count(&self) -> usize {
        self.parts.iter().map(|p| p.notes.len()).sum()
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self { beats: 4, beat_value: 4 }
    }
}

impl TimeSignature {
    /// Length of one measure in quarter-note beats (6/8 → 3.0).
    pub fn measure_beats(&self) -> f64 {
        self.beats as f64 * 4.0 / self.beat_value.max(1) as f64
    }
}

impl Part {
    pub fn new(name: Option<String>) -> Self {
        Self { name, notes: Vec::new() }
    }
}

impl NoteOrRest {
    pub fn note(pitch: Pitch, octave: Octave, duration: Duration) -> Self {
        NoteOrRest::Note(Note::new(pitch, octave, duration))
    }

    pub fn rest(duration: Duration) -> Self {
        NoteOrRest::Rest(Rest { duration })
    }

    pub fn duration(&self) -> Duration {
        match self {
            NoteOrRest::Note(n) => n.duration,
            NoteOrRest::Rest(r) => r.duration,
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, NoteOrRest::Rest(_))
    }

    pub fn as_note(&self) -> Option<&Note> {
        match self {
            NoteOrRest::Note(n) => Some(n),
            NoteOrRest::Rest(_) => None,
        }
    }
}

impl Note {
    pub fn new(pitch: Pitch, octave: Octave, duration: Duration) -> Self {
        Self { pitch, octave, duration, lyric: None, accented: None }
    }

    pub fn is_accented(&self) -> bool {
        self.accented.unwrap_or(false)
    }
}

impl Pitch {
    pub const ALL: [Pitch; 7] = [
        Pitch::C,
        Pitch::D,
        Pitch::E,
        Pitch::F,
        Pitch::G,
        Pitch::A,
        Pitch::H,
    ];

    /// Diatonic step within the register: C = 0 … H = 6.
    pub fn step(self) -> i32 {
        match self {
            Pitch::C => 0,
            Pitch::D => 1,
            Pitch::E => 2,
            Pitch::F => 3,
            Pitch::G => 4,
            Pitch::A => 5,
            Pitch::H => 6,
        }
    }

    /// The next pitch a semitone-raised note leans towards. E and H have
    /// no chromatic step between them and their upper neighbor.
    pub fn upper_neighbor(self) -> Option<Pitch> {
        match self {
            Pitch::C => Some(Pitch::D),
            Pitch::D => Some(Pitch::E),
            Pitch::F => Some(Pitch::G),
            Pitch::G => Some(Pitch::A),
            Pitch::A => Some(Pitch::H),
            Pitch::E | Pitch::H => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Pitch::C => "C",
            Pitch::D => "D",
            Pitch::E => "E",
            Pitch::F => "F",
            Pitch::G => "G",
            Pitch::A => "A",
            Pitch::H => "H",
        }
    }

    pub fn from_name(s: &str) -> Option<Pitch> {
        Pitch::ALL.iter().copied().find(|p| p.as_str() == s)
    }
}

impl Octave {
    pub const ALL: [Octave; 3] = [Octave::Lower, Octave::Middle, Octave::Upper];

    /// Diatonic offset of the register.
    pub fn offset(self) -> i32 {
        match self {
            Octave::Lower => 0,
            Octave::Middle => 7,
            Octave::Upper => 14,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Octave::Lower => "lower",
            Octave::Middle => "middle",
            Octave::Upper => "upper",
        }
    }

    pub fn from_name(s: &str) -> Option<Octave> {
        Octave::ALL.iter().copied().find(|o| o.as_str() == s)
    }
}

impl Duration {
    pub const ALL: [Duration; 5] = [
        Duration::Whole,
        Duration::Half,
        Duration::Quarter,
        Duration::Eighth,
        Duration::Sixteenth,
    ];

    /// Length in quarter-note beats.
    pub fn beats(self) -> f64 {
        match self {
            Duration::Whole => 4.0,
            Duration::Half => 2.0,
            Duration::Quarter => 1.0,
            Duration::Eighth => 0.5,
            Duration::Sixteenth => 0.25,
        }
    }

    /// Whole and half notes have hollow heads.
    pub fn is_filled(self) -> bool {
        !matches!(self, Duration::Whole | Duration::Half)
    }

    pub fn has_stem(self) -> bool {
        self != Duration::Whole
    }

    pub fn flag_count(self) -> usize {
        match self {
            Duration::Eighth => 1,
            Duration::Sixteenth => 2,
            _ => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Duration::Whole => "whole",
            Duration::Half => "half",
            Duration::Quarter => "quarter",
            Duration::Eighth => "eighth",
            Duration::Sixteenth => "sixteenth",
        }
    }

    pub fn from_name(s: &str) -> Option<Duration> {
        Duration::ALL.iter().copied().find(|d| d.as_str() == s)
    }
}

impl Clef {
    pub fn as_str(self) -> &'static str {
        match self {
            Clef::Treble => "treble",
            Clef::Bass => "bass",
        }
    }

    pub fn from_name(s: &str) -> Option<Clef> {
        match s {
            "treble" => Some(Clef::Treble),
            "bass" => Some(Clef::Bass),
            _ => None,
        }
    }
}

impl RenderingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderingMode::Staff => "staff",
            RenderingMode::Circles => "circles",
        }
    }

    pub fn from_name(s: &str) -> Option<RenderingMode> {
        match s {
            "staff" => Some(RenderingMode::Staff),
            "circles" => Some(RenderingMode::Circles),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_concatenate_parts_in_order() {
        let mut score = Score::new();
        score.parts.push(Part {
            name: Some("Soprano".into()),
            notes: vec![
                NoteOrRest::note(Pitch::C, Octave::Middle, Duration::Quarter),
                NoteOrRest::rest(Duration::Half),
            ],
        });
        score.parts.push(Part {
            name: None,
            notes: vec![NoteOrRest::note(Pitch::G, Octave::Lower, Duration::Whole)],
        });

        let refs: Vec<(usize, usize)> = score
            .entries()
            .map(|(r, _)| (r.part_index, r.note_index))
            .collect();
        assert_eq!(refs, vec![(0, 0), (0, 1), (1, 0)]);
        assert_eq!(score.note_count(), 3);
        assert!(score.get(NoteRef { part_index: 0, note_index: 1 }).unwrap().is_rest());
        assert!(score.get(NoteRef { part_index: 1, note_index: 5 }).is_none());
    }

    #[test]
    fn compound_meter_is_normalized_to_quarters() {
        let six_eight = TimeSignature { beats: 6, beat_value: 8 };
        assert_eq!(six_eight.measure_beats(), 3.0);
        let cut = TimeSignature { beats: 2, beat_value: 2 };
        assert_eq!(cut.measure_beats(), 4.0);
    }

    #[test]
    fn only_e_and_h_lack_an_upper_neighbor() {
        let missing: Vec<Pitch> = Pitch::ALL
            .iter()
            .copied()
            .filter(|p| p.upper_neighbor().is_none())
            .collect();
        assert_eq!(missing, vec![Pitch::E, Pitch::H]);
        assert_eq!(Pitch::A.upper_neighbor(), Some(Pitch::H));
    }

    #[test]
    fn names_parse_back() {
        for p in Pitch::ALL {
            assert_eq!(Pitch::from_name(p.as_str()), Some(p));
        }
        for d in Duration::ALL {
            assert_eq!(Duration::from_name(d.as_str()), Some(d));
        }
        assert_eq!(Pitch::from_name("B"), None);
        assert_eq!(Octave::from_name("high"), None);
    }
}
