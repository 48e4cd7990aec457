//! Error type for document loading and editing.
//!
//! Layout and rendering are total over a well-typed [`Score`](crate::Score)
//! and never fail; everything here comes from the edges: JSON documents
//! that do not describe a valid score, and edits that target indices which
//! do not exist.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    /// The document is not syntactically valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A value that must be an object is something else.
    #[error("Expected '{field}' to be an object")]
    NotAnObject { field: String },

    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    /// A field holds the wrong type or a value outside its vocabulary.
    ///
    /// ```
    /// # use colorscore::ScoreError;
    /// let err = ScoreError::InvalidField {
    ///     field: "parts[0].notes[2].pitch".to_string(),
    ///     value: "\"B\"".to_string(),
    ///     expected: "one of C, D, E, F, G, A, H",
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid value \"B\" for 'parts[0].notes[2].pitch' (expected one of C, D, E, F, G, A, H)"
    /// );
    /// ```
    #[error("Invalid value {value} for '{field}' (expected {expected})")]
    InvalidField {
        field: String,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid time signature {beats}/{beat_value}: both numbers must be positive")]
    InvalidTimeSignature { beats: i64, beat_value: i64 },

    #[error("Part {part_index} does not exist (score has {part_count} parts)")]
    PartOutOfRange { part_index: usize, part_count: usize },

    #[error("Note {note_index} does not exist in part {part_index} (part has {note_count} notes)")]
    NoteOutOfRange {
        part_index: usize,
        note_index: usize,
        note_count: usize,
    },

    #[error("No note is selected")]
    NoSelection,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}
