//! Editing state: the current score, the selection and undo history.
//!
//! Every mutating [`Action`] builds a new `Score` from the current one and
//! swaps it in; the previous snapshot goes onto the undo stack. Renderers
//! only ever see a complete snapshot.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::model::*;
use crate::parser::is_valid_tempo;

/// Maximum number of snapshots kept for undo.
pub const MAX_HISTORY: usize = 100;

/// One user edit or navigation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// Replace the score wholesale (file open); clears selection and history
    Load {
        #[serde(deserialize_with = "crate::parser::deserialize_score")]
        score: Score,
    },
    SetTitle { title: String },
    SetTempo { tempo: Option<f64> },
    SetRenderingMode { mode: RenderingMode },
    SetClef { clef: Clef },
    SetTimeSignature { time_signature: TimeSignature },
    AddPart { name: Option<String> },
    RemovePart { part_index: usize },
    RenamePart { part_index: usize, name: Option<String> },
    /// Insert after the selection, or append to the last part without one
    InsertAfterSelection { item: NoteOrRest },
    Append { part_index: usize, item: NoteOrRest },
    ReplaceSelected { item: NoteOrRest },
    DeleteSelected,
    Select { target: Option<NoteRef> },
    SelectNext,
    SelectPrevious,
    Undo,
    Redo,
}

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    score: Score,
    selection: Option<Selection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    score: Score,
    selection: Option<Selection>,
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Score::new())
    }
}

impl EditorState {
    pub fn new(score: Score) -> Self {
        Self {
            score,
            selection: None,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// The selected note or rest, if the selection points at one.
    pub fn selected_item(&self) -> Option<&NoteOrRest> {
        self.selection.and_then(|at| self.score.get(at))
    }

    pub fn apply(&mut self, action: Action) -> Result<(), ScoreError> {
        log::trace!("editor: {:?}", action);
        match action {
            Action::Load { score } => {
                check_tempo(score.tempo)?;
                check_time_signature(score.time_signature)?;
                self.score = score;
                self.selection = None;
                self.undo_stack.clear();
                self.redo_stack.clear();
                Ok(())
            }
            Action::SetTitle { title } => self.edit(|s| {
                s.title = title;
                Ok(())
            }),
            Action::SetTempo { tempo } => {
                check_tempo(tempo)?;
                self.edit(|s| {
                    s.tempo = tempo;
                    Ok(())
                })
            }
            Action::SetRenderingMode { mode } => self.edit(|s| {
                s.rendering_mode = mode;
                Ok(())
            }),
            Action::SetClef { clef } => self.edit(|s| {
                s.clef = clef;
                Ok(())
            }),
            Action::SetTimeSignature { time_signature } => {
                check_time_signature(time_signature)?;
                self.edit(|s| {
                    s.time_signature = time_signature;
                    Ok(())
                })
            }
            Action::AddPart { name } => self.edit(|s| {
                s.parts.push(Part::new(name));
                Ok(())
            }),
            Action::RemovePart { part_index } => self.remove_part(part_index),
            Action::RenamePart { part_index, name } => self.edit(|s| {
                part_mut(s, part_index)?.name = name;
                Ok(())
            }),
            Action::InsertAfterSelection { item } => self.insert_after_selection(item),
            Action::Append { part_index, item } => self.append(part_index, item),
            Action::ReplaceSelected { item } => {
                let at = self.require_selection()?;
                self.edit(|s| {
                    *note_mut(s, at)? = item;
                    Ok(())
                })
            }
            Action::DeleteSelected => self.delete_selected(),
            Action::Select { target } => {
                if let Some(at) = target {
                    self.check_target(at)?;
                }
                self.selection = target;
                Ok(())
            }
            Action::SelectNext => {
                self.selection = self.step_selection(true);
                Ok(())
            }
            Action::SelectPrevious => {
                self.selection = self.step_selection(false);
                Ok(())
            }
            Action::Undo => self.undo(),
            Action::Redo => self.redo(),
        }
    }

    // ── History ─────────────────────────────────────────────────────

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score.clone(),
            selection: self.selection,
        }
    }

    /// Build the next score from a copy of the current one and commit it.
    fn edit<F>(&mut self, f: F) -> Result<(), ScoreError>
    where
        F: FnOnce(&mut Score) -> Result<(), ScoreError>,
    {
        let mut next = self.score.clone();
        f(&mut next)?;
        self.commit(next, self.selection);
        Ok(())
    }

    fn commit(&mut self, score: Score, selection: Option<Selection>) {
        self.push_undo();
        self.redo_stack.clear();
        self.score = score;
        self.selection = selection;
    }

    fn push_undo(&mut self) {
        let previous = self.snapshot();
        self.undo_stack.push_back(previous);
        if self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.pop_front();
        }
    }

    fn undo(&mut self) -> Result<(), ScoreError> {
        let previous = self.undo_stack.pop_back().ok_or(ScoreError::NothingToUndo)?;
        let current = self.snapshot();
        self.redo_stack.push(current);
        self.score = previous.score;
        self.selection = previous.selection;
        Ok(())
    }

    fn redo(&mut self) -> Result<(), ScoreError> {
        let next = self.redo_stack.pop().ok_or(ScoreError::NothingToRedo)?;
        self.push_undo();
        self.score = next.score;
        self.selection = next.selection;
        Ok(())
    }

    // ── Note editing ────────────────────────────────────────────────

    fn insert_after_selection(&mut self, item: NoteOrRest) -> Result<(), ScoreError> {
        let Some(at) = self.selection else {
            let mut next = self.score.clone();
            if next.parts.is_empty() {
                next.parts.push(Part::new(None));
            }
            let part_index = next.parts.len() - 1;
            let notes = &mut next.parts[part_index].notes;
            notes.push(item);
            let inserted = NoteRef { part_index, note_index: notes.len() - 1 };
            self.commit(next, Some(inserted));
            return Ok(());
        };
        self.check_target(at)?;

        let mut next = self.score.clone();
        let inserted = NoteRef { part_index: at.part_index, note_index: at.note_index + 1 };
        part_mut(&mut next, at.part_index)?.notes.insert(inserted.note_index, item);
        self.commit(next, Some(inserted));
        Ok(())
    }

    fn append(&mut self, part_index: usize, item: NoteOrRest) -> Result<(), ScoreError> {
        let mut next = self.score.clone();
        let notes = &mut part_mut(&mut next, part_index)?.notes;
        notes.push(item);
        let appended = NoteRef { part_index, note_index: notes.len() - 1 };
        self.commit(next, Some(appended));
        Ok(())
    }

    fn delete_selected(&mut self) -> Result<(), ScoreError> {
        let at = self.require_selection()?;
        self.check_target(at)?;

        let mut next = self.score.clone();
        let notes = &mut part_mut(&mut next, at.part_index)?.notes;
        notes.remove(at.note_index);
        // Following notes shift left; keep the cursor in place or on the new last note.
        let selection = match notes.len() {
            0 => None,
            len => Some(NoteRef {
                part_index: at.part_index,
                note_index: at.note_index.min(len - 1),
            }),
        };
        self.commit(next, selection);
        Ok(())
    }

    fn remove_part(&mut self, part_index: usize) -> Result<(), ScoreError> {
        let mut next = self.score.clone();
        if part_index >= next.parts.len() {
            return Err(ScoreError::PartOutOfRange {
                part_index,
                part_count: next.parts.len(),
            });
        }
        next.parts.remove(part_index);
        let selection = self.selection.and_then(|at| match at.part_index {
            p if p == part_index => None,
            p if p > part_index => Some(NoteRef { part_index: p - 1, ..at }),
            _ => Some(at),
        });
        self.commit(next, selection);
        Ok(())
    }

    // ── Selection ───────────────────────────────────────────────────

    fn require_selection(&self) -> Result<NoteRef, ScoreError> {
        self.selection.ok_or(ScoreError::NoSelection)
    }

    fn check_target(&self, at: NoteRef) -> Result<(), ScoreError> {
        let part = self.score.parts.get(at.part_index).ok_or(ScoreError::PartOutOfRange {
            part_index: at.part_index,
            part_count: self.score.parts.len(),
        })?;
        if at.note_index >= part.notes.len() {
            return Err(ScoreError::NoteOutOfRange {
                part_index: at.part_index,
                note_index: at.note_index,
                note_count: part.notes.len(),
            });
        }
        Ok(())
    }

    /// Move through the concatenated note stream, stopping at either end.
    fn step_selection(&self, forward: bool) -> Option<NoteRef> {
        let order: Vec<NoteRef> = self.score.entries().map(|(at, _)| at).collect();
        let current = self.selection.and_then(|s| order.iter().position(|&at| at == s));
        let index = match (current, forward) {
            (None, true) => 0,
            (None, false) => order.len().checked_sub(1)?,
            (Some(i), true) => (i + 1).min(order.len() - 1),
            (Some(i), false) => i.saturating_sub(1),
        };
        order.get(index).copied()
    }
}

fn check_tempo(tempo: Option<f64>) -> Result<(), ScoreError> {
    match tempo {
        Some(bpm) if !is_valid_tempo(bpm) => Err(ScoreError::InvalidField {
            field: "tempo".to_string(),
            value: format!("{bpm:?}"),
            expected: "a positive number",
        }),
        _ => Ok(()),
    }
}

fn check_time_signature(time_signature: TimeSignature) -> Result<(), ScoreError> {
    if time_signature.beats == 0 || time_signature.beat_value == 0 {
        return Err(ScoreError::InvalidTimeSignature {
            beats: time_signature.beats.into(),
            beat_value: time_signature.beat_value.into(),
        });
    }
    Ok(())
}

fn part_mut(score: &mut Score, part_index: usize) -> Result<&mut Part, ScoreError> {
    let part_count = score.parts.len();
    score
        .parts
        .get_mut(part_index)
        .ok_or(ScoreError::PartOutOfRange { part_index, part_count })
}

fn note_mut(score: &mut Score, at: NoteRef) -> Result<&mut NoteOrRest, ScoreError> {
    let part = part_mut(score, at.part_index)?;
    let note_count = part.notes.len();
    part.notes.get_mut(at.note_index).ok_or(ScoreError::NoteOutOfRange {
        part_index: at.part_index,
        note_index: at.note_index,
        note_count,
    })
}
