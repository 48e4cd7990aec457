//! Lyrics rendering for both notations.

use crate::layout::{StaffLayout, StaffSystem};
use crate::model::NoteRef;
use super::constants::*;
use super::scene::{Role, Scene, TextAnchor};
use super::notes::stem_length;
use super::staff::size_factor;

/// Compute the lowest y-coordinate of rendered notes and stems in a system.
pub(super) fn system_lowest_note_y(layout: &StaffLayout, system: &StaffSystem) -> f64 {
    let size = size_factor(layout);
    let mut lowest = system.y + layout.staff_height();
    for note in system.notes.iter().filter(|n| !n.is_rest) {
        let bottom = note.y + NOTEHEAD_RY * size;
        if bottom > lowest {
            lowest = bottom;
        }
        let stem_down = note.octave.map_or(false, |o| o != crate::model::Octave::Lower);
        if stem_down && note.duration.has_stem() {
            let stem_bottom = note.y + stem_length(note.duration, size);
            if stem_bottom > lowest {
                lowest = stem_bottom;
            }
        }
    }
    lowest
}

/// Baseline shared by every lyric of a system, clear of the lowest note.
pub(super) fn lyrics_baseline(layout: &StaffLayout, system: &StaffSystem) -> f64 {
    let below_staff = system.y + layout.staff_height() + LYRICS_MIN_Y_BELOW_STAFF;
    below_staff.max(system_lowest_note_y(layout, system) + LYRICS_PAD_BELOW)
}

pub(super) fn render_lyric(scene: &mut Scene, x: f64, y: f64, text: &str, target: NoteRef) {
    if text.is_empty() {
        return;
    }
    scene
        .text(Role::Lyric, x, y, text, LYRICS_FONT_SIZE, false, TextAnchor::Middle, LYRICS_COLOR)
        .for_note(target);
}
