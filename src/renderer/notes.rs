//! Note, rest, stem, flag and ledger line rendering for staff notation.

use crate::colors::{accented_colors, color_of};
use crate::layout::position::{ledger_positions, REST_POSITION};
use crate::layout::{NoteLayout, StaffLayout, StaffSystem};
use crate::model::*;
use super::constants::*;
use super::glyphs::*;
use super::scene::{Role, Scene, Style};
use super::staff::size_factor;

pub(super) fn render_note(
    scene: &mut Scene,
    layout: &StaffLayout,
    system: &StaffSystem,
    note: &NoteLayout,
    selected: bool,
) {
    let size = size_factor(layout);
    render_hit_area(scene, layout, system, note, size);

    if note.is_rest {
        render_rest(scene, layout, system, note, size);
        if selected {
            let mid_y = layout.position_y(system, REST_POSITION);
            let (w, h) = (16.0 * size, 30.0 * size);
            scene
                .rect(
                    Role::Selection,
                    note.x - w / 2.0 - SELECTION_PAD,
                    mid_y - h / 2.0 - SELECTION_PAD,
                    w + 2.0 * SELECTION_PAD,
                    h + 2.0 * SELECTION_PAD,
                    Style::stroke(SELECTION_COLOR, 1.5).dashed("3,2"),
                )
                .for_note(note.target);
        }
        return;
    }

    let (Some(pitch), Some(octave)) = (note.pitch, note.octave) else {
        return;
    };

    render_ledger_lines(scene, layout, system, note, size);
    render_notehead(scene, note, pitch, size);

    if note.duration.has_stem() {
        // Low register stems point up, everything else down.
        let stem_up = octave == Octave::Lower;
        let rx = NOTEHEAD_RX * size;
        let stem_len = stem_length(note.duration, size);
        let (sx, tip_y) = if stem_up {
            (note.x + rx - 0.6, note.y - stem_len)
        } else {
            (note.x - rx + 0.6, note.y + stem_len)
        };
        scene
            .line(Role::Stem, sx, note.y, sx, tip_y, NOTE_COLOR, STEM_WIDTH)
            .for_note(note.target);
        render_flags(scene, note, sx, tip_y, stem_up, size);
    }

    if selected {
        let rx = NOTEHEAD_RX * size + SELECTION_PAD;
        let ry = NOTEHEAD_RY * size + SELECTION_PAD;
        scene
            .rect(
                Role::Selection,
                note.x - rx,
                note.y - ry,
                2.0 * rx,
                2.0 * ry,
                Style::stroke(SELECTION_COLOR, 1.5).dashed("3,2"),
            )
            .for_note(note.target);
    }
}

/// Invisible rectangle spanning the note's column from the staff to the notehead.
fn render_hit_area(scene: &mut Scene, layout: &StaffLayout, system: &StaffSystem, note: &NoteLayout, size: f64) {
    let half = HIT_HALF_WIDTH * size;
    let top = note.y.min(system.y) - half;
    let bottom = note.y.max(system.y + layout.staff_height()) + half;
    scene
        .rect(Role::HitArea, note.x - half, top, 2.0 * half, bottom - top, Style::fill(HIT_FILL))
        .for_note(note.target);
}

// ── Noteheads ───────────────────────────────────────────────────────

fn tilt(x: f64, y: f64) -> String {
    format!("rotate({:.0},{:.1},{:.1})", NOTEHEAD_TILT, x, y)
}

fn render_notehead(scene: &mut Scene, note: &NoteLayout, pitch: Pitch, size: f64) {
    let rx = NOTEHEAD_RX * size;
    let ry = NOTEHEAD_RY * size;
    let color = color_of(pitch);

    if note.accented {
        let split = accented_colors(pitch);
        let left = format!(
            "M{:.1},{:.1} A{:.1},{:.1} 0 0 0 {:.1},{:.1} Z",
            note.x, note.y - ry, rx, ry, note.x, note.y + ry
        );
        let right = format!(
            "M{:.1},{:.1} A{:.1},{:.1} 0 0 1 {:.1},{:.1} Z",
            note.x, note.y - ry, rx, ry, note.x, note.y + ry
        );
        scene
            .path(Role::Notehead, left, Style::fill(split.left))
            .for_note(note.target)
            .transformed(tilt(note.x, note.y));
        scene
            .path(Role::Notehead, right, Style::fill(split.right))
            .for_note(note.target)
            .transformed(tilt(note.x, note.y));
        scene
            .ellipse(Role::Notehead, note.x, note.y, rx, ry, Style::stroke(NOTE_COLOR, SPLIT_OUTLINE_STROKE))
            .for_note(note.target)
            .transformed(tilt(note.x, note.y));
        return;
    }

    if note.duration.is_filled() {
        scene
            .ellipse(Role::Notehead, note.x, note.y, rx, ry, Style::fill(color))
            .for_note(note.target)
            .transformed(tilt(note.x, note.y));
    } else {
        let sw = HOLLOW_NOTEHEAD_STROKE;
        scene
            .ellipse(
                Role::Notehead,
                note.x,
                note.y,
                rx - sw / 2.0,
                ry - sw / 2.0,
                Style::fill_and_stroke(HOLLOW_FILL, color, sw),
            )
            .for_note(note.target)
            .transformed(tilt(note.x, note.y));
    }
}

// ── Flags ───────────────────────────────────────────────────────────

/// Stem length from notehead center to tip. Flags curl back towards the
/// notehead, so the tip is also the far edge of any flag.
pub(super) fn stem_length(duration: Duration, size: f64) -> f64 {
    let extra = if duration == Duration::Sixteenth { SIXTEENTH_STEM_EXTRA } else { 0.0 };
    (STEM_LENGTH + extra) * size
}

fn render_flags(scene: &mut Scene, note: &NoteLayout, stem_x: f64, tip_y: f64, stem_up: bool, size: f64) {
    for i in 0..note.duration.flag_count() {
        // Later flags step back along the stem towards the notehead.
        let offset = i as f64 * FLAG_GAP * size;
        let y = if stem_up { tip_y + offset } else { tip_y - offset };
        scene
            .path(Role::Flag, flag_path(stem_x, y, stem_up, size), Style::fill(NOTE_COLOR))
            .for_note(note.target);
    }
}

// ── Ledger lines ────────────────────────────────────────────────────

fn render_ledger_lines(scene: &mut Scene, layout: &StaffLayout, system: &StaffSystem, note: &NoteLayout, size: f64) {
    let half = NOTEHEAD_RX * size + LEDGER_LINE_EXTEND;
    for position in ledger_positions(note.position) {
        let y = layout.position_y(system, position);
        scene
            .line(Role::LedgerLine, note.x - half, y, note.x + half, y, STAFF_COLOR, LEDGER_LINE_WIDTH)
            .for_note(note.target);
    }
}

// ── Rest rendering ──────────────────────────────────────────────────

fn render_rest(scene: &mut Scene, layout: &StaffLayout, system: &StaffSystem, note: &NoteLayout, size: f64) {
    let x = note.x;
    let mid_y = layout.position_y(system, REST_POSITION);
    let block_w = 12.0 * size;
    let block_h = layout.line_spacing / 2.0;

    match note.duration {
        Duration::Whole => {
            // Hangs from the fourth line.
            let line_y = layout.position_y(system, 6);
            scene
                .rect(Role::Rest, x - block_w / 2.0, line_y, block_w, block_h, Style::fill(REST_COLOR))
                .for_note(note.target);
        }
        Duration::Half => {
            // Sits on the middle line.
            scene
                .rect(Role::Rest, x - block_w / 2.0, mid_y - block_h, block_w, block_h, Style::fill(REST_COLOR))
                .for_note(note.target);
        }
        Duration::Quarter => {
            scene
                .path(Role::Rest, quarter_rest_path(x, mid_y, size), Style::fill(REST_COLOR))
                .for_note(note.target);
        }
        Duration::Eighth | Duration::Sixteenth => {
            let hooks = note.duration.flag_count();
            scene
                .path(Role::Rest, hooked_rest_stem_path(x, mid_y, hooks, size), Style::stroke(REST_COLOR, 1.5))
                .for_note(note.target);
            for (cx, cy) in hooked_rest_dots(x, mid_y, hooks, size) {
                scene
                    .circle(Role::Rest, cx, cy, 2.2 * size, Style::fill(REST_COLOR))
                    .for_note(note.target);
            }
        }
    }
}
