//! Staff, clef, time signature and barline rendering.

use crate::layout::{StaffLayout, StaffSystem};
use crate::model::*;
use super::constants::*;
use super::glyphs::*;
use super::scene::{Role, Scene, Style, TextAnchor};

/// Size factor of a layout relative to the default line spacing.
pub(super) fn size_factor(layout: &StaffLayout) -> f64 {
    layout.line_spacing / REFERENCE_LINE_SPACING
}

// ═══════════════════════════════════════════════════════════════════════
// Staff rendering
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn render_staff_lines(scene: &mut Scene, layout: &StaffLayout, system: &StaffSystem) {
    for i in 0..5 {
        let y = system.y + i as f64 * layout.line_spacing;
        scene.line(Role::StaffLine, system.x, y, system.x_end, y, STAFF_COLOR, STAFF_LINE_WIDTH);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Clef rendering
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn render_clef(scene: &mut Scene, layout: &StaffLayout, system: &StaffSystem) {
    let size = size_factor(layout);
    let x = system.x + CLEF_OFFSET_X * size;
    match layout.clef {
        Clef::Treble => {
            let g_line = system.y + 3.0 * layout.line_spacing;
            let transform = treble_clef_transform(x, g_line, size);
            for d in TREBLE_CLEF_PATHS {
                scene
                    .path(Role::Clef, d.to_string(), Style::fill(NOTE_COLOR))
                    .transformed(transform.clone());
            }
        }
        Clef::Bass => {
            let f_line = system.y + layout.line_spacing;
            let transform = bass_clef_transform(x, f_line, size);
            for d in BASS_CLEF_PATHS {
                scene
                    .path(Role::Clef, d.to_string(), Style::fill(NOTE_COLOR))
                    .transformed(transform.clone());
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Time signature rendering
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn render_time_signature(scene: &mut Scene, layout: &StaffLayout, system: &StaffSystem) {
    let size = size_factor(layout);
    let x = system.x + TIME_SIG_OFFSET_X * size;
    let font_size = TIME_SIG_FONT_SIZE * size;
    // Numerals fill the upper and lower halves of the staff; baselines sit
    // slightly above the middle and bottom lines.
    let top_y = system.y + 2.0 * layout.line_spacing - 1.5 * size;
    let bot_y = system.y + 4.0 * layout.line_spacing - 1.5 * size;
    let ts = layout.time_signature;

    scene.text(
        Role::TimeSignature, x, top_y, &ts.beats.to_string(),
        font_size, true, TextAnchor::Middle, NOTE_COLOR,
    );
    scene.text(
        Role::TimeSignature, x, bot_y, &ts.beat_value.to_string(),
        font_size, true, TextAnchor::Middle, NOTE_COLOR,
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Barline rendering
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn render_barlines(scene: &mut Scene, layout: &StaffLayout, system: &StaffSystem) {
    let bottom = system.y + layout.staff_height();
    for &bx in &system.bar_lines {
        scene.line(Role::BarLine, bx, system.y, bx, bottom, BARLINE_COLOR, BARLINE_WIDTH);
    }
}
