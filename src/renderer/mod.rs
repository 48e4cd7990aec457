//! Score renderer — converts a Score into a drawable [`Scene`].
//!
//! Both notations run their layout engine first and then map every layout
//! element to primitives. Rendering is a pure function of the score, the
//! selection and the canvas width; the scene can be serialized to a
//! self-contained SVG string that any SVG-capable view can display.

mod circles;
mod constants;
mod glyphs;
mod header;
mod lyrics;
mod notes;
pub mod scene;
mod staff;
mod svg_builder;

use crate::layout::*;
use crate::model::*;
use constants::*;
use scene::{Role, Scene, Style};

pub(crate) use header::render_header;

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Render a score as staff notation.
///
/// `width` sets the canvas width in user units; `None` uses the default
/// (800). A selection that does not point at an existing note or rest is
/// ignored.
pub fn render_staff(score: &Score, selection: Option<Selection>, width: Option<f64>) -> Scene {
    let layout = compute_staff_layout(score, &StaffLayoutConfig::with_width(width));
    render_staff_layout(&layout, selection)
}

/// Render a score as color circles.
pub fn render_circles(score: &Score, selection: Option<Selection>, width: Option<f64>) -> Scene {
    let layout = compute_circles_layout(score, &CirclesLayoutConfig::with_width(width));
    render_circles_layout(&layout, selection)
}

/// Render a score in its own rendering mode.
pub fn render_score(score: &Score, selection: Option<Selection>, width: Option<f64>) -> Scene {
    match score.rendering_mode {
        RenderingMode::Staff => render_staff(score, selection, width),
        RenderingMode::Circles => render_circles(score, selection, width),
    }
}

/// Render a score in its own rendering mode into a complete SVG string.
pub fn render_score_to_svg(score: &Score, width: Option<f64>) -> String {
    render_score(score, None, width).to_svg()
}

// ═══════════════════════════════════════════════════════════════════════
// Staff notation
// ═══════════════════════════════════════════════════════════════════════

/// Render an already computed staff layout.
pub fn render_staff_layout(layout: &StaffLayout, selection: Option<Selection>) -> Scene {
    // Lyrics may hang below the layout's nominal height on crowded systems.
    let lyrics_bottom = layout
        .systems
        .iter()
        .filter(|s| s.notes.iter().any(|n| n.lyric.is_some()))
        .map(|s| lyrics::lyrics_baseline(layout, s) + LYRICS_PAD_BELOW)
        .fold(0.0_f64, f64::max);
    let height = layout.height.max(lyrics_bottom);

    let mut scene = Scene::new(layout.width, height);
    scene.rect(Role::Background, 0.0, 0.0, layout.width, height, Style::fill(BACKGROUND_COLOR));

    for system in &layout.systems {
        staff::render_staff_lines(&mut scene, layout, system);
        staff::render_clef(&mut scene, layout, system);
        if system.index == 0 {
            staff::render_time_signature(&mut scene, layout, system);
        }
        staff::render_barlines(&mut scene, layout, system);

        let baseline = lyrics::lyrics_baseline(layout, system);
        for note in &system.notes {
            let selected = selection == Some(note.target);
            notes::render_note(&mut scene, layout, system, note, selected);
            if let Some(lyric) = note.lyric.as_deref() {
                lyrics::render_lyric(&mut scene, note.x, baseline, lyric, note.target);
            }
        }
    }

    log::trace!("staff scene: {} elements", scene.elements.len());
    scene
}

// ═══════════════════════════════════════════════════════════════════════
// Circle notation
// ═══════════════════════════════════════════════════════════════════════

/// Render an already computed circle layout.
pub fn render_circles_layout(layout: &CirclesLayout, selection: Option<Selection>) -> Scene {
    let mut scene = Scene::new(layout.width, layout.height);
    scene.rect(Role::Background, 0.0, 0.0, layout.width, layout.height, Style::fill(BACKGROUND_COLOR));

    for row in &layout.rows {
        for entry in &row.circles {
            let selected = selection == Some(entry.target);
            circles::render_entry(&mut scene, layout, entry, selected);
        }
    }

    log::trace!("circle scene: {} elements", scene.elements.len());
    scene
}
