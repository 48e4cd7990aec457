//! Color-circle notation: one colored disc (or cluster of discs) per note.

use crate::colors::{accented_colors, color_of, outline_of};
use crate::layout::{CircleEntry, CirclesLayout};
use crate::model::{NoteRef, Octave, Pitch};
use super::constants::*;
use super::lyrics::render_lyric;
use super::scene::{Role, Scene, Style};

pub(super) fn render_entry(scene: &mut Scene, layout: &CirclesLayout, entry: &CircleEntry, selected: bool) {
    render_hit_area(scene, layout, entry);

    if let (false, Some(pitch)) = (entry.is_rest, entry.pitch) {
        match &entry.sub_circles {
            Some(subs) => {
                for sub in subs {
                    render_disc(scene, entry.target, sub.cx, sub.cy, sub.radius, pitch, entry.accented);
                    render_octave_dot(scene, entry.target, sub.cx, sub.cy, sub.radius, sub.octave);
                }
            }
            None => {
                render_disc(scene, entry.target, entry.cx, entry.cy, entry.radius, pitch, entry.accented);
                render_octave_dot(scene, entry.target, entry.cx, entry.cy, entry.radius, entry.octave);
            }
        }
    }

    if selected {
        // Rests have no disc, so the ring falls back to the base size.
        let radius = if entry.is_rest { layout.base_radius } else { entry.radius };
        scene
            .circle(
                Role::Selection,
                entry.cx,
                entry.cy,
                radius + SELECTION_RING_GAP,
                Style::stroke(SELECTION_COLOR, SELECTION_RING_WIDTH),
            )
            .for_note(entry.target);
    }

    if let Some(lyric) = entry.lyric.as_deref() {
        let y = entry.cy + entry.radius + layout.lyric_offset;
        render_lyric(scene, entry.cx, y, lyric, entry.target);
    }
}

/// Invisible square over the entry's horizontal footprint.
fn render_hit_area(scene: &mut Scene, layout: &CirclesLayout, entry: &CircleEntry) {
    let half_h = entry.radius.max(layout.base_radius);
    scene
        .rect(
            Role::HitArea,
            entry.cx - entry.footprint / 2.0,
            entry.cy - half_h,
            entry.footprint,
            2.0 * half_h,
            Style::fill(HIT_FILL),
        )
        .for_note(entry.target);
}

fn render_disc(scene: &mut Scene, target: NoteRef, cx: f64, cy: f64, r: f64, pitch: Pitch, accented: bool) {
    let outline = outline_of(pitch);
    if accented {
        let split = accented_colors(pitch);
        let (top, bottom) = (cy - r, cy + r);
        let left = format!("M{cx:.1},{top:.1} A{r:.1},{r:.1} 0 0 0 {cx:.1},{bottom:.1} Z");
        let right = format!("M{cx:.1},{top:.1} A{r:.1},{r:.1} 0 0 1 {cx:.1},{bottom:.1} Z");
        scene.path(Role::Circle, left, Style::fill(split.left)).for_note(target);
        scene.path(Role::Circle, right, Style::fill(split.right)).for_note(target);
        scene
            .circle(Role::Circle, cx, cy, r, Style::stroke(outline, CIRCLE_STROKE_WIDTH))
            .for_note(target);
    } else {
        scene
            .circle(Role::Circle, cx, cy, r, Style::fill_and_stroke(color_of(pitch), outline, CIRCLE_STROKE_WIDTH))
            .for_note(target);
    }
}

fn render_octave_dot(scene: &mut Scene, target: NoteRef, cx: f64, cy: f64, r: f64, octave: Option<Octave>) {
    let color = match octave {
        Some(Octave::Lower) => LOWER_OCTAVE_DOT,
        Some(Octave::Upper) => UPPER_OCTAVE_DOT,
        Some(Octave::Middle) | None => return,
    };
    let dot = (r * OCTAVE_DOT_SCALE).max(OCTAVE_DOT_MIN_RADIUS);
    scene.circle(Role::OctaveDot, cx, cy, dot, Style::fill(color)).for_note(target);
}
