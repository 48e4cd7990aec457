//! Circle layout: turns the note stream into rows of colored circles.
//!
//! Circle size encodes duration. Whole and half notes reserve proportionally
//! wider footprints; quarters, eighths and sixteenths all take a single
//! spacing unit, eighths and sixteenths being drawn as clusters of smaller
//! sub-circles inside it.

use serde::Serialize;

use crate::model::*;

/// Space below the last row's lyric line.
pub const CIRCLES_BOTTOM_PADDING: f64 = 30.0;

const WHOLE_SCALE: f64 = 1.8;
const HALF_SCALE: f64 = 1.4;
const EIGHTH_SCALE: f64 = 0.6;
const SIXTEENTH_SCALE: f64 = 0.4;
/// Gap between neighboring sub-circles, relative to the base radius.
const SUB_GAP_SCALE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct CirclesLayoutConfig {
    /// Canvas width
    pub width: f64,
    /// Diameter of a quarter-note circle
    pub size: f64,
    /// Width of one footprint unit
    pub spacing: f64,
    /// Left margin; the right margin mirrors it
    pub margin_left: f64,
    pub margin_top: f64,
    pub row_spacing: f64,
    /// Distance from a circle's bottom edge to its lyric baseline
    pub lyric_offset: f64,
}

impl Default for CirclesLayoutConfig {
    fn default() -> Self {
        Self {
            width: super::DEFAULT_WIDTH,
            size: 40.0,
            spacing: 50.0,
            margin_left: 20.0,
            margin_top: 30.0,
            row_spacing: 80.0,
            lyric_offset: 16.0,
        }
    }
}

impl CirclesLayoutConfig {
    pub fn with_width(width: Option<f64>) -> Self {
        Self {
            width: super::resolve_width(width),
            ..Self::default()
        }
    }

    pub fn base_radius(&self) -> f64 {
        self.size / 2.0
    }
}

/// One circle of an eighth or sixteenth cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCircle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub octave: Option<Octave>,
    pub lyric: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleEntry {
    pub target: NoteRef,
    pub cx: f64,
    pub cy: f64,
    /// Circle radius; for clusters, the radius of the bounding circle.
    /// Zero for rests.
    pub radius: f64,
    pub sub_circles: Option<Vec<SubCircle>>,
    /// Horizontal space reserved for this entry
    pub footprint: f64,
    pub duration: Duration,
    pub pitch: Option<Pitch>,
    pub octave: Option<Octave>,
    pub accented: bool,
    pub lyric: Option<String>,
    pub is_rest: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleRow {
    pub index: usize,
    /// Center line of the row
    pub y: f64,
    pub circles: Vec<CircleEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CirclesLayout {
    pub rows: Vec<CircleRow>,
    pub width: f64,
    pub height: f64,
    pub base_radius: f64,
    pub lyric_offset: f64,
}

impl CirclesLayout {
    pub fn circle_count(&self) -> usize {
        self.rows.iter().map(|r| r.circles.len()).sum()
    }

    pub fn find(&self, target: NoteRef) -> Option<&CircleEntry> {
        self.rows
            .iter()
            .flat_map(|r| r.circles.iter())
            .find(|c| c.target == target)
    }
}

/// Footprint of a duration, in spacing units.
pub fn footprint_units(duration: Duration) -> f64 {
    match duration {
        Duration::Whole => 4.0,
        Duration::Half => 2.0,
        Duration::Quarter | Duration::Eighth | Duration::Sixteenth => 1.0,
    }
}

/// Sub-circle centers (relative to the entry center) and their radius, or
/// `None` for durations drawn as a single circle.
fn cluster_offsets(duration: Duration, r: f64) -> Option<(Vec<(f64, f64)>, f64)> {
    let gap = r * SUB_GAP_SCALE;
    match duration {
        Duration::Eighth => {
            let sub = r * EIGHTH_SCALE;
            let d = sub + gap / 2.0;
            Some((vec![(-d, 0.0), (d, 0.0)], sub))
        }
        Duration::Sixteenth => {
            let sub = r * SIXTEENTH_SCALE;
            let d = sub + gap / 2.0;
            Some((vec![(-d, -d), (d, -d), (-d, d), (d, d)], sub))
        }
        Duration::Whole | Duration::Half | Duration::Quarter => None,
    }
}

fn single_radius(duration: Duration, r: f64) -> f64 {
    match duration {
        Duration::Whole => r * WHOLE_SCALE,
        Duration::Half => r * HALF_SCALE,
        _ => r,
    }
}

/// Place one note at `(cx, cy)`.
fn place_note(target: NoteRef, note: &Note, cx: f64, cy: f64, footprint: f64, r: f64) -> CircleEntry {
    let (radius, sub_circles) = match cluster_offsets(note.duration, r) {
        Some((offsets, sub_r)) => {
            let bound = offsets
                .iter()
                .map(|(dx, dy)| (dx * dx + dy * dy).sqrt() + sub_r)
                .fold(0.0_f64, f64::max);
            let subs = offsets
                .into_iter()
                .map(|(dx, dy)| SubCircle {
                    cx: cx + dx,
                    cy: cy + dy,
                    radius: sub_r,
                    octave: Some(note.octave),
                    lyric: note.lyric.clone(),
                })
                .collect();
            (bound, Some(subs))
        }
        None => (single_radius(note.duration, r), None),
    };

    CircleEntry {
        target,
        cx,
        cy,
        radius,
        sub_circles,
        footprint,
        duration: note.duration,
        pitch: Some(note.pitch),
        octave: Some(note.octave),
        accented: note.is_accented(),
        lyric: note.lyric.clone(),
        is_rest: false,
    }
}

/// Outer radius an item will occupy, used for the wrap decision.
fn extent_radius(item: &NoteOrRest, r: f64) -> f64 {
    match item {
        NoteOrRest::Rest(_) => 0.0,
        NoteOrRest::Note(n) => match cluster_offsets(n.duration, r) {
            Some((offsets, sub_r)) => offsets
                .iter()
                .map(|(dx, _)| dx.abs() + sub_r)
                .fold(0.0_f64, f64::max),
            None => single_radius(n.duration, r),
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Main layout computation
// ═══════════════════════════════════════════════════════════════════════

pub fn compute_circles_layout(score: &Score, config: &CirclesLayoutConfig) -> CirclesLayout {
    let r = config.base_radius();
    let right_limit = config.width - config.margin_left;
    let first_y = config.margin_top + r;

    let mut rows: Vec<CircleRow> = Vec::new();
    let mut current = CircleRow { index: 0, y: first_y, circles: Vec::new() };
    let mut x = config.margin_left;

    for (target, item) in score.entries() {
        let footprint = footprint_units(item.duration()) * config.spacing;
        let extent = x + footprint / 2.0 + extent_radius(item, r);

        if extent > right_limit && !current.circles.is_empty() {
            let index = rows.len() + 1;
            let next_y = current.y + config.row_spacing;
            log::trace!("circle layout: row {index} starts at {:?}", target);
            rows.push(std::mem::replace(
                &mut current,
                CircleRow { index, y: next_y, circles: Vec::new() },
            ));
            x = config.margin_left;
        }

        let cx = x + footprint / 2.0;
        let cy = current.y;
        let entry = match item {
            NoteOrRest::Note(note) => place_note(target, note, cx, cy, footprint, r),
            NoteOrRest::Rest(rest) => CircleEntry {
                target,
                cx,
                cy,
                radius: 0.0,
                sub_circles: None,
                footprint,
                duration: rest.duration,
                pitch: None,
                octave: None,
                accented: false,
                lyric: None,
                is_rest: true,
            },
        };
        current.circles.push(entry);
        x += footprint;
    }
    rows.push(current);

    let last_y = rows.last().map_or(first_y, |row| row.y);
    let layout = CirclesLayout {
        rows,
        width: config.width,
        height: last_y + r + config.lyric_offset + CIRCLES_BOTTOM_PADDING,
        base_radius: r,
        lyric_offset: config.lyric_offset,
    };
    log::debug!(
        "circle layout: {} circles in {} rows",
        layout.circle_count(),
        layout.rows.len()
    );
    layout
}
