//! Staff layout: places notes on five-line systems and decides where bar
//! lines and system breaks fall.
//!
//! Horizontal spacing is a fixed step per note regardless of duration;
//! durations only drive the beat counter that inserts bar lines.

use serde::Serialize;

use super::position::{staff_position, REST_POSITION};
use crate::model::*;

/// Left end of the staff lines; the clef and time signature sit between
/// here and `margin_left`.
pub const STAFF_INSET: f64 = 10.0;
/// Room below the last system for lyrics.
pub const STAFF_BOTTOM_PADDING: f64 = 60.0;

const BEAT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct StaffLayoutConfig {
    /// Canvas width
    pub width: f64,
    /// Distance between two staff lines
    pub spacing: f64,
    /// Horizontal advance per note or rest
    pub note_spacing: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    /// Vertical gap between the bottom of one system and the top of the next
    pub system_spacing: f64,
}

impl Default for StaffLayoutConfig {
    fn default() -> Self {
        Self {
            width: super::DEFAULT_WIDTH,
            spacing: 10.0,
            note_spacing: 30.0,
            margin_left: 60.0,
            margin_right: 20.0,
            margin_top: 40.0,
            system_spacing: 80.0,
        }
    }
}

impl StaffLayoutConfig {
    pub fn with_width(width: Option<f64>) -> Self {
        Self {
            width: super::resolve_width(width),
            ..Self::default()
        }
    }

    pub fn staff_height(&self) -> f64 {
        self.spacing * 4.0
    }
}

/// One placed note or rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteLayout {
    pub target: NoteRef,
    /// Horizontal center of the notehead or rest glyph
    pub x: f64,
    /// Vertical center, in canvas coordinates
    pub y: f64,
    /// Half line-gaps above the bottom staff line
    pub position: i32,
    pub duration: Duration,
    pub pitch: Option<Pitch>,
    pub octave: Option<Octave>,
    pub accented: bool,
    pub lyric: Option<String>,
    pub is_rest: bool,
}

/// One row of staff notation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffSystem {
    pub index: usize,
    /// Left end of the staff lines
    pub x: f64,
    /// Y of the top staff line
    pub y: f64,
    /// Right end of the staff lines
    pub x_end: f64,
    pub notes: Vec<NoteLayout>,
    pub bar_lines: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffLayout {
    pub systems: Vec<StaffSystem>,
    pub width: f64,
    pub height: f64,
    pub line_spacing: f64,
    pub clef: Clef,
    pub time_signature: TimeSignature,
}

impl StaffSystem {
    fn new(index: usize, y: f64, x_end: f64) -> Self {
        Self {
            index,
            x: STAFF_INSET,
            y,
            x_end,
            notes: Vec::new(),
            bar_lines: Vec::new(),
        }
    }
}

impl StaffLayout {
    pub fn staff_height(&self) -> f64 {
        self.line_spacing * 4.0
    }

    /// Canvas y of a staff position within a system.
    pub fn position_y(&self, system: &StaffSystem, position: i32) -> f64 {
        system.y + self.staff_height() - position as f64 * self.line_spacing / 2.0
    }

    pub fn note_count(&self) -> usize {
        self.systems.iter().map(|s| s.notes.len()).sum()
    }

    pub fn bar_line_count(&self) -> usize {
        self.systems.iter().map(|s| s.bar_lines.len()).sum()
    }

    pub fn find(&self, target: NoteRef) -> Option<(&StaffSystem, &NoteLayout)> {
        self.systems.iter().find_map(|system| {
            system
                .notes
                .iter()
                .find(|n| n.target == target)
                .map(|n| (system, n))
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Main layout computation
// ═══════════════════════════════════════════════════════════════════════

pub fn compute_staff_layout(score: &Score, config: &StaffLayoutConfig) -> StaffLayout {
    let staff_height = config.staff_height();
    let right_limit = (config.width - config.margin_right).max(config.margin_left + config.note_spacing);
    let measure_beats = score.time_signature.measure_beats();

    let mut systems: Vec<StaffSystem> = Vec::new();
    let mut current = StaffSystem::new(0, config.margin_top, right_limit);
    let mut x = config.margin_left;
    let mut beats = 0.0;

    for (target, item) in score.entries() {
        if x + config.note_spacing > right_limit && !current.notes.is_empty() {
            let index = systems.len() + 1;
            let next_y = current.y + staff_height + config.system_spacing;
            log::trace!("staff layout: system {index} starts at {:?}", target);
            systems.push(std::mem::replace(
                &mut current,
                StaffSystem::new(index, next_y, right_limit),
            ));
            x = config.margin_left;
        }

        let position = match item {
            NoteOrRest::Note(n) => staff_position(n.pitch, n.octave, score.clef),
            NoteOrRest::Rest(_) => REST_POSITION,
        };
        let note = item.as_note();

        current.notes.push(NoteLayout {
            target,
            x: x + config.note_spacing / 2.0,
            y: current.y + staff_height - position as f64 * config.spacing / 2.0,
            position,
            duration: item.duration(),
            pitch: note.map(|n| n.pitch),
            octave: note.map(|n| n.octave),
            accented: note.map_or(false, |n| n.is_accented()),
            lyric: note.and_then(|n| n.lyric.clone()),
            is_rest: item.is_rest(),
        });
        x += config.note_spacing;

        // Overflow past the bar is dropped, not carried into the next measure.
        beats += item.duration().beats();
        if beats + BEAT_EPSILON >= measure_beats {
            current.bar_lines.push(x);
            beats = 0.0;
        }
    }
    systems.push(current);

    let last_y = systems.last().map_or(config.margin_top, |s| s.y);
    let layout = StaffLayout {
        systems,
        width: config.width,
        height: last_y + staff_height + STAFF_BOTTOM_PADDING,
        line_spacing: config.spacing,
        clef: score.clef,
        time_signature: score.time_signature,
    };
    log::debug!(
        "staff layout: {} notes in {} systems, {} bar lines",
        layout.note_count(),
        layout.systems.len(),
        layout.bar_line_count()
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(items: Vec<NoteOrRest>, beats: u32, beat_value: u32) -> Score {
        let mut score = Score::new();
        score.time_signature = TimeSignature { beats, beat_value };
        score.parts.push(Part { name: None, notes: items });
        score
    }

    fn quarters(n: usize) -> Vec<NoteOrRest> {
        (0..n)
            .map(|i| NoteOrRest::note(Pitch::ALL[i % 7], Octave::Middle, Duration::Quarter))
            .collect()
    }

    #[test]
    fn empty_score_has_one_empty_system() {
        let layout = compute_staff_layout(&Score::new(), &StaffLayoutConfig::default());
        assert_eq!(layout.systems.len(), 1);
        assert_eq!(layout.note_count(), 0);
        assert_eq!(layout.bar_line_count(), 0);
    }

    #[test]
    fn bar_lines_follow_time_signature() {
        let config = StaffLayoutConfig::default();

        let four_four = compute_staff_layout(&score_of(quarters(4), 4, 4), &config);
        assert_eq!(four_four.bar_line_count(), 1);

        let three_four = compute_staff_layout(&score_of(quarters(6), 3, 4), &config);
        assert_eq!(three_four.bar_line_count(), 2);

        let eighths = vec![NoteOrRest::note(Pitch::C, Octave::Middle, Duration::Eighth); 12];
        let six_eight = compute_staff_layout(&score_of(eighths, 6, 8), &config);
        assert_eq!(six_eight.bar_line_count(), 2);
    }

    #[test]
    fn overflowing_beats_are_dropped_at_the_bar() {
        // 3/4: half + half overflows by one beat, which is discarded.
        let items = vec![
            NoteOrRest::note(Pitch::C, Octave::Middle, Duration::Half),
            NoteOrRest::note(Pitch::D, Octave::Middle, Duration::Half),
            NoteOrRest::note(Pitch::E, Octave::Middle, Duration::Quarter),
            NoteOrRest::note(Pitch::F, Octave::Middle, Duration::Quarter),
            NoteOrRest::note(Pitch::G, Octave::Middle, Duration::Quarter),
        ];
        let layout = compute_staff_layout(&score_of(items, 3, 4), &StaffLayoutConfig::default());
        let config = StaffLayoutConfig::default();
        let bars = &layout.systems[0].bar_lines;
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0], config.margin_left + 2.0 * config.note_spacing);
        assert_eq!(bars[1], config.margin_left + 5.0 * config.note_spacing);
    }

    #[test]
    fn spacing_is_fixed_regardless_of_duration() {
        let items = vec![
            NoteOrRest::note(Pitch::C, Octave::Middle, Duration::Whole),
            NoteOrRest::note(Pitch::C, Octave::Middle, Duration::Sixteenth),
            NoteOrRest::rest(Duration::Half),
        ];
        let layout = compute_staff_layout(&score_of(items, 4, 4), &StaffLayoutConfig::default());
        let xs: Vec<f64> = layout.systems[0].notes.iter().map(|n| n.x).collect();
        assert_eq!(xs, vec![75.0, 105.0, 135.0]);
    }

    #[test]
    fn rests_sit_on_the_middle_line() {
        let layout = compute_staff_layout(
            &score_of(vec![NoteOrRest::rest(Duration::Quarter)], 4, 4),
            &StaffLayoutConfig::default(),
        );
        let rest = &layout.systems[0].notes[0];
        assert!(rest.is_rest);
        assert_eq!(rest.position, REST_POSITION);
        assert_eq!(rest.y, 40.0 + 20.0);
        assert_eq!(rest.pitch, None);
    }

    #[test]
    fn parts_are_concatenated_not_interleaved() {
        let mut score = score_of(quarters(2), 4, 4);
        score.parts.push(Part { name: Some("Bass".into()), notes: quarters(2) });
        let layout = compute_staff_layout(&score, &StaffLayoutConfig::default());
        let order: Vec<(usize, usize)> = layout.systems[0]
            .notes
            .iter()
            .map(|n| (n.target.part_index, n.target.note_index))
            .collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        // Beat counting runs across the part boundary.
        assert_eq!(layout.bar_line_count(), 1);
    }

    #[test]
    fn narrow_canvas_wraps_without_losing_or_reordering_notes() {
        let score = score_of(quarters(40), 4, 4);
        let wide = compute_staff_layout(&score, &StaffLayoutConfig::with_width(Some(2000.0)));
        let narrow = compute_staff_layout(&score, &StaffLayoutConfig::with_width(Some(300.0)));

        assert_eq!(wide.systems.len(), 1);
        assert!(narrow.systems.len() > 1);

        let flatten = |l: &StaffLayout| -> Vec<(NoteRef, i32)> {
            l.systems
                .iter()
                .flat_map(|s| s.notes.iter().map(|n| (n.target, n.position)))
                .collect()
        };
        assert_eq!(flatten(&wide), flatten(&narrow));
        assert_eq!(flatten(&narrow).len(), 40);

        let config = StaffLayoutConfig::default();
        for pair in narrow.systems.windows(2) {
            assert_eq!(pair[1].y - pair[0].y, config.staff_height() + config.system_spacing);
        }
        for system in &narrow.systems {
            for n in &system.notes {
                assert!(n.x + config.note_spacing / 2.0 <= system.x_end);
            }
        }
    }

    #[test]
    fn tiny_canvas_still_places_one_note_per_system() {
        let score = score_of(quarters(3), 4, 4);
        let layout = compute_staff_layout(&score, &StaffLayoutConfig::with_width(Some(10.0)));
        assert_eq!(layout.systems.len(), 3);
        assert!(layout.systems.iter().all(|s| s.notes.len() == 1));
    }

    #[test]
    fn note_y_follows_staff_position() {
        let items = vec![NoteOrRest::note(Pitch::E, Octave::Lower, Duration::Quarter)];
        let layout = compute_staff_layout(&score_of(items, 4, 4), &StaffLayoutConfig::default());
        let system = &layout.systems[0];
        let note = &system.notes[0];
        assert_eq!(note.position, 0);
        assert_eq!(note.y, system.y + layout.staff_height());
        assert_eq!(layout.position_y(system, 8), system.y);
    }
}
