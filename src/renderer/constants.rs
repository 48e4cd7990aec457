//! Shared constants for the renderers (all in SVG user units).
//!
//! Staff dimensions are given for the default 10-unit line spacing and are
//! scaled by the renderer when a layout uses a different spacing.

// ── Staff dimensions ────────────────────────────────────────────────
pub(super) const REFERENCE_LINE_SPACING: f64 = 10.0;
pub(super) const STAFF_LINE_WIDTH: f64 = 0.8;
pub(super) const BARLINE_WIDTH: f64 = 1.0;
pub(super) const LEDGER_LINE_WIDTH: f64 = 0.8;
pub(super) const LEDGER_LINE_EXTEND: f64 = 4.0;

// ── Prefix ──────────────────────────────────────────────────────────
pub(super) const CLEF_OFFSET_X: f64 = 15.0; // clef center, from the staff's left end
pub(super) const TIME_SIG_OFFSET_X: f64 = 38.0;
pub(super) const TIME_SIG_FONT_SIZE: f64 = 20.0;

// ── Note dimensions ─────────────────────────────────────────────────
pub(super) const NOTEHEAD_RX: f64 = 6.0;
pub(super) const NOTEHEAD_RY: f64 = 4.5;
pub(super) const NOTEHEAD_TILT: f64 = -15.0; // degrees
pub(super) const HOLLOW_NOTEHEAD_STROKE: f64 = 2.0;
pub(super) const SPLIT_OUTLINE_STROKE: f64 = 1.2;
pub(super) const STEM_LENGTH: f64 = 30.0;
/// Extra stem length that makes room for a second flag.
pub(super) const SIXTEENTH_STEM_EXTRA: f64 = 4.0;
pub(super) const STEM_WIDTH: f64 = 1.2;
pub(super) const FLAG_GAP: f64 = 7.0; // distance between stacked flags
pub(super) const HIT_HALF_WIDTH: f64 = 12.0;
pub(super) const SELECTION_PAD: f64 = 4.0;

// ── Lyrics ──────────────────────────────────────────────────────────
pub(super) const LYRICS_FONT_SIZE: f64 = 13.0;
pub(super) const LYRICS_MIN_Y_BELOW_STAFF: f64 = 28.0;
pub(super) const LYRICS_PAD_BELOW: f64 = 16.0;

// ── Circles ─────────────────────────────────────────────────────────
pub(super) const CIRCLE_STROKE_WIDTH: f64 = 2.0;
pub(super) const OCTAVE_DOT_SCALE: f64 = 0.25; // of the circle radius
pub(super) const OCTAVE_DOT_MIN_RADIUS: f64 = 2.0;
pub(super) const SELECTION_RING_GAP: f64 = 5.0;
pub(super) const SELECTION_RING_WIDTH: f64 = 2.5;

// ── Export header ───────────────────────────────────────────────────
pub(super) const HEADER_HEIGHT: f64 = 70.0;
pub(super) const HEADER_TITLE_Y: f64 = 36.0;
pub(super) const HEADER_TITLE_SIZE: f64 = 22.0;
pub(super) const HEADER_TEMPO_Y: f64 = 58.0;
pub(super) const HEADER_TEMPO_SIZE: f64 = 11.0;
pub(super) const HEADER_MARGIN_RIGHT: f64 = 20.0;

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const BACKGROUND_COLOR: &str = "white";
pub(super) const NOTE_COLOR: &str = "#1a1a1a";
pub(super) const STAFF_COLOR: &str = "#555555";
pub(super) const BARLINE_COLOR: &str = "#333333";
pub(super) const REST_COLOR: &str = "#1a1a1a";
pub(super) const LYRICS_COLOR: &str = "#333333";
pub(super) const HEADER_COLOR: &str = "#222222";
pub(super) const SELECTION_COLOR: &str = "#2F80ED";
pub(super) const HOLLOW_FILL: &str = "white";
pub(super) const HIT_FILL: &str = "transparent";
pub(super) const LOWER_OCTAVE_DOT: &str = "#000000";
pub(super) const UPPER_OCTAVE_DOT: &str = "#FFFFFF";
