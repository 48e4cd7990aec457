//! Scene graph: the drawable output of both renderers.
//!
//! A scene is a flat, ordered list of primitives (later elements paint over
//! earlier ones). Elements derived from a note or rest carry its
//! [`NoteRef`] so a host can wire up interaction without re-running layout.

use serde::Serialize;

use crate::model::NoteRef;
use super::svg_builder::SvgBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Shape {
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Circle { cx: f64, cy: f64, r: f64 },
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
    Path { d: String },
    Text {
        x: f64,
        y: f64,
        content: String,
        size: f64,
        bold: bool,
        anchor: TextAnchor,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: f64,
    pub dash: Option<&'static str>,
}

impl Style {
    pub fn fill(color: &'static str) -> Self {
        Self { fill: color, stroke: "none", stroke_width: 0.0, dash: None }
    }

    pub fn stroke(color: &'static str, width: f64) -> Self {
        Self { fill: "none", stroke: color, stroke_width: width, dash: None }
    }

    pub fn fill_and_stroke(fill: &'static str, stroke: &'static str, width: f64) -> Self {
        Self { fill, stroke, stroke_width: width, dash: None }
    }

    pub fn dashed(mut self, pattern: &'static str) -> Self {
        self.dash = Some(pattern);
        self
    }
}

/// What an element depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Background,
    StaffLine,
    Clef,
    TimeSignature,
    BarLine,
    LedgerLine,
    Notehead,
    Stem,
    Flag,
    Rest,
    Circle,
    OctaveDot,
    Lyric,
    /// Title and tempo band added on export
    Header,
    Selection,
    /// Invisible click target covering one note or rest
    HitArea,
}

impl Role {
    pub fn class_name(self) -> &'static str {
        match self {
            Role::Background => "background",
            Role::StaffLine => "staff-line",
            Role::Clef => "clef",
            Role::TimeSignature => "time-signature",
            Role::BarLine => "bar-line",
            Role::LedgerLine => "ledger-line",
            Role::Notehead => "notehead",
            Role::Stem => "stem",
            Role::Flag => "flag",
            Role::Rest => "rest",
            Role::Circle => "circle",
            Role::OctaveDot => "octave-dot",
            Role::Lyric => "lyric",
            Role::Header => "header",
            Role::Selection => "selection",
            Role::HitArea => "hit-area",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub shape: Shape,
    pub style: Style,
    pub role: Role,
    /// The note or rest this element belongs to
    pub target: Option<NoteRef>,
    /// SVG transform applied to the shape
    pub transform: Option<String>,
}

impl Element {
    pub fn for_note(&mut self, target: NoteRef) -> &mut Self {
        self.target = Some(target);
        self
    }

    pub fn transformed(&mut self, transform: String) -> &mut Self {
        self.transform = Some(transform);
        self
    }

    fn contains(&self, px: f64, py: f64) -> bool {
        match self.shape {
            Shape::Rect { x, y, width, height } => {
                px >= x && px <= x + width && py >= y && py <= y + height
            }
            Shape::Circle { cx, cy, r } => (px - cx).powi(2) + (py - cy).powi(2) <= r * r,
            _ => false,
        }
    }
}

/// A complete drawable scene with its natural pixel size.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, elements: Vec::new() }
    }

    fn push(&mut self, role: Role, shape: Shape, style: Style) -> &mut Element {
        self.elements.push(Element {
            shape,
            style,
            role,
            target: None,
            transform: None,
        });
        let last = self.elements.len() - 1;
        &mut self.elements[last]
    }

    pub(super) fn line(&mut self, role: Role, x1: f64, y1: f64, x2: f64, y2: f64, color: &'static str, width: f64) -> &mut Element {
        self.push(role, Shape::Line { x1, y1, x2, y2 }, Style::stroke(color, width))
    }

    pub(super) fn rect(&mut self, role: Role, x: f64, y: f64, width: f64, height: f64, style: Style) -> &mut Element {
        self.push(role, Shape::Rect { x, y, width, height }, style)
    }

    pub(super) fn circle(&mut self, role: Role, cx: f64, cy: f64, r: f64, style: Style) -> &mut Element {
        self.push(role, Shape::Circle { cx, cy, r }, style)
    }

    pub(super) fn ellipse(&mut self, role: Role, cx: f64, cy: f64, rx: f64, ry: f64, style: Style) -> &mut Element {
        self.push(role, Shape::Ellipse { cx, cy, rx, ry }, style)
    }

    pub(super) fn path(&mut self, role: Role, d: String, style: Style) -> &mut Element {
        self.push(role, Shape::Path { d }, style)
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn text(
        &mut self,
        role: Role,
        x: f64,
        y: f64,
        content: &str,
        size: f64,
        bold: bool,
        anchor: TextAnchor,
        color: &'static str,
    ) -> &mut Element {
        let shape = Shape::Text {
            x,
            y,
            content: content.to_string(),
            size,
            bold,
            anchor,
        };
        self.push(role, shape, Style::fill(color))
    }

    /// Elements of one kind, in paint order.
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Element> + '_ {
        self.elements.iter().filter(move |e| e.role == role)
    }

    /// Elements belonging to one note or rest, in paint order.
    pub fn for_target(&self, target: NoteRef) -> impl Iterator<Item = &Element> + '_ {
        self.elements.iter().filter(move |e| e.target == Some(target))
    }

    /// The note or rest under a point, topmost first.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<NoteRef> {
        self.elements
            .iter()
            .rev()
            .filter(|e| e.role == Role::HitArea)
            .find(|e| e.contains(x, y))
            .and_then(|e| e.target)
    }

    /// Dispatch a click at `(x, y)` to `on_note_click(part_index, note_index)`.
    /// Returns whether a note or rest was hit.
    pub fn click<F>(&self, x: f64, y: f64, mut on_note_click: F) -> bool
    where
        F: FnMut(usize, usize),
    {
        match self.hit_test(x, y) {
            Some(target) => {
                on_note_click(target.part_index, target.note_index);
                true
            }
            None => false,
        }
    }

    /// Serialize as a self-contained SVG document.
    pub fn to_svg(&self) -> String {
        SvgBuilder::from_scene(self).build()
    }

    /// Serialize with `header` drawn above this scene.
    pub fn to_svg_below(&self, header: &Scene) -> String {
        SvgBuilder::from_scene(self).build_below(SvgBuilder::from_scene(header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(part_index: usize, note_index: usize) -> NoteRef {
        NoteRef { part_index, note_index }
    }

    #[test]
    fn hit_test_only_considers_hit_areas() {
        let mut scene = Scene::new(100.0, 100.0);
        scene
            .circle(Role::Circle, 50.0, 50.0, 40.0, Style::fill("#000"))
            .for_note(target(0, 0));
        assert_eq!(scene.hit_test(50.0, 50.0), None);

        scene
            .rect(Role::HitArea, 0.0, 0.0, 20.0, 20.0, Style::fill("transparent"))
            .for_note(target(0, 1));
        assert_eq!(scene.hit_test(10.0, 10.0), Some(target(0, 1)));
        assert_eq!(scene.hit_test(30.0, 30.0), None);
    }

    #[test]
    fn topmost_hit_area_wins() {
        let mut scene = Scene::new(100.0, 100.0);
        scene
            .rect(Role::HitArea, 0.0, 0.0, 50.0, 50.0, Style::fill("transparent"))
            .for_note(target(0, 0));
        scene
            .rect(Role::HitArea, 25.0, 25.0, 50.0, 50.0, Style::fill("transparent"))
            .for_note(target(1, 3));
        assert_eq!(scene.hit_test(30.0, 30.0), Some(target(1, 3)));
    }

    #[test]
    fn click_invokes_callback_with_indices() {
        let mut scene = Scene::new(100.0, 100.0);
        scene
            .rect(Role::HitArea, 0.0, 0.0, 10.0, 10.0, Style::fill("transparent"))
            .for_note(target(2, 7));

        let mut clicked = Vec::new();
        assert!(scene.click(5.0, 5.0, |p, n| clicked.push((p, n))));
        assert!(!scene.click(50.0, 50.0, |p, n| clicked.push((p, n))));
        assert_eq!(clicked, vec![(2, 7)]);
    }
}
