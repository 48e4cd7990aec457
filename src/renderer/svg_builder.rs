//! SVG builder — serializes a [`Scene`] into a self-contained SVG string.

use super::scene::{Element, Scene, Shape, TextAnchor};

pub(super) struct SvgBuilder {
    elements: Vec<String>,
    width: f64,
    height: f64,
}

impl SvgBuilder {
    pub(super) fn from_scene(scene: &Scene) -> Self {
        let mut svg = Self {
            elements: Vec::with_capacity(scene.elements.len()),
            width: scene.width,
            height: scene.height,
        };
        for element in &scene.elements {
            svg.element(element);
        }
        svg
    }

    pub(super) fn build(self) -> String {
        let mut svg = open_document(self.width, self.height);
        push_elements(&mut svg, &self.elements, "  ");
        svg.push_str("</svg>\n");
        svg
    }

    /// One document with `header` on top and `self` shifted below it.
    pub(super) fn build_below(self, header: SvgBuilder) -> String {
        let width = self.width.max(header.width);
        let mut svg = open_document(width, header.height + self.height);
        push_elements(&mut svg, &header.elements, "  ");
        svg.push_str(&format!("  <g transform=\"translate(0,{})\">\n", header.height));
        push_elements(&mut svg, &self.elements, "    ");
        svg.push_str("  </g>\n</svg>\n");
        svg
    }

    fn element(&mut self, el: &Element) {
        let common = common_attributes(el);
        let markup = match &el.shape {
            Shape::Line { x1, y1, x2, y2 } => format!(
                r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"{} stroke-linecap="round"/>"#,
                x1, y1, x2, y2, common
            ),
            Shape::Rect { x, y, width, height } => format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}"{}/>"#,
                x, y, width, height, common
            ),
            Shape::Circle { cx, cy, r } => format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}"{}/>"#,
                cx, cy, r, common
            ),
            Shape::Ellipse { cx, cy, rx, ry } => format!(
                r#"<ellipse cx="{:.1}" cy="{:.1}" rx="{:.1}" ry="{:.1}"{}/>"#,
                cx, cy, rx, ry, common
            ),
            Shape::Path { d } => format!(r#"<path d="{}"{}/>"#, d, common),
            Shape::Text { x, y, content, size, bold, anchor } => format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}" font-weight="{}" text-anchor="{}"{}>{}</text>"#,
                x,
                y,
                size,
                if *bold { "bold" } else { "normal" },
                anchor_name(*anchor),
                common,
                escape(content)
            ),
        };
        self.elements.push(markup);
    }
}

fn open_document(width: f64, height: f64) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}" style="font-family: 'Georgia', 'Times New Roman', serif;">"#,
        width, height, width, height
    );
    svg.push('\n');
    svg
}

fn push_elements(svg: &mut String, elements: &[String], indent: &str) {
    for el in elements {
        svg.push_str(indent);
        svg.push_str(el);
        svg.push('\n');
    }
}

fn common_attributes(el: &Element) -> String {
    let mut attrs = format!(r#" class="{}" fill="{}""#, el.role.class_name(), el.style.fill);
    if el.style.stroke_width > 0.0 {
        attrs.push_str(&format!(
            r#" stroke="{}" stroke-width="{:.1}""#,
            el.style.stroke, el.style.stroke_width
        ));
    }
    if let Some(dash) = el.style.dash {
        attrs.push_str(&format!(r#" stroke-dasharray="{}""#, dash));
    }
    if let Some(ref transform) = el.transform {
        attrs.push_str(&format!(r#" transform="{}""#, transform));
    }
    if let Some(target) = el.target {
        attrs.push_str(&format!(
            r#" data-part="{}" data-note="{}""#,
            target.part_index, target.note_index
        ));
    }
    attrs
}

fn anchor_name(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn escape(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::super::scene::{Role, Style};
    use super::*;
    use crate::model::NoteRef;

    #[test]
    fn document_has_fixed_size_and_closes() {
        let scene = Scene::new(320.0, 140.0);
        let svg = scene.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="320" height="140""#));
        assert!(svg.contains(r#"viewBox="0 0 320 140""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn targeted_elements_carry_data_attributes() {
        let mut scene = Scene::new(100.0, 100.0);
        scene
            .circle(Role::Circle, 10.0, 20.0, 5.0, Style::fill_and_stroke("#DC143C", "#DC143C", 2.0))
            .for_note(NoteRef { part_index: 1, note_index: 4 });
        let svg = scene.to_svg();
        assert!(svg.contains(r##"<circle cx="10.0" cy="20.0" r="5.0" class="circle" fill="#DC143C" stroke="#DC143C" stroke-width="2.0" data-part="1" data-note="4"/>"##));
    }

    #[test]
    fn header_document_stacks_both_scenes() {
        let mut header = Scene::new(200.0, 50.0);
        header.text(Role::Header, 100.0, 30.0, "Title", 20.0, true, TextAnchor::Middle, "#222222");
        let body = Scene::new(200.0, 100.0);
        let svg = body.to_svg_below(&header);
        assert!(svg.contains(r#"height="150""#));
        assert!(svg.contains(r#"<g transform="translate(0,50)">"#));
        assert!(svg.find(">Title<") < svg.find("<g transform"));
    }

    #[test]
    fn text_is_escaped() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.text(Role::Lyric, 0.0, 0.0, "rock & <roll>", 12.0, false, TextAnchor::Middle, "#333333");
        let svg = scene.to_svg();
        assert!(svg.contains("rock &amp; &lt;roll&gt;"));
    }
}
