//! Rendering tests — load sample documents and render them to SVG.

use colorscore::layout::{CirclesLayoutConfig, StaffLayoutConfig};
use colorscore::{
    compute_circles_layout, compute_staff_layout, export_svg, load_file, render_circles,
    render_file_to_svg, render_score_to_svg, render_staff, ExportOptions, Language, NoteRef, Role,
    Score,
};
use std::path::PathBuf;

fn sheetmusic_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("sheetmusic")
}

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn load(name: &str) -> Score {
    load_file(sheetmusic_dir().join(name)).unwrap_or_else(|e| panic!("Failed to load {name}: {e}"))
}

fn write_output(name: &str, svg: &str) {
    let out = output_dir().join(name);
    std::fs::write(&out, svg).expect("Failed to write SVG");
    println!("✓ Rendered {name} ({} bytes)", svg.len());
    println!("  Output: {}", out.display());
}

#[test]
fn render_ode_to_joy_svg() {
    let path = sheetmusic_dir().join("ode-to-joy.json");
    let svg = render_file_to_svg(&path, None).expect("Failed to render ode-to-joy");

    assert!(svg.starts_with("<svg"), "Output should be SVG");
    assert!(svg.contains("</svg>"), "SVG should be closed");
    assert!(svg.contains(r#"class="staff-line""#), "SVG should contain staff lines");
    assert!(svg.contains("<ellipse"), "SVG should contain noteheads");
    assert!(svg.contains(">Freu-</text>"), "SVG should contain lyrics");

    write_output("ode-to-joy.svg", &svg);
}

#[test]
fn render_skakal_pes_svg() {
    let score = load("skakal-pes.json");
    let svg = render_score_to_svg(&score, None);

    assert!(svg.contains("<circle"), "SVG should contain circles");
    assert!(!svg.contains(r#"class="staff-line""#), "circle notation has no staff");
    assert!(svg.contains(">Ská</text>"), "SVG should contain lyrics");

    write_output("skakal-pes.svg", &svg);
}

#[test]
fn render_bass_walk_both_notations() {
    let score = load("bass-walk.json");
    write_output("bass-walk.staff.svg", &render_staff(&score, None, None).to_svg());
    write_output("bass-walk.circles.svg", &render_circles(&score, None, None).to_svg());
}

#[test]
fn export_with_header_svg() {
    let score = load("skakal-pes.json");
    let options = ExportOptions { language: Language::Czech, ..Default::default() };
    let exported = export_svg(&score, None, &options);

    assert!(exported.svg.contains("Skákal pes"));
    assert!(exported.svg.contains("Tempo ♩ = 96"));
    assert_eq!(exported.raster_size(2.0).0, 1600);

    write_output("skakal-pes.export.svg", &exported.svg);
}

#[test]
fn render_produces_valid_svg_dimensions() {
    let score = load("ode-to-joy.json");
    let scene = render_staff(&score, None, Some(640.0));
    let svg = scene.to_svg();

    assert!(svg.contains("viewBox="), "SVG should have viewBox");
    assert!(svg.contains(r#"width="640""#), "SVG should have the requested width");
    assert!(svg.contains(&format!(r#"height="{}""#, scene.height)));
}

// ─── Layout properties over real documents ──────────────────────────

#[test]
fn bar_lines_follow_beat_counting() {
    let config = StaffLayoutConfig::default();
    assert_eq!(compute_staff_layout(&load("ode-to-joy.json"), &config).bar_line_count(), 7);
    assert_eq!(compute_staff_layout(&load("skakal-pes.json"), &config).bar_line_count(), 6);
    // Beat counting runs across the boundary between the two parts.
    assert_eq!(compute_staff_layout(&load("bass-walk.json"), &config).bar_line_count(), 6);
}

#[test]
fn width_changes_wrapping_but_not_order() {
    for name in ["ode-to-joy.json", "skakal-pes.json", "bass-walk.json"] {
        let score = load(name);

        let staff_order = |width: f64| -> Vec<(NoteRef, i32)> {
            compute_staff_layout(&score, &StaffLayoutConfig::with_width(Some(width)))
                .systems
                .iter()
                .flat_map(|s| s.notes.iter().map(|n| (n.target, n.position)))
                .collect()
        };
        assert_eq!(staff_order(320.0), staff_order(1600.0), "{name}: staff order");
        assert_eq!(staff_order(320.0).len(), score.note_count());

        let circle_order = |width: f64| -> Vec<(NoteRef, u64)> {
            compute_circles_layout(&score, &CirclesLayoutConfig::with_width(Some(width)))
                .rows
                .iter()
                .flat_map(|r| r.circles.iter().map(|c| (c.target, c.radius.to_bits())))
                .collect()
        };
        assert_eq!(circle_order(320.0), circle_order(1600.0), "{name}: circle order");
    }
}

#[test]
fn every_note_gets_exactly_one_hit_area() {
    let score = load("bass-walk.json");
    for scene in [render_staff(&score, None, None), render_circles(&score, None, None)] {
        assert_eq!(scene.with_role(Role::HitArea).count(), score.note_count());
        for (target, _) in score.entries() {
            assert_eq!(
                scene.for_target(target).filter(|e| e.role == Role::HitArea).count(),
                1,
                "{target:?}"
            );
        }
    }
}

#[test]
fn selection_in_second_part_highlights_one_element() {
    let score = load("bass-walk.json");
    let target = NoteRef { part_index: 1, note_index: 1 };
    for scene in [render_staff(&score, Some(target), None), render_circles(&score, Some(target), None)] {
        let highlighted: Vec<_> = scene.with_role(Role::Selection).collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].target, Some(target));
    }
}

#[test]
fn clicks_map_back_to_notes() {
    let score = load("ode-to-joy.json");
    let layout = compute_staff_layout(&score, &StaffLayoutConfig::with_width(Some(400.0)));
    let scene = colorscore::renderer::render_staff_layout(&layout, None);

    for system in &layout.systems {
        for note in &system.notes {
            let mut hit = None;
            scene.click(note.x, note.y, |p, n| hit = Some(NoteRef { part_index: p, note_index: n }));
            assert_eq!(hit, Some(note.target));
        }
    }
    assert!(!scene.click(1.0, 1.0, |_, _| panic!("background should not be clickable")));
}
