//! Export turns a score into a standalone SVG document and computes the
//! numbers a host needs to rasterize it or place it on a printed page.
//!
//! Rasterizing and PDF assembly belong to the host; this module only
//! reports sizes. Labels are looked up from an explicit [`Language`] so
//! exports never depend on global UI state.

use serde::{Deserialize, Serialize};

use crate::layout::resolve_width;
use crate::model::{RenderingMode, Score, Selection};
use crate::renderer::{render_header, render_score};

/// A4 page in PostScript points.
pub const A4_WIDTH: f64 = 595.0;
pub const A4_HEIGHT: f64 = 842.0;
pub const DEFAULT_PAGE_MARGIN: f64 = 36.0;

/// Pixel scale used for PNG export.
pub const DEFAULT_PIXEL_SCALE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "cs")]
    Czech,
    #[serde(rename = "de")]
    German,
}

impl Language {
    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "en" => Some(Language::English),
            "cs" => Some(Language::Czech),
            "de" => Some(Language::German),
            _ => None,
        }
    }

    pub fn labels(self) -> Labels {
        match self {
            Language::English => Labels {
                untitled: "Untitled",
                tempo: "Tempo",
                staff: "Staff notation",
                circles: "Color circles",
            },
            Language::Czech => Labels {
                untitled: "Bez názvu",
                tempo: "Tempo",
                staff: "Notová osnova",
                circles: "Barevné kruhy",
            },
            Language::German => Labels {
                untitled: "Ohne Titel",
                tempo: "Tempo",
                staff: "Notensystem",
                circles: "Farbkreise",
            },
        }
    }
}

/// Localized strings that appear in exported documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub untitled: &'static str,
    pub tempo: &'static str,
    pub staff: &'static str,
    pub circles: &'static str,
}

impl Labels {
    pub fn mode_name(&self, mode: RenderingMode) -> &'static str {
        match mode {
            RenderingMode::Staff => self.staff,
            RenderingMode::Circles => self.circles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    /// Canvas width; `None` uses the renderer default
    pub width: Option<f64>,
    pub language: Language,
    /// Draw the title and tempo band above the notation
    pub include_header: bool,
    /// Device pixels per user unit for raster output
    pub pixel_scale: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            width: None,
            language: Language::English,
            include_header: true,
            pixel_scale: DEFAULT_PIXEL_SCALE,
        }
    }
}

/// A finished SVG document and its natural size.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedSvg {
    pub svg: String,
    pub width: f64,
    pub height: f64,
}

impl ExportedSvg {
    /// Pixel size of a raster rendering at the given scale.
    pub fn raster_size(&self, pixel_scale: f64) -> (u32, u32) {
        raster_size(self.width, self.height, pixel_scale)
    }
}

/// Render `score` in its own mode as a standalone SVG document.
pub fn export_svg(score: &Score, selection: Option<Selection>, options: &ExportOptions) -> ExportedSvg {
    let width = resolve_width(options.width);
    let scene = render_score(score, selection, Some(width));

    if !options.include_header {
        return ExportedSvg {
            svg: scene.to_svg(),
            width: scene.width,
            height: scene.height,
        };
    }

    let labels = options.language.labels();
    let title = if score.title.trim().is_empty() {
        labels.untitled
    } else {
        score.title.as_str()
    };
    let tempo_label = score
        .tempo
        .map(|bpm| format!("{} ♩ = {}", labels.tempo, format_bpm(bpm)));
    let header = render_header(scene.width, title, tempo_label.as_deref());

    log::debug!(
        "exporting '{}' as {} ({:?})",
        title,
        labels.mode_name(score.rendering_mode),
        options.language
    );
    ExportedSvg {
        svg: scene.to_svg_below(&header),
        width: scene.width.max(header.width),
        height: header.height + scene.height,
    }
}

fn format_bpm(bpm: f64) -> String {
    if bpm.fract() == 0.0 {
        format!("{bpm:.0}")
    } else {
        format!("{bpm:.1}")
    }
}

/// Pixel dimensions of a raster rendering, never smaller than 1×1.
pub fn raster_size(width: f64, height: f64, pixel_scale: f64) -> (u32, u32) {
    let to_px = |v: f64| {
        let px = (v * pixel_scale).ceil();
        if px.is_finite() && px >= 1.0 {
            px.min(u32::MAX as f64) as u32
        } else {
            1
        }
    };
    (to_px(width), to_px(height))
}

// ═══════════════════════════════════════════════════════════════════════
// Single-page placement
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const A4: PageSize = PageSize { width: A4_WIDTH, height: A4_HEIGHT };
}

/// Where an image lands on a page: top-left corner and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub width: f64,
    pub height: f64,
}

/// Fit a `width`×`height` image inside the page margins, centered
/// horizontally and aligned to the top margin. Images are shrunk to fit
/// but never enlarged.
pub fn fit_to_page(width: f64, height: f64, page: PageSize, margin: f64) -> PagePlacement {
    let avail_w = (page.width - 2.0 * margin).max(0.0);
    let avail_h = (page.height - 2.0 * margin).max(0.0);

    let scale = if width > 0.0 && height > 0.0 {
        (avail_w / width).min(avail_h / height).min(1.0)
    } else {
        1.0
    };
    let placed_w = width * scale;
    let placed_h = height * scale;

    PagePlacement {
        x: margin + (avail_w - placed_w).max(0.0) / 2.0,
        y: margin,
        scale,
        width: placed_w,
        height: placed_h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;

    fn sample() -> Score {
        let mut score = Score::new();
        score.title = "Ode <to> Joy".into();
        score.tempo = Some(120.0);
        score.parts.push(Part {
            name: None,
            notes: vec![NoteOrRest::note(Pitch::E, Octave::Middle, Duration::Quarter); 8],
        });
        score
    }

    #[test]
    fn header_adds_title_and_tempo() {
        let out = export_svg(&sample(), None, &ExportOptions::default());
        assert!(out.svg.contains("Ode &lt;to&gt; Joy"));
        assert!(out.svg.contains("Tempo ♩ = 120"));
        let bare = export_svg(&sample(), None, &ExportOptions { include_header: false, ..Default::default() });
        assert!(out.height > bare.height);
        assert_eq!(out.width, bare.width);
        assert!(!bare.svg.contains("Ode"));
    }

    #[test]
    fn untitled_label_is_localized() {
        let mut score = sample();
        score.title = String::new();
        score.tempo = None;
        let options = ExportOptions { language: Language::Czech, ..Default::default() };
        let out = export_svg(&score, None, &options);
        assert!(out.svg.contains("Bez názvu"));
        assert!(!out.svg.contains("Tempo"));

        let de = export_svg(&score, None, &ExportOptions { language: Language::German, ..Default::default() });
        assert!(de.svg.contains("Ohne Titel"));
    }

    #[test]
    fn exported_width_follows_option() {
        let options = ExportOptions { width: Some(500.0), include_header: false, ..Default::default() };
        let out = export_svg(&sample(), None, &options);
        assert_eq!(out.width, 500.0);
        assert!(out.svg.contains(r#"width="500""#));
    }

    #[test]
    fn raster_size_doubles_for_png() {
        assert_eq!(raster_size(800.0, 250.5, DEFAULT_PIXEL_SCALE), (1600, 501));
        assert_eq!(raster_size(0.0, -3.0, 2.0), (1, 1));
    }

    #[test]
    fn small_images_are_not_upscaled() {
        let placed = fit_to_page(300.0, 200.0, PageSize::A4, DEFAULT_PAGE_MARGIN);
        assert_eq!(placed.scale, 1.0);
        assert_eq!(placed.y, DEFAULT_PAGE_MARGIN);
        assert_eq!(placed.x, (A4_WIDTH - 300.0) / 2.0);
    }

    #[test]
    fn wide_images_shrink_to_the_page() {
        let placed = fit_to_page(1046.0, 400.0, PageSize::A4, DEFAULT_PAGE_MARGIN);
        assert!((placed.scale - 0.5).abs() < 1e-9);
        assert!((placed.width - 523.0).abs() < 1e-9);
        assert_eq!(placed.x, DEFAULT_PAGE_MARGIN);
    }

    #[test]
    fn tall_images_shrink_to_the_page_height() {
        let placed = fit_to_page(400.0, 3080.0, PageSize::A4, DEFAULT_PAGE_MARGIN);
        assert!((placed.height - (A4_HEIGHT - 2.0 * DEFAULT_PAGE_MARGIN)).abs() < 1e-9);
        assert!(placed.scale < 1.0);
    }

    #[test]
    fn language_codes() {
        assert_eq!(Language::from_code("cs"), Some(Language::Czech));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::English.labels().mode_name(RenderingMode::Circles), "Color circles");
    }
}
