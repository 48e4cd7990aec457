//! colorscore — layout and rendering of scores in staff notation and in
//! color-circle notation.
//!
//! A [`Score`] is laid out by one of two engines ([`layout::staff`] or
//! [`layout::circles`]) and drawn into a [`Scene`]: a flat list of
//! primitives tagged with the note each one belongs to. Scenes serialize to
//! self-contained SVG.
//!
//! # Example
//! ```no_run
//! use colorscore::{load_file, render_score};
//!
//! let score = load_file("path/to/song.json").unwrap();
//! let scene = render_score(&score, None, Some(600.0));
//! println!("{}x{} with {} elements", scene.width, scene.height, scene.elements.len());
//! let svg = scene.to_svg();
//! # let _ = svg;
//! ```

pub mod colors;
pub mod editor;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod parser;
pub mod renderer;

#[cfg(target_os = "android")]
pub mod android;

use std::path::Path;

pub use colors::{accented_colors, color_of, outline_of, SplitColors};
pub use editor::{Action, EditorState};
pub use error::ScoreError;
pub use export::{export_svg, fit_to_page, raster_size, ExportOptions, ExportedSvg, Language};
pub use layout::{compute_circles_layout, compute_staff_layout, staff_position};
pub use model::*;
pub use parser::{load_file, parse_score_json, save_file, score_to_json};
pub use renderer::scene::{Element, Role, Scene, Shape};
pub use renderer::{render_circles, render_score, render_score_to_svg, render_staff};

/// Parse a score document and render it to SVG.
///
/// `mode` overrides the document's own rendering mode. `width` sets the
/// canvas width in user units; pass `None` to use the default (800).
pub fn render_json_to_svg(
    json: &str,
    width: Option<f64>,
    mode: Option<RenderingMode>,
) -> Result<String, ScoreError> {
    let score = parse_score_json(json)?;
    let scene = match mode.unwrap_or(score.rendering_mode) {
        RenderingMode::Staff => render_staff(&score, None, width),
        RenderingMode::Circles => render_circles(&score, None, width),
    };
    Ok(scene.to_svg())
}

/// Load a score document from disk and render it in its own mode.
pub fn render_file_to_svg<P: AsRef<Path>>(path: P, width: Option<f64>) -> Result<String, ScoreError> {
    let score = load_file(path)?;
    Ok(render_score_to_svg(&score, width))
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

pub(crate) fn ffi_width(width: f64) -> Option<f64> {
    if width > 0.0 {
        Some(width)
    } else {
        None
    }
}

pub(crate) fn ffi_mode(mode: i32) -> Option<RenderingMode> {
    match mode {
        1 => Some(RenderingMode::Staff),
        2 => Some(RenderingMode::Circles),
        _ => None,
    }
}

fn into_c_string(result: Result<String, ScoreError>) -> *mut c_char {
    match result {
        Ok(svg) => match CString::new(svg) {
            Ok(c) => c.into_raw(),
            Err(e) => {
                log::warn!("rendered SVG contains a NUL byte at {}", e.nul_position());
                std::ptr::null_mut()
            }
        },
        Err(e) => {
            log::warn!("render failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a score document and return SVG as a C string.
/// The caller must free the returned string with `colorscore_free_string`.
///
/// `width` sets the canvas width in user units. Pass 0.0 to use the default.
/// `mode` is 0 for the document's own mode, 1 for staff, 2 for circles.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn colorscore_render_json(
    json: *const c_char,
    width: f64,
    mode: i32,
) -> *mut c_char {
    if json.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(json) };
    let json = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };
    into_c_string(render_json_to_svg(json, ffi_width(width), ffi_mode(mode)))
}

/// Load a score document from a path and return SVG as a C string.
/// The caller must free the returned string with `colorscore_free_string`.
///
/// # Safety
/// `path` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn colorscore_render_file(path: *const c_char, width: f64) -> *mut c_char {
    if path.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(path) };
    let path = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };
    into_c_string(render_file_to_svg(path, ffi_width(width)))
}

/// Free a string previously returned by colorscore functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a colorscore function, or null.
#[no_mangle]
pub unsafe extern "C" fn colorscore_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
