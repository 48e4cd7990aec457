//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::{jfloat, jint, jstring};
use jni::JNIEnv;

use crate::{ffi_mode, ffi_width, render_file_to_svg, render_json_to_svg, ScoreError};

fn page_width(width: jfloat) -> Option<f64> {
    ffi_width(width as f64)
}

fn to_jstring(env: &mut JNIEnv, result: Result<String, ScoreError>) -> jstring {
    match result {
        Ok(svg) => match env.new_string(&svg) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(e) => {
            log::warn!("render failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a score document to SVG in its own rendering mode.
///
/// Called from Kotlin as:
///   external fun renderJson(json: String, width: Float): String?
#[no_mangle]
pub extern "system" fn Java_com_colorscore_app_ColorScore_renderJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
    width: jfloat,
) -> jstring {
    let json: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let result = render_json_to_svg(&json, page_width(width), None);
    to_jstring(&mut env, result)
}

/// Render a score document in a forced mode (1 = staff, 2 = circles).
///
/// Called from Kotlin as:
///   external fun renderJsonAs(json: String, width: Float, mode: Int): String?
#[no_mangle]
pub extern "system" fn Java_com_colorscore_app_ColorScore_renderJsonAs(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
    width: jfloat,
    mode: jint,
) -> jstring {
    let json: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let result = render_json_to_svg(&json, page_width(width), ffi_mode(mode));
    to_jstring(&mut env, result)
}

/// Load a score document from a path and render it to SVG.
///
/// Called from Kotlin as:
///   external fun renderFile(path: String, width: Float): String?
#[no_mangle]
pub extern "system" fn Java_com_colorscore_app_ColorScore_renderFile(
    mut env: JNIEnv,
    _class: JClass,
    path: JString,
    width: jfloat,
) -> jstring {
    let path: String = match env.get_string(&path) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let result = render_file_to_svg(&path, page_width(width));
    to_jstring(&mut env, result)
}
