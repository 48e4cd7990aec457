//! Title band drawn above an exported scene.

use super::constants::*;
use super::scene::{Role, Scene, Style, TextAnchor};

/// Build the header band: title centered, tempo label at the right margin.
pub(crate) fn render_header(width: f64, title: &str, tempo_label: Option<&str>) -> Scene {
    let mut scene = Scene::new(width, HEADER_HEIGHT);
    scene.rect(Role::Background, 0.0, 0.0, width, HEADER_HEIGHT, Style::fill(BACKGROUND_COLOR));

    scene.text(
        Role::Header, width / 2.0, HEADER_TITLE_Y, title,
        HEADER_TITLE_SIZE, true, TextAnchor::Middle, HEADER_COLOR,
    );

    if let Some(label) = tempo_label {
        scene.text(
            Role::Header, width - HEADER_MARGIN_RIGHT, HEADER_TEMPO_Y, label,
            HEADER_TEMPO_SIZE, false, TextAnchor::End, HEADER_COLOR,
        );
    }
    scene
}
