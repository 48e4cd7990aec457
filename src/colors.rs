//! Pitch → display color mapping.
//!
//! Each diatonic pitch owns one color. A raised ("accented") pitch is shown
//! split between its own color and the color of the pitch it leans towards.

use crate::model::Pitch;

pub const C_COLOR: &str = "#1A1A1A";
pub const D_COLOR: &str = "#8B4513";
pub const E_COLOR: &str = "#0000CD";
pub const F_COLOR: &str = "#228B22";
pub const G_COLOR: &str = "#DC143C";
pub const A_COLOR: &str = "#FF8C00";
pub const H_COLOR: &str = "#FFD700";

/// Outline for the one color that disappears on a white background.
pub const H_OUTLINE_COLOR: &str = "#B8860B";

/// Left/right halves of a split (accented) shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitColors {
    pub left: &'static str,
    pub right: &'static str,
}

pub fn color_of(pitch: Pitch) -> &'static str {
    match pitch {
        Pitch::C => C_COLOR,
        Pitch::D => D_COLOR,
        Pitch::E => E_COLOR,
        Pitch::F => F_COLOR,
        Pitch::G => G_COLOR,
        Pitch::A => A_COLOR,
        Pitch::H => H_COLOR,
    }
}

/// Colors for an accented pitch. E and H have no upper neighbor and fall
/// back to a same-color pair, so they look like plain notes.
pub fn accented_colors(pitch: Pitch) -> SplitColors {
    let left = color_of(pitch);
    let right = pitch.upper_neighbor().map_or(left, color_of);
    SplitColors { left, right }
}

/// Stroke used around a filled shape of this pitch.
pub fn outline_of(pitch: Pitch) -> &'static str {
    match pitch {
        Pitch::H => H_OUTLINE_COLOR,
        other => color_of(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_table_matches_document_contract() {
        let table: Vec<&str> = Pitch::ALL.iter().map(|&p| color_of(p)).collect();
        assert_eq!(
            table,
            vec!["#1A1A1A", "#8B4513", "#0000CD", "#228B22", "#DC143C", "#FF8C00", "#FFD700"]
        );
    }

    #[test]
    fn accented_c_splits_into_c_and_d() {
        assert_eq!(
            accented_colors(Pitch::C),
            SplitColors { left: color_of(Pitch::C), right: color_of(Pitch::D) }
        );
        assert_eq!(accented_colors(Pitch::A).right, H_COLOR);
    }

    #[test]
    fn accented_e_and_h_are_degenerate() {
        assert_eq!(
            accented_colors(Pitch::E),
            SplitColors { left: E_COLOR, right: E_COLOR }
        );
        assert_eq!(
            accented_colors(Pitch::H),
            SplitColors { left: H_COLOR, right: H_COLOR }
        );
    }

    #[test]
    fn only_h_gets_a_darker_outline() {
        for p in Pitch::ALL {
            if p == Pitch::H {
                assert_eq!(outline_of(p), H_OUTLINE_COLOR);
            } else {
                assert_eq!(outline_of(p), color_of(p));
            }
        }
    }
}
