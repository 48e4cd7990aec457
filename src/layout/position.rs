//! Pitch → vertical staff position.
//!
//! Positions count half line-gaps upward from the bottom staff line:
//! 0 is the bottom line, 8 the top line, odd numbers are spaces. Anything
//! outside `0..=8` needs ledger lines.

use crate::model::{Clef, Octave, Pitch};

pub const STAFF_BOTTOM_POSITION: i32 = 0;
pub const STAFF_TOP_POSITION: i32 = 8;
/// Rests sit on the middle line.
pub const REST_POSITION: i32 = 4;

/// Lower-register offsets: treble puts E on the bottom line, bass puts G there.
const TREBLE_BASE: [i32; 7] = [-2, -1, 0, 1, 2, 3, 4];
const BASS_BASE: [i32; 7] = [-4, -3, -2, -1, 0, 1, 2];

pub fn staff_position(pitch: Pitch, octave: Octave, clef: Clef) -> i32 {
    let base = match clef {
        Clef::Treble => TREBLE_BASE,
        Clef::Bass => BASS_BASE,
    };
    base[pitch.step() as usize] + octave.offset()
}

/// Positions of the ledger lines a note at `position` needs, nearest to
/// the staff first.
pub fn ledger_positions(position: i32) -> Vec<i32> {
    if position < STAFF_BOTTOM_POSITION {
        (position..STAFF_BOTTOM_POSITION)
            .rev()
            .filter(|p| p % 2 == 0)
            .collect()
    } else if position > STAFF_TOP_POSITION {
        (STAFF_TOP_POSITION + 1..=position)
            .filter(|p| p % 2 == 0)
            .collect()
    } else {
        Vec::new()
    }
}
