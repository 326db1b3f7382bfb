//! Key signature estimation
//!
//! Scores all 30 major/minor keys by how many of the document's pitch
//! classes fall outside the key's scale and keeps the first lowest score.
//! Majors are swept before minors, each from -7 to +7 fifths.

use once_cell::sync::Lazy;
use std::collections::BTreeSet;

use crate::models::{KeySignature, Mode};

const MAJOR_INTERVALS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
const MINOR_INTERVALS: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];

/// Pitch-class bitmask for one candidate key
struct Candidate {
    key: KeySignature,
    scale_mask: u16,
}

/// Candidates in sweep order: every major from -7 to 7, then every minor
static CANDIDATES: Lazy<Vec<Candidate>> = Lazy::new(|| {
    let mut candidates = Vec::with_capacity(30);
    for mode in [Mode::Major, Mode::Minor] {
        for fifths in -7i8..=7 {
            candidates.push(Candidate {
                key: KeySignature::new(mode, fifths),
                scale_mask: scale_mask(mode, fifths),
            });
        }
    }
    candidates
});

/// Tonic pitch class for a key on the circle of fifths
///
/// Each step of fifths moves the major tonic up a perfect fifth (7
/// semitones); the relative minor sits a minor third below (9 up).
pub fn tonic_pitch_class(mode: Mode, fifths: i8) -> u8 {
    let major_tonic = (fifths as i32 * 7).rem_euclid(12);
    match mode {
        Mode::Major => major_tonic as u8,
        Mode::Minor => ((major_tonic + 9) % 12) as u8,
    }
}

fn scale_mask(mode: Mode, fifths: i8) -> u16 {
    let tonic = tonic_pitch_class(mode, fifths);
    let intervals = match mode {
        Mode::Major => &MAJOR_INTERVALS,
        Mode::Minor => &MINOR_INTERVALS,
    };
    intervals
        .iter()
        .fold(0u16, |mask, interval| mask | 1 << ((tonic + interval) % 12))
}

/// Pitch classes of the key's scale, ascending
#[cfg(test)]
fn scale_pitch_classes(key: KeySignature) -> BTreeSet<u8> {
    let mask = scale_mask(key.mode, key.fifths);
    (0..12).filter(|pc| mask & (1 << pc) != 0).collect()
}

/// Best-fitting key for a set of pitch classes (values taken mod 12)
///
/// Returns `None` for an empty set.
pub fn estimate_key_signature(pitch_classes: &BTreeSet<u8>) -> Option<KeySignature> {
    if pitch_classes.is_empty() {
        return None;
    }

    let input_mask = pitch_classes
        .iter()
        .fold(0u16, |mask, &pc| mask | 1 << (pc % 12));

    let mut best: Option<(&Candidate, u32)> = None;
    for candidate in CANDIDATES.iter() {
        let mismatches = (input_mask & !candidate.scale_mask).count_ones();
        match best {
            Some((_, best_mismatches)) if mismatches >= best_mismatches => {}
            _ => best = Some((candidate, mismatches)),
        }
    }

    best.map(|(candidate, mismatches)| {
        log::debug!(
            "estimated key {:?} fifths={} with {} mismatch(es)",
            candidate.key.mode,
            candidate.key.fifths,
            mismatches
        );
        candidate.key
    })
}
