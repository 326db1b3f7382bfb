//! Time-period grouping
//!
//! Partitions a track's (possibly overlapping) notes into contiguous,
//! non-overlapping periods with a sweep over an ordered map from tick to the
//! notes that start sounding there. A period never crosses a note onset or
//! offset, so the pitch set of every period is exactly what sounds throughout
//! it. Silence becomes rest periods, and the output tiles `[0, last end)`.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use crate::models::{Chord, Note, PeriodChord, TimePeriod};

/// Remaining part of a note still to be placed
#[derive(Clone, Copy, Debug)]
struct Sounding {
    pitch: u8,
    end_tick: u64,
}

/// Group sorted notes into chord/rest periods
pub fn group_notes_by_time_period(notes: &[Note]) -> Vec<PeriodChord> {
    let mut buckets: BTreeMap<u64, Vec<Sounding>> = BTreeMap::new();
    for note in notes {
        match note.end_tick {
            Some(end_tick) if end_tick > note.start_tick => {
                buckets.entry(note.start_tick).or_default().push(Sounding {
                    pitch: note.pitch,
                    end_tick,
                });
            }
            _ => {}
        }
    }

    let mut periods = Vec::new();
    let mut tick = 0u64;

    while !buckets.is_empty() {
        match buckets.remove(&tick) {
            None => {
                let Some(&boundary) = buckets.range((Excluded(tick), Unbounded)).next().map(|(k, _)| k)
                else {
                    break;
                };
                periods.push(PeriodChord::new(TimePeriod::new(tick, boundary), Chord::rest()));
                tick = boundary;
            }
            Some(sounding) => {
                let earliest_end = sounding.iter().map(|s| s.end_tick).min().unwrap_or(tick);
                let boundary = match buckets.keys().next() {
                    Some(&next_start) => earliest_end.min(next_start),
                    None => earliest_end,
                };

                let chord = Chord::from_pitches(sounding.iter().map(|s| s.pitch));
                periods.push(PeriodChord::new(TimePeriod::new(tick, boundary), chord));

                let continuing: Vec<Sounding> = sounding
                    .into_iter()
                    .filter(|s| s.end_tick > boundary)
                    .collect();
                if !continuing.is_empty() {
                    buckets.entry(boundary).or_default().extend(continuing);
                }
                tick = boundary;
            }
        }
    }

    periods
}
