//! Sleep/wakeup event decoding.
//!
//! A task's `events` list alternates sleep and wakeup durations, starting
//! with a sleep. Sleeps are decoded into "the task has run for `t` units"
//! marks; wakeups stay relative ("resumes `w` units after the preceding
//! sleep").
//!
//! The first sleep seeds the running cumulator and is the only event that
//! updates it, so every later sleep is offset by the first one:
//!
//! | events | sleeps | wakeups |
//! |--------|--------|---------|
//! | `[3, 2, 4, 1]` | `[3, 7]` | `[2, 1]` |
//! | `[5, 1, 2, 1, 3]` | `[5, 7, 8]` | `[1, 1]` |

use serde::Serialize;

/// Decoded sleep marks and wakeup offsets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SleepWakeups {
    /// Run time at which each sleep begins.
    pub sleeps: Vec<f64>,
    /// Delay from each sleep to the matching wakeup.
    pub wakeups: Vec<f64>,
}

/// Decodes an alternating sleep/wakeup list, strictly left to right.
///
/// An odd-length list yields one more sleep than wakeups.
pub fn decode_events(events: &[f64]) -> SleepWakeups {
    let mut decoded = SleepWakeups::default();
    let mut cumulator = 0.0;

    for (i, &value) in events.iter().enumerate() {
        if i % 2 == 0 {
            decoded.sleeps.push(value + cumulator);
            if i == 0 {
                cumulator = value;
            }
        } else {
            decoded.wakeups.push(value);
        }
    }

    decoded
}
