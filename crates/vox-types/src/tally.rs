//! Vote tally math for results views.
//!
//! Counts arrive pre-aggregated from the backend; the client only sums them
//! and turns each option's count into a display percentage.

use crate::PollOption;

/// Sums the vote counts across a result set.
///
/// Options without a count (plain poll fetches) contribute zero.
pub fn total_votes(options: &[PollOption]) -> u64 {
    options.iter().map(|o| o.votes.unwrap_or(0)).sum()
}

/// Display percentage for one option, rounded to the nearest whole number.
///
/// A zero total yields 0 for every option (guards the division).
pub fn percentage(votes: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    ((votes as f64 / total as f64) * 100.0).round() as u8
}
