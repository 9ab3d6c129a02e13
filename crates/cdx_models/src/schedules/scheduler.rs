//! Frequency-stepped date-list construction.

use cdx_core::types::Date;

use super::error::ScheduleError;
use super::frequency::Frequency;

/// Generates ordered, deduplicated date lists at a payment frequency.
///
/// The list runs from `start` to `end` in whole-frequency steps, capped at
/// `end`; the reference date is included when it falls inside the range.
/// Generation is deterministic, so calling it twice with the same inputs
/// yields identical sequences.
///
/// # Examples
///
/// ```
/// use cdx_models::schedules::{DateScheduler, Frequency};
/// use cdx_core::types::Date;
///
/// let scheduler = DateScheduler::new();
/// let start = Date::from_ymd(2005, 3, 10).unwrap();
/// let end = Date::from_ymd(2005, 12, 31).unwrap();
///
/// let dates = scheduler
///     .date_list(start, end, Frequency::Quarterly, start)
///     .unwrap();
///
/// assert_eq!(dates.first(), Some(&start));
/// assert_eq!(dates.last(), Some(&end));
/// assert!(dates.windows(2).all(|w| w[0] < w[1]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DateScheduler;

impl DateScheduler {
    /// Creates a scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Returns the date list for a start/end/frequency/reference tuple.
    ///
    /// Dates step from `start` in `frequency` increments; the final date is
    /// capped at `end`. A reference date inside `[start, end]` is spliced
    /// into the sequence. Returns an empty list when `start > end` — an
    /// empty schedule is a degenerate case for the caller, not an error.
    pub fn date_list(
        &self,
        start: Date,
        end: Date,
        frequency: Frequency,
        reference_date: Date,
    ) -> Result<Vec<Date>, ScheduleError> {
        if start > end {
            return Ok(Vec::new());
        }

        let mut dates = Vec::new();
        let mut current = start;
        let mut step = 0u32;
        while current < end {
            dates.push(current);
            step += frequency.months();
            current = start
                .add_months(step)
                .map_err(|e| ScheduleError::DateOverflow {
                    reason: e.to_string(),
                })?;
        }
        dates.push(end);

        if reference_date > start && reference_date < end {
            if let Err(pos) = dates.binary_search(&reference_date) {
                dates.insert(pos, reference_date);
            }
        }

        Ok(dates)
    }
}
