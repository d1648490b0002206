//! Single recurrence steps.
//!
//! Month and year steps keep the day of month and clamp it to the last valid
//! day when the target month is shorter (Jan 31 -> Feb 28/29). Callers walk
//! from the previous candidate, so a clamped day sticks: Jan 31 -> Feb 29 ->
//! Mar 29. Steps operate on the UTC wall clock.

use chrono::{DateTime, Months, NaiveTime, TimeDelta, Utc};

use agenda_core::types::RecurrenceType;

/// ## Summary
/// Computes the next candidate start after `current`.
///
/// Returns `None` for non-repeating kinds and when the result would leave
/// chrono's representable range.
#[must_use]
pub fn advance(current: DateTime<Utc>, kind: RecurrenceType) -> Option<DateTime<Utc>> {
    match kind {
        RecurrenceType::Daily => current.checked_add_signed(TimeDelta::days(1)),
        RecurrenceType::Weekly => current.checked_add_signed(TimeDelta::weeks(1)),
        RecurrenceType::Monthly => current.checked_add_months(Months::new(1)),
        RecurrenceType::Yearly => current.checked_add_months(Months::new(12)),
        RecurrenceType::None | RecurrenceType::Unrecognized => None,
    }
}

/// ## Summary
/// Last instant on which a repeat may start, given a stored recurrence end.
///
/// An end at exactly UTC midnight carries no time of day and names the whole
/// day, so repeats starting on that day are kept. Any other end is used as
/// stored.
#[must_use]
pub fn recurrence_until(end: DateTime<Utc>) -> DateTime<Utc> {
    if end.time() != NaiveTime::MIN {
        return end;
    }
    end.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .map_or(end, |naive| naive.and_utc())
}
