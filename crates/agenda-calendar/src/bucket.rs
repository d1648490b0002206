//! ## Summary
//! Day, hour and week bucketing of expanded occurrences.
//!
//! A cell is a closed span `[start, next boundary - 1ms]` computed in the
//! viewer's zone. Membership is the same inclusive overlap test the expander
//! uses. All-day occurrences are compared on whole local days and never land
//! in hour cells; [`DayAgenda`] gives them their own lane instead.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use crate::model::Occurrence;
use crate::window::overlaps;

/// Granularity of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Day,
    Hour,
}

/// One calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub kind: CellKind,
    /// Local date the cell belongs to.
    pub date: NaiveDate,
    /// Local hour for hour cells.
    pub hour: Option<u32>,
    pub start: DateTime<Utc>,
    /// Inclusive last instant.
    pub end: DateTime<Utc>,
    #[serde(skip)]
    tz: Tz,
}

/// ## Summary
/// First instant of `date` in `tz`.
///
/// Where local midnight falls in a DST gap, the first existing local hour of
/// the day is used.
#[must_use]
pub fn start_of_day(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=3)
        .find_map(|h| {
            tz.from_local_datetime(&(midnight + TimeDelta::hours(h)))
                .earliest()
        })
        .map_or_else(|| midnight.and_utc(), |dt| dt.with_timezone(&Utc))
}

/// Last instant (millisecond precision) of `date` in `tz`.
#[must_use]
pub fn end_of_day(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
    start_of_day(next, tz) - TimeDelta::milliseconds(1)
}

/// Monday of the week containing `date`.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

impl Cell {
    /// Whole-day cell for `date` in `tz`.
    #[must_use]
    pub fn day(date: NaiveDate, tz: &Tz) -> Self {
        Self {
            kind: CellKind::Day,
            date,
            hour: None,
            start: start_of_day(date, tz),
            end: end_of_day(date, tz),
            tz: *tz,
        }
    }

    /// ## Summary
    /// Tests whether an occurrence belongs to this cell.
    ///
    /// Timed occurrences use their exact span. All-day occurrences are widened
    /// to whole local days and are never members of hour cells.
    #[must_use]
    pub fn contains(&self, occurrence: &Occurrence<'_>) -> bool {
        if !occurrence.event.is_all_day {
            return overlaps(occurrence.start_time, occurrence.end_time, self.start, self.end);
        }
        if self.kind == CellKind::Hour {
            return false;
        }
        let first = occurrence.start_time.with_timezone(&self.tz).date_naive();
        let last = occurrence.end_time.with_timezone(&self.tz).date_naive();
        first <= self.date && last >= self.date
    }
}

/// ## Summary
/// The hour cells of `date` in `tz`.
///
/// Hours that do not exist locally (spring-forward gap) are left out; a
/// repeated hour (fall-back) forms a single, longer cell.
#[must_use]
pub fn hour_cells(date: NaiveDate, tz: &Tz) -> Vec<Cell> {
    let midnight = date.and_time(NaiveTime::MIN);
    let starts: Vec<(u32, DateTime<Utc>)> = (0u32..24)
        .filter_map(|h| {
            tz.from_local_datetime(&(midnight + TimeDelta::hours(i64::from(h))))
                .earliest()
                .map(|dt| (h, dt.with_timezone(&Utc)))
        })
        .collect();

    let day_end = end_of_day(date, tz);
    starts
        .iter()
        .enumerate()
        .map(|(i, (hour, start))| {
            let end = starts
                .get(i + 1)
                .map_or(day_end, |(_, next)| *next - TimeDelta::milliseconds(1));
            Cell {
                kind: CellKind::Hour,
                date,
                hour: Some(*hour),
                start: *start,
                end,
                tz: *tz,
            }
        })
        .collect()
}

/// Seven day cells, Monday first, for the week containing `date`.
#[must_use]
pub fn week_cells(date: NaiveDate, tz: &Tz) -> Vec<Cell> {
    week_start(date)
        .iter_days()
        .take(7)
        .map(|d| Cell::day(d, tz))
        .collect()
}

/// One day cell for every day of the month containing `date`.
#[must_use]
pub fn month_cells(date: NaiveDate, tz: &Tz) -> Vec<Cell> {
    let first = date.with_day(1).unwrap_or(date);
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .map(|d| Cell::day(d, tz))
        .collect()
}

/// Occurrences belonging to `cell`, in input order.
#[must_use]
pub fn bucket<'o, 'a>(occurrences: &'o [Occurrence<'a>], cell: &Cell) -> Vec<&'o Occurrence<'a>> {
    occurrences.iter().filter(|o| cell.contains(o)).collect()
}

/// Occurrences of one hour of a day view.
#[derive(Debug, Clone)]
pub struct HourSlot<'o, 'a> {
    pub cell: Cell,
    pub occurrences: Vec<&'o Occurrence<'a>>,
}

/// A day view: an all-day lane plus one slot per local hour.
#[derive(Debug, Clone)]
pub struct DayAgenda<'o, 'a> {
    pub day: Cell,
    pub all_day: Vec<&'o Occurrence<'a>>,
    pub hours: Vec<HourSlot<'o, 'a>>,
}

impl<'o, 'a> DayAgenda<'o, 'a> {
    /// ## Summary
    /// Buckets `occurrences` into the day `date` in `tz`.
    ///
    /// A timed occurrence appears in every hour slot it overlaps.
    #[must_use]
    pub fn build(occurrences: &'o [Occurrence<'a>], date: NaiveDate, tz: &Tz) -> Self {
        let day = Cell::day(date, tz);
        let members = bucket(occurrences, &day);
        let (all_day, timed): (Vec<_>, Vec<_>) =
            members.into_iter().partition(|o| o.event.is_all_day);

        let hours = hour_cells(date, tz)
            .into_iter()
            .map(|cell| HourSlot {
                occurrences: timed.iter().copied().filter(|o| cell.contains(o)).collect(),
                cell,
            })
            .collect();

        Self {
            day,
            all_day,
            hours,
        }
    }
}
