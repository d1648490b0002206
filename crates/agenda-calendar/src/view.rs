//! Visible ranges, padded query windows and navigation for calendar views.

use chrono::{Datelike, Days, Months, NaiveDate, TimeDelta};
use chrono_tz::Tz;

use agenda_core::error::{CoreError, CoreResult};
use agenda_core::types::CalendarView;

use crate::bucket::{end_of_day, start_of_day, week_start};
use crate::window::TimeWindow;

/// Direction for view navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// ## Summary
/// First and last local date shown by `view` around `anchor`.
///
/// Day shows the anchor itself, week the Monday-to-Sunday week containing
/// it, month the whole calendar month.
#[must_use]
pub fn visible_range(view: CalendarView, anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    match view {
        CalendarView::Day => (anchor, anchor),
        CalendarView::Week => {
            let first = week_start(anchor);
            (first, first.checked_add_days(Days::new(6)).unwrap_or(first))
        }
        CalendarView::Month => {
            let first = anchor.with_day(1).unwrap_or(anchor);
            let last = first
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(anchor);
            (first, last)
        }
    }
}

/// ## Summary
/// Window to query storage with for `view` around `anchor`.
///
/// Runs from local midnight of the first visible day to the last instant of
/// the last visible day, padded by `buffer_days` on each side so multi-day
/// and recurring events near the edges are not missed.
///
/// ## Errors
/// Returns `CoreError::InvalidInput` for a negative buffer.
pub fn query_window(
    view: CalendarView,
    anchor: NaiveDate,
    tz: &Tz,
    buffer_days: i64,
) -> CoreResult<TimeWindow> {
    if buffer_days < 0 {
        return Err(CoreError::InvalidInput(format!(
            "buffer_days must not be negative, got {buffer_days}"
        )));
    }
    let (first, last) = visible_range(view, anchor);
    let pad = TimeDelta::days(buffer_days);
    let window = TimeWindow::new(start_of_day(first, tz) - pad, end_of_day(last, tz) + pad)?;

    tracing::trace!(
        view = %view,
        anchor = %anchor,
        start = %window.start(),
        end = %window.end(),
        "Computed query window"
    );
    Ok(window)
}

/// ## Summary
/// Moves `anchor` one view-length in `direction`.
///
/// Months clamp to the last day of a shorter target month.
#[must_use]
pub fn navigate(view: CalendarView, anchor: NaiveDate, direction: Direction) -> NaiveDate {
    let moved = match (view, direction) {
        (CalendarView::Day, Direction::Previous) => anchor.checked_sub_days(Days::new(1)),
        (CalendarView::Day, Direction::Next) => anchor.checked_add_days(Days::new(1)),
        (CalendarView::Week, Direction::Previous) => anchor.checked_sub_days(Days::new(7)),
        (CalendarView::Week, Direction::Next) => anchor.checked_add_days(Days::new(7)),
        (CalendarView::Month, Direction::Previous) => anchor.checked_sub_months(Months::new(1)),
        (CalendarView::Month, Direction::Next) => anchor.checked_add_months(Months::new(1)),
    };
    moved.unwrap_or(anchor)
}
