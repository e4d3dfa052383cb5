//! Scheduling aggregation: month grids and per-day agendas derived from a
//! flat booking collection plus the set of spaces currently in scope.

use std::collections::HashSet;

use abi::{Booking, Error, Space};
use chrono::{Datelike, NaiveDate};

/// The set of space ids included in calendar and agenda views. Defaults to
/// every known space; the UI narrows it per space or flips it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceSelection {
    included: HashSet<String>,
}

impl SpaceSelection {
    /// Selection covering every known space, the initial view state.
    pub fn all(spaces: &[Space]) -> Self {
        Self {
            included: spaces.iter().map(|s| s.id.clone()).collect(),
        }
    }

    pub fn contains(&self, space_id: &str) -> bool {
        self.included.contains(space_id)
    }

    /// Add or remove a single space from the scope.
    pub fn toggle(&mut self, space_id: &str) {
        if !self.included.remove(space_id) {
            self.included.insert(space_id.to_string());
        }
    }

    /// The "select all" toggle flips direction based on the current state:
    /// everything selected clears the set, anything else selects the full
    /// list. Not a fixed always-select-all.
    pub fn toggle_all(&mut self, spaces: &[Space]) {
        if self.is_all(spaces) {
            self.included.clear();
        } else {
            self.included = spaces.iter().map(|s| s.id.clone()).collect();
        }
    }

    pub fn is_all(&self, spaces: &[Space]) -> bool {
        self.included.len() == spaces.len()
    }

    pub fn len(&self) -> usize {
        self.included.len()
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }
}

/// Month the calendar is showing. `month0` is zero-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    pub month0: u32,
}

impl MonthCursor {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn prev(self) -> Self {
        if self.month0 == 0 {
            Self {
                year: self.year - 1,
                month0: 11,
            }
        } else {
            Self {
                year: self.year,
                month0: self.month0 - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month0 == 11 {
            Self {
                year: self.year + 1,
                month0: 0,
            }
        } else {
            Self {
                year: self.year,
                month0: self.month0 + 1,
            }
        }
    }
}

/// One calendar day with every scoped booking starting on it.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    /// Day of month, 1-based.
    pub day: u32,
    pub date: NaiveDate,
    pub bookings: Vec<Booking>,
}

impl DayCell {
    /// Compact rendering shows at most `limit` entries plus an overflow
    /// marker. Presentation only: the full set stays in `bookings`.
    pub fn preview(&self, limit: usize) -> (&[Booking], bool) {
        let shown = limit.min(self.bookings.len());
        (&self.bookings[..shown], self.bookings.len() > limit)
    }
}

/// A month laid out for a 7-column grid: `leading_blanks` empty cells (the
/// weekday index of day 1, 0 = Sunday) followed by one cell per day.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month0: u32,
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

impl MonthGrid {
    pub fn total_cells(&self) -> usize {
        self.leading_blanks as usize + self.days.len()
    }
}

/// Build the month grid for `(year, month0)`. A booking lands in the cell
/// matching the calendar-day portion of its start, regardless of the time
/// of day, and only if its space is in scope.
pub fn month_grid(
    bookings: &[Booking],
    selection: &SpaceSelection,
    year: i32,
    month0: u32,
) -> Result<MonthGrid, Error> {
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1).ok_or(Error::InvalidMonth(month0))?;
    let (next_year, next_month0) = if month0 == 11 {
        (year + 1, 0)
    } else {
        (year, month0 + 1)
    };
    let next_first =
        NaiveDate::from_ymd_opt(next_year, next_month0 + 1, 1).ok_or(Error::InvalidMonth(month0))?;
    let days_in_month = next_first.signed_duration_since(first).num_days() as u32;

    let scoped: Vec<&Booking> = bookings
        .iter()
        .filter(|b| selection.contains(&b.space_id))
        .collect();

    let mut days = Vec::with_capacity(days_in_month as usize);
    for day in 1..=days_in_month {
        let date = first + chrono::Duration::days((day - 1) as i64);
        let cell_bookings = scoped
            .iter()
            .filter(|b| b.start.date_naive() == date)
            .map(|b| (*b).clone())
            .collect();
        days.push(DayCell {
            day,
            date,
            bookings: cell_bookings,
        });
    }

    Ok(MonthGrid {
        year,
        month0,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}

/// Scoped bookings starting on `date`, ascending by start time. The sort is
/// stable, so bookings starting at the same instant keep collection order.
pub fn day_agenda(bookings: &[Booking], selection: &SpaceSelection, date: NaiveDate) -> Vec<Booking> {
    let mut agenda: Vec<Booking> = bookings
        .iter()
        .filter(|b| selection.contains(&b.space_id) && b.start.date_naive() == date)
        .cloned()
        .collect();
    agenda.sort_by_key(|b| b.start);
    agenda
}

#[cfg(test)]
mod test {
    use super::*;

    fn make_booking(id: &str, space_id: &str, start: &str) -> Booking {
        let start: chrono::DateTime<chrono::Utc> = start.parse().unwrap();
        let mut booking = Booking::new_pending(
            space_id,
            "1",
            start,
            start + chrono::Duration::hours(2),
            "Carlos Santos",
            format!("Event {id}"),
        );
        booking.id = id.to_string();
        booking
    }

    fn spaces(ids: &[&str]) -> Vec<Space> {
        ids.iter()
            .map(|id| {
                let mut space = Space::new(format!("Space {id}"), "Lisboa", 10);
                space.id = id.to_string();
                space
            })
            .collect()
    }

    #[test]
    fn grid_should_have_leading_blanks_plus_days() {
        let all = SpaceSelection::all(&spaces(&["1"]));
        // March 2024: 31 days, the 1st is a Friday
        let grid = month_grid(&[], &all, 2024, 2).unwrap();
        assert_eq!(grid.leading_blanks, 5);
        assert_eq!(grid.days.len(), 31);
        assert_eq!(grid.total_cells(), 36);

        // February 2024 is a leap month starting on a Thursday
        let grid = month_grid(&[], &all, 2024, 1).unwrap();
        assert_eq!(grid.leading_blanks, 4);
        assert_eq!(grid.days.len(), 29);

        // December wraps the year when computing month length
        let grid = month_grid(&[], &all, 2023, 11).unwrap();
        assert_eq!(grid.days.len(), 31);

        assert_eq!(month_grid(&[], &all, 2024, 12), Err(Error::InvalidMonth(12)));
    }

    #[test]
    fn same_day_different_hours_should_share_a_cell() {
        let bookings = vec![
            make_booking("1", "1", "2024-03-05T09:00:00Z"),
            make_booking("2", "1", "2024-03-05T18:30:00Z"),
            make_booking("3", "1", "2024-03-06T09:00:00Z"),
        ];
        let all = SpaceSelection::all(&spaces(&["1"]));
        let grid = month_grid(&bookings, &all, 2024, 2).unwrap();
        assert_eq!(grid.days[4].bookings.len(), 2);
        assert_eq!(grid.days[5].bookings.len(), 1);
    }

    #[test]
    fn space_scoping_should_hide_other_spaces() {
        // two bookings on spaces "1" and "2", both starting 2024-03-05
        let bookings = vec![
            make_booking("1", "1", "2024-03-05T09:00:00Z"),
            make_booking("2", "2", "2024-03-05T10:00:00Z"),
        ];
        let mut selection = SpaceSelection::all(&spaces(&["1", "2"]));
        selection.toggle("2");
        let grid = month_grid(&bookings, &selection, 2024, 2).unwrap();
        assert_eq!(grid.days[4].bookings.len(), 1);
        assert_eq!(grid.days[4].bookings[0].id, "1");
    }

    #[test]
    fn toggle_all_should_flip_on_current_state() {
        let spaces = spaces(&["1", "2", "3"]);
        let mut selection = SpaceSelection::all(&spaces);
        assert!(selection.is_all(&spaces));

        // everything selected: flip clears
        selection.toggle_all(&spaces);
        assert!(selection.is_empty());

        // partial selection: flip selects everything
        selection.toggle("2");
        selection.toggle_all(&spaces);
        assert!(selection.is_all(&spaces));
    }

    #[test]
    fn day_agenda_should_sort_ascending_and_stable() {
        let bookings = vec![
            make_booking("late", "1", "2024-03-05T18:00:00Z"),
            make_booking("tie-a", "1", "2024-03-05T09:00:00Z"),
            make_booking("tie-b", "1", "2024-03-05T09:00:00Z"),
            make_booking("other-day", "1", "2024-03-06T08:00:00Z"),
        ];
        let all = SpaceSelection::all(&spaces(&["1"]));
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let agenda = day_agenda(&bookings, &all, date);
        let ids: Vec<&str> = agenda.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["tie-a", "tie-b", "late"]);
    }

    #[test]
    fn month_cursor_should_wrap_years() {
        let january = MonthCursor { year: 2024, month0: 0 };
        assert_eq!(january.prev(), MonthCursor { year: 2023, month0: 11 });
        assert_eq!(january.prev().next(), january);

        let december = MonthCursor { year: 2024, month0: 11 };
        assert_eq!(december.next(), MonthCursor { year: 2025, month0: 0 });

        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(
            MonthCursor::from_date(today),
            MonthCursor { year: 2024, month0: 2 }
        );
    }

    #[test]
    fn preview_should_cap_entries_and_flag_overflow() {
        let bookings: Vec<Booking> = (0..6)
            .map(|i| make_booking(&i.to_string(), "1", "2024-03-05T09:00:00Z"))
            .collect();
        let cell = DayCell {
            day: 5,
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            bookings,
        };
        let (shown, overflow) = cell.preview(4);
        assert_eq!(shown.len(), 4);
        assert!(overflow);

        let (shown, overflow) = cell.preview(6);
        assert_eq!(shown.len(), 6);
        assert!(!overflow);
    }
}
