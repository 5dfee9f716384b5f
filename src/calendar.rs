//! Data-driven month view.
//!
//! The grid is plain data (date plus highlight flag per cell); a renderer
//! binds a single "day selected" handler keyed by date.

use std::fmt::Write as _;

use chrono::{Datelike, Months, NaiveDate};

use crate::constants::MONTH_TITLE_FORMAT;
use crate::store::ReviewPlan;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A displayed month, always anchored on its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// The previous month; stays put at the start of the calendar.
    pub fn prev(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// The next month; stays put at the end of the calendar.
    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => next.signed_duration_since(self.first).num_days() as u32,
            None => 31,
        }
    }

    /// Date of day-of-month `day`, if the month has it.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    pub fn title(&self) -> String {
        self.first.format(MONTH_TITLE_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub has_topics: bool,
}

/// Sunday-first weeks of a month; `None` pads days outside the month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub cursor: MonthCursor,
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

impl MonthView {
    pub fn build(cursor: MonthCursor, plan: &ReviewPlan) -> Self {
        let mut weeks = Vec::new();
        let mut week: [Option<DayCell>; 7] = [None; 7];
        let mut col = cursor.first_day().weekday().num_days_from_sunday() as usize;

        for day in 1..=cursor.days_in_month() {
            let Some(date) = cursor.day(day) else {
                break;
            };
            week[col] = Some(DayCell {
                date,
                has_topics: plan.has_topics(date),
            });
            col += 1;
            if col == 7 {
                weeks.push(week);
                week = [None; 7];
                col = 0;
            }
        }
        if col > 0 {
            weeks.push(week);
        }

        Self { cursor, weeks }
    }

    pub fn cells(&self) -> impl Iterator<Item = DayCell> + '_ {
        self.weeks.iter().flat_map(|week| week.iter().flatten().copied())
    }

    /// Text grid; days with topics are marked with `*`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:^35}", self.cursor.title());
        for label in WEEKDAY_LABELS {
            let _ = write!(out, "{label:>5}");
        }
        out.push('\n');

        for week in &self.weeks {
            for cell in week {
                match cell {
                    Some(cell) => {
                        let mark = if cell.has_topics { '*' } else { ' ' };
                        let _ = write!(out, "{:>4}{mark}", cell.date.day());
                    }
                    None => out.push_str("     "),
                }
            }
            out.push('\n');
        }
        out
    }
}
