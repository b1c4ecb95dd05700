// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::macros::{date, format_description};
use time::{Date, Month};

pub const RANGE_PLACEHOLDER: &str = "Pick a date range";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: Date,
    pub to: Option<Date>,
}

impl DateRange {
    pub const fn single(from: Date) -> Self {
        Self { from, to: None }
    }

    pub const fn between(from: Date, to: Date) -> Self {
        Self { from, to: Some(to) }
    }

    /// The range the calendar starts with before anyone picks: all of 2023.
    pub const fn initial() -> Self {
        Self::between(date!(2023 - 01 - 01), date!(2023 - 12 - 31))
    }

    pub fn contains(&self, day: Date) -> bool {
        match self.to {
            Some(to) => self.from <= day && day <= to,
            None => self.from == day,
        }
    }

    pub fn label(&self) -> String {
        match self.to {
            Some(to) => format!("{} - {}", format_day(self.from), format_day(to)),
            None => format_day(self.from),
        }
    }
}

/// Range-mode calendar click: starts, extends, flips, or clears a range so
/// that `from` never ends up after `to`.
pub fn add_day_to_range(day: Date, range: Option<DateRange>) -> Option<DateRange> {
    let Some(range) = range else {
        return Some(DateRange::single(day));
    };

    match range.to {
        None if day < range.from => Some(DateRange::between(day, range.from)),
        None => Some(DateRange::between(range.from, day)),
        Some(to) if day == to && day == range.from => None,
        Some(to) if day == to => Some(DateRange::single(to)),
        Some(_) if day == range.from => None,
        Some(to) if day < range.from => Some(DateRange::between(day, to)),
        Some(_) => Some(DateRange::between(range.from, day)),
    }
}

pub fn range_label(range: Option<&DateRange>) -> String {
    range.map_or_else(|| RANGE_PLACEHOLDER.to_owned(), DateRange::label)
}

pub fn format_day(day: Date) -> String {
    day.format(&format_description!("[month repr:short] [day], [year]"))
        .unwrap_or_else(|_| day.to_string())
}

pub fn parse_day(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), &format_description!("[year]-[month]-[day]")).ok()
}

pub fn first_of_month(day: Date) -> Date {
    day.replace_day(1).unwrap_or(day)
}

pub fn shift_date_by_days(day: Date, days: i64) -> Option<Date> {
    day.checked_add(time::Duration::days(days))
}

pub fn shift_date_by_years(day: Date, years: i32) -> Option<Date> {
    shift_date_by_months(day, years.saturating_mul(12))
}

pub fn shift_date_by_months(day: Date, months: i32) -> Option<Date> {
    let base_month = i32::from(day.month() as u8);
    let total_month = base_month - 1 + months;
    let year = day.year() + total_month.div_euclid(12);
    let month = Month::try_from((total_month.rem_euclid(12) + 1) as u8).ok()?;
    let clamped_day = day.day().min(month.length(year));
    Date::from_calendar_date(year, month, clamped_day).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeState {
    pub proposed: Option<DateRange>,
    pub applied: Option<DateRange>,
    pub calendar_open: bool,
    pub reset_on_open: bool,
}

impl Default for DateRangeState {
    fn default() -> Self {
        Self::starting_with(Some(DateRange::initial()))
    }
}

impl DateRangeState {
    pub fn starting_with(range: Option<DateRange>) -> Self {
        Self {
            proposed: range,
            applied: range,
            calendar_open: false,
            reset_on_open: false,
        }
    }

    pub fn trigger_label(&self) -> String {
        range_label(self.applied.as_ref())
    }

    pub fn open(&mut self) {
        if self.reset_on_open {
            self.proposed = self.applied;
        }
        self.calendar_open = true;
    }

    pub fn pick(&mut self, day: Date) {
        self.proposed = add_day_to_range(day, self.proposed);
    }

    pub fn clear_proposed(&mut self) {
        self.proposed = None;
    }

    pub fn apply(&mut self) {
        self.applied = self.proposed;
        self.calendar_open = false;
    }

    pub fn cancel(&mut self) {
        self.calendar_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DateRange, DateRangeState, RANGE_PLACEHOLDER, add_day_to_range, format_day, parse_day,
        range_label, shift_date_by_months, shift_date_by_years,
    };
    use time::macros::date;

    #[test]
    fn label_formats_full_range() {
        let range = DateRange::between(date!(2023 - 01 - 01), date!(2023 - 06 - 30));
        assert_eq!(range.label(), "Jan 01, 2023 - Jun 30, 2023");
    }

    #[test]
    fn label_formats_single_day_without_separator() {
        let range = DateRange::single(date!(2023 - 03 - 15));
        assert_eq!(range_label(Some(&range)), "Mar 15, 2023");
    }

    #[test]
    fn missing_range_uses_placeholder() {
        assert_eq!(range_label(None), RANGE_PLACEHOLDER);
        assert_eq!(range_label(None), "Pick a date range");
    }

    #[test]
    fn format_day_pads_day_of_month() {
        assert_eq!(format_day(date!(2024 - 02 - 09)), "Feb 09, 2024");
        assert_eq!(format_day(date!(2024 - 12 - 31)), "Dec 31, 2024");
    }

    #[test]
    fn add_day_starts_and_completes_a_range() {
        let started = add_day_to_range(date!(2023 - 01 - 01), None);
        assert_eq!(started, Some(DateRange::single(date!(2023 - 01 - 01))));

        let completed = add_day_to_range(date!(2023 - 06 - 30), started);
        assert_eq!(
            completed,
            Some(DateRange::between(
                date!(2023 - 01 - 01),
                date!(2023 - 06 - 30)
            ))
        );
    }

    #[test]
    fn add_day_before_open_start_flips_order() {
        let range = add_day_to_range(
            date!(2023 - 01 - 10),
            Some(DateRange::single(date!(2023 - 02 - 01))),
        );
        assert_eq!(
            range,
            Some(DateRange::between(
                date!(2023 - 01 - 10),
                date!(2023 - 02 - 01)
            ))
        );
    }

    #[test]
    fn add_day_on_open_start_makes_one_day_range() {
        let day = date!(2023 - 03 - 15);
        let range = add_day_to_range(day, Some(DateRange::single(day)));
        assert_eq!(range, Some(DateRange::between(day, day)));
    }

    #[test]
    fn add_day_on_closed_range_edges() {
        let from = date!(2023 - 01 - 01);
        let to = date!(2023 - 12 - 31);
        let full = Some(DateRange::between(from, to));

        assert_eq!(add_day_to_range(to, full), Some(DateRange::single(to)));
        assert_eq!(add_day_to_range(from, full), None);
        assert_eq!(
            add_day_to_range(date!(2022 - 12 - 01), full),
            Some(DateRange::between(date!(2022 - 12 - 01), to))
        );
        assert_eq!(
            add_day_to_range(date!(2023 - 06 - 30), full),
            Some(DateRange::between(from, date!(2023 - 06 - 30)))
        );

        let day = date!(2023 - 05 - 05);
        assert_eq!(
            add_day_to_range(day, Some(DateRange::between(day, day))),
            None
        );
    }

    #[test]
    fn contains_respects_open_and_closed_ranges() {
        let closed = DateRange::between(date!(2023 - 01 - 01), date!(2023 - 01 - 31));
        assert!(closed.contains(date!(2023 - 01 - 15)));
        assert!(closed.contains(date!(2023 - 01 - 31)));
        assert!(!closed.contains(date!(2023 - 02 - 01)));

        let open = DateRange::single(date!(2023 - 01 - 01));
        assert!(open.contains(date!(2023 - 01 - 01)));
        assert!(!open.contains(date!(2023 - 01 - 02)));
    }

    #[test]
    fn apply_copies_proposed_and_closes() {
        let mut dates = DateRangeState::default();
        dates.open();
        dates.clear_proposed();
        dates.pick(date!(2023 - 01 - 01));
        dates.pick(date!(2023 - 06 - 30));
        dates.apply();

        assert!(!dates.calendar_open);
        assert_eq!(dates.trigger_label(), "Jan 01, 2023 - Jun 30, 2023");
        assert_eq!(dates.proposed, dates.applied);
    }

    #[test]
    fn cancel_keeps_applied_and_leaves_proposed_diverged() {
        let mut dates = DateRangeState::default();
        let before = dates.trigger_label();
        dates.open();
        dates.clear_proposed();
        dates.pick(date!(2023 - 03 - 15));
        dates.cancel();

        assert!(!dates.calendar_open);
        assert_eq!(dates.trigger_label(), before);
        assert_eq!(
            dates.proposed,
            Some(DateRange::single(date!(2023 - 03 - 15)))
        );
        assert_ne!(dates.proposed, dates.applied);

        dates.open();
        assert_eq!(
            dates.proposed,
            Some(DateRange::single(date!(2023 - 03 - 15)))
        );
    }

    #[test]
    fn reset_on_open_restores_applied_range() {
        let mut dates = DateRangeState {
            reset_on_open: true,
            ..DateRangeState::default()
        };
        dates.open();
        dates.clear_proposed();
        dates.cancel();
        assert_ne!(dates.proposed, dates.applied);

        dates.open();
        assert_eq!(dates.proposed, dates.applied);
        assert_eq!(dates.proposed, Some(DateRange::initial()));
    }

    #[test]
    fn parse_day_accepts_iso_dates_only() {
        assert_eq!(parse_day("2023-06-30"), Some(date!(2023 - 06 - 30)));
        assert_eq!(parse_day(" 2023-06-30 "), Some(date!(2023 - 06 - 30)));
        assert_eq!(parse_day("06/30/2023"), None);
        assert_eq!(parse_day("2023-02-30"), None);
    }

    #[test]
    fn month_shift_clamps_to_month_end() {
        assert_eq!(
            shift_date_by_months(date!(2023 - 01 - 31), 1),
            Some(date!(2023 - 02 - 28))
        );
        assert_eq!(
            shift_date_by_months(date!(2024 - 01 - 31), 1),
            Some(date!(2024 - 02 - 29))
        );
        assert_eq!(
            shift_date_by_months(date!(2023 - 03 - 31), 1),
            Some(date!(2023 - 04 - 30))
        );
        assert_eq!(
            shift_date_by_months(date!(2023 - 12 - 31), -10),
            Some(date!(2023 - 02 - 28))
        );
        assert_eq!(
            shift_date_by_months(date!(2023 - 01 - 15), -1),
            Some(date!(2022 - 12 - 15))
        );
        assert_eq!(
            shift_date_by_years(date!(2024 - 02 - 29), 1),
            Some(date!(2025 - 02 - 28))
        );
    }
}
