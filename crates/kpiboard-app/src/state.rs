// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::Date;
use tracing::debug;

use crate::{CategoryFilter, DateRange, DateRangeState, TabKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub active_tab: TabKind,
    pub category: CategoryFilter,
    pub dates: DateRangeState,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_tab: TabKind::Overview,
            category: CategoryFilter::All,
            dates: DateRangeState::default(),
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextTab,
    PrevTab,
    SelectTab(TabKind),
    SelectCategory(CategoryFilter),
    OpenCalendar,
    PickDay(Date),
    ClearProposedRange,
    ApplyDateRange,
    CancelDateRange,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    TabChanged(TabKind),
    CategoryChanged(CategoryFilter),
    CalendarVisibilityChanged(bool),
    ProposedRangeChanged(Option<DateRange>),
    AppliedRangeChanged(Option<DateRange>),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        debug!(?command, "dispatch");
        match command {
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::SelectTab(tab) => {
                self.active_tab = tab;
                vec![AppEvent::TabChanged(tab)]
            }
            AppCommand::SelectCategory(category) => {
                let status = format!("category: {}", category.label());
                self.category = category.clone();
                vec![
                    AppEvent::CategoryChanged(category),
                    self.set_status(&status),
                ]
            }
            AppCommand::OpenCalendar => {
                self.dates.open();
                vec![
                    AppEvent::CalendarVisibilityChanged(true),
                    AppEvent::ProposedRangeChanged(self.dates.proposed),
                ]
            }
            AppCommand::PickDay(day) => {
                self.dates.pick(day);
                vec![AppEvent::ProposedRangeChanged(self.dates.proposed)]
            }
            AppCommand::ClearProposedRange => {
                self.dates.clear_proposed();
                vec![AppEvent::ProposedRangeChanged(None)]
            }
            AppCommand::ApplyDateRange => {
                self.dates.apply();
                let label = format!("range applied: {}", self.dates.trigger_label());
                vec![
                    AppEvent::AppliedRangeChanged(self.dates.applied),
                    AppEvent::CalendarVisibilityChanged(false),
                    self.set_status(&label),
                ]
            }
            AppCommand::CancelDateRange => {
                self.dates.cancel();
                vec![
                    AppEvent::CalendarVisibilityChanged(false),
                    self.set_status("range unchanged"),
                ]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = TabKind::ALL;
        let current = tabs
            .iter()
            .position(|tab| *tab == self.active_tab)
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_tab = tabs[next];
        vec![AppEvent::TabChanged(self.active_tab)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState};
    use crate::{CategoryFilter, DateRange, TabKind};
    use time::macros::date;

    #[test]
    fn defaults_match_fresh_mount() {
        let state = AppState::default();
        assert_eq!(state.active_tab, TabKind::Overview);
        assert_eq!(state.category, CategoryFilter::All);
        assert!(!state.dates.calendar_open);
        assert_eq!(state.dates.applied, Some(DateRange::initial()));
        assert_eq!(state.dates.proposed, state.dates.applied);
        assert_eq!(state.status_line, None);
    }

    #[test]
    fn tab_rotation_wraps() {
        let mut state = AppState {
            active_tab: TabKind::Details,
            ..AppState::default()
        };

        let events = state.dispatch(AppCommand::NextTab);
        assert_eq!(state.active_tab, TabKind::Overview);
        assert_eq!(events, vec![AppEvent::TabChanged(TabKind::Overview)]);

        state.dispatch(AppCommand::PrevTab);
        assert_eq!(state.active_tab, TabKind::Details);
    }

    #[test]
    fn tab_switch_round_trip_keeps_category() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SelectCategory(CategoryFilter::only(
            "Efficiency Ratios",
        )));

        state.dispatch(AppCommand::SelectTab(TabKind::Details));
        state.dispatch(AppCommand::SelectTab(TabKind::Overview));
        assert_eq!(state.category, CategoryFilter::only("Efficiency Ratios"));
    }

    #[test]
    fn select_category_updates_status() {
        let mut state = AppState::default();

        let events = state.dispatch(AppCommand::SelectCategory(CategoryFilter::only(
            "Solvency Ratios",
        )));
        assert_eq!(
            events,
            vec![
                AppEvent::CategoryChanged(CategoryFilter::only("Solvency Ratios")),
                AppEvent::StatusUpdated("category: Solvency Ratios".to_owned()),
            ]
        );

        state.dispatch(AppCommand::SelectCategory(CategoryFilter::All));
        assert_eq!(state.status_line.as_deref(), Some("category: All KPIs"));
    }

    #[test]
    fn apply_after_pick_updates_trigger_label() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenCalendar);
        state.dispatch(AppCommand::ClearProposedRange);
        state.dispatch(AppCommand::PickDay(date!(2023 - 01 - 01)));
        state.dispatch(AppCommand::PickDay(date!(2023 - 06 - 30)));

        let events = state.dispatch(AppCommand::ApplyDateRange);
        let applied = DateRange::between(date!(2023 - 01 - 01), date!(2023 - 06 - 30));
        assert_eq!(events[0], AppEvent::AppliedRangeChanged(Some(applied)));
        assert!(!state.dates.calendar_open);
        assert_eq!(state.dates.trigger_label(), "Jan 01, 2023 - Jun 30, 2023");
    }

    #[test]
    fn cancel_after_pick_leaves_applied_label() {
        let mut state = AppState::default();
        let before = state.dates.trigger_label();

        state.dispatch(AppCommand::OpenCalendar);
        state.dispatch(AppCommand::ClearProposedRange);
        state.dispatch(AppCommand::PickDay(date!(2023 - 03 - 15)));
        let events = state.dispatch(AppCommand::CancelDateRange);

        assert_eq!(state.dates.trigger_label(), before);
        assert!(!state.dates.calendar_open);
        assert_eq!(
            events,
            vec![
                AppEvent::CalendarVisibilityChanged(false),
                AppEvent::StatusUpdated("range unchanged".to_owned()),
            ]
        );
    }

    #[test]
    fn single_day_apply_has_no_separator() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenCalendar);
        state.dispatch(AppCommand::ClearProposedRange);
        state.dispatch(AppCommand::PickDay(date!(2023 - 03 - 15)));
        state.dispatch(AppCommand::ApplyDateRange);
        assert_eq!(state.dates.trigger_label(), "Mar 15, 2023");
    }

    #[test]
    fn applying_cleared_range_shows_placeholder() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenCalendar);
        state.dispatch(AppCommand::ClearProposedRange);
        state.dispatch(AppCommand::ApplyDateRange);
        assert_eq!(state.dates.trigger_label(), "Pick a date range");
    }

    #[test]
    fn date_commands_never_touch_category() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SelectCategory(CategoryFilter::only(
            "Market Value Ratios",
        )));
        state.dispatch(AppCommand::OpenCalendar);
        state.dispatch(AppCommand::PickDay(date!(2023 - 02 - 02)));
        state.dispatch(AppCommand::ApplyDateRange);
        assert_eq!(state.category, CategoryFilter::only("Market Value Ratios"));
    }

    #[test]
    fn clear_status() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetStatus("hello".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("hello"));

        let events = state.dispatch(AppCommand::ClearStatus);
        assert_eq!(events, vec![AppEvent::StatusCleared]);
        assert_eq!(state.status_line, None);
    }
}
