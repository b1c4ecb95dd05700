// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use kpiboard_app::{
    AppCommand, AppEvent, AppState, Catalogue, CatalogueError, CategoryFilter, DateRange, Kpi,
    TabKind, TrendDelta, filter_kpis, range_label,
};
use time::{Date, Month};

fn day(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid test date")
}

fn record(name: &str, category: &str) -> Kpi {
    Kpi {
        name: name.to_owned(),
        value: "1".to_owned(),
        trend: Some(TrendDelta::up("1%")),
        category: category.to_owned(),
        meaning: String::new(),
        formula: String::new(),
        example: String::new(),
    }
}

#[test]
fn every_builtin_category_filter_partitions_the_catalogue() {
    let catalogue = Catalogue::builtin();
    let mut total = 0;
    for category in catalogue.categories() {
        let filtered = catalogue.filter(&CategoryFilter::only(category));
        assert!(!filtered.is_empty(), "{category}");
        assert!(filtered.iter().all(|kpi| kpi.category == category));
        total += filtered.len();
    }
    assert_eq!(total, catalogue.len());
}

#[test]
fn filter_keeps_relative_order_for_interleaved_categories() -> Result<(), CatalogueError> {
    let kpis = vec![
        record("a", "x"),
        record("b", "y"),
        record("c", "x"),
        record("d", "y"),
        record("e", "x"),
    ];
    let catalogue = Catalogue::new(kpis.clone())?;

    let names = catalogue
        .filter(&CategoryFilter::only("x"))
        .iter()
        .map(|kpi| kpi.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["a", "c", "e"]);
    assert_eq!(catalogue.categories(), vec!["x", "y"]);

    let all = filter_kpis(&kpis, &CategoryFilter::All);
    assert_eq!(all.len(), kpis.len());
    assert!(filter_kpis(&kpis, &CategoryFilter::only("z")).is_empty());
    Ok(())
}

#[test]
fn duplicate_name_is_reported_by_name() {
    let error = Catalogue::new(vec![record("same", "x"), record("same", "y")])
        .expect_err("duplicate names should fail");
    assert_eq!(error, CatalogueError::DuplicateName("same".to_owned()));
    assert!(error.to_string().contains("same"));
}

#[test]
fn full_session_keeps_filter_and_dates_independent() {
    let mut state = AppState::default();

    state.dispatch(AppCommand::SelectCategory(CategoryFilter::only(
        "Profitability Ratios",
    )));
    state.dispatch(AppCommand::NextTab);
    assert_eq!(state.active_tab, TabKind::Details);

    let events = state.dispatch(AppCommand::OpenCalendar);
    assert_eq!(events[0], AppEvent::CalendarVisibilityChanged(true));
    state.dispatch(AppCommand::ClearProposedRange);
    state.dispatch(AppCommand::PickDay(day(2023, Month::June, 30)));
    state.dispatch(AppCommand::PickDay(day(2023, Month::January, 1)));
    state.dispatch(AppCommand::ApplyDateRange);

    assert_eq!(
        state.dates.applied,
        Some(DateRange::between(
            day(2023, Month::January, 1),
            day(2023, Month::June, 30)
        ))
    );
    assert_eq!(state.category, CategoryFilter::only("Profitability Ratios"));

    state.dispatch(AppCommand::PrevTab);
    assert_eq!(state.active_tab, TabKind::Overview);
    assert_eq!(Catalogue::builtin().filter(&state.category).len(), 6);
}

#[test]
fn reopening_after_cancel_shows_abandoned_edits() {
    let mut state = AppState::default();
    state.dispatch(AppCommand::OpenCalendar);
    state.dispatch(AppCommand::ClearProposedRange);
    state.dispatch(AppCommand::CancelDateRange);

    assert_eq!(
        range_label(state.dates.applied.as_ref()),
        "Jan 01, 2023 - Dec 31, 2023"
    );
    state.dispatch(AppCommand::OpenCalendar);
    assert_eq!(state.dates.proposed, None);
}
