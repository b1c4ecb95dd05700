// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use kpiboard_app::{
    AppCommand, AppEvent, AppState, CHART_SUBTITLE, CHART_TITLE, Catalogue, CategoryFilter,
    DateRange, Kpi, MonthlyFigures, Series, TabKind, Trend, first_of_month, format_day,
    range_label, shift_date_by_days, shift_date_by_months, shift_date_by_years,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs,
    Wrap,
};
use std::io;
use std::time::{Duration, Instant};
use time::{Date, OffsetDateTime};
use tracing::{debug, info};

const APP_TITLE: &str = "Comprehensive Business KPI Dashboard";
const INFO_MARK: &str = "(i)";
const CARD_HEIGHT: u16 = 5;
const CHART_HEIGHT: u16 = 14;
const STATUS_TTL: Duration = Duration::from_secs(4);
const WEEKDAY_HEADER: &str = "Su Mo Tu We Th Fr Sa";
const MONTH_GRID_WIDTH: usize = 21;
const UP_COLOR: Color = Color::Green;
const DOWN_COLOR: Color = Color::Red;

/// Source of everything the dashboard displays. Loaded once at startup.
pub trait DashboardRuntime {
    fn load_catalogue(&mut self) -> Result<Catalogue>;
    fn load_monthly_figures(&mut self) -> Result<Vec<MonthlyFigures>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct CategoryPickerUiState {
    visible: bool,
    cursor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DatePickerUiState {
    cursor: Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct InfoUiState {
    visible: bool,
    kpi_name: Option<String>,
}

#[derive(Debug, Clone)]
struct ViewData {
    catalogue: Catalogue,
    figures: Vec<MonthlyFigures>,
    focus: usize,
    viewport_width: u16,
    category_picker: CategoryPickerUiState,
    date_picker: Option<DatePickerUiState>,
    info: InfoUiState,
    help_visible: bool,
    status_set_at: Option<Instant>,
}

impl ViewData {
    fn new(catalogue: Catalogue, figures: Vec<MonthlyFigures>) -> Self {
        Self {
            catalogue,
            figures,
            focus: 0,
            viewport_width: 120,
            category_picker: CategoryPickerUiState::default(),
            date_picker: None,
            info: InfoUiState::default(),
            help_visible: false,
            status_set_at: None,
        }
    }

    fn load<R: DashboardRuntime>(runtime: &mut R) -> Result<Self> {
        let catalogue = runtime.load_catalogue().context("load kpi catalogue")?;
        let figures = runtime
            .load_monthly_figures()
            .context("load monthly figures")?;
        Ok(Self::new(catalogue, figures))
    }

    fn visible_kpis(&self, state: &AppState) -> Vec<&Kpi> {
        self.catalogue.filter(&state.category)
    }

    fn focused_kpi(&self, state: &AppState) -> Option<&Kpi> {
        self.visible_kpis(state).get(self.focus).copied()
    }
}

pub fn run_app<R: DashboardRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    let mut view_data = ViewData::load(runtime)?;
    info!(
        kpis = view_data.catalogue.len(),
        categories = view_data.catalogue.categories().len(),
        "dashboard loaded"
    );

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    if let Ok((width, _)) = terminal::size() {
        view_data.viewport_width = width;
    }

    let mut result = Ok(());
    loop {
        expire_status(state, &mut view_data, Instant::now());

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, &mut view_data, key) {
                        break;
                    }
                }
                Ok(Event::Resize(width, _)) => {
                    view_data.viewport_width = width;
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    info!("dashboard closed");
    result
}

fn expire_status(state: &mut AppState, view_data: &mut ViewData, now: Instant) {
    let Some(set_at) = view_data.status_set_at else {
        return;
    };
    if now.saturating_duration_since(set_at) >= STATUS_TTL {
        view_data.status_set_at = None;
        state.dispatch(AppCommand::ClearStatus);
    }
}

fn emit_status(state: &mut AppState, view_data: &mut ViewData, message: impl Into<String>) {
    dispatch(state, view_data, AppCommand::SetStatus(message.into()));
}

fn dispatch(state: &mut AppState, view_data: &mut ViewData, command: AppCommand) {
    let events = state.dispatch(command);
    for event in &events {
        match event {
            AppEvent::CategoryChanged(category) => {
                view_data.focus = 0;
                info!(category = category.as_value(), "category selected");
            }
            AppEvent::TabChanged(tab) => {
                clamp_focus(state, view_data);
                debug!(tab = tab.as_str(), "tab changed");
            }
            AppEvent::AppliedRangeChanged(range) => {
                info!(range = %range_label(range.as_ref()), "date range applied");
            }
            AppEvent::StatusUpdated(_) => {
                view_data.status_set_at = Some(Instant::now());
            }
            AppEvent::CalendarVisibilityChanged(_)
            | AppEvent::ProposedRangeChanged(_)
            | AppEvent::StatusCleared => {}
        }
    }
}

fn handle_key_event(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    if view_data.info.visible {
        view_data.info = InfoUiState::default();
        return false;
    }

    if state.dates.calendar_open {
        handle_date_picker_key(state, view_data, key);
        return false;
    }

    if view_data.category_picker.visible {
        handle_category_picker_key(state, view_data, key);
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
        }
        (KeyCode::Tab, _) | (KeyCode::Char('f'), KeyModifiers::NONE) => {
            dispatch(state, view_data, AppCommand::NextTab);
        }
        (KeyCode::BackTab, _) | (KeyCode::Char('b'), KeyModifiers::NONE) => {
            dispatch(state, view_data, AppCommand::PrevTab);
        }
        (KeyCode::Char('1'), _) => {
            dispatch(state, view_data, AppCommand::SelectTab(TabKind::Overview));
        }
        (KeyCode::Char('2'), _) => {
            dispatch(state, view_data, AppCommand::SelectTab(TabKind::Details));
        }
        (KeyCode::Char('c'), KeyModifiers::NONE) => open_category_picker(state, view_data),
        (KeyCode::Char(']'), _) => cycle_category(state, view_data, 1),
        (KeyCode::Char('['), _) => cycle_category(state, view_data, -1),
        (KeyCode::Char('r'), KeyModifiers::NONE) => open_date_picker(state, view_data),
        (KeyCode::Enter, _) | (KeyCode::Char('i'), KeyModifiers::NONE) => {
            open_info(state, view_data);
        }
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
            view_data.focus = 0;
        }
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
            view_data.focus = view_data.visible_kpis(state).len().saturating_sub(1);
        }
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => {
            let step = focus_row_step(state, view_data);
            move_focus(state, view_data, step);
        }
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => {
            let step = focus_row_step(state, view_data);
            move_focus(state, view_data, -step);
        }
        (KeyCode::Char('l'), _) | (KeyCode::Right, _)
            if state.active_tab == TabKind::Overview =>
        {
            move_focus(state, view_data, 1);
        }
        (KeyCode::Char('h'), _) | (KeyCode::Left, _)
            if state.active_tab == TabKind::Overview =>
        {
            move_focus(state, view_data, -1);
        }
        _ => {}
    }
    false
}

fn focus_row_step(state: &AppState, view_data: &ViewData) -> isize {
    match state.active_tab {
        TabKind::Overview => grid_columns(view_data.viewport_width) as isize,
        TabKind::Details => 1,
    }
}

fn move_focus(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let count = view_data.visible_kpis(state).len();
    if count == 0 {
        view_data.focus = 0;
        return;
    }
    let next = view_data.focus as isize + delta;
    if (0..count as isize).contains(&next) {
        view_data.focus = next as usize;
    }
}

fn clamp_focus(state: &AppState, view_data: &mut ViewData) {
    let count = view_data.visible_kpis(state).len();
    view_data.focus = view_data.focus.min(count.saturating_sub(1));
}

fn open_info(state: &mut AppState, view_data: &mut ViewData) {
    let Some(name) = view_data.focused_kpi(state).map(|kpi| kpi.name.clone()) else {
        emit_status(state, view_data, "no KPI focused");
        return;
    };
    view_data.info = InfoUiState {
        visible: true,
        kpi_name: Some(name),
    };
}

fn open_category_picker(state: &AppState, view_data: &mut ViewData) {
    let cursor = view_data
        .catalogue
        .category_options()
        .iter()
        .position(|option| *option == state.category)
        .unwrap_or(0);
    view_data.category_picker = CategoryPickerUiState {
        visible: true,
        cursor,
    };
}

fn handle_category_picker_key(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) {
    let options = view_data.catalogue.category_options();
    let last = options.len().saturating_sub(1);
    let picker = &mut view_data.category_picker;
    match key.code {
        KeyCode::Esc => {
            *picker = CategoryPickerUiState::default();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            picker.cursor = (picker.cursor + 1).min(last);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            picker.cursor = picker.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            picker.cursor = 0;
        }
        KeyCode::Char('G') | KeyCode::End => {
            picker.cursor = last;
        }
        KeyCode::Enter => {
            let chosen = options.get(picker.cursor).cloned().unwrap_or_default();
            *picker = CategoryPickerUiState::default();
            dispatch(state, view_data, AppCommand::SelectCategory(chosen));
        }
        _ => {}
    }
}

fn cycle_category(state: &mut AppState, view_data: &mut ViewData, delta: isize) {
    let options = view_data.catalogue.category_options();
    let current = options
        .iter()
        .position(|option| *option == state.category)
        .unwrap_or(0) as isize;
    let next = (current + delta).rem_euclid(options.len() as isize) as usize;
    let chosen = options[next].clone();
    dispatch(state, view_data, AppCommand::SelectCategory(chosen));
}

fn open_date_picker(state: &mut AppState, view_data: &mut ViewData) {
    dispatch(state, view_data, AppCommand::OpenCalendar);
    let cursor = state
        .dates
        .proposed
        .or(state.dates.applied)
        .map(|range| range.from)
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());
    view_data.date_picker = Some(DatePickerUiState { cursor });
}

fn handle_date_picker_key(state: &mut AppState, view_data: &mut ViewData, key: KeyEvent) {
    let cursor = match view_data.date_picker {
        Some(picker) => picker.cursor,
        None => OffsetDateTime::now_utc().date(),
    };

    let next = match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            view_data.date_picker = None;
            dispatch(state, view_data, AppCommand::CancelDateRange);
            return;
        }
        (KeyCode::Enter, _) => {
            view_data.date_picker = None;
            dispatch(state, view_data, AppCommand::ApplyDateRange);
            return;
        }
        (KeyCode::Char(' '), _) => {
            dispatch(state, view_data, AppCommand::PickDay(cursor));
            None
        }
        (KeyCode::Char('x'), _) => {
            dispatch(state, view_data, AppCommand::ClearProposedRange);
            None
        }
        (KeyCode::Char('h'), _) | (KeyCode::Left, _) => shift_date_by_days(cursor, -1),
        (KeyCode::Char('l'), _) | (KeyCode::Right, _) => shift_date_by_days(cursor, 1),
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => shift_date_by_days(cursor, 7),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => shift_date_by_days(cursor, -7),
        (KeyCode::Char('H'), _) => shift_date_by_months(cursor, -1),
        (KeyCode::Char('L'), _) => shift_date_by_months(cursor, 1),
        (KeyCode::Char('{'), _) => shift_date_by_years(cursor, -1),
        (KeyCode::Char('}'), _) => shift_date_by_years(cursor, 1),
        _ => None,
    };

    view_data.date_picker = Some(DatePickerUiState {
        cursor: next.unwrap_or(cursor),
    });
}

/// Card grid breakpoints: one column on narrow terminals, three on wide.
fn grid_columns(width: u16) -> usize {
    match width {
        0..60 => 1,
        60..100 => 2,
        _ => 3,
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let selected = TabKind::ALL
        .iter()
        .position(|tab| *tab == state.active_tab)
        .unwrap_or(0);
    let tab_titles = TabKind::ALL
        .iter()
        .map(|tab| format!(" {} ", tab.label()))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(tab_titles)
        .block(Block::default().title(APP_TITLE).borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    render_controls(frame, layout[1], state);

    match state.active_tab {
        TabKind::Overview => render_overview(frame, layout[2], state, view_data),
        TabKind::Details => render_details(frame, layout[2], state, view_data),
    }

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[3]);

    if view_data.category_picker.visible {
        let area = centered_rect(40, 50, frame.area());
        frame.render_widget(Clear, area);
        let picker = Paragraph::new(render_category_picker_text(
            &view_data.catalogue,
            &state.category,
            view_data.category_picker.cursor,
        ))
        .block(
            Block::default()
                .title("Select KPI category")
                .borders(Borders::ALL),
        );
        frame.render_widget(picker, area);
    }

    if let Some(picker) = view_data.date_picker.filter(|_| state.dates.calendar_open) {
        let area = centered_rect(60, 60, frame.area());
        frame.render_widget(Clear, area);
        let calendar = Paragraph::new(render_date_picker_lines(
            state.dates.proposed.as_ref(),
            state.dates.applied.as_ref(),
            picker.cursor,
        ))
        .block(Block::default().title("date range").borders(Borders::ALL));
        frame.render_widget(calendar, area);
    }

    let disclosed = view_data
        .info
        .kpi_name
        .as_deref()
        .filter(|_| view_data.info.visible)
        .and_then(|name| view_data.catalogue.get(name));
    if let Some(kpi) = disclosed {
        let area = centered_rect(70, 40, frame.area());
        frame.render_widget(Clear, area);
        let disclosure = Paragraph::new(render_info_overlay_text(kpi))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(kpi.name.as_str())
                    .borders(Borders::ALL),
            );
        frame.render_widget(disclosure, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_controls(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(20)])
        .split(area);

    let trigger = Paragraph::new(state.dates.trigger_label()).block(
        Block::default()
            .title("date range (r)")
            .borders(Borders::ALL),
    );
    frame.render_widget(trigger, columns[0]);

    let selector = Paragraph::new(state.category.label().to_owned())
        .block(Block::default().title("category (c)").borders(Borders::ALL));
    frame.render_widget(selector, columns[1]);
}

fn render_overview(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(CHART_HEIGHT),
        ])
        .split(area);

    render_card_grid(frame, sections[0], state, view_data);
    render_chart(frame, sections[1], &view_data.figures);
}

fn render_card_grid(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let kpis = view_data.visible_kpis(state);
    if kpis.is_empty() {
        let empty = Paragraph::new(empty_result_text(&state.category))
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let columns = grid_columns(area.width);
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    let focused_row = view_data.focus / columns;
    let first_row = (focused_row + 1).saturating_sub(visible_rows);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(area);
    let column_constraints = vec![Constraint::Ratio(1, columns as u32); columns];

    for (slot, row_area) in row_areas.iter().enumerate() {
        let row = first_row + slot;
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(column_constraints.clone())
            .split(*row_area);
        for (column, cell_area) in cells.iter().enumerate() {
            let index = row * columns + column;
            let Some(kpi) = kpis.get(index) else {
                return;
            };
            render_card(frame, *cell_area, kpi, index == view_data.focus);
        }
    }
}

fn render_card(frame: &mut ratatui::Frame<'_>, area: Rect, kpi: &Kpi, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut value_line = vec![Span::styled(
        kpi.value.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(delta) = &kpi.trend {
        value_line.push(Span::raw("  "));
        value_line.push(Span::styled(
            delta.display(),
            Style::default().fg(trend_color(delta.direction)),
        ));
    }

    let body = vec![
        Line::from(Span::styled(
            kpi.category.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(value_line),
    ];
    let card = Paragraph::new(body).block(
        Block::default()
            .title(format!("{} {INFO_MARK}", kpi.name))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(card, area);
}

fn trend_color(direction: Trend) -> Color {
    match direction {
        Trend::Up => UP_COLOR,
        Trend::Down => DOWN_COLOR,
    }
}

fn series_color(series: Series) -> Color {
    match series {
        Series::Revenue => Color::Green,
        Series::Expenses => Color::Red,
        Series::Profit => Color::Blue,
    }
}

fn render_chart(frame: &mut ratatui::Frame<'_>, area: Rect, figures: &[MonthlyFigures]) {
    let legend = Series::ALL
        .iter()
        .flat_map(|series| {
            [
                Span::styled("■ ", Style::default().fg(series_color(*series))),
                Span::raw(format!("{}  ", series.label())),
            ]
        })
        .collect::<Vec<_>>();

    let block = Block::default()
        .title(CHART_TITLE)
        .title_top(Line::from(CHART_SUBTITLE).right_aligned())
        .title_bottom(Line::from(legend))
        .borders(Borders::ALL);

    let group_gap = 2;
    let mut chart = BarChart::default()
        .block(block)
        .bar_width(chart_bar_width(area.width, figures.len(), group_gap))
        .bar_gap(0)
        .group_gap(group_gap);
    for month in figures {
        let bars = Series::ALL
            .iter()
            .map(|series| {
                let value = month.value(*series);
                Bar::default()
                    .value(value.unsigned_abs())
                    .text_value(bar_text_value(value))
                    .style(Style::default().fg(series_color(*series)))
                    .value_style(Style::default().fg(Color::Black).bg(series_color(*series)))
            })
            .collect::<Vec<_>>();
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(month.month))
                .bars(&bars),
        );
    }
    frame.render_widget(chart, area);
}

fn chart_bar_width(width: u16, groups: usize, group_gap: u16) -> u16 {
    if groups == 0 {
        return 1;
    }
    let groups = groups as u16;
    let usable = width
        .saturating_sub(2)
        .saturating_sub(group_gap.saturating_mul(groups.saturating_sub(1)));
    let bars = groups.saturating_mul(Series::ALL.len() as u16);
    (usable / bars).clamp(1, 8)
}

/// Bars are drawn by magnitude; the label keeps the sign so losses read as
/// losses.
fn bar_text_value(value: i64) -> String {
    let magnitude = value.unsigned_abs();
    let sign = if value < 0 { "-" } else { "" };
    if magnitude >= 1000 {
        format!("{sign}{:.1}k", magnitude as f64 / 1000.0)
    } else {
        format!("{sign}{magnitude}")
    }
}

fn render_details(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let kpis = view_data.visible_kpis(state);
    let header = Row::new(DETAIL_COLUMNS.iter().map(|label| {
        Cell::from(*label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = kpis.iter().map(|kpi| {
        let [category, name, value, trend, meaning] = details_row_cells(kpi);
        let trend_style = kpi
            .trend_direction()
            .map(|direction| Style::default().fg(trend_color(direction)))
            .unwrap_or_default();
        Row::new(vec![
            Cell::from(category),
            Cell::from(name),
            Cell::from(value),
            Cell::from(trend).style(trend_style),
            Cell::from(meaning),
        ])
    });

    let mut block = Block::default()
        .title("Detailed KPI Data")
        .title_top(Line::from("Comprehensive view of all KPIs").right_aligned())
        .borders(Borders::ALL);
    if kpis.is_empty() {
        block = block.title_bottom(Line::from(empty_result_text(&state.category)));
    }

    let widths = [
        Constraint::Length(30),
        Constraint::Length(38),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Min(20),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(block);
    let mut table_state = TableState::default().with_selected(if kpis.is_empty() {
        None
    } else {
        Some(view_data.focus)
    });
    frame.render_stateful_widget(table, area, &mut table_state);
}

const DETAIL_COLUMNS: [&str; 5] = ["Category", "KPI", "Value", "Trend", "Description"];

fn details_row_cells(kpi: &Kpi) -> [String; 5] {
    [
        kpi.category.clone(),
        format!("{} {INFO_MARK}", kpi.name),
        kpi.value.clone(),
        kpi.trend_display(),
        kpi.meaning.clone(),
    ]
}

fn empty_result_text(category: &CategoryFilter) -> String {
    format!("no KPIs in {}", category.label())
}

fn render_info_overlay_text(kpi: &Kpi) -> String {
    [
        format!("Meaning: {}", kpi.meaning),
        format!("Formula: {}", kpi.formula),
        format!("Example: {}", kpi.example),
        String::new(),
        "any key close".to_owned(),
    ]
    .join("\n")
}

fn render_category_picker_text(
    catalogue: &Catalogue,
    selected: &CategoryFilter,
    cursor: usize,
) -> String {
    let mut lines = catalogue
        .category_options()
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let pointer = if index == cursor { ">" } else { " " };
            let check = if option == selected { "*" } else { " " };
            format!("{pointer}{check} {}", option.label())
        })
        .collect::<Vec<_>>();
    lines.push(String::new());
    lines.push("j/k move | enter select | esc close".to_owned());
    lines.join("\n")
}

fn render_date_picker_lines(
    proposed: Option<&DateRange>,
    applied: Option<&DateRange>,
    cursor: Date,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(format!("proposed: {}", range_label(proposed))),
        Line::from(format!("applied:  {}", range_label(applied))),
        Line::from(format!("cursor:   {}", format_day(cursor))),
        Line::from(String::new()),
    ];

    let left_month = first_of_month(cursor);
    let right_month = shift_date_by_months(left_month, 1).unwrap_or(left_month);
    let left = month_grid_lines(left_month, proposed, cursor);
    let right = month_grid_lines(right_month, proposed, cursor);
    let height = left.len().max(right.len());
    for row in 0..height {
        let mut spans = left.get(row).cloned().unwrap_or_else(blank_week);
        spans.push(Span::raw("   "));
        spans.extend(right.get(row).cloned().unwrap_or_else(blank_week));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(String::new()));
    lines.push(Line::from("h/l day | j/k week | H/L month | {/} year"));
    lines.push(Line::from(
        "space pick | x clear | enter apply | esc cancel",
    ));
    lines
}

fn blank_week() -> Vec<Span<'static>> {
    vec![Span::raw(" ".repeat(MONTH_GRID_WIDTH))]
}

/// One month as rows of spans, each day three cells wide: a marker column
/// ('>' cursor, '*' inside the proposed range) then the two-digit day.
fn month_grid_lines(
    month_start: Date,
    proposed: Option<&DateRange>,
    cursor: Date,
) -> Vec<Vec<Span<'static>>> {
    let width = MONTH_GRID_WIDTH;
    let title = format!("{} {}", month_start.month(), month_start.year());
    let mut rows = vec![
        vec![Span::styled(
            format!("{title:^width$}"),
            Style::default().add_modifier(Modifier::BOLD),
        )],
        vec![Span::raw(format!(" {WEEKDAY_HEADER}"))],
    ];

    let lead = usize::from(month_start.weekday().number_days_from_sunday());
    let mut week = vec![Span::raw("   ".repeat(lead))];
    let mut filled = lead;
    let mut day = month_start;
    while day.month() == month_start.month() {
        let in_range = proposed.is_some_and(|range| range.contains(day));
        let marker = if day == cursor {
            ">"
        } else if in_range {
            "*"
        } else {
            " "
        };
        let mut style = Style::default();
        if in_range {
            style = style.fg(Color::Black).bg(Color::Cyan);
        }
        if day == cursor {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        week.push(Span::styled(format!("{marker}{:02}", day.day()), style));
        filled += 1;
        if filled == 7 {
            rows.push(std::mem::take(&mut week));
            filled = 0;
        }
        match day.next_day() {
            Some(next) => day = next,
            None => break,
        }
    }
    if filled > 0 {
        week.push(Span::raw("   ".repeat(7 - filled)));
        rows.push(week);
    }
    rows
}

fn help_overlay_text() -> &'static str {
    "global: q or ctrl+q quit | ? help\n\
tabs: tab/f next | shift+tab/b prev | 1 overview | 2 details\n\
focus: j/k/h/l or arrows | g/G first/last | enter or i info\n\
category: c picker | [ / ] cycle\n\
dates: r open picker\n\
date picker: h/l day j/k week H/L month {/} year | space pick | x clear | enter apply | esc cancel\n\
category picker: j/k move | enter select | esc close\n\
info: any key close"
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if status_hidden_by_overlay(state, view_data) {
        return String::new();
    }

    let count = view_data.visible_kpis(state).len();
    let default = format!(
        "{count}/{} KPIs | tab views | c category | r dates | enter info | ? help | q quit",
        view_data.catalogue.len()
    );
    match &state.status_line {
        Some(status) => format!("{status} | {default}"),
        None => default,
    }
}

fn status_hidden_by_overlay(state: &AppState, view_data: &ViewData) -> bool {
    state.dates.calendar_open
        || view_data.help_visible
        || view_data.info.visible
        || view_data.category_picker.visible
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
