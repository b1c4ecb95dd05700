// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use kpiboard_app::{Catalogue, Kpi, TrendDelta};
use std::path::PathBuf;
use time::{Date, Month};

const CATEGORIES: [&str; 9] = [
    "Liquidity Ratios",
    "Profitability Ratios",
    "Solvency Ratios",
    "Efficiency Ratios",
    "Operating Performance Ratios",
    "Market Value Ratios",
    "Per-Employee Metrics",
    "Growth Metrics",
    "Customer Metrics",
];

const SUBJECTS: [&str; 16] = [
    "Asset",
    "Cash",
    "Debt",
    "Equity",
    "Inventory",
    "Margin",
    "Payables",
    "Receivables",
    "Revenue",
    "Capital",
    "Dividend",
    "Interest",
    "Expense",
    "Payroll",
    "Churn",
    "Backlog",
];

const MEASURES: [&str; 8] = [
    "Ratio",
    "Turnover",
    "Coverage",
    "Yield",
    "Margin",
    "Cycle",
    "per Employee",
    "Growth",
];

const PERCENTAGES: [&str; 8] = ["0%", "0.5%", "1%", "2%", "3%", "5%", "8%", "12%"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator for KPI records and whole catalogues. The same seed
/// always yields the same sequence.
#[derive(Debug, Clone)]
pub struct KpiFaker {
    rng: DeterministicRng,
    seed: u64,
    serial: usize,
}

impl KpiFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
            serial: 0,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn category(&mut self) -> &'static str {
        self.pick(&CATEGORIES)
    }

    pub fn kpi(&mut self) -> Kpi {
        let category = self.category();
        self.kpi_in(category)
    }

    /// Names carry a serial suffix so records from one faker never collide.
    pub fn kpi_in(&mut self, category: &str) -> Kpi {
        self.serial += 1;
        let subject = self.pick(&SUBJECTS);
        let measure = self.pick(&MEASURES);
        let name = format!("{subject} {measure} #{}", self.serial);
        let trend = match self.rng.int_n(3) {
            0 => None,
            1 => Some(TrendDelta::up(self.pick(&PERCENTAGES))),
            _ => Some(TrendDelta::down(self.pick(&PERCENTAGES))),
        };
        let value = format!("{}.{}", self.rng.int_n(40), self.rng.int_n(10));

        Kpi {
            meaning: format!(
                "Measures {} {}.",
                subject.to_lowercase(),
                measure.to_lowercase()
            ),
            formula: format!("{subject} / Total {subject}"),
            example: format!("If {subject} is $100,000 then the {measure} is {value}."),
            name,
            value,
            trend,
            category: category.to_owned(),
        }
    }

    pub fn kpis(&mut self, count: usize) -> Vec<Kpi> {
        (0..count).map(|_| self.kpi()).collect()
    }

    pub fn catalogue(&mut self, count: usize) -> Result<Catalogue> {
        Catalogue::new(self.kpis(count)).context("build faked catalogue")
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

pub fn kpi(name: &str, category: &str) -> Kpi {
    Kpi {
        name: name.to_owned(),
        value: "1.0".to_owned(),
        trend: None,
        category: category.to_owned(),
        meaning: format!("{name} meaning"),
        formula: format!("{name} formula"),
        example: format!("{name} example"),
    }
}

/// Catalogue from `(name, category)` pairs, in order.
pub fn catalogue_of(entries: &[(&str, &str)]) -> Result<Catalogue> {
    Catalogue::new(
        entries
            .iter()
            .map(|(name, category)| kpi(name, category))
            .collect(),
    )
    .context("build fixture catalogue")
}

pub fn temp_config_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("config.toml");
    Ok((dir, path))
}

pub fn fixture_date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid fixture date")
}

pub fn categories() -> &'static [&'static str] {
    &CATEGORIES
}
