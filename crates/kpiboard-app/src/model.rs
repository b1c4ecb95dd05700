// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
        }
    }
}

/// Direction plus the display-formatted delta. A KPI either carries both or
/// neither, so "no trend" stays distinct from a trend of "0%".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendDelta {
    pub direction: Trend,
    pub percentage: String,
}

impl TrendDelta {
    pub fn up(percentage: impl Into<String>) -> Self {
        Self {
            direction: Trend::Up,
            percentage: percentage.into(),
        }
    }

    pub fn down(percentage: impl Into<String>) -> Self {
        Self {
            direction: Trend::Down,
            percentage: percentage.into(),
        }
    }

    pub fn display(&self) -> String {
        format!("{} {}", self.direction.arrow(), self.percentage)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub name: String,
    pub value: String,
    pub trend: Option<TrendDelta>,
    pub category: String,
    pub meaning: String,
    pub formula: String,
    pub example: String,
}

impl Kpi {
    pub fn trend_direction(&self) -> Option<Trend> {
        self.trend.as_ref().map(|delta| delta.direction)
    }

    pub fn trend_display(&self) -> String {
        self.trend
            .as_ref()
            .map(TrendDelta::display)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabKind {
    Overview,
    Details,
}

impl TabKind {
    pub const ALL: [Self; 2] = [Self::Overview, Self::Details];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Details => "Details",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Details => "details",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "overview" => Some(Self::Overview),
            "details" => Some(Self::Details),
            _ => None,
        }
    }
}

pub const ALL_CATEGORIES_VALUE: &str = "All";
pub const ALL_CATEGORIES_LABEL: &str = "All KPIs";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn only(category: impl Into<String>) -> Self {
        Self::Only(category.into())
    }

    /// `"All"` is the sentinel; anything else names a category verbatim.
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES_VALUE {
            Self::All
        } else {
            Self::Only(value.to_owned())
        }
    }

    pub fn as_value(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES_VALUE,
            Self::Only(category) => category,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES_LABEL,
            Self::Only(category) => category,
        }
    }

    pub fn matches(&self, kpi: &Kpi) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => kpi.category == *category,
        }
    }
}
