// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub const CHART_TITLE: &str = "Revenue, Expenses, and Profit Trends";
pub const CHART_SUBTITLE: &str = "Monthly comparison for the current year";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Revenue,
    Expenses,
    Profit,
}

impl Series {
    pub const ALL: [Self; 3] = [Self::Revenue, Self::Expenses, Self::Profit];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Expenses => "Expenses",
            Self::Profit => "Profit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyFigures {
    pub month: &'static str,
    pub revenue: i64,
    pub expenses: i64,
    pub profit: i64,
}

impl MonthlyFigures {
    pub const fn value(&self, series: Series) -> i64 {
        match series {
            Series::Revenue => self.revenue,
            Series::Expenses => self.expenses,
            Series::Profit => self.profit,
        }
    }
}

/// Mock six-month figures. Unrelated to the catalogue and to the selected
/// date range.
pub const MONTHLY_FIGURES: [MonthlyFigures; 6] = [
    MonthlyFigures {
        month: "Jan",
        revenue: 4000,
        expenses: 2400,
        profit: 1600,
    },
    MonthlyFigures {
        month: "Feb",
        revenue: 3000,
        expenses: 1398,
        profit: 1602,
    },
    MonthlyFigures {
        month: "Mar",
        revenue: 2000,
        expenses: 9800,
        profit: -7800,
    },
    MonthlyFigures {
        month: "Apr",
        revenue: 2780,
        expenses: 3908,
        profit: -1128,
    },
    MonthlyFigures {
        month: "May",
        revenue: 1890,
        expenses: 4800,
        profit: -2910,
    },
    MonthlyFigures {
        month: "Jun",
        revenue: 2390,
        expenses: 3800,
        profit: -1410,
    },
];

pub fn monthly_figures() -> &'static [MonthlyFigures] {
    &MONTHLY_FIGURES
}
