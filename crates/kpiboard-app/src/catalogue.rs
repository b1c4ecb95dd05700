// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::model::{CategoryFilter, Kpi, Trend, TrendDelta};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueError {
    BlankName,
    DuplicateName(String),
    BlankCategory(String),
}

impl std::fmt::Display for CatalogueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => f.write_str("kpi name must not be blank"),
            Self::DuplicateName(name) => write!(f, "duplicate kpi name {name:?}"),
            Self::BlankCategory(name) => write!(f, "kpi {name:?} has a blank category"),
        }
    }
}

impl std::error::Error for CatalogueError {}

/// Ordered, validated KPI list. Names are unique and every record has a
/// category; nothing mutates a catalogue after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    kpis: Vec<Kpi>,
}

impl Catalogue {
    pub fn new(kpis: Vec<Kpi>) -> Result<Self, CatalogueError> {
        let mut seen = HashSet::with_capacity(kpis.len());
        for kpi in &kpis {
            if kpi.name.trim().is_empty() {
                return Err(CatalogueError::BlankName);
            }
            if kpi.category.trim().is_empty() {
                return Err(CatalogueError::BlankCategory(kpi.name.clone()));
            }
            if !seen.insert(kpi.name.as_str()) {
                return Err(CatalogueError::DuplicateName(kpi.name.clone()));
            }
        }
        Ok(Self { kpis })
    }

    pub fn builtin() -> &'static Catalogue {
        &BUILTIN
    }

    pub fn kpis(&self) -> &[Kpi] {
        &self.kpis
    }

    pub fn len(&self) -> usize {
        self.kpis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kpis.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Kpi> {
        self.kpis.iter().find(|kpi| kpi.name == name)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.kpis
            .iter()
            .map(|kpi| kpi.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.kpis.iter().any(|kpi| kpi.category == category)
    }

    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&Kpi> {
        filter_kpis(&self.kpis, filter)
    }

    /// Selector entries: the "All" sentinel followed by each category.
    pub fn category_options(&self) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(self.categories().into_iter().map(CategoryFilter::only))
            .collect()
    }
}

impl CategoryFilter {
    pub fn options(catalogue: &Catalogue) -> Vec<Self> {
        catalogue.category_options()
    }
}

pub fn filter_kpis<'a>(kpis: &'a [Kpi], filter: &CategoryFilter) -> Vec<&'a Kpi> {
    kpis.iter().filter(|kpi| filter.matches(kpi)).collect()
}

static BUILTIN: LazyLock<Catalogue> = LazyLock::new(|| Catalogue {
    kpis: builtin_kpis(),
});

const LIQUIDITY: &str = "Liquidity Ratios";
const PROFITABILITY: &str = "Profitability Ratios";
const SOLVENCY: &str = "Solvency Ratios";
const EFFICIENCY: &str = "Efficiency Ratios";
const OPERATING: &str = "Operating Performance Ratios";
const MARKET_VALUE: &str = "Market Value Ratios";
const PER_EMPLOYEE: &str = "Per-Employee Metrics";

struct Seed {
    name: &'static str,
    value: &'static str,
    direction: Trend,
    percentage: &'static str,
    category: &'static str,
    meaning: &'static str,
    formula: &'static str,
    example: &'static str,
}

const SEEDS: [Seed; 30] = [
    Seed {
        name: "Current Ratio",
        value: "1.5",
        direction: Trend::Up,
        percentage: "5%",
        category: LIQUIDITY,
        meaning: "Measures a company's ability to pay short-term obligations.",
        formula: "Current Assets / Current Liabilities",
        example: "If current assets are $100,000 and current liabilities are $50,000, then the current ratio is 2.0.",
    },
    Seed {
        name: "Quick Ratio",
        value: "1.2",
        direction: Trend::Up,
        percentage: "3%",
        category: LIQUIDITY,
        meaning: "Measures a company's ability to meet its short-term obligations with its most liquid assets.",
        formula: "(Current Assets - Inventory) / Current Liabilities",
        example: "If current assets are $100,000, inventory is $30,000, and current liabilities are $50,000, then the quick ratio is 1.4.",
    },
    Seed {
        name: "Cash Ratio",
        value: "0.8",
        direction: Trend::Down,
        percentage: "2%",
        category: LIQUIDITY,
        meaning: "Measures a company's ability to pay off short-term liabilities with cash and cash equivalents.",
        formula: "(Cash + Cash Equivalents) / Current Liabilities",
        example: "If cash and cash equivalents are $40,000 and current liabilities are $50,000, then the cash ratio is 0.8.",
    },
    Seed {
        name: "Operating Cash Flow Ratio",
        value: "1.3",
        direction: Trend::Up,
        percentage: "4%",
        category: LIQUIDITY,
        meaning: "Measures how well current liabilities are covered by the cash flow generated from a company's operations.",
        formula: "Operating Cash Flow / Current Liabilities",
        example: "If operating cash flow is $65,000 and current liabilities are $50,000, then the operating cash flow ratio is 1.3.",
    },
    Seed {
        name: "Gross Profit Margin",
        value: "35%",
        direction: Trend::Up,
        percentage: "2%",
        category: PROFITABILITY,
        meaning: "Measures the percentage of sales that exceeds the cost of goods sold.",
        formula: "(Revenue - Cost of Goods Sold) / Revenue",
        example: "If revenue is $100,000 and cost of goods sold is $65,000, then the gross profit margin is 35%.",
    },
    Seed {
        name: "Operating Profit Margin",
        value: "15%",
        direction: Trend::Up,
        percentage: "1%",
        category: PROFITABILITY,
        meaning: "Measures the percentage of profit a company produces from its operations, before subtracting taxes and interest charges.",
        formula: "Operating Income / Revenue",
        example: "If operating income is $15,000 and revenue is $100,000, then the operating profit margin is 15%.",
    },
    Seed {
        name: "Net Profit Margin",
        value: "10%",
        direction: Trend::Up,
        percentage: "0.5%",
        category: PROFITABILITY,
        meaning: "Measures how much net income or profit is generated as a percentage of revenue.",
        formula: "Net Income / Revenue",
        example: "If net income is $10,000 and revenue is $100,000, then the net profit margin is 10%.",
    },
    Seed {
        name: "Return on Assets (ROA)",
        value: "8%",
        direction: Trend::Up,
        percentage: "1%",
        category: PROFITABILITY,
        meaning: "Measures how efficiently a company uses its assets to generate profit.",
        formula: "Net Income / Total Assets",
        example: "If net income is $80,000 and total assets are $1,000,000, then the ROA is 8%.",
    },
    Seed {
        name: "Return on Equity (ROE)",
        value: "15%",
        direction: Trend::Up,
        percentage: "2%",
        category: PROFITABILITY,
        meaning: "Measures how efficiently a company uses its equity to generate profit.",
        formula: "Net Income / Shareholders' Equity",
        example: "If net income is $150,000 and shareholders' equity is $1,000,000, then the ROE is 15%.",
    },
    Seed {
        name: "Return on Invested Capital (ROIC)",
        value: "12%",
        direction: Trend::Up,
        percentage: "1.5%",
        category: PROFITABILITY,
        meaning: "Measures how efficiently a company uses its capital to generate profit.",
        formula: "(Net Income - Dividends) / (Total Debt + Total Equity)",
        example: "If net income is $120,000, dividends are $20,000, total debt is $500,000, and total equity is $500,000, then the ROIC is 10%.",
    },
    Seed {
        name: "Debt Ratio",
        value: "0.4",
        direction: Trend::Down,
        percentage: "2%",
        category: SOLVENCY,
        meaning: "Measures the extent of a company's leverage.",
        formula: "Total Liabilities / Total Assets",
        example: "If total liabilities are $400,000 and total assets are $1,000,000, then the debt ratio is 0.4.",
    },
    Seed {
        name: "Debt-to-Equity Ratio",
        value: "0.8",
        direction: Trend::Down,
        percentage: "5%",
        category: SOLVENCY,
        meaning: "Measures the degree to which a company is financing its operations through debt versus equity.",
        formula: "Total Liabilities / Shareholders' Equity",
        example: "If total liabilities are $800,000 and shareholders' equity is $1,000,000, then the debt-to-equity ratio is 0.8.",
    },
    Seed {
        name: "Interest Coverage Ratio",
        value: "5",
        direction: Trend::Up,
        percentage: "10%",
        category: SOLVENCY,
        meaning: "Measures how easily a company can pay interest on its outstanding debt.",
        formula: "EBIT / Interest Expense",
        example: "If EBIT is $500,000 and interest expense is $100,000, then the interest coverage ratio is 5.",
    },
    Seed {
        name: "Debt Service Coverage Ratio",
        value: "1.5",
        direction: Trend::Up,
        percentage: "3%",
        category: SOLVENCY,
        meaning: "Measures a company's ability to pay its debt obligations.",
        formula: "Net Operating Income / Total Debt Service",
        example: "If net operating income is $150,000 and total debt service is $100,000, then the debt service coverage ratio is 1.5.",
    },
    Seed {
        name: "Asset Turnover Ratio",
        value: "2",
        direction: Trend::Up,
        percentage: "5%",
        category: EFFICIENCY,
        meaning: "Measures the value of a company's sales or revenues relative to the value of its assets.",
        formula: "Revenue / Average Total Assets",
        example: "If revenue is $2,000,000 and average total assets are $1,000,000, then the asset turnover ratio is 2.",
    },
    Seed {
        name: "Inventory Turnover Ratio",
        value: "8",
        direction: Trend::Up,
        percentage: "12%",
        category: EFFICIENCY,
        meaning: "Measures how many times a company's inventory is sold and replaced over a period.",
        formula: "Cost of Goods Sold / Average Inventory",
        example: "If cost of goods sold is $800,000 and average inventory is $100,000, then the inventory turnover ratio is 8.",
    },
    Seed {
        name: "Receivables Turnover Ratio",
        value: "12",
        direction: Trend::Up,
        percentage: "8%",
        category: EFFICIENCY,
        meaning: "Measures how efficiently a company uses its assets by comparing the amount of credit extended to customers to the amount of sales generated.",
        formula: "Net Credit Sales / Average Accounts Receivable",
        example: "If net credit sales are $1,200,000 and average accounts receivable is $100,000, then the receivables turnover ratio is 12.",
    },
    Seed {
        name: "Days Sales Outstanding (DSO)",
        value: "30",
        direction: Trend::Down,
        percentage: "5%",
        category: EFFICIENCY,
        meaning: "Measures the average number of days that receivables remain outstanding before they are collected.",
        formula: "(Accounts Receivable / Total Credit Sales) * Number of Days",
        example: "If accounts receivable is $100,000, total credit sales is $1,200,000, and there are 365 days in a year, then DSO is 30 days.",
    },
    Seed {
        name: "Operating Cycle",
        value: "75",
        direction: Trend::Down,
        percentage: "3%",
        category: EFFICIENCY,
        meaning: "Measures the average number of days it takes for a business to turn its inventory into cash.",
        formula: "Days Inventory Outstanding + Days Sales Outstanding",
        example: "If days inventory outstanding is 45 and days sales outstanding is 30, then the operating cycle is 75 days.",
    },
    Seed {
        name: "Cash Conversion Cycle",
        value: "60",
        direction: Trend::Down,
        percentage: "7%",
        category: EFFICIENCY,
        meaning: "Measures how long it takes for a company to convert resource inputs into cash flows.",
        formula: "Days Inventory Outstanding + Days Sales Outstanding - Days Payables Outstanding",
        example: "If days inventory outstanding is 45, days sales outstanding is 30, and days payables outstanding is 15, then the cash conversion cycle is 60 days.",
    },
    Seed {
        name: "Operating Expense Ratio",
        value: "0.65",
        direction: Trend::Down,
        percentage: "2%",
        category: OPERATING,
        meaning: "Measures the percentage of a company's revenues that are used to cover operating expenses.",
        formula: "Operating Expenses / Revenue",
        example: "If operating expenses are $650,000 and revenue is $1,000,000, then the operating expense ratio is 0.65 or 65%.",
    },
    Seed {
        name: "Fixed Asset Turnover Ratio",
        value: "3.5",
        direction: Trend::Up,
        percentage: "8%",
        category: OPERATING,
        meaning: "Measures how efficiently a company uses its fixed assets to generate sales.",
        formula: "Revenue / Net Fixed Assets",
        example: "If revenue is $3,500,000 and net fixed assets are $1,000,000, then the fixed asset turnover ratio is 3.5.",
    },
    Seed {
        name: "Operating Ratio",
        value: "0.85",
        direction: Trend::Down,
        percentage: "1%",
        category: OPERATING,
        meaning: "Measures a company's efficiency at keeping costs low while generating revenue.",
        formula: "(Cost of Goods Sold + Operating Expenses) / Net Sales",
        example: "If COGS is $600,000, operating expenses are $250,000, and net sales are $1,000,000, then the operating ratio is 0.85 or 85%.",
    },
    Seed {
        name: "Price-to-Earnings (P/E) Ratio",
        value: "20",
        direction: Trend::Up,
        percentage: "5%",
        category: MARKET_VALUE,
        meaning: "Measures the ratio of a company's share price to its earnings per share.",
        formula: "Market Value per Share / Earnings per Share",
        example: "If the market value per share is $100 and earnings per share is $5, then the P/E ratio is 20.",
    },
    Seed {
        name: "Price-to-Book (P/B) Ratio",
        value: "2.5",
        direction: Trend::Up,
        percentage: "4%",
        category: MARKET_VALUE,
        meaning: "Measures the market's valuation of a company relative to its book value.",
        formula: "Market Price per Share / Book Value per Share",
        example: "If the market price per share is $50 and the book value per share is $20, then the P/B ratio is 2.5.",
    },
    Seed {
        name: "Dividend Yield",
        value: "3%",
        direction: Trend::Up,
        percentage: "0.5%",
        category: MARKET_VALUE,
        meaning: "Measures how much a company pays out in dividends each year relative to its stock price.",
        formula: "Annual Dividends per Share / Price per Share",
        example: "If annual dividends per share are $1.50 and the price per share is $50, then the dividend yield is 3%.",
    },
    Seed {
        name: "Earnings Per Share (EPS)",
        value: "5",
        direction: Trend::Up,
        percentage: "10%",
        category: MARKET_VALUE,
        meaning: "Measures the portion of a company's profit allocated to each outstanding share of common stock.",
        formula: "(Net Income - Preferred Dividends) / Average Outstanding Shares",
        example: "If net income is $1,000,000, preferred dividends are $100,000, and there are 180,000 outstanding shares, then EPS is $5.",
    },
    Seed {
        name: "Dividend Payout Ratio",
        value: "0.4",
        direction: Trend::Up,
        percentage: "2%",
        category: MARKET_VALUE,
        meaning: "Measures the percentage of earnings paid to shareholders in dividends.",
        formula: "Dividends / Net Income",
        example: "If dividends are $400,000 and net income is $1,000,000, then the dividend payout ratio is 0.4 or 40%.",
    },
    Seed {
        name: "Revenue per Employee",
        value: "250000",
        direction: Trend::Up,
        percentage: "5%",
        category: PER_EMPLOYEE,
        meaning: "Measures the average revenue generated by each employee of a company.",
        formula: "Revenue / Number of Employees",
        example: "If revenue is $25,000,000 and there are 100 employees, then revenue per employee is $250,000.",
    },
    Seed {
        name: "Profit per Employee",
        value: "50000",
        direction: Trend::Up,
        percentage: "8%",
        category: PER_EMPLOYEE,
        meaning: "Measures the average profit generated by each employee of a company.",
        formula: "Net Income / Number of Employees",
        example: "If net income is $5,000,000 and there are 100 employees, then profit per employee is $50,000.",
    },
];

fn builtin_kpis() -> Vec<Kpi> {
    SEEDS
        .iter()
        .map(|seed| Kpi {
            name: seed.name.to_owned(),
            value: seed.value.to_owned(),
            trend: Some(TrendDelta {
                direction: seed.direction,
                percentage: seed.percentage.to_owned(),
            }),
            category: seed.category.to_owned(),
            meaning: seed.meaning.to_owned(),
            formula: seed.formula.to_owned(),
            example: seed.example.to_owned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Catalogue, CatalogueError, builtin_kpis, filter_kpis};
    use crate::model::{CategoryFilter, Kpi, Trend, TrendDelta};

    fn kpi(name: &str, category: &str) -> Kpi {
        Kpi {
            name: name.to_owned(),
            value: "1".to_owned(),
            trend: None,
            category: category.to_owned(),
            meaning: format!("{name} meaning"),
            formula: format!("{name} formula"),
            example: format!("{name} example"),
        }
    }

    fn names<'a>(kpis: &[&'a Kpi]) -> Vec<&'a str> {
        kpis.iter().map(|kpi| kpi.name.as_str()).collect()
    }

    #[test]
    fn builtin_catalogue_passes_validation() {
        let validated = Catalogue::new(builtin_kpis()).expect("builtin catalogue is valid");
        assert_eq!(validated.len(), 30);
        assert_eq!(&validated, Catalogue::builtin());
    }

    #[test]
    fn builtin_categories_are_first_seen_ordered() {
        assert_eq!(
            Catalogue::builtin().categories(),
            vec![
                "Liquidity Ratios",
                "Profitability Ratios",
                "Solvency Ratios",
                "Efficiency Ratios",
                "Operating Performance Ratios",
                "Market Value Ratios",
                "Per-Employee Metrics",
            ]
        );
    }

    #[test]
    fn builtin_records_keep_display_values_verbatim() {
        let catalogue = Catalogue::builtin();
        let revenue = catalogue
            .get("Revenue per Employee")
            .expect("revenue per employee present");
        assert_eq!(revenue.value, "250000");
        assert_eq!(revenue.trend, Some(TrendDelta::up("5%")));

        let cash = catalogue.get("Cash Ratio").expect("cash ratio present");
        assert_eq!(cash.trend_direction(), Some(Trend::Down));
        assert_eq!(
            cash.formula,
            "(Cash + Cash Equivalents) / Current Liabilities"
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let error = Catalogue::new(vec![
            kpi("Quick Ratio", "Liquidity Ratios"),
            kpi("Quick Ratio", "Solvency Ratios"),
        ])
        .expect_err("duplicate names should fail");
        assert_eq!(
            error,
            CatalogueError::DuplicateName("Quick Ratio".to_owned())
        );
        assert!(error.to_string().contains("duplicate kpi name"));
    }

    #[test]
    fn blank_category_and_name_are_rejected() {
        let error = Catalogue::new(vec![kpi("Quick Ratio", "  ")])
            .expect_err("blank category should fail");
        assert_eq!(
            error,
            CatalogueError::BlankCategory("Quick Ratio".to_owned())
        );

        let error = Catalogue::new(vec![kpi("", "Liquidity Ratios")])
            .expect_err("blank name should fail");
        assert_eq!(error, CatalogueError::BlankName);
    }

    #[test]
    fn filter_all_returns_catalogue_in_order() {
        let catalogue = Catalogue::builtin();
        let all = catalogue.filter(&CategoryFilter::All);
        assert_eq!(all.len(), catalogue.len());
        assert!(
            all.iter()
                .zip(catalogue.kpis())
                .all(|(left, right)| *left == right)
        );
    }

    #[test]
    fn filter_by_category_preserves_relative_order() -> Result<(), CatalogueError> {
        let catalogue = Catalogue::new(vec![
            kpi("a", "x"),
            kpi("b", "y"),
            kpi("c", "x"),
            kpi("d", "z"),
            kpi("e", "x"),
        ])?;
        let filtered = catalogue.filter(&CategoryFilter::only("x"));
        assert_eq!(names(&filtered), vec!["a", "c", "e"]);
        assert_eq!(catalogue.categories(), vec!["x", "y", "z"]);
        Ok(())
    }

    #[test]
    fn filter_unknown_category_is_empty_not_error() {
        let filtered = Catalogue::builtin().filter(&CategoryFilter::only("Vanity Metrics"));
        assert!(filtered.is_empty());
        assert!(!Catalogue::builtin().has_category("Vanity Metrics"));
    }

    #[test]
    fn filter_is_idempotent() {
        let catalogue = Catalogue::builtin();
        let filter = CategoryFilter::only("Solvency Ratios");
        let once = catalogue.filter(&filter);
        let owned = once.iter().map(|kpi| (*kpi).clone()).collect::<Vec<_>>();
        let twice = filter_kpis(&owned, &filter);
        assert_eq!(names(&once), names(&twice));
        assert_eq!(once.len(), 4);
    }

    #[test]
    fn category_options_lead_with_all() {
        let options = Catalogue::builtin().category_options();
        assert_eq!(options.len(), 8);
        assert_eq!(options[0], CategoryFilter::All);
        assert_eq!(options[1], CategoryFilter::only("Liquidity Ratios"));
        assert_eq!(options[7], CategoryFilter::only("Per-Employee Metrics"));
    }

    #[test]
    fn empty_catalogue_is_valid() -> Result<(), CatalogueError> {
        let catalogue = Catalogue::new(Vec::new())?;
        assert!(catalogue.is_empty());
        assert!(catalogue.categories().is_empty());
        assert_eq!(
            CategoryFilter::options(&catalogue),
            vec![CategoryFilter::All]
        );
        Ok(())
    }
}
