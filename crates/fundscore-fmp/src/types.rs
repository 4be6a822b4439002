//! Data types for FMP API responses.
//!
//! Every numeric field is optional: FMP omits or nulls fields it has no
//! figure for, and an absent figure must stay distinguishable from zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reporting period for financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Annual reports.
    #[default]
    Annual,
    /// Quarterly reports.
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

/// Income statement data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Filing date.
    #[serde(default)]
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Total revenue.
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Operating income.
    #[serde(default)]
    pub operating_income: Option<f64>,
    /// Earnings before interest and taxes.
    #[serde(default)]
    pub ebit: Option<f64>,
    /// Interest expense (sign varies by filer).
    #[serde(default)]
    pub interest_expense: Option<f64>,
    /// Net income.
    #[serde(default)]
    pub net_income: Option<f64>,
}

impl IncomeStatement {
    /// End of the fiscal period this statement covers.
    #[must_use]
    pub fn period_end(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Net income over revenue, when revenue is known and non-zero.
    #[must_use]
    pub fn net_margin(&self) -> Option<f64> {
        let revenue = self.revenue.filter(|r| *r != 0.0)?;
        Some(self.net_income? / revenue)
    }

    /// EBIT, falling back to operating income.
    #[must_use]
    pub fn ebit_or_operating_income(&self) -> Option<f64> {
        self.ebit.or(self.operating_income)
    }
}

/// Balance sheet data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    /// Filing date.
    #[serde(default)]
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Total current assets.
    #[serde(default)]
    pub total_current_assets: Option<f64>,
    /// Total current liabilities.
    #[serde(default)]
    pub total_current_liabilities: Option<f64>,
    /// Short-term debt.
    #[serde(default)]
    pub short_term_debt: Option<f64>,
    /// Long-term debt.
    #[serde(default)]
    pub long_term_debt: Option<f64>,
    /// Total debt.
    #[serde(default)]
    pub total_debt: Option<f64>,
    /// Total stockholders' equity.
    #[serde(default)]
    pub total_stockholders_equity: Option<f64>,
    /// Total equity (including non-controlling interests).
    #[serde(default)]
    pub total_equity: Option<f64>,
}

impl BalanceSheet {
    /// Total equity including minority interest, else stockholders' equity.
    #[must_use]
    pub fn equity(&self) -> Option<f64> {
        self.total_equity.or(self.total_stockholders_equity)
    }

    /// Reported total debt; when missing or zero, short-term plus long-term
    /// debt with missing parts counted as zero.
    #[must_use]
    pub fn debt(&self) -> f64 {
        match self.total_debt {
            Some(d) if d != 0.0 => d,
            _ => self.short_term_debt.unwrap_or(0.0) + self.long_term_debt.unwrap_or(0.0),
        }
    }
}

/// Cash flow statement data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    /// Filing date.
    #[serde(default)]
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Operating cash flow.
    #[serde(default)]
    pub operating_cash_flow: Option<f64>,
    /// Capital expenditure (usually reported negative).
    #[serde(default)]
    pub capital_expenditure: Option<f64>,
    /// Free cash flow.
    #[serde(default)]
    pub free_cash_flow: Option<f64>,
}

/// Key financial metrics from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    /// Filing date.
    #[serde(default)]
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Return on equity.
    #[serde(default, alias = "returnOnEquity")]
    pub roe: Option<f64>,
    /// Current ratio.
    #[serde(default)]
    pub current_ratio: Option<f64>,
}

/// Financial ratios from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRatios {
    /// Filing date.
    #[serde(default)]
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Net profit margin.
    #[serde(default)]
    pub net_profit_margin: Option<f64>,
    /// Return on equity.
    #[serde(default)]
    pub return_on_equity: Option<f64>,
    /// Current ratio.
    #[serde(default)]
    pub current_ratio: Option<f64>,
    /// Debt to equity ratio.
    #[serde(default, alias = "debtToEquityRatio")]
    pub debt_equity_ratio: Option<f64>,
    /// Interest coverage ratio.
    #[serde(default, alias = "interestCoverageRatio")]
    pub interest_coverage: Option<f64>,
}
