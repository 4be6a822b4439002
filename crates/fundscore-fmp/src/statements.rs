//! Statement-derived metric provider.
//!
//! Computes the six metrics from the latest annual income statement,
//! balance sheet and cash-flow statement.

use async_trait::async_trait;
use fundscore_traits::{Metric, MetricProvider, PartialMetrics, round_to};

use crate::{
    FmpClient,
    error::FmpError,
    types::{BalanceSheet, CashFlowStatement, IncomeStatement, Period},
};

/// Decimal places kept for derived ratios.
const DERIVED_PRECISION: i32 = 4;

/// Derives metrics from raw FMP financial statements.
#[derive(Debug, Clone)]
pub struct FmpStatementsProvider {
    client: FmpClient,
}

impl FmpStatementsProvider {
    /// Create a provider backed by the given client.
    #[must_use]
    pub const fn new(client: FmpClient) -> Self {
        Self { client }
    }
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Derive canonical metrics from the latest statements.
///
/// Each metric is computed only when its inputs are present and its
/// denominator is non-zero; a missing statement drops the metrics it
/// feeds. Values are rounded to four decimals.
#[must_use]
pub fn derive_metrics(
    income: Option<&IncomeStatement>,
    balance: Option<&BalanceSheet>,
    cash: Option<&CashFlowStatement>,
) -> PartialMetrics {
    let mut metrics = PartialMetrics::new();
    let net_income = income.and_then(|i| i.net_income);
    let equity = non_zero(balance.and_then(BalanceSheet::equity));

    if let (Some(ni), Some(eq)) = (net_income, equity) {
        metrics.insert(Metric::Roe, ni / eq);
    }

    if let (Some(b), Some(eq)) = (balance, equity) {
        metrics.insert(Metric::DebtToEquity, b.debt() / eq);
    }

    if let Some(margin) = income.and_then(IncomeStatement::net_margin) {
        metrics.insert(Metric::NetProfitMargin, margin);
    }

    if let Some(b) = balance
        && let (Some(assets), Some(liabilities)) =
            (b.total_current_assets, non_zero(b.total_current_liabilities))
    {
        metrics.insert(Metric::CurrentRatio, assets / liabilities);
    }

    if let Some(i) = income
        && let (Some(ebit), Some(interest)) =
            (i.ebit_or_operating_income(), non_zero(i.interest_expense))
    {
        metrics.insert(Metric::InterestCoverage, ebit / interest.abs());
    }

    if let Some(c) = cash {
        let reported = c.free_cash_flow;
        let fcf = match non_zero(reported) {
            Some(v) => Some(v),
            None => match (
                non_zero(c.operating_cash_flow),
                non_zero(c.capital_expenditure),
            ) {
                (Some(ocf), Some(capex)) => Some(ocf - capex.abs()),
                _ => reported,
            },
        };
        metrics.insert_opt(Metric::FreeCashFlow, fcf);
    }

    metrics
        .iter()
        .map(|(m, v)| (m, round_to(v, DERIVED_PRECISION)))
        .collect()
}

fn latest_or_warn<T>(
    ticker: &str,
    statement: &str,
    result: crate::Result<Vec<T>>,
) -> (Option<T>, Option<FmpError>) {
    match result {
        Ok(rows) => (rows.into_iter().next(), None),
        Err(e) => {
            tracing::warn!(ticker, statement, error = %e, "fmp statement unavailable");
            (None, Some(e))
        }
    }
}

#[async_trait]
impl MetricProvider for FmpStatementsProvider {
    fn name(&self) -> &str {
        "fmp_statements"
    }

    async fn fetch(&self, ticker: &str) -> fundscore_traits::Result<PartialMetrics> {
        let income = self
            .client
            .income_statement(ticker, Period::Annual, Some(1))
            .await;
        let balance = self
            .client
            .balance_sheet(ticker, Period::Annual, Some(1))
            .await;
        let cash = self.client.cash_flow(ticker, Period::Annual, Some(1)).await;

        let (income, income_err) = latest_or_warn(ticker, "income", income);
        let (balance, balance_err) = latest_or_warn(ticker, "balance", balance);
        let (cash, cash_err) = latest_or_warn(ticker, "cash_flow", cash);

        if let (Some(e), Some(_), Some(_)) = (income_err, balance_err, cash_err) {
            return Err(e.into());
        }
        if income.is_none() && balance.is_none() && cash.is_none() {
            return Err(FmpError::NoData(ticker.to_string()).into());
        }

        let metrics = derive_metrics(income.as_ref(), balance.as_ref(), cash.as_ref());
        tracing::debug!(
            ticker,
            period_end = ?income.as_ref().and_then(IncomeStatement::period_end),
            count = metrics.len(),
            "metrics derived from statements"
        );
        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn income() -> IncomeStatement {
        IncomeStatement {
            revenue: Some(1_000.0),
            net_income: Some(150.0),
            operating_income: Some(210.0),
            ebit: Some(200.0),
            interest_expense: Some(-40.0),
            ..Default::default()
        }
    }

    fn balance() -> BalanceSheet {
        BalanceSheet {
            total_current_assets: Some(600.0),
            total_current_liabilities: Some(400.0),
            total_debt: Some(300.0),
            total_equity: Some(1_200.0),
            total_stockholders_equity: Some(1_100.0),
            ..Default::default()
        }
    }

    fn cash() -> CashFlowStatement {
        CashFlowStatement {
            operating_cash_flow: Some(260.0),
            capital_expenditure: Some(-90.0),
            free_cash_flow: Some(170.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_all_metrics() {
        let metrics = derive_metrics(Some(&income()), Some(&balance()), Some(&cash()));

        assert_eq!(metrics.len(), 6);
        assert_relative_eq!(metrics.get(Metric::Roe).unwrap(), 0.125);
        assert_relative_eq!(metrics.get(Metric::DebtToEquity).unwrap(), 0.25);
        assert_relative_eq!(metrics.get(Metric::NetProfitMargin).unwrap(), 0.15);
        assert_relative_eq!(metrics.get(Metric::CurrentRatio).unwrap(), 1.5);
        assert_relative_eq!(metrics.get(Metric::InterestCoverage).unwrap(), 5.0);
        assert_relative_eq!(metrics.get(Metric::FreeCashFlow).unwrap(), 170.0);
    }

    #[test]
    fn test_derived_values_are_rounded() {
        let income = IncomeStatement {
            revenue: Some(3.0),
            net_income: Some(1.0),
            ..Default::default()
        };
        let metrics = derive_metrics(Some(&income), None, None);
        assert_relative_eq!(metrics.get(Metric::NetProfitMargin).unwrap(), 0.3333);
    }

    #[test]
    fn test_zero_equity_skips_equity_ratios() {
        let balance = BalanceSheet {
            total_equity: Some(0.0),
            ..balance()
        };
        let metrics = derive_metrics(Some(&income()), Some(&balance), None);
        assert_eq!(metrics.get(Metric::Roe), None);
        assert_eq!(metrics.get(Metric::DebtToEquity), None);
        assert!(metrics.get(Metric::CurrentRatio).is_some());
    }

    #[test]
    fn test_debt_to_equity_uses_split_debt() {
        let balance = BalanceSheet {
            total_debt: None,
            short_term_debt: Some(60.0),
            long_term_debt: Some(240.0),
            ..balance()
        };
        let metrics = derive_metrics(None, Some(&balance), None);
        assert_relative_eq!(metrics.get(Metric::DebtToEquity).unwrap(), 0.25);
    }

    #[test]
    fn test_interest_coverage_falls_back_to_operating_income() {
        let income = IncomeStatement {
            ebit: None,
            ..income()
        };
        let metrics = derive_metrics(Some(&income), None, None);
        assert_relative_eq!(metrics.get(Metric::InterestCoverage).unwrap(), 5.25);
    }

    #[test]
    fn test_no_interest_expense_means_no_coverage() {
        let income = IncomeStatement {
            interest_expense: Some(0.0),
            ..income()
        };
        let metrics = derive_metrics(Some(&income), None, None);
        assert_eq!(metrics.get(Metric::InterestCoverage), None);
    }

    #[test]
    fn test_free_cash_flow_fallback() {
        let cash = CashFlowStatement {
            free_cash_flow: None,
            ..cash()
        };
        let metrics = derive_metrics(None, None, Some(&cash));
        assert_relative_eq!(metrics.get(Metric::FreeCashFlow).unwrap(), 170.0);

        let cash = CashFlowStatement {
            free_cash_flow: Some(0.0),
            operating_cash_flow: None,
            ..cash
        };
        let metrics = derive_metrics(None, None, Some(&cash));
        assert_eq!(metrics.get(Metric::FreeCashFlow), Some(0.0));
    }

    #[test]
    fn test_no_statements_no_metrics() {
        assert!(derive_metrics(None, None, None).is_empty());
    }

    #[test]
    fn test_provider_name() {
        let provider = FmpStatementsProvider::new(FmpClient::new("key"));
        assert_eq!(provider.name(), "fmp_statements");
    }
}
