//! Full-history orchestration of every calculator.

use crate::metrics::{
    cash_flow, efficiency, growth, market_value, profitability, solvency, MetricsConfig,
};
use crate::numeric::numeric;
use crate::report::{
    CashFlowMetrics, CompanyMetricsReport, GrowthMetrics, MarketValueMetrics,
    OperatingEfficiencyMetrics, PeriodMetrics, ProfitabilityMetrics, SolvencyMetrics,
};
use crate::schema::{CanonicalField, CanonicalRecord};
use log::debug;

/// Runs every metric calculator over a company's merged history.
#[derive(Debug, Clone, Default)]
pub struct ComprehensiveCalculator {
    config: MetricsConfig,
}

impl ComprehensiveCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MetricsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// All categories for one period. `previous` is the immediately
    /// preceding period; without it the growth category is absent. Market
    /// valuation is only attempted when a price is supplied.
    pub fn calculate_all_metrics(
        &self,
        record: &CanonicalRecord,
        previous: Option<&CanonicalRecord>,
        market_price: Option<f64>,
        shares_outstanding: Option<f64>,
    ) -> PeriodMetrics {
        let config = &self.config;
        PeriodMetrics {
            profitability: ProfitabilityMetrics {
                gross_profit_margin: numeric(record, CanonicalField::GrossProfitMargin),
                net_profit_margin: profitability::net_profit_margin(record, config),
                operating_profit_margin: profitability::operating_profit_margin(record, config),
                ebitda_margin: profitability::ebitda_margin(record, config),
                roe: numeric(record, CanonicalField::Roe),
                roa: profitability::roa(record, config),
                roic: profitability::roic(record, config),
            },
            solvency: SolvencyMetrics {
                current_ratio: solvency::current_ratio(record, config),
                quick_ratio: solvency::quick_ratio(record, config),
                cash_ratio: solvency::cash_ratio(record, config),
                debt_to_equity_ratio: solvency::debt_to_equity_ratio(record, config),
                debt_to_assets_ratio: solvency::debt_to_assets_ratio(record, config),
            },
            operating_efficiency: OperatingEfficiencyMetrics {
                total_asset_turnover: efficiency::total_asset_turnover(record, config),
                fixed_asset_turnover: efficiency::fixed_asset_turnover(record, config),
                equity_turnover: efficiency::equity_turnover(record, config),
                working_capital_turnover: efficiency::working_capital_turnover(record, config),
                accounts_receivable_turnover: numeric(
                    record,
                    CanonicalField::AccountsReceivableTurnover,
                ),
                inventory_turnover: numeric(record, CanonicalField::InventoryTurnover),
            },
            cash_flow: CashFlowMetrics {
                operating_cash_flow_ratio: cash_flow::operating_cash_flow_ratio(record, config),
                cash_flow_coverage_ratio: cash_flow::cash_flow_coverage_ratio(record, config),
                cash_flow_to_revenue_ratio: cash_flow::cash_flow_to_revenue_ratio(record, config),
                free_cash_flow: cash_flow::free_cash_flow(record),
                cash_flow_quality_ratio: cash_flow::cash_flow_quality_ratio(record, config),
            },
            growth: previous.map(|previous| GrowthMetrics {
                revenue_growth_rate: growth::revenue_growth_rate(record, Some(previous), config),
                profit_growth_rate: growth::profit_growth_rate(record, Some(previous), config),
                asset_growth_rate: growth::asset_growth_rate(record, Some(previous), config),
                equity_growth_rate: growth::equity_growth_rate(record, Some(previous), config),
            }),
            market_value: market_price.map(|price| MarketValueMetrics {
                pe_ratio: market_value::pe_ratio(record, price, config),
                pb_ratio: market_value::pb_ratio(record, price, config),
                ps_ratio: shares_outstanding
                    .and_then(|shares| market_value::ps_ratio(record, price, shares, config)),
            }),
        }
    }

    /// Sorts a company's periods ascending by year and derives every
    /// category per period, feeding each period's predecessor into the
    /// growth calculators. Periods without a year keep their input position
    /// under a synthetic `period_<n>` key.
    pub fn calculate_for_company(
        &self,
        periods: &[CanonicalRecord],
        market_price: Option<f64>,
        shares_outstanding: Option<f64>,
    ) -> CompanyMetricsReport {
        let mut sorted: Vec<&CanonicalRecord> = periods.iter().collect();
        sorted.sort_by_key(|record| record.year().unwrap_or("").to_string());

        let mut report = CompanyMetricsReport::default();
        if let Some(first) = sorted.first() {
            report.company_code = first.company_code().map(str::to_string);
            report.company_name = first.company_name().map(str::to_string);
        }

        debug!(
            "deriving metrics for {} over {} periods",
            report.company_code.as_deref().unwrap_or("<unknown>"),
            sorted.len()
        );

        for (index, record) in sorted.iter().enumerate() {
            let previous = if index > 0 {
                Some(sorted[index - 1])
            } else {
                None
            };
            let period_key = record
                .year()
                .map(str::to_string)
                .unwrap_or_else(|| format!("period_{index}"));
            let metrics =
                self.calculate_all_metrics(record, previous, market_price, shares_outstanding);
            report.periods.insert(period_key, metrics);
        }

        report
    }
}
