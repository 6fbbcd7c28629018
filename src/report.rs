//! Derived-metrics report types.
//!
//! The nested `{category: {metric: number|null}}` layout downstream
//! consumers (LLM prompting, visualization) read. A metric is `null` exactly
//! when it was not computable for its period. The JSON schema export exists
//! for those consumers; it mirrors the record layout the orchestration layer
//! feeds to prompt templates.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProfitabilityMetrics {
    /// Pass-through from the source data when disclosed.
    pub gross_profit_margin: Option<f64>,
    pub net_profit_margin: Option<f64>,
    pub operating_profit_margin: Option<f64>,
    pub ebitda_margin: Option<f64>,
    /// Pass-through from the source data when disclosed.
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub roic: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SolvencyMetrics {
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub cash_ratio: Option<f64>,
    pub debt_to_equity_ratio: Option<f64>,
    pub debt_to_assets_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OperatingEfficiencyMetrics {
    pub total_asset_turnover: Option<f64>,
    pub fixed_asset_turnover: Option<f64>,
    pub equity_turnover: Option<f64>,
    pub working_capital_turnover: Option<f64>,
    /// Pass-through from the source data when disclosed.
    pub accounts_receivable_turnover: Option<f64>,
    /// Pass-through from the source data when disclosed.
    pub inventory_turnover: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GrowthMetrics {
    pub revenue_growth_rate: Option<f64>,
    pub profit_growth_rate: Option<f64>,
    pub asset_growth_rate: Option<f64>,
    pub equity_growth_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CashFlowMetrics {
    pub operating_cash_flow_ratio: Option<f64>,
    pub cash_flow_coverage_ratio: Option<f64>,
    pub cash_flow_to_revenue_ratio: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub cash_flow_quality_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MarketValueMetrics {
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub ps_ratio: Option<f64>,
}

/// All metric categories for one (company, period).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PeriodMetrics {
    pub profitability: ProfitabilityMetrics,
    pub solvency: SolvencyMetrics,
    pub operating_efficiency: OperatingEfficiencyMetrics,
    pub cash_flow: CashFlowMetrics,
    /// Absent for the first period of a series (no prior to grow from).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth: Option<GrowthMetrics>,
    /// Absent unless the caller supplied a market price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_value: Option<MarketValueMetrics>,
}

/// One company's full multi-period derived-metrics report, keyed by year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompanyMetricsReport {
    pub company_code: Option<String>,
    pub company_name: Option<String>,
    pub periods: BTreeMap<String, PeriodMetrics>,
}

impl CompanyMetricsReport {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(CompanyMetricsReport)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::generate_json_schema())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_generation() {
        let schema_json = CompanyMetricsReport::schema_as_json().unwrap();
        assert!(schema_json.contains("company_code"));
        assert!(schema_json.contains("profitability"));
        assert!(schema_json.contains("cash_flow_quality_ratio"));
    }

    #[test]
    fn test_optional_categories_are_omitted() {
        let mut report = CompanyMetricsReport::default();
        report
            .periods
            .insert("2023".to_string(), PeriodMetrics::default());

        let json = serde_json::to_value(&report).unwrap();
        let period = &json["periods"]["2023"];
        assert!(period.get("growth").is_none());
        assert!(period.get("market_value").is_none());
        assert!(period["profitability"]["roa"].is_null());
    }

    #[test]
    fn test_round_trip() {
        let mut report = CompanyMetricsReport {
            company_code: Some("000001".into()),
            company_name: Some("平安银行".into()),
            periods: BTreeMap::new(),
        };
        report.periods.insert(
            "2023".into(),
            PeriodMetrics {
                growth: Some(GrowthMetrics {
                    revenue_growth_rate: Some(0.5),
                    ..GrowthMetrics::default()
                }),
                ..PeriodMetrics::default()
            },
        );

        let json = report.to_json().unwrap();
        let back: CompanyMetricsReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
