//! Profitability ratios.

use crate::metrics::MetricsConfig;
use crate::numeric::{get_value, safe_divide};
use crate::schema::{CanonicalField, CanonicalRecord};
use log::warn;

/// Net profit margin = net profit attributable to parent / total operating
/// revenue.
pub fn net_profit_margin(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let net_profit = get_value(record, CanonicalField::NetProfitAttributableToParent, 0.0);
    let revenue = get_value(record, CanonicalField::TotalOperatingRevenue, 0.0);

    if revenue == 0.0 {
        warn!("total operating revenue is 0, net profit margin not computable");
        return None;
    }
    Some(safe_divide(net_profit, revenue, 0.0, config.min_denominator))
}

/// Operating profit margin = operating profit / total operating revenue.
pub fn operating_profit_margin(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let operating_profit = get_value(record, CanonicalField::OperatingProfit, 0.0);
    let revenue = get_value(record, CanonicalField::TotalOperatingRevenue, 0.0);

    if revenue == 0.0 {
        warn!("total operating revenue is 0, operating profit margin not computable");
        return None;
    }
    Some(safe_divide(
        operating_profit,
        revenue,
        0.0,
        config.min_denominator,
    ))
}

/// EBITDA margin = (operating profit + approximated depreciation) / total
/// operating revenue. Depreciation is `config.depreciation_fraction` of
/// total operating cost.
pub fn ebitda_margin(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let operating_profit = get_value(record, CanonicalField::OperatingProfit, 0.0);
    let revenue = get_value(record, CanonicalField::TotalOperatingRevenue, 0.0);
    let operating_cost = get_value(record, CanonicalField::TotalOperatingCost, 0.0);

    if revenue == 0.0 {
        warn!("total operating revenue is 0, EBITDA margin not computable");
        return None;
    }
    let depreciation = operating_cost * config.depreciation_fraction;
    let ebitda = operating_profit + depreciation;
    Some(safe_divide(ebitda, revenue, 0.0, config.min_denominator))
}

/// Return on assets = net profit attributable to parent / total assets.
pub fn roa(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let net_profit = get_value(record, CanonicalField::NetProfitAttributableToParent, 0.0);
    let total_assets = get_value(record, CanonicalField::TotalAssets, 0.0);

    if total_assets == 0.0 {
        warn!("total assets is 0, ROA not computable");
        return None;
    }
    Some(safe_divide(
        net_profit,
        total_assets,
        0.0,
        config.min_denominator,
    ))
}

/// Return on invested capital = operating profit / (total assets - current
/// liabilities). Non-positive invested capital is not computable.
pub fn roic(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let operating_profit = get_value(record, CanonicalField::OperatingProfit, 0.0);
    let total_assets = get_value(record, CanonicalField::TotalAssets, 0.0);
    let current_liabilities = get_value(record, CanonicalField::TotalCurrentLiabilities, 0.0);

    let invested_capital = total_assets - current_liabilities;
    if invested_capital <= 0.0 {
        warn!("invested capital is not positive, ROIC not computable");
        return None;
    }
    Some(safe_divide(
        operating_profit,
        invested_capital,
        0.0,
        config.min_denominator,
    ))
}
