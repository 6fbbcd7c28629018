//! Operating-efficiency ratios.

use crate::metrics::MetricsConfig;
use crate::numeric::{get_value, safe_divide};
use crate::schema::{CanonicalField, CanonicalRecord};
use log::warn;

/// Total asset turnover = total operating revenue / total assets.
pub fn total_asset_turnover(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let revenue = get_value(record, CanonicalField::TotalOperatingRevenue, 0.0);
    let total_assets = get_value(record, CanonicalField::TotalAssets, 0.0);

    if total_assets == 0.0 {
        warn!("total assets is 0, total asset turnover not computable");
        return None;
    }
    Some(safe_divide(
        revenue,
        total_assets,
        0.0,
        config.min_denominator,
    ))
}

/// Fixed asset turnover = total operating revenue / non-current assets.
pub fn fixed_asset_turnover(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let revenue = get_value(record, CanonicalField::TotalOperatingRevenue, 0.0);
    let non_current_assets = get_value(record, CanonicalField::TotalNonCurrentAssets, 0.0);

    if non_current_assets == 0.0 {
        warn!("non-current assets is 0, fixed asset turnover not computable");
        return None;
    }
    Some(safe_divide(
        revenue,
        non_current_assets,
        0.0,
        config.min_denominator,
    ))
}

/// Equity turnover = total operating revenue / total owners' equity.
pub fn equity_turnover(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let revenue = get_value(record, CanonicalField::TotalOperatingRevenue, 0.0);
    let total_equity = get_value(record, CanonicalField::TotalOwnersEquity, 0.0);

    if total_equity == 0.0 {
        warn!("total owners' equity is 0, equity turnover not computable");
        return None;
    }
    Some(safe_divide(
        revenue,
        total_equity,
        0.0,
        config.min_denominator,
    ))
}

/// Working capital turnover = total operating revenue / (current assets -
/// current liabilities). Non-positive working capital is not computable.
pub fn working_capital_turnover(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let revenue = get_value(record, CanonicalField::TotalOperatingRevenue, 0.0);
    let current_assets = get_value(record, CanonicalField::TotalCurrentAssets, 0.0);
    let current_liabilities = get_value(record, CanonicalField::TotalCurrentLiabilities, 0.0);

    let working_capital = current_assets - current_liabilities;
    if working_capital <= 0.0 {
        warn!("working capital is not positive, working capital turnover not computable");
        return None;
    }
    Some(safe_divide(
        revenue,
        working_capital,
        0.0,
        config.min_denominator,
    ))
}
