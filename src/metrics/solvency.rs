//! Solvency ratios.

use crate::metrics::MetricsConfig;
use crate::numeric::{get_value, safe_divide};
use crate::schema::{CanonicalField, CanonicalRecord};
use log::warn;

/// Current ratio = current assets / current liabilities.
pub fn current_ratio(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let current_assets = get_value(record, CanonicalField::TotalCurrentAssets, 0.0);
    let current_liabilities = get_value(record, CanonicalField::TotalCurrentLiabilities, 0.0);

    if current_liabilities == 0.0 {
        warn!("current liabilities is 0, current ratio not computable");
        return None;
    }
    Some(safe_divide(
        current_assets,
        current_liabilities,
        0.0,
        config.min_denominator,
    ))
}

/// Quick ratio = (current assets - approximated inventory) / current
/// liabilities. Inventory is `config.inventory_fraction` of current assets.
pub fn quick_ratio(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let current_assets = get_value(record, CanonicalField::TotalCurrentAssets, 0.0);
    let current_liabilities = get_value(record, CanonicalField::TotalCurrentLiabilities, 0.0);

    if current_liabilities == 0.0 {
        warn!("current liabilities is 0, quick ratio not computable");
        return None;
    }
    let inventory = current_assets * config.inventory_fraction;
    let quick_assets = current_assets - inventory;
    Some(safe_divide(
        quick_assets,
        current_liabilities,
        0.0,
        config.min_denominator,
    ))
}

/// Cash ratio = cash and cash equivalents / current liabilities.
pub fn cash_ratio(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let cash = get_value(record, CanonicalField::CashAndCashEquivalents, 0.0);
    let current_liabilities = get_value(record, CanonicalField::TotalCurrentLiabilities, 0.0);

    if current_liabilities == 0.0 {
        warn!("current liabilities is 0, cash ratio not computable");
        return None;
    }
    Some(safe_divide(
        cash,
        current_liabilities,
        0.0,
        config.min_denominator,
    ))
}

/// Debt-to-equity = total liabilities / total owners' equity.
pub fn debt_to_equity_ratio(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let total_liabilities = get_value(record, CanonicalField::TotalLiabilities, 0.0);
    let total_equity = get_value(record, CanonicalField::TotalOwnersEquity, 0.0);

    if total_equity == 0.0 {
        warn!("total owners' equity is 0, debt-to-equity ratio not computable");
        return None;
    }
    Some(safe_divide(
        total_liabilities,
        total_equity,
        0.0,
        config.min_denominator,
    ))
}

/// Debt-to-assets = total liabilities / total assets.
pub fn debt_to_assets_ratio(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let total_liabilities = get_value(record, CanonicalField::TotalLiabilities, 0.0);
    let total_assets = get_value(record, CanonicalField::TotalAssets, 0.0);

    if total_assets == 0.0 {
        warn!("total assets is 0, debt-to-assets ratio not computable");
        return None;
    }
    Some(safe_divide(
        total_liabilities,
        total_assets,
        0.0,
        config.min_denominator,
    ))
}
