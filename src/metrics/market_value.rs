//! Market-value ratios.
//!
//! The only calculators with inputs outside the canonical record: a market
//! price and, for the price-to-sales ratio, a share count, both supplied by
//! the caller.

use crate::metrics::MetricsConfig;
use crate::numeric::{get_value, safe_divide};
use crate::schema::{CanonicalField, CanonicalRecord};
use log::warn;

/// Price-to-earnings = market price / earnings per share. Non-positive
/// prices and non-positive earnings are not computable.
pub fn pe_ratio(record: &CanonicalRecord, market_price: f64, config: &MetricsConfig) -> Option<f64> {
    if !market_price.is_finite() || market_price <= 0.0 {
        warn!("market price is not positive, PE ratio not computable");
        return None;
    }
    let eps = get_value(record, CanonicalField::EarningsPerShare, 0.0);
    if eps <= 0.0 {
        warn!("earnings per share is not positive, PE ratio not computable");
        return None;
    }
    Some(safe_divide(market_price, eps, 0.0, config.min_denominator))
}

/// Price-to-book = market price / book value per share.
pub fn pb_ratio(record: &CanonicalRecord, market_price: f64, config: &MetricsConfig) -> Option<f64> {
    if !market_price.is_finite() || market_price <= 0.0 {
        warn!("market price is not positive, PB ratio not computable");
        return None;
    }
    let book_value_per_share = get_value(record, CanonicalField::BookValuePerShare, 0.0);
    if book_value_per_share <= 0.0 {
        warn!("book value per share is not positive, PB ratio not computable");
        return None;
    }
    Some(safe_divide(
        market_price,
        book_value_per_share,
        0.0,
        config.min_denominator,
    ))
}

/// Price-to-sales = (market price * shares outstanding) / total operating
/// revenue.
pub fn ps_ratio(
    record: &CanonicalRecord,
    market_price: f64,
    shares_outstanding: f64,
    config: &MetricsConfig,
) -> Option<f64> {
    if !market_price.is_finite() || market_price <= 0.0 {
        warn!("market price is not positive, PS ratio not computable");
        return None;
    }
    if !shares_outstanding.is_finite() || shares_outstanding <= 0.0 {
        warn!("shares outstanding is not positive, PS ratio not computable");
        return None;
    }
    let revenue = get_value(record, CanonicalField::TotalOperatingRevenue, 0.0);
    if revenue <= 0.0 {
        warn!("total operating revenue is not positive, PS ratio not computable");
        return None;
    }
    let market_cap = market_price * shares_outstanding;
    Some(safe_divide(market_cap, revenue, 0.0, config.min_denominator))
}
