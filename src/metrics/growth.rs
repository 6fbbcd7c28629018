//! Period-over-period growth rates.
//!
//! Every rate needs the immediately preceding period; a missing prior record
//! or a zero prior value is "not computable", never an error.

use crate::metrics::MetricsConfig;
use crate::numeric::{get_value, safe_divide};
use crate::schema::{CanonicalField, CanonicalRecord};
use log::warn;

fn growth_rate(
    current: &CanonicalRecord,
    previous: Option<&CanonicalRecord>,
    field: CanonicalField,
    config: &MetricsConfig,
) -> Option<f64> {
    let Some(previous) = previous else {
        warn!("no prior period, {field} growth rate not computable");
        return None;
    };

    let current_value = get_value(current, field, 0.0);
    let previous_value = get_value(previous, field, 0.0);

    if previous_value == 0.0 {
        warn!("prior {field} is 0, growth rate not computable");
        return None;
    }
    Some(safe_divide(
        current_value - previous_value,
        previous_value,
        0.0,
        config.min_denominator,
    ))
}

/// Revenue growth = (current revenue - prior revenue) / prior revenue.
pub fn revenue_growth_rate(
    current: &CanonicalRecord,
    previous: Option<&CanonicalRecord>,
    config: &MetricsConfig,
) -> Option<f64> {
    growth_rate(
        current,
        previous,
        CanonicalField::TotalOperatingRevenue,
        config,
    )
}

/// Profit growth = (current net profit - prior net profit) / prior net profit.
pub fn profit_growth_rate(
    current: &CanonicalRecord,
    previous: Option<&CanonicalRecord>,
    config: &MetricsConfig,
) -> Option<f64> {
    growth_rate(
        current,
        previous,
        CanonicalField::NetProfitAttributableToParent,
        config,
    )
}

/// Asset growth = (current total assets - prior total assets) / prior total
/// assets.
pub fn asset_growth_rate(
    current: &CanonicalRecord,
    previous: Option<&CanonicalRecord>,
    config: &MetricsConfig,
) -> Option<f64> {
    growth_rate(current, previous, CanonicalField::TotalAssets, config)
}

/// Equity growth = (current owners' equity - prior owners' equity) / prior
/// owners' equity.
pub fn equity_growth_rate(
    current: &CanonicalRecord,
    previous: Option<&CanonicalRecord>,
    config: &MetricsConfig,
) -> Option<f64> {
    growth_rate(current, previous, CanonicalField::TotalOwnersEquity, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(CanonicalField, f64)]) -> CanonicalRecord {
        let mut record = CanonicalRecord::new();
        for (field, value) in fields {
            record.set(*field, *value);
        }
        record
    }

    #[test]
    fn test_revenue_growth() {
        let config = MetricsConfig::default();
        let previous = record(&[(CanonicalField::TotalOperatingRevenue, 100.0)]);
        let current = record(&[(CanonicalField::TotalOperatingRevenue, 150.0)]);

        assert_eq!(
            revenue_growth_rate(&current, Some(&previous), &config),
            Some(0.5)
        );
        assert_eq!(revenue_growth_rate(&current, None, &config), None);
    }

    #[test]
    fn test_zero_prior_is_not_computable() {
        let config = MetricsConfig::default();
        let previous = record(&[(CanonicalField::TotalAssets, 0.0)]);
        let current = record(&[(CanonicalField::TotalAssets, 500.0)]);
        assert_eq!(asset_growth_rate(&current, Some(&previous), &config), None);
    }

    #[test]
    fn test_negative_growth() {
        let config = MetricsConfig::default();
        let previous = record(&[(CanonicalField::NetProfitAttributableToParent, 200.0)]);
        let current = record(&[(CanonicalField::NetProfitAttributableToParent, 150.0)]);
        assert_eq!(
            profit_growth_rate(&current, Some(&previous), &config),
            Some(-0.25)
        );
    }

    #[test]
    fn test_equity_growth() {
        let config = MetricsConfig::default();
        let previous = record(&[(CanonicalField::TotalOwnersEquity, 400.0)]);
        let current = record(&[(CanonicalField::TotalOwnersEquity, 440.0)]);
        let rate = equity_growth_rate(&current, Some(&previous), &config).unwrap();
        assert!((rate - 0.1).abs() < 1e-12);
    }
}
