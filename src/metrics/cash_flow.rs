//! Cash-flow ratios.

use crate::metrics::MetricsConfig;
use crate::numeric::{get_value, safe_divide};
use crate::schema::{CanonicalField, CanonicalRecord};
use log::warn;

/// Operating cash flow ratio = net operating cash flow / current liabilities.
pub fn operating_cash_flow_ratio(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let operating_cash_flow = get_value(
        record,
        CanonicalField::NetCashFlowFromOperatingActivities,
        0.0,
    );
    let current_liabilities = get_value(record, CanonicalField::TotalCurrentLiabilities, 0.0);

    if current_liabilities == 0.0 {
        warn!("current liabilities is 0, operating cash flow ratio not computable");
        return None;
    }
    Some(safe_divide(
        operating_cash_flow,
        current_liabilities,
        0.0,
        config.min_denominator,
    ))
}

/// Cash flow coverage = net operating cash flow / total liabilities.
pub fn cash_flow_coverage_ratio(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let operating_cash_flow = get_value(
        record,
        CanonicalField::NetCashFlowFromOperatingActivities,
        0.0,
    );
    let total_liabilities = get_value(record, CanonicalField::TotalLiabilities, 0.0);

    if total_liabilities == 0.0 {
        warn!("total liabilities is 0, cash flow coverage not computable");
        return None;
    }
    Some(safe_divide(
        operating_cash_flow,
        total_liabilities,
        0.0,
        config.min_denominator,
    ))
}

/// Cash flow to revenue = net operating cash flow / total operating revenue.
pub fn cash_flow_to_revenue_ratio(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let operating_cash_flow = get_value(
        record,
        CanonicalField::NetCashFlowFromOperatingActivities,
        0.0,
    );
    let revenue = get_value(record, CanonicalField::TotalOperatingRevenue, 0.0);

    if revenue == 0.0 {
        warn!("total operating revenue is 0, cash flow to revenue not computable");
        return None;
    }
    Some(safe_divide(
        operating_cash_flow,
        revenue,
        0.0,
        config.min_denominator,
    ))
}

/// Free cash flow = net operating cash flow + net investing cash flow.
/// A sum, not a ratio; missing inputs extract as 0.
pub fn free_cash_flow(record: &CanonicalRecord) -> Option<f64> {
    let operating_cash_flow = get_value(
        record,
        CanonicalField::NetCashFlowFromOperatingActivities,
        0.0,
    );
    let investing_cash_flow = get_value(
        record,
        CanonicalField::NetCashFlowFromInvestingActivities,
        0.0,
    );
    Some(operating_cash_flow + investing_cash_flow)
}

/// Cash flow quality = net operating cash flow / net profit attributable to
/// parent.
pub fn cash_flow_quality_ratio(record: &CanonicalRecord, config: &MetricsConfig) -> Option<f64> {
    let operating_cash_flow = get_value(
        record,
        CanonicalField::NetCashFlowFromOperatingActivities,
        0.0,
    );
    let net_profit = get_value(record, CanonicalField::NetProfitAttributableToParent, 0.0);

    if net_profit == 0.0 {
        warn!("net profit is 0, cash flow quality not computable");
        return None;
    }
    Some(safe_divide(
        operating_cash_flow,
        net_profit,
        0.0,
        config.min_denominator,
    ))
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
    fn test_cash_flow_ratios() {
        let config = MetricsConfig::default();
        let data = record(&[
            (CanonicalField::NetCashFlowFromOperatingActivities, 120.0),
            (CanonicalField::TotalCurrentLiabilities, 300.0),
            (CanonicalField::TotalLiabilities, 600.0),
            (CanonicalField::TotalOperatingRevenue, 480.0),
            (CanonicalField::NetProfitAttributableToParent, 100.0),
        ]);
        assert_eq!(operating_cash_flow_ratio(&data, &config), Some(0.4));
        assert_eq!(cash_flow_coverage_ratio(&data, &config), Some(0.2));
        assert_eq!(cash_flow_to_revenue_ratio(&data, &config), Some(0.25));
        assert_eq!(cash_flow_quality_ratio(&data, &config), Some(1.2));
    }

    #[test]
    fn test_free_cash_flow_is_a_sum() {
        let data = record(&[
            (CanonicalField::NetCashFlowFromOperatingActivities, 120.0),
            (CanonicalField::NetCashFlowFromInvestingActivities, -80.0),
        ]);
        assert_eq!(free_cash_flow(&data), Some(40.0));
        // Missing inputs degrade to 0, not to "not computable".
        assert_eq!(free_cash_flow(&CanonicalRecord::new()), Some(0.0));
    }

    #[test]
    fn test_zero_denominators() {
        let config = MetricsConfig::default();
        let empty = CanonicalRecord::new();
        assert_eq!(operating_cash_flow_ratio(&empty, &config), None);
        assert_eq!(cash_flow_coverage_ratio(&empty, &config), None);
        assert_eq!(cash_flow_to_revenue_ratio(&empty, &config), None);
        assert_eq!(cash_flow_quality_ratio(&empty, &config), None);
    }
}
