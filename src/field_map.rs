//! Per-source field maps.
//!
//! Each table translates one collector's native keys into canonical fields.
//! The tables are hand-curated against the live payloads of each source and
//! are deliberately asymmetric: a source only maps what it actually serves
//! (Tonghuashun, for instance, never supplies a company code). Aliases for
//! the same canonical field are listed in payload-precedence order; a later
//! entry overwrites an earlier one when both raw keys are present.

use crate::schema::{CanonicalField, FieldValue, SourceId};
use serde_json::Value;

pub type FieldMapping = &'static [(&'static str, CanonicalField)];

/// The key translation table for one source. Raw keys absent from the table
/// are ignored during normalization.
pub fn field_map(source: SourceId) -> FieldMapping {
    match source {
        SourceId::Cninfo => CNINFO_FIELDS,
        SourceId::Szse => SZSE_FIELDS,
        SourceId::Eastmoney => EASTMONEY_FIELDS,
        SourceId::Tonghuashun => TONGHUASHUN_FIELDS,
    }
}

static CNINFO_FIELDS: FieldMapping = &[
    ("公司代码", CanonicalField::CompanyCode),
    ("公司简称", CanonicalField::CompanyName),
    ("年份", CanonicalField::Year),
    ("货币资金", CanonicalField::CashAndCashEquivalents),
    ("流动资产", CanonicalField::TotalCurrentAssets),
    ("非流动资产", CanonicalField::TotalNonCurrentAssets),
    ("总资产", CanonicalField::TotalAssets),
    ("流动负债", CanonicalField::TotalCurrentLiabilities),
    ("非流动负债", CanonicalField::TotalNonCurrentLiabilities),
    ("总负债", CanonicalField::TotalLiabilities),
    ("实收资本（或股本）", CanonicalField::PaidInCapital),
    ("未分配利润", CanonicalField::RetainedEarnings),
    ("所有者权益", CanonicalField::TotalOwnersEquity),
    ("营业总收入", CanonicalField::TotalOperatingRevenue),
    ("营业总成本", CanonicalField::TotalOperatingCost),
    ("营业利润", CanonicalField::OperatingProfit),
    ("利润总额", CanonicalField::TotalProfit),
    ("所得税", CanonicalField::IncomeTaxExpense),
    ("归属母公司净利润", CanonicalField::NetProfitAttributableToParent),
    ("经营活动产生的现金流量净额", CanonicalField::NetCashFlowFromOperatingActivities),
    ("投资活动产生的现金流量净额", CanonicalField::NetCashFlowFromInvestingActivities),
    ("筹资活动产生的现金流量净额", CanonicalField::NetCashFlowFromFinancingActivities),
    ("基本每股收益", CanonicalField::EarningsPerShare),
    ("扣非每股收益", CanonicalField::EarningsPerShareExcludingNonRecurring),
    ("净资产收益率", CanonicalField::Roe),
    ("每股净资产", CanonicalField::BookValuePerShare),
    ("销售毛利率", CanonicalField::GrossProfitMargin),
    ("应收账款周转率", CanonicalField::AccountsReceivableTurnover),
    ("应收账款周转天数", CanonicalField::AccountsReceivableDays),
    ("存货周转率", CanonicalField::InventoryTurnover),
    ("存货周转天数", CanonicalField::InventoryDays),
    ("分红方案", CanonicalField::DividendPlan),
    ("分红年度", CanonicalField::DividendYear),
    ("行业名称", CanonicalField::Industry),
    ("股息率", CanonicalField::DividendYield),
    ("公告日期", CanonicalField::AnnouncementDate),
];

static SZSE_FIELDS: FieldMapping = &[
    ("公司代码", CanonicalField::CompanyCode),
    ("公司简称", CanonicalField::CompanyName),
    ("年份", CanonicalField::Year),
    ("货币资金", CanonicalField::CashAndCashEquivalents),
    ("流动资产", CanonicalField::TotalCurrentAssets),
    ("非流动资产", CanonicalField::TotalNonCurrentAssets),
    ("总资产", CanonicalField::TotalAssets),
    ("流动负债", CanonicalField::TotalCurrentLiabilities),
    ("非流动负债", CanonicalField::TotalNonCurrentLiabilities),
    ("总负债", CanonicalField::TotalLiabilities),
    ("实收资本", CanonicalField::PaidInCapital),
    ("未分配利润", CanonicalField::RetainedEarnings),
    ("所有者权益", CanonicalField::TotalOwnersEquity),
    ("股东权益", CanonicalField::TotalOwnersEquity),
    ("营业总收入", CanonicalField::TotalOperatingRevenue),
    ("营业收入", CanonicalField::TotalOperatingRevenue),
    ("营业总成本", CanonicalField::TotalOperatingCost),
    ("营业利润", CanonicalField::OperatingProfit),
    ("利润总额", CanonicalField::TotalProfit),
    ("所得税", CanonicalField::IncomeTaxExpense),
    ("归属于本行股东的净利润", CanonicalField::NetProfitAttributableToParent),
    ("净利润", CanonicalField::NetProfitAttributableToParent),
    ("经营活动产生的现金流量净额", CanonicalField::NetCashFlowFromOperatingActivities),
    ("投资活动产生的现金流量净额", CanonicalField::NetCashFlowFromInvestingActivities),
    ("筹资活动产生的现金流量净额", CanonicalField::NetCashFlowFromFinancingActivities),
    ("基本每股收益", CanonicalField::EarningsPerShare),
    ("扣非每股收益", CanonicalField::EarningsPerShareExcludingNonRecurring),
    ("净资产收益率", CanonicalField::Roe),
    ("加权平均净资产收益率", CanonicalField::Roe),
    ("每股净资产", CanonicalField::BookValuePerShare),
    ("销售毛利率", CanonicalField::GrossProfitMargin),
    ("应收账款周转率", CanonicalField::AccountsReceivableTurnover),
    ("应收账款周转天数", CanonicalField::AccountsReceivableDays),
    ("存货周转率", CanonicalField::InventoryTurnover),
    ("存货周转天数", CanonicalField::InventoryDays),
    ("分红方案", CanonicalField::DividendPlan),
    ("分红年度", CanonicalField::DividendYear),
    ("行业名称", CanonicalField::Industry),
    ("股息率", CanonicalField::DividendYield),
    ("公告日期", CanonicalField::AnnouncementDate),
];

static EASTMONEY_FIELDS: FieldMapping = &[
    ("SECURITY_CODE", CanonicalField::CompanyCode),
    ("SECURITY_NAME_ABBR", CanonicalField::CompanyName),
    ("DATAYEAR", CanonicalField::Year),
    ("REPORTDATE", CanonicalField::Year),
    ("TOTAL_OPERATE_INCOME", CanonicalField::TotalOperatingRevenue),
    ("PARENT_NETPROFIT", CanonicalField::NetProfitAttributableToParent),
    ("TOTAL_ASSETS", CanonicalField::TotalAssets),
    ("TOTAL_LIABILITIES", CanonicalField::TotalLiabilities),
    ("PAID_IN_CAPITAL", CanonicalField::PaidInCapital),
    ("RETAINED_EARNINGS", CanonicalField::RetainedEarnings),
    ("TOTAL_OWNERS_EQUITY", CanonicalField::TotalOwnersEquity),
    ("BASIC_EPS", CanonicalField::EarningsPerShare),
    ("DEDUCT_BASIC_EPS", CanonicalField::EarningsPerShareExcludingNonRecurring),
    ("WEIGHTAVG_ROE", CanonicalField::Roe),
    ("BPS", CanonicalField::BookValuePerShare),
    ("GROSS_PROFIT_MARGIN", CanonicalField::GrossProfitMargin),
    ("ACCOUNTS_RECEIVABLE_TURNOVER", CanonicalField::AccountsReceivableTurnover),
    ("ACCOUNTS_RECEIVABLE_DAYS", CanonicalField::AccountsReceivableDays),
    ("INVENTORY_TURNOVER", CanonicalField::InventoryTurnover),
    ("INVENTORY_DAYS", CanonicalField::InventoryDays),
    ("DIVIDEND_PLAN", CanonicalField::DividendPlan),
    ("PAYYEAR", CanonicalField::DividendYear),
    ("PUBLISHNAME", CanonicalField::Industry),
    ("DIVIDEND_YIELD", CanonicalField::DividendYield),
    ("NOTICE_DATE", CanonicalField::AnnouncementDate),
];

static TONGHUASHUN_FIELDS: FieldMapping = &[
    ("date", CanonicalField::Year),
    ("营业总收入", CanonicalField::TotalOperatingRevenue),
    ("净利润", CanonicalField::NetProfitAttributableToParent),
    ("总资产", CanonicalField::TotalAssets),
    ("总负债", CanonicalField::TotalLiabilities),
    ("每股净资产", CanonicalField::BookValuePerShare),
    ("基本每股收益", CanonicalField::EarningsPerShare),
    ("净资产收益率", CanonicalField::Roe),
    ("销售毛利率", CanonicalField::GrossProfitMargin),
    ("应收账款周转率", CanonicalField::AccountsReceivableTurnover),
    ("应收账款周转天数", CanonicalField::AccountsReceivableDays),
    ("存货周转率", CanonicalField::InventoryTurnover),
    ("存货周转天数", CanonicalField::InventoryDays),
    ("分红方案", CanonicalField::DividendPlan),
    ("分红年度", CanonicalField::DividendYear),
    ("行业名称", CanonicalField::Industry),
    ("股息率", CanonicalField::DividendYield),
];

/// Year values arrive as bare years ("2023"), report dates ("2023-12-31") or
/// integers. A string of at least four characters keeps its first four; an
/// integer becomes its decimal rendering; anything else passes through
/// unchanged.
pub fn coerce_year(raw: &Value) -> Option<FieldValue> {
    match raw {
        Value::String(s) => {
            if s.chars().count() >= 4 {
                Some(FieldValue::Text(s.chars().take(4).collect()))
            } else {
                Some(FieldValue::Text(s.clone()))
            }
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(FieldValue::Text(i.to_string()))
            } else {
                n.as_f64().map(FieldValue::Number)
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_source_maps_identity_it_serves() {
        for source in [SourceId::Cninfo, SourceId::Szse, SourceId::Eastmoney] {
            let map = field_map(source);
            assert!(
                map.iter().any(|(_, f)| *f == CanonicalField::CompanyCode),
                "{source} should map a company code key"
            );
            assert!(map.iter().any(|(_, f)| *f == CanonicalField::Year));
        }
        // Tonghuashun serves per-year indicator rows with no identity columns.
        let ths = field_map(SourceId::Tonghuashun);
        assert!(!ths.iter().any(|(_, f)| *f == CanonicalField::CompanyCode));
        assert!(ths.iter().any(|(_, f)| *f == CanonicalField::Year));
    }

    /// Pins the hand-curated coverage of each source map. The asymmetry is
    /// intentional; this fixture exists so a silent gap shows up as a diff.
    #[test]
    fn test_field_coverage_parity_fixture() {
        let coverage = |source: SourceId| {
            let map = field_map(source);
            CanonicalField::ALL
                .iter()
                .filter(|f| map.iter().any(|(_, mapped)| mapped == *f))
                .count()
        };

        assert_eq!(coverage(SourceId::Cninfo), 36);
        assert_eq!(coverage(SourceId::Szse), 36);
        assert_eq!(coverage(SourceId::Eastmoney), 24);
        assert_eq!(coverage(SourceId::Tonghuashun), 17);

        let eastmoney = field_map(SourceId::Eastmoney);
        for field in [
            CanonicalField::CashAndCashEquivalents,
            CanonicalField::TotalCurrentAssets,
            CanonicalField::OperatingProfit,
            CanonicalField::NetCashFlowFromOperatingActivities,
        ] {
            assert!(
                !eastmoney.iter().any(|(_, f)| *f == field),
                "eastmoney unexpectedly learned to supply {field}"
            );
        }
    }

    #[test]
    fn test_alias_precedence_order() {
        // The second alias must come later so it wins when both are present.
        let szse = field_map(SourceId::Szse);
        let pos = |key: &str| szse.iter().position(|(k, _)| *k == key).unwrap();
        assert!(pos("所有者权益") < pos("股东权益"));
        assert!(pos("归属于本行股东的净利润") < pos("净利润"));

        let eastmoney = field_map(SourceId::Eastmoney);
        let pos = |key: &str| eastmoney.iter().position(|(k, _)| *k == key).unwrap();
        assert!(pos("DATAYEAR") < pos("REPORTDATE"));
    }

    #[test]
    fn test_coerce_year() {
        assert_eq!(
            coerce_year(&Value::String("2023-12-31".into())),
            Some(FieldValue::Text("2023".into()))
        );
        assert_eq!(
            coerce_year(&Value::String("2023".into())),
            Some(FieldValue::Text("2023".into()))
        );
        assert_eq!(
            coerce_year(&Value::String("23".into())),
            Some(FieldValue::Text("23".into()))
        );
        assert_eq!(
            coerce_year(&serde_json::json!(2023)),
            Some(FieldValue::Text("2023".into()))
        );
        assert_eq!(coerce_year(&Value::Bool(true)), None);
    }
}
