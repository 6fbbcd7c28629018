//! Converts raw collector output into canonical records.
//!
//! Every source delivers a different document shape. The shape is resolved
//! once per document into a [`RawShape`] and dispatched explicitly; all
//! branches funnel into the same record-producing function.

use crate::field_map::{coerce_year, field_map};
use crate::schema::{CanonicalField, CanonicalRecord, FieldValue, SourceId};
use crate::statements::expand_year_table;
use log::warn;
use serde_json::{Map, Value};

/// Key under which SZSE wraps its per-period sub-records.
const PERIOD_LIST_KEY: &str = "报告期";
/// Key holding the indicator map inside one period sub-record.
const PERIOD_METRICS_KEY: &str = "指标";

/// Structural variants a raw document can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawShape {
    /// One flat object per (company, period).
    Flat,
    /// A JSON array of records.
    RecordList,
    /// Records nested one level down in a `result.data` envelope.
    Envelope,
    /// A single object holding a list of period-keyed sub-records.
    PeriodList,
    /// Statement rows pivoted by year columns (Cninfo raw tables).
    YearTable,
}

/// Resolves the structural shape of one raw document. Returns `None` for
/// documents that are not JSON objects or arrays; those carry no records.
pub fn detect_shape(source: SourceId, doc: &Value) -> Option<RawShape> {
    match doc {
        Value::Array(_) => Some(RawShape::RecordList),
        Value::Object(obj) => {
            if source == SourceId::Eastmoney
                && obj
                    .get("result")
                    .and_then(|r| r.get("data"))
                    .is_some_and(Value::is_array)
            {
                return Some(RawShape::Envelope);
            }
            if source == SourceId::Cninfo
                && obj
                    .get("raw_data")
                    .and_then(|r| r.get("data"))
                    .and_then(|d| d.get("records"))
                    .is_some_and(Value::is_array)
            {
                return Some(RawShape::YearTable);
            }
            if obj.get(PERIOD_LIST_KEY).is_some_and(Value::is_array) {
                return Some(RawShape::PeriodList);
            }
            Some(RawShape::Flat)
        }
        _ => None,
    }
}

/// Maps one raw record into the standard schema: every canonical field starts
/// null, the source's field map fills whatever the raw record supplies, and
/// the record is tagged with its provenance for the merge engine.
pub fn normalize_record(source: SourceId, raw: &Map<String, Value>) -> CanonicalRecord {
    let mut record = CanonicalRecord::with_source(source);
    for (raw_key, field) in field_map(source) {
        let Some(value) = raw.get(*raw_key) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        let converted = if *field == CanonicalField::Year {
            coerce_year(value)
        } else {
            field_value_from_raw(value)
        };
        if let Some(converted) = converted {
            record.set(*field, converted);
        }
    }
    record
}

/// Expands one raw document into canonical records according to its shape.
pub fn normalize_document(source: SourceId, doc: &Value) -> Vec<CanonicalRecord> {
    match detect_shape(source, doc) {
        Some(RawShape::Flat) => {
            let obj = doc.as_object().expect("flat shape is an object");
            vec![normalize_record(source, obj)]
        }
        Some(RawShape::RecordList) => {
            let elements = doc.as_array().expect("record list shape is an array");
            elements
                .iter()
                .flat_map(|el| normalize_element(source, el))
                .collect()
        }
        Some(RawShape::Envelope) => {
            let elements = doc["result"]["data"]
                .as_array()
                .expect("envelope shape wraps an array");
            elements
                .iter()
                .flat_map(|el| normalize_element(source, el))
                .collect()
        }
        Some(RawShape::PeriodList) => {
            let obj = doc.as_object().expect("period list shape is an object");
            expand_period_list(source, obj)
        }
        Some(RawShape::YearTable) => expand_year_table(doc)
            .into_iter()
            .map(|(year, mut row)| {
                row.insert("年份".to_string(), Value::String(year));
                normalize_record(source, &row)
            })
            .collect(),
        None => {
            warn!("{source}: document is not an object or array, no records taken");
            Vec::new()
        }
    }
}

/// One element of a record list. SZSE mixes flat records and period-keyed
/// sub-record containers in the same array.
fn normalize_element(source: SourceId, element: &Value) -> Vec<CanonicalRecord> {
    match element {
        Value::Object(obj) if obj.get(PERIOD_LIST_KEY).is_some_and(Value::is_array) => {
            expand_period_list(source, obj)
        }
        Value::Object(obj) => vec![normalize_record(source, obj)],
        _ => {
            warn!("{source}: skipping non-object element in record list");
            Vec::new()
        }
    }
}

/// Expands a period-keyed container into one record per period. Identity
/// fields present at the container's top level are inherited by any
/// sub-record that does not carry them itself.
fn expand_period_list(source: SourceId, outer: &Map<String, Value>) -> Vec<CanonicalRecord> {
    let identity = normalize_record(source, outer);
    let periods = outer[PERIOD_LIST_KEY].as_array().expect("checked by caller");

    let mut records = Vec::with_capacity(periods.len());
    for period in periods {
        let Some(metrics) = period.get(PERIOD_METRICS_KEY).and_then(Value::as_object) else {
            warn!("{source}: period entry without an indicator map, skipped");
            continue;
        };
        let mut record = normalize_record(source, metrics);
        for field in [CanonicalField::CompanyCode, CanonicalField::CompanyName] {
            if record.is_null(field) {
                if let Some(value) = identity.get(field) {
                    record.set(field, value.clone());
                }
            }
        }
        records.push(record);
    }
    records
}

fn field_value_from_raw(raw: &Value) -> Option<FieldValue> {
    match raw {
        Value::Number(n) => n.as_f64().map(FieldValue::Number),
        Value::String(s) => Some(FieldValue::Text(s.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_record_normalization() {
        let raw = json!({
            "公司代码": "000001",
            "公司简称": "平安银行",
            "年份": "2023",
            "总资产": 5_000_000.0,
            "营业总收入": "1,764.76",
            "未知字段": "ignored",
        });
        let records = normalize_document(SourceId::Cninfo, &raw);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.source(), Some(SourceId::Cninfo));
        assert_eq!(record.company_code(), Some("000001"));
        assert_eq!(record.year(), Some("2023"));
        assert_eq!(
            record.get(CanonicalField::TotalAssets),
            Some(&FieldValue::Number(5_000_000.0))
        );
        // Numeric-looking strings stay text until metric extraction.
        assert_eq!(
            record.get(CanonicalField::TotalOperatingRevenue),
            Some(&FieldValue::Text("1,764.76".into()))
        );
        assert!(record.is_null(CanonicalField::Roe));
    }

    #[test]
    fn test_null_raw_values_leave_field_null() {
        let raw = json!({"公司代码": "000001", "年份": "2023", "总资产": null});
        let record = &normalize_document(SourceId::Cninfo, &raw)[0];
        assert!(record.is_null(CanonicalField::TotalAssets));
    }

    #[test]
    fn test_eastmoney_envelope_and_report_date_year() {
        let doc = json!({
            "result": {
                "data": [
                    {
                        "SECURITY_CODE": "000002",
                        "SECURITY_NAME_ABBR": "万科A",
                        "REPORTDATE": "2022-12-31",
                        "TOTAL_OPERATE_INCOME": 503_838_000_000.0,
                    },
                    {
                        "SECURITY_CODE": "000002",
                        "SECURITY_NAME_ABBR": "万科A",
                        "DATAYEAR": 2021,
                        "TOTAL_OPERATE_INCOME": 452_798_000_000.0,
                    }
                ]
            }
        });
        assert_eq!(
            detect_shape(SourceId::Eastmoney, &doc),
            Some(RawShape::Envelope)
        );

        let records = normalize_document(SourceId::Eastmoney, &doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year(), Some("2022"));
        assert_eq!(records[1].year(), Some("2021"));
    }

    #[test]
    fn test_szse_period_list_inherits_identity() {
        let doc = json!([{
            "公司代码": "000001",
            "公司简称": "平安银行",
            "报告期": [
                {"指标": {"年份": "2023", "净利润": 46_455.0}},
                {"指标": {"年份": "2022", "净利润": 45_516.0, "公司简称": "平安银行旧称"}},
                {"备注": "no indicator map"}
            ]
        }]);
        let records = normalize_document(SourceId::Szse, &doc);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].company_code(), Some("000001"));
        assert_eq!(records[0].company_name(), Some("平安银行"));
        assert_eq!(records[0].year(), Some("2023"));

        // A sub-record's own identity wins over the inherited one.
        assert_eq!(records[1].company_name(), Some("平安银行旧称"));
        assert_eq!(records[1].company_code(), Some("000001"));
    }

    #[test]
    fn test_szse_aliases_resolve_in_payload_order() {
        let raw = json!({
            "年份": "2023",
            "归属于本行股东的净利润": 100.0,
            "净利润": 90.0,
        });
        let record = &normalize_document(SourceId::Szse, &raw)[0];
        // The later alias in the table wins when both raw keys are present.
        assert_eq!(
            record.get(CanonicalField::NetProfitAttributableToParent),
            Some(&FieldValue::Number(90.0))
        );
    }

    #[test]
    fn test_scalar_document_yields_nothing() {
        assert!(normalize_document(SourceId::Cninfo, &json!("not a record")).is_empty());
        assert!(normalize_document(SourceId::Cninfo, &json!(42)).is_empty());
    }

    #[test]
    fn test_cninfo_year_table_shape_detected() {
        let doc = json!({
            "raw_data": {"data": {"records": [{"year": [
                {"index": "总资产", "2023": 100.0, "2022": 90.0}
            ]}]}}
        });
        assert_eq!(
            detect_shape(SourceId::Cninfo, &doc),
            Some(RawShape::YearTable)
        );

        let mut records = normalize_document(SourceId::Cninfo, &doc);
        records.sort_by(|a, b| a.year().cmp(&b.year()));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].year(), Some("2022"));
        assert_eq!(
            records[1].get(CanonicalField::TotalAssets),
            Some(&FieldValue::Number(100.0))
        );
    }
}
