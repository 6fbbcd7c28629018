//! Cninfo statement-table handling.
//!
//! Cninfo delivers each statement (balance sheet, income statement, cash
//! flow) as a table of account rows with one column per year, wrapped in a
//! `raw_data.data.records` envelope. These helpers pivot that layout into
//! flat per-year raw records and union the three statements into one record
//! per year, ready for the normalizer.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Record groups observed in the wild, checked in preference order.
const RECORD_GROUP_KEYS: [&str; 4] = ["year", "middle", "one", "three"];

/// Pivots one statement table into `year -> {account name -> value}`.
///
/// Rows without an `index` (account name) column are skipped, as are null
/// cells. Documents that do not carry the expected envelope yield an empty
/// map.
pub fn expand_year_table(doc: &Value) -> BTreeMap<String, Map<String, Value>> {
    let mut years: BTreeMap<String, Map<String, Value>> = BTreeMap::new();

    let Some(rows) = statement_rows(doc) else {
        return years;
    };

    for row in rows {
        let Some(row) = row.as_object() else {
            continue;
        };
        let Some(account) = row.get("index").and_then(Value::as_str) else {
            continue;
        };
        for (column, value) in row {
            if column == "index" || value.is_null() {
                continue;
            }
            years
                .entry(column.clone())
                .or_default()
                .insert(account.to_string(), value.clone());
        }
    }

    years
}

fn statement_rows(doc: &Value) -> Option<&Vec<Value>> {
    let records = doc.get("raw_data")?.get("data")?.get("records")?.as_array()?;
    let first = records.first()?.as_object()?;
    RECORD_GROUP_KEYS
        .iter()
        .find_map(|key| first.get(*key))
        .and_then(Value::as_array)
}

/// Unions the three statement tables of one company into flat per-year raw
/// records carrying the identity keys the Cninfo field map expects. Years
/// are emitted newest first, matching the combined disclosure view. Later
/// statements overwrite earlier ones on (rare) duplicate account names, in
/// balance → income → cash-flow order.
pub fn integrate_statements(
    company_code: &str,
    company_name: &str,
    balance: &Value,
    income: &Value,
    cash_flow: &Value,
) -> Vec<Map<String, Value>> {
    let balance_years = expand_year_table(balance);
    let income_years = expand_year_table(income);
    let cash_flow_years = expand_year_table(cash_flow);

    let mut all_years: Vec<&String> = balance_years
        .keys()
        .chain(income_years.keys())
        .chain(cash_flow_years.keys())
        .collect();
    all_years.sort_unstable();
    all_years.dedup();
    all_years.reverse();

    let mut combined = Vec::with_capacity(all_years.len());
    for year in all_years {
        let mut row = Map::new();
        row.insert(
            "公司代码".to_string(),
            Value::String(company_code.to_string()),
        );
        row.insert(
            "公司简称".to_string(),
            Value::String(company_name.to_string()),
        );
        row.insert("年份".to_string(), Value::String(year.clone()));
        for table in [&balance_years, &income_years, &cash_flow_years] {
            if let Some(accounts) = table.get(year) {
                for (account, value) in accounts {
                    row.insert(account.clone(), value.clone());
                }
            }
        }
        combined.push(row);
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn statement(group: &str, rows: Value) -> Value {
        json!({"raw_data": {"data": {"records": [{group: rows}]}}})
    }

    #[test]
    fn test_expand_year_table_pivots_rows() {
        let doc = statement(
            "year",
            json!([
                {"index": "货币资金", "2023": 120.0, "2022": 100.0},
                {"index": "总资产", "2023": 900.0, "2022": null},
                {"没有科目名": true, "2023": 1.0},
            ]),
        );

        let years = expand_year_table(&doc);
        assert_eq!(years.len(), 2);
        assert_eq!(years["2023"]["货币资金"], 120.0);
        assert_eq!(years["2023"]["总资产"], 900.0);
        assert_eq!(years["2022"].len(), 1, "null cells are not carried");
    }

    #[test]
    fn test_expand_year_table_tries_group_keys_in_order() {
        let doc = statement("middle", json!([{"index": "总资产", "2023": 5.0}]));
        assert_eq!(expand_year_table(&doc)["2023"]["总资产"], 5.0);

        assert!(expand_year_table(&json!({"raw_data": {}})).is_empty());
        assert!(expand_year_table(&json!("not a table")).is_empty());
    }

    #[test]
    fn test_integrate_statements_unions_years_newest_first() {
        let balance = statement(
            "year",
            json!([{"index": "总资产", "2023": 900.0, "2022": 800.0}]),
        );
        let income = statement("year", json!([{"index": "营业总收入", "2023": 400.0}]));
        let cash_flow = statement(
            "year",
            json!([{"index": "经营活动产生的现金流量净额", "2021": 30.0}]),
        );

        let rows = integrate_statements("000001", "平安银行", &balance, &income, &cash_flow);
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0]["年份"], "2023");
        assert_eq!(rows[0]["公司代码"], "000001");
        assert_eq!(rows[0]["总资产"], 900.0);
        assert_eq!(rows[0]["营业总收入"], 400.0);

        assert_eq!(rows[1]["年份"], "2022");
        assert!(!rows[1].contains_key("营业总收入"));

        assert_eq!(rows[2]["年份"], "2021");
        assert_eq!(rows[2]["经营活动产生的现金流量净额"], 30.0);
    }
}
