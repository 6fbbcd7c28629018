//! # Financial Report Reconciler
//!
//! A library for reconciling company financial statement data collected from
//! several structurally incompatible sources into one canonical,
//! analysis-ready time series per company, and for deriving ratio reports
//! from it.
//!
//! ## Core Concepts
//!
//! - **Raw record**: an opaque string-keyed mapping produced by one upstream
//!   collector, tagged with its [`SourceId`]
//! - **Canonical record**: the fixed 36-field standard schema; every field is
//!   present, `null` when unknown
//! - **Reconciliation**: normalized records are keyed by
//!   `(company_code, year)` and merged in source-priority order, lower
//!   priority sources only filling fields still null
//! - **Derived metrics**: profitability, solvency, operating-efficiency,
//!   growth, cash-flow and market-value ratios per period, with `null` as the
//!   explicit "not computable" outcome
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_report_reconciler::*;
//! use serde_json::json;
//!
//! let priority = [
//!     SourceId::Cninfo,
//!     SourceId::Szse,
//!     SourceId::Eastmoney,
//!     SourceId::Tonghuashun,
//! ];
//! let collected = vec![
//!     (SourceId::Cninfo, vec![json!({
//!         "公司代码": "000001", "年份": "2023", "总资产": 5_000_000.0,
//!     })]),
//!     (SourceId::Eastmoney, vec![json!({
//!         "result": {"data": [{
//!             "SECURITY_CODE": "000001",
//!             "REPORTDATE": "2023-12-31",
//!             "PARENT_NETPROFIT": 46_455.0,
//!         }]}
//!     })]),
//! ];
//!
//! let merged = reconcile_sources(&priority, &collected);
//! let report = ComprehensiveCalculator::new().calculate_for_company(&merged, None, None);
//! ```

pub mod error;
pub mod export;
pub mod field_map;
pub mod merge;
pub mod metrics;
pub mod normalizer;
pub mod numeric;
pub mod report;
pub mod schema;
pub mod statements;

pub use error::{ReconcileError, Result};
pub use export::{read_merged_records, records_to_json, write_merged_records};
pub use field_map::{coerce_year, field_map, FieldMapping};
pub use merge::{merge, SourceBatch};
pub use metrics::{ComprehensiveCalculator, MetricsConfig};
pub use normalizer::{detect_shape, normalize_document, normalize_record, RawShape};
pub use numeric::{
    can_calculate_ratio, get_value, numeric, parse_numeric, safe_divide, DEFAULT_MIN_DENOMINATOR,
};
pub use report::*;
pub use schema::{CanonicalField, CanonicalRecord, EntityKey, FieldValue, SourceId};
pub use statements::{expand_year_table, integrate_statements};

use log::{debug, info};
use serde_json::Value;

/// Normalizes every collected document and merges the result under the given
/// source priority. This is the whole ingestion pipeline: collectors hand
/// their raw documents in, one canonical record per `(company_code, year)`
/// comes out.
pub fn reconcile_sources(
    priority: &[SourceId],
    collected: &[(SourceId, Vec<Value>)],
) -> Vec<CanonicalRecord> {
    info!("reconciling {} collector batches", collected.len());

    let batches: Vec<SourceBatch> = collected
        .iter()
        .map(|(source, documents)| {
            let records: Vec<CanonicalRecord> = documents
                .iter()
                .flat_map(|doc| normalize_document(*source, doc))
                .collect();
            debug!(
                "{source}: {} documents normalized into {} records",
                documents.len(),
                records.len()
            );
            SourceBatch::new(*source, records)
        })
        .collect();

    merge(priority, &batches)
}
