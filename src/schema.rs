use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// The upstream collectors this system reconciles. Each collector is an
/// external component that crawls one disclosure channel and hands its raw
/// records to this crate tagged with its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    /// Cninfo, the official disclosure portal (巨潮资讯网)
    Cninfo,
    /// Shenzhen Stock Exchange (深交所)
    Szse,
    /// Eastmoney data portal (东方财富)
    Eastmoney,
    /// Tonghuashun / 10jqka data portal (同花顺)
    Tonghuashun,
}

impl SourceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cninfo => "cninfo",
            Self::Szse => "szse",
            Self::Eastmoney => "eastmoney",
            Self::Tonghuashun => "tonghuashun",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the fixed standard schema's named attributes.
///
/// The set is closed: every canonical record exposes exactly these fields,
/// and the persisted JSON layout uses `as_str` names as keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalField {
    CompanyCode,
    CompanyName,
    Year,
    CashAndCashEquivalents,
    TotalCurrentAssets,
    TotalNonCurrentAssets,
    TotalAssets,
    TotalCurrentLiabilities,
    TotalNonCurrentLiabilities,
    TotalLiabilities,
    PaidInCapital,
    RetainedEarnings,
    TotalOwnersEquity,
    TotalOperatingRevenue,
    TotalOperatingCost,
    OperatingProfit,
    TotalProfit,
    IncomeTaxExpense,
    NetProfitAttributableToParent,
    NetCashFlowFromOperatingActivities,
    NetCashFlowFromInvestingActivities,
    NetCashFlowFromFinancingActivities,
    EarningsPerShare,
    EarningsPerShareExcludingNonRecurring,
    Roe,
    BookValuePerShare,
    GrossProfitMargin,
    AccountsReceivableTurnover,
    AccountsReceivableDays,
    InventoryTurnover,
    InventoryDays,
    DividendPlan,
    DividendYear,
    Industry,
    DividendYield,
    AnnouncementDate,
}

impl CanonicalField {
    /// Every canonical field, in persisted column order.
    pub const ALL: [CanonicalField; 36] = [
        Self::CompanyCode,
        Self::CompanyName,
        Self::Year,
        Self::CashAndCashEquivalents,
        Self::TotalCurrentAssets,
        Self::TotalNonCurrentAssets,
        Self::TotalAssets,
        Self::TotalCurrentLiabilities,
        Self::TotalNonCurrentLiabilities,
        Self::TotalLiabilities,
        Self::PaidInCapital,
        Self::RetainedEarnings,
        Self::TotalOwnersEquity,
        Self::TotalOperatingRevenue,
        Self::TotalOperatingCost,
        Self::OperatingProfit,
        Self::TotalProfit,
        Self::IncomeTaxExpense,
        Self::NetProfitAttributableToParent,
        Self::NetCashFlowFromOperatingActivities,
        Self::NetCashFlowFromInvestingActivities,
        Self::NetCashFlowFromFinancingActivities,
        Self::EarningsPerShare,
        Self::EarningsPerShareExcludingNonRecurring,
        Self::Roe,
        Self::BookValuePerShare,
        Self::GrossProfitMargin,
        Self::AccountsReceivableTurnover,
        Self::AccountsReceivableDays,
        Self::InventoryTurnover,
        Self::InventoryDays,
        Self::DividendPlan,
        Self::DividendYear,
        Self::Industry,
        Self::DividendYield,
        Self::AnnouncementDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompanyCode => "company_code",
            Self::CompanyName => "company_name",
            Self::Year => "year",
            Self::CashAndCashEquivalents => "cash_and_cash_equivalents",
            Self::TotalCurrentAssets => "total_current_assets",
            Self::TotalNonCurrentAssets => "total_non_current_assets",
            Self::TotalAssets => "total_assets",
            Self::TotalCurrentLiabilities => "total_current_liabilities",
            Self::TotalNonCurrentLiabilities => "total_non_current_liabilities",
            Self::TotalLiabilities => "total_liabilities",
            Self::PaidInCapital => "paid_in_capital",
            Self::RetainedEarnings => "retained_earnings",
            Self::TotalOwnersEquity => "total_owners_equity",
            Self::TotalOperatingRevenue => "total_operating_revenue",
            Self::TotalOperatingCost => "total_operating_cost",
            Self::OperatingProfit => "operating_profit",
            Self::TotalProfit => "total_profit",
            Self::IncomeTaxExpense => "income_tax_expense",
            Self::NetProfitAttributableToParent => "net_profit_attributable_to_parent",
            Self::NetCashFlowFromOperatingActivities => "net_cash_flow_from_operating_activities",
            Self::NetCashFlowFromInvestingActivities => "net_cash_flow_from_investing_activities",
            Self::NetCashFlowFromFinancingActivities => "net_cash_flow_from_financing_activities",
            Self::EarningsPerShare => "earnings_per_share",
            Self::EarningsPerShareExcludingNonRecurring => {
                "earnings_per_share_excluding_non_recurring"
            }
            Self::Roe => "roe",
            Self::BookValuePerShare => "book_value_per_share",
            Self::GrossProfitMargin => "gross_profit_margin",
            Self::AccountsReceivableTurnover => "accounts_receivable_turnover",
            Self::AccountsReceivableDays => "accounts_receivable_days",
            Self::InventoryTurnover => "inventory_turnover",
            Self::InventoryDays => "inventory_days",
            Self::DividendPlan => "dividend_plan",
            Self::DividendYear => "dividend_year",
            Self::Industry => "industry",
            Self::DividendYield => "dividend_yield",
            Self::AnnouncementDate => "announcement_date",
        }
    }

    pub fn parse(name: &str) -> Option<CanonicalField> {
        Self::ALL.iter().copied().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A populated canonical value. Absence of a field in a [`CanonicalRecord`]
/// is the null state; there is no null variant here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One (company, fiscal-year) observation in the standard schema.
///
/// Identity is `(company_code, year)`. The provenance tag set by the
/// normalizer exists only for the merge engine; it is skipped by `Serialize`
/// and never appears in persisted output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalRecord {
    values: BTreeMap<CanonicalField, FieldValue>,
    source: Option<SourceId>,
}

impl CanonicalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(source: SourceId) -> Self {
        Self {
            values: BTreeMap::new(),
            source: Some(source),
        }
    }

    pub fn get(&self, field: CanonicalField) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn set(&mut self, field: CanonicalField, value: impl Into<FieldValue>) {
        self.values.insert(field, value.into());
    }

    pub fn clear(&mut self, field: CanonicalField) {
        self.values.remove(&field);
    }

    pub fn is_null(&self, field: CanonicalField) -> bool {
        !self.values.contains_key(&field)
    }

    /// Number of non-null canonical fields.
    pub fn populated_len(&self) -> usize {
        self.values.len()
    }

    pub fn text(&self, field: CanonicalField) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn company_code(&self) -> Option<&str> {
        self.text(CanonicalField::CompanyCode)
    }

    pub fn company_name(&self) -> Option<&str> {
        self.text(CanonicalField::CompanyName)
    }

    pub fn year(&self) -> Option<&str> {
        self.text(CanonicalField::Year)
    }

    pub fn source(&self) -> Option<SourceId> {
        self.source
    }

    pub fn set_source(&mut self, source: SourceId) {
        self.source = Some(source);
    }

    pub fn clear_source(&mut self) {
        self.source = None;
    }

    /// The `(company_code, year)` merge key, or `None` when the record has
    /// no usable year. A record may legitimately lack a company code (some
    /// sources never supply one); such records still merge under their year.
    pub fn entity_key(&self) -> Option<EntityKey> {
        let year = self.year().filter(|y| !y.is_empty())?.to_string();
        let code = self.company_code().map(|c| c.to_string());
        Some(EntityKey { code, year })
    }
}

/// Identity of one canonical record across sources.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityKey {
    pub code: Option<String>,
    pub year: String,
}

impl Serialize for CanonicalRecord {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(CanonicalField::ALL.len()))?;
        for field in CanonicalField::ALL {
            map.serialize_entry(field.as_str(), &self.values.get(&field))?;
        }
        map.end()
    }
}

struct CanonicalRecordVisitor;

impl<'de> Visitor<'de> for CanonicalRecordVisitor {
    type Value = CanonicalRecord;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a flat map of canonical field names to values")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = CanonicalRecord::new();
        while let Some(key) = access.next_key::<String>()? {
            match CanonicalField::parse(&key) {
                Some(field) => {
                    if let Some(value) = access.next_value::<Option<FieldValue>>()? {
                        record.values.insert(field, value);
                    }
                }
                // Foreign keys (including any leftover provenance tag) are
                // dropped rather than rejected.
                None => {
                    access.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for CanonicalRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(CanonicalRecordVisitor)
    }
}
