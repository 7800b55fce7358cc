//! Core domain model for the VIP exhibitor dashboard.
//!
//! This crate defines the fundamental types used throughout the system:
//! - `Row` / `CellValue`: one spreadsheet row keyed by column header
//! - `CompanyRecord`: the structured, scored exhibitor record
//! - `ScoreSummary`: per-category display scores plus the weighted total
//! - `Honor`: a badge derived from a positive indicator count
//! - `Indicator`: the honor/certification counts read from each row

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// VIP level text marking a gold-tier exhibitor.
pub const GOLD_VIP_LEVEL: &str = "金标";

/// VIP level text marking a silver-tier exhibitor.
pub const SILVER_VIP_LEVEL: &str = "银标";

/// Errors raised while converting raw interchange data into a `Row`.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Row is not an object (found {0})")]
    NotAnObject(&'static str),
}

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing or null cell
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Render the cell the way a spreadsheet export prints it.
    ///
    /// Whole numbers drop their fractional part, so `4.0` renders as `"4"`.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) if n.is_nan() => String::new(),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// One input row: column header to cell value.
///
/// Headers are matched by exact string equality; unknown headers are kept
/// but never read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, header: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(header, value);
        self
    }

    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(header.into(), value.into());
    }

    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells.get(header)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert a JSON object into a row.
    ///
    /// Scalars map onto `CellValue`; `null` becomes `Empty`. Nested arrays and
    /// objects cannot be coerced and are kept as `Empty`, so only a non-object
    /// row fails.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ModelError> {
        use serde_json::Value;

        let object = match value {
            Value::Object(map) => map,
            other => return Err(ModelError::NotAnObject(json_kind(&other))),
        };

        let mut row = Row::new();
        for (header, cell) in object {
            let cell = match cell {
                Value::Null => CellValue::Empty,
                Value::Bool(b) => CellValue::Bool(b),
                Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or_default(),
                Value::String(s) => CellValue::Text(s),
                other => {
                    tracing::debug!(%header, kind = json_kind(&other), "Dropping unsupported cell");
                    CellValue::Empty
                }
            };
            row.cells.insert(header, cell);
        }
        Ok(row)
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The five scoring categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreCategory {
    #[serde(rename = "市场价值")]
    MarketValue,
    #[serde(rename = "研发创新")]
    RdInnovation,
    #[serde(rename = "智能制造")]
    SmartManufacturing,
    #[serde(rename = "绿色制造")]
    GreenManufacturing,
    #[serde(rename = "信用水平")]
    CreditLevel,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 5] = [
        Self::MarketValue,
        Self::RdInnovation,
        Self::SmartManufacturing,
        Self::GreenManufacturing,
        Self::CreditLevel,
    ];

    /// Stable snake_case key, as used in `ScoreSummary`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::MarketValue => "market_value",
            Self::RdInnovation => "rd_innovation",
            Self::SmartManufacturing => "smart_manufacturing",
            Self::GreenManufacturing => "green_manufacturing",
            Self::CreditLevel => "credit_level",
        }
    }

    /// Chinese display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MarketValue => "市场价值",
            Self::RdInnovation => "研发创新",
            Self::SmartManufacturing => "智能制造",
            Self::GreenManufacturing => "绿色制造",
            Self::CreditLevel => "信用水平",
        }
    }

    /// English display label.
    pub fn label_en(&self) -> &'static str {
        match self {
            Self::MarketValue => "Market Value",
            Self::RdInnovation => "R&D Innovation",
            Self::SmartManufacturing => "Smart Mfg",
            Self::GreenManufacturing => "Green Mfg",
            Self::CreditLevel => "Credit Level",
        }
    }
}

/// Visual tag attached to an honor badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HonorLevel {
    Gold,
    Silver,
    Blue,
    Green,
    Yellow,
}

/// A raw honor/certification indicator read from each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    // Market value
    #[serde(rename = "fortune_500_world")]
    Fortune500World,
    #[serde(rename = "fortune_500_china")]
    Fortune500China,
    #[serde(rename = "china_manufacturing_500")]
    ChinaManufacturing500,
    UnicornEnterprise,
    GazelleEnterprise,
    ListedCompany,
    // R&D innovation
    ManufacturingChampionNational,
    ManufacturingChampionProvincial,
    SophisticatedEnterprisesVipnational,
    SophisticatedEnterprisesNational,
    SpecializedNewProvincial,
    HighTechEnterprise,
    TechCenterNational,
    TechCenterProvincial,
    TechInnovationDemo,
    StandardInternational,
    StandardNational,
    StandardIndustry,
    // Smart manufacturing
    ExcellentSmartFactory,
    LeadingSmartFactory,
    LighthouseFactory,
    // Green manufacturing
    GreenFactoryNational,
    GreenFactoryProvincial,
    GreenDesignNational,
    GreenDesignProvincial,
    GreenParkNational,
    GreenParkProvincial,
    GreenSupplyNational,
    GreenSupplyProvincial,
    // Credit level
    AeoCertification,
}

impl Indicator {
    pub const ALL: [Indicator; 30] = [
        Self::Fortune500World,
        Self::Fortune500China,
        Self::ChinaManufacturing500,
        Self::UnicornEnterprise,
        Self::GazelleEnterprise,
        Self::ListedCompany,
        Self::ManufacturingChampionNational,
        Self::ManufacturingChampionProvincial,
        Self::SophisticatedEnterprisesVipnational,
        Self::SophisticatedEnterprisesNational,
        Self::SpecializedNewProvincial,
        Self::HighTechEnterprise,
        Self::TechCenterNational,
        Self::TechCenterProvincial,
        Self::TechInnovationDemo,
        Self::StandardInternational,
        Self::StandardNational,
        Self::StandardIndustry,
        Self::ExcellentSmartFactory,
        Self::LeadingSmartFactory,
        Self::LighthouseFactory,
        Self::GreenFactoryNational,
        Self::GreenFactoryProvincial,
        Self::GreenDesignNational,
        Self::GreenDesignProvincial,
        Self::GreenParkNational,
        Self::GreenParkProvincial,
        Self::GreenSupplyNational,
        Self::GreenSupplyProvincial,
        Self::AeoCertification,
    ];

    /// The scoring category this indicator contributes to.
    pub fn category(&self) -> ScoreCategory {
        use Indicator::*;
        match self {
            Fortune500World | Fortune500China | ChinaManufacturing500 | UnicornEnterprise
            | GazelleEnterprise | ListedCompany => ScoreCategory::MarketValue,
            ManufacturingChampionNational
            | ManufacturingChampionProvincial
            | SophisticatedEnterprisesVipnational
            | SophisticatedEnterprisesNational
            | SpecializedNewProvincial
            | HighTechEnterprise
            | TechCenterNational
            | TechCenterProvincial
            | TechInnovationDemo
            | StandardInternational
            | StandardNational
            | StandardIndustry => ScoreCategory::RdInnovation,
            ExcellentSmartFactory | LeadingSmartFactory | LighthouseFactory => {
                ScoreCategory::SmartManufacturing
            }
            GreenFactoryNational
            | GreenFactoryProvincial
            | GreenDesignNational
            | GreenDesignProvincial
            | GreenParkNational
            | GreenParkProvincial
            | GreenSupplyNational
            | GreenSupplyProvincial => ScoreCategory::GreenManufacturing,
            AeoCertification => ScoreCategory::CreditLevel,
        }
    }
}

/// Counts for every `Indicator`. Absent indicators read as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorCounts(BTreeMap<Indicator, i64>);

impl IndicatorCounts {
    /// All indicators present with a count of 0.
    pub fn zeroed() -> Self {
        Self(Indicator::ALL.iter().map(|i| (*i, 0)).collect())
    }

    pub fn get(&self, indicator: Indicator) -> i64 {
        self.0.get(&indicator).copied().unwrap_or(0)
    }

    pub fn set(&mut self, indicator: Indicator, count: i64) {
        self.0.insert(indicator, count);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Indicator, i64)> + '_ {
        self.0.iter().map(|(i, c)| (*i, *c))
    }
}

impl Default for IndicatorCounts {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// The five pre-aggregated category sub-totals supplied by the source row.
///
/// Serialized as `<category>_score` keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubTotals {
    #[serde(rename = "market_value_score")]
    pub market_value: i64,
    #[serde(rename = "rd_innovation_score")]
    pub rd_innovation: i64,
    #[serde(rename = "smart_manufacturing_score")]
    pub smart_manufacturing: i64,
    #[serde(rename = "green_manufacturing_score")]
    pub green_manufacturing: i64,
    #[serde(rename = "credit_level_score")]
    pub credit_level: i64,
}

impl SubTotals {
    pub fn get(&self, category: ScoreCategory) -> i64 {
        match category {
            ScoreCategory::MarketValue => self.market_value,
            ScoreCategory::RdInnovation => self.rd_innovation,
            ScoreCategory::SmartManufacturing => self.smart_manufacturing,
            ScoreCategory::GreenManufacturing => self.green_manufacturing,
            ScoreCategory::CreditLevel => self.credit_level,
        }
    }

    pub fn set(&mut self, category: ScoreCategory, value: i64) {
        match category {
            ScoreCategory::MarketValue => self.market_value = value,
            ScoreCategory::RdInnovation => self.rd_innovation = value,
            ScoreCategory::SmartManufacturing => self.smart_manufacturing = value,
            ScoreCategory::GreenManufacturing => self.green_manufacturing = value,
            ScoreCategory::CreditLevel => self.credit_level = value,
        }
    }
}

/// Display scores for one company.
///
/// Category fields hold the unweighted sub-totals; `total` is the weighted,
/// scaled sum rounded to 2 decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub market_value: i64,
    pub rd_innovation: i64,
    pub smart_manufacturing: i64,
    pub green_manufacturing: i64,
    pub credit_level: i64,
    pub total: f64,
    /// Mirrors `total` rounded to 1 decimal; not a fraction of the maximum.
    pub percentage: f64,
}

impl ScoreSummary {
    pub fn category(&self, category: ScoreCategory) -> i64 {
        match category {
            ScoreCategory::MarketValue => self.market_value,
            ScoreCategory::RdInnovation => self.rd_innovation,
            ScoreCategory::SmartManufacturing => self.smart_manufacturing,
            ScoreCategory::GreenManufacturing => self.green_manufacturing,
            ScoreCategory::CreditLevel => self.credit_level,
        }
    }
}

/// A displayable honor badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Honor {
    pub category: ScoreCategory,
    pub name: String,
    pub level: HonorLevel,
}

/// The three VIP product sections, in the order they appear in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VipCategory {
    New,
    Hot,
    Bestseller,
}

impl VipCategory {
    pub const ALL: [VipCategory; 3] = [Self::New, Self::Hot, Self::Bestseller];

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "新品",
            Self::Hot => "爆品",
            Self::Bestseller => "热卖品",
        }
    }
}

/// One entry of a VIP product section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VipProduct {
    /// Series name from the first `【…】` pair, if any
    #[serde(default)]
    pub series: Option<String>,
    pub description: String,
}

impl VipProduct {
    pub fn new(series: Option<&str>, description: impl Into<String>) -> Self {
        Self {
            series: series.map(str::to_string),
            description: description.into(),
        }
    }
}

pub type VipProducts = BTreeMap<VipCategory, Vec<VipProduct>>;

/// Category name to product names, in first-insertion order.
///
/// Re-inserting an existing category replaces its products in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCatalog {
    entries: Vec<(String, Vec<String>)>,
}

impl ProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, products: Vec<String>) {
        let category = category.into();
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some((_, existing)) => *existing = products,
            None => self.entries.push((category, products)),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, p)| p.as_slice())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(c, p)| (c.as_str(), p.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ProductCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, products) in &self.entries {
            map.serialize_entry(category, products)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ProductCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = ProductCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category to product names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut catalog = ProductCatalog::new();
                while let Some((category, products)) =
                    access.next_entry::<String, Vec<String>>()?
                {
                    catalog.insert(category, products);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// The structured, scored record for one exhibitor.
///
/// This is the canonical representation consumed by ranking, search,
/// reporting and the web client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub exhibition_count: i64,
    #[serde(default)]
    pub vip_level: String,
    #[serde(default)]
    pub is_brand: bool,
    #[serde(default)]
    pub exhibition_areas: i64,
    /// VIP area assignment
    #[serde(default)]
    pub exhibition_areas_vip: String,
    #[serde(default)]
    pub eligibility_criteria: String,
    #[serde(default)]
    pub purchase_package_status: String,
    #[serde(default)]
    pub trading_group: String,

    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub leading_position: Vec<String>,
    #[serde(default)]
    pub industry_sectors: Vec<String>,
    #[serde(default)]
    pub main_products: ProductCatalog,
    #[serde(default)]
    pub vip_products: VipProducts,

    #[serde(default)]
    pub indicators: IndicatorCounts,
    /// Flattened into the record as `market_value_score` etc.
    #[serde(flatten)]
    pub subtotals: SubTotals,

    pub scores: ScoreSummary,
    #[serde(default)]
    pub honors: Vec<Honor>,
}

impl CompanyRecord {
    /// Create a minimal record for testing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            introduction: String::new(),
            city: String::new(),
            exhibition_count: 0,
            vip_level: String::new(),
            is_brand: false,
            exhibition_areas: 0,
            exhibition_areas_vip: String::new(),
            eligibility_criteria: String::new(),
            purchase_package_status: String::new(),
            trading_group: String::new(),
            highlights: Vec::new(),
            leading_position: Vec::new(),
            industry_sectors: Vec::new(),
            main_products: ProductCatalog::new(),
            vip_products: VipProducts::new(),
            indicators: IndicatorCounts::zeroed(),
            subtotals: SubTotals::default(),
            scores: ScoreSummary::default(),
            honors: Vec::new(),
        }
    }

    pub fn with_total(mut self, total: f64) -> Self {
        self.scores.total = total;
        self
    }

    pub fn is_gold(&self) -> bool {
        self.vip_level == GOLD_VIP_LEVEL
    }

    pub fn is_silver(&self) -> bool {
        self.vip_level == SILVER_VIP_LEVEL
    }
}
