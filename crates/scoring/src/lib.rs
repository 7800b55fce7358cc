//! Record assembly and weighted scoring for exhibitor rows.
//!
//! Takes one spreadsheet row, structures its free-text cells, reads the
//! indicator counts and category sub-totals, and produces a scored
//! `CompanyRecord` with honor badges.

mod demo;
mod honors;
pub mod schema;
mod stats;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vipboard_model::{
    CompanyRecord, IndicatorCounts, Row, ScoreCategory, ScoreSummary, SubTotals,
};
use vipboard_structure::{
    parse_categorized_products, parse_numbered_list, parse_vip_product_sections,
};

pub use demo::demo_row;
pub use honors::extract_honors;
pub use schema::{headers, RowReader, INDICATORS};
pub use stats::{aggregate_statistics, AggregateStatistics, ScoreBand, ScoreDistribution};

/// Errors loading a scoring configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Per-category multipliers applied to the sub-totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub market_value: f64,
    pub rd_innovation: f64,
    pub smart_manufacturing: f64,
    pub green_manufacturing: f64,
    pub credit_level: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            market_value: 2.0,
            rd_innovation: 1.0,
            smart_manufacturing: 2.0,
            green_manufacturing: 1.5,
            credit_level: 1.5,
        }
    }
}

impl CategoryWeights {
    pub fn get(&self, category: ScoreCategory) -> f64 {
        match category {
            ScoreCategory::MarketValue => self.market_value,
            ScoreCategory::RdInnovation => self.rd_innovation,
            ScoreCategory::SmartManufacturing => self.smart_manufacturing,
            ScoreCategory::GreenManufacturing => self.green_manufacturing,
            ScoreCategory::CreditLevel => self.credit_level,
        }
    }
}

/// Configuration for record assembly and scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: CategoryWeights,
    /// Applied to the weighted sum to produce `total`
    pub total_scale: f64,
    /// Brand cell text meaning "yes"
    pub brand_marker: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: CategoryWeights::default(),
            total_scale: 10.0 / 6.0,
            brand_marker: "是".to_string(),
        }
    }
}

impl ScoringConfig {
    /// Load a JSON config; keys left out keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Weighted, scaled sum of the sub-totals (unrounded).
    pub fn weighted_total(&self, subtotals: &SubTotals) -> f64 {
        let weighted: f64 = ScoreCategory::ALL
            .iter()
            .map(|c| subtotals.get(*c) as f64 * self.weights.get(*c))
            .sum();
        weighted * self.total_scale
    }

    /// Build the display scores for a set of sub-totals.
    pub fn score_summary(&self, subtotals: &SubTotals) -> ScoreSummary {
        let total = self.weighted_total(subtotals);
        ScoreSummary {
            market_value: subtotals.market_value,
            rd_innovation: subtotals.rd_innovation,
            smart_manufacturing: subtotals.smart_manufacturing,
            green_manufacturing: subtotals.green_manufacturing,
            credit_level: subtotals.credit_level,
            total: round_to(total, 2),
            percentage: if total > 0.0 { round_to(total, 1) } else { 0.0 },
        }
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Assemble a scored record from one row.
///
/// Every field degrades to its default (empty text, empty container, 0)
/// when the cell is missing or unusable; this never fails.
pub fn build_company_record(row: &Row, config: &ScoringConfig) -> CompanyRecord {
    let reader = RowReader::new(row);

    let mut indicators = IndicatorCounts::zeroed();
    for spec in INDICATORS.iter() {
        indicators.set(spec.indicator, reader.count(spec.header));
    }

    let mut subtotals = SubTotals::default();
    for category in ScoreCategory::ALL {
        subtotals.set(category, reader.count(schema::subtotal_header(category)));
    }

    let scores = config.score_summary(&subtotals);
    let honors = extract_honors(&indicators);

    let record = CompanyRecord {
        name: reader.text(headers::NAME),
        introduction: reader.text(headers::INTRODUCTION),
        city: reader.text(headers::CITY),
        exhibition_count: reader.count(headers::EXHIBITION_COUNT),
        vip_level: reader.text(headers::VIP_LEVEL),
        is_brand: reader.flag(headers::BRAND, &config.brand_marker),
        exhibition_areas: reader.count(headers::EXHIBITION_AREAS),
        exhibition_areas_vip: reader.text(headers::EXHIBITION_AREAS_VIP),
        eligibility_criteria: reader.text(headers::ELIGIBILITY),
        purchase_package_status: reader.text(headers::PURCHASE_PACKAGE),
        trading_group: reader.text(headers::TRADING_GROUP),

        highlights: parse_numbered_list(&reader.raw_text(headers::HIGHLIGHTS)),
        leading_position: parse_numbered_list(&reader.raw_text(headers::LEADING_POSITION)),
        industry_sectors: parse_numbered_list(&reader.raw_text(headers::INDUSTRY_SECTORS)),
        main_products: parse_categorized_products(&reader.raw_text(headers::MAIN_PRODUCTS)),
        vip_products: parse_vip_product_sections(&reader.raw_text(headers::VIP_PRODUCTS)),

        indicators,
        subtotals,
        scores,
        honors,
    };

    tracing::debug!(
        company = %record.name,
        source_total = reader.count(headers::TOTAL_SCORE),
        total = record.scores.total,
        honors = record.honors.len(),
        "Assembled company record"
    );

    record
}

/// A row that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// Zero-based position in the input batch
    pub index: usize,
    pub reason: String,
}

/// Result of assembling a batch of raw rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub records: Vec<CompanyRecord>,
    pub skipped: Vec<SkippedRow>,
}

/// Assemble records from raw JSON rows.
///
/// Each row is converted independently; a row that cannot be read is logged
/// and reported in `skipped` without affecting its neighbours.
pub fn build_batch<I>(rows: I, config: &ScoringConfig) -> BatchOutcome
where
    I: IntoIterator<Item = serde_json::Value>,
{
    let mut outcome = BatchOutcome::default();

    for (index, value) in rows.into_iter().enumerate() {
        match Row::from_json(value) {
            Ok(row) => outcome.records.push(build_company_record(&row, config)),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping unreadable row");
                outcome.skipped.push(SkippedRow {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        records = outcome.records.len(),
        skipped = outcome.skipped.len(),
        "Assembled batch"
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use vipboard_model::{CellValue, HonorLevel, VipCategory};

    fn subtotal_row(market: i64, rd: i64, smart: i64, green: i64, credit: i64) -> Row {
        Row::new()
            .with(headers::NAME, "测试企业")
            .with(headers::MARKET_VALUE_SCORE, market)
            .with(headers::RD_INNOVATION_SCORE, rd)
            .with(headers::SMART_MANUFACTURING_SCORE, smart)
            .with(headers::GREEN_MANUFACTURING_SCORE, green)
            .with(headers::CREDIT_LEVEL_SCORE, credit)
    }

    #[test]
    fn test_weighted_total() {
        let record = build_company_record(&subtotal_row(1, 2, 1, 2, 1), &ScoringConfig::default());
        assert!((record.scores.total - 17.5).abs() < 1e-9);
        assert!((record.scores.percentage - 17.5).abs() < 1e-9);
        assert_eq!(record.scores.market_value, 1);
        assert_eq!(record.scores.rd_innovation, 2);
        assert_eq!(record.scores.green_manufacturing, 2);
    }

    #[test]
    fn test_total_rounding() {
        // 1 * 2.0 * 10/6 = 3.333…
        let record = build_company_record(&subtotal_row(1, 0, 0, 0, 0), &ScoringConfig::default());
        assert_eq!(record.scores.total, 3.33);
        assert_eq!(record.scores.percentage, 3.3);
    }

    #[test]
    fn test_source_total_is_ignored() {
        let row = subtotal_row(0, 0, 0, 0, 0).with(headers::TOTAL_SCORE, 13);
        let record = build_company_record(&row, &ScoringConfig::default());
        assert_eq!(record.scores.total, 0.0);
        assert_eq!(record.scores.percentage, 0.0);
    }

    #[test]
    fn test_empty_row_defaults() {
        let record = build_company_record(&Row::new(), &ScoringConfig::default());
        assert_eq!(record, CompanyRecord::new(""));
    }

    const TEXT_HEADERS: [&str; 14] = [
        headers::NAME,
        headers::INTRODUCTION,
        headers::CITY,
        headers::VIP_LEVEL,
        headers::BRAND,
        headers::EXHIBITION_AREAS_VIP,
        headers::ELIGIBILITY,
        headers::PURCHASE_PACKAGE,
        headers::TRADING_GROUP,
        headers::HIGHLIGHTS,
        headers::LEADING_POSITION,
        headers::INDUSTRY_SECTORS,
        headers::MAIN_PRODUCTS,
        headers::VIP_PRODUCTS,
    ];

    fn count_headers() -> Vec<&'static str> {
        let mut all = vec![headers::EXHIBITION_COUNT, headers::EXHIBITION_AREAS];
        all.extend(INDICATORS.iter().map(|s| s.header));
        all.extend(ScoreCategory::ALL.iter().map(|c| schema::subtotal_header(*c)));
        all
    }

    #[test]
    fn test_missing_markers_default() {
        let blanks = [CellValue::Empty, CellValue::from(""), CellValue::from("nan")];
        for blank in blanks {
            let row: Row = TEXT_HEADERS
                .iter()
                .copied()
                .chain(count_headers())
                .map(|h| (h, blank.clone()))
                .collect();
            let record = build_company_record(&row, &ScoringConfig::default());
            assert_eq!(record, CompanyRecord::new(""), "blank cell {:?}", blank);
        }
    }

    #[test]
    fn test_decimal_text_counts_truncate() {
        let row: Row = count_headers().into_iter().map(|h| (h, "2.0")).collect();
        let record = build_company_record(&row, &ScoringConfig::default());

        assert_eq!(record.exhibition_count, 2);
        assert_eq!(record.exhibition_areas, 2);
        for (indicator, count) in record.indicators.iter() {
            assert_eq!(count, 2, "{:?}", indicator);
        }
        for category in ScoreCategory::ALL {
            assert_eq!(record.subtotals.get(category), 2, "{:?}", category);
        }
    }

    #[test]
    fn test_metadata_and_text_fields() {
        let row = Row::from_json(json!({
            "企业名称": " TCL实业 ",
            "所属市县": "惠州市",
            "VIP等级": "金标",
            "是否品牌": "是",
            "已参展届数": "4.0",
            "参展展区数": 2,
            "企业亮点": "1.出货量全球第二\n说明\n2.研发投入超600亿元",
            "主营产品": "1.个人产品：电视、空调\n2.商用产品：显示器，中央空调",
            "所在VIP展区产品情况": "一、\n1.【QM8K】：面板升级",
            "无关列": "ignored",
        }))
        .unwrap();
        let record = build_company_record(&row, &ScoringConfig::default());

        assert_eq!(record.name, "TCL实业");
        assert_eq!(record.city, "惠州市");
        assert!(record.is_gold());
        assert!(record.is_brand);
        assert_eq!(record.exhibition_count, 4);
        assert_eq!(record.exhibition_areas, 2);
        assert_eq!(record.highlights, vec!["出货量全球第二", "研发投入超600亿元"]);
        assert_eq!(
            record.main_products.categories().collect::<Vec<_>>(),
            vec!["个人产品", "商用产品"]
        );
        let new_products = &record.vip_products[&VipCategory::New];
        assert_eq!(new_products[0].series.as_deref(), Some("QM8K"));
        assert_eq!(new_products[0].description, "面板升级");
    }

    #[test]
    fn test_brand_requires_exact_marker() {
        let config = ScoringConfig::default();
        for value in ["否", "是的", ""] {
            let row = Row::new().with(headers::BRAND, value);
            assert!(!build_company_record(&row, &config).is_brand);
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let row = demo_row();
        let config = ScoringConfig::default();
        assert_eq!(build_company_record(&row, &config), build_company_record(&row, &config));
    }

    #[test]
    fn test_honors_follow_indicators() {
        let row = Row::new()
            .with("世界《财富》500强(2分)", 1)
            .with("国家级绿色工厂(2分)", "2.0");
        let record = build_company_record(&row, &ScoringConfig::default());
        let levels: Vec<_> = record.honors.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![HonorLevel::Gold, HonorLevel::Green]);
    }

    #[test]
    fn test_batch_isolates_bad_rows() {
        let rows = vec![
            json!({"企业名称": "甲", "市场价值总分": 1}),
            json!(["not", "a", "row"]),
            json!({"企业名称": "乙", "企业简介": {"nested": 1}}),
            json!({"企业名称": "丙", "信用水平总分": 2}),
        ];
        let outcome = build_batch(rows, &ScoringConfig::default());

        let names: Vec<_> = outcome.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["甲", "乙", "丙"]);
        assert_eq!(
            outcome.skipped.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![1]
        );
        assert!((outcome.records[0].scores.total - 3.33).abs() < 1e-9);
        assert_eq!(outcome.records[1].introduction, "");
        assert_eq!(outcome.records[2].scores.total, 5.0);
    }

    #[test]
    fn test_unknown_nested_column_keeps_row() {
        let rows = vec![json!({"企业名称": "甲", "市场价值总分": 3, "备注附件": ["a.pdf"]})];
        let outcome = build_batch(rows, &ScoringConfig::default());

        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].name, "甲");
        assert_eq!(outcome.records[0].subtotals.market_value, 3);
        assert_eq!(outcome.records[0].scores.total, 10.0);
    }

    #[test]
    fn test_config_partial_override() {
        let config: ScoringConfig =
            serde_json::from_str(r#"{"weights": {"market_value": 3.0}, "total_scale": 1.0}"#)
                .unwrap();
        assert_eq!(config.weights.market_value, 3.0);
        assert_eq!(config.weights.green_manufacturing, 1.5);
        assert_eq!(config.brand_marker, "是");

        let subtotals = SubTotals {
            market_value: 1,
            ..Default::default()
        };
        assert_eq!(config.weighted_total(&subtotals), 3.0);
    }

    #[test]
    fn test_config_missing_file() {
        assert!(matches!(
            ScoringConfig::from_json_file("/nonexistent/scoring.json"),
            Err(ConfigError::Io { .. })
        ));
    }
}
