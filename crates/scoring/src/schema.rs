//! Known column headers and typed accessors over a `Row`.

use vipboard_model::{CellValue, HonorLevel, Indicator, Row, ScoreCategory};
use vipboard_structure::{is_missing, safe_int};

/// Column headers of the exhibitor spreadsheet.
pub mod headers {
    pub const NAME: &str = "企业名称";
    pub const INTRODUCTION: &str = "企业简介";
    pub const CITY: &str = "所属市县";
    pub const EXHIBITION_COUNT: &str = "已参展届数";
    pub const VIP_LEVEL: &str = "VIP等级";
    pub const BRAND: &str = "是否品牌";
    pub const EXHIBITION_AREAS: &str = "参展展区数";
    pub const EXHIBITION_AREAS_VIP: &str = "VIP所属展区";
    pub const ELIGIBILITY: &str = "符合准入资格情况";
    pub const PURCHASE_PACKAGE: &str = "购买套餐情况";
    pub const TRADING_GROUP: &str = "交易团";

    pub const HIGHLIGHTS: &str = "企业亮点";
    pub const LEADING_POSITION: &str = "领先地位";
    pub const INDUSTRY_SECTORS: &str = "产业板块";
    pub const MAIN_PRODUCTS: &str = "主营产品";
    pub const VIP_PRODUCTS: &str = "所在VIP展区产品情况";

    pub const MARKET_VALUE_SCORE: &str = "市场价值总分";
    pub const RD_INNOVATION_SCORE: &str = "研发创新总分";
    pub const SMART_MANUFACTURING_SCORE: &str = "智能制造总分";
    pub const GREEN_MANUFACTURING_SCORE: &str = "绿色制造总分";
    pub const CREDIT_LEVEL_SCORE: &str = "信用水平总分";
    /// Read for logging only; the weighted total replaces it.
    pub const TOTAL_SCORE: &str = "总分";
}

/// Where an indicator is read from and how its honor badge looks.
#[derive(Debug, Clone, Copy)]
pub struct IndicatorSpec {
    pub indicator: Indicator,
    /// Column header holding the count
    pub header: &'static str,
    /// Badge text shown when the count is positive
    pub honor_name: &'static str,
    pub level: HonorLevel,
}

const fn spec(
    indicator: Indicator,
    header: &'static str,
    honor_name: &'static str,
    level: HonorLevel,
) -> IndicatorSpec {
    IndicatorSpec {
        indicator,
        header,
        honor_name,
        level,
    }
}

use vipboard_model::HonorLevel::{Blue, Gold, Green, Silver, Yellow};
use vipboard_model::Indicator::*;

/// Every indicator, in badge display order.
///
/// Badge names and levels are fixed per indicator and do not follow the
/// point value in the header.
pub static INDICATORS: [IndicatorSpec; 30] = [
    spec(Fortune500World, "世界《财富》500强(2分)", "世界《财富》500强(2分)", Gold),
    spec(Fortune500China, "中国《财富》500强(1分)", "国家《财富》500强(1分)", Yellow),
    spec(ChinaManufacturing500, "中国制造业500强(1分)", "中国制造业500强(1分)", Silver),
    spec(UnicornEnterprise, "独角兽企业(1分)", "独角兽企业(1分)", Blue),
    spec(GazelleEnterprise, "瞪羚企业(1分)", "瞪羚企业(1分)", Blue),
    spec(ListedCompany, "上市企业(1分)", "上市企业(1分)", Blue),
    spec(ManufacturingChampionNational, "国际级制造业单项冠军(2分)", "国家级制造业单项冠军", Gold),
    spec(ManufacturingChampionProvincial, "省级制造业单项冠军(1分)", "省级制造单项冠军", Silver),
    spec(
        SophisticatedEnterprisesVipnational,
        "国家级专精特新重点“小巨人(3分)”",
        "国家级专精特新重点“小巨人”(3分)",
        Silver,
    ),
    spec(
        SophisticatedEnterprisesNational,
        "国家级专精特新“小巨人”(2分)",
        "国家级专精特新“小巨人”(2分)",
        Silver,
    ),
    spec(SpecializedNewProvincial, "省级专精特新(1分)", "省级专精特新(1分)", Silver),
    spec(HighTechEnterprise, "国家级高新技术企业(1分)", "国家高新技术企业(1分)", Silver),
    spec(TechCenterNational, "国家级企业技术中心(2分)", "国家级企业技术中心(2分)", Silver),
    spec(TechCenterProvincial, "省级企业技术中心(1分)", "省级企业技术中心(1分)", Silver),
    spec(TechInnovationDemo, "国家技术创新示范企业(1分)", "国家技术创新示范企业(1分)", Silver),
    spec(StandardInternational, "参与制定国际标准(3分)", "参与制定国际标准(3分)", Silver),
    spec(StandardNational, "参与制定国家标准(2分)", "参与制定国家标准(2分)", Silver),
    spec(StandardIndustry, "参与制定行业标准(1分)", "参与制定行业标准(1分)", Silver),
    spec(ExcellentSmartFactory, "卓越级智能工厂(1分)", "卓越级智能工厂(1分)", Blue),
    spec(LeadingSmartFactory, "领航级智能工厂(2分)", "领航级智能工厂(2分)", Gold),
    spec(LighthouseFactory, "灯塔工厂(3分)", "灯塔工厂(2分)", Gold),
    spec(GreenFactoryNational, "国家级绿色工厂(2分)", "国家级绿色工厂(2分)", Green),
    spec(GreenFactoryProvincial, "省级绿色工厂(1分)", "省级绿色工厂(1分)", Green),
    spec(GreenDesignNational, "国家级绿色设计产品(2分)", "国家级绿色设计产品(2分)", Green),
    spec(GreenDesignProvincial, "省级绿色设计产品(1分)", "省级绿色设计产品(1分)", Green),
    spec(GreenParkNational, "国家级绿色工业园(2分)", "国家级绿色工业园(2分)", Green),
    spec(GreenParkProvincial, "省级绿色工业园(1分)", "省级绿色工业园(1分)", Green),
    spec(GreenSupplyNational, "国家级绿色供应链管理(2分)", "国家级绿色供应链管理(2分)", Green),
    spec(GreenSupplyProvincial, "省级绿色供应链管理(1分)", "省级绿色供应链管理(1分)", Green),
    spec(AeoCertification, "AEO高级认证企业(2分)", "AEO高级认证企业(1分)", Blue),
];

/// Look up the table row for an indicator.
pub fn indicator_spec(indicator: Indicator) -> &'static IndicatorSpec {
    INDICATORS
        .iter()
        .find(|s| s.indicator == indicator)
        .unwrap_or_else(|| unreachable!("every Indicator has a table row"))
}

/// Header of the pre-aggregated sub-total for a category.
pub fn subtotal_header(category: ScoreCategory) -> &'static str {
    match category {
        ScoreCategory::MarketValue => headers::MARKET_VALUE_SCORE,
        ScoreCategory::RdInnovation => headers::RD_INNOVATION_SCORE,
        ScoreCategory::SmartManufacturing => headers::SMART_MANUFACTURING_SCORE,
        ScoreCategory::GreenManufacturing => headers::GREEN_MANUFACTURING_SCORE,
        ScoreCategory::CreditLevel => headers::CREDIT_LEVEL_SCORE,
    }
}

/// Typed, defaulting reads over one row.
#[derive(Debug, Clone, Copy)]
pub struct RowReader<'a> {
    row: &'a Row,
}

impl<'a> RowReader<'a> {
    pub fn new(row: &'a Row) -> Self {
        Self { row }
    }

    fn cell(&self, header: &str) -> Option<&'a CellValue> {
        self.row.get(header)
    }

    /// Trimmed text; missing, blank and `"nan"` cells read as `""`.
    pub fn text(&self, header: &str) -> String {
        let text = self.cell(header).map(CellValue::to_text).unwrap_or_default();
        if is_missing(&text) {
            String::new()
        } else {
            text.trim().to_string()
        }
    }

    /// Untrimmed text for the structuring parsers.
    pub fn raw_text(&self, header: &str) -> String {
        self.cell(header).map(CellValue::to_text).unwrap_or_default()
    }

    pub fn count(&self, header: &str) -> i64 {
        safe_int(self.cell(header))
    }

    /// True only when the trimmed text equals `marker`.
    pub fn flag(&self, header: &str, marker: &str) -> bool {
        self.text(header) == marker
    }
}
