//! Built-in sample exhibitor used by the demo load.

use vipboard_model::Row;

use crate::schema::headers;

/// A single fully-populated row for the TCL demo exhibitor.
pub fn demo_row() -> Row {
    Row::new()
        .with(headers::NAME, "TCL实业控股股份有限公司")
        .with(
            headers::INTRODUCTION,
            "成立于2018年，TCL实业聚焦智能终端业务，主要涵盖显示、智能家电、创新业务及家庭互联网等全品类智能消费电子产品及服务。",
        )
        .with(
            headers::HIGHLIGHTS,
            "1.TCL电视出货量全球第二\n2.TCL空调出货量全球第四\n3.TCL Mini LED电商中国市场全渠道零售量及零售额冠军\n4.雷鸟智能眼镜国内消费级市场AR产品排名第一\n5.近六年研发投入超过600亿元",
        )
        .with(
            headers::LEADING_POSITION,
            "1.TCL电视出货量全球第二\n2.TCL空调出货量全球第四\n3.TCL移动路由器全球出货量第三\n4.TCL Mini LED电商中国市场全渠道零售量及零售额冠军\n5.雷鸟智能眼镜国内消费级市场AR产品排名第一",
        )
        .with(
            headers::INDUSTRY_SECTORS,
            "1.光伏板块\n2.场景互联网及AI×loT板块（雷鸟科技）\n3.AR产品板块（雷鸟创新）",
        )
        .with(
            headers::MAIN_PRODUCTS,
            "1.个人及家庭产品：电视、空调、冰箱、洗衣机、智能门锁、灵悉套系家电、智能穿戴\n2.企业及商用产品：电视、冰箱、空调、洗衣机、商用显示、中央空调",
        )
        .with(
            headers::VIP_PRODUCTS,
            "一、\n1.【QM8K MiniLED 系列电视（5月）】：搭载WHVA面板、配备可播放杜比全景声的上置扬声器\n2.【X11K 超大尺寸电视】：采用14k区Halo Control和B&O音频技术\n二、\n1.【Q9L Pro/Q10L Pro 系列】：京东家电品牌榜、天猫大家电成交榜榜首\n2.【T7L 系列】：首销期在电商平台销量稳居 TOP3\n三、\n1.【TCL 智屏】：2024年一季度，TCL 电视国际市场出货量同比增长21.2%\n2.【新风空调】：表现强劲，市场份额逐步扩大",
        )
        .with(headers::CITY, "惠州市")
        .with(headers::VIP_LEVEL, "金标")
        .with(headers::BRAND, "是")
        .with(headers::EXHIBITION_COUNT, 5)
        .with(headers::EXHIBITION_AREAS, 1)
        .with("世界《财富》500强(2分)", 1)
        .with("中国制造业500强(1分)", 1)
        .with("上市企业(1分)", 1)
        .with("国际级制造业单项冠军(2分)", 1)
        .with("国家级专精特新“小巨人”(2分)", 1)
        .with("国家级高新技术企业(1分)", 1)
        .with("国家级企业技术中心(2分)", 1)
        .with("参与制定国家标准(2分)", 1)
        .with("国家级绿色工厂(2分)", 1)
        .with(headers::MARKET_VALUE_SCORE, 4)
        .with(headers::RD_INNOVATION_SCORE, 9)
        .with(headers::SMART_MANUFACTURING_SCORE, 0)
        .with(headers::GREEN_MANUFACTURING_SCORE, 2)
        .with(headers::CREDIT_LEVEL_SCORE, 0)
        .with(headers::TOTAL_SCORE, 13)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_company_record, ScoringConfig};
    use vipboard_model::VipCategory;

    #[test]
    fn test_demo_record() {
        let record = build_company_record(&demo_row(), &ScoringConfig::default());
        assert_eq!(record.name, "TCL实业控股股份有限公司");
        assert_eq!(record.highlights.len(), 5);
        assert_eq!(record.industry_sectors.len(), 3);
        assert_eq!(record.main_products.len(), 2);
        assert_eq!(record.vip_products.len(), 3);
        assert_eq!(record.vip_products[&VipCategory::Hot].len(), 2);
        assert_eq!(record.honors.len(), 9);
        // (4*2.0 + 9*1.0 + 2*1.5) * 10/6
        assert_eq!(record.scores.total, 33.33);
    }
}
