//! Honor badges derived from indicator counts.

use vipboard_model::{Honor, IndicatorCounts};

use crate::schema::INDICATORS;

/// One badge per indicator with a positive count, in display order.
///
/// The badge depends only on whether the count is positive, not on its size.
pub fn extract_honors(counts: &IndicatorCounts) -> Vec<Honor> {
    INDICATORS
        .iter()
        .filter(|spec| counts.get(spec.indicator) > 0)
        .map(|spec| Honor {
            category: spec.indicator.category(),
            name: spec.honor_name.to_string(),
            level: spec.level,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::indicator_spec;
    use vipboard_model::{HonorLevel, Indicator, ScoreCategory};

    #[test]
    fn test_no_counts_no_honors() {
        assert!(extract_honors(&IndicatorCounts::zeroed()).is_empty());
    }

    #[test]
    fn test_fixed_badge_per_indicator() {
        let mut counts = IndicatorCounts::zeroed();
        counts.set(Indicator::Fortune500China, 1);
        counts.set(Indicator::LighthouseFactory, 1);

        let honors = extract_honors(&counts);
        assert_eq!(
            honors,
            vec![
                Honor {
                    category: ScoreCategory::MarketValue,
                    name: "国家《财富》500强(1分)".to_string(),
                    level: HonorLevel::Yellow,
                },
                Honor {
                    category: ScoreCategory::SmartManufacturing,
                    name: "灯塔工厂(2分)".to_string(),
                    level: HonorLevel::Gold,
                },
            ]
        );
    }

    #[test]
    fn test_positive_count_adds_exactly_one_honor() {
        for indicator in Indicator::ALL {
            let mut counts = IndicatorCounts::zeroed();
            counts.set(indicator, 1);
            let once = extract_honors(&counts);
            assert_eq!(once.len(), 1, "{:?}", indicator);
            assert_eq!(once[0].category, indicator.category());
            assert_eq!(once[0].level, indicator_spec(indicator).level);

            counts.set(indicator, 5);
            assert_eq!(extract_honors(&counts), once);
        }
    }

    #[test]
    fn test_negative_counts_are_ignored() {
        let mut counts = IndicatorCounts::zeroed();
        counts.set(Indicator::AeoCertification, -1);
        assert!(extract_honors(&counts).is_empty());
    }
}
