//! Chart and report data for a single company.
//!
//! Converts a scored record into the numbers the radar chart, the
//! completion donut and the exported report draw. No rendering happens here.

use serde::{Deserialize, Serialize};
use vipboard_model::{CompanyRecord, ScoreCategory, ScoreSummary};

/// Full marks for the completion donut.
pub const MAX_TOTAL: f64 = 36.0;

/// Full marks per category on the radar chart.
pub fn category_max(category: ScoreCategory) -> f64 {
    match category {
        ScoreCategory::MarketValue => 6.0,
        ScoreCategory::RdInnovation => 12.0,
        ScoreCategory::SmartManufacturing => 6.0,
        ScoreCategory::GreenManufacturing => 8.0,
        ScoreCategory::CreditLevel => 4.0,
    }
}

/// Full marks per category printed in the report's score block.
///
/// These differ from the radar maxima for market value, smart manufacturing
/// and credit level.
pub fn report_category_max(category: ScoreCategory) -> f64 {
    match category {
        ScoreCategory::MarketValue => 5.0,
        ScoreCategory::RdInnovation => 12.0,
        ScoreCategory::SmartManufacturing => 5.0,
        ScoreCategory::GreenManufacturing => 8.0,
        ScoreCategory::CreditLevel => 1.0,
    }
}

/// One spoke of the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub category: ScoreCategory,
    pub label: String,
    pub label_en: String,
    pub score: i64,
    pub max: f64,
    /// `score / max * 100`, not clamped
    pub percent: f64,
}

/// Radar chart values, one per category in fixed order.
pub fn radar_profile(scores: &ScoreSummary) -> Vec<CategoryProgress> {
    ScoreCategory::ALL
        .iter()
        .map(|category| {
            let score = scores.category(*category);
            let max = category_max(*category);
            CategoryProgress {
                category: *category,
                label: category.label().to_string(),
                label_en: category.label_en().to_string(),
                score,
                max,
                percent: score as f64 / max * 100.0,
            }
        })
        .collect()
}

/// Donut chart values for the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub total: f64,
    pub max_total: f64,
    pub completed_percent: f64,
    pub remaining_percent: f64,
}

pub fn completion(scores: &ScoreSummary) -> Completion {
    let completed = scores.total / MAX_TOTAL * 100.0;
    Completion {
        total: scores.total,
        max_total: MAX_TOTAL,
        completed_percent: completed,
        remaining_percent: 100.0 - completed,
    }
}

/// A titled block of report lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<String>,
}

const HIGHLIGHT_LIMIT: usize = 5;
const HIGHLIGHT_WIDTH: usize = 80;

/// Sections of the exported company report.
///
/// Highlights are capped at five entries of 80 characters each; the section
/// is left out when the company has none.
pub fn build_report(record: &CompanyRecord) -> Vec<ReportSection> {
    let mut sections = vec![
        ReportSection {
            title: "Basic Information".to_string(),
            lines: vec![
                format!("Company Name: {}", record.name),
                format!("City: {}", record.city),
                format!("Exhibition Count: {}", record.exhibition_count),
                format!("Brand Status: {}", if record.is_brand { "Yes" } else { "No" }),
                format!("VIP Level: {}", record.vip_level),
            ],
        },
        ReportSection {
            title: "Score Details".to_string(),
            lines: score_lines(&record.scores),
        },
    ];

    if !record.highlights.is_empty() {
        sections.push(ReportSection {
            title: "Company Highlights".to_string(),
            lines: record
                .highlights
                .iter()
                .take(HIGHLIGHT_LIMIT)
                .enumerate()
                .map(|(i, h)| format!("{}. {}", i + 1, truncate_chars(h, HIGHLIGHT_WIDTH)))
                .collect(),
        });
    }

    sections
}

fn score_lines(scores: &ScoreSummary) -> Vec<String> {
    let mut lines: Vec<String> = ScoreCategory::ALL
        .iter()
        .map(|c| {
            format!(
                "{}: {}/{}",
                c.label_en(),
                scores.category(*c),
                report_category_max(*c)
            )
        })
        .collect();
    lines.push(format!(
        "Total Score: {}/{} ({:.1}%)",
        scores.total,
        MAX_TOTAL,
        completion(scores).completed_percent
    ));
    lines
}

fn truncate_chars(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width).collect();
        format!("{}...", cut)
    }
}

/// Render the report as plain text.
pub fn render_report(record: &CompanyRecord) -> String {
    let mut out = String::new();
    for section in build_report(record) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&section.title);
        out.push('\n');
        for line in &section.lines {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// One-line summary for listings.
pub fn summarize_company(record: &CompanyRecord) -> String {
    let vip = if record.vip_level.is_empty() {
        "-"
    } else {
        record.vip_level.as_str()
    };
    format!(
        "{} [{}] total {} ({:.1}% of {}), {} honor(s)",
        record.name,
        vip,
        record.scores.total,
        completion(&record.scores).completed_percent,
        MAX_TOTAL,
        record.honors.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scores() -> ScoreSummary {
        ScoreSummary {
            market_value: 3,
            rd_innovation: 6,
            smart_manufacturing: 0,
            green_manufacturing: 2,
            credit_level: 1,
            total: 18.0,
            percentage: 18.0,
        }
    }

    #[test]
    fn test_radar_profile() {
        let profile = radar_profile(&scores());
        let percents: Vec<_> = profile.iter().map(|p| p.percent).collect();
        assert_eq!(percents, vec![50.0, 50.0, 0.0, 25.0, 25.0]);
        assert_eq!(profile[0].label, "市场价值");
        assert_eq!(profile[4].label_en, "Credit Level");
    }

    #[test]
    fn test_completion() {
        let done = completion(&scores());
        assert_eq!(done.completed_percent, 50.0);
        assert_eq!(done.remaining_percent, 50.0);
    }

    #[test]
    fn test_report_sections() {
        let mut record = CompanyRecord::new("TCL");
        record.scores = scores();
        record.highlights = (1..=7).map(|i| format!("亮点{}", i)).collect();
        record.highlights[0] = "长".repeat(90);

        let sections = build_report(&record);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[1].lines[0], "Market Value: 3/5");
        assert_eq!(sections[1].lines[1], "R&D Innovation: 6/12");
        assert_eq!(sections[1].lines[2], "Smart Manufacturing: 0/5");
        assert_eq!(sections[1].lines[4], "Credit Level: 1/1");
        assert_eq!(sections[1].lines[5], "Total Score: 18/36 (50.0%)");
        assert_eq!(sections[2].lines.len(), 5);
        assert_eq!(sections[2].lines[0], format!("1. {}...", "长".repeat(80)));
        assert_eq!(sections[2].lines[1], "2. 亮点2");
    }

    #[test]
    fn test_report_without_highlights() {
        let record = CompanyRecord::new("TCL");
        assert_eq!(build_report(&record).len(), 2);
        assert!(render_report(&record).starts_with("Basic Information\n  Company Name: TCL\n"));
    }

    #[test]
    fn test_summary() {
        let mut record = CompanyRecord::new("TCL");
        record.scores = scores();
        record.vip_level = "金标".to_string();
        assert_eq!(summarize_company(&record), "TCL [金标] total 18 (50.0% of 36), 0 honor(s)");
    }
}
