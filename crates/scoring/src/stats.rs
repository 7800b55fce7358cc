//! Dashboard summary statistics.

use serde::{Deserialize, Serialize};
use vipboard_model::CompanyRecord;

use crate::round_to;

/// Score band used by the distribution histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    UpTo3,
    UpTo6,
    UpTo9,
    TenPlus,
}

impl ScoreBand {
    pub fn of(total: f64) -> Self {
        if total <= 3.0 {
            Self::UpTo3
        } else if total <= 6.0 {
            Self::UpTo6
        } else if total <= 9.0 {
            Self::UpTo9
        } else {
            Self::TenPlus
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::UpTo3 => "0-3分",
            Self::UpTo6 => "4-6分",
            Self::UpTo9 => "7-9分",
            Self::TenPlus => "10-13分",
        }
    }
}

/// Company counts per score band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDistribution {
    #[serde(rename = "0-3分")]
    pub up_to_3: usize,
    #[serde(rename = "4-6分")]
    pub up_to_6: usize,
    #[serde(rename = "7-9分")]
    pub up_to_9: usize,
    #[serde(rename = "10-13分")]
    pub ten_plus: usize,
}

impl ScoreDistribution {
    pub fn add(&mut self, band: ScoreBand) {
        match band {
            ScoreBand::UpTo3 => self.up_to_3 += 1,
            ScoreBand::UpTo6 => self.up_to_6 += 1,
            ScoreBand::UpTo9 => self.up_to_9 += 1,
            ScoreBand::TenPlus => self.ten_plus += 1,
        }
    }

    pub fn get(&self, band: ScoreBand) -> usize {
        match band {
            ScoreBand::UpTo3 => self.up_to_3,
            ScoreBand::UpTo6 => self.up_to_6,
            ScoreBand::UpTo9 => self.up_to_9,
            ScoreBand::TenPlus => self.ten_plus,
        }
    }
}

/// Summary numbers for the dashboard header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStatistics {
    pub total_companies: usize,
    /// Mean of `scores.total`, rounded to 1 decimal
    pub average_score: f64,
    pub gold_vip_count: usize,
    pub brand_companies: usize,
    pub score_distribution: ScoreDistribution,
}

/// Aggregate over a set of records. Empty input gives all zeros.
pub fn aggregate_statistics(records: &[CompanyRecord]) -> AggregateStatistics {
    if records.is_empty() {
        return AggregateStatistics::default();
    }

    let mut distribution = ScoreDistribution::default();
    for record in records {
        distribution.add(ScoreBand::of(record.scores.total));
    }

    let sum: f64 = records.iter().map(|r| r.scores.total).sum();

    AggregateStatistics {
        total_companies: records.len(),
        average_score: round_to(sum / records.len() as f64, 1),
        gold_vip_count: records.iter().filter(|r| r.is_gold()).count(),
        brand_companies: records.iter().filter(|r| r.is_brand).count(),
        score_distribution: distribution,
    }
}
