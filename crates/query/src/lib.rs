//! Dashboard read operations over a loaded company set.
//!
//! - Ranking by weighted total with display filters
//! - Free-text search over name, city and introduction
//! - Detail lookup by exact name
//! - Ranking statistics for the leaderboard header

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use vipboard_model::CompanyRecord;

/// Totals at or above this count as high scores.
pub const HIGH_SCORE_THRESHOLD: f64 = 80.0;

/// Totals at or above this (and below the high threshold) count as medium.
pub const MEDIUM_SCORE_THRESHOLD: f64 = 60.0;

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("Empty search text")]
    EmptyQuery,
    #[error("Unknown ranking filter: {0}")]
    UnknownFilter(String),
}

/// Which slice of the ranking to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankingFilter {
    #[default]
    All,
    Gold,
    Silver,
    Brand,
    Top10,
    HighScore,
}

impl RankingFilter {
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Brand => "brand",
            Self::Top10 => "top10",
            Self::HighScore => "high_score",
        }
    }

    fn matches(&self, position: usize, record: &CompanyRecord) -> bool {
        match self {
            Self::All => true,
            Self::Gold => record.is_gold(),
            Self::Silver => record.is_silver(),
            Self::Brand => record.is_brand,
            Self::Top10 => position < 10,
            Self::HighScore => record.scores.total >= HIGH_SCORE_THRESHOLD,
        }
    }
}

impl FromStr for RankingFilter {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "gold" => Ok(Self::Gold),
            "silver" => Ok(Self::Silver),
            "brand" => Ok(Self::Brand),
            "top10" => Ok(Self::Top10),
            "high_score" => Ok(Self::HighScore),
            other => Err(QueryError::UnknownFilter(other.to_string())),
        }
    }
}

/// Lenient conversion: unrecognized names show everything.
impl From<&str> for RankingFilter {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

/// A record with its position in the overall ranking.
///
/// The record itself is left untouched; the rank lives on the wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCompany<'a> {
    pub rank: usize,
    #[serde(flatten)]
    pub company: &'a CompanyRecord,
}

fn by_total_desc(a: &CompanyRecord, b: &CompanyRecord) -> Ordering {
    b.scores
        .total
        .partial_cmp(&a.scores.total)
        .unwrap_or(Ordering::Equal)
}

/// Rank every record by total (descending, ties keep input order), then
/// apply the filter. Ranks are assigned before filtering.
pub fn rank_companies(records: &[CompanyRecord], filter: RankingFilter) -> Vec<RankedCompany<'_>> {
    let mut sorted: Vec<&CompanyRecord> = records.iter().collect();
    sorted.sort_by(|a, b| by_total_desc(a, b));

    sorted
        .into_iter()
        .enumerate()
        .filter(|(position, record)| filter.matches(*position, record))
        .map(|(position, company)| RankedCompany {
            rank: position + 1,
            company,
        })
        .collect()
}

/// Search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub limit: usize,
}

impl SearchQuery {
    pub const DEFAULT_LIMIT: usize = 10;

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Case-insensitive substring search over name, city and introduction.
///
/// Matches come back sorted by total, highest first, capped at `limit`.
pub fn search_companies<'a>(
    records: &'a [CompanyRecord],
    query: &SearchQuery,
) -> Result<Vec<&'a CompanyRecord>, QueryError> {
    let needle = query.text.trim().to_lowercase();
    if needle.is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    let mut results: Vec<&CompanyRecord> = records
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&needle)
                || r.city.to_lowercase().contains(&needle)
                || r.introduction.to_lowercase().contains(&needle)
        })
        .collect();

    results.sort_by(|a, b| by_total_desc(a, b));
    results.truncate(query.limit);
    Ok(results)
}

/// First record whose name equals `name` exactly.
pub fn find_company<'a>(records: &'a [CompanyRecord], name: &str) -> Option<&'a CompanyRecord> {
    records.iter().find(|r| r.name == name)
}

/// Leaderboard header numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankingStatistics {
    pub total_companies: usize,
    pub gold_vip_count: usize,
    pub silver_vip_count: usize,
    pub brand_companies: usize,
    pub avg_score: f64,
    pub max_score: f64,
    pub min_score: f64,
    pub high_score_count: usize,
    pub medium_score_count: usize,
    pub low_score_count: usize,
}

/// Statistics for a non-empty set; `None` when nothing is loaded.
pub fn ranking_statistics(records: &[CompanyRecord]) -> Option<RankingStatistics> {
    if records.is_empty() {
        return None;
    }

    let scores: Vec<f64> = records.iter().map(|r| r.scores.total).collect();
    let avg = scores.iter().sum::<f64>() / scores.len() as f64;

    Some(RankingStatistics {
        total_companies: records.len(),
        gold_vip_count: records.iter().filter(|r| r.is_gold()).count(),
        silver_vip_count: records.iter().filter(|r| r.is_silver()).count(),
        brand_companies: records.iter().filter(|r| r.is_brand).count(),
        avg_score: (avg * 10.0).round() / 10.0,
        max_score: scores.iter().copied().fold(f64::MIN, f64::max),
        min_score: scores.iter().copied().fold(f64::MAX, f64::min),
        high_score_count: scores.iter().filter(|s| **s >= HIGH_SCORE_THRESHOLD).count(),
        medium_score_count: scores
            .iter()
            .filter(|s| (MEDIUM_SCORE_THRESHOLD..HIGH_SCORE_THRESHOLD).contains(*s))
            .count(),
        low_score_count: scores.iter().filter(|s| **s < MEDIUM_SCORE_THRESHOLD).count(),
    })
}
