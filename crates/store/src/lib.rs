//! Process-lifetime storage for the loaded company set.
//!
//! Provides the `CompanyStore` trait and an in-memory implementation.
//! Every load replaces the whole set at once; readers take a snapshot and
//! keep seeing it even if a new load lands meanwhile.

use std::sync::{Arc, RwLock};

use serde::Serialize;
use thiserror::Error;
use vipboard_model::CompanyRecord;
use vipboard_scoring::{build_batch, build_company_record, demo_row, ScoringConfig, SkippedRow};

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Trait for company stores.
///
/// Handlers hold one store instance and go through it for every read and
/// load, rather than sharing a global list.
pub trait CompanyStore {
    /// Replace all records; returns how many are now stored.
    fn replace(&self, records: Vec<CompanyRecord>) -> Result<usize, StoreError>;

    /// Current records as an immutable snapshot.
    fn snapshot(&self) -> Result<Arc<Vec<CompanyRecord>>, StoreError>;

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.snapshot()?.len())
    }

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Get the store name for logging.
    fn name(&self) -> &'static str;
}

/// In-memory store guarded by a single read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Arc<Vec<CompanyRecord>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CompanyStore for InMemoryStore {
    fn replace(&self, records: Vec<CompanyRecord>) -> Result<usize, StoreError> {
        let count = records.len();
        let mut guard = self.records.write().map_err(|_| StoreError::Poisoned)?;
        *guard = Arc::new(records);
        tracing::info!(store = self.name(), companies = count, "Replaced company set");
        Ok(count)
    }

    fn snapshot(&self) -> Result<Arc<Vec<CompanyRecord>>, StoreError> {
        let guard = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(Arc::clone(&guard))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Outcome of a load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Build records from raw rows and replace the store contents with them.
pub fn load_rows<S, I>(store: &S, rows: I, config: &ScoringConfig) -> Result<LoadSummary, StoreError>
where
    S: CompanyStore + ?Sized,
    I: IntoIterator<Item = serde_json::Value>,
{
    let outcome = build_batch(rows, config);
    let loaded = store.replace(outcome.records)?;
    Ok(LoadSummary {
        loaded,
        skipped: outcome.skipped,
    })
}

/// Replace the store contents with the single built-in demo company.
pub fn load_demo<S>(store: &S, config: &ScoringConfig) -> Result<usize, StoreError>
where
    S: CompanyStore + ?Sized,
{
    let record = build_company_record(&demo_row(), config);
    store.replace(vec![record])
}

/// Service health as reported to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub store: &'static str,
    pub companies_loaded: usize,
}

pub fn health<S: CompanyStore + ?Sized>(store: &S) -> Result<Health, StoreError> {
    Ok(Health {
        status: "healthy",
        store: store.name(),
        companies_loaded: store.len()?,
    })
}
