// =============================================================================
// Result Cache — batch results addressed by an opaque session id
// =============================================================================
//
// Entries are immutable once stored; only their access timestamp moves.
// An entry expires `ttl` after its last access and is purged on the next
// store. When the cache is full the least-recently-accessed entry is evicted.
// =============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::clock::{Clock, SystemClock};
use crate::analysis::AnalysisReport;

pub const DEFAULT_TTL_SECS: u64 = 3600;
pub const DEFAULT_MAX_ENTRIES: usize = 512;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("session expired")]
    NotFound,
}

/// One page of a cached batch: a single report plus its position.
#[derive(Debug, Clone, Serialize)]
pub struct CachedPage {
    pub id: Uuid,
    pub page: usize,
    pub total: usize,
    pub report: AnalysisReport,
}

struct Entry {
    reports: Arc<[AnalysisReport]>,
    created_at_ms: i64,
    last_access_ms: AtomicI64,
}

pub struct ResultCache {
    entries: RwLock<HashMap<Uuid, Entry>>,
    clock: Arc<dyn Clock>,
    ttl_ms: i64,
    max_entries: usize,
}

impl ResultCache {
    pub fn new(ttl_secs: u64, max_entries: usize) -> Self {
        Self::with_clock(ttl_secs, max_entries, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl_secs: u64, max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            ttl_ms: i64::try_from(ttl_secs.saturating_mul(1000)).unwrap_or(i64::MAX),
            max_entries: max_entries.max(1),
        }
    }

    /// Store a ranked result list and return its fresh id.
    pub fn store(&self, reports: Vec<AnalysisReport>) -> Uuid {
        let now = self.clock.now_ms();
        let id = Uuid::new_v4();
        let total = reports.len();

        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| !self.is_expired(e, now));
        let purged = before - entries.len();

        let mut evicted = 0usize;
        while entries.len() >= self.max_entries {
            let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, e)| (e.last_access_ms.load(Ordering::Relaxed), e.created_at_ms))
                .map(|(id, _)| *id)
            else {
                break;
            };
            entries.remove(&oldest);
            evicted += 1;
        }

        entries.insert(
            id,
            Entry {
                reports: reports.into(),
                created_at_ms: now,
                last_access_ms: AtomicI64::new(now),
            },
        );

        debug!(%id, total, purged, evicted, live = entries.len(), "batch results cached");
        id
    }

    /// Fetch one report. `page` is clamped into `[0, total - 1]`.
    pub fn fetch(&self, id: Uuid, page: i64) -> Result<CachedPage, CacheError> {
        let now = self.clock.now_ms();
        let entries = self.entries.read();
        let entry = entries.get(&id).ok_or(CacheError::NotFound)?;
        if self.is_expired(entry, now) || entry.reports.is_empty() {
            return Err(CacheError::NotFound);
        }
        entry.last_access_ms.fetch_max(now, Ordering::Relaxed);

        let total = entry.reports.len();
        let page = clamp_page(page, total);
        Ok(CachedPage {
            id,
            page,
            total,
            report: entry.reports[page].clone(),
        })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn is_expired(&self, entry: &Entry, now: i64) -> bool {
        now.saturating_sub(entry.last_access_ms.load(Ordering::Relaxed)) > self.ttl_ms
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECS, DEFAULT_MAX_ENTRIES)
    }
}

fn clamp_page(page: i64, total: usize) -> usize {
    let last = total.saturating_sub(1);
    usize::try_from(page.max(0)).map_or(last, |p| p.min(last))
}

// =============================================================================
// Tests
// =============================================================================
