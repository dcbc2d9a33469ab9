//! Dashboard service: catalog counts and the per-session visit counter

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use crate::{
    error::AppResult, models::book_instance::LoanStatus, repository::Repository,
};

/// Catalog-wide counts for the summary view
#[derive(Debug, Clone, Copy)]
pub struct CatalogCounts {
    pub num_books: i64,
    pub num_authors: i64,
    pub num_instances: i64,
    pub num_instances_available: i64,
}

/// Visit counters keyed by session id. Session-scoped state only; each entry
/// needs nothing beyond monotonic increment-per-visit.
#[derive(Clone, Default)]
pub struct VisitCounter {
    sessions: Arc<Mutex<HashMap<Uuid, u64>>>,
}

impl VisitCounter {
    /// Record a visit for the session, allocating a session id when the
    /// caller has none yet. Returns the id and the count of visits *before*
    /// this one (a first visit reports 0).
    pub fn record(&self, session_id: Option<Uuid>) -> (Uuid, u64) {
        let id = session_id.unwrap_or_else(Uuid::new_v4);
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let counter = sessions.entry(id).or_insert(0);
        let visits = *counter;
        *counter += 1;
        (id, visits)
    }
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
    visits: VisitCounter,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            visits: VisitCounter::default(),
        }
    }

    /// Collect the catalog counts
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        Ok(CatalogCounts {
            num_books: self.repository.books.count().await?,
            num_authors: self.repository.authors.count().await?,
            num_instances: self.repository.copies.count().await?,
            num_instances_available: self
                .repository
                .copies
                .count_by_status(LoanStatus::Available)
                .await?,
        })
    }

    /// Record a visit for the session
    pub fn record_visit(&self, session_id: Option<Uuid>) -> (Uuid, u64) {
        self.visits.record(session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visit_reports_zero() {
        let visits = VisitCounter::default();
        let (id, count) = visits.record(None);
        assert_eq!(count, 0);

        let (same_id, count) = visits.record(Some(id));
        assert_eq!(same_id, id);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_sessions_count_independently() {
        let visits = VisitCounter::default();
        let (a, _) = visits.record(None);
        visits.record(Some(a));
        visits.record(Some(a));

        let (b, first) = visits.record(None);
        assert_ne!(a, b);
        assert_eq!(first, 0);
        assert_eq!(visits.record(Some(a)).1, 3);
    }
}
