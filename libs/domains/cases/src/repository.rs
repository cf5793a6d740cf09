use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CaseError, CaseResult};
use crate::models::{
    Case, CaseFilter, CaseStats, CreateCase, CreateHearing, Hearing, UpdateCase, UpdateHearing,
};

/// Repository trait for case and hearing persistence.
///
/// Hearings are owned by cases: deleting a case cascades to its hearings.
/// Notification audit rows live in a separate store and are intentionally not
/// part of the cascade.
#[async_trait]
pub trait CaseRepository: Send + Sync {
    /// Create a new case, enforcing case-number uniqueness before insert.
    async fn create_case(&self, input: CreateCase) -> CaseResult<Case>;

    /// Get a case by ID.
    async fn get_case(&self, id: Uuid) -> CaseResult<Option<Case>>;

    /// List cases matching the filter, newest first.
    async fn list_cases(&self, filter: CaseFilter) -> CaseResult<Vec<Case>>;

    /// Apply a full edit, enforcing case-number uniqueness against other cases.
    async fn update_case(&self, id: Uuid, input: UpdateCase) -> CaseResult<Case>;

    /// Overwrite just the status label of a case (hearing write-back path).
    async fn set_case_status(&self, id: Uuid, status: &str) -> CaseResult<Case>;

    /// Delete a case and all of its hearings. Returns false if absent.
    async fn delete_case(&self, id: Uuid) -> CaseResult<bool>;

    /// Dashboard counters.
    async fn stats(&self) -> CaseResult<CaseStats>;

    /// Add a hearing to an existing case.
    async fn add_hearing(&self, input: CreateHearing) -> CaseResult<Hearing>;

    /// Get a hearing by ID.
    async fn get_hearing(&self, id: Uuid) -> CaseResult<Option<Hearing>>;

    /// Hearings for a case, most recent hearing date first (undated last).
    async fn hearings_for_case(&self, case_id: Uuid) -> CaseResult<Vec<Hearing>>;

    /// Hearings dated on or after `from`, soonest first, capped at `limit`.
    async fn upcoming_hearings(&self, from: NaiveDate, limit: usize) -> CaseResult<Vec<Hearing>>;

    /// Apply a full edit to a hearing.
    async fn update_hearing(&self, id: Uuid, input: UpdateHearing) -> CaseResult<Hearing>;

    /// Delete a hearing. Returns false if absent.
    async fn delete_hearing(&self, id: Uuid) -> CaseResult<bool>;
}

/// In-memory implementation of `CaseRepository` (development and tests).
#[derive(Debug, Default, Clone)]
pub struct InMemoryCaseRepository {
    cases: Arc<RwLock<HashMap<Uuid, Case>>>,
    hearings: Arc<RwLock<HashMap<Uuid, Hearing>>>,
}

impl InMemoryCaseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_filter(case: &Case, filter: &CaseFilter) -> bool {
    if let Some(search) = filter.search.as_deref() {
        let needle = search.trim().to_lowercase();
        if !needle.is_empty() {
            let hit = case.case_number.to_lowercase().contains(&needle)
                || case.client_name.to_lowercase().contains(&needle)
                || case.lawyer_name.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
    }
    if let Some(status) = filter.status.as_deref() {
        if !case.status.eq_ignore_ascii_case(status) {
            return false;
        }
    }
    true
}

#[async_trait]
impl CaseRepository for InMemoryCaseRepository {
    async fn create_case(&self, input: CreateCase) -> CaseResult<Case> {
        let mut cases = self.cases.write().await;

        let number = input.case_number.trim();
        if cases.values().any(|c| c.case_number == number) {
            return Err(CaseError::DuplicateCaseNumber(number.to_string()));
        }

        let case = Case::new(input);
        cases.insert(case.id, case.clone());

        tracing::info!(case_id = %case.id, case_number = %case.case_number, "Created case");
        Ok(case)
    }

    async fn get_case(&self, id: Uuid) -> CaseResult<Option<Case>> {
        let cases = self.cases.read().await;
        Ok(cases.get(&id).cloned())
    }

    async fn list_cases(&self, filter: CaseFilter) -> CaseResult<Vec<Case>> {
        let cases = self.cases.read().await;

        let mut result: Vec<Case> = cases
            .values()
            .filter(|c| matches_filter(c, &filter))
            .cloned()
            .collect();

        // Newest first
        result.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(result)
    }

    async fn update_case(&self, id: Uuid, input: UpdateCase) -> CaseResult<Case> {
        let mut cases = self.cases.write().await;

        if !cases.contains_key(&id) {
            return Err(CaseError::NotFound(id));
        }

        // Editing to the case's own unchanged number is allowed
        let number = input.case_number.trim();
        if cases
            .values()
            .any(|c| c.id != id && c.case_number == number)
        {
            return Err(CaseError::DuplicateCaseNumber(number.to_string()));
        }

        let case = cases
            .get_mut(&id)
            .ok_or(CaseError::NotFound(id))?;
        case.apply_update(input);
        let updated = case.clone();

        tracing::info!(case_id = %id, "Updated case");
        Ok(updated)
    }

    async fn set_case_status(&self, id: Uuid, status: &str) -> CaseResult<Case> {
        let mut cases = self.cases.write().await;

        let case = cases.get_mut(&id).ok_or(CaseError::NotFound(id))?;
        case.status = status.to_string();
        case.updated_at = chrono::Utc::now();

        tracing::info!(case_id = %id, status = %status, "Case status written back");
        Ok(case.clone())
    }

    async fn delete_case(&self, id: Uuid) -> CaseResult<bool> {
        let mut cases = self.cases.write().await;
        let mut hearings = self.hearings.write().await;

        if cases.remove(&id).is_none() {
            return Ok(false);
        }

        // Cascade: hearings go with the case. Notification rows are kept by a
        // separate store and stay behind as orphans.
        hearings.retain(|_, h| h.case_id != id);

        tracing::info!(case_id = %id, "Deleted case and its hearings");
        Ok(true)
    }

    async fn stats(&self) -> CaseResult<CaseStats> {
        let cases = self.cases.read().await;

        let total = cases.len();
        let closed = cases.values().filter(|c| c.is_closed()).count();

        Ok(CaseStats {
            total,
            active: total - closed,
            closed,
        })
    }

    async fn add_hearing(&self, input: CreateHearing) -> CaseResult<Hearing> {
        let cases = self.cases.read().await;
        if !cases.contains_key(&input.case_id) {
            return Err(CaseError::NotFound(input.case_id));
        }
        drop(cases);

        let hearing = Hearing::new(input);
        let mut hearings = self.hearings.write().await;
        hearings.insert(hearing.id, hearing.clone());

        tracing::info!(hearing_id = %hearing.id, case_id = %hearing.case_id, "Added hearing");
        Ok(hearing)
    }

    async fn get_hearing(&self, id: Uuid) -> CaseResult<Option<Hearing>> {
        let hearings = self.hearings.read().await;
        Ok(hearings.get(&id).cloned())
    }

    async fn hearings_for_case(&self, case_id: Uuid) -> CaseResult<Vec<Hearing>> {
        let hearings = self.hearings.read().await;

        let mut result: Vec<Hearing> = hearings
            .values()
            .filter(|h| h.case_id == case_id)
            .cloned()
            .collect();

        // Most recent hearing date first; undated entries sort last
        result.sort_by(|a, b| b.hearing_date.cmp(&a.hearing_date));

        Ok(result)
    }

    async fn upcoming_hearings(&self, from: NaiveDate, limit: usize) -> CaseResult<Vec<Hearing>> {
        let hearings = self.hearings.read().await;

        let mut result: Vec<Hearing> = hearings
            .values()
            .filter(|h| h.hearing_date.is_some_and(|d| d >= from))
            .cloned()
            .collect();

        result.sort_by(|a, b| a.hearing_date.cmp(&b.hearing_date));
        result.truncate(limit);

        Ok(result)
    }

    async fn update_hearing(&self, id: Uuid, input: UpdateHearing) -> CaseResult<Hearing> {
        let mut hearings = self.hearings.write().await;

        let hearing = hearings
            .get_mut(&id)
            .ok_or(CaseError::HearingNotFound(id))?;
        hearing.apply_update(input);
        let updated = hearing.clone();

        tracing::info!(hearing_id = %id, "Updated hearing");
        Ok(updated)
    }

    async fn delete_hearing(&self, id: Uuid) -> CaseResult<bool> {
        let mut hearings = self.hearings.write().await;

        if hearings.remove(&id).is_some() {
            tracing::info!(hearing_id = %id, "Deleted hearing");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
