use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CaseError, CaseResult};
use crate::models::{
    Case, CaseFilter, CaseStats, CreateCase, CreateHearing, Hearing, UpdateCase, UpdateHearing,
};
use crate::repository::CaseRepository;

/// How many upcoming hearings the dashboard shows.
const UPCOMING_HEARINGS_LIMIT: usize = 10;

/// Service layer for case and hearing business logic.
///
/// Mutation-critical errors (validation, duplicates, not-found) surface as
/// `CaseError` before anything is persisted. Notification dispatch is not this
/// service's concern: callers run it after a successful mutation, and its
/// failure never rolls the mutation back.
#[derive(Clone)]
pub struct CaseService<R: CaseRepository> {
    repository: Arc<R>,
}

impl<R: CaseRepository> CaseService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new case with validation and fee recalculation.
    pub async fn create_case(&self, input: CreateCase) -> CaseResult<Case> {
        input
            .validate()
            .map_err(|e| CaseError::Validation(e.to_string()))?;

        self.repository.create_case(input).await
    }

    /// Get a case by ID.
    pub async fn get_case(&self, id: Uuid) -> CaseResult<Case> {
        self.repository
            .get_case(id)
            .await?
            .ok_or(CaseError::NotFound(id))
    }

    /// Search/list cases, newest first.
    pub async fn search_cases(&self, filter: CaseFilter) -> CaseResult<Vec<Case>> {
        self.repository.list_cases(filter).await
    }

    /// Apply a full edit to a case. Fees are recalculated as part of the
    /// update; the caller decides whether to dispatch a status notification
    /// afterwards.
    pub async fn update_case(&self, id: Uuid, input: UpdateCase) -> CaseResult<Case> {
        input
            .validate()
            .map_err(|e| CaseError::Validation(e.to_string()))?;

        self.repository.update_case(id, input).await
    }

    /// Delete a case and (by cascade) its hearings.
    pub async fn delete_case(&self, id: Uuid) -> CaseResult<()> {
        let deleted = self.repository.delete_case(id).await?;

        if !deleted {
            return Err(CaseError::NotFound(id));
        }

        Ok(())
    }

    /// Dashboard counters.
    pub async fn stats(&self) -> CaseResult<CaseStats> {
        self.repository.stats().await
    }

    /// Add a hearing. When the hearing carries an `updated_status`, the parent
    /// case's status is overwritten with it. Any string is accepted.
    ///
    /// Returns the hearing together with the (possibly just-updated) case so
    /// the caller can compose a notification from fresh state.
    pub async fn add_hearing(&self, input: CreateHearing) -> CaseResult<(Hearing, Case)> {
        let case_id = input.case_id;
        let hearing = self.repository.add_hearing(input).await?;

        let case = match hearing.status_update() {
            Some(status) => self.repository.set_case_status(case_id, status).await?,
            None => self.get_case(case_id).await?,
        };

        Ok((hearing, case))
    }

    /// Get a hearing by ID.
    pub async fn get_hearing(&self, id: Uuid) -> CaseResult<Hearing> {
        self.repository
            .get_hearing(id)
            .await?
            .ok_or(CaseError::HearingNotFound(id))
    }

    /// Hearings for a case, most recent first.
    pub async fn hearings_for_case(&self, case_id: Uuid) -> CaseResult<Vec<Hearing>> {
        self.repository.hearings_for_case(case_id).await
    }

    /// Upcoming hearings for the dashboard (from today, soonest first).
    pub async fn upcoming_hearings(&self) -> CaseResult<Vec<Hearing>> {
        self.repository
            .upcoming_hearings(Utc::now().date_naive(), UPCOMING_HEARINGS_LIMIT)
            .await
    }

    /// Apply a full edit to a hearing, with the same status write-back rule as
    /// `add_hearing`.
    pub async fn update_hearing(
        &self,
        id: Uuid,
        input: UpdateHearing,
    ) -> CaseResult<(Hearing, Case)> {
        let hearing = self.repository.update_hearing(id, input).await?;

        let case = match hearing.status_update() {
            Some(status) => {
                self.repository
                    .set_case_status(hearing.case_id, status)
                    .await?
            }
            None => self.get_case(hearing.case_id).await?,
        };

        Ok((hearing, case))
    }

    /// Delete a hearing.
    pub async fn delete_hearing(&self, id: Uuid) -> CaseResult<()> {
        let deleted = self.repository.delete_hearing(id).await?;

        if !deleted {
            return Err(CaseError::HearingNotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryCaseRepository;

    fn service() -> CaseService<InMemoryCaseRepository> {
        CaseService::new(InMemoryCaseRepository::new())
    }

    fn create_input(case_number: &str) -> CreateCase {
        CreateCase {
            case_number: case_number.to_string(),
            lawyer_name: "A. Advocate".to_string(),
            client_name: "C. Client".to_string(),
            client_email: "client@example.com".to_string(),
            client_mobile: String::new(),
            client_address: String::new(),
            opponent_name: String::new(),
            court_name: String::new(),
            case_type: String::new(),
            police_station: String::new(),
            location: String::new(),
            filing_date: None,
            status: "Filed".to_string(),
            description: String::new(),
            total_fees: 0.0,
            fees_paid: 0.0,
            notify_client: false,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_missing_required_fields() {
        let svc = service();

        let mut input = create_input("");
        let result = svc.create_case(input.clone()).await;
        assert!(matches!(result, Err(CaseError::Validation(_))));

        input.case_number = "CR-1".to_string();
        input.client_name = String::new();
        let result = svc.create_case(input).await;
        assert!(matches!(result, Err(CaseError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_hearing_writes_status_back() {
        let svc = service();
        let case = svc.create_case(create_input("CR-1")).await.unwrap();
        assert_eq!(case.status, "Filed");

        let (hearing, case) = svc
            .add_hearing(CreateHearing {
                case_id: case.id,
                hearing_date: None,
                stage: "Judgment".to_string(),
                notes: String::new(),
                next_hearing_date: None,
                updated_status: Some("Closed".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(hearing.updated_status.as_deref(), Some("Closed"));
        assert_eq!(case.status, "Closed");

        // Reflected on subsequent read
        let reread = svc.get_case(case.id).await.unwrap();
        assert_eq!(reread.status, "Closed");
    }

    #[tokio::test]
    async fn test_add_hearing_without_status_leaves_case_alone() {
        let svc = service();
        let case = svc.create_case(create_input("CR-1")).await.unwrap();

        let (_, case_after) = svc
            .add_hearing(CreateHearing {
                case_id: case.id,
                hearing_date: None,
                stage: "Mention".to_string(),
                notes: String::new(),
                next_hearing_date: None,
                updated_status: Some(String::new()),
            })
            .await
            .unwrap();

        assert_eq!(case_after.status, "Filed");
    }

    #[tokio::test]
    async fn test_update_hearing_writes_status_back() {
        let svc = service();
        let case = svc.create_case(create_input("CR-1")).await.unwrap();
        let (hearing, _) = svc
            .add_hearing(CreateHearing {
                case_id: case.id,
                hearing_date: None,
                stage: "Evidence".to_string(),
                notes: String::new(),
                next_hearing_date: None,
                updated_status: None,
            })
            .await
            .unwrap();

        let (_, case_after) = svc
            .update_hearing(
                hearing.id,
                UpdateHearing {
                    hearing_date: None,
                    stage: "Arguments".to_string(),
                    notes: "adjourned".to_string(),
                    next_hearing_date: None,
                    updated_status: Some("Arguments".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(case_after.status, "Arguments");
    }

    #[tokio::test]
    async fn test_delete_missing_case_is_not_found() {
        let svc = service();
        let result = svc.delete_case(Uuid::now_v7()).await;
        assert!(matches!(result, Err(CaseError::NotFound(_))));
    }
}
