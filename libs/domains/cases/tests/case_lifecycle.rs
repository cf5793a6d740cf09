//! Case and hearing lifecycle through the service layer.

use chrono::{Duration, Utc};
use domain_cases::{
    CaseError, CaseFilter, CaseService, CreateCase, CreateHearing, InMemoryCaseRepository,
    UpdateCase,
};

fn service() -> CaseService<InMemoryCaseRepository> {
    CaseService::new(InMemoryCaseRepository::new())
}

fn create_input(case_number: &str, client_name: &str) -> CreateCase {
    CreateCase {
        case_number: case_number.to_string(),
        lawyer_name: "A. Advocate".to_string(),
        client_name: client_name.to_string(),
        client_email: "client@example.com".to_string(),
        client_mobile: String::new(),
        client_address: String::new(),
        opponent_name: String::new(),
        court_name: "District Court".to_string(),
        case_type: "Civil".to_string(),
        police_station: String::new(),
        location: String::new(),
        filing_date: None,
        status: "Filed".to_string(),
        description: String::new(),
        total_fees: 10000.0,
        fees_paid: 4000.0,
        notify_client: true,
    }
}

fn update_input(case_number: &str, client_name: &str, status: &str) -> UpdateCase {
    UpdateCase {
        case_number: case_number.to_string(),
        lawyer_name: "A. Advocate".to_string(),
        client_name: client_name.to_string(),
        client_email: "client@example.com".to_string(),
        client_mobile: String::new(),
        client_address: String::new(),
        opponent_name: String::new(),
        court_name: "District Court".to_string(),
        case_type: "Civil".to_string(),
        police_station: String::new(),
        location: String::new(),
        filing_date: None,
        status: status.to_string(),
        description: String::new(),
        total_fees: 10000.0,
        fees_paid: 4000.0,
        notify_client: true,
    }
}

#[tokio::test]
async fn test_create_edit_and_fee_recalc() {
    let svc = service();
    let case = svc.create_case(create_input("CV-1", "Asha Verma")).await.unwrap();
    assert_eq!(case.fees_pending, 6000.0);

    let mut edit = update_input("CV-1", "Asha Verma", "Hearing");
    edit.fees_paid = 7500.0;
    let updated = svc.update_case(case.id, edit).await.unwrap();

    assert_eq!(updated.status, "Hearing");
    assert_eq!(updated.fees_pending, 2500.0);
}

#[tokio::test]
async fn test_duplicate_case_number_rejected_across_create_and_edit() {
    let svc = service();
    svc.create_case(create_input("CV-1", "First")).await.unwrap();
    let second = svc.create_case(create_input("CV-2", "Second")).await.unwrap();

    let result = svc.create_case(create_input("CV-1", "Third")).await;
    assert!(matches!(result, Err(CaseError::DuplicateCaseNumber(n)) if n == "CV-1"));

    // Editing CV-2 to claim CV-1's number fails too
    let result = svc
        .update_case(second.id, update_input("CV-1", "Second", "Filed"))
        .await;
    assert!(matches!(result, Err(CaseError::DuplicateCaseNumber(_))));

    // Keeping its own number on edit is fine
    let result = svc
        .update_case(second.id, update_input("CV-2", "Second", "Hearing"))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_search_and_stats() {
    let svc = service();
    svc.create_case(create_input("CV-1", "Asha Verma")).await.unwrap();
    let closed = svc.create_case(create_input("CR-9", "Ravi Kumar")).await.unwrap();
    svc.update_case(closed.id, update_input("CR-9", "Ravi Kumar", "Closed"))
        .await
        .unwrap();

    let hits = svc
        .search_cases(CaseFilter {
            search: Some("asha".to_string()),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].case_number, "CV-1");

    let closed_only = svc
        .search_cases(CaseFilter {
            search: None,
            status: Some("closed".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(closed_only.len(), 1);
    assert_eq!(closed_only[0].case_number, "CR-9");

    let stats = svc.stats().await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.active, 1);
    assert_eq!(stats.closed, 1);
}

#[tokio::test]
async fn test_deleting_case_cascades_hearings() {
    let svc = service();
    let case = svc.create_case(create_input("CV-1", "Asha Verma")).await.unwrap();

    let (hearing, _) = svc
        .add_hearing(CreateHearing {
            case_id: case.id,
            hearing_date: Some(Utc::now().date_naive()),
            stage: "Mention".to_string(),
            notes: String::new(),
            next_hearing_date: None,
            updated_status: None,
        })
        .await
        .unwrap();

    svc.delete_case(case.id).await.unwrap();

    assert!(matches!(
        svc.get_case(case.id).await,
        Err(CaseError::NotFound(_))
    ));
    assert!(matches!(
        svc.get_hearing(hearing.id).await,
        Err(CaseError::HearingNotFound(_))
    ));
}

#[tokio::test]
async fn test_upcoming_hearings_skip_past_dates() {
    let svc = service();
    let case = svc.create_case(create_input("CV-1", "Asha Verma")).await.unwrap();

    let today = Utc::now().date_naive();
    for (offset, stage) in [(-7, "Past"), (3, "Soon"), (30, "Later")] {
        svc.add_hearing(CreateHearing {
            case_id: case.id,
            hearing_date: Some(today + Duration::days(offset)),
            stage: stage.to_string(),
            notes: String::new(),
            next_hearing_date: None,
            updated_status: None,
        })
        .await
        .unwrap();
    }

    let upcoming = svc.upcoming_hearings().await.unwrap();
    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[0].stage, "Soon");
    assert_eq!(upcoming[1].stage, "Later");
}
