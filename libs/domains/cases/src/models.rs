use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Status label used by the dashboard to split active from closed cases.
pub const CLOSED_STATUS: &str = "Closed";

/// A legal matter record, uniquely identified by its case number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub id: Uuid,
    /// Human-assigned docket identifier; unique across the practice.
    pub case_number: String,
    pub lawyer_name: String,
    pub client_name: String,
    pub client_email: String,
    pub client_mobile: String,
    pub client_address: String,
    pub opponent_name: String,
    pub court_name: String,
    pub case_type: String,
    pub police_station: String,
    pub location: String,
    pub filing_date: Option<NaiveDate>,
    /// Free-text status label. This is deliberately an open set: the edit form
    /// and hearing updates may write any string, and no transition table is
    /// enforced.
    pub status: String,
    pub description: String,
    pub total_fees: f64,
    pub fees_paid: f64,
    /// Derived: `total_fees - fees_paid`. Recomputed on every fee change.
    pub fees_pending: f64,
    /// Per-case opt-in for client email notifications.
    pub notify_client: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A dated proceeding event belonging to one case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hearing {
    pub id: Uuid,
    pub case_id: Uuid,
    pub hearing_date: Option<NaiveDate>,
    pub stage: String,
    pub notes: String,
    pub next_hearing_date: Option<NaiveDate>,
    /// Status label applied back to the parent case when set.
    pub updated_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hearing {
    /// The status this hearing writes back onto its parent case, if any.
    /// Empty and whitespace-only strings count as absent.
    pub fn status_update(&self) -> Option<&str> {
        self.updated_status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// DTO for creating a new case (full field set from the add form).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCase {
    #[validate(length(min = 1, message = "case number is required"))]
    pub case_number: String,
    #[serde(default)]
    pub lawyer_name: String,
    #[validate(length(min = 1, message = "client name is required"))]
    pub client_name: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub client_mobile: String,
    #[serde(default)]
    pub client_address: String,
    #[serde(default)]
    pub opponent_name: String,
    #[serde(default)]
    pub court_name: String,
    #[serde(default)]
    pub case_type: String,
    #[serde(default)]
    pub police_station: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub filing_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub total_fees: f64,
    #[serde(default)]
    pub fees_paid: f64,
    #[serde(default)]
    pub notify_client: bool,
}

/// DTO for editing a case. The edit form posts every field, so this is a full
/// replacement rather than a patch.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCase {
    #[validate(length(min = 1, message = "case number is required"))]
    pub case_number: String,
    #[serde(default)]
    pub lawyer_name: String,
    #[validate(length(min = 1, message = "client name is required"))]
    pub client_name: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub client_mobile: String,
    #[serde(default)]
    pub client_address: String,
    #[serde(default)]
    pub opponent_name: String,
    #[serde(default)]
    pub court_name: String,
    #[serde(default)]
    pub case_type: String,
    #[serde(default)]
    pub police_station: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub filing_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub total_fees: f64,
    #[serde(default)]
    pub fees_paid: f64,
    #[serde(default)]
    pub notify_client: bool,
}

/// DTO for adding a hearing to a case.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHearing {
    pub case_id: Uuid,
    #[serde(default)]
    pub hearing_date: Option<NaiveDate>,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub next_hearing_date: Option<NaiveDate>,
    #[serde(default)]
    pub updated_status: Option<String>,
}

/// DTO for editing a hearing (full replacement, as with cases).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateHearing {
    #[serde(default)]
    pub hearing_date: Option<NaiveDate>,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub next_hearing_date: Option<NaiveDate>,
    #[serde(default)]
    pub updated_status: Option<String>,
}

/// Query filters for the case list / dashboard search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseFilter {
    /// Case-insensitive substring match over case number, client name and
    /// lawyer name.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact (case-insensitive) status match; `None` means all statuses.
    #[serde(default)]
    pub status: Option<String>,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaseStats {
    pub total: usize,
    /// Everything whose status is not exactly "Closed".
    pub active: usize,
    pub closed: usize,
}

impl Case {
    /// Create a new case from the add-form DTO.
    pub fn new(input: CreateCase) -> Self {
        let now = Utc::now();
        let mut case = Self {
            id: Uuid::now_v7(),
            case_number: input.case_number.trim().to_string(),
            lawyer_name: input.lawyer_name,
            client_name: input.client_name,
            client_email: input.client_email,
            client_mobile: input.client_mobile,
            client_address: input.client_address,
            opponent_name: input.opponent_name,
            court_name: input.court_name,
            case_type: input.case_type,
            police_station: input.police_station,
            location: input.location,
            filing_date: input.filing_date,
            status: input.status,
            description: input.description,
            total_fees: input.total_fees,
            fees_paid: input.fees_paid,
            fees_pending: 0.0,
            notify_client: input.notify_client,
            created_at: now,
            updated_at: now,
        };
        case.recalc_fees();
        case
    }

    /// Apply a full edit from the edit-form DTO.
    pub fn apply_update(&mut self, update: UpdateCase) {
        self.case_number = update.case_number.trim().to_string();
        self.lawyer_name = update.lawyer_name;
        self.client_name = update.client_name;
        self.client_email = update.client_email;
        self.client_mobile = update.client_mobile;
        self.client_address = update.client_address;
        self.opponent_name = update.opponent_name;
        self.court_name = update.court_name;
        self.case_type = update.case_type;
        self.police_station = update.police_station;
        self.location = update.location;
        self.filing_date = update.filing_date;
        self.status = update.status;
        self.description = update.description;
        self.total_fees = update.total_fees;
        self.fees_paid = update.fees_paid;
        self.notify_client = update.notify_client;
        self.recalc_fees();
        self.updated_at = Utc::now();
    }

    /// Recompute the derived pending-fees balance. Must run on every create or
    /// update path that touches either fee field.
    pub fn recalc_fees(&mut self) {
        self.fees_pending = self.total_fees - self.fees_paid;
    }

    pub fn is_closed(&self) -> bool {
        self.status == CLOSED_STATUS
    }
}

impl Hearing {
    /// Create a new hearing from the add-form DTO.
    pub fn new(input: CreateHearing) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            case_id: input.case_id,
            hearing_date: input.hearing_date,
            stage: input.stage,
            notes: input.notes,
            next_hearing_date: input.next_hearing_date,
            updated_status: input.updated_status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a full edit from the edit-form DTO.
    pub fn apply_update(&mut self, update: UpdateHearing) {
        self.hearing_date = update.hearing_date;
        self.stage = update.stage;
        self.notes = update.notes;
        self.next_hearing_date = update.next_hearing_date;
        self.updated_status = update.updated_status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(case_number: &str) -> CreateCase {
        CreateCase {
            case_number: case_number.to_string(),
            lawyer_name: "A. Advocate".to_string(),
            client_name: "C. Client".to_string(),
            client_email: String::new(),
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
            total_fees: 5000.0,
            fees_paid: 1500.0,
            notify_client: false,
        }
    }

    #[test]
    fn test_new_case_recalcs_pending_fees() {
        let case = Case::new(create_input("CR-2026/001"));
        assert_eq!(case.fees_pending, 3500.0);
    }

    #[test]
    fn test_case_number_is_trimmed() {
        let case = Case::new(create_input("  CR-2026/002 "));
        assert_eq!(case.case_number, "CR-2026/002");
    }

    #[test]
    fn test_recalc_with_zero_fees() {
        let mut input = create_input("CR-2026/003");
        input.total_fees = 0.0;
        input.fees_paid = 0.0;
        let case = Case::new(input);
        assert_eq!(case.fees_pending, 0.0);
    }

    #[test]
    fn test_hearing_status_update_ignores_blank() {
        let mut hearing = Hearing::new(CreateHearing {
            case_id: Uuid::now_v7(),
            hearing_date: None,
            stage: String::new(),
            notes: String::new(),
            next_hearing_date: None,
            updated_status: Some("   ".to_string()),
        });
        assert_eq!(hearing.status_update(), None);

        hearing.updated_status = Some("Closed".to_string());
        assert_eq!(hearing.status_update(), Some("Closed"));

        hearing.updated_status = None;
        assert_eq!(hearing.status_update(), None);
    }
}
