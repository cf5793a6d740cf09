//! Spreadsheet export of a case's notification history.
//!
//! Produces the tabular content only (title, header, rows); serializing to an
//! actual workbook file is left to the caller's spreadsheet writer.

use chrono::{DateTime, Utc};

use crate::models::Notification;

/// Column headers, in order.
pub const EXPORT_HEADER: [&str; 4] = ["Date Sent", "To", "Subject", "Body"];

/// Sheet title used for the notification export.
pub const EXPORT_SHEET_TITLE: &str = "Notifications";

/// Timestamp format used in the "Date Sent" column.
const SENT_AT_FORMAT: &str = "%d:%m:%Y %H:%M";

/// One case's notification log, shaped for a spreadsheet.
#[derive(Debug, Clone)]
pub struct ExportSheet {
    /// Case number the sheet was exported for; drives the file name.
    pub case_number: String,
    pub title: String,
    pub header: Vec<String>,
    /// One row per logged notification, in the order given (most recent
    /// first when fed from the audit log).
    pub rows: Vec<Vec<String>>,
}

impl ExportSheet {
    /// Shape the given notifications into sheet content.
    pub fn for_case(case_number: &str, notifications: &[Notification]) -> Self {
        let rows = notifications
            .iter()
            .map(|n| {
                vec![
                    format_sent_at(n.sent_at),
                    n.email_to.clone(),
                    n.subject.clone(),
                    n.body.clone(),
                ]
            })
            .collect();

        Self {
            case_number: case_number.to_string(),
            title: EXPORT_SHEET_TITLE.to_string(),
            header: EXPORT_HEADER.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    /// Download file name for this sheet, e.g.
    /// `Case_CR-2026-11_Notifications.xlsx` for `file_name("xlsx")`.
    pub fn file_name(&self, extension: &str) -> String {
        format!("Case_{}_Notifications.{}", self.case_number, extension)
    }
}

fn format_sent_at(sent_at: DateTime<Utc>) -> String {
    sent_at.format(SENT_AT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn notification_at(sent_at: DateTime<Utc>) -> Notification {
        let mut n = Notification::new(
            Uuid::now_v7(),
            "client@example.com".to_string(),
            "Case Status Updated – CR-1".to_string(),
            "Dear client,\nstatus changed.".to_string(),
        );
        n.sent_at = sent_at;
        n
    }

    #[test]
    fn test_export_rows_and_date_format() {
        let sent_at = Utc.with_ymd_and_hms(2026, 8, 5, 14, 30, 0).unwrap();
        let sheet = ExportSheet::for_case("CR-1", &[notification_at(sent_at)]);

        assert_eq!(sheet.title, "Notifications");
        assert_eq!(sheet.header, ["Date Sent", "To", "Subject", "Body"]);
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(
            sheet.rows[0],
            vec![
                "05:08:2026 14:30".to_string(),
                "client@example.com".to_string(),
                "Case Status Updated – CR-1".to_string(),
                "Dear client,\nstatus changed.".to_string(),
            ]
        );
    }

    #[test]
    fn test_export_with_no_notifications_is_header_only() {
        let sheet = ExportSheet::for_case("CR-2", &[]);
        assert!(sheet.rows.is_empty());
        assert_eq!(sheet.header.len(), 4);
    }

    #[test]
    fn test_file_name_embeds_case_number() {
        let sheet = ExportSheet::for_case("CR-2026/11", &[]);
        assert_eq!(sheet.file_name("xlsx"), "Case_CR-2026/11_Notifications.xlsx");
    }
}
