//! Email composition.
//!
//! Pure Handlebars-based rendering: no I/O, unit-testable independent of
//! delivery. Every email is composed as a plain-text body plus an HTML
//! variant that wraps the same text: a heading from the subject, one
//! paragraph per text line, and a fixed sign-off naming the lawyer from
//! Settings.

use chrono::NaiveDate;
use domain_cases::{Case, Hearing};
use handlebars::Handlebars;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::NotificationResult;

/// Rendered email content.
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    /// Plain-text body. This is what gets persisted in the audit log.
    pub text: String,
    /// HTML variant, re-derivable from subject + text.
    pub html: String,
}

/// Data for the status-update email, sent after a full case edit.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateEmail {
    pub client_name: String,
    pub case_number: String,
    pub status: String,
    pub fees_pending: String,
    pub lawyer_name: String,
}

impl StatusUpdateEmail {
    pub fn from_case(case: &Case) -> Self {
        Self {
            client_name: case.client_name.clone(),
            case_number: case.case_number.clone(),
            status: case.status.clone(),
            fees_pending: format!("{:.2}", case.fees_pending),
            lawyer_name: case.lawyer_name.clone(),
        }
    }
}

/// Data for the hearing-added email.
#[derive(Debug, Clone, Serialize)]
pub struct HearingAddedEmail {
    pub client_name: String,
    pub case_number: String,
    pub hearing_date: String,
    pub stage: String,
    pub next_hearing_date: String,
    /// Case status after any write-back from the hearing.
    pub status: String,
    pub lawyer_name: String,
}

impl HearingAddedEmail {
    pub fn new(case: &Case, hearing: &Hearing) -> Self {
        Self {
            client_name: case.client_name.clone(),
            case_number: case.case_number.clone(),
            hearing_date: format_date(hearing.hearing_date),
            stage: hearing.stage.clone(),
            next_hearing_date: format_date(hearing.next_hearing_date),
            status: case.status.clone(),
            lawyer_name: case.lawyer_name.clone(),
        }
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    }
}

#[derive(Serialize)]
struct HtmlWrapper<'a> {
    subject: &'a str,
    paragraphs: Vec<&'a str>,
    signed_by: &'a str,
}

/// Template engine for composing notification emails.
pub struct TemplateEngine {
    handlebars: Arc<Handlebars<'static>>,
}

impl TemplateEngine {
    /// Create a new template engine with all templates registered.
    pub fn new() -> NotificationResult<Self> {
        let mut handlebars = Handlebars::new();

        handlebars.register_template_string("status_update_text", STATUS_UPDATE_TEXT_TEMPLATE)?;
        handlebars.register_template_string("hearing_added_text", HEARING_ADDED_TEXT_TEMPLATE)?;
        handlebars.register_template_string("email_html", EMAIL_HTML_TEMPLATE)?;

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    fn render<T: Serialize>(&self, template_name: &str, data: &T) -> NotificationResult<String> {
        Ok(self.handlebars.render(template_name, data)?)
    }

    /// Wrap a plain-text body into the HTML variant: heading from the
    /// subject, line breaks become paragraphs, fixed sign-off.
    fn wrap_html(&self, subject: &str, text: &str, signed_by: &str) -> NotificationResult<String> {
        let wrapper = HtmlWrapper {
            subject,
            paragraphs: text.lines().filter(|l| !l.trim().is_empty()).collect(),
            signed_by,
        };
        self.render("email_html", &wrapper)
    }

    /// Compose the status-update email for a case.
    pub fn render_status_update(
        &self,
        data: &StatusUpdateEmail,
        signed_by: &str,
    ) -> NotificationResult<RenderedEmail> {
        debug!(case_number = %data.case_number, "Rendering status update email");

        let subject = format!("Case Status Updated – {}", data.case_number);
        let text = self.render("status_update_text", data)?;
        let html = self.wrap_html(&subject, &text, signed_by)?;

        Ok(RenderedEmail {
            subject,
            text,
            html,
        })
    }

    /// Compose the hearing-added email for a case.
    pub fn render_hearing_added(
        &self,
        data: &HearingAddedEmail,
        signed_by: &str,
    ) -> NotificationResult<RenderedEmail> {
        debug!(case_number = %data.case_number, "Rendering hearing added email");

        let subject = format!("New Hearing Added – Case {}", data.case_number);
        let text = self.render("hearing_added_text", data)?;
        let html = self.wrap_html(&subject, &text, signed_by)?;

        Ok(RenderedEmail {
            subject,
            text,
            html,
        })
    }

    /// Compose the fixed test email for the settings check.
    pub fn render_test_email(&self, signed_by: &str) -> NotificationResult<RenderedEmail> {
        let subject = TEST_EMAIL_SUBJECT.to_string();
        let text = TEST_EMAIL_BODY.to_string();
        let html = self.wrap_html(&subject, &text, signed_by)?;

        Ok(RenderedEmail {
            subject,
            text,
            html,
        })
    }

    /// Re-derive the HTML variant for a previously logged email (resend path):
    /// the audit log stores only subject and plain body.
    pub fn render_stored(
        &self,
        subject: &str,
        body: &str,
        signed_by: &str,
    ) -> NotificationResult<RenderedEmail> {
        let html = self.wrap_html(subject, body, signed_by)?;

        Ok(RenderedEmail {
            subject: subject.to_string(),
            text: body.to_string(),
            html,
        })
    }
}

pub const TEST_EMAIL_SUBJECT: &str = "Test Email - LOCMS";
pub const TEST_EMAIL_BODY: &str =
    "This is a test email from your Law Office Case Management System.";

// ============================================================================
// Templates
// ============================================================================
//
// Text templates use triple-stache so the plain bodies (and therefore the
// audit log) carry the raw field values; HTML-escaping happens only in the
// HTML wrapper.

const STATUS_UPDATE_TEXT_TEMPLATE: &str = r#"Dear {{{client_name}}},

The status of your case {{{case_number}}} has been updated.
Current Status: {{{status}}}
Fees Pending: {{{fees_pending}}}

Regards,
{{{lawyer_name}}}"#;

const HEARING_ADDED_TEXT_TEMPLATE: &str = r#"Dear {{{client_name}}},

A new hearing has been scheduled for your case {{{case_number}}}.
Hearing Date: {{{hearing_date}}}
Stage: {{{stage}}}
Next Hearing Date: {{{next_hearing_date}}}
Current Case Status: {{{status}}}

Regards,
{{{lawyer_name}}}"#;

const EMAIL_HTML_TEMPLATE: &str = r#"<html>
  <body style="font-family:Arial, sans-serif; line-height:1.6;">
    <h3 style="color:#2c3e50;">{{subject}}</h3>
    {{#each paragraphs}}
    <p>{{this}}</p>
    {{/each}}
    <hr>
    <p style="font-size:0.9em;color:#888;">
      Sent by {{signed_by}} – Law Office Case Management System
    </p>
  </body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> StatusUpdateEmail {
        StatusUpdateEmail {
            client_name: "Asha Verma".to_string(),
            case_number: "CR-2026/11".to_string(),
            status: "Hearing".to_string(),
            fees_pending: "2500.00".to_string(),
            lawyer_name: "A. Advocate".to_string(),
        }
    }

    #[test]
    fn test_template_engine_creation() {
        assert!(TemplateEngine::new().is_ok());
    }

    #[test]
    fn test_render_status_update() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine
            .render_status_update(&sample_data(), "A. Advocate")
            .unwrap();

        assert_eq!(rendered.subject, "Case Status Updated – CR-2026/11");
        assert!(rendered.text.contains("Current Status: Hearing"));
        assert!(rendered.text.contains("Fees Pending: 2500.00"));
        assert!(rendered.text.contains("Dear Asha Verma,"));
        assert!(rendered.text.ends_with("Regards,\nA. Advocate"));
    }

    #[test]
    fn test_html_wraps_text_lines_as_paragraphs() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine
            .render_status_update(&sample_data(), "A. Advocate")
            .unwrap();

        assert!(rendered.html.contains("<h3 style=\"color:#2c3e50;\">Case Status Updated – CR-2026/11</h3>"));
        assert!(rendered.html.contains("<p>Current Status: Hearing</p>"));
        assert!(rendered.html.contains("Sent by A. Advocate"));
        // Blank lines do not produce empty paragraphs
        assert!(!rendered.html.contains("<p></p>"));
    }

    #[test]
    fn test_html_escapes_field_values() {
        let engine = TemplateEngine::new().unwrap();
        let mut data = sample_data();
        data.status = "<b>Closed</b>".to_string();
        let rendered = engine.render_status_update(&data, "A. Advocate").unwrap();

        // Raw in the plain body, escaped in the HTML variant
        assert!(rendered.text.contains("Current Status: <b>Closed</b>"));
        assert!(!rendered.html.contains("<b>Closed</b>"));
        assert!(rendered.html.contains("&lt;b&gt;Closed&lt;/b&gt;"));
    }

    #[test]
    fn test_render_hearing_added_with_missing_dates() {
        let engine = TemplateEngine::new().unwrap();
        let data = HearingAddedEmail {
            client_name: "Asha Verma".to_string(),
            case_number: "CR-2026/11".to_string(),
            hearing_date: format_date(None),
            stage: "Evidence".to_string(),
            next_hearing_date: format_date(NaiveDate::from_ymd_opt(2026, 9, 14)),
            status: "Hearing".to_string(),
            lawyer_name: "A. Advocate".to_string(),
        };
        let rendered = engine.render_hearing_added(&data, "A. Advocate").unwrap();

        assert_eq!(rendered.subject, "New Hearing Added – Case CR-2026/11");
        assert!(rendered.text.contains("Hearing Date: -"));
        assert!(rendered.text.contains("Next Hearing Date: 2026-09-14"));
        assert!(rendered.text.contains("Current Case Status: Hearing"));
    }

    #[test]
    fn test_render_stored_round_trips_subject_and_body() {
        let engine = TemplateEngine::new().unwrap();
        let rendered = engine
            .render_stored("Old Subject", "line one\nline two", "A. Advocate")
            .unwrap();

        assert_eq!(rendered.subject, "Old Subject");
        assert_eq!(rendered.text, "line one\nline two");
        assert!(rendered.html.contains("<p>line one</p>"));
        assert!(rendered.html.contains("<p>line two</p>"));
    }
}
