//! Template renderer: turns a resolved contact into the `CompanyInfo` shown to the user.
//!
//! Pure and total. The LinkedIn URL depends only on the query; the email and
//! message body depend only on the contact record.

use serde::{Deserialize, Serialize};

use crate::models::contact::ContactRecord;
use crate::outreach::query::CompanyQuery;
use crate::outreach::templates::{COLD_EMAIL_TEMPLATE, LINKEDIN_COMPANY_BASE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub hr_email: String,
    pub linkedin_url: String,
    pub email_template: String,
}

pub fn render(query: &CompanyQuery, record: &ContactRecord) -> CompanyInfo {
    CompanyInfo {
        hr_email: record.email.clone(),
        linkedin_url: linkedin_url(query),
        email_template: render_cold_email(&record.name, &record.company),
    }
}

pub fn linkedin_url(query: &CompanyQuery) -> String {
    format!("{LINKEDIN_COMPANY_BASE}{}", query.slug())
}

pub fn render_cold_email(addressee: &str, company: &str) -> String {
    fill_placeholders(
        COLD_EMAIL_TEMPLATE,
        &[("addressee", addressee), ("company", company)],
    )
}

/// Substitutes `{key}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, so a company called "{addressee} Inc"
/// renders literally. Unknown `{...}` sequences are left untouched.
pub fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replaced = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> ContactRecord {
        ContactRecord {
            name: "Jane Doe".to_string(),
            company: "Acme Corporation".to_string(),
            email: "jane@acme.com".to_string(),
        }
    }

    #[test]
    fn test_render_acme_scenario() {
        let query = CompanyQuery::parse("Acme Corp").unwrap();
        let info = render(&query, &jane());

        assert_eq!(info.hr_email, "jane@acme.com");
        assert_eq!(info.linkedin_url, "https://www.linkedin.com/company/acme-corp");
        assert!(info.email_template.starts_with("Dear Jane Doe,\n\n"));
        assert!(info.email_template.ends_with("Best regards,\n[Your name]"));
    }

    #[test]
    fn test_template_mentions_company_twice() {
        let query = CompanyQuery::parse("acme").unwrap();
        let info = render(&query, &jane());

        assert!(info.email_template.contains("Jane Doe"));
        assert_eq!(info.email_template.matches("Acme Corporation").count(), 2);
        assert!(info
            .email_template
            .contains("I came across Acme Corporation's innovative work"));
        assert!(info
            .email_template
            .contains("current opportunities at Acme Corporation."));
        assert!(!info.email_template.contains("{company}"));
        assert!(!info.email_template.contains("{addressee}"));
    }

    #[test]
    fn test_linkedin_url_ignores_record() {
        let query = CompanyQuery::parse("  Big   Blue  ").unwrap();
        let info = render(&query, &jane());
        assert_eq!(info.linkedin_url, "https://www.linkedin.com/company/big-blue");
        assert_eq!(info.linkedin_url, linkedin_url(&query));
    }

    #[test]
    fn test_render_is_deterministic() {
        let query = CompanyQuery::parse("Acme Corp").unwrap();
        assert_eq!(render(&query, &jane()), render(&query, &jane()));
    }

    #[test]
    fn test_placeholders_in_values_are_not_rescanned() {
        let body = render_cold_email("{company}", "{addressee} Inc");
        assert!(body.starts_with("Dear {company},"));
        assert_eq!(body.matches("{addressee} Inc").count(), 2);
    }

    #[test]
    fn test_fill_placeholders_leaves_unknown_and_unclosed() {
        let out = fill_placeholders("{a} {b} {a", &[("a", "x")]);
        assert_eq!(out, "x {b} {a");
    }

    #[test]
    fn test_company_info_serializes_camel_case() {
        let query = CompanyQuery::parse("Acme").unwrap();
        let value = serde_json::to_value(render(&query, &jane())).unwrap();
        assert_eq!(value["hrEmail"], "jane@acme.com");
        assert!(value.get("linkedinUrl").is_some());
        assert!(value.get("emailTemplate").is_some());
    }
}
