//! Local mail-client fallback for leads the relay could not take.
use crate::errors::AppError;
use crate::models::LeadSubmission;
use url::form_urlencoded;

pub const INQUIRY_SUBJECT: &str = "SHAED Enterprise Inquiry";

/// Hands a `mailto:` URI to whatever mail client the visitor uses.
pub trait MailClient: Send + Sync {
    fn open_draft(&self, mailto_uri: &str) -> Result<(), AppError>;
}

/// A pre-filled email the visitor sends themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl MailDraft {
    /// Draft enumerating every submitted field.
    pub fn for_lead(recipient: &str, subject: &str, lead: &LeadSubmission) -> Self {
        let body = [
            format!("Name: {}", lead.name),
            format!("Email: {}", lead.email),
            format!("Company: {}", lead.company),
            format!("Phone: {}", lead.phone),
            format!("Message: {}", lead.message.as_deref().unwrap_or("")),
        ]
        .join("\n");

        Self {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body,
        }
    }

    pub fn to_mailto_uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            encode_component(&self.subject),
            encode_component(&self.body)
        )
    }
}

/// Percent-encodes a mailto header value. Spaces become `%20`; mail clients
/// do not read `+` as a space.
fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// The "contact sales" link.
pub fn contact_sales_uri(recipient: &str) -> String {
    format!("mailto:{}?subject={}", recipient, encode_component(INQUIRY_SUBJECT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead() -> LeadSubmission {
        LeadSubmission {
            name: "Ana Lima".into(),
            email: "ana@dealer.com".into(),
            company: "Lima & Sons".into(),
            phone: "+1 555 0100".into(),
            message: Some("Call me".into()),
        }
    }

    #[test]
    fn test_body_lists_every_field() {
        let draft = MailDraft::for_lead("sales@shaed.ai", "Demo Request", &lead());
        let lines: Vec<&str> = draft.body.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Name: Ana Lima",
                "Email: ana@dealer.com",
                "Company: Lima & Sons",
                "Phone: +1 555 0100",
                "Message: Call me",
            ]
        );
    }

    #[test]
    fn test_mailto_encoding() {
        let draft = MailDraft::for_lead("sales@shaed.ai", "Demo Request", &lead());
        let uri = draft.to_mailto_uri();

        assert!(uri.starts_with("mailto:sales@shaed.ai?subject=Demo%20Request&body="));
        assert!(uri.contains("Lima%20%26%20Sons"));
        assert!(uri.contains("%2B1%20555%200100"));
        assert!(uri.contains("%0A"));
        assert!(!uri.contains(' '));
    }

    #[test]
    fn test_contact_sales_uri() {
        assert_eq!(
            contact_sales_uri("ryan.pritchard@shaed.ai"),
            "mailto:ryan.pritchard@shaed.ai?subject=SHAED%20Enterprise%20Inquiry"
        );
    }
}
