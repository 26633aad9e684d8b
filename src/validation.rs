//! Contact-form validation.
use crate::models::LeadSubmission;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::OnceLock;

/// The demo-request form on the page.
pub trait ContactForm {
    /// Current text of the named control, `None` if the control is missing.
    fn value(&self, name: &str) -> Option<String>;

    /// Clears every control.
    fn reset(&mut self);
}

impl ContactForm for HashMap<String, String> {
    fn value(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }

    fn reset(&mut self) {
        self.values_mut().for_each(String::clear);
    }
}

impl ContactForm for BTreeMap<String, String> {
    fn value(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }

    fn reset(&mut self) {
        self.values_mut().for_each(String::clear);
    }
}

/// Required form controls, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "email", "company", "phone"];
pub const MESSAGE_FIELD: &str = "message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(&'static str),
    InvalidEmail,
}

impl ValidationError {
    /// Text for the inline error notification.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "Please fill in all required fields.",
            ValidationError::InvalidEmail => "Please enter a valid email address.",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(name) => write!(f, "missing required field '{}'", name),
            ValidationError::InvalidEmail => write!(f, "email address is malformed"),
        }
    }
}

impl std::error::Error for ValidationError {}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    // Printable ASCII without space or '@' on each side; a dot after the '@'.
    EMAIL.get_or_init(|| {
        Regex::new(r"^[\x21-\x3F\x41-\x7E]+@[\x21-\x3F\x41-\x7E]+\.[\x21-\x3F\x41-\x7E]+$")
            .expect("email pattern is a valid regex")
    })
}

/// Checks the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

fn non_empty(form: &dyn ContactForm, name: &str) -> Option<String> {
    form.value(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads and validates the form into a [`LeadSubmission`].
pub fn validate_lead(form: &dyn ContactForm) -> Result<LeadSubmission, ValidationError> {
    let required = |name: &'static str| {
        non_empty(form, name).ok_or(ValidationError::MissingField(name))
    };
    let name = required(REQUIRED_FIELDS[0])?;
    let email = required(REQUIRED_FIELDS[1])?;
    let company = required(REQUIRED_FIELDS[2])?;
    let phone = required(REQUIRED_FIELDS[3])?;

    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(LeadSubmission {
        name,
        email,
        company,
        phone,
        message: non_empty(form, MESSAGE_FIELD),
    })
}
