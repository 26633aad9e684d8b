/// Lead submission pipeline
///
/// Runs one demo request from the contact form to a reachable inbox:
/// 1. Take the single-slot submission guard (cool-down window)
/// 2. Validate the form
/// 3. Deliver once to the intake relay
/// 4. On any transport failure, hand a pre-filled draft to the mail client
/// 5. Notify the visitor and clear the form
///
/// A lead is never silently dropped: it either reaches the relay or becomes a
/// mailto draft.
use crate::errors::{AppError, ResultExt};
use crate::lead_client::LeadIntakeClient;
use crate::mail_fallback::{MailClient, MailDraft};
use crate::models::{IntakeReceipt, LeadSubmission};
use crate::notifications::{Notification, Notifier, Severity};
use crate::submission_guard::SubmissionGuard;
use crate::validation::{validate_lead, ContactForm, ValidationError};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const SUCCESS_MESSAGE: &str =
    "Thank you for your interest! We will contact you within 24 hours to schedule your demo.";
pub const THROTTLED_MESSAGE: &str = "Please wait a moment before submitting again.";
pub const FALLBACK_MESSAGE: &str =
    "We couldn't reach our server, so we've opened your email client with your details. Please send the email to complete your request.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Invalid,
    Submitting,
    Delivered,
    FallbackInvoked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// A previous submission's cool-down window is still open.
    Throttled,
    /// The form failed validation; nothing was sent.
    Rejected(ValidationError),
    /// The relay accepted the lead.
    Delivered(IntakeReceipt),
    /// The relay was unreachable or refused; the visitor got a mail draft.
    FallbackInvoked { mailto: String, reason: String },
}

pub struct LeadPipeline {
    client: Option<LeadIntakeClient>,
    mailer: Arc<dyn MailClient>,
    notifier: Arc<dyn Notifier>,
    guard: SubmissionGuard,
    fallback_recipient: String,
    subject: String,
    state: Mutex<SubmissionState>,
}

impl LeadPipeline {
    /// Creates a pipeline.
    ///
    /// # Arguments
    ///
    /// * `client` - Intake relay client; `None` when no credential is configured,
    ///   in which case every lead goes straight to the mail draft.
    /// * `mailer` - Local mail-client handoff.
    /// * `notifier` - Where visitor feedback goes.
    /// * `guard` - Duplicate-submission guard.
    /// * `fallback_recipient` - Inbox the mail draft is addressed to.
    /// * `subject` - Subject line of the draft.
    pub fn new(
        client: Option<LeadIntakeClient>,
        mailer: Arc<dyn MailClient>,
        notifier: Arc<dyn Notifier>,
        guard: SubmissionGuard,
        fallback_recipient: String,
        subject: String,
    ) -> Self {
        Self {
            client,
            mailer,
            notifier,
            guard,
            fallback_recipient,
            subject,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    /// State the last submission ended in.
    pub fn last_state(&self) -> SubmissionState {
        self.state
            .lock()
            .map(|s| *s)
            .unwrap_or(SubmissionState::Idle)
    }

    fn transition(&self, submission_id: &Uuid, next: SubmissionState) {
        tracing::debug!("[{}] submission state -> {:?}", submission_id, next);
        if let Ok(mut state) = self.state.lock() {
            *state = next;
        }
    }

    /// Handles one form-submit event.
    pub async fn submit(&self, form: &mut dyn ContactForm) -> SubmissionOutcome {
        if !self.guard.try_engage() {
            tracing::info!(
                "Lead form submit refused, cool-down of {:?} still running",
                self.guard.cooldown()
            );
            self.notifier
                .notify(Notification::new(THROTTLED_MESSAGE, Severity::Info));
            return SubmissionOutcome::Throttled;
        }

        let submission_id = Uuid::new_v4();
        self.transition(&submission_id, SubmissionState::Validating);

        let lead = match validate_lead(form) {
            Ok(lead) => lead,
            Err(err) => {
                tracing::info!("[{}] Lead form rejected: {}", submission_id, err);
                self.notifier
                    .notify(Notification::new(err.user_message(), Severity::Error));
                // Nothing was sent; the form stays as typed.
                self.transition(&submission_id, SubmissionState::Invalid);
                self.transition(&submission_id, SubmissionState::Idle);
                return SubmissionOutcome::Rejected(err);
            }
        };

        self.transition(&submission_id, SubmissionState::Submitting);

        let outcome = match self.deliver(&lead).await {
            Ok(receipt) => {
                tracing::info!("[{}] Lead delivered for {}", submission_id, lead.company);
                self.notifier
                    .notify(Notification::new(SUCCESS_MESSAGE, Severity::Success));
                self.transition(&submission_id, SubmissionState::Delivered);
                SubmissionOutcome::Delivered(receipt)
            }
            Err(err) => {
                if err.is_transport_failure() {
                    tracing::warn!(
                        "[{}] Lead delivery failed, falling back to mail draft: {}",
                        submission_id,
                        err
                    );
                } else {
                    // Still a lost delivery; the draft keeps the lead.
                    tracing::error!(
                        "[{}] Unexpected error delivering lead, falling back to mail draft: {}",
                        submission_id,
                        err
                    );
                }
                let mailto = self.hand_off_draft(&submission_id, &lead);
                self.notifier
                    .notify(Notification::new(FALLBACK_MESSAGE, Severity::Info));
                self.transition(&submission_id, SubmissionState::FallbackInvoked);
                SubmissionOutcome::FallbackInvoked {
                    mailto,
                    reason: err.to_string(),
                }
            }
        };

        form.reset();
        outcome
    }

    async fn deliver(&self, lead: &LeadSubmission) -> Result<IntakeReceipt, AppError> {
        match &self.client {
            Some(client) => client.deliver(lead).await.context("Lead delivery"),
            None => Err(AppError::ExternalApiError(
                "no lead intake credential configured".to_string(),
            )),
        }
    }

    fn hand_off_draft(&self, submission_id: &Uuid, lead: &LeadSubmission) -> String {
        let draft = MailDraft::for_lead(&self.fallback_recipient, &self.subject, lead);
        let mailto = draft.to_mailto_uri();
        if let Err(e) = self.mailer.open_draft(&mailto) {
            // The draft URI is still returned to the host.
            tracing::error!("[{}] {}", submission_id, e);
        }
        mailto
    }
}
