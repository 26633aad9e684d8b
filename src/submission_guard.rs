//! Single-slot guard against duplicate form submissions.
//!
//! One permit. Engaging the guard takes it and schedules its release after the
//! cool-down window, whatever happens to the submission in between.
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

pub const BUSY_LABEL: &str = "Sending...";
pub const READY_LABEL: &str = "Request Demo";

/// The form's submit button.
pub trait SubmitControl: Send + Sync {
    fn set_enabled(&self, enabled: bool);
    fn set_label(&self, label: &str);
    /// Text currently shown on the button.
    fn label(&self) -> String;
}

#[derive(Clone)]
pub struct SubmissionGuard {
    slot: Arc<Semaphore>,
    cooldown: Duration,
    control: Option<Arc<dyn SubmitControl>>,
}

impl SubmissionGuard {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            slot: Arc::new(Semaphore::new(1)),
            cooldown,
            control: None,
        }
    }

    /// Attaches the button that mirrors the guard state.
    pub fn with_control(mut self, control: Arc<dyn SubmitControl>) -> Self {
        self.control = Some(control);
        self
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// True while a cool-down window is running.
    pub fn is_engaged(&self) -> bool {
        self.slot.available_permits() == 0
    }

    /// Takes the slot for one cool-down window.
    ///
    /// Returns `false` without side effects if the slot is already taken.
    /// Must be called inside a tokio runtime.
    pub fn try_engage(&self) -> bool {
        let permit = match self.slot.clone().try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                tracing::debug!("Submission refused: cool-down window still open");
                return false;
            }
        };

        // The label in place before engaging is the one restored afterwards.
        let restore = self.control.as_ref().map(|control| {
            let original = control.label();
            control.set_enabled(false);
            control.set_label(BUSY_LABEL);
            (control.clone(), original)
        });

        let cooldown = self.cooldown;
        tokio::spawn(async move {
            tokio::time::sleep(cooldown).await;
            if let Some((control, original)) = restore {
                control.set_label(&original);
                control.set_enabled(true);
            }
            drop(permit);
        });

        true
    }
}
