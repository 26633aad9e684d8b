use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use rust_roi_calculator::calculator::RoiConfig;
use rust_roi_calculator::config::Config;
use rust_roi_calculator::display::{recalculate, DisplayBoard};
use rust_roi_calculator::errors::AppError;
use rust_roi_calculator::lead_client::LeadIntakeClient;
use rust_roi_calculator::mail_fallback::MailClient;
use rust_roi_calculator::notifications::{AlertSink, Notification, NotificationSurface, PageNotifier};
use rust_roi_calculator::report::{demo_request_message, generate_report};
use rust_roi_calculator::submission::{LeadPipeline, SubmissionOutcome};
use rust_roi_calculator::submission_guard::{SubmissionGuard, SubmitControl, READY_LABEL};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage:
  rust-roi-calculator calculate [field=value ...]
  rust-roi-calculator submit name=.. email=.. company=.. phone=.. [message=..]";

/// Prints toasts to stdout.
struct TerminalToasts;

impl NotificationSurface for TerminalToasts {
    fn show(&self, notification: &Notification) {
        println!("[{}] {}", notification.severity, notification.message);
    }
}

/// Alerts go to stderr.
struct TerminalAlert;

impl AlertSink for TerminalAlert {
    fn alert(&self, message: &str) {
        eprintln!("ALERT: {}", message);
    }
}

/// A terminal has no mail client to open; print the draft link instead.
struct PrintedMailClient;

impl MailClient for PrintedMailClient {
    fn open_draft(&self, mailto_uri: &str) -> Result<(), AppError> {
        println!("Open this link in your email client to send your request:");
        println!("{}", mailto_uri);
        Ok(())
    }
}

struct LoggedButton {
    label: Mutex<String>,
}

impl SubmitControl for LoggedButton {
    fn set_enabled(&self, enabled: bool) {
        tracing::debug!("Submit button enabled: {}", enabled);
    }

    fn set_label(&self, label: &str) {
        tracing::debug!("Submit button label: {}", label);
        if let Ok(mut current) = self.label.lock() {
            *current = label.to_string();
        }
    }

    fn label(&self) -> String {
        self.label
            .lock()
            .map(|l| l.clone())
            .unwrap_or_else(|_| READY_LABEL.to_string())
    }
}

/// Collects `key=value` arguments. Arguments without `=` are ignored.
fn parse_pairs(args: &[String]) -> BTreeMap<String, String> {
    args.iter()
        .filter_map(|arg| arg.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .collect()
}

fn run_calculate(config: &Config, fields: BTreeMap<String, String>) {
    let roi_config = RoiConfig::for_variant(config.calculator_variant);
    let mut board = DisplayBoard::complete();
    let result = recalculate(&fields, &mut board, &roi_config);

    for (slot, text) in board.slots() {
        if !text.is_empty() {
            println!("{:<20} {}", slot, text);
        }
    }
    println!(
        "{:<20} {} (${:.0})",
        "platform-tier",
        result.platform_tier.label(),
        result.platform_cost
    );
    if let Some(roi) = result.roi_percentage {
        tracing::debug!("Unclamped ROI: {:.2}%", roi);
    }

    println!();
    print!(
        "{}",
        generate_report(&board, &config.contact_email, chrono::Utc::now())
    );
    println!();
    println!("{}", demo_request_message(&board));
}

async fn run_submit(config: &Config, mut form: BTreeMap<String, String>) -> anyhow::Result<()> {
    let client = match &config.lead_access_key {
        Some(key) => Some(LeadIntakeClient::new(
            config.lead_intake_url.clone(),
            key.clone(),
            config.lead_subject.clone(),
            config.lead_timeout(),
        )?),
        None => None,
    };

    let notifier = PageNotifier::new(Some(TerminalToasts), TerminalAlert);
    let guard = SubmissionGuard::new(config.submit_cooldown()).with_control(Arc::new(LoggedButton {
        label: Mutex::new(READY_LABEL.to_string()),
    }));
    let pipeline = LeadPipeline::new(
        client,
        Arc::new(PrintedMailClient),
        Arc::new(notifier),
        guard,
        config.contact_email.clone(),
        config.lead_subject.clone(),
    );

    match pipeline.submit(&mut form).await {
        SubmissionOutcome::Rejected(err) => anyhow::bail!("lead rejected: {}", err),
        outcome => {
            tracing::info!("Submission finished: {:?}", pipeline.last_state());
            tracing::debug!("Outcome: {:?}", outcome);
            Ok(())
        }
    }
}

/// Main entry point: a terminal host for the calculator and the demo form.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_roi_calculator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, rest) = match args.split_first() {
        Some((command, rest)) if !command.contains('=') => (command.as_str(), rest),
        _ => ("calculate", args.as_slice()),
    };

    match command {
        "calculate" => {
            run_calculate(&config, parse_pairs(rest));
            Ok(())
        }
        "submit" => run_submit(&config, parse_pairs(rest)).await,
        _ => {
            eprintln!("{}", USAGE);
            anyhow::bail!("unknown command '{}'", command)
        }
    }
}
