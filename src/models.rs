use serde::{Deserialize, Serialize};

// ============ Calculator Models ============

/// Which of the two calculator layouts the page hosts.
///
/// The full layout asks for a daily interest rate and reports productivity
/// gains and ROI; the simplified layout asks for an annual rate and reports
/// savings only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorVariant {
    #[default]
    Full,
    Simplified,
}

impl std::str::FromStr for CalculatorVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(CalculatorVariant::Full),
            "simplified" | "simple" => Ok(CalculatorVariant::Simplified),
            other => Err(format!("unknown calculator variant '{}'", other)),
        }
    }
}

/// Interest rate as entered on the page, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InterestRate {
    /// Percent per day, e.g. `0.02` for 0.02%/day.
    DailyPercent(f64),
    /// Percent per year, e.g. `8.0` for 8%/year.
    AnnualPercent(f64),
}

impl InterestRate {
    /// Daily rate as a fraction.
    pub fn daily_fraction(&self, days_per_year: f64) -> f64 {
        match *self {
            InterestRate::DailyPercent(pct) => pct / 100.0,
            InterestRate::AnnualPercent(pct) => pct / 100.0 / days_per_year,
        }
    }
}

/// Fully-populated input record for one recalculation.
///
/// Rebuilt from the page fields on every input change; never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInputs {
    /// Vehicles processed per year.
    pub vehicles_annually: u32,
    /// Administrative full-time-equivalent staff.
    pub admin_ftes: f64,
    /// Average vehicle value in dollars.
    pub avg_vehicle_value: f64,
    /// Floor-plan interest rate.
    pub interest_rate: InterestRate,
    /// Number of disconnected systems in use (display only).
    pub disconnected_systems: Option<u32>,
    /// Current processing days per vehicle (display only).
    pub processing_days: Option<u32>,
    /// Annual DMS spend (display only).
    pub annual_dms_spend: Option<f64>,
}

/// Pricing tier selected by annual vehicle volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlatformTier {
    Base,
    Professional,
    Enterprise,
}

impl PlatformTier {
    pub fn label(&self) -> &'static str {
        match self {
            PlatformTier::Base => "Base",
            PlatformTier::Professional => "Professional",
            PlatformTier::Enterprise => "Enterprise",
        }
    }
}

/// Output of the formula engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorResult {
    /// Value of administrative time reclaimed.
    pub people_savings: f64,
    /// Floor-plan interest saved by faster processing.
    pub product_savings: f64,
    /// Extra sales capacity plus error reduction. `None` in the simplified variant.
    pub productivity_gains: Option<f64>,
    /// Sum of the three components above.
    pub total_savings: f64,
    /// Tier chosen from `vehicles_annually`.
    pub platform_tier: PlatformTier,
    /// Annual platform cost for that tier.
    pub platform_cost: f64,
    /// Unclamped ROI in percent; may be negative. `None` in the simplified variant.
    pub roi_percentage: Option<f64>,
    /// Systems replaced by the platform, echoed for the "system-reduction" slot.
    pub systems_consolidated: Option<u32>,
}

impl CalculatorResult {
    /// ROI as shown to the visitor: never below zero.
    pub fn display_roi_percentage(&self) -> Option<f64> {
        self.roi_percentage.map(|roi| roi.max(0.0))
    }

    /// Savings left after paying for the platform.
    pub fn net_savings(&self) -> f64 {
        self.total_savings - self.platform_cost
    }
}

// ============ Lead Models ============

/// A validated demo request from the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub message: Option<String>,
}

/// JSON body sent to the lead intake endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LeadIntakePayload<'a> {
    pub access_key: &'a str,
    pub subject: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub company: &'a str,
    pub phone: &'a str,
    pub message: &'a str,
}

impl<'a> LeadIntakePayload<'a> {
    pub fn new(access_key: &'a str, subject: &'a str, lead: &'a LeadSubmission) -> Self {
        Self {
            access_key,
            subject,
            name: &lead.name,
            email: &lead.email,
            company: &lead.company,
            phone: &lead.phone,
            message: lead.message.as_deref().unwrap_or(""),
        }
    }
}

/// Response body of the lead intake endpoint.
///
/// Every field is optional; relays differ in what they return.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadIntakeResponse {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl LeadIntakeResponse {
    /// The human-readable reason the relay gave, if any.
    pub fn reason(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Acknowledgement of a delivered lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeReceipt {
    pub status: u16,
    pub message: Option<String>,
}
