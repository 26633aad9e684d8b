//! ROI formula engine.
//!
//! Turns a fully-populated [`CalculatorInputs`] into a [`CalculatorResult`]:
//! 1. People savings (administrative time reclaimed)
//! 2. Product savings (floor-plan interest avoided)
//! 3. Productivity gains (optional)
//! 4. Platform cost tier
//! 5. ROI percentage (optional)
//!
//! Every constant lives in [`RoiConfig`]. The engine never touches a display.
use crate::models::{
    CalculatorInputs, CalculatorResult, CalculatorVariant, InterestRate, PlatformTier,
};
use serde::{Deserialize, Serialize};

/// How reclaimed administrative time is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PeopleSavingsMode {
    /// A fraction of every FTE hour is reclaimed.
    TimeReduction { fraction: f64 },
    /// A fixed number of hours per FTE per week is reclaimed.
    FixedHoursPerWeek { hours: f64 },
}

/// Whether the page asks for a daily or an annual interest rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateGranularity {
    Daily,
    Annual,
}

/// Constants of the productivity-gains term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductivityConfig {
    /// Additional units each salesperson can move per year.
    pub units_per_salesperson: f64,
    /// Average profit margin per unit.
    pub profit_margin: f64,
    /// Flat annual value of fewer paperwork errors.
    pub error_reduction_value: f64,
}

impl Default for ProductivityConfig {
    fn default() -> Self {
        Self {
            units_per_salesperson: 70.0,
            profit_margin: 0.15,
            error_reduction_value: 50_000.0,
        }
    }
}

/// Volume thresholds and annual prices of the platform tiers.
///
/// Thresholds compare with `>`, so a volume exactly on a threshold takes the
/// lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingTiers {
    pub professional_threshold: u32,
    pub enterprise_threshold: u32,
    pub base_cost: f64,
    pub professional_cost: f64,
    pub enterprise_cost: f64,
}

impl Default for PricingTiers {
    fn default() -> Self {
        Self {
            professional_threshold: 1_000,
            enterprise_threshold: 2_000,
            base_cost: 30_000.0,
            professional_cost: 60_000.0,
            enterprise_cost: 120_000.0,
        }
    }
}

impl PricingTiers {
    pub fn cost_of(&self, tier: PlatformTier) -> f64 {
        match tier {
            PlatformTier::Base => self.base_cost,
            PlatformTier::Professional => self.professional_cost,
            PlatformTier::Enterprise => self.enterprise_cost,
        }
    }
}

/// Every named constant the formula uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiConfig {
    /// Page layout; selects the field defaults.
    pub variant: CalculatorVariant,
    /// Average fully-loaded FTE salary.
    pub avg_fte_salary: f64,
    pub hours_per_week: f64,
    pub weeks_per_year: f64,
    pub people_savings: PeopleSavingsMode,
    pub rate_granularity: RateGranularity,
    pub days_per_year: f64,
    /// Days cut from vehicle processing time.
    pub processing_time_reduction_days: f64,
    /// `None` drops the productivity term.
    pub productivity: Option<ProductivityConfig>,
    pub pricing: PricingTiers,
    /// Whether the ROI percentage is computed at all.
    pub report_roi: bool,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self::full()
    }
}

impl RoiConfig {
    /// Full calculator: 88% time reduction, daily rate, productivity gains and ROI.
    pub fn full() -> Self {
        Self {
            variant: CalculatorVariant::Full,
            avg_fte_salary: 65_000.0,
            hours_per_week: 40.0,
            weeks_per_year: 52.0,
            people_savings: PeopleSavingsMode::TimeReduction { fraction: 0.88 },
            rate_granularity: RateGranularity::Daily,
            days_per_year: 365.0,
            processing_time_reduction_days: 3.0,
            productivity: Some(ProductivityConfig::default()),
            pricing: PricingTiers::default(),
            report_roi: true,
        }
    }

    /// Simplified calculator: 8 hours/week per FTE, annual rate, savings only.
    pub fn simplified() -> Self {
        Self {
            variant: CalculatorVariant::Simplified,
            people_savings: PeopleSavingsMode::FixedHoursPerWeek { hours: 8.0 },
            rate_granularity: RateGranularity::Annual,
            productivity: None,
            report_roi: false,
            ..Self::full()
        }
    }

    pub fn for_variant(variant: CalculatorVariant) -> Self {
        match variant {
            CalculatorVariant::Full => Self::full(),
            CalculatorVariant::Simplified => Self::simplified(),
        }
    }

    /// Blended hourly rate of an FTE.
    pub fn hourly_rate(&self) -> f64 {
        self.avg_fte_salary / (self.hours_per_week * self.weeks_per_year)
    }
}

/// Selects the platform tier for an annual vehicle volume.
pub fn platform_tier(vehicles_annually: u32, pricing: &PricingTiers) -> PlatformTier {
    if vehicles_annually > pricing.enterprise_threshold {
        PlatformTier::Enterprise
    } else if vehicles_annually > pricing.professional_threshold {
        PlatformTier::Professional
    } else {
        PlatformTier::Base
    }
}

pub fn people_savings(inputs: &CalculatorInputs, config: &RoiConfig) -> f64 {
    let hourly_rate = config.hourly_rate();
    match config.people_savings {
        PeopleSavingsMode::TimeReduction { fraction } => {
            let total_fte_hours = inputs.admin_ftes * config.hours_per_week * config.weeks_per_year;
            total_fte_hours * fraction * hourly_rate
        }
        PeopleSavingsMode::FixedHoursPerWeek { hours } => {
            inputs.admin_ftes * hourly_rate * hours * config.weeks_per_year
        }
    }
}

pub fn product_savings(inputs: &CalculatorInputs, config: &RoiConfig) -> f64 {
    let daily_interest_cost =
        inputs.avg_vehicle_value * inputs.interest_rate.daily_fraction(config.days_per_year);
    config.processing_time_reduction_days * daily_interest_cost * f64::from(inputs.vehicles_annually)
}

pub fn productivity_gains(inputs: &CalculatorInputs, config: &RoiConfig) -> Option<f64> {
    config.productivity.map(|p| {
        let additional_revenue =
            p.units_per_salesperson * inputs.avg_vehicle_value * p.profit_margin * inputs.admin_ftes;
        additional_revenue + p.error_reduction_value
    })
}

/// Runs the whole formula. Pure and total.
pub fn compute(inputs: &CalculatorInputs, config: &RoiConfig) -> CalculatorResult {
    let people = people_savings(inputs, config);
    let product = product_savings(inputs, config);
    let productivity = productivity_gains(inputs, config);
    let total_savings = people + product + productivity.unwrap_or(0.0);

    let tier = platform_tier(inputs.vehicles_annually, &config.pricing);
    let platform_cost = config.pricing.cost_of(tier);

    let roi_percentage = config
        .report_roi
        .then(|| (total_savings - platform_cost) / platform_cost * 100.0);

    tracing::debug!(
        people = people,
        product = product,
        total = total_savings,
        tier = tier.label(),
        "ROI recalculated"
    );

    CalculatorResult {
        people_savings: people,
        product_savings: product,
        productivity_gains: productivity,
        total_savings,
        platform_tier: tier,
        platform_cost,
        roi_percentage,
        systems_consolidated: inputs.disconnected_systems,
    }
}

/// Builds inputs from explicit numbers with the rate in the config's granularity.
///
/// Convenience for callers that do not read from a page.
pub fn inputs_with_rate(
    config: &RoiConfig,
    vehicles_annually: u32,
    admin_ftes: f64,
    avg_vehicle_value: f64,
    rate_percent: f64,
) -> CalculatorInputs {
    let interest_rate = match config.rate_granularity {
        RateGranularity::Daily => InterestRate::DailyPercent(rate_percent),
        RateGranularity::Annual => InterestRate::AnnualPercent(rate_percent),
    };
    CalculatorInputs {
        vehicles_annually,
        admin_ftes,
        avg_vehicle_value,
        interest_rate,
        disconnected_systems: None,
        processing_days: None,
        annual_dms_spend: None,
    }
}
