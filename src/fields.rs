//! Field reader: pulls calculator inputs from named page fields.
//!
//! Reading never fails. A field that is absent, blank, non-numeric,
//! non-finite or not positive yields its fixed default.
use crate::calculator::{RateGranularity, RoiConfig};
use crate::models::{CalculatorInputs, CalculatorVariant, InterestRate};
use std::collections::{BTreeMap, HashMap};

/// Anything that can hand back the raw text of a named input element.
pub trait FieldSource {
    /// Raw value of the element with this id, or `None` if the element is missing.
    fn raw_value(&self, id: &str) -> Option<String>;
}

impl FieldSource for HashMap<String, String> {
    fn raw_value(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn raw_value(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

/// Declared numeric type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Real,
}

/// Every input the calculator recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    VehiclesAnnually,
    AdminFtes,
    AvgVehicleValue,
    DailyInterestRate,
    AnnualInterestRate,
    DisconnectedSystems,
    ProcessingDays,
    AnnualDmsSpend,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::VehiclesAnnually,
        Field::AdminFtes,
        Field::AvgVehicleValue,
        Field::DailyInterestRate,
        Field::AnnualInterestRate,
        Field::DisconnectedSystems,
        Field::ProcessingDays,
        Field::AnnualDmsSpend,
    ];

    /// Element id on the page.
    pub fn id(&self) -> &'static str {
        match self {
            Field::VehiclesAnnually => "vehicles-annually",
            Field::AdminFtes => "admin-ftes",
            Field::AvgVehicleValue => "avg-vehicle-value",
            Field::DailyInterestRate => "daily-interest-rate",
            Field::AnnualInterestRate => "annual-interest-rate",
            Field::DisconnectedSystems => "disconnected-systems",
            Field::ProcessingDays => "processing-days",
            Field::AnnualDmsSpend => "annual-dms-spend",
        }
    }

    pub fn from_id(id: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.id() == id)
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::VehiclesAnnually | Field::DisconnectedSystems | Field::ProcessingDays => {
                FieldKind::Integer
            }
            _ => FieldKind::Real,
        }
    }

    /// Value substituted when the field cannot be read.
    pub fn default_for(&self, variant: CalculatorVariant) -> f64 {
        match (self, variant) {
            (Field::VehiclesAnnually, _) => 500.0,
            (Field::AdminFtes, _) => 3.0,
            (Field::AvgVehicleValue, CalculatorVariant::Full) => 75_000.0,
            (Field::AvgVehicleValue, CalculatorVariant::Simplified) => 50_000.0,
            (Field::DailyInterestRate, _) => 0.02,
            (Field::AnnualInterestRate, _) => 8.0,
            (Field::DisconnectedSystems, _) => 7.0,
            (Field::ProcessingDays, _) => 14.0,
            (Field::AnnualDmsSpend, _) => 500_000.0,
        }
    }
}

/// Parses a raw field value per the field's declared type.
///
/// Integer fields accept a real literal and truncate it toward zero.
fn parse_value(raw: &str, kind: FieldKind) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value = match kind {
        FieldKind::Integer => trimmed
            .parse::<i64>()
            .map(|v| v as f64)
            .or_else(|_| trimmed.parse::<f64>().map(f64::trunc))
            .ok()?,
        FieldKind::Real => trimmed.parse::<f64>().ok()?,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Reads one field, falling back to its default.
pub fn read(source: &dyn FieldSource, field: Field, variant: CalculatorVariant) -> f64 {
    match source
        .raw_value(field.id())
        .and_then(|raw| parse_value(&raw, field.kind()))
    {
        Some(value) => value,
        None => {
            let default = field.default_for(variant);
            tracing::trace!("Field '{}' unreadable, using default {}", field.id(), default);
            default
        }
    }
}

fn read_u32(source: &dyn FieldSource, field: Field, variant: CalculatorVariant) -> u32 {
    let value = read(source, field, variant);
    if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}

/// Reads every field the configured formula needs into a complete input record.
pub fn read_inputs(source: &dyn FieldSource, config: &RoiConfig) -> CalculatorInputs {
    let variant = config.variant;
    let interest_rate = match config.rate_granularity {
        RateGranularity::Daily => {
            InterestRate::DailyPercent(read(source, Field::DailyInterestRate, variant))
        }
        RateGranularity::Annual => {
            InterestRate::AnnualPercent(read(source, Field::AnnualInterestRate, variant))
        }
    };

    CalculatorInputs {
        vehicles_annually: read_u32(source, Field::VehiclesAnnually, variant),
        admin_ftes: read(source, Field::AdminFtes, variant),
        avg_vehicle_value: read(source, Field::AvgVehicleValue, variant),
        interest_rate,
        disconnected_systems: Some(read_u32(source, Field::DisconnectedSystems, variant)),
        processing_days: Some(read_u32(source, Field::ProcessingDays, variant)),
        annual_dms_spend: Some(read(source, Field::AnnualDmsSpend, variant)),
    }
}

/// Ids whose change should trigger a recalculation for this config.
pub fn trigger_ids(config: &RoiConfig) -> Vec<&'static str> {
    Field::ALL
        .iter()
        .filter(|f| match (**f, config.rate_granularity) {
            (Field::DailyInterestRate, RateGranularity::Annual) => false,
            (Field::AnnualInterestRate, RateGranularity::Daily) => false,
            _ => true,
        })
        .map(|f| f.id())
        .collect()
}
