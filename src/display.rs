//! Display renderer: formats a [`CalculatorResult`] into named output slots.
use crate::calculator::{compute, RoiConfig};
use crate::fields::{read_inputs, FieldSource};
use crate::models::CalculatorResult;
use std::collections::BTreeMap;

pub const ROI_PERCENTAGE_SLOT: &str = "roi-percentage";
pub const TOTAL_SAVINGS_SLOT: &str = "total-savings";
pub const PEOPLE_SAVINGS_SLOT: &str = "people-savings";
pub const PRODUCT_SAVINGS_SLOT: &str = "product-savings";
pub const PRODUCTIVITY_GAINS_SLOT: &str = "productivity-gains";
pub const SYSTEM_REDUCTION_SLOT: &str = "system-reduction";

pub const ALL_SLOTS: [&str; 6] = [
    ROI_PERCENTAGE_SLOT,
    TOTAL_SAVINGS_SLOT,
    PEOPLE_SAVINGS_SLOT,
    PRODUCT_SAVINGS_SLOT,
    PRODUCTIVITY_GAINS_SLOT,
    SYSTEM_REDUCTION_SLOT,
];

/// A page (or stand-in) with named text outputs.
pub trait DisplaySurface {
    /// Writes `text` into the slot. Returns `false` if the slot does not exist.
    fn write_slot(&mut self, id: &str, text: &str) -> bool;

    /// Current text of the slot, if it exists.
    fn read_slot(&self, id: &str) -> Option<String>;
}

/// In-memory surface with a fixed set of declared slots.
///
/// Writes to undeclared slots are dropped, like writes to elements a page
/// layout does not contain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayBoard {
    slots: BTreeMap<String, String>,
}

impl DisplayBoard {
    pub fn with_slots(ids: &[&str]) -> Self {
        Self {
            slots: ids.iter().map(|id| (id.to_string(), String::new())).collect(),
        }
    }

    /// Board carrying every slot the renderer knows about.
    pub fn complete() -> Self {
        Self::with_slots(&ALL_SLOTS)
    }

    pub fn slots(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl DisplaySurface for DisplayBoard {
    fn write_slot(&mut self, id: &str, text: &str) -> bool {
        match self.slots.get_mut(id) {
            Some(slot) => {
                slot.clear();
                slot.push_str(text);
                true
            }
            None => false,
        }
    }

    fn read_slot(&self, id: &str) -> Option<String> {
        self.slots.get(id).cloned()
    }
}

/// Rounds to whole units and groups thousands with commas (en-US).
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Rounds to an integer percentage, never below zero.
pub fn format_percentage(percent: f64) -> String {
    if !percent.is_finite() {
        return "0".to_string();
    }
    format!("{:.0}", percent.max(0.0).round())
}

/// Writes every available result field into the surface.
///
/// Returns the number of slots actually written; absent slots and absent
/// values are skipped.
pub fn render(result: &CalculatorResult, surface: &mut dyn DisplaySurface) -> usize {
    let mut updates: Vec<(&str, String)> = vec![
        (TOTAL_SAVINGS_SLOT, format_currency(result.total_savings)),
        (PEOPLE_SAVINGS_SLOT, format_currency(result.people_savings)),
        (PRODUCT_SAVINGS_SLOT, format_currency(result.product_savings)),
    ];
    if let Some(roi) = result.display_roi_percentage() {
        updates.push((ROI_PERCENTAGE_SLOT, format_percentage(roi)));
    }
    if let Some(gains) = result.productivity_gains {
        updates.push((PRODUCTIVITY_GAINS_SLOT, format_currency(gains)));
    }
    if let Some(systems) = result.systems_consolidated {
        updates.push((SYSTEM_REDUCTION_SLOT, systems.to_string()));
    }

    let mut written = 0;
    for (slot, text) in updates {
        if surface.write_slot(slot, &text) {
            written += 1;
        } else {
            tracing::trace!("Display slot '{}' missing, skipped", slot);
        }
    }
    written
}

/// Field reader → formula engine → renderer. Bind to every input-change event.
pub fn recalculate(
    source: &dyn FieldSource,
    surface: &mut dyn DisplaySurface,
    config: &RoiConfig,
) -> CalculatorResult {
    let inputs = read_inputs(source, config);
    let result = compute(&inputs, config);
    render(&result, surface);
    result
}
