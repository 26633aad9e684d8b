//! Plain-text ROI report and the pre-filled demo request message.
//!
//! Both read what is currently displayed, not the raw result, so they quote
//! exactly the figures the visitor saw. Slots the layout lacks fall back to
//! the page's published example figures.
use crate::display::{
    DisplaySurface, PEOPLE_SAVINGS_SLOT, PRODUCTIVITY_GAINS_SLOT, PRODUCT_SAVINGS_SLOT,
    ROI_PERCENTAGE_SLOT, TOTAL_SAVINGS_SLOT,
};
use chrono::{DateTime, Utc};

const PLACEHOLDER_ROI: &str = "167";
const PLACEHOLDER_TOTAL: &str = "2,340,000";
const PLACEHOLDER_PEOPLE: &str = "353,210";
const PLACEHOLDER_PRODUCT: &str = "978,000";
const PLACEHOLDER_PRODUCTIVITY: &str = "1,008,000";

fn displayed(surface: &dyn DisplaySurface, slot: &str, placeholder: &str) -> String {
    surface
        .read_slot(slot)
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

/// Renders the shareable ROI report.
pub fn generate_report(
    surface: &dyn DisplaySurface,
    contact_email: &str,
    generated_at: DateTime<Utc>,
) -> String {
    let roi = displayed(surface, ROI_PERCENTAGE_SLOT, PLACEHOLDER_ROI);
    let total = displayed(surface, TOTAL_SAVINGS_SLOT, PLACEHOLDER_TOTAL);
    let people = displayed(surface, PEOPLE_SAVINGS_SLOT, PLACEHOLDER_PEOPLE);
    let product = displayed(surface, PRODUCT_SAVINGS_SLOT, PLACEHOLDER_PRODUCT);
    let productivity = displayed(surface, PRODUCTIVITY_GAINS_SLOT, PLACEHOLDER_PRODUCTIVITY);

    format!(
        "SHAED ROI Calculator Report
==========================
Generated: {generated}

Your Projected Annual ROI: {roi}%
Total Annual Value: ${total}

Savings Breakdown:
- People Savings: ${people}
- Product Savings: ${product}
- Productivity Gains: ${productivity}

Additional Benefits:
- 40+ Manual Steps Eliminated per Sale
- System Consolidation (Multiple Systems -> 1 Platform)
- 88% Time Reduction in Administrative Tasks
- 4.6/5 Customer Satisfaction Rating

Next Steps:
1. Schedule a personalized demo
2. Discuss implementation timeline
3. Review detailed case studies
4. Plan your SHAED deployment

Contact: {contact}
",
        generated = generated_at.format("%Y-%m-%d %H:%M UTC"),
        contact = contact_email,
    )
}

/// Message pre-filled into the contact form by "schedule a demo".
pub fn demo_request_message(surface: &dyn DisplaySurface) -> String {
    let roi = displayed(surface, ROI_PERCENTAGE_SLOT, PLACEHOLDER_ROI);
    let total = displayed(surface, TOTAL_SAVINGS_SLOT, PLACEHOLDER_TOTAL);
    format!(
        "I'm interested in learning more about SHAED. Based on your ROI calculator, I could potentially save ${} annually with a {}% ROI. Please schedule a demo to discuss further.",
        total, roi
    )
}
