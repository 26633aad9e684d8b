/// Unit tests for the calculator pipeline
/// Tests field defaults, formula fixtures, rendering and the report
use rust_roi_calculator::calculator::{compute, RoiConfig};
use rust_roi_calculator::display::{
    recalculate, DisplayBoard, DisplaySurface, PEOPLE_SAVINGS_SLOT, PRODUCTIVITY_GAINS_SLOT,
    PRODUCT_SAVINGS_SLOT, ROI_PERCENTAGE_SLOT, SYSTEM_REDUCTION_SLOT, TOTAL_SAVINGS_SLOT,
};
use rust_roi_calculator::fields::read_inputs;
use rust_roi_calculator::models::PlatformTier;
use std::collections::HashMap;

fn page(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod default_page_tests {
    use super::*;

    #[test]
    fn test_empty_page_renders_default_scenario() {
        let mut board = DisplayBoard::complete();
        let result = recalculate(&page(&[]), &mut board, &RoiConfig::full());

        assert_eq!(result.platform_tier, PlatformTier::Base);
        assert_eq!(board.read_slot(PEOPLE_SAVINGS_SLOT).as_deref(), Some("171,600"));
        assert_eq!(board.read_slot(PRODUCT_SAVINGS_SLOT).as_deref(), Some("22,500"));
        assert_eq!(
            board.read_slot(PRODUCTIVITY_GAINS_SLOT).as_deref(),
            Some("2,412,500")
        );
        assert_eq!(board.read_slot(TOTAL_SAVINGS_SLOT).as_deref(), Some("2,606,600"));
        assert_eq!(board.read_slot(ROI_PERCENTAGE_SLOT).as_deref(), Some("8589"));
        assert_eq!(board.read_slot(SYSTEM_REDUCTION_SLOT).as_deref(), Some("7"));
    }

    #[test]
    fn test_blank_fields_equal_missing_fields() {
        let blank = page(&[
            ("vehicles-annually", ""),
            ("admin-ftes", ""),
            ("avg-vehicle-value", ""),
            ("daily-interest-rate", ""),
        ]);
        let config = RoiConfig::full();
        assert_eq!(
            compute(&read_inputs(&blank, &config), &config),
            compute(&read_inputs(&page(&[]), &config), &config)
        );
    }

    #[test]
    fn test_simplified_page_defaults() {
        let config = RoiConfig::simplified();
        let mut board = DisplayBoard::complete();
        let result = recalculate(&page(&[]), &mut board, &config);

        assert_eq!(board.read_slot(PEOPLE_SAVINGS_SLOT).as_deref(), Some("39,000"));
        assert_eq!(board.read_slot(PRODUCT_SAVINGS_SLOT).as_deref(), Some("16,438"));
        assert_eq!(board.read_slot(TOTAL_SAVINGS_SLOT).as_deref(), Some("55,438"));
        assert_eq!(board.read_slot(ROI_PERCENTAGE_SLOT).as_deref(), Some(""));
        assert!(result.roi_percentage.is_none());
    }
}

#[cfg(test)]
mod user_input_tests {
    use super::*;

    #[test]
    fn test_large_dealer_moves_to_enterprise_tier() {
        let config = RoiConfig::full();
        let inputs = read_inputs(
            &page(&[("vehicles-annually", "2500"), ("admin-ftes", "10")]),
            &config,
        );
        let result = compute(&inputs, &config);

        assert_eq!(result.platform_tier, PlatformTier::Enterprise);
        assert_eq!(result.platform_cost, 120_000.0);
        // 3 days * 75,000 * 0.02% * 2,500 vehicles
        assert!((result.product_savings - 112_500.0).abs() < 1e-6);
    }

    #[test]
    fn test_rerender_after_input_change_overwrites() {
        let config = RoiConfig::full();
        let mut board = DisplayBoard::complete();

        recalculate(&page(&[("admin-ftes", "3")]), &mut board, &config);
        recalculate(&page(&[("admin-ftes", "6")]), &mut board, &config);

        assert_eq!(board.read_slot(PEOPLE_SAVINGS_SLOT).as_deref(), Some("343,200"));
    }

    #[test]
    fn test_page_without_outputs_still_computes() {
        let mut board = DisplayBoard::with_slots(&[]);
        let result = recalculate(&page(&[]), &mut board, &RoiConfig::full());
        assert!(result.total_savings > 0.0);
        assert_eq!(board.slots().count(), 0);
    }
}
