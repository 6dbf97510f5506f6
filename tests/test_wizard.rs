//! Tests for the wizard controller state machine
//!
//! The controller writes to a recording `ViewState`, so every assertion here
//! is on plain data. Terminal rendering is covered by the shell's unit tests.

#[path = "common/mod.rs"]
mod common;

use common::{fill_all_steps, new_controller};
use cropsense::advisor::{
    BoundedField, ChoiceField, CropInputs, DisplayedControl, NavOutcome, Panel, Slider,
    StepCatalog, TileId, Treatment, ViewState, WizardController, YesNo, NEXT_LABEL, SUBMIT_LABEL,
};

// ============================================================================
// Opening and progress
// ============================================================================

#[test]
fn test_open_shows_first_step() {
    let controller = new_controller();
    let view = controller.view();

    assert_eq!(controller.current_step(), 0);
    assert!(view.overlay_visible);
    assert!(view.main_visible);
    assert!(!view.result_visible);
    assert!(!view.prev_visible, "Back is hidden on step 0");
    assert_eq!(view.step_label, 1);
    assert!((view.progress - 1.0 / 8.0).abs() < 1e-12);
    assert_eq!(view.nav_label, NEXT_LABEL);
    assert!(!view.nav_enabled, "Nothing chosen yet");
}

#[test]
fn test_progress_tracks_each_step() {
    let mut controller = new_controller();
    for n in 0..8 {
        controller.show_step(n);
        let view = controller.view();
        assert_eq!(view.step, n);
        assert_eq!(view.step_label, n + 1);
        assert!((view.progress - (n + 1) as f64 / 8.0).abs() < 1e-12);
        assert_eq!(view.prev_visible, n > 0);
    }
    assert_eq!(controller.view().nav_label, SUBMIT_LABEL);
}

#[test]
fn test_show_step_out_of_range_is_ignored() {
    let mut controller = new_controller();
    controller.show_step(3);
    controller.show_step(8);
    controller.show_step(usize::MAX);
    assert_eq!(controller.current_step(), 3);
}

#[test]
fn test_every_step_change_scrolls_to_top() {
    let mut controller = new_controller();
    let before = controller.view().scroll_resets;
    controller.show_step(1);
    controller.go_prev();
    assert_eq!(controller.view().scroll_resets, before + 2);
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_next_blocked_until_step_complete() {
    let mut controller = new_controller();
    assert_eq!(controller.go_next_or_submit(), NavOutcome::Blocked);
    assert_eq!(controller.current_step(), 0);

    assert!(controller.select_tile(TileId::new(ChoiceField::Crop, 0)));
    assert!(controller.nav_enabled());
    assert_eq!(controller.go_next_or_submit(), NavOutcome::Moved(1));
    assert_eq!(controller.current_step(), 1);
    assert!(!controller.nav_enabled(), "Previous crop not chosen yet");
}

#[test]
fn test_selection_does_not_auto_advance() {
    let mut controller = new_controller();
    controller.set_choice(ChoiceField::Crop, "Maize");
    assert_eq!(controller.current_step(), 0);
}

#[test]
fn test_prev_on_first_step_stays() {
    let mut controller = new_controller();
    controller.go_prev();
    assert_eq!(controller.current_step(), 0);

    controller.show_step(2);
    controller.go_prev();
    assert_eq!(controller.current_step(), 1);
}

#[test]
fn test_irrigation_step_needs_touched_count() {
    let mut controller = new_controller();
    controller.show_step(4);
    controller.set_choice(ChoiceField::IrrigationType, "Flood");
    controller.set_choice(ChoiceField::IrrigationStatus, "Dry");
    assert!(!controller.nav_enabled(), "Count left at its default");

    // Entering zero still counts as an answer
    controller.input_bounded(BoundedField::IrrigationCount, 0);
    assert!(controller.nav_enabled());
}

#[test]
fn test_weather_step_needs_touched_rainfall() {
    let mut controller = new_controller();
    controller.show_step(6);
    controller.set_choice(ChoiceField::QuickHumidity, "High");
    assert!(!controller.nav_enabled());
    controller.set_slider(Slider::Rainfall, 0.0);
    assert!(controller.nav_enabled());
}

#[test]
fn test_full_walk_submits_request() {
    let mut controller = new_controller();
    fill_all_steps(&mut controller);

    assert!(controller.is_final_step());
    assert_eq!(controller.view().nav_label, SUBMIT_LABEL);
    assert!(controller.nav_enabled(), "Treatments default to No");

    match controller.go_next_or_submit() {
        NavOutcome::Submit(request) => {
            assert_eq!(request.crop_name, "Rice");
            assert_eq!(request.stage_days, 55);
            assert_eq!(request.irrigation_count, 4);
            assert_eq!(request.leaf_yellow_percent, 20);
            assert_eq!(request.rainfall, 35.0);
        }
        other => panic!("Expected submit, got {:?}", other),
    }
    // Submitting does not move the wizard
    assert_eq!(controller.current_step(), 7);
}

#[test]
fn test_final_step_rechecks_earlier_fields() {
    let catalog = StepCatalog::standard().unwrap();
    let mut inputs = CropInputs::default();
    inputs.crop = Some("Rice".to_string());
    let mut controller = WizardController::with_inputs(catalog, ViewState::new(), inputs);
    controller.show_step(7);

    assert!(!controller.nav_enabled());
    assert_eq!(controller.go_next_or_submit(), NavOutcome::Blocked);
}

// ============================================================================
// Treatments and detail panels
// ============================================================================

#[test]
fn test_yes_reveals_detail_panel() {
    let mut controller = new_controller();
    fill_all_steps(&mut controller);

    controller.set_yes_no(Treatment::Fertilizer, YesNo::Yes);
    assert!(controller.view().is_panel_visible(Panel::FertilizerDetails));
    assert!(!controller.view().is_panel_visible(Panel::PesticideDetails));
    assert!(!controller.nav_enabled(), "Fertilizer type now required");

    controller.set_choice(ChoiceField::FertilizerType, "Urea");
    controller.set_slider(Slider::FertilizerQty, 40.0);
    assert!(controller.nav_enabled());

    controller.set_yes_no(Treatment::Fertilizer, YesNo::No);
    assert!(!controller.view().is_panel_visible(Panel::FertilizerDetails));
    assert!(controller.nav_enabled());
}

#[test]
fn test_fungicide_yes_needs_no_extra_fields() {
    let mut controller = new_controller();
    fill_all_steps(&mut controller);
    controller.set_yes_no(Treatment::Fungicide, YesNo::Yes);
    assert!(controller.is_panel_open(Panel::FungicideDetails));
    assert!(controller.nav_enabled());
}

// ============================================================================
// Clamping and displayed values
// ============================================================================

#[test]
fn test_bounded_fields_clamp_and_display() {
    let mut controller = new_controller();

    assert_eq!(controller.input_bounded(BoundedField::IrrigationCount, 99), 25);
    assert_eq!(
        controller
            .view()
            .displayed(DisplayedControl::Bounded(BoundedField::IrrigationCount)),
        Some("25")
    );

    assert_eq!(controller.input_bounded(BoundedField::IrrigationCount, -3), 0);
    assert_eq!(controller.inputs().irrigation_count, 0);

    assert_eq!(controller.input_bounded(BoundedField::FungicideSprays, -1), 0);
    assert_eq!(controller.input_bounded(BoundedField::FungicideSprays, 12), 12);
}

#[test]
fn test_sliders_clamp_and_display() {
    let mut controller = new_controller();

    controller.set_slider(Slider::LeafYellow, 140.0);
    assert_eq!(controller.inputs().leaf_yellow_percent, 100);
    assert_eq!(
        controller
            .view()
            .displayed(DisplayedControl::Slider(Slider::LeafYellow)),
        Some("100%")
    );

    controller.set_slider(Slider::Rainfall, 500.0);
    assert_eq!(controller.inputs().rainfall_15, 150.0);
    assert_eq!(
        controller
            .view()
            .displayed(DisplayedControl::Slider(Slider::Rainfall)),
        Some("150 mm")
    );

    controller.set_slider(Slider::PesticideQty, -10.0);
    assert_eq!(controller.inputs().pesticide_qty, 0.0);
}

#[test]
fn test_unknown_tile_is_ignored() {
    let mut controller = new_controller();
    assert!(!controller.select_tile(TileId::new(ChoiceField::Crop, 42)));
    assert!(!controller.set_choice(ChoiceField::Crop, "Banana"));
    assert_eq!(controller.choice(ChoiceField::Crop), None);
}

#[test]
fn test_reselecting_replaces_single_choice() {
    let mut controller = new_controller();
    controller.set_choice(ChoiceField::Crop, "Rice");
    controller.set_choice(ChoiceField::Crop, "Cotton");
    assert_eq!(controller.choice(ChoiceField::Crop), Some("Cotton"));
    assert_eq!(controller.view().selected(ChoiceField::Crop), Some(3));
}

// ============================================================================
// Close, reopen and reset
// ============================================================================

#[test]
fn test_close_keeps_answers_and_open_restarts() {
    let mut controller = new_controller();
    fill_all_steps(&mut controller);

    controller.close();
    assert!(!controller.view().overlay_visible);
    assert_eq!(controller.current_step(), 7);
    assert_eq!(controller.choice(ChoiceField::Crop), Some("Rice"));

    controller.open();
    assert!(controller.view().overlay_visible);
    assert_eq!(controller.current_step(), 0);
    assert_eq!(controller.choice(ChoiceField::Crop), Some("Rice"));
    assert!(controller.nav_enabled(), "Step 0 is still answered");
}

#[test]
fn test_reset_restores_defaults() {
    let mut controller = new_controller();
    fill_all_steps(&mut controller);
    controller.set_yes_no(Treatment::Pesticide, YesNo::Yes);

    controller.reset();

    assert_eq!(controller.inputs(), &CropInputs::default());
    assert_eq!(controller.current_step(), 0);
    assert!(controller.view().selected_tiles.is_empty());
    assert!(controller.view().visible_panels.is_empty());
    assert_eq!(
        controller
            .view()
            .displayed(DisplayedControl::Bounded(BoundedField::IrrigationCount)),
        Some("0")
    );
    for slider in [
        Slider::LeafYellow,
        Slider::Rainfall,
        Slider::FertilizerQty,
        Slider::PesticideQty,
    ] {
        assert_eq!(
            controller.view().displayed(DisplayedControl::Slider(slider)),
            None,
            "{:?} should read as unset",
            slider
        );
    }
    assert!(!controller.nav_enabled());
}
