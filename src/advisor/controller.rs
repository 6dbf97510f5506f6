//! Wizard state machine
//!
//! The controller owns the answers, the current step and the view. Every field
//! update revalidates the current step and refreshes the navigation button;
//! advancing is always manual through [`WizardController::go_next_or_submit`].

use tracing::{debug, info};

use super::catalog::{
    BoundedField, ChoiceField, Panel, Slider, StepCatalog, TileId, Treatment,
};
use super::inputs::{
    clamp_irrigation_count, clamp_leaf_yellow, clamp_quantity, clamp_rainfall, clamp_spray_count,
    CropInputs, YesNo,
};
use super::payload::{build_request, RecommendationRequest};
use super::validator::is_step_complete;
use super::view::{DisplayedControl, ViewState, WizardView};

/// Navigation button label on every step but the last
pub const NEXT_LABEL: &str = "Next Step";
/// Navigation button label on the final step
pub const SUBMIT_LABEL: &str = "Get Recommendations";

/// Result of pressing the navigation button
#[derive(Debug, Clone, PartialEq)]
pub enum NavOutcome {
    /// Button disabled: current step incomplete
    Blocked,
    /// Moved to the given step
    Moved(usize),
    /// Final step complete: send this request
    Submit(RecommendationRequest),
}

/// Explicit owner of the wizard state
pub struct WizardController<V: WizardView = ViewState> {
    catalog: StepCatalog,
    inputs: CropInputs,
    current_step: usize,
    total_steps: usize,
    nav_enabled: bool,
    view: V,
}

impl<V: WizardView> WizardController<V> {
    pub fn new(catalog: StepCatalog, view: V) -> Self {
        let total_steps = catalog.len();
        let mut controller = Self {
            catalog,
            inputs: CropInputs::default(),
            current_step: 0,
            total_steps,
            nav_enabled: false,
            view,
        };
        controller.sync_panels();
        controller.update_navigation_button();
        controller
    }

    /// Start from previously collected answers (e.g. a resumed session)
    pub fn with_inputs(catalog: StepCatalog, view: V, inputs: CropInputs) -> Self {
        let mut controller = Self::new(catalog, view);
        controller.inputs = inputs;
        controller.sync_panels();
        controller.update_navigation_button();
        controller
    }

    pub fn catalog(&self) -> &StepCatalog {
        &self.catalog
    }

    pub fn inputs(&self) -> &CropInputs {
        &self.inputs
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Borrow answers and view together
    pub fn parts_mut(&mut self) -> (&CropInputs, &mut V) {
        (&self.inputs, &mut self.view)
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn is_final_step(&self) -> bool {
        self.current_step + 1 == self.total_steps
    }

    pub fn nav_enabled(&self) -> bool {
        self.nav_enabled
    }

    /// Show the overlay at step 0 with the input view in front
    pub fn open(&mut self) {
        self.view.set_overlay_visible(true);
        self.view.set_result_visible(false);
        self.view.set_main_content_visible(true);
        self.show_step(0);
    }

    /// Hide the overlay; answers and position are kept
    pub fn close(&mut self) {
        self.view.set_overlay_visible(false);
    }

    /// Restore default answers and go back to step 0
    pub fn reset(&mut self) {
        info!("Resetting wizard answers");
        self.inputs = CropInputs::default();
        self.view.clear_selection();
        for control in [
            DisplayedControl::Bounded(BoundedField::IrrigationCount),
            DisplayedControl::Bounded(BoundedField::FungicideSprays),
        ] {
            self.view.set_displayed_value(control, "0".to_string());
        }
        // Sliders go back to untouched, so nothing is shown for them
        for slider in [
            Slider::LeafYellow,
            Slider::Rainfall,
            Slider::FertilizerQty,
            Slider::PesticideQty,
        ] {
            self.view.clear_displayed_value(DisplayedControl::Slider(slider));
        }
        self.sync_panels();
        self.show_step(0);
    }

    pub fn show_step(&mut self, n: usize) {
        if n >= self.total_steps {
            return;
        }
        self.current_step = n;
        self.view.show_step(n);
        self.view
            .set_progress((n + 1) as f64 / self.total_steps as f64, n + 1);
        self.view.set_prev_visible(n > 0);
        self.update_navigation_button();
        self.view.scroll_to_top();
        debug!(step = n, "Showing wizard step");
    }

    pub fn go_prev(&mut self) {
        if self.current_step > 0 {
            self.show_step(self.current_step - 1);
        }
    }

    pub fn go_next_or_submit(&mut self) -> NavOutcome {
        if !self.nav_enabled {
            return NavOutcome::Blocked;
        }
        if !self.is_final_step() {
            self.show_step(self.current_step + 1);
            return NavOutcome::Moved(self.current_step);
        }
        info!(crop = ?self.inputs.crop, "Wizard complete, building recommendation request");
        NavOutcome::Submit(build_request(&self.inputs))
    }

    /// Apply a selection tile. Unknown tiles are ignored and return false.
    pub fn select_tile(&mut self, tile: TileId) -> bool {
        let Some((field, value)) = self.catalog.resolve(tile) else {
            debug!(?tile, "Ignoring unknown tile");
            return false;
        };
        let value = value.to_string();
        self.write_choice(field, value);
        self.view.select_tile(tile);
        self.update_navigation_button();
        true
    }

    /// Apply a selection by value; the value must be one of the group's options
    pub fn set_choice(&mut self, field: ChoiceField, value: &str) -> bool {
        match self.catalog.tile_for(field, value) {
            Some(tile) => self.select_tile(tile),
            None => false,
        }
    }

    pub fn set_yes_no(&mut self, treatment: Treatment, answer: YesNo) {
        match treatment {
            Treatment::Fertilizer => self.inputs.used_fertilizer = answer,
            Treatment::Pesticide => self.inputs.used_pesticide = answer,
            Treatment::Fungicide => self.inputs.used_fungicide = answer,
        }
        self.view
            .set_panel_visible(treatment.panel(), answer.is_yes());
        self.update_navigation_button();
    }

    /// Move a slider; the value is clamped to the slider's domain
    pub fn set_slider(&mut self, slider: Slider, value: f64) {
        let display = match slider {
            Slider::LeafYellow => {
                let percent = clamp_leaf_yellow(value.round() as i64);
                self.inputs.leaf_yellow_percent = percent;
                self.inputs.leaf_yellow_touched = true;
                format!("{}%", percent)
            }
            Slider::Rainfall => {
                let mm = clamp_rainfall(value);
                self.inputs.rainfall_15 = mm;
                self.inputs.rainfall_touched = true;
                format!("{} mm", mm)
            }
            Slider::FertilizerQty => {
                let qty = clamp_quantity(value);
                self.inputs.fertilizer_qty = qty;
                qty.to_string()
            }
            Slider::PesticideQty => {
                let qty = clamp_quantity(value);
                self.inputs.pesticide_qty = qty;
                qty.to_string()
            }
        };
        self.view
            .set_displayed_value(DisplayedControl::Slider(slider), display);
        self.update_navigation_button();
    }

    /// Raw entry into a bounded numeric field. Returns the clamped value, which
    /// also replaces the displayed text.
    pub fn input_bounded(&mut self, field: BoundedField, raw: i64) -> u32 {
        let value = match field {
            BoundedField::IrrigationCount => {
                let count = clamp_irrigation_count(raw);
                self.inputs.irrigation_count = count;
                self.inputs.irrigation_count_touched = true;
                count
            }
            BoundedField::FungicideSprays => {
                let sprays = clamp_spray_count(raw);
                self.inputs.fungicide_sprays = sprays;
                self.inputs.fungicide_sprays_touched = true;
                sprays
            }
        };
        self.view
            .set_displayed_value(DisplayedControl::Bounded(field), value.to_string());
        self.update_navigation_button();
        value
    }

    /// Current value of a choice field
    pub fn choice(&self, field: ChoiceField) -> Option<&str> {
        let inputs = &self.inputs;
        match field {
            ChoiceField::Crop => inputs.crop.as_deref(),
            ChoiceField::PreviousCrop => inputs.previous_crop.as_deref(),
            ChoiceField::SoilType => inputs.soil_type.as_deref(),
            ChoiceField::SoilTexture => inputs.soil_texture.as_deref(),
            ChoiceField::GrowthStage => inputs.growth_stage.as_deref(),
            ChoiceField::IrrigationType => inputs.irrigation_type.as_deref(),
            ChoiceField::IrrigationStatus => inputs.irrigation_status.as_deref(),
            ChoiceField::LeafColor => inputs.leaf_color.as_deref(),
            ChoiceField::Spots => inputs.spots.as_deref(),
            ChoiceField::Pests => inputs.pests.as_deref(),
            ChoiceField::QuickHumidity => inputs.quick_humidity.as_deref(),
            ChoiceField::FertilizerType => {
                Some(inputs.fertilizer_type.as_str()).filter(|s| !s.is_empty())
            }
            ChoiceField::PesticideType => {
                Some(inputs.pesticide_type.as_str()).filter(|s| !s.is_empty())
            }
        }
    }

    pub fn yes_no(&self, treatment: Treatment) -> YesNo {
        match treatment {
            Treatment::Fertilizer => self.inputs.used_fertilizer,
            Treatment::Pesticide => self.inputs.used_pesticide,
            Treatment::Fungicide => self.inputs.used_fungicide,
        }
    }

    /// Whether a panel-gated control is currently shown
    pub fn is_panel_open(&self, panel: Panel) -> bool {
        Treatment::ALL
            .iter()
            .find(|t| t.panel() == panel)
            .is_some_and(|t| self.yes_no(*t).is_yes())
    }

    fn write_choice(&mut self, field: ChoiceField, value: String) {
        let inputs = &mut self.inputs;
        match field {
            ChoiceField::Crop => inputs.crop = Some(value),
            ChoiceField::PreviousCrop => inputs.previous_crop = Some(value),
            ChoiceField::SoilType => inputs.soil_type = Some(value),
            ChoiceField::SoilTexture => inputs.soil_texture = Some(value),
            ChoiceField::GrowthStage => inputs.growth_stage = Some(value),
            ChoiceField::IrrigationType => inputs.irrigation_type = Some(value),
            ChoiceField::IrrigationStatus => inputs.irrigation_status = Some(value),
            ChoiceField::LeafColor => inputs.leaf_color = Some(value),
            ChoiceField::Spots => inputs.spots = Some(value),
            ChoiceField::Pests => inputs.pests = Some(value),
            ChoiceField::QuickHumidity => inputs.quick_humidity = Some(value),
            ChoiceField::FertilizerType => inputs.fertilizer_type = value,
            ChoiceField::PesticideType => inputs.pesticide_type = value,
        }
    }

    fn sync_panels(&mut self) {
        for treatment in Treatment::ALL {
            let open = self.yes_no(treatment).is_yes();
            self.view.set_panel_visible(treatment.panel(), open);
        }
    }

    fn update_navigation_button(&mut self) {
        let label = if self.is_final_step() {
            SUBMIT_LABEL
        } else {
            NEXT_LABEL
        };
        self.nav_enabled = is_step_complete(self.current_step, &self.inputs);
        self.view.set_nav_button(label, self.nav_enabled);
    }
}
