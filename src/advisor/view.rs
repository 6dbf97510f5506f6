//! The injected view the wizard controller writes to
//!
//! [`ViewState`] is the concrete view: it records every toggle so the terminal
//! shell can draw it and tests can assert on it.

use std::collections::{HashMap, HashSet};

use super::catalog::{BoundedField, ChoiceField, Panel, Slider, TileId};
use crate::report::RecommendationReport;

/// Controls whose displayed value the controller overwrites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayedControl {
    Bounded(BoundedField),
    Slider(Slider),
}

/// Content of the result panel
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OutputContent {
    #[default]
    Empty,
    Loading,
    Report(RecommendationReport),
    Error(String),
}

/// Placeholder shown while the request is in flight
pub const LOADING_MESSAGE: &str = "Fetching AI recommendation...";

/// Everything the controller needs from a rendering surface
pub trait WizardView {
    fn show_step(&mut self, step: usize);
    fn set_progress(&mut self, fraction: f64, step_label: usize);
    fn set_prev_visible(&mut self, visible: bool);
    fn set_nav_button(&mut self, label: &str, enabled: bool);
    fn set_panel_visible(&mut self, panel: Panel, visible: bool);
    fn select_tile(&mut self, tile: TileId);
    fn clear_selection(&mut self);
    fn set_overlay_visible(&mut self, visible: bool);
    fn set_main_content_visible(&mut self, visible: bool);
    fn set_result_visible(&mut self, visible: bool);
    fn scroll_to_top(&mut self);
    fn set_displayed_value(&mut self, control: DisplayedControl, value: String);
    /// Drop the displayed value so the control reads as unset
    fn clear_displayed_value(&mut self, control: DisplayedControl);
    fn render_summary(&mut self, rows: Vec<(String, String)>);
    fn render_output(&mut self, output: OutputContent);
}

/// Recorded view state
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub step: usize,
    pub progress: f64,
    pub step_label: usize,
    pub prev_visible: bool,
    pub nav_label: String,
    pub nav_enabled: bool,
    pub visible_panels: HashSet<Panel>,
    pub selected_tiles: HashMap<ChoiceField, usize>,
    pub overlay_visible: bool,
    pub main_visible: bool,
    pub result_visible: bool,
    pub scroll_resets: usize,
    pub displayed: HashMap<DisplayedControl, String>,
    pub summary: Vec<(String, String)>,
    pub output: OutputContent,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_panel_visible(&self, panel: Panel) -> bool {
        self.visible_panels.contains(&panel)
    }

    pub fn displayed(&self, control: DisplayedControl) -> Option<&str> {
        self.displayed.get(&control).map(String::as_str)
    }

    pub fn selected(&self, field: ChoiceField) -> Option<usize> {
        self.selected_tiles.get(&field).copied()
    }
}

impl WizardView for ViewState {
    fn show_step(&mut self, step: usize) {
        self.step = step;
    }

    fn set_progress(&mut self, fraction: f64, step_label: usize) {
        self.progress = fraction;
        self.step_label = step_label;
    }

    fn set_prev_visible(&mut self, visible: bool) {
        self.prev_visible = visible;
    }

    fn set_nav_button(&mut self, label: &str, enabled: bool) {
        self.nav_label = label.to_string();
        self.nav_enabled = enabled;
    }

    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        if visible {
            self.visible_panels.insert(panel);
        } else {
            self.visible_panels.remove(&panel);
        }
    }

    fn select_tile(&mut self, tile: TileId) {
        self.selected_tiles.insert(tile.field, tile.index);
    }

    fn clear_selection(&mut self) {
        self.selected_tiles.clear();
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        self.overlay_visible = visible;
    }

    fn set_main_content_visible(&mut self, visible: bool) {
        self.main_visible = visible;
    }

    fn set_result_visible(&mut self, visible: bool) {
        self.result_visible = visible;
    }

    fn scroll_to_top(&mut self) {
        self.scroll_resets += 1;
    }

    fn set_displayed_value(&mut self, control: DisplayedControl, value: String) {
        self.displayed.insert(control, value);
    }

    fn clear_displayed_value(&mut self, control: DisplayedControl) {
        self.displayed.remove(&control);
    }

    fn render_summary(&mut self, rows: Vec<(String, String)>) {
        self.summary = rows;
    }

    fn render_output(&mut self, output: OutputContent) {
        self.output = output;
    }
}
