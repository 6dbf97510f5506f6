//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{Confirm, Select};

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}

/// Ask whether to export the result panel
pub fn confirm_export() -> Result<bool> {
    confirm_step("Export this report as a zip bundle?", false)
}

/// Ask whether to look at another crop on the map
pub fn confirm_another_crop() -> Result<bool> {
    confirm_step("Show another crop?", true)
}

/// Pick a crop from the sorted list; `current` is preselected
pub fn select_crop(crops: &[String], current: Option<&str>) -> Result<String> {
    if crops.is_empty() {
        anyhow::bail!("No crops available to select");
    }
    let default = current
        .and_then(|c| crops.iter().position(|name| name == c))
        .unwrap_or(0);
    let index = Select::new()
        .with_prompt("Select a crop")
        .items(crops)
        .default(default)
        .interact()?;
    crops
        .get(index)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Crop selection out of range"))
}
