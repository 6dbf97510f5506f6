//! Console tables for the input summary and producer rankings

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::advisor::inputs::{CropInputs, NOT_PROVIDED};
use crate::production::{ColorScale, RegionShade, Tooltip, TopProducers};

/// Label/value pairs describing what the user entered
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSummary {
    pub rows: Vec<(String, String)>,
}

impl InputSummary {
    pub fn from_inputs(inputs: &CropInputs) -> Self {
        Self {
            rows: inputs.summary_rows(),
        }
    }

    pub fn from_rows(rows: Vec<(String, String)>) -> Self {
        Self { rows }
    }

    /// Number of answers that were actually provided
    pub fn provided_count(&self) -> usize {
        self.rows.iter().filter(|(_, v)| v != NOT_PROVIDED).count()
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Input").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        for (label, value) in &self.rows {
            let cell = if value == NOT_PROVIDED {
                Cell::new(value).fg(Color::DarkGrey)
            } else {
                Cell::new(value).fg(Color::Cyan)
            };
            table.add_row(vec![Cell::new(label), cell]);
        }
        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("INPUT SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.table().to_string().lines() {
            println!("    {}", line);
        }
    }
}

/// Print the top producers for a crop as a ranked table
pub fn display_top_producers(crop: &str, top: &TopProducers) {
    println!();
    println!(
        "    {} {}",
        style("🏆").yellow(),
        style(format!("TOP PRODUCERS · {}", crop)).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    match top {
        TopProducers::NoData => {
            println!("    {}", style(top.lines().join("")).dim());
        }
        TopProducers::Ranked(entries) => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_header(vec![
                Cell::new("Rank").add_attribute(Attribute::Bold),
                Cell::new("Region").add_attribute(Attribute::Bold),
                Cell::new("Production (Lakh Tonnes)").add_attribute(Attribute::Bold),
            ]);
            for (i, entry) in entries.iter().enumerate() {
                let rank = Cell::new(i + 1);
                let rank = if i == 0 {
                    rank.fg(Color::Green).add_attribute(Attribute::Bold)
                } else {
                    rank
                };
                table.add_row(vec![
                    rank,
                    Cell::new(&entry.region),
                    Cell::new(format!("{:.2}", entry.total)),
                ]);
            }
            for line in table.to_string().lines() {
                println!("    {}", line);
            }
        }
    }
}

/// Print every boundary region with its total and colour swatch
pub fn display_choropleth(shades: &[RegionShade], scale: &ColorScale) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Region").add_attribute(Attribute::Bold),
        Cell::new("Production (Lakh Tonnes)").add_attribute(Attribute::Bold),
        Cell::new("Shade").add_attribute(Attribute::Bold),
    ]);

    for shade in shades {
        let (value, swatch) = match (shade.production, shade.color) {
            (Some(p), Some(c)) => (
                Cell::new(format!("{:.2}", p)),
                Cell::new(format!("  {}  ", c.hex())).bg(Color::Rgb {
                    r: c.r,
                    g: c.g,
                    b: c.b,
                }),
            ),
            _ => (
                Cell::new("-").fg(Color::DarkGrey),
                Cell::new("no data").fg(Color::DarkGrey),
            ),
        };
        table.add_row(vec![Cell::new(&shade.region), value, swatch]);
    }

    println!();
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
    println!(
        "    {}",
        style(format!("Scale: {:.2} to {:.2} Lakh Tonnes", scale.min, scale.max)).dim()
    );
}

/// Print a hover tooltip as an indented card
pub fn display_tooltip(tooltip: &Tooltip) {
    let [title, body] = tooltip.lines();
    println!();
    println!("    {}", style(title).white().bold());
    println!("    {}", body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs_have_nothing_provided_for_choices() {
        let summary = InputSummary::from_inputs(&CropInputs::default());
        let crop = summary.rows.iter().find(|(l, _)| l == "Crop").unwrap();
        assert_eq!(crop.1, NOT_PROVIDED);
    }

    #[test]
    fn test_table_contains_values() {
        let summary = InputSummary::from_rows(vec![
            ("Crop".to_string(), "Rice".to_string()),
            ("Spots".to_string(), NOT_PROVIDED.to_string()),
        ]);
        let rendered = summary.table().to_string();

        assert!(rendered.contains("Rice"));
        assert!(rendered.contains("Not Provided"));
        assert_eq!(summary.provided_count(), 1);
    }
}
