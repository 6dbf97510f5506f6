//! Rendered recommendation result

use console::style;
use serde::Serialize;

use crate::advisor::response::{display_value, RecommendationResponse};

/// Shown when the backend returns no deficiencies
pub const NO_DEFICIENCIES: &str = "No major deficiencies detected.";
/// Shown when the backend returns no treatments
pub const NO_TREATMENTS: &str = "No treatment recommendations available.";
/// Placeholder for a missing numeric value
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeficiencyLine {
    pub deficiency: String,
    pub severity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreatmentLine {
    pub fertilizer: String,
    pub dose: String,
    pub notes: String,
}

/// Everything the result panel shows for a successful response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationReport {
    pub sqi: Option<f64>,
    pub sqi_text: String,
    pub phi: Option<f64>,
    pub phi_text: String,
    pub final_message: String,
    pub n: Option<f64>,
    pub p: Option<f64>,
    pub k: Option<f64>,
    pub deficiencies: Vec<DeficiencyLine>,
    pub treatments: Vec<TreatmentLine>,
}

fn score(value: Option<f64>, scale: u32) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}/{}", v, scale),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn nutrient(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

impl RecommendationReport {
    pub fn from_response(response: &RecommendationResponse) -> Self {
        let deficiencies = response
            .deficiencies
            .iter()
            .flatten()
            .map(|d| DeficiencyLine {
                deficiency: d.deficiency.clone(),
                severity: display_value(&d.severity),
            })
            .collect();

        let treatments = response
            .treatments
            .iter()
            .flatten()
            .map(|t| TreatmentLine {
                fertilizer: t.fertilizer.clone(),
                dose: display_value(&t.dose),
                notes: display_value(&t.notes),
            })
            .collect();

        Self {
            sqi: response.sqi,
            sqi_text: response.sqi_text.clone().unwrap_or_default(),
            phi: response.phi,
            phi_text: response.phi_text.clone().unwrap_or_default(),
            final_message: response.final_message.clone().unwrap_or_default(),
            n: response.n,
            p: response.p,
            k: response.k,
            deficiencies,
            treatments,
        }
    }

    pub fn soil_quality_line(&self) -> String {
        format!(
            "Soil Quality Index (SQI): {} ({})",
            self.sqi_text,
            score(self.sqi, 5)
        )
    }

    pub fn crop_health_line(&self) -> String {
        format!(
            "Crop Health Index (CHI): {} ({})",
            self.phi_text,
            score(self.phi, 10)
        )
    }

    pub fn npk_line(&self) -> String {
        format!(
            "Estimated N/P/K: {}/{}/{} kg/ha",
            nutrient(self.n),
            nutrient(self.p),
            nutrient(self.k)
        )
    }

    pub fn deficiency_lines(&self) -> Vec<String> {
        if self.deficiencies.is_empty() {
            return vec![NO_DEFICIENCIES.to_string()];
        }
        self.deficiencies
            .iter()
            .map(|d| format!("{} (severity: {})", d.deficiency, d.severity))
            .collect()
    }

    pub fn treatment_lines(&self) -> Vec<String> {
        if self.treatments.is_empty() {
            return vec![NO_TREATMENTS.to_string()];
        }
        self.treatments
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}. {} – {}", i + 1, t.fertilizer, t.dose))
            .collect()
    }

    /// Plain-text rendering, one entry per line
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.soil_quality_line(),
            self.crop_health_line(),
            String::new(),
            self.final_message.clone(),
            String::new(),
            self.npk_line(),
            String::new(),
        ];

        if !self.deficiencies.is_empty() {
            lines.push("Detected Deficiencies:".to_string());
        }
        lines.extend(self.deficiency_lines());
        lines.push(String::new());

        if self.treatments.is_empty() {
            lines.push(NO_TREATMENTS.to_string());
        } else {
            lines.push("Top Treatment Recommendations:".to_string());
            for (headline, t) in self.treatment_lines().into_iter().zip(&self.treatments) {
                lines.push(headline);
                if !t.notes.is_empty() {
                    lines.push(format!("   {}", t.notes));
                }
            }
        }
        lines
    }

    /// Print the report to the console
    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("🌱").green(),
            style("RECOMMENDATION").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();
        println!("    {}", style(self.soil_quality_line()).cyan());
        println!("    {}", style(self.crop_health_line()).cyan());
        println!();
        if !self.final_message.is_empty() {
            println!("    {}", style(&self.final_message).white().bold());
            println!();
        }
        println!("    {}", self.npk_line());
        println!();

        if self.deficiencies.is_empty() {
            println!("    {}", style(NO_DEFICIENCIES).dim());
        } else {
            println!("    {}", style("Detected Deficiencies:").yellow());
            for line in self.deficiency_lines() {
                println!("      {} {}", style("•").dim(), line);
            }
        }
        println!();

        if self.treatments.is_empty() {
            println!("    {}", style(NO_TREATMENTS).dim());
        } else {
            println!("    {}", style("Top Treatment Recommendations:").yellow());
            for (headline, t) in self.treatment_lines().into_iter().zip(&self.treatments) {
                println!("      {}", headline);
                if !t.notes.is_empty() {
                    println!("         {}", style(&t.notes).dim());
                }
            }
        }
    }
}
