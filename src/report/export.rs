//! Export of the result panel
//!
//! The panel (input summary plus the rendered result) is written as a zip
//! bundle holding `report.json` and `report.txt`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use tracing::info;

use super::recommendation::RecommendationReport;
use crate::advisor::client::Outcome;
use crate::advisor::view::{OutputContent, ViewState};

/// File name used when no export path is given
pub const DEFAULT_EXPORT_NAME: &str = "CropSense_Report.zip";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub label: String,
    pub value: String,
}

/// Result section of an exported panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PanelResult {
    Success { report: RecommendationReport },
    Error { message: String },
}

/// Snapshot of the result view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPanel {
    pub generated_at: String,
    pub summary: Vec<SummaryEntry>,
    pub result: PanelResult,
}

impl ResultPanel {
    pub fn new(summary: Vec<(String, String)>, outcome: &Outcome) -> Self {
        let result = match outcome {
            Outcome::Success(report) => PanelResult::Success {
                report: report.clone(),
            },
            Outcome::Failure(message) => PanelResult::Error {
                message: message.clone(),
            },
        };
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            summary: summary
                .into_iter()
                .map(|(label, value)| SummaryEntry { label, value })
                .collect(),
            result,
        }
    }

    /// Capture a settled view; `None` while nothing has been rendered yet
    pub fn from_view(view: &ViewState) -> Option<Self> {
        let outcome = match &view.output {
            OutputContent::Report(report) => Outcome::Success(report.clone()),
            OutputContent::Error(message) => Outcome::Failure(message.clone()),
            OutputContent::Empty | OutputContent::Loading => return None,
        };
        Some(Self::new(view.summary.clone(), &outcome))
    }

    /// Plain-text rendering of the whole panel
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("CropSense Report\n");
        out.push_str(&format!("Generated: {}\n\n", self.generated_at));
        out.push_str("Your Inputs\n");
        for entry in &self.summary {
            out.push_str(&format!("{}: {}\n", entry.label, entry.value));
        }
        out.push('\n');
        out.push_str("Recommendation\n");
        match &self.result {
            PanelResult::Success { report } => {
                for line in report.lines() {
                    out.push_str(&line);
                    out.push('\n');
                }
            }
            PanelResult::Error { message } => {
                out.push_str(message);
                out.push('\n');
            }
        }
        out
    }
}

/// Destination for an exported result panel
pub trait ReportExporter {
    fn export(&self, panel: &ResultPanel, path: &Path) -> Result<()>;
}

/// Writes `report.json` and `report.txt` into a zip archive
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipReportExporter;

impl ReportExporter for ZipReportExporter {
    fn export(&self, panel: &ResultPanel, path: &Path) -> Result<()> {
        use zip::write::SimpleFileOptions;
        use zip::ZipWriter;

        let json = serde_json::to_string_pretty(panel).context("Failed to serialize report")?;
        let text = panel.to_text();

        let zip_file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create zip file: {}", path.display()))?;

        let mut zip = ZipWriter::new(zip_file);
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(0o644);

        for (name, content) in [("report.json", json), ("report.txt", text)] {
            zip.start_file(name, options)
                .with_context(|| format!("Failed to add {} to zip", name))?;
            zip.write_all(content.as_bytes())?;
        }

        zip.finish().context("Failed to finalize zip file")?;
        Ok(())
    }
}

/// Hand the panel to an exporter
pub fn export_report(
    panel: &ResultPanel,
    path: &Path,
    exporter: &dyn ReportExporter,
) -> Result<PathBuf> {
    exporter.export(panel, path)?;
    info!(path = %path.display(), "Report exported");
    Ok(path.to_path_buf())
}

/// Downloads directory if known, else home, else the working directory
pub fn default_export_path() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_EXPORT_NAME)
}
