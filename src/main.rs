//! CropSense: agronomy assistant CLI
//!
//! Collects crop observations through a step wizard, asks the
//! recommendation service for advice and browses regional production.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use cropsense::advisor::{
    HttpRecommendationService, Outcome, RecommendationSession, StepCatalog, LOADING_MESSAGE,
};
use cropsense::cli::{
    confirm_another_crop, confirm_export, run_wizard, select_crop, Cli, Mode, WizardOutcome,
};
use cropsense::production::{CropMap, DataSource};
use cropsense::report::{
    default_export_path, display_choropleth, display_tooltip, display_top_producers,
    export_report, InputSummary, ResultPanel, ZipReportExporter,
};
use cropsense::utils::{
    create_spinner, finish_with_failure, finish_with_success, init_logging, print_banner,
    print_completion, print_count, print_failure, print_info, print_map_header, print_saved,
    print_server, print_step_header,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings();

    init_logging(settings.log_level.as_deref(), settings.log_file.as_deref())?;

    let runtime = Runtime::new().context("Failed to start async runtime")?;

    match settings.mode {
        Mode::Advise { export, no_confirm } => {
            run_advise(&runtime, &settings.server_url, export, no_confirm)
        }
        Mode::Map {
            boundaries,
            data,
            crop,
            region,
            region_key,
            no_confirm,
        } => run_map(
            &runtime,
            &boundaries,
            &data,
            crop.as_deref(),
            region.as_deref(),
            &region_key,
            no_confirm,
        ),
    }
}

fn run_advise(
    runtime: &Runtime,
    server_url: &str,
    export: Option<PathBuf>,
    no_confirm: bool,
) -> Result<()> {
    let catalog = StepCatalog::standard()?;

    let (outcome, mut controller) = run_wizard(catalog)?;
    let request = match outcome {
        WizardOutcome::Submit(request) => request,
        WizardOutcome::Quit => {
            println!("Cancelled by user.");
            return Ok(());
        }
    };

    print_banner(env!("CARGO_PKG_VERSION"));
    print_server(server_url);

    // Step 1: what the user entered
    print_step_header(1, "Observations");
    let summary = InputSummary::from_inputs(controller.inputs());
    summary.display();
    print_count("answers provided", summary.provided_count());

    // Step 2: one request per submission
    print_step_header(2, "Recommendation");
    let service = HttpRecommendationService::new(server_url);
    info!(endpoint = service.endpoint(), "Submitting observations");

    let spinner = create_spinner(LOADING_MESSAGE);
    let mut session = RecommendationSession::new();
    let outcome = runtime.block_on(session.submit(&mut controller, &service, &request));

    match &outcome {
        Outcome::Success(report) => {
            finish_with_success(&spinner, "Recommendation received");
            report.display();
        }
        Outcome::Failure(message) => {
            finish_with_failure(&spinner, "Recommendation failed");
            print_failure(message);
        }
    }

    // Step 3: optional export of the result panel
    let target = match export {
        Some(path) => Some(path),
        None if !no_confirm && confirm_export()? => Some(default_export_path()),
        None => None,
    };

    if let Some(path) = target {
        print_step_header(3, "Export");
        save_result_panel(&controller, &path)?;
    }

    print_completion("Recommendation complete");
    Ok(())
}

fn save_result_panel(
    controller: &cropsense::advisor::WizardController,
    path: &Path,
) -> Result<()> {
    let Some(panel) = ResultPanel::from_view(controller.view()) else {
        warn!("Result panel is empty, nothing to export");
        print_info("Nothing to export yet");
        return Ok(());
    };
    let saved = export_report(&panel, path, &ZipReportExporter)?;
    print_saved(&saved);
    Ok(())
}

fn run_map(
    runtime: &Runtime,
    boundaries: &DataSource,
    data: &DataSource,
    crop: Option<&str>,
    region: Option<&str>,
    region_key: &str,
    no_confirm: bool,
) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));

    print_step_header(1, "Load Datasets");
    println!(
        "      {} {}",
        style("Boundaries:").dim(),
        style(boundaries.label()).cyan()
    );
    println!(
        "      {} {}",
        style("Production:").dim(),
        style(data.label()).cyan()
    );
    println!();

    let spinner = create_spinner("Loading boundaries and production data...");
    let mut map = match runtime.block_on(CropMap::initialize(boundaries, data, region_key)) {
        Ok(map) => {
            finish_with_success(&spinner, "Datasets loaded");
            map
        }
        Err(e) => {
            // The map stays empty; nothing else to show
            finish_with_failure(&spinner, "Error loading required map datasets");
            print_failure(&e.to_string());
            return Ok(());
        }
    };
    print_count("crops available", map.crops().len());

    let mut current = match crop {
        Some(name) => name.to_string(),
        None if !no_confirm => select_crop(map.crops(), map.default_crop())?,
        None => match map.default_crop() {
            Some(name) => name.to_string(),
            None => return Ok(()),
        },
    };

    let mut step = 2;
    loop {
        if let Err(e) = map.render(&current) {
            print_failure(&e.to_string());
        } else {
            print_step_header(step, "Production Map");
            show_crop(&mut map, &current, region)?;
        }

        if no_confirm || !confirm_another_crop()? {
            break;
        }
        current = select_crop(map.crops(), Some(&current))?;
        step = step.saturating_add(1);
    }

    print_completion("Map session complete");
    Ok(())
}

fn show_crop(map: &mut CropMap, crop: &str, region: Option<&str>) -> Result<()> {
    print_map_header(crop);
    display_choropleth(map.shades(), &map.scale());

    if let Some(name) = region {
        let tooltip = map.hover(name, (0.0, 0.0))?;
        display_tooltip(tooltip);
        map.leave();
    }

    display_top_producers(crop, map.top_producers());
    Ok(())
}
