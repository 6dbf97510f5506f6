//! Terminal styling utilities

use console::{style, Emoji};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static SEEDLING: Emoji<'_, '_> = Emoji("🌱 ", ">> ");
pub static SERVER: Emoji<'_, '_> = Emoji("🛰️  ", "");
pub static MAP: Emoji<'_, '_> = Emoji("🗺️  ", "");
pub static DATA: Emoji<'_, '_> = Emoji("📊 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
     ██████╗██████╗  ██████╗ ██████╗ ███████╗███████╗███╗   ██╗███████╗███████╗
    ██╔════╝██╔══██╗██╔═══██╗██╔══██╗██╔════╝██╔════╝████╗  ██║██╔════╝██╔════╝
    ██║     ██████╔╝██║   ██║██████╔╝███████╗█████╗  ██╔██╗ ██║███████╗█████╗
    ██║     ██╔══██╗██║   ██║██╔═══╝ ╚════██║██╔══╝  ██║╚██╗██║╚════██║██╔══╝
    ╚██████╗██║  ██║╚██████╔╝██║     ███████║███████╗██║ ╚████║███████║███████╗
     ╚═════╝╚═╝  ╚═╝ ╚═════╝ ╚═╝     ╚══════╝╚══════╝╚═╝  ╚═══╝╚══════╝╚══════╝
    "#;

    println!();
    println!("{}", style(banner).green().bold());
    println!(
        "    {} {}",
        style("🌾").green().bold(),
        style("Field observations in, agronomy advice out").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the connection card for the advisor
pub fn print_server(server_url: &str) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Recommendation service").cyan().bold(),
        " ".repeat(box_width - 29)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} {:<49}│",
        SERVER,
        truncate_string(server_url, 48)
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an error message
pub fn print_failure(message: &str) {
    println!("    {} {}", style("✗").red().bold(), style(message).red());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize) {
    println!(
        "      {} {} {}",
        DATA,
        style(count).yellow().bold(),
        description
    );
}

/// Print the final completion message
pub fn print_completion(message: &str) {
    println!();
    println!("    {} {}", SEEDLING, style(message).green().bold());
    println!();
}

/// Print a saved-file notice
pub fn print_saved(path: &std::path::Path) {
    println!(
        "    {} {}",
        SAVE,
        style(truncate_string(&path.display().to_string(), 60)).cyan()
    );
}

/// Print a heading for the map view
pub fn print_map_header(crop: &str) {
    println!();
    println!(
        "    {} {}",
        MAP,
        style(format!("CROP PRODUCTION · {}", crop)).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(count - max_len + 3).collect();
        format!("...{}", tail)
    }
}
