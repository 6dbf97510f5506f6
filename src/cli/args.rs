//! Command-line argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::production::{DataSource, DEFAULT_BOUNDARIES_URL, DEFAULT_DATA_PATH, DEFAULT_REGION_KEY};

/// Default recommendation server
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// CropSense - crop observations in, agronomy recommendations out
#[derive(Parser, Debug)]
#[command(name = "cropsense")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the recommendation service
    #[arg(long, global = true, env = "CROPSENSE_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Log filter directive (e.g. "info" or "cropsense=debug").
    /// Falls back to RUST_LOG, then "warn".
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log output to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk through the observation wizard and request a recommendation (default)
    Advise(AdviseArgs),

    /// Show crop production per region with the top producers
    Map(MapArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct AdviseArgs {
    /// Export the result panel to this zip file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MapArgs {
    /// Boundary GeoJSON (URL or path)
    #[arg(long, default_value = DEFAULT_BOUNDARIES_URL)]
    pub boundaries: String,

    /// Production dataset, JSON array or CSV (URL or path)
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: String,

    /// Crop to show. Defaults to the first crop alphabetically.
    #[arg(long)]
    pub crop: Option<String>,

    /// Region to inspect, as if hovered on the map
    #[arg(long)]
    pub region: Option<String>,

    /// Feature property holding the region name
    #[arg(long, default_value = DEFAULT_REGION_KEY)]
    pub region_key: String,

    /// Skip interactive prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,
}

/// What the binary should do
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Advise {
        export: Option<PathBuf>,
        no_confirm: bool,
    },
    Map {
        boundaries: DataSource,
        data: DataSource,
        crop: Option<String>,
        region: Option<String>,
        region_key: String,
        no_confirm: bool,
    },
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub mode: Mode,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        let mode = match &self.command {
            None => Mode::Advise {
                export: None,
                no_confirm: false,
            },
            Some(Commands::Advise(args)) => Mode::Advise {
                export: args.export.clone(),
                no_confirm: args.no_confirm,
            },
            Some(Commands::Map(args)) => Mode::Map {
                boundaries: DataSource::parse(&args.boundaries),
                data: DataSource::parse(&args.data),
                crop: args.crop.clone(),
                region: args.region.clone(),
                region_key: args.region_key.clone(),
                no_confirm: args.no_confirm,
            },
        };

        Settings {
            server_url: self.server_url.trim_end_matches('/').to_string(),
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_advise() {
        let cli = Cli::try_parse_from(["cropsense", "--server-url", "http://host:9000/"]).unwrap();
        let settings = cli.settings();
        assert_eq!(settings.server_url, "http://host:9000");
        assert_eq!(
            settings.mode,
            Mode::Advise {
                export: None,
                no_confirm: false
            }
        );
    }

    #[test]
    fn test_map_defaults() {
        let cli = Cli::try_parse_from(["cropsense", "map", "--crop", "Rice"]).unwrap();
        match cli.settings().mode {
            Mode::Map {
                boundaries,
                data,
                crop,
                region_key,
                ..
            } => {
                assert_eq!(boundaries, DataSource::Url(DEFAULT_BOUNDARIES_URL.to_string()));
                assert_eq!(data, DataSource::Path(PathBuf::from(DEFAULT_DATA_PATH)));
                assert_eq!(crop.as_deref(), Some("Rice"));
                assert_eq!(region_key, "ST_NM");
            }
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn test_global_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["cropsense", "advise", "--log-level", "debug", "--no-confirm"])
                .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(
            cli.settings().mode,
            Mode::Advise {
                no_confirm: true,
                ..
            }
        ));
    }
}
