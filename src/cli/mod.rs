//! CLI module - argument parsing, the observation wizard and interactive prompts

pub mod args;
pub mod prompts;
pub mod wizard;

pub use args::{AdviseArgs, Cli, Commands, MapArgs, Mode, Settings, DEFAULT_SERVER_URL};
pub use prompts::*;
pub use wizard::{run_wizard, WizardOutcome, WizardShell};
