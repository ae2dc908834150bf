use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use portfolio_core::ActivationPolicy;

use super::logging::LogDestination;

/// Plays the portfolio page's animated stats in the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// RON file with page settings; defaults are used when absent.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    /// Overrides when counters start.
    #[arg(long, value_enum)]
    pub activation: Option<ActivationArg>,

    /// Overrides the scroll offset applied after mount, in pixels.
    #[arg(long)]
    pub scroll_to: Option<f64>,

    /// Writes the final view model as JSON to this path.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActivationArg {
    OnMount,
    OnVisible,
}

impl From<ActivationArg> for ActivationPolicy {
    fn from(arg: ActivationArg) -> Self {
        match arg {
            ActivationArg::OnMount => ActivationPolicy::OnMount,
            ActivationArg::OnVisible => ActivationPolicy::OnVisible,
        }
    }
}
