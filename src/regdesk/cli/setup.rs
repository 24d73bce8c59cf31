use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "regdesk", bin_name = "regdesk", version)]
#[command(about = "Menu-driven registration and feast-order desks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub desk: Desk,

    /// Directory holding the data files (defaults to the current directory)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (defaults to <DATA_DIR>/regdesk.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Desk {
    /// Student registrations for mountain trips
    #[command(alias = "reg")]
    Registrations,

    /// Customers and feast orders
    #[command(alias = "feast")]
    Feasts,
}

impl Cli {
    /// Log filter used when `REGDESK_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
