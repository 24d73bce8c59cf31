use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use clap::Parser;
use regdesk::api::{FeastDesk, RegistrationDesk};
use regdesk::commands::{CmdMessage, CmdResult};
use regdesk::config::RegdeskConfig;
use regdesk::error::Result;
use regdesk::model::{Customer, FeastOrder, Registration};
use regdesk::persist::reference::{self, LoadReport};
use regdesk::persist::FsBackend;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::setup::{Cli, Desk};
use super::terminal::Prompter;
use super::{feasts, registrations};

pub const LOG_ENV: &str = "REGDESK_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let config = RegdeskConfig::load(&data_dir, cli.config.as_deref())?;
    let paths = config.resolve(&data_dir);
    debug!(?paths, "resolved data files");

    let mut term = Prompter::new(io::stdin().lock(), io::stdout().lock());
    match cli.desk {
        Desk::Registrations => {
            let mountains = reference::load_mountains(&paths.mountains);
            report_skipped(&mut term, &mountains, "mountain", &paths.mountains)?;
            let backend = FsBackend::<Registration>::new(paths.registrations.clone());
            let mut desk = RegistrationDesk::open(backend, mountains.records);
            registrations::session(&mut desk, &mut term)
        }
        Desk::Feasts => {
            let menus = reference::load_menus(&paths.feast_menus);
            report_skipped(&mut term, &menus, "feast menu", &paths.feast_menus)?;
            let customers = FsBackend::<Customer>::new(paths.customers.clone());
            let orders = FsBackend::<FeastOrder>::new(paths.feast_orders.clone());
            let mut desk = FeastDesk::open(customers, orders, menus.records);
            feasts::session(&mut desk, &mut term)
        }
    }
}

/// Logs go to stderr so they never interleave with the menus on stdout.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn report_skipped<T, R: BufRead, W: Write>(
    term: &mut Prompter<R, W>,
    report: &LoadReport<T>,
    kind: &str,
    path: &Path,
) -> Result<()> {
    if report.skipped == 0 {
        return Ok(());
    }
    term.show(&CmdResult::default().with_message(CmdMessage::warning(format!(
        "Skipped {} malformed {} line(s) in {}",
        report.skipped,
        kind,
        path.display()
    ))))
}
