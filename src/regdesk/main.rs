//! # Regdesk CLI
//!
//! The binary is thin: the terminal client lives in `cli/`, and this file only
//! invokes `cli::run()` and handles process termination.
//!
//! ```text
//! regdesk [--data-dir DIR] [--config FILE] [-v...] <registrations|feasts>
//! ```
//!
//! The subcommand picks a desk. From then on the session is menu-driven until
//! the user quits or stdin closes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
