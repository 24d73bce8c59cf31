//! # CLI Behavior
//!
//! This is **one possible UI client** for the desks, not the application itself.
//! It is the only place that reads stdin, writes stdout, or picks an exit code.
//!
//! ## Session
//!
//! `regdesk <desk>` loads the reference files and the saved lists, then loops
//! over a numbered menu until the user quits:
//!
//! - Every prompt retries until the input validates (see `terminal.rs`).
//! - Deletions show the removed record and ask for confirmation; answering
//!   `n` puts the record back.
//! - Quitting with unsaved changes asks whether to save first.
//! - If stdin closes mid-session the run ends with an error. Nothing is saved.
//!
//! ## Output
//!
//! Tables and cards go to stdout as rendered by `regdesk::views`. Messages are
//! prefixed with `>>` and colored by level when stdout is a terminal. Logs go
//! to stderr, filtered by `REGDESK_LOG` or `-v`/`-vv`.

mod commands;
mod feasts;
mod registrations;
mod render;
pub mod setup;
mod terminal;

pub use commands::run;
