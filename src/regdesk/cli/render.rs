//! Terminal output for command results and menus.
//!
//! Views are printed as-is; messages get a `>>` prefix and a color per level.

use std::io::{self, Write};

use colored::Colorize;
use regdesk::commands::{CmdMessage, CmdResult, MessageLevel};

const LINE_WIDTH: usize = 100;

pub(super) fn write_line<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(LINE_WIDTH))
}

pub(super) fn write_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        let text = format!(">>{}", message.content);
        match message.level {
            MessageLevel::Info => writeln!(out, "{}", text.dimmed())?,
            MessageLevel::Success => writeln!(out, "{}", text.green())?,
            MessageLevel::Warning => writeln!(out, "{}", text.yellow())?,
            MessageLevel::Error => writeln!(out, "{}", text.red())?,
        }
    }
    Ok(())
}

pub(super) fn write_result<W: Write>(out: &mut W, result: &CmdResult) -> io::Result<()> {
    for view in &result.views {
        writeln!(out, "{}", view)?;
    }
    write_messages(out, &result.messages)
}

/// Prints a titled, numbered option list (`  01. Option`).
pub(super) fn write_menu<W: Write>(out: &mut W, title: &str, options: &[&str]) -> io::Result<()> {
    writeln!(out, ">>{}", title.bold())?;
    for (i, option) in options.iter().enumerate() {
        writeln!(out, "  {:02}. {}", i + 1, option)?;
    }
    Ok(())
}
