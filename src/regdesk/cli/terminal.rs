//! Prompting with retry.
//!
//! Every prompt loops until the input validates. Rejected input is explained
//! and asked for again; only end of input or a broken writer gets out early.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use regdesk::commands::CmdResult;
use regdesk::error::{RegdeskError, Result};
use regdesk::validation::{self, Pattern, Validated};

use super::render;

const REMINDER: &str = "##Reminder: Press [enter] to go back to menu: ";

pub struct Prompter<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(RegdeskError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn ask<T>(&mut self, prompt: &str, check: impl Fn(&str) -> Validated<T>) -> Result<T> {
        loop {
            write!(self.out, "{}", prompt)?;
            self.out.flush()?;
            let line = self.read_line()?;
            match check(&line) {
                Ok(value) => {
                    writeln!(self.out)?;
                    return Ok(value);
                }
                Err(e) => write!(
                    self.out,
                    "\n>>Invalid input for {}!\nReason: {}\n\n",
                    e.field, e.reason
                )?,
            }
        }
    }

    fn ask_input<T>(&mut self, field: &str, check: impl Fn(&str) -> Validated<T>) -> Result<T> {
        let prompt = format!("~~Please enter the input for {}: ", field);
        self.ask(&prompt, check)
    }

    pub fn prompt_choice(&mut self, field: &str, min: i64, max: i64) -> Result<i64> {
        self.ask_input(field, |raw| validation::validate_choice(field, raw, min, max))
    }

    pub fn prompt_pattern(&mut self, field: &str, pattern: Pattern) -> Result<String> {
        self.ask_input(field, |raw| validation::validate(field, raw, pattern))
    }

    pub fn prompt_name(&mut self, field: &str, (min, max): (usize, usize)) -> Result<String> {
        self.ask_input(field, |raw| validation::validate_name(field, raw, min, max))
    }

    pub fn prompt_positive(&mut self, field: &str) -> Result<u32> {
        self.ask_input(field, |raw| validation::validate_positive(field, raw))
    }

    /// Asks for a `dd/mm/yyyy` date strictly after `today`.
    pub fn prompt_future_date(&mut self, event: &str, today: NaiveDate) -> Result<String> {
        self.ask_input(event, |raw| validation::validate_future_date(event, raw, today))
    }

    pub fn prompt_confirm(&mut self, action: &str) -> Result<bool> {
        let prompt = format!("~~Please confirm that you want to {}? [y/n]: ", action);
        self.ask(&prompt, validation::validate_yes_no)
    }

    pub fn show(&mut self, result: &CmdResult) -> Result<()> {
        render::write_result(&mut self.out, result)?;
        Ok(())
    }

    /// Prints a numbered option list and returns the 1-based choice.
    pub fn menu(&mut self, title: &str, options: &[&str], field: &str) -> Result<usize> {
        render::write_menu(&mut self.out, title, options)?;
        let choice = self.prompt_choice(field, 1, options.len() as i64)?;
        Ok(choice as usize)
    }

    /// Waits for the user to press enter.
    pub fn pause(&mut self) -> Result<()> {
        write!(self.out, "{}", REMINDER)?;
        self.out.flush()?;
        self.read_line()?;
        writeln!(self.out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn choice_retries_until_in_range() {
        let mut p = prompter("abc\n12\n3\n");
        assert_eq!(p.prompt_choice("menu choice", 1, 9).unwrap(), 3);
        let out = output(p);
        assert!(out.contains("Input format must be an integer!"));
        assert!(out.contains("The menu choice must be between 1 and 9!"));
        assert_eq!(out.matches("~~Please enter the input for menu choice: ").count(), 3);
    }

    #[test]
    fn pattern_input_is_trimmed() {
        let mut p = prompter("  SE123456  \n");
        assert_eq!(p.prompt_pattern("student id", Pattern::StudentId).unwrap(), "SE123456");
    }

    #[test]
    fn name_rejects_short_then_accepts() {
        let mut p = prompter("A\nAn Nguyen\n");
        assert_eq!(p.prompt_name("student name", (2, 20)).unwrap(), "An Nguyen");
        assert!(output(p).contains(">>Invalid input for student name!"));
    }

    #[test]
    fn future_date_rejects_past_and_impossible_days() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let mut p = prompter("30/02/2027\n01/06/2026\n02/06/2026\n");
        assert_eq!(p.prompt_future_date("event date", today).unwrap(), "02/06/2026");
        let out = output(p);
        assert!(out.contains("Wrong format or value for date!"));
        assert!(out.contains("The date must be in the future!"));
    }

    #[test]
    fn confirm_accepts_either_case() {
        let mut p = prompter("maybe\nY\n");
        assert!(p.prompt_confirm("delete student").unwrap());
        let out = output(p);
        assert!(out.contains("~~Please confirm that you want to delete student? [y/n]: "));
        assert!(out.contains("The input format must be in [y/n]!"));
    }

    #[test]
    fn end_of_input_closes_the_session() {
        let mut p = prompter("0\n");
        let err = p.prompt_positive("number of tables").unwrap_err();
        assert!(matches!(err, RegdeskError::InputClosed));
    }
}
