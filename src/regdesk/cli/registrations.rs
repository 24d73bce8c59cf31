//! Menu loop for the registration desk.

use std::io::{BufRead, Write};

use regdesk::api::RegistrationDesk;
use regdesk::commands::{Affected, CmdMessage, CmdResult};
use regdesk::error::Result;
use regdesk::model::{Registration, RegistrationField, REGISTRATION_NAME_LEN};
use regdesk::persist::ListBackend;
use regdesk::validation::Pattern;

use super::render;
use super::terminal::Prompter;

const TITLE: &str = "Mountain Hiking Registration";

const MENU: [&str; 9] = [
    "New Registration.",
    "Update Registration Information.",
    "Display Registered List.",
    "Delete Registration Information.",
    "Search Participants by Name.",
    "Filter Data by Campus.",
    "Statistics of Registration Numbers by Location.",
    "Save Data to File.",
    "Exit the Program.",
];

const UPDATE_OPTIONS: [&str; 4] = [
    "Student name.",
    "Student phone number.",
    "Student email.",
    "Mountain code.",
];

pub(super) fn session<B, R, W>(desk: &mut RegistrationDesk<B>, term: &mut Prompter<R, W>) -> Result<()>
where
    B: ListBackend<Registration>,
    R: BufRead,
    W: Write,
{
    writeln!(term.out(), "\n{}", TITLE)?;
    loop {
        render::write_line(term.out())?;
        let choice = term.menu("Menu Options", &MENU, "menu choice")?;
        render::write_line(term.out())?;
        writeln!(term.out(), ">>{}", MENU[choice - 1])?;

        match choice {
            1 => add(desk, term)?,
            2 => update(desk, term)?,
            3 => term.show(&desk.list()?)?,
            4 => delete(desk, term)?,
            5 => {
                let name = term.prompt_name("student name", REGISTRATION_NAME_LEN)?;
                term.show(&desk.search_by_name(&name)?)?;
            }
            6 => {
                let campus = term.prompt_pattern("campus", Pattern::Campus)?;
                term.show(&desk.search_by_campus(&campus)?)?;
            }
            7 => term.show(&desk.statistics()?)?,
            8 => {
                term.show(&desk.save()?)?;
                continue;
            }
            _ => {
                if desk.has_unsaved_changes() && term.prompt_confirm("save the current changes")? {
                    term.show(&desk.save()?)?;
                }
                writeln!(term.out(), "Thank you for using the registration management program!")?;
                return Ok(());
            }
        }

        render::write_line(term.out())?;
        term.pause()?;
    }
}

/// Lists the mountains and returns the code of the chosen one, or `None`
/// when there is nothing to choose from.
fn choose_mountain<B, R, W>(desk: &RegistrationDesk<B>, term: &mut Prompter<R, W>) -> Result<Option<String>>
where
    B: ListBackend<Registration>,
    R: BufRead,
    W: Write,
{
    if desk.mountains().is_empty() {
        term.show(&CmdResult::default().with_message(CmdMessage::error(
            "Can not read mountains from file. Please check it!",
        )))?;
        return Ok(None);
    }
    writeln!(term.out(), ">>Mountain List\n{}", desk.mountain_list())?;
    let index = term.prompt_choice("mountain code", 1, desk.mountains().len() as i64)?;
    Ok(Some(desk.mountains()[index as usize - 1].code.clone()))
}

fn add<B, R, W>(desk: &mut RegistrationDesk<B>, term: &mut Prompter<R, W>) -> Result<()>
where
    B: ListBackend<Registration>,
    R: BufRead,
    W: Write,
{
    let id = term.prompt_pattern("student ID", Pattern::StudentId)?;
    let name = term.prompt_name("student name", REGISTRATION_NAME_LEN)?;
    let email = term.prompt_pattern("student email", Pattern::Email)?;
    let phone = term.prompt_pattern("student phone", Pattern::Phone)?;
    let Some(mountain) = choose_mountain(desk, term)? else {
        return Ok(());
    };
    let result = desk.add(Registration::new(id, name, email, phone, mountain))?;
    term.show(&result)
}

fn update<B, R, W>(desk: &mut RegistrationDesk<B>, term: &mut Prompter<R, W>) -> Result<()>
where
    B: ListBackend<Registration>,
    R: BufRead,
    W: Write,
{
    let id = term.prompt_pattern("student ID", Pattern::StudentId)?;
    let found = desk.view(&id)?;
    term.show(&found)?;
    if found.has_errors() {
        return Ok(());
    }

    let choice = term.menu("Update Options", &UPDATE_OPTIONS, "update field")?;
    let field = RegistrationField::EDITABLE[choice - 1];
    let value = match field {
        RegistrationField::Name => term.prompt_name("student name", REGISTRATION_NAME_LEN)?,
        RegistrationField::Phone => term.prompt_pattern("student phone number", Pattern::Phone)?,
        RegistrationField::Email => term.prompt_pattern("student email", Pattern::Email)?,
        _ => match choose_mountain(desk, term)? {
            Some(code) => code,
            None => return Ok(()),
        },
    };
    let result = desk.update(&id, field, &value)?;
    term.show(&result)
}

/// Deletes, then offers to take it back.
fn delete<B, R, W>(desk: &mut RegistrationDesk<B>, term: &mut Prompter<R, W>) -> Result<()>
where
    B: ListBackend<Registration>,
    R: BufRead,
    W: Write,
{
    let id = term.prompt_pattern("student ID", Pattern::StudentId)?;
    let mut result = desk.delete(&id)?;
    term.show(&result)?;

    if let Some(Affected::Registration(removed)) = result.affected.pop() {
        if !term.prompt_confirm("delete student")? {
            term.show(&desk.restore(removed)?)?;
        }
    }
    Ok(())
}
