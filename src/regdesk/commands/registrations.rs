//! Registration desk commands.
//!
//! The registration store is keyed by student id and kept sorted by it. A
//! registration must name a mountain from the reference list.

use super::{rejected, Affected, CmdMessage, CmdResult};
use crate::error::{RegdeskError, Result};
use crate::model::{Mountain, Registration, RegistrationField, REGISTRATION_NAME_LEN};
use crate::store::{RecordStore, Removed};
use crate::validation::{self, Pattern};
use crate::views;

pub type RegistrationStore = RecordStore<Registration>;

fn require_mountain(mountains: &[Mountain], code: &str) -> Result<()> {
    if mountains.iter().any(|m| m.code == code) {
        Ok(())
    } else {
        Err(RegdeskError::Reference {
            kind: "mountain",
            code: code.to_string(),
        })
    }
}

/// Re-checks every field of a registration built outside the terminal.
fn check(reg: &Registration) -> Result<()> {
    let (min, max) = REGISTRATION_NAME_LEN;
    validation::validate("student id", reg.student_id(), Pattern::StudentId)?;
    validation::validate_name("name", reg.name(), min, max)?;
    validation::validate("email", reg.email(), Pattern::Email)?;
    validation::validate("phone", reg.phone(), Pattern::Phone)?;
    Ok(())
}

pub fn add(
    store: &mut RegistrationStore,
    mountains: &[Mountain],
    registration: Registration,
) -> Result<CmdResult> {
    let action = format!("create student with id [{}]", registration.student_id());
    let created = check(&registration)
        .and_then(|_| require_mountain(mountains, registration.mountain_code()))
        .and_then(|_| store.create(registration));

    match created {
        Ok(reg) => Ok(CmdResult::default()
            .with_view(views::registration_card(reg))
            .with_message(CmdMessage::success(format!(
                "Create student with id [{}] successfully!",
                reg.student_id()
            )))),
        Err(e) => rejected(action, e),
    }
}

pub fn view(store: &RegistrationStore, student_id: &str) -> Result<CmdResult> {
    match store.retrieve(&student_id.to_string()) {
        Ok(reg) => Ok(CmdResult::default().with_view(views::registration_card(reg))),
        Err(e) => rejected("find student", e),
    }
}

pub fn update(
    store: &mut RegistrationStore,
    mountains: &[Mountain],
    student_id: &str,
    field: RegistrationField,
    value: &str,
) -> Result<CmdResult> {
    let action = format!("update {} of student with id [{}]", field, student_id);
    if field == RegistrationField::MountainCode {
        if let Err(e) = require_mountain(mountains, value.trim()) {
            return rejected(action, e);
        }
    }

    let key = student_id.to_string();
    match store.update(&key, field, value) {
        Ok(_) => {
            let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
                "Update [{}] of student with id [{}] successfully!",
                field, student_id
            )));
            if let Ok(reg) = store.retrieve(&key) {
                result.add_view(views::registration_card(reg));
            }
            Ok(result)
        }
        Err(e) => rejected(action, e),
    }
}

pub fn list(store: &RegistrationStore) -> Result<CmdResult> {
    Ok(CmdResult::default().with_view(views::registration_table(store.records())))
}

/// Removes a registration. The removed record is returned in
/// [`CmdResult::affected`] so the caller can [`restore`] it.
pub fn delete(store: &mut RegistrationStore, student_id: &str) -> Result<CmdResult> {
    match store.delete(&student_id.to_string()) {
        Ok(removed) => Ok(CmdResult::default()
            .with_view(views::registration_card(&removed.record))
            .with_message(CmdMessage::success(format!(
                "Delete student with id [{}] successfully!",
                removed.record.student_id()
            )))
            .with_affected(Affected::Registration(removed))),
        Err(e) => rejected("delete student", e),
    }
}

/// Puts a deleted registration back at its old position.
pub fn restore(store: &mut RegistrationStore, removed: Removed<Registration>) -> Result<CmdResult> {
    let id = removed.record.student_id().to_string();
    match store.restore(removed) {
        Ok(_) => Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Undo deletion of student with id [{}] successfully!",
            id
        )))),
        Err(e) => rejected(format!("undo deletion of student with id [{}]", id), e),
    }
}

pub fn search_by_name(store: &RegistrationStore, name: &str) -> Result<CmdResult> {
    let name = name.trim();
    let hits = store.retrieve_where(|r| r.name() == name);
    Ok(CmdResult::default().with_view(format!(
        "Registrations filtered by name [{}]\n{}",
        name,
        views::registration_table(hits)
    )))
}

pub fn search_by_campus(store: &RegistrationStore, campus: &str) -> Result<CmdResult> {
    let campus = campus.trim();
    let hits = store.retrieve_where(|r| r.campus() == campus);
    Ok(CmdResult::default().with_view(format!(
        "Registrations filtered by campus [{}]\n{}",
        campus,
        views::registration_table(hits)
    )))
}

pub fn statistics(store: &RegistrationStore, mountains: &[Mountain]) -> Result<CmdResult> {
    let stats = views::statistics(mountains, store.records());
    let mut result = CmdResult::default().with_view(views::statistics_table(&stats));
    if mountains.is_empty() {
        result.add_message(CmdMessage::warning("No mountains are loaded."));
    }
    Ok(result)
}
