//! # Commands
//!
//! One function per desk operation. Commands take stores and reference data by
//! reference, do the work, and describe the outcome in a [`CmdResult`]:
//! rendered views to show, records the operation removed (so the caller can
//! offer an undo), and leveled messages.
//!
//! Expected business rejections (bad input, duplicates, unknown keys, expired
//! orders) become error-level messages via [`rejected`]; the command still
//! returns `Ok`. Only failures the session cannot recover from come back as
//! `Err`.

use std::fmt::Display;

use crate::error::{RegdeskError, Result};
use crate::model::{Customer, FeastOrder, Registration};
use crate::persist::ListBackend;
use crate::store::{Record, RecordStore, Removed};

pub mod feasts;
pub mod registrations;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A record taken out of a store by a command, with the position to put it
/// back at.
#[derive(Debug, Clone, PartialEq)]
pub enum Affected {
    Registration(Removed<Registration>),
    Customer(Removed<Customer>),
    Order(Removed<FeastOrder>),
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub views: Vec<String>,
    pub affected: Vec<Affected>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn add_view(&mut self, view: impl Into<String>) {
        self.views.push(view.into());
    }

    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.views.push(view.into());
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected(mut self, affected: Affected) -> Self {
        self.affected.push(affected);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}

/// Reports a business rejection as an error message. Anything else is passed
/// through as a hard failure.
pub fn rejected(action: impl Display, err: RegdeskError) -> Result<CmdResult> {
    if err.is_rejection() {
        Ok(CmdResult::default().with_message(fail(action, err)))
    } else {
        Err(err)
    }
}

fn fail(action: impl Display, reason: impl Display) -> CmdMessage {
    CmdMessage::error(format!("Fail to {}\nReason: {}", action, reason))
}

/// Writes a whole store through its backend. Write failures are reported as
/// messages; the store is never touched.
pub fn save_list<R, B>(backend: &B, store: &RecordStore<R>, list_name: &str) -> Result<CmdResult>
where
    R: Record,
    B: ListBackend<R> + ?Sized,
{
    let mut result = CmdResult::default();
    match backend.save(store.records()) {
        Ok(()) => result.add_message(CmdMessage::success(format!(
            "Saved {} {} to {}",
            store.len(),
            list_name,
            backend.location()
        ))),
        Err(e) => result.add_message(fail(format!("save the {}", list_name), e)),
    }
    Ok(result)
}
