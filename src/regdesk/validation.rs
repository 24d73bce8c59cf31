//! Field validation for regdesk input.
//!
//! Every check is a pure function returning `Ok(normalized_value)` or a
//! [`ValidationError`] carrying the field name and a human-readable reason.
//! Nothing here loops or prompts: re-asking the user is the terminal's job.
//!
//! Rules:
//! - Input is trimmed before matching; empty input is always rejected
//! - Patterns are whole-string matches
//! - Dates use `dd/mm/yyyy` and are checked against the real calendar
//!   (`30/02/2030` is rejected even though it has the right shape)

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

static STUDENT_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[SHDQC]E[0-9]{6}$").unwrap());
static CAMPUS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[SHDQC]E$").unwrap());
// Word and space classes are ASCII only.
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]*((?-u:\s)[A-Z][a-z]*)*$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.\-]+@([A-Za-z0-9_\-]+\.)+[A-Za-z0-9_\-]{2,4}$").unwrap()
});
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(84|0[0-9])+[0-9]{8}$").unwrap());
static CUSTOMER_PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(84|0[35789])+[0-9]{8}$").unwrap());
static PHONE_SEARCH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static CUSTOMER_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[CGK][0-9]{4}$").unwrap());
static MENU_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^PW[0-9]{3}$").unwrap());
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").unwrap());
static VIETTEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(03[2-9]|086|09[6-8])[0-9]{7}$").unwrap());
static VNPT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^08[1-5][0-9]{7}$").unwrap());
static YES_NO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[yYnN]$").unwrap());

/// The fixed input shapes regdesk accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Campus letter, `E`, six digits (`SE123456`).
    StudentId,
    /// Campus prefix of a student id (`SE`).
    Campus,
    /// Capitalized words separated by single spaces.
    Name,
    Email,
    /// `84` or `0x` prefix followed by eight digits.
    Phone,
    /// Like [`Pattern::Phone`] but restricted to mobile operator prefixes.
    CustomerPhone,
    /// Ten bare digits, used when searching customers by phone.
    PhoneSearch,
    /// `C`, `G` or `K` followed by four digits.
    CustomerCode,
    /// `PW` followed by three digits.
    MenuCode,
    Date,
}

impl Pattern {
    pub fn regex(self) -> &'static Regex {
        match self {
            Pattern::StudentId => &STUDENT_ID_RE,
            Pattern::Campus => &CAMPUS_RE,
            Pattern::Name => &NAME_RE,
            Pattern::Email => &EMAIL_RE,
            Pattern::Phone => &PHONE_RE,
            Pattern::CustomerPhone => &CUSTOMER_PHONE_RE,
            Pattern::PhoneSearch => &PHONE_SEARCH_RE,
            Pattern::CustomerCode => &CUSTOMER_CODE_RE,
            Pattern::MenuCode => &MENU_CODE_RE,
            Pattern::Date => &DATE_RE,
        }
    }

    pub fn is_match(self, input: &str) -> bool {
        self.regex().is_match(input)
    }

    fn hint(self) -> &'static str {
        match self {
            Pattern::StudentId => "a campus code (S, H, D, Q, C), 'E' and six digits",
            Pattern::Campus => "one of SE, HE, DE, QE, CE",
            Pattern::Name => "capitalized words separated by single spaces",
            Pattern::Email => "a valid email address",
            Pattern::Phone => "a phone number starting with 84 or 0 and ten digits long",
            Pattern::CustomerPhone => "a mobile number starting with 84, 03, 05, 07, 08 or 09",
            Pattern::PhoneSearch => "exactly ten digits",
            Pattern::CustomerCode => "C, G or K followed by four digits",
            Pattern::MenuCode => "PW followed by three digits",
            Pattern::Date => "a date in dd/mm/yyyy format",
        }
    }
}

/// A rejected input: which field, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid input for {}: {}", self.field, self.reason)
    }
}

impl std::error::Error for ValidationError {}

pub type Validated<T> = std::result::Result<T, ValidationError>;

fn non_empty<'a>(field: &str, raw: &'a str) -> Validated<&'a str> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(ValidationError::new(field, "Input must be a non-empty string!"));
    }
    Ok(input)
}

/// Validates `raw` against one of the fixed patterns.
///
/// # Examples
/// ```
/// use regdesk::validation::{validate, Pattern};
///
/// assert_eq!(validate("student id", " SE123456 ", Pattern::StudentId).unwrap(), "SE123456");
/// assert!(validate("student id", "SA123456", Pattern::StudentId).is_err());
/// assert!(validate("menu code", "PW001", Pattern::MenuCode).is_ok());
/// ```
pub fn validate(field: &str, raw: &str, pattern: Pattern) -> Validated<String> {
    let input = non_empty(field, raw)?;
    if !pattern.is_match(input) {
        return Err(ValidationError::new(
            field,
            format!("The {} must be {}!", field, pattern.hint()),
        ));
    }
    Ok(input.to_string())
}

/// Validates a person name: the [`Pattern::Name`] shape plus a length window.
pub fn validate_name(field: &str, raw: &str, min_len: usize, max_len: usize) -> Validated<String> {
    let input = non_empty(field, raw)?;
    let len = input.chars().count();
    if len < min_len || len > max_len {
        return Err(ValidationError::new(
            field,
            format!(
                "The {} must have a length between {} and {}!",
                field, min_len, max_len
            ),
        ));
    }
    validate(field, input, Pattern::Name)
}

/// Parses a `dd/mm/yyyy` date, rejecting impossible calendar days.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let input = raw.trim();
    if !Pattern::Date.is_match(input) {
        return None;
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).ok()
}

pub fn validate_date(field: &str, raw: &str) -> Validated<NaiveDate> {
    let input = non_empty(field, raw)?;
    parse_date(input)
        .ok_or_else(|| ValidationError::new(field, "Wrong format or value for date!"))
}

/// Accepts only a valid date strictly after `today`.
///
/// Returns the date in its canonical `dd/mm/yyyy` text form.
pub fn validate_future_date(field: &str, raw: &str, today: NaiveDate) -> Validated<String> {
    let date = validate_date(field, raw)?;
    if date <= today {
        return Err(ValidationError::new(field, "The date must be in the future!"));
    }
    Ok(date.format(DATE_FORMAT).to_string())
}

pub fn validate_choice(field: &str, raw: &str, min: i64, max: i64) -> Validated<i64> {
    let input = non_empty(field, raw)?;
    let value: i64 = input
        .parse()
        .map_err(|_| ValidationError::new(field, "Input format must be an integer!"))?;
    if value < min || value > max {
        return Err(ValidationError::new(
            field,
            format!("The {} must be between {} and {}!", field, min, max),
        ));
    }
    Ok(value)
}

pub fn validate_positive(field: &str, raw: &str) -> Validated<u32> {
    let input = non_empty(field, raw)?;
    let value: i64 = input
        .parse()
        .map_err(|_| ValidationError::new(field, "Input format must be an integer!"))?;
    if value <= 0 || value > i64::from(u32::MAX) {
        return Err(ValidationError::new(
            field,
            format!("The {} must be a positive integer!", field),
        ));
    }
    Ok(value as u32)
}

pub fn validate_yes_no(raw: &str) -> Validated<bool> {
    let input = raw.trim();
    if !YES_NO_RE.is_match(input) {
        return Err(ValidationError::new(
            "boolean input for question",
            "The input format must be in [y/n]!",
        ));
    }
    Ok(input.eq_ignore_ascii_case("y"))
}

pub fn is_viettel(phone: &str) -> bool {
    VIETTEL_RE.is_match(phone)
}

pub fn is_vnpt(phone: &str) -> bool {
    VNPT_RE.is_match(phone)
}
