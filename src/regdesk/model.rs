//! # Domain Model
//!
//! Transactional records ([`Registration`], [`Customer`], [`FeastOrder`]) live in a
//! [`RecordStore`](crate::store::RecordStore) and implement [`Record`]. Reference
//! records ([`Mountain`], [`FeastMenu`]) are loaded once from delimited text and
//! never change during a session.
//!
//! ## Derived Values
//!
//! A registration's fee is a function of its phone number. The field is private
//! and has no setter: it is computed in [`Registration::new`], recomputed by
//! [`Registration::set_phone`], and recomputed on deserialization, so a stale
//! fee in a data file is never trusted.
//!
//! An order's cost depends on the referenced menu's price, so it is not stored
//! at all; views compute it with [`crate::fee::order_cost`].
//!
//! ## Field Updates
//!
//! [`Record::set_field`] validates the new value with the same rules the
//! terminal uses when collecting it. Cross-record rules (uniqueness, reference
//! existence, expiry) are checked by the store and the command layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RegdeskError, Result};
use crate::fee::registration_fee;
use crate::store::Record;
use crate::validation::{self, Pattern};

pub const REGISTRATION_NAME_LEN: (usize, usize) = (2, 20);
pub const CUSTOMER_NAME_LEN: (usize, usize) = (2, 25);

// --- Registration ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationField {
    StudentId,
    Name,
    Phone,
    Email,
    MountainCode,
}

impl RegistrationField {
    /// Fields a user may change after registering, in menu order.
    pub const EDITABLE: [RegistrationField; 4] = [
        RegistrationField::Name,
        RegistrationField::Phone,
        RegistrationField::Email,
        RegistrationField::MountainCode,
    ];
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegistrationField::StudentId => "student id",
            RegistrationField::Name => "name",
            RegistrationField::Phone => "phone",
            RegistrationField::Email => "email",
            RegistrationField::MountainCode => "mountain code",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    student_id: String,
    name: String,
    email: String,
    phone: String,
    mountain_code: String,
    fee: f64,
}

impl Registration {
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        mountain_code: impl Into<String>,
    ) -> Self {
        let phone = phone.into();
        let fee = registration_fee(&phone);
        Self {
            student_id: student_id.into(),
            name: name.into(),
            email: email.into(),
            phone,
            mountain_code: mountain_code.into(),
            fee,
        }
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn mountain_code(&self) -> &str {
        &self.mountain_code
    }

    pub fn fee(&self) -> f64 {
        self.fee
    }

    /// Campus prefix of the student id (`SE`, `HE`, ...).
    pub fn campus(&self) -> &str {
        self.student_id.get(..2).unwrap_or("")
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
        self.fee = registration_fee(&self.phone);
    }
}

impl<'de> Deserialize<'de> for Registration {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = RegistrationHelper::deserialize(deserializer)?;
        // Any persisted fee is ignored; `new` derives it from the phone.
        Ok(Registration::new(
            helper.student_id,
            helper.name,
            helper.email,
            helper.phone,
            helper.mountain_code,
        ))
    }
}

#[derive(Deserialize)]
struct RegistrationHelper {
    student_id: String,
    name: String,
    email: String,
    phone: String,
    mountain_code: String,
}

impl Record for Registration {
    type Key = String;
    type Field = RegistrationField;

    const KIND: &'static str = "Student";

    fn key(&self) -> String {
        self.student_id.clone()
    }

    fn unique_values(&self) -> Vec<(RegistrationField, String)> {
        vec![
            (RegistrationField::StudentId, self.student_id.clone()),
            (RegistrationField::Email, self.email.clone()),
            (RegistrationField::Phone, self.phone.clone()),
        ]
    }

    fn set_field(&mut self, field: RegistrationField, value: &str) -> Result<()> {
        let label = field.to_string();
        match field {
            RegistrationField::StudentId => {
                return Err(RegdeskError::Store("student id cannot be changed".into()));
            }
            RegistrationField::Name => {
                let (min, max) = REGISTRATION_NAME_LEN;
                self.name = validation::validate_name(&label, value, min, max)?;
            }
            RegistrationField::Phone => {
                let phone = validation::validate(&label, value, Pattern::Phone)?;
                self.set_phone(phone);
            }
            RegistrationField::Email => {
                self.email = validation::validate(&label, value, Pattern::Email)?;
            }
            RegistrationField::MountainCode => {
                let code = value.trim();
                if code.is_empty() {
                    return Err(validation::ValidationError::new(
                        label,
                        "Input must be a non-empty string!",
                    )
                    .into());
                }
                self.mountain_code = code.to_string();
            }
        }
        Ok(())
    }
}

// --- Customer ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    Code,
    Name,
    Phone,
    Email,
}

impl CustomerField {
    pub const EDITABLE: [CustomerField; 3] =
        [CustomerField::Name, CustomerField::Phone, CustomerField::Email];
}

impl fmt::Display for CustomerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CustomerField::Code => "customer code",
            CustomerField::Name => "customer name",
            CustomerField::Phone => "phone number",
            CustomerField::Email => "email",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    code: String,
    name: String,
    email: String,
    phone: String,
}

impl Customer {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// The last word of the name. Customers sort by it.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().last().unwrap_or("")
    }
}

impl Record for Customer {
    type Key = String;
    type Field = CustomerField;

    const KIND: &'static str = "Customer";

    fn key(&self) -> String {
        self.code.clone()
    }

    fn unique_values(&self) -> Vec<(CustomerField, String)> {
        vec![(CustomerField::Code, self.code.clone())]
    }

    fn set_field(&mut self, field: CustomerField, value: &str) -> Result<()> {
        let label = field.to_string();
        match field {
            CustomerField::Code => {
                return Err(RegdeskError::Store("customer code cannot be changed".into()));
            }
            CustomerField::Name => {
                let (min, max) = CUSTOMER_NAME_LEN;
                self.name = validation::validate_name(&label, value, min, max)?;
            }
            CustomerField::Phone => {
                self.phone = validation::validate(&label, value, Pattern::CustomerPhone)?;
            }
            CustomerField::Email => {
                self.email = validation::validate(&label, value, Pattern::Email)?;
            }
        }
        Ok(())
    }
}

// --- Feast order ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    /// The (customer, menu, event date) triple. Compared as a whole.
    Booking,
    MenuCode,
    Tables,
    EventDate,
}

impl OrderField {
    pub const EDITABLE: [OrderField; 3] =
        [OrderField::MenuCode, OrderField::Tables, OrderField::EventDate];
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderField::Id => "order id",
            OrderField::Booking => "customer code, menu code and event date",
            OrderField::MenuCode => "set menu code",
            OrderField::Tables => "number of tables",
            OrderField::EventDate => "event date",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeastOrder {
    id: u32,
    customer_code: String,
    menu_code: String,
    event_date: String,
    tables: u32,
}

impl FeastOrder {
    pub fn new(
        id: u32,
        customer_code: impl Into<String>,
        menu_code: impl Into<String>,
        event_date: impl Into<String>,
        tables: u32,
    ) -> Self {
        Self {
            id,
            customer_code: customer_code.into(),
            menu_code: menu_code.into(),
            event_date: event_date.into(),
            tables,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn customer_code(&self) -> &str {
        &self.customer_code
    }

    pub fn menu_code(&self) -> &str {
        &self.menu_code
    }

    pub fn event_date(&self) -> &str {
        &self.event_date
    }

    pub fn tables(&self) -> u32 {
        self.tables
    }

    /// Calendar date of the event, or `None` if the stored text is malformed.
    pub fn event_day(&self) -> Option<chrono::NaiveDate> {
        validation::parse_date(&self.event_date)
    }

    fn booking(&self) -> String {
        format!("{}, {}, {}", self.customer_code, self.menu_code, self.event_date)
    }
}

impl Record for FeastOrder {
    type Key = u32;
    type Field = OrderField;

    const KIND: &'static str = "Feast order";

    fn key(&self) -> u32 {
        self.id
    }

    fn unique_values(&self) -> Vec<(OrderField, String)> {
        vec![
            (OrderField::Id, self.id.to_string()),
            (OrderField::Booking, self.booking()),
        ]
    }

    fn set_field(&mut self, field: OrderField, value: &str) -> Result<()> {
        let label = field.to_string();
        match field {
            OrderField::Id | OrderField::Booking => {
                return Err(RegdeskError::Store(format!("{} cannot be changed", label)));
            }
            OrderField::MenuCode => {
                self.menu_code = validation::validate(&label, value, Pattern::MenuCode)?;
            }
            OrderField::Tables => {
                self.tables = validation::validate_positive(&label, value)?;
            }
            OrderField::EventDate => {
                validation::validate_date(&label, value)?;
                self.event_date = value.trim().to_string();
            }
        }
        Ok(())
    }
}

// --- Reference data ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mountain {
    pub code: String,
    pub name: String,
    pub province: String,
    pub description: Option<String>,
}

impl Mountain {
    /// Numeric codes render zero-padded to two digits; others as-is.
    pub fn display_code(&self) -> String {
        display_mountain_code(&self.code)
    }
}

pub fn display_mountain_code(code: &str) -> String {
    match code.trim().parse::<u32>() {
        Ok(n) => format!("{:02}", n),
        Err(_) => code.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeastMenu {
    pub code: String,
    pub name: String,
    pub price: f64,
    pub ingredients: Vec<String>,
}

/// Per-mountain accumulator used by the statistics view.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistic {
    pub code: String,
    pub participants: usize,
    pub total_fee: f64,
}

impl Statistic {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            participants: 0,
            total_fee: 0.0,
        }
    }

    pub fn add(&mut self, fee: f64) {
        self.participants += 1;
        self.total_fee += fee;
    }
}
