//! # Derived Views
//!
//! Read-only projections of store contents: fixed-width tables, detail cards,
//! sorted listings and statistics. Everything here returns a `String` or a
//! fresh `Vec`; nothing mutates a store and nothing writes to the terminal.
//!
//! ## Column Rules
//!
//! | Table | Column | Width | Overflow |
//! |---|---|---|---|
//! | registrations | Student Name | 20 | first 16 + `...` |
//! | registrations | Student Email | 35 | first 31 + `...` |
//! | customers | Customer Name | 25 | shown as `Last, First Middle`, first 22 + `..` |
//! | customers | Customer Email | 25 | first 22 + `..` |
//! | customers | Phone Number | 12 | shown as `ddd-ddd-dddd` |
//!
//! Widths are display columns (see `unicode-width`), so names with wide
//! characters still line up. An empty table renders a single `N/A` row.

use std::collections::HashMap;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::fee::order_cost;
use crate::model::{
    display_mountain_code, Customer, FeastMenu, FeastOrder, Mountain, Registration, Statistic,
};
use crate::validation::parse_date;

const CARD_RULE_WIDTH: usize = 50;

/// Cuts `s` to `keep` columns followed by `marker` when it is wider than `max`.
pub fn clip(s: &str, max: usize, keep: usize, marker: &str) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if current + w > keep {
            break;
        }
        result.push(c);
        current += w;
    }
    result.push_str(marker);
    result
}

/// Left-aligns `s` in `width` display columns.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

/// Whole-unit amount with `,` thousands separators: `1250000.4` -> `1,250,000`.
pub fn group_thousands(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn rule(width: usize) -> String {
    "-".repeat(width)
}

fn table(header: String, rows: Vec<String>, empty_row: String) -> String {
    let line = rule(header.width());
    let mut out = vec![line.clone(), header, line.clone()];
    if rows.is_empty() {
        out.push(empty_row);
    } else {
        out.extend(rows);
    }
    out.push(line);
    out.join("\n")
}

// --- Registrations ---

fn registration_row(id: &str, name: &str, email: &str, phone: &str, mountain: &str) -> String {
    format!(
        " {} | {} | {} | {} | {}",
        pad(id, 10),
        pad(name, 20),
        pad(email, 35),
        pad(phone, 15),
        pad(mountain, 13)
    )
}

pub fn registration_table<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a Registration>,
{
    let rows = records
        .into_iter()
        .map(|r| {
            registration_row(
                r.student_id(),
                &clip(r.name(), 20, 16, "..."),
                &clip(r.email(), 35, 31, "..."),
                r.phone(),
                r.mountain_code(),
            )
        })
        .collect();
    table(
        registration_row(
            "Student ID",
            "Student Name",
            "Student Email",
            "Phone Number",
            "Mountain Code",
        ),
        rows,
        registration_row("N/A", "N/A", "N/A", "N/A", "N/A"),
    )
}

pub fn registration_card(r: &Registration) -> String {
    format!(
        "Student Information\n\
         1. Student id   : {}\n\
         2. Student Name : {}\n\
         3. Email        : {}\n\
         4. Phone        : {}\n\
         5. Mountain Code: {}\n\
         6. Fee          : {} VND",
        r.student_id(),
        r.name(),
        r.email(),
        r.phone(),
        r.mountain_code(),
        group_thousands(r.fee())
    )
}

pub fn mountain_list(mountains: &[Mountain]) -> String {
    mountains
        .iter()
        .map(|m| format!("{}. {} | {}", m.display_code(), pad(&m.name, 20), m.province))
        .collect::<Vec<_>>()
        .join("\n")
}

// --- Statistics ---

/// One accumulator per mountain, in reference order. Registrations naming a
/// code that is not in `mountains` are ignored.
pub fn statistics(mountains: &[Mountain], registrations: &[Registration]) -> Vec<Statistic> {
    let mut stats: Vec<Statistic> = mountains.iter().map(|m| Statistic::new(&m.code)).collect();
    let slots: HashMap<&str, usize> = mountains
        .iter()
        .enumerate()
        .map(|(i, m)| (m.code.as_str(), i))
        .collect();
    for reg in registrations {
        if let Some(&i) = slots.get(reg.mountain_code()) {
            stats[i].add(reg.fee());
        }
    }
    stats
}

pub fn statistics_table(stats: &[Statistic]) -> String {
    let row = |code: &str, participants: &str, total: &str| {
        format!(" {:>13} | {:>12} | {:>11} ", code, participants, total)
    };
    let rows = stats
        .iter()
        .map(|s| {
            row(
                &display_mountain_code(&s.code),
                &s.participants.to_string(),
                &group_thousands(s.total_fee),
            )
        })
        .collect();
    table(
        row("Mountain Code", "Participants", "Total Fee"),
        rows,
        row("N/A", "N/A", "N/A"),
    )
}

// --- Customers ---

/// `Nguyen Van An` -> `An, Nguyen Van`. Single-word names are unchanged.
pub fn display_name(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    match words.split_last() {
        Some((first, rest)) if !rest.is_empty() => format!("{}, {}", first, rest.join(" ")),
        _ => name.to_string(),
    }
}

/// `0912345678` -> `091-234-5678`. Anything that is not 10 digits is unchanged.
pub fn display_phone(phone: &str) -> String {
    if phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit()) {
        format!("{}-{}-{}", &phone[..3], &phone[3..6], &phone[6..])
    } else {
        phone.to_string()
    }
}

fn customer_row(code: &str, name: &str, email: &str, phone: &str) -> String {
    format!(
        "| {} | {} | {} | {} |",
        pad(code, 5),
        pad(name, 25),
        pad(email, 25),
        pad(phone, 12)
    )
}

pub fn customer_table<'a, I>(customers: I) -> String
where
    I: IntoIterator<Item = &'a Customer>,
{
    let rows = customers
        .into_iter()
        .map(|c| {
            customer_row(
                c.code(),
                &clip(&display_name(c.name()), 25, 22, ".."),
                &clip(c.email(), 25, 22, ".."),
                &display_phone(c.phone()),
            )
        })
        .collect();
    table(
        customer_row("Code", "Customer Name", "Customer Email", "Phone Number"),
        rows,
        customer_row("N/A", "N/A", "N/A", "N/A"),
    )
}

pub fn customer_card(c: &Customer) -> String {
    let line = rule(CARD_RULE_WIDTH);
    format!(
        "Customer Information\n{line}\n\
         Code          : {}\n\
         Customer Name : {}\n\
         Customer Email: {}\n\
         Phone Number  : {}\n{line}",
        c.code(),
        c.name(),
        c.email(),
        display_phone(c.phone()),
    )
}

/// Customers ordered by first name (the last word of the name). Ties keep
/// their store order.
pub fn sort_customers<'a, I>(customers: I) -> Vec<&'a Customer>
where
    I: IntoIterator<Item = &'a Customer>,
{
    let mut sorted: Vec<&Customer> = customers.into_iter().collect();
    sorted.sort_by(|a, b| a.first_name().cmp(b.first_name()));
    sorted
}

// --- Menus ---

pub fn menu_card(menu: &FeastMenu) -> String {
    let line = rule(CARD_RULE_WIDTH);
    let ingredients = menu
        .ingredients
        .iter()
        .map(|i| format!(" - {}", i))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Code       : {}\n\
         Name       : {}\n\
         Price      : {} VND\n\
         Ingredients:\n{}\n{line}",
        menu.code,
        menu.name,
        group_thousands(menu.price),
        ingredients,
    )
}

pub fn menu_list(menus: &[FeastMenu]) -> String {
    if menus.is_empty() {
        return "N/A".to_string();
    }
    menus.iter().map(menu_card).collect::<Vec<_>>().join("\n")
}

// --- Orders ---

fn order_row(
    id: &str,
    date: &str,
    customer: &str,
    menu: &str,
    price: &str,
    tables: &str,
    cost: &str,
) -> String {
    format!(
        "| {:>2} | {:>10} | {} | {} | {:>11} | {:>6} | {:>11} |",
        id,
        date,
        pad(customer, 13),
        pad(menu, 8),
        price,
        tables,
        cost
    )
}

fn find_menu<'a>(menus: &'a [FeastMenu], code: &str) -> Option<&'a FeastMenu> {
    menus.iter().find(|m| m.code == code)
}

/// Price and cost columns for an order; `N/A` when its menu is unknown.
fn priced(order: &FeastOrder, menus: &[FeastMenu]) -> (String, String) {
    match find_menu(menus, order.menu_code()) {
        Some(menu) => (
            group_thousands(menu.price),
            group_thousands(order_cost(menu.price, order.tables())),
        ),
        None => ("N/A".to_string(), "N/A".to_string()),
    }
}

pub fn order_table<'a, I>(orders: I, menus: &[FeastMenu]) -> String
where
    I: IntoIterator<Item = &'a FeastOrder>,
{
    let rows = orders
        .into_iter()
        .map(|o| {
            let (price, cost) = priced(o, menus);
            order_row(
                &o.id().to_string(),
                o.event_date(),
                o.customer_code(),
                o.menu_code(),
                &price,
                &o.tables().to_string(),
                &cost,
            )
        })
        .collect();
    table(
        order_row(
            "ID",
            "Event Date",
            "Customer Code",
            "Set Menu",
            "Price",
            "Tables",
            "Cost",
        ),
        rows,
        order_row("N/A", "N/A", "N/A", "N/A", "N/A", "N/A", "N/A"),
    )
}

pub fn order_card(order: &FeastOrder, customer: Option<&Customer>, menus: &[FeastMenu]) -> String {
    let line = rule(CARD_RULE_WIDTH);
    let menu = find_menu(menus, order.menu_code());
    let (price, cost) = priced(order, menus);

    let mut out = vec![format!("Feast Order [#ID: {:02}] Information", order.id()), line.clone()];
    out.push(format!("Code          : {}", order.customer_code()));
    if let Some(c) = customer {
        out.push(format!("Customer Name : {}", c.name()));
        out.push(format!("Customer Email: {}", c.email()));
        out.push(format!("Phone Number  : {}", display_phone(c.phone())));
    }
    out.push(line.clone());
    out.push(format!("Set Menu Code  : {}", order.menu_code()));
    if let Some(m) = menu {
        out.push(format!("Set Menu Name  : {}", m.name));
    }
    out.push(format!("Event Date     : {}", order.event_date()));
    out.push(format!("Number of Tables: {}", order.tables()));
    out.push(format!("Price          : {} VND", price));
    if let Some(m) = menu {
        out.push("Ingredients    :".to_string());
        out.extend(m.ingredients.iter().map(|i| format!(" - {}", i)));
    }
    out.push(line.clone());
    out.push(format!("Total Cost     : {} VND", cost));
    out.push(line);
    out.join("\n")
}

/// Orders by event date, then id. Orders with unparseable dates sort last.
pub fn sort_orders<'a, I>(orders: I) -> Vec<&'a FeastOrder>
where
    I: IntoIterator<Item = &'a FeastOrder>,
{
    let mut sorted: Vec<&FeastOrder> = orders.into_iter().collect();
    sorted.sort_by_key(|o| {
        let date = parse_date(o.event_date());
        (date.is_none(), date, o.id())
    });
    sorted
}
