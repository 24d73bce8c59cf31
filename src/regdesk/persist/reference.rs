//! Reference data loaders.
//!
//! Both formats share the same outer rules:
//!
//! - A leading UTF-8 BOM is ignored.
//! - The first line is skipped only when it is exactly the expected header
//!   (surrounding whitespace aside). Any other first line is data.
//! - Blank lines are ignored. Lines with the wrong shape are skipped and
//!   counted in [`LoadReport::skipped`].
//! - A file that cannot be read yields an empty report and a warning.
//!
//! Mountains split on `", "` and take 3 or 4 fields. Menus are CSV with 4
//! fields; the last is a quoted list of `#`-separated ingredients, each
//! optionally prefixed by `+ `.

use crate::model::{FeastMenu, Mountain};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const MOUNTAIN_HEADER: &str = "Code, Mountain, Province, Description";
pub const MENU_HEADER: &str = "Code,Name,Price,Ingredients";

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for LoadReport<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

pub fn load_mountains(path: &Path) -> LoadReport<Mountain> {
    load_with(path, parse_mountains)
}

pub fn load_menus(path: &Path) -> LoadReport<FeastMenu> {
    load_with(path, parse_menus)
}

fn load_with<T>(path: &Path, parse: fn(&str) -> LoadReport<T>) -> LoadReport<T> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read reference data");
            return LoadReport::default();
        }
    };
    let report = parse(&text);
    if report.skipped > 0 {
        warn!(path = %path.display(), skipped = report.skipped, "skipped malformed lines");
    }
    info!(path = %path.display(), count = report.records.len(), "loaded reference data");
    report
}

/// Strips the BOM and, when present, the header line.
fn body<'a>(text: &'a str, header: &str) -> &'a str {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    match text.split_once('\n') {
        Some((first, rest)) if first.trim() == header => rest,
        None if text.trim() == header => "",
        _ => text,
    }
}

pub fn parse_mountains(text: &str) -> LoadReport<Mountain> {
    let mut report = LoadReport::default();
    for line in body(text, MOUNTAIN_HEADER).lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(", ").map(str::trim).collect();
        match fields.as_slice() {
            [code, name, province] => report.records.push(Mountain {
                code: code.to_string(),
                name: name.to_string(),
                province: province.to_string(),
                description: None,
            }),
            [code, name, province, description] => report.records.push(Mountain {
                code: code.to_string(),
                name: name.to_string(),
                province: province.to_string(),
                description: Some(description.to_string()).filter(|d| !d.is_empty()),
            }),
            _ => report.skipped += 1,
        }
    }
    report
}

pub fn parse_menus(text: &str) -> LoadReport<FeastMenu> {
    let mut report = LoadReport::default();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body(text, MENU_HEADER).as_bytes());

    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(_) => {
                report.skipped += 1;
                continue;
            }
        };
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        if record.len() != 4 {
            report.skipped += 1;
            continue;
        }
        let Ok(price) = record[2].parse::<f64>() else {
            report.skipped += 1;
            continue;
        };
        report.records.push(FeastMenu {
            code: record[0].to_string(),
            name: record[1].to_string(),
            price,
            ingredients: split_ingredients(&record[3]),
        });
    }
    report
}

fn split_ingredients(raw: &str) -> Vec<String> {
    raw.replace('"', "")
        .split('#')
        .map(|item| {
            let item = item.trim();
            item.strip_prefix('+').unwrap_or(item).trim().to_string()
        })
        .filter(|item| !item.is_empty())
        .collect()
}
