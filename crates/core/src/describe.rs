// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable trigger descriptions
//!
//! Lookup tables are keyed by the wire names of indicators, wrappers and
//! operators. Unknown keys render as an empty string.

use crate::calendar::{MonthDays, TimeOfDay, WeekDays};

static PHRASES: &[(&str, &str)] = &[
    ("cpu", "CPU utilization"),
    ("mem", "memory utilization"),
    ("disk_read", "disk read rate"),
    ("disk_write", "disk write rate"),
    ("flow_into", "network inflow rate"),
    ("flow_out", "network outflow rate"),
    ("max", "maximum"),
    ("min", "minimum"),
    ("average", "average"),
    ("gt", "greater"),
    ("lt", "less"),
];

static UNITS: &[(&str, &str)] = &[
    ("cpu", "%"),
    ("mem", "%"),
    ("disk_read", "kB/s"),
    ("disk_write", "kB/s"),
    ("flow_into", "KB/s"),
    ("flow_out", "KB/s"),
];

static WEEK_DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> &'static str {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or("")
}

/// Phrase for an indicator, wrapper or operator key
pub fn phrase(key: &str) -> &'static str {
    lookup(PHRASES, key)
}

/// Measurement unit for an indicator key
pub fn unit(key: &str) -> &'static str {
    lookup(UNITS, key)
}

/// English name of ISO weekday `day` (1 = Monday)
pub fn week_day_name(day: u32) -> &'static str {
    day.checked_sub(1)
        .and_then(|i| WEEK_DAY_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// Ordinal suffix for a day of the month: 1st, 2nd, 3rd, 4th, 11th, 21st
pub fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Join items as `a`, `a and b`, `a, b and c`
fn join_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

/// `09:00 every Monday, Wednesday and Friday`
pub fn week_days(at: TimeOfDay, days: WeekDays) -> String {
    if days.is_empty() {
        return String::new();
    }
    let names: Vec<String> = days.iter().map(|d| week_day_name(d).to_string()).collect();
    format!("{} every {}", at, join_list(&names))
}

/// `09:00 on the 1st, 2nd and 15th of each month`
pub fn month_days(at: TimeOfDay, days: MonthDays) -> String {
    if days.is_empty() {
        return String::new();
    }
    let names: Vec<String> = days
        .iter()
        .map(|d| format!("{}{}", d, ordinal_suffix(d)))
        .collect();
    format!("{} on the {} of each month", at, join_list(&names))
}
