//! Year-label decomposition and fuel-qualifier preference.
//!
//! ## Summary
//! Year-stage catalog entries combine a 4-digit model year and a free-text
//! fuel qualifier in a single label ("2015 Gasolina", "2001 (Diesel)").
//! These helpers split the label, enumerate the qualifiers available for a
//! year, and pick the preferred entry when several share the same year.

use crate::constants::{DIESEL_MARKER, GASOLINE_MARKER, YEAR_SANITY_CEILING};
use crate::types::YearEntry;

/// A decomposed year label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearFuel {
    /// The 4-digit year component; empty when the label carries no year.
    pub year: String,
    /// The fuel qualifier, parentheses stripped and whitespace trimmed.
    pub fuel: String,
}

/// Splits a combined year+fuel label.
///
/// A leading run of exactly 4 digits, parsed as an integer no greater than
/// the sanity ceiling, is the year; the remainder is the fuel qualifier.
/// Labels whose leading digit run is absent, longer than 4 digits, or above
/// the ceiling carry no year and become a bare qualifier ("32000" mileage
/// labels, "(Diesel)" variants).
#[must_use]
pub fn split_year_label(label: &str) -> YearFuel {
    let digits: String = label.chars().take_while(char::is_ascii_digit).collect();
    if digits.len() == 4 {
        if let Ok(value) = digits.parse::<u32>() {
            if value <= YEAR_SANITY_CEILING {
                return YearFuel {
                    fuel: clean_qualifier(&label[digits.len()..]),
                    year: digits,
                };
            }
        }
    }
    YearFuel {
        year: String::new(),
        fuel: clean_qualifier(label),
    }
}

/// Distinct year values present in `entries`, in order of first appearance.
/// Entries without a year component are skipped.
#[must_use]
pub fn year_values(entries: &[YearEntry]) -> Vec<String> {
    let mut years: Vec<String> = Vec::new();
    for entry in entries {
        let split = split_year_label(&entry.label);
        if !split.year.is_empty() && !years.contains(&split.year) {
            years.push(split.year);
        }
    }
    years
}

/// Fuel qualifiers available for `year` in `entries`, in entry order.
#[must_use]
pub fn qualifiers_for_year(entries: &[YearEntry], year: &str) -> Vec<String> {
    entries
        .iter()
        .map(|entry| split_year_label(&entry.label))
        .filter(|split| split.year == year)
        .map(|split| split.fuel)
        .collect()
}

/// Whether a model name suggests a diesel variant.
#[must_use]
pub fn model_prefers_diesel(model_name: &str) -> bool {
    contains_marker(model_name, DIESEL_MARKER)
}

/// Picks the preferred entry among those sharing `year`.
///
/// Diesel-named models prefer a diesel qualifier; after that the gasoline
/// qualifier wins; after that the first entry for the year.
#[must_use]
pub fn preferred_entry<'a>(
    model_name: &str,
    year: &str,
    entries: &'a [YearEntry],
) -> Option<&'a YearEntry> {
    let candidates: Vec<&YearEntry> = entries
        .iter()
        .filter(|entry| split_year_label(&entry.label).year == year)
        .collect();

    if model_prefers_diesel(model_name) {
        if let Some(entry) = candidates
            .iter()
            .find(|entry| contains_marker(&split_year_label(&entry.label).fuel, DIESEL_MARKER))
            .copied()
        {
            return Some(entry);
        }
    }

    candidates
        .iter()
        .find(|entry| contains_marker(&split_year_label(&entry.label).fuel, GASOLINE_MARKER))
        .or_else(|| candidates.first())
        .copied()
}

fn clean_qualifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '(' && *c != ')')
        .collect::<String>()
        .trim()
        .to_string()
}

fn contains_marker(haystack: &str, marker: &str) -> bool {
    haystack.to_lowercase().contains(marker)
}
