//! Schema normalization for raw vehicle listings.
//!
//! Turns formatted price and displacement strings into integers and carries
//! the columns the aggregators group on. Parse failures produce a null field
//! for that row, never an error.

use serde::Serialize;

use crate::loader::RawVehicle;

/// An analysis-ready vehicle row. Dimensions stay as their raw trimmed text;
/// they are only ever used as grouping keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub make: Option<String>,
    pub model: String,
    pub body_type: Option<String>,
    pub height: Option<String>,
    pub length: Option<String>,
    pub width: Option<String>,
    pub price: Option<i64>,
    pub fuel_type: Option<String>,
    pub displacement: Option<i64>,
}

/// Parses a formatted showroom price such as `"Rs. 10,59,000"`.
///
/// Strips the currency marker characters (`R`, `s`, `.`, `,`) and whitespace,
/// then parses the residue as an integer. Any non-numeric residue yields
/// `None`.
pub fn parse_price(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, 'R' | 's' | '.' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Parses a formatted engine displacement such as `"1498 cc"`.
///
/// Strips the unit characters (`c`), spaces and commas, then parses the
/// residue as an integer. Any non-numeric residue yields `None`.
pub fn parse_displacement(raw: &str) -> Option<i64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, 'c' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Normalizes raw listings into analysis-ready rows. Pure transform; the
/// input is left untouched for consumers that need the raw feature columns.
pub fn normalize(raw: &[RawVehicle]) -> Vec<Vehicle> {
    raw.iter()
        .map(|r| Vehicle {
            make: trimmed(&r.make),
            model: r.model.trim().to_string(),
            body_type: trimmed(&r.body_type),
            height: trimmed(&r.height),
            length: trimmed(&r.length),
            width: trimmed(&r.width),
            price: r.ex_showroom_price.as_deref().and_then(parse_price),
            fuel_type: trimmed(&r.fuel_type),
            displacement: r.displacement.as_deref().and_then(parse_displacement),
        })
        .collect()
}
