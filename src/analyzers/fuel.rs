//! Fuel-type price and displacement aggregation within a body-type segment.
//!
//! All views filter to one body type (a parameter; the default segment at
//! the CLI is MPV) and to rows with a non-null Make, deduplicate rows on the
//! grouping key plus the measured value, then average per
//! (Make, Model, Fuel_Type).

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::analyzers::types::{FuelDisplacementRow, FuelPriceRow, PivotRow};
use crate::analyzers::utility::mean_of;
use crate::normalize::Vehicle;

/// Divisor applied to the pivot view's average price, converting absolute
/// currency units to a thousands scale for chart readability.
const PRICE_SCALE: f64 = 1000.0;

type FuelKey = (String, String, Option<String>);

/// Mean of a measure per (Make, Model, Fuel_Type) over distinct
/// (key, value) tuples within the body-type segment.
fn distinct_means(
    vehicles: &[Vehicle],
    body_type: &str,
    measure: impl Fn(&Vehicle) -> Option<i64>,
) -> HashMap<FuelKey, Option<f64>> {
    let mut seen: HashSet<(FuelKey, Option<i64>)> = HashSet::new();
    let mut groups: HashMap<FuelKey, Vec<Option<i64>>> = HashMap::new();

    for v in vehicles {
        if v.body_type.as_deref() != Some(body_type) {
            continue;
        }
        let Some(make) = &v.make else { continue };

        let key = (make.clone(), v.model.clone(), v.fuel_type.clone());
        let value = measure(v);
        if seen.insert((key.clone(), value)) {
            groups.entry(key).or_default().push(value);
        }
    }

    groups
        .into_iter()
        .map(|(key, values)| (key, mean_of(values)))
        .collect()
}

/// Average price per (Make, Model, Fuel_Type) within the given body-type
/// segment, in absolute currency units.
pub fn avg_price_by_fuel(vehicles: &[Vehicle], body_type: &str) -> Vec<FuelPriceRow> {
    distinct_means(vehicles, body_type, |v| v.price)
        .into_iter()
        .map(|((make, model, fuel_type), avg_price)| FuelPriceRow {
            make,
            model,
            fuel_type,
            avg_price,
        })
        .collect()
}

/// Average engine displacement per (Make, Model, Fuel_Type) within the
/// given body-type segment.
pub fn avg_displacement_by_fuel(vehicles: &[Vehicle], body_type: &str) -> Vec<FuelDisplacementRow> {
    distinct_means(vehicles, body_type, |v| v.displacement)
        .into_iter()
        .map(|((make, model, fuel_type), avg_displacement)| FuelDisplacementRow {
            make,
            model,
            fuel_type,
            avg_displacement,
        })
        .collect()
}

/// Combined price/displacement view with one row per (Make, Model,
/// Fuel_Type). The average price is scaled to thousands, and the fuel type
/// is pivoted into six mutually-exclusive Petrol/Diesel/CNG columns.
pub fn displacement_price_pivot(vehicles: &[Vehicle], body_type: &str) -> Vec<PivotRow> {
    let prices = distinct_means(vehicles, body_type, |v| v.price);
    let mut displacements = distinct_means(vehicles, body_type, |v| v.displacement);

    debug!(
        body_type,
        groups = prices.len(),
        "Building displacement/price pivot"
    );

    prices
        .into_iter()
        .map(|(key, price)| {
            let avg_displacement = displacements.remove(&key).flatten();
            let avg_price = price.map(|p| p / PRICE_SCALE);
            let (make, model, fuel_type) = key;

            let mut row = PivotRow {
                make,
                model,
                fuel_type,
                avg_displacement,
                avg_price,
                petrol_price: None,
                diesel_price: None,
                cng_price: None,
                petrol_displacement: None,
                diesel_displacement: None,
                cng_displacement: None,
            };

            match row.fuel_type.as_deref() {
                Some("Petrol") => {
                    row.petrol_price = row.avg_price;
                    row.petrol_displacement = row.avg_displacement;
                }
                Some("Diesel") => {
                    row.diesel_price = row.avg_price;
                    row.diesel_displacement = row.avg_displacement;
                }
                Some("CNG") => {
                    row.cng_price = row.avg_price;
                    row.cng_displacement = row.avg_displacement;
                }
                _ => {}
            }

            row
        })
        .collect()
}
