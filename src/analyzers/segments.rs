//! Segment aggregation: average price per make/dimension/body-type
//! combination.

use std::collections::HashMap;
use tracing::debug;

use crate::analyzers::types::SegmentRow;
use crate::analyzers::utility::mean_of;
use crate::normalize::Vehicle;

type SegmentKey = (
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

/// Groups vehicles by (Make, Height, Length, Width, Body_Type) and averages
/// the price per group, skipping null prices. Rows with a null Make are
/// excluded. Output order is unspecified.
pub fn segment_averages(vehicles: &[Vehicle]) -> Vec<SegmentRow> {
    let mut groups: HashMap<SegmentKey, Vec<Option<i64>>> = HashMap::new();

    for v in vehicles {
        let Some(make) = &v.make else { continue };
        let key = (
            make.clone(),
            v.height.clone(),
            v.length.clone(),
            v.width.clone(),
            v.body_type.clone(),
        );
        groups.entry(key).or_default().push(v.price);
    }

    debug!(groups = groups.len(), "Segment groups formed");

    groups
        .into_iter()
        .map(|((make, height, length, width, body_type), prices)| SegmentRow {
            make,
            height,
            length,
            width,
            body_type,
            avg_price: mean_of(prices),
        })
        .collect()
}

/// Restricts a segment table to the given makes, e.g. the most popular
/// brands in a market.
pub fn filter_makes(rows: Vec<SegmentRow>, makes: &[String]) -> Vec<SegmentRow> {
    rows.into_iter()
        .filter(|row| makes.iter().any(|m| m == &row.make))
        .collect()
}
