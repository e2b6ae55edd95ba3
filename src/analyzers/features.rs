//! Feature scoring for a set of competing models.
//!
//! Each feature column is recoded to an integer flag by a per-column rule,
//! the flags are max-aggregated per (Make, Model, Fuel_Type), and three
//! composite category scores roll the flags up.

use std::collections::HashMap;
use tracing::debug;

use crate::analyzers::types::FeatureScoreRow;
use crate::loader::RawVehicle;

/// How one raw feature column is recoded to an integer flag.
#[derive(Debug, Clone, Copy)]
pub enum FlagRule {
    /// Null maps to 0, any non-null value to 1.
    Presence,
    /// The sentinel string maps to 0, any other non-null value to 1.
    Sentinel(&'static str),
    /// Null maps to 0; otherwise the value is kept as its integer count.
    Count,
}

impl FlagRule {
    fn apply(self, value: Option<&str>) -> i64 {
        match (self, value) {
            (_, None) => 0,
            (FlagRule::Presence, Some(_)) => 1,
            (FlagRule::Sentinel(sentinel), Some(v)) => (v != sentinel) as i64,
            (FlagRule::Count, Some(v)) => v.trim().parse().unwrap_or(0),
        }
    }
}

const FEATURE_COUNT: usize = 9;

/// Recode rules, in the order of [`feature_values`].
static RULES: [FlagRule; FEATURE_COUNT] = [
    FlagRule::Presence,                 // Power_Steering
    FlagRule::Presence,                 // Power_Windows
    FlagRule::Presence,                 // Keyless_Entry
    FlagRule::Sentinel("Not on offer"), // Audiosystem
    FlagRule::Presence,                 // Fasten_Seat_Belt_Warning
    FlagRule::Count,                    // Number_of_Airbags
    FlagRule::Presence,                 // Turbocharger
    FlagRule::Presence,                 // ISOFIX_(Child-Seat_Mount)
    FlagRule::Presence,                 // Cruise_Control
];

fn feature_values(v: &RawVehicle) -> [Option<&str>; FEATURE_COUNT] {
    [
        v.power_steering.as_deref(),
        v.power_windows.as_deref(),
        v.keyless_entry.as_deref(),
        v.audiosystem.as_deref(),
        v.fasten_seat_belt_warning.as_deref(),
        v.number_of_airbags.as_deref(),
        v.turbocharger.as_deref(),
        v.isofix_child_seat_mount.as_deref(),
        v.cruise_control.as_deref(),
    ]
}

type FeatureKey = (Option<String>, String, Option<String>);

/// Scores the feature content of the given models.
///
/// Filters the raw table to rows whose Model is in `models`, recodes the
/// nine feature columns, max-aggregates them per (Make, Model, Fuel_Type),
/// and computes the composite scores as ceilings of the flag sums.
pub fn feature_scores(raw: &[RawVehicle], models: &[String]) -> Vec<FeatureScoreRow> {
    let mut groups: HashMap<FeatureKey, [i64; FEATURE_COUNT]> = HashMap::new();

    for v in raw {
        if !models.iter().any(|m| m == &v.model) {
            continue;
        }

        let values = feature_values(v);
        let mut flags = [0i64; FEATURE_COUNT];
        for (i, rule) in RULES.iter().enumerate() {
            flags[i] = rule.apply(values[i]);
        }

        let key = (v.make.clone(), v.model.clone(), v.fuel_type.clone());
        let entry = groups.entry(key).or_insert([0; FEATURE_COUNT]);
        for (agg, flag) in entry.iter_mut().zip(flags) {
            *agg = (*agg).max(flag);
        }
    }

    debug!(groups = groups.len(), "Feature groups aggregated");

    groups
        .into_iter()
        .map(|((make, model, fuel_type), f)| {
            let [
                power_steering,
                power_windows,
                keyless_entry,
                audiosystem,
                fasten_seat_belt_warning,
                number_of_airbags,
                turbocharger,
                isofix_child_seat_mount,
                cruise_control,
            ] = f;

            FeatureScoreRow {
                make,
                model,
                fuel_type,
                power_steering,
                power_windows,
                keyless_entry,
                audiosystem,
                fasten_seat_belt_warning,
                number_of_airbags,
                turbocharger,
                isofix_child_seat_mount,
                cruise_control,
                // flag sums are integers, so their ceilings are the sums
                regulatory_essential_feature: power_steering + power_windows,
                safety_feature: fasten_seat_belt_warning
                    + number_of_airbags
                    + isofix_child_seat_mount,
                comfort_feature: cruise_control + turbocharger + keyless_entry + audiosystem,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ertiga(fuel: &str) -> RawVehicle {
        RawVehicle {
            make: Some("Maruti Suzuki".to_string()),
            model: "Ertiga".to_string(),
            fuel_type: Some(fuel.to_string()),
            ..Default::default()
        }
    }

    fn models() -> Vec<String> {
        vec!["Ertiga".to_string(), "Eeco".to_string(), "Xl6".to_string()]
    }

    #[test]
    fn test_presence_recoding() {
        let mut v = ertiga("Petrol");
        v.power_steering = Some("Yes".to_string());
        v.power_windows = None;

        let rows = feature_scores(&[v], &models());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].power_steering, 1);
        assert_eq!(rows[0].power_windows, 0);
        assert_eq!(rows[0].regulatory_essential_feature, 1);
    }

    #[test]
    fn test_audiosystem_sentinel() {
        let mut not_on_offer = ertiga("Petrol");
        not_on_offer.audiosystem = Some("Not on offer".to_string());
        let mut offered = ertiga("Diesel");
        offered.audiosystem = Some("CD Player".to_string());

        let rows = feature_scores(&[not_on_offer, offered], &models());

        let by_fuel = |fuel: &str| {
            rows.iter()
                .find(|r| r.fuel_type.as_deref() == Some(fuel))
                .unwrap()
        };
        assert_eq!(by_fuel("Petrol").audiosystem, 0);
        assert_eq!(by_fuel("Diesel").audiosystem, 1);
    }

    #[test]
    fn test_airbag_count_max_aggregated() {
        let mut base = ertiga("Diesel");
        base.number_of_airbags = Some("2".to_string());
        let mut top = ertiga("Diesel");
        top.number_of_airbags = Some("6".to_string());
        let mut missing = ertiga("Diesel");
        missing.number_of_airbags = None;

        let rows = feature_scores(&[base, top, missing], &models());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].number_of_airbags, 6);
    }

    #[test]
    fn test_safety_score_includes_airbag_count() {
        let mut v = ertiga("Diesel");
        v.fasten_seat_belt_warning = Some("Yes".to_string());
        v.number_of_airbags = Some("4".to_string());
        v.isofix_child_seat_mount = Some("Yes".to_string());

        let rows = feature_scores(&[v], &models());

        assert_eq!(rows[0].safety_feature, 6);
    }

    #[test]
    fn test_comfort_score_scenario() {
        let mut v = ertiga("Petrol");
        v.audiosystem = Some("Not on offer".to_string());
        v.turbocharger = None;
        v.cruise_control = Some("Yes".to_string());
        v.keyless_entry = None;

        let rows = feature_scores(&[v], &models());

        assert_eq!(rows[0].comfort_feature, 1);
    }

    #[test]
    fn test_model_filter() {
        let mut other = ertiga("Petrol");
        other.model = "Swift".to_string();

        let rows = feature_scores(&[other], &models());

        assert!(rows.is_empty());
    }

    #[test]
    fn test_variants_max_merge_across_group() {
        let mut base = ertiga("Petrol");
        base.keyless_entry = None;
        base.cruise_control = Some("Yes".to_string());
        let mut top = ertiga("Petrol");
        top.keyless_entry = Some("Yes".to_string());
        top.cruise_control = None;

        let rows = feature_scores(&[base, top], &models());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].keyless_entry, 1);
        assert_eq!(rows[0].cruise_control, 1);
        assert_eq!(rows[0].comfort_feature, 2);
    }
}
