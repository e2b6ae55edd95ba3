//! Output row types produced by the analyzers.
//!
//! Column names follow the conventions of the downstream reporting
//! consumer, so the serialized CSV headers read like the source dataset.

use serde::{Deserialize, Serialize};

/// Average price for one (Make, dimensions, Body_Type) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRow {
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Height")]
    pub height: Option<String>,
    #[serde(rename = "Length")]
    pub length: Option<String>,
    #[serde(rename = "Width")]
    pub width: Option<String>,
    #[serde(rename = "Body_Type")]
    pub body_type: Option<String>,
    #[serde(rename = "Avg_Price")]
    pub avg_price: Option<f64>,
}

/// Average price per (Make, Model, Fuel_Type) within a body-type segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelPriceRow {
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Fuel_Type")]
    pub fuel_type: Option<String>,
    #[serde(rename = "Avg_Price")]
    pub avg_price: Option<f64>,
}

/// Average displacement per (Make, Model, Fuel_Type) within a body-type
/// segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelDisplacementRow {
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Fuel_Type")]
    pub fuel_type: Option<String>,
    #[serde(rename = "Avg_Displacement")]
    pub avg_displacement: Option<f64>,
}

/// Combined price/displacement view with the fuel-type pivot columns.
///
/// `avg_price` is scaled to thousands. Exactly one of the three price
/// columns and one of the three displacement columns is populated, selected
/// by the row's own `fuel_type`; an unrecognized fuel type leaves all six
/// null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Fuel_Type")]
    pub fuel_type: Option<String>,
    #[serde(rename = "Avg_Displacement")]
    pub avg_displacement: Option<f64>,
    #[serde(rename = "Avg_Price")]
    pub avg_price: Option<f64>,
    #[serde(rename = "Petrol_Price")]
    pub petrol_price: Option<f64>,
    #[serde(rename = "Diesel_Price")]
    pub diesel_price: Option<f64>,
    #[serde(rename = "CNG_Price")]
    pub cng_price: Option<f64>,
    #[serde(rename = "Petrol_Displacement")]
    pub petrol_displacement: Option<f64>,
    #[serde(rename = "Diesel_Displacement")]
    pub diesel_displacement: Option<f64>,
    #[serde(rename = "CNG_Displacement")]
    pub cng_displacement: Option<f64>,
}

/// Max-aggregated feature flags and composite category scores for one
/// (Make, Model, Fuel_Type) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureScoreRow {
    #[serde(rename = "Make")]
    pub make: Option<String>,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Fuel_Type")]
    pub fuel_type: Option<String>,
    #[serde(rename = "Agg_Power_Steering")]
    pub power_steering: i64,
    #[serde(rename = "Agg_Power_Windows")]
    pub power_windows: i64,
    #[serde(rename = "Agg_Keyless_Entry")]
    pub keyless_entry: i64,
    #[serde(rename = "Agg_Audiosystem")]
    pub audiosystem: i64,
    #[serde(rename = "Agg_Fasten_Seat_Belt_Warning")]
    pub fasten_seat_belt_warning: i64,
    #[serde(rename = "Agg_Number_of_Airbags")]
    pub number_of_airbags: i64,
    #[serde(rename = "Agg_Turbocharger")]
    pub turbocharger: i64,
    #[serde(rename = "Agg_ISOFIX_Child_Seat_Mount")]
    pub isofix_child_seat_mount: i64,
    #[serde(rename = "Agg_Cruise_Control")]
    pub cruise_control: i64,
    #[serde(rename = "Regulatory_Essential_Feature")]
    pub regulatory_essential_feature: i64,
    #[serde(rename = "Safety_Feature")]
    pub safety_feature: i64,
    #[serde(rename = "Comfort_Feature")]
    pub comfort_feature: i64,
}
