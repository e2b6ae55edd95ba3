//! CSV loader for raw vehicle listings.
//!
//! The loader is the only part of the pipeline that sees the raw file shape.
//! It validates the header row up front so a malformed export fails with the
//! names of the missing columns instead of an opaque lookup error later.

use anyhow::{Result, bail};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use tracing::debug;

/// Columns the pipeline depends on. Extra columns in the file are ignored.
static REQUIRED_COLUMNS: &[&str] = &[
    "Make",
    "Model",
    "Ex-Showroom_Price",
    "Height",
    "Length",
    "Width",
    "Body_Type",
    "Fuel_Type",
    "Displacement",
    "Power_Steering",
    "Power_Windows",
    "Keyless_Entry",
    "Audiosystem",
    "Fasten_Seat_Belt_Warning",
    "Number_of_Airbags",
    "Turbocharger",
    "ISOFIX_(Child-Seat_Mount)",
    "Cruise_Control",
];

/// One row of the source listing file, untouched. Empty CSV fields
/// deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVehicle {
    #[serde(rename = "Make")]
    pub make: Option<String>,
    #[serde(rename = "Model")]
    pub model: String,
    #[serde(rename = "Ex-Showroom_Price")]
    pub ex_showroom_price: Option<String>,
    #[serde(rename = "Height")]
    pub height: Option<String>,
    #[serde(rename = "Length")]
    pub length: Option<String>,
    #[serde(rename = "Width")]
    pub width: Option<String>,
    #[serde(rename = "Body_Type")]
    pub body_type: Option<String>,
    #[serde(rename = "Fuel_Type")]
    pub fuel_type: Option<String>,
    #[serde(rename = "Displacement")]
    pub displacement: Option<String>,

    // feature columns consumed by the feature scorer
    #[serde(rename = "Power_Steering")]
    pub power_steering: Option<String>,
    #[serde(rename = "Power_Windows")]
    pub power_windows: Option<String>,
    #[serde(rename = "Keyless_Entry")]
    pub keyless_entry: Option<String>,
    #[serde(rename = "Audiosystem")]
    pub audiosystem: Option<String>,
    #[serde(rename = "Fasten_Seat_Belt_Warning")]
    pub fasten_seat_belt_warning: Option<String>,
    #[serde(rename = "Number_of_Airbags")]
    pub number_of_airbags: Option<String>,
    #[serde(rename = "Turbocharger")]
    pub turbocharger: Option<String>,
    #[serde(rename = "ISOFIX_(Child-Seat_Mount)")]
    pub isofix_child_seat_mount: Option<String>,
    #[serde(rename = "Cruise_Control")]
    pub cruise_control: Option<String>,
}

/// Loads vehicle listings from a CSV file with a header row.
pub fn load_vehicles(path: &str) -> Result<Vec<RawVehicle>> {
    let file = File::open(path)?;
    let vehicles = read_vehicles(file)?;
    debug!(path, rows = vehicles.len(), "Loaded vehicle listings");
    Ok(vehicles)
}

/// Reads vehicle listings from any CSV source.
///
/// # Errors
///
/// Fails if the header row is missing any of the required columns (the error
/// names all of them), or if a row cannot be deserialized.
pub fn read_vehicles<R: Read>(reader: R) -> Result<Vec<RawVehicle>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .copied()
        .collect();
    if !missing.is_empty() {
        bail!("input is missing required column(s): {}", missing.join(", "));
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: RawVehicle = result?;
        rows.push(record);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Make,Model,Ex-Showroom_Price,Height,Length,Width,Body_Type,Fuel_Type,Displacement,Power_Steering,Power_Windows,Keyless_Entry,Audiosystem,Fasten_Seat_Belt_Warning,Number_of_Airbags,Turbocharger,ISOFIX_(Child-Seat_Mount),Cruise_Control";

    #[test]
    fn test_read_single_row() {
        let data = format!(
            "{HEADER}\nMaruti Suzuki,Ertiga,\"Rs. 10,59,000\",1690 mm,4395 mm,1735 mm,MPV,Diesel,1498 cc,Yes,Yes,,Not on offer,Yes,2,,Yes,\n"
        );
        let rows = read_vehicles(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.make.as_deref(), Some("Maruti Suzuki"));
        assert_eq!(row.model, "Ertiga");
        assert_eq!(row.ex_showroom_price.as_deref(), Some("Rs. 10,59,000"));
        assert_eq!(row.fuel_type.as_deref(), Some("Diesel"));
        assert_eq!(row.displacement.as_deref(), Some("1498 cc"));
        assert_eq!(row.keyless_entry, None);
        assert_eq!(row.cruise_control, None);
        assert_eq!(row.number_of_airbags.as_deref(), Some("2"));
    }

    #[test]
    fn test_empty_fields_become_none() {
        let data = format!("{HEADER}\n,Nano,,,,,,,,,,,,,,,,\n");
        let rows = read_vehicles(data.as_bytes()).unwrap();

        assert_eq!(rows[0].make, None);
        assert_eq!(rows[0].ex_showroom_price, None);
        assert_eq!(rows[0].body_type, None);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let data = format!("{HEADER},Odometer\nTata,Tiago,\"Rs. 5,00,000\",,,,Hatchback,Petrol,1199 cc,Yes,Yes,,,,2,,,,Analog\n");
        let rows = read_vehicles(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].make.as_deref(), Some("Tata"));
    }

    #[test]
    fn test_missing_columns_named_in_error() {
        let data = "Make,Model,Height\nTata,Tiago,1535 mm\n";
        let err = read_vehicles(data.as_bytes()).unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("missing required column"));
        assert!(msg.contains("Ex-Showroom_Price"));
        assert!(msg.contains("Fuel_Type"));
        assert!(!msg.contains("Height,"));
    }
}
