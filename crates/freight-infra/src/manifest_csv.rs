//! CSV loader for package manifests
//!
//! Expected header (case-insensitive, any order):
//! quantity,weight,height,width,length,packaging
//!
//! Optional columns: units, hazmat, freight_class, nmfc, description.
//! Bare numbers are read in the row's unit system, falling back to the
//! caller's defaults.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use freight_domain::model::{
    DimensionsInput, FreightClass, LengthInput, Package, PackageDefaults, PackageInput,
    PackageOptions, WeightInput,
};
use freight_types::UnitSystem;
use thiserror::Error;
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 6] = ["quantity", "weight", "height", "width", "length", "packaging"];

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid number format in row {row}, column {column}: {value}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Invalid freight class in row {row}: {value}")]
    InvalidFreightClass { row: usize, value: String },

    #[error("Invalid unit system in row {row}: {value}")]
    InvalidUnits { row: usize, value: String },

    #[error("Invalid package in row {row}: {message}")]
    InvalidPackage { row: usize, message: String },
}

impl From<ManifestError> for freight_types::Error {
    fn from(err: ManifestError) -> Self {
        freight_types::Error::Manifest(err.to_string())
    }
}

/// Load packages from a manifest CSV file
pub fn load_packages_from_csv<P: AsRef<Path>>(
    path: P,
    defaults: &PackageDefaults,
) -> Result<Vec<Package>, ManifestError> {
    let mut file = File::open(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    load_packages_from_reader(content.as_bytes(), defaults)
}

/// Load packages from any CSV source
pub fn load_packages_from_reader<R: Read>(
    source: R,
    defaults: &PackageDefaults,
) -> Result<Vec<Package>, ManifestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let columns = column_index(reader.headers()?)?;

    let mut packages = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        // header is row 1
        let row_num = row_idx + 2;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let input = parse_record(&record, &columns, row_num)?;
        let package =
            Package::from_input(input, defaults).map_err(|e| ManifestError::InvalidPackage {
                row: row_num,
                message: e.to_string(),
            })?;
        packages.push(package);
    }

    debug!(packages = packages.len(), "loaded package manifest");
    Ok(packages)
}

fn column_index(headers: &csv::StringRecord) -> Result<HashMap<String, usize>, ManifestError> {
    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();

    for col in REQUIRED_COLUMNS {
        if !columns.contains_key(col) {
            return Err(ManifestError::MissingColumn(col.to_string()));
        }
    }

    Ok(columns)
}

fn field<'r>(
    record: &'r csv::StringRecord,
    columns: &HashMap<String, usize>,
    name: &str,
) -> Option<&'r str> {
    columns
        .get(name)
        .and_then(|&i| record.get(i))
        .filter(|s| !s.is_empty())
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &HashMap<String, usize>,
    row_num: usize,
) -> Result<PackageInput, ManifestError> {
    let quantity = field(record, columns, "quantity")
        .map(|s| {
            s.parse::<i64>().map_err(|_| ManifestError::InvalidNumber {
                row: row_num,
                column: "quantity".to_string(),
                value: s.to_string(),
            })
        })
        .transpose()?;

    let weight = field(record, columns, "weight")
        .map(|s| parse_f64(s, row_num, "weight"))
        .transpose()?
        .map(WeightInput::Raw);

    let mut dimensions = Vec::with_capacity(3);
    for column in ["height", "width", "length"] {
        let value = field(record, columns, column)
            .map(|s| parse_f64(s, row_num, column))
            .transpose()?;
        dimensions.push(value.map(LengthInput::Raw));
    }

    let units = field(record, columns, "units")
        .map(|s| parse_units(s, row_num))
        .transpose()?;

    let declared_freight_class = field(record, columns, "freight_class")
        .map(|s| {
            parse_f64(s, row_num, "freight_class").and_then(|v| {
                FreightClass::from_value(v).ok_or_else(|| ManifestError::InvalidFreightClass {
                    row: row_num,
                    value: s.to_string(),
                })
            })
        })
        .transpose()?;

    let options = PackageOptions {
        units,
        declared_freight_class,
        hazmat: field(record, columns, "hazmat").is_some_and(parse_flag),
        nmfc: field(record, columns, "nmfc").map(str::to_string),
        description: field(record, columns, "description").map(str::to_string),
        ..Default::default()
    };

    Ok(PackageInput {
        quantity,
        weight,
        dimensions: DimensionsInput::List(dimensions),
        packaging: field(record, columns, "packaging").map(str::to_string),
        options,
    })
}

fn parse_f64(s: &str, row: usize, column: &str) -> Result<f64, ManifestError> {
    let cleaned = s.trim().replace(',', "");
    cleaned.parse().map_err(|_| ManifestError::InvalidNumber {
        row,
        column: column.to_string(),
        value: s.to_string(),
    })
}

fn parse_units(s: &str, row: usize) -> Result<UnitSystem, ManifestError> {
    match s.trim().to_lowercase().as_str() {
        "metric" => Ok(UnitSystem::Metric),
        "imperial" => Ok(UnitSystem::Imperial),
        _ => Err(ManifestError::InvalidUnits {
            row,
            value: s.to_string(),
        }),
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "y" | "x")
}
