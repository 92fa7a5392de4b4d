//! City catalogue searched by the demo.
//!
//! Cities are labelled "City, Region, Country".

use std::fs;
use std::path::Path;

use lookup::ResultRecord;

use crate::error::AppError;

const CITIES: &[(&str, &str, &str)] = &[
    ("Amsterdam", "North Holland", "Netherlands"),
    ("Ann Arbor", "Michigan", "United States"),
    ("Antwerp", "Flanders", "Belgium"),
    ("Atlanta", "Georgia", "United States"),
    ("Austin", "Texas", "United States"),
    ("Barcelona", "Catalonia", "Spain"),
    ("Berlin", "Berlin", "Germany"),
    ("Bern", "Bern", "Switzerland"),
    ("Boston", "Massachusetts", "United States"),
    ("Brussels", "Brussels-Capital", "Belgium"),
    ("Buenos Aires", "Buenos Aires", "Argentina"),
    ("Chicago", "Illinois", "United States"),
    ("Copenhagen", "Capital Region", "Denmark"),
    ("Dublin", "Leinster", "Ireland"),
    ("Edinburgh", "Scotland", "United Kingdom"),
    ("Helsinki", "Uusimaa", "Finland"),
    ("Lisbon", "Lisbon", "Portugal"),
    ("London", "England", "United Kingdom"),
    ("Lyon", "Auvergne-Rhone-Alpes", "France"),
    ("Madrid", "Community of Madrid", "Spain"),
    ("Manchester", "England", "United Kingdom"),
    ("Montreal", "Quebec", "Canada"),
    ("Munich", "Bavaria", "Germany"),
    ("Oslo", "Oslo", "Norway"),
    ("Paris", "Ile-de-France", "France"),
    ("Philadelphia", "Pennsylvania", "United States"),
    ("Portland", "Maine", "United States"),
    ("Portland", "Oregon", "United States"),
    ("Porto", "Norte", "Portugal"),
    ("Prague", "Prague", "Czech Republic"),
    ("San Diego", "California", "United States"),
    ("San Francisco", "California", "United States"),
    ("Santiago", "Santiago Metropolitan", "Chile"),
    ("Sao Paulo", "Sao Paulo", "Brazil"),
    ("Seattle", "Washington", "United States"),
    ("Stockholm", "Stockholm", "Sweden"),
    ("Sydney", "New South Wales", "Australia"),
    ("Tokyo", "Tokyo", "Japan"),
    ("Toronto", "Ontario", "Canada"),
    ("Vancouver", "British Columbia", "Canada"),
    ("Vienna", "Vienna", "Austria"),
    ("Warsaw", "Masovia", "Poland"),
    ("Zurich", "Zurich", "Switzerland"),
];

/// The built-in cities, ids starting at 1.
pub fn builtin() -> Vec<ResultRecord> {
    CITIES
        .iter()
        .enumerate()
        .map(|(i, (name, region, country))| {
            ResultRecord::new(i + 1, format!("{}, {}, {}", name, region, country))
                .with_extra("name", *name)
                .with_extra("region", *region)
                .with_extra("country", *country)
        })
        .collect()
}

/// Read a JSON array of records.
pub fn load(path: &Path) -> Result<Vec<ResultRecord>, AppError> {
    let raw = fs::read_to_string(path).map_err(|source| AppError::Catalog {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<ResultRecord> =
        serde_json::from_str(&raw).map_err(|source| AppError::CatalogFormat {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}
