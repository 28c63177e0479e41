use crate::error::DatasetError;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const EMBEDDED_DATASET: &str = include_str!("resources/companies.csv");

/// One row of the company table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub name: String,
    pub industry: String,
    pub founded: i32,
    pub headquarters: String,
    pub fortune_rank: u32,
    pub ceo: String,
}

pub fn load_dataset_from_str(data: &str) -> Result<Vec<CompanyRecord>, DatasetError> {
    load_dataset(data.as_bytes())
}

pub fn load_dataset_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<CompanyRecord>, DatasetError> {
    let file = File::open(path)?;
    load_dataset(file)
}

fn load_dataset<R: Read>(reader: R) -> Result<Vec<CompanyRecord>, DatasetError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let mut companies = Vec::new();
    let mut seen = HashSet::new();
    for (index, result) in reader.deserialize::<CompanyRecord>().enumerate() {
        let company = result?;
        if company.fortune_rank == 0 {
            return Err(DatasetError::InvalidRank { name: company.name });
        }
        if !seen.insert(company.name.clone()) {
            // Header is row 1.
            return Err(DatasetError::DuplicateName {
                name: company.name,
                row: index + 2,
            });
        }
        companies.push(company);
    }

    if companies.is_empty() {
        return Err(DatasetError::Empty);
    }
    log::info!("Loaded {} companies", companies.len());
    Ok(companies)
}
