//! Read-only company reference data loaded from a CSV file.
//!
//! The catalog is built explicitly at startup and shared through
//! `AppState`. `reload` swaps in a fresh snapshot only when the whole file
//! parses; a bad file never replaces a good catalog.

use crate::models::company::Company;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed catalog row {row}: {source}")]
    Csv { row: u64, source: csv::Error },
    #[error("Catalog row {row}: missing {field}")]
    MissingField { row: u64, field: &'static str },
    #[error("Catalog row {row}: company {company_id} has invalid days_before_deactivation {value:?}")]
    InvalidDays {
        row: u64,
        company_id: String,
        value: String,
    },
    #[error("Catalog row {row}: duplicate company id {company_id}")]
    DuplicateCompany { row: u64, company_id: String },
}

#[derive(Debug, Deserialize)]
struct CompanyRecord {
    company_id: Option<String>,
    company_name: Option<String>,
    days_before_deactivation: Option<String>,
    #[serde(default)]
    link_to_policy: Option<String>,
    #[serde(default)]
    activities_to_avoid_deactivation: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse catalog CSV (header row required) into companies, in file order.
///
/// Fails on the first bad row; rows are numbered from 1 after the header.
pub fn parse_companies<R: Read>(reader: R) -> Result<Vec<Company>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut companies = Vec::new();
    let mut seen = HashSet::new();

    for (index, result) in csv_reader.deserialize::<CompanyRecord>().enumerate() {
        let row = index as u64 + 1;
        let record = result.map_err(|source| CatalogError::Csv { row, source })?;

        let id = non_empty(record.company_id).ok_or(CatalogError::MissingField {
            row,
            field: "company_id",
        })?;
        let name = non_empty(record.company_name).ok_or(CatalogError::MissingField {
            row,
            field: "company_name",
        })?;

        let raw_days = record.days_before_deactivation.unwrap_or_default();
        let days_before_deactivation =
            raw_days
                .parse::<u32>()
                .map_err(|_| CatalogError::InvalidDays {
                    row,
                    company_id: id.clone(),
                    value: raw_days.clone(),
                })?;

        if !seen.insert(id.clone()) {
            return Err(CatalogError::DuplicateCompany {
                row,
                company_id: id,
            });
        }

        companies.push(Company {
            id,
            name,
            days_before_deactivation,
            policy_link: non_empty(record.link_to_policy),
            activities_to_avoid_deactivation: non_empty(record.activities_to_avoid_deactivation),
        });
    }

    Ok(companies)
}

pub fn load_companies(path: &Path) -> Result<Vec<Company>, CatalogError> {
    let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_companies(file)
}

pub struct CompanyCatalog {
    path: Option<PathBuf>,
    companies: RwLock<Arc<Vec<Company>>>,
}

impl CompanyCatalog {
    /// Load the catalog from `path`; the same path is used by `reload`.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let companies = load_companies(&path)?;
        tracing::info!(
            "Loaded {} companies from {}",
            companies.len(),
            path.display()
        );

        Ok(Self {
            path: Some(path),
            companies: RwLock::new(Arc::new(companies)),
        })
    }

    /// A fixed catalog with no backing file.
    pub fn from_companies(companies: Vec<Company>) -> Self {
        Self {
            path: None,
            companies: RwLock::new(Arc::new(companies)),
        }
    }

    pub async fn list(&self) -> Arc<Vec<Company>> {
        self.companies.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Company> {
        self.companies
            .read()
            .await
            .iter()
            .find(|company| company.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.companies.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Re-read the backing file and swap in the new snapshot.
    ///
    /// Returns the number of companies now loaded. On failure the previous
    /// snapshot stays in place.
    pub async fn reload(&self) -> Result<usize, CatalogError> {
        let Some(path) = self.path.as_ref() else {
            return Ok(self.len().await);
        };

        match load_companies(path) {
            Ok(companies) => {
                let count = companies.len();
                *self.companies.write().await = Arc::new(companies);
                tracing::info!("Reloaded {} companies from {}", count, path.display());
                Ok(count)
            }
            Err(e) => {
                tracing::warn!("Catalog reload failed, keeping previous snapshot: {}", e);
                Err(e)
            }
        }
    }
}
