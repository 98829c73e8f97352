//! RON data loader
//!
//! Loads the per-department tuning tables from an external RON file, with
//! fallback to the built-in defaults.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default location of the data files, relative to the working directory
pub const DATA_DIR: &str = "assets/data";
/// File name of the department tables
pub const DEPARTMENTS_FILE: &str = "departments.ron";

/// Failure reading or writing a data file
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to access {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] ron::Error),
}

/// Lookup tables driving the case availability calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentTables {
    /// Size of each department's case pool before multipliers
    pub base_counts: BTreeMap<String, u32>,
    /// Share of the user's completed cases attributed to each department
    pub completion_ratios: BTreeMap<String, f64>,
    /// Pool size for departments missing from `base_counts`
    pub default_base_count: u32,
    /// Ratio for departments missing from `completion_ratios`
    pub default_completion_ratio: f64,
}

impl Default for DepartmentTables {
    fn default() -> Self {
        let base_counts = [
            // Medicine departments (generally more cases)
            ("cardiology", 35),
            ("neurology", 28),
            ("pediatrics", 22),
            ("emergency", 45),
            // Pharmacy departments (more focused case sets)
            ("clinical-pharmacy", 38),
            ("pharmacology", 31),
            ("pharmaceutical-care", 26),
            ("drug-safety", 19),
            // Collaborative departments
            ("interdisciplinary", 15),
            ("precision-medicine", 12),
        ];
        let completion_ratios = [
            ("cardiology", 0.15),
            ("emergency", 0.08),
            ("pediatrics", 0.12),
            ("clinical-pharmacy", 0.18),
            ("drug-safety", 0.22),
            ("interdisciplinary", 0.05),
        ];

        Self {
            base_counts: base_counts
                .iter()
                .map(|&(id, count)| (id.to_string(), count))
                .collect(),
            completion_ratios: completion_ratios
                .iter()
                .map(|&(id, ratio)| (id.to_string(), ratio))
                .collect(),
            default_base_count: 20,
            default_completion_ratio: 0.10,
        }
    }
}

impl DepartmentTables {
    /// Base case count for a department id
    pub fn base_count(&self, department_id: &str) -> u32 {
        self.base_counts
            .get(department_id)
            .copied()
            .unwrap_or(self.default_base_count)
    }

    /// Completion ratio for a department id
    pub fn completion_ratio(&self, department_id: &str) -> f64 {
        self.completion_ratios
            .get(department_id)
            .copied()
            .unwrap_or(self.default_completion_ratio)
    }
}

/// Manages external tuning data
#[derive(Debug, Clone, Default)]
pub struct DataManager {
    pub tables: DepartmentTables,
}

impl DataManager {
    /// Load from `assets/data/`, falling back to defaults
    pub fn new() -> Self {
        Self::load_from(Path::new(DATA_DIR))
    }

    /// Load from a data directory, falling back to defaults per file
    pub fn load_from(base_path: &Path) -> Self {
        let path = base_path.join(DEPARTMENTS_FILE);
        let tables = if path.exists() {
            match load_tables(&path) {
                Ok(tables) => {
                    log::info!("Department tables loaded from {:?}", path);
                    tables
                }
                Err(e) => {
                    log::warn!("{}, using built-in tables", e);
                    DepartmentTables::default()
                }
            }
        } else {
            DepartmentTables::default()
        };
        Self { tables }
    }

    /// Get department tables
    pub fn department_tables(&self) -> &DepartmentTables {
        &self.tables
    }
}

/// Read and parse a department tables file
pub fn load_tables(path: &Path) -> Result<DepartmentTables, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Export the built-in tables to `<base_path>/departments.ron` for editing
pub fn export_default_data(base_path: &Path) -> Result<(), DataError> {
    fs::create_dir_all(base_path).map_err(|source| DataError::Io {
        path: base_path.to_path_buf(),
        source,
    })?;

    let tables_ron = ron::ser::to_string_pretty(
        &DepartmentTables::default(),
        ron::ser::PrettyConfig::default(),
    )?;
    let path = base_path.join(DEPARTMENTS_FILE);
    fs::write(&path, tables_ron).map_err(|source| DataError::Io { path, source })?;
    Ok(())
}
