//! Static catalog data and external tuning files
//!
//! The department catalog is built in; the availability tuning tables can
//! be overridden from RON files.

pub mod departments;
pub mod loader;

pub use departments::{
    all_departments, departments_for_faculty, find_department, Department, Faculty, TargetFaculty,
};
pub use loader::{DataError, DataManager, DepartmentTables};
