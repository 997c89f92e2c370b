//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading service
//! settings and the employee directory from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::calculation::PayoutRounding;
use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

use super::types::{EmployeeDirectory, Settings};

/// Loads and provides access to service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml   # Server and payout settings
/// └── employees.yaml  # Employee directory
/// ```
///
/// # Example
///
/// ```no_run
/// use justtip::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Listening on {}", loader.settings().server.bind_address);
/// println!("{} employees", loader.employees().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: Settings,
    employees: Vec<Employee>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if a required file is missing
    /// - [`EngineError::ConfigParseError`] if a file contains invalid YAML,
    ///   lacks a required field, or lists an employee id twice
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("settings.yaml"))?;

        let employees_path = path.join("employees.yaml");
        let directory = Self::load_yaml::<EmployeeDirectory>(&employees_path)?;

        let mut seen = HashSet::new();
        for entry in &directory.employees {
            if !seen.insert(entry.id) {
                return Err(EngineError::ConfigParseError {
                    path: employees_path.display().to_string(),
                    message: format!("duplicate employee id {}", entry.id),
                });
            }
        }

        Ok(Self {
            settings,
            employees: directory.employees.into_iter().map(Employee::from).collect(),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the service settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the configured payout rounding strategy.
    pub fn rounding(&self) -> PayoutRounding {
        self.settings.payout.rounding
    }

    /// Returns the employee directory in file order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}
