//! Configuration loading for the JustTip service.
//!
//! A configuration directory holds `settings.yaml` (bind address, payout
//! rounding) and `employees.yaml` (the employee directory).
//!
//! # Example
//!
//! ```no_run
//! use justtip::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Rounding: {:?}", config.rounding());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EmployeeDirectory, EmployeeEntry, PayoutSettings, ServerSettings, Settings};
