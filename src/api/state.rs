//! Application state for the JustTip API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::PayoutRounding;
use crate::config::ConfigLoader;
use crate::models::Employee;
use crate::services::{RosterService, TipService};
use crate::store::{InMemoryEmployeeStore, InMemoryShiftStore, InMemoryTipPoolStore};
use crate::validation::{BusinessClock, SystemClock};

/// Shared application state.
///
/// Holds the two services. Cloning is cheap; every clone shares the same
/// stores.
#[derive(Clone)]
pub struct AppState {
    roster: Arc<RosterService>,
    tips: Arc<TipService>,
}

impl AppState {
    /// Creates a new application state from already-built services.
    pub fn new(roster: RosterService, tips: TipService) -> Self {
        Self {
            roster: Arc::new(roster),
            tips: Arc::new(tips),
        }
    }

    /// Wires both services over fresh in-memory stores.
    pub fn in_memory(
        employees: impl IntoIterator<Item = Employee>,
        clock: Arc<dyn BusinessClock>,
        rounding: PayoutRounding,
    ) -> Self {
        let employees = Arc::new(InMemoryEmployeeStore::new(employees));
        let shifts = Arc::new(InMemoryShiftStore::new());
        let pools = Arc::new(InMemoryTipPoolStore::new());

        let roster = RosterService::new(shifts.clone(), employees.clone(), clock);
        let tips = TipService::new(shifts, pools, employees, rounding);
        Self::new(roster, tips)
    }

    /// Builds in-memory state from loaded configuration, using the host's
    /// local date as the business day.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self::in_memory(
            config.employees().to_vec(),
            Arc::new(SystemClock),
            config.rounding(),
        )
    }

    /// Returns the roster service.
    pub fn roster(&self) -> &RosterService {
        &self.roster
    }

    /// Returns the tip service.
    pub fn tips(&self) -> &TipService {
        &self.tips
    }
}
