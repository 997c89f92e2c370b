//! In-memory store implementations.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::models::{DailyTipPool, Employee, EmployeeId, NewShift, Shift, ShiftId};
use crate::validation::intervals_overlap;

use super::{EmployeeStore, ShiftStore, StoreError, StoreResult, TipPoolStore};

/// Employee directory held in memory.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeStore {
    employees: RwLock<HashMap<EmployeeId, Employee>>,
}

impl InMemoryEmployeeStore {
    /// Creates a store holding `employees`. Later duplicates of an id win.
    pub fn new(employees: impl IntoIterator<Item = Employee>) -> Self {
        Self {
            employees: RwLock::new(employees.into_iter().map(|e| (e.id, e)).collect()),
        }
    }

    /// Changes an employee's display name. Returns false if the id is unknown.
    pub async fn rename(&self, id: EmployeeId, name: impl Into<String>) -> bool {
        match self.employees.write().await.get_mut(&id) {
            Some(employee) => {
                employee.name = name.into();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn get_by_id(&self, id: EmployeeId) -> StoreResult<Option<Employee>> {
        Ok(self.employees.read().await.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.employees.read().await.values().cloned().collect())
    }
}

#[derive(Debug, Default)]
struct ShiftTable {
    next_id: ShiftId,
    shifts: BTreeMap<ShiftId, Shift>,
}

impl ShiftTable {
    /// Finds a shift that would double-book the employee, ignoring `exclude`.
    fn conflicting(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
        exclude: Option<ShiftId>,
    ) -> Option<ShiftId> {
        self.shifts
            .values()
            .filter(|s| s.employee_id == employee_id && s.date == date)
            .filter(|s| Some(s.id) != exclude)
            .find(|s| intervals_overlap(start, end, s.start_time, s.end_time))
            .map(|s| s.id)
    }
}

/// Shift table held in memory.
///
/// Inserts and replacements enforce the no-double-booking constraint under
/// the table's write lock, so a write that raced past service-level
/// validation fails with [`StoreError::Conflict`] instead of committing.
#[derive(Debug, Default)]
pub struct InMemoryShiftStore {
    table: RwLock<ShiftTable>,
}

impl InMemoryShiftStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShiftStore for InMemoryShiftStore {
    async fn shifts_in_range(&self, start: NaiveDate, end: NaiveDate) -> StoreResult<Vec<Shift>> {
        let table = self.table.read().await;
        let mut shifts: Vec<Shift> = table
            .shifts
            .values()
            .filter(|s| s.date >= start && s.date <= end)
            .cloned()
            .collect();
        shifts.sort_by_key(|s| (s.date, s.start_time, s.id));
        Ok(shifts)
    }

    async fn shift_by_id(&self, id: ShiftId) -> StoreResult<Option<Shift>> {
        Ok(self.table.read().await.shifts.get(&id).cloned())
    }

    async fn shifts_for_employee_on(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> StoreResult<Vec<Shift>> {
        let table = self.table.read().await;
        Ok(table
            .shifts
            .values()
            .filter(|s| s.employee_id == employee_id && s.date == date)
            .cloned()
            .collect())
    }

    async fn insert(&self, shift: NewShift) -> StoreResult<Shift> {
        let mut table = self.table.write().await;

        if let Some(existing_shift_id) = table.conflicting(
            shift.employee_id,
            shift.date,
            shift.start_time,
            shift.end_time,
            None,
        ) {
            return Err(StoreError::Conflict { existing_shift_id });
        }

        table.next_id += 1;
        let stored = shift.into_shift(table.next_id);
        table.shifts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn replace(&self, shift: Shift) -> StoreResult<()> {
        let mut table = self.table.write().await;

        if !table.shifts.contains_key(&shift.id) {
            return Err(StoreError::Missing(shift.id));
        }
        if let Some(existing_shift_id) = table.conflicting(
            shift.employee_id,
            shift.date,
            shift.start_time,
            shift.end_time,
            Some(shift.id),
        ) {
            return Err(StoreError::Conflict { existing_shift_id });
        }

        table.shifts.insert(shift.id, shift);
        Ok(())
    }

    async fn remove(&self, id: ShiftId) -> StoreResult<()> {
        self.table
            .write()
            .await
            .shifts
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::Missing(id))
    }
}

/// Daily tip pools held in memory, one per date.
#[derive(Debug, Default)]
pub struct InMemoryTipPoolStore {
    pools: RwLock<BTreeMap<NaiveDate, Decimal>>,
}

impl InMemoryTipPoolStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TipPoolStore for InMemoryTipPoolStore {
    async fn upsert(&self, date: NaiveDate, amount: Decimal) -> StoreResult<()> {
        self.pools.write().await.insert(date, amount);
        Ok(())
    }

    async fn pools_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<DailyTipPool>> {
        if start > end {
            return Ok(Vec::new());
        }
        Ok(self
            .pools
            .read()
            .await
            .range(start..=end)
            .map(|(date, amount)| DailyTipPool::new(*date, *amount))
            .collect())
    }
}
