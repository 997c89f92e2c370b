//! Shift scheduling.
//!
//! Every mutation runs the same pipeline and aborts before any write on the
//! first failure:
//!
//! 1. range check ([`validate_range`])
//! 2. retroactive guard ([`assert_not_past`])
//! 3. employee lookup
//! 4. per-(employee, date) lock, overlap check ([`has_overlap`]), commit

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{UNKNOWN_EMPLOYEE_NAME, hours_from_seconds};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, EmployeeId, EmployeeRoster, NewShift, Shift, ShiftId, ShiftView, Week, WeeklyRoster,
};
use crate::store::{EmployeeStore, ShiftLocks, ShiftStore};
use crate::validation::{BusinessClock, assert_not_past, has_overlap, validate_range};

/// Creates, updates, deletes and lists shifts.
pub struct RosterService {
    shifts: Arc<dyn ShiftStore>,
    employees: Arc<dyn EmployeeStore>,
    clock: Arc<dyn BusinessClock>,
    locks: ShiftLocks,
}

impl RosterService {
    /// Creates a roster service over the given stores and clock.
    pub fn new(
        shifts: Arc<dyn ShiftStore>,
        employees: Arc<dyn EmployeeStore>,
        clock: Arc<dyn BusinessClock>,
    ) -> Self {
        Self {
            shifts,
            employees,
            clock,
            locks: ShiftLocks::new(),
        }
    }

    /// Schedules a new shift and returns it with the employee's name.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidRange`] if `start_time >= end_time`
    /// - [`EngineError::RetroactiveEdit`] if the date is before today
    /// - [`EngineError::EmployeeNotFound`] if the employee is unknown
    /// - [`EngineError::OverlapConflict`] if the employee is already booked
    /// - [`EngineError::ConcurrencyConflict`] if a concurrent writer won the slot
    pub async fn create_shift(&self, request: NewShift) -> EngineResult<ShiftView> {
        validate_range(request.start_time, request.end_time)?;
        assert_not_past(request.date, self.clock.today())?;
        let employee = self.require_employee(request.employee_id).await?;

        let _slot = self.locks.acquire(request.employee_id, request.date).await;
        self.ensure_no_overlap(&request, None).await?;

        let (employee_id, date) = (request.employee_id, request.date);
        let shift = self
            .shifts
            .insert(request)
            .await
            .map_err(|e| e.into_write_error(employee_id, date))?;

        info!(
            shift_id = shift.id,
            employee_id = shift.employee_id,
            date = %shift.date,
            start = %shift.start_time,
            end = %shift.end_time,
            "Shift created"
        );
        Ok(shift.with_employee_name(employee.name))
    }

    /// Replaces the fields of an existing shift, keeping its id.
    ///
    /// Both the shift's current date and the requested date must be today
    /// or later. The overlap check ignores the shift's own prior record.
    ///
    /// # Errors
    ///
    /// As [`RosterService::create_shift`], plus
    /// [`EngineError::ShiftNotFound`] if `id` does not exist.
    pub async fn update_shift(&self, id: ShiftId, request: NewShift) -> EngineResult<ShiftView> {
        validate_range(request.start_time, request.end_time)?;
        let existing = self.require_shift(id).await?;

        let today = self.clock.today();
        assert_not_past(existing.date, today)?;
        assert_not_past(request.date, today)?;

        let employee = self.require_employee(request.employee_id).await?;

        let _slot = self.locks.acquire(request.employee_id, request.date).await;
        self.ensure_no_overlap(&request, Some(id)).await?;

        let (employee_id, date) = (request.employee_id, request.date);
        let updated = request.into_shift(id);
        self.shifts
            .replace(updated.clone())
            .await
            .map_err(|e| e.into_write_error(employee_id, date))?;

        info!(
            shift_id = id,
            employee_id,
            from_date = %existing.date,
            date = %updated.date,
            start = %updated.start_time,
            end = %updated.end_time,
            "Shift updated"
        );
        Ok(updated.with_employee_name(employee.name))
    }

    /// Removes a shift dated today or later.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ShiftNotFound`] if `id` does not exist
    /// - [`EngineError::RetroactiveEdit`] if the shift is dated before today
    pub async fn delete_shift(&self, id: ShiftId) -> EngineResult<()> {
        let existing = self.require_shift(id).await?;
        assert_not_past(existing.date, self.clock.today())?;

        let _slot = self.locks.acquire(existing.employee_id, existing.date).await;
        self.shifts.remove(id).await?;

        info!(shift_id = id, employee_id = existing.employee_id, date = %existing.date, "Shift deleted");
        Ok(())
    }

    /// Returns a single shift with the employee's name.
    pub async fn get_shift(&self, id: ShiftId) -> EngineResult<ShiftView> {
        let shift = self.require_shift(id).await?;
        let name = self
            .employees
            .get_by_id(shift.employee_id)
            .await?
            .map(|e| e.name)
            .unwrap_or_else(|| UNKNOWN_EMPLOYEE_NAME.to_string());
        Ok(shift.with_employee_name(name))
    }

    /// Returns every shift in `[start_date, start_date + 6]`, ordered by
    /// date, start time, then id.
    pub async fn get_shifts_for_week(&self, start_date: NaiveDate) -> EngineResult<Vec<ShiftView>> {
        let week = Week::starting(start_date);
        let mut shifts = self
            .shifts
            .shifts_in_range(week.start_date, week.end_date())
            .await?;
        shifts.sort_by_key(|s| (s.date, s.start_time, s.id));

        let names = self.employee_names().await?;
        Ok(shifts
            .into_iter()
            .map(|s| {
                let name = names
                    .get(&s.employee_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_EMPLOYEE_NAME.to_string());
                s.with_employee_name(name)
            })
            .collect())
    }

    /// Returns the week's shifts, both as one ordered list and grouped by
    /// employee with per-employee total hours.
    pub async fn get_weekly_roster(&self, start_date: NaiveDate) -> EngineResult<WeeklyRoster> {
        let week = Week::starting(start_date);
        let shifts = self.get_shifts_for_week(start_date).await?;

        let mut grouped: BTreeMap<EmployeeId, (EmployeeRoster, i64)> = BTreeMap::new();
        for shift in &shifts {
            let (entry, seconds) = grouped.entry(shift.employee_id).or_insert_with(|| {
                let roster = EmployeeRoster {
                    employee_id: shift.employee_id,
                    employee_name: shift.employee_name.clone(),
                    total_hours: Decimal::ZERO,
                    shifts: Vec::new(),
                };
                (roster, 0)
            });
            *seconds += shift.duration_seconds();
            entry.shifts.push(shift.clone());
        }

        let mut employees: Vec<EmployeeRoster> = grouped
            .into_values()
            .map(|(mut roster, seconds)| {
                roster.total_hours = hours_from_seconds(seconds);
                roster
            })
            .collect();
        employees.sort_by(|a, b| {
            a.employee_name
                .cmp(&b.employee_name)
                .then(a.employee_id.cmp(&b.employee_id))
        });

        debug!(week_start = %week.start_date, shifts = shifts.len(), "Built weekly roster");
        Ok(WeeklyRoster {
            week_start: week.start_date,
            week_end: week.end_date(),
            shifts,
            employees,
        })
    }

    /// Returns every employee, sorted by name then id.
    pub async fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        let mut employees = self.employees.list().await?;
        employees.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(employees)
    }

    async fn require_employee(&self, employee_id: EmployeeId) -> EngineResult<Employee> {
        self.employees
            .get_by_id(employee_id)
            .await?
            .ok_or(EngineError::EmployeeNotFound { employee_id })
    }

    async fn require_shift(&self, shift_id: ShiftId) -> EngineResult<Shift> {
        self.shifts
            .shift_by_id(shift_id)
            .await?
            .ok_or(EngineError::ShiftNotFound { shift_id })
    }

    async fn ensure_no_overlap(
        &self,
        request: &NewShift,
        exclude_shift_id: Option<ShiftId>,
    ) -> EngineResult<()> {
        let existing = self
            .shifts
            .shifts_for_employee_on(request.employee_id, request.date)
            .await?;

        if has_overlap(request, &existing, exclude_shift_id) {
            warn!(
                employee_id = request.employee_id,
                date = %request.date,
                start = %request.start_time,
                end = %request.end_time,
                "Rejected overlapping shift"
            );
            return Err(EngineError::OverlapConflict {
                employee_id: request.employee_id,
                date: request.date,
                start: request.start_time,
                end: request.end_time,
            });
        }
        Ok(())
    }

    async fn employee_names(&self) -> EngineResult<HashMap<EmployeeId, String>> {
        Ok(self
            .employees
            .list()
            .await?
            .into_iter()
            .map(|e| (e.id, e.name))
            .collect())
    }
}
