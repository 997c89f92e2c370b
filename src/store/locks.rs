//! Per-(employee, date) write locks.
//!
//! Overlap validation and the write that follows it must not interleave
//! with another writer targeting the same employee and date. The roster
//! service holds one of these guards across check-then-write.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

use crate::models::EmployeeId;

type SlotKey = (EmployeeId, NaiveDate);

/// An in-process keyed mutex over `(employee_id, date)`.
///
/// Writers for different keys never contend. Idle slots are pruned on the
/// next acquisition.
#[derive(Debug, Default)]
pub struct ShiftLocks {
    slots: Mutex<HashMap<SlotKey, Arc<Mutex<()>>>>,
}

impl ShiftLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `(employee_id, date)`.
    ///
    /// The slot stays locked until the returned guard is dropped.
    pub async fn acquire(&self, employee_id: EmployeeId, date: NaiveDate) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().await;
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            slots
                .entry((employee_id, date))
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        trace!(employee_id, %date, "Acquiring shift slot lock");
        slot.lock_owned().await
    }

    #[cfg(test)]
    async fn tracked_slots(&self) -> usize {
        self.slots.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let locks = Arc::new(ShiftLocks::new());
        let guard = locks.acquire(1, day(10)).await;

        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire(1, day(10)).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("contender should acquire after release")
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_keys_do_not_contend() {
        let locks = ShiftLocks::new();
        let _a = locks.acquire(1, day(10)).await;

        let b = tokio::time::timeout(Duration::from_secs(1), locks.acquire(1, day(11))).await;
        let c = tokio::time::timeout(Duration::from_secs(1), locks.acquire(2, day(10))).await;

        assert!(b.is_ok());
        assert!(c.is_ok());
    }

    #[tokio::test]
    async fn test_idle_slots_are_pruned() {
        let locks = ShiftLocks::new();
        drop(locks.acquire(1, day(10)).await);
        drop(locks.acquire(2, day(10)).await);

        let _held = locks.acquire(3, day(10)).await;

        assert_eq!(locks.tracked_slots().await, 1);
    }
}
