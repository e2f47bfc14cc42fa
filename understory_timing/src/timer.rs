// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer queue: one‑shot and repeating timers over caller‑supplied time.
//!
//! ## Usage
//!
//! 1) Schedule timers with [`TimerQueue::schedule_once`] or
//!    [`TimerQueue::schedule_repeating`], keeping the returned [`TimerId`] to cancel later.
//! 2) Arm a host wakeup for [`TimerQueue::next_deadline`].
//! 3) On wakeup, drain [`TimerQueue::pop_due`] until it returns `None`.
//!
//! A repeating timer fires at most once per drain: when the host wakes up
//! late, missed ticks are skipped rather than replayed back to back.

use hashbrown::HashMap;

/// Identifier of a scheduled timer.
///
/// Ids are never reused by the queue that issued them, so a cancelled or
/// fired id cannot alias a newer timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A timer returned by [`TimerQueue::pop_due`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FiredTimer<K> {
    /// Id of the timer that fired.
    pub id: TimerId,
    /// Caller data attached when the timer was scheduled.
    pub key: K,
    /// The deadline that was reached.
    pub deadline: u64,
}

#[derive(Clone, Debug)]
struct Entry<K> {
    deadline: u64,
    interval: Option<u64>,
    key: K,
}

/// A set of pending timers keyed by caller data `K`.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    entries: HashMap<TimerId, Entry<K>>,
    next_id: u64,
}

impl<K: Copy> TimerQueue<K> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_id: 0,
        }
    }

    /// Schedules a timer that fires once, `delay_ms` after `now_ms`.
    pub fn schedule_once(&mut self, now_ms: u64, delay_ms: u64, key: K) -> TimerId {
        self.insert(now_ms.saturating_add(delay_ms), None, key)
    }

    /// Schedules a timer that fires every `interval_ms`, starting one
    /// interval after `now_ms`.
    ///
    /// An interval of zero is treated as one millisecond.
    pub fn schedule_repeating(&mut self, now_ms: u64, interval_ms: u64, key: K) -> TimerId {
        let interval = interval_ms.max(1);
        self.insert(now_ms.saturating_add(interval), Some(interval), key)
    }

    fn insert(&mut self, deadline: u64, interval: Option<u64>, key: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            Entry {
                deadline,
                interval,
                key,
            },
        );
        id
    }

    /// Cancels a timer, returning its key if it was still scheduled.
    pub fn cancel(&mut self, id: TimerId) -> Option<K> {
        self.entries.remove(&id).map(|entry| entry.key)
    }

    /// Cancels every timer whose key matches `pred`. Returns how many were removed.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&K) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !pred(&entry.key));
        before - self.entries.len()
    }

    /// Returns `true` if `id` is still scheduled.
    #[must_use]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Returns the earliest deadline among scheduled timers.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.values().map(|entry| entry.deadline).min()
    }

    /// Removes and returns the earliest timer whose deadline is at or before `now_ms`.
    ///
    /// Ties are broken by scheduling order. Repeating timers are re‑armed at
    /// the first multiple of their interval strictly after `now_ms`, or
    /// dropped when no such deadline fits in a `u64`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<FiredTimer<K>> {
        let (&id, _) = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.deadline <= now_ms)
            .min_by_key(|(id, entry)| (entry.deadline, **id))?;

        let entry = self.entries.get_mut(&id)?;
        let fired = FiredTimer {
            id,
            key: entry.key,
            deadline: entry.deadline,
        };
        match entry.interval {
            Some(interval) => {
                let missed = (now_ms - entry.deadline) / interval;
                let next = entry
                    .deadline
                    .saturating_add(missed.saturating_add(1).saturating_mul(interval));
                if next > now_ms {
                    entry.deadline = next;
                } else {
                    // Saturated at the end of the clock; it can never fire again.
                    self.entries.remove(&id);
                }
            }
            None => {
                self.entries.remove(&id);
            }
        }
        Some(fired)
    }

    /// Number of scheduled timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timer is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cancels every timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Copy> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::TimerQueue;

    #[test]
    fn once_timer_fires_once() {
        let mut q = TimerQueue::new();
        let id = q.schedule_once(100, 50, 'a');
        assert!(q.pop_due(149).is_none());

        let fired = q.pop_due(150).unwrap();
        assert_eq!(fired.id, id);
        assert_eq!(fired.key, 'a');
        assert_eq!(fired.deadline, 150);
        assert!(q.pop_due(1_000).is_none());
        assert!(!q.is_scheduled(id));
    }

    #[test]
    fn repeating_timer_at_end_of_clock_is_dropped() {
        let mut q = TimerQueue::new();
        let id = q.schedule_repeating(u64::MAX - 5, 10, ());
        assert_eq!(q.next_deadline(), Some(u64::MAX));

        let fired = q.pop_due(u64::MAX).unwrap();
        assert_eq!(fired.deadline, u64::MAX);
        assert!(!q.is_scheduled(id));
        assert!(q.pop_due(u64::MAX).is_none());
    }

    #[test]
    fn huge_interval_rearms_without_overflow() {
        let mut q = TimerQueue::new();
        let id = q.schedule_repeating(0, u64::MAX / 2, ());
        assert!(q.pop_due(u64::MAX / 2).is_some());
        assert_eq!(q.next_deadline(), Some(u64::MAX - 1));
        assert!(q.pop_due(u64::MAX - 1).is_some());
        assert_eq!(q.next_deadline(), Some(u64::MAX));
        assert!(q.pop_due(u64::MAX).is_some());
        assert!(!q.is_scheduled(id));
    }

    #[test]
    fn repeating_timer_rearms() {
        let mut q = TimerQueue::new();
        let id = q.schedule_repeating(0, 20, ());
        assert_eq!(q.pop_due(20).map(|f| f.deadline), Some(20));
        assert!(q.pop_due(20).is_none());
        assert_eq!(q.next_deadline(), Some(40));
        assert_eq!(q.pop_due(40).map(|f| f.id), Some(id));
        assert!(q.is_scheduled(id));
    }

    #[test]
    fn late_drain_skips_missed_ticks() {
        let mut q = TimerQueue::new();
        q.schedule_repeating(0, 10, ());
        assert!(q.pop_due(95).is_some());
        assert!(q.pop_due(95).is_none());
        assert_eq!(q.next_deadline(), Some(100));
    }

    #[test]
    fn due_timers_come_out_in_deadline_order() {
        let mut q = TimerQueue::new();
        let late = q.schedule_once(0, 30, 3);
        let early = q.schedule_once(0, 10, 1);
        let tie = q.schedule_once(0, 10, 2);

        assert_eq!(q.pop_due(100).map(|f| f.id), Some(early));
        assert_eq!(q.pop_due(100).map(|f| f.id), Some(tie));
        assert_eq!(q.pop_due(100).map(|f| f.id), Some(late));
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_and_cancel_where() {
        let mut q = TimerQueue::new();
        let a = q.schedule_repeating(0, 5, 1_u32);
        q.schedule_repeating(0, 5, 2_u32);
        q.schedule_once(0, 5, 2_u32);

        assert_eq!(q.cancel(a), Some(1));
        assert_eq!(q.cancel(a), None);
        assert_eq!(q.cancel_where(|k| *k == 2), 2);
        assert!(q.is_empty());
        assert_eq!(q.next_deadline(), None);
    }

    #[test]
    fn zero_interval_is_one_millisecond() {
        let mut q = TimerQueue::new();
        q.schedule_repeating(7, 0, ());
        assert_eq!(q.next_deadline(), Some(8));
        q.clear();
        assert_eq!(q.len(), 0);
    }
}
