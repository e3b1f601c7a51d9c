// SPDX-License-Identifier: MPL-2.0
//! Time source and cancellable timers.
//!
//! The manager runs on the host's event loop and never sleeps. Timers are
//! entries in a [`Scheduler`]; the host calls
//! [`Manager::tick`](crate::toast::Manager::tick) and every timer whose
//! deadline has passed fires in deadline order.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Identifier of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    action: T,
    period: Option<Duration>,
}

/// A timer that came due, with the deadline it was scheduled for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub id: TimerId,
    pub deadline: Instant,
    pub action: T,
}

/// Deadline-ordered set of one-shot and repeating timers.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    queue: BTreeMap<(Instant, TimerId), Entry<T>>,
    deadlines: HashMap<TimerId, Instant>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` once at `now + delay`.
    pub fn once(&mut self, now: Instant, delay: Duration, action: T) -> TimerId {
        self.insert(now + delay, None, action)
    }

    /// Schedules `action` every `period`, first at `now + period`.
    pub fn every(&mut self, now: Instant, period: Duration, action: T) -> TimerId {
        self.insert(now + period, Some(period), action)
    }

    fn insert(&mut self, deadline: Instant, period: Option<Duration>, action: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.insert((deadline, id), Entry { action, period });
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancels a timer. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.queue.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }

    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Pops the earliest timer due at `now`.
    ///
    /// A repeating timer that fell behind fires once and is rescheduled to
    /// its next period after `now`, keeping its id.
    pub fn pop_due(&mut self, now: Instant) -> Option<Fired<T>> {
        let (&(deadline, id), _) = self.queue.iter().next()?;
        if deadline > now {
            return None;
        }
        let entry = self.queue.remove(&(deadline, id))?;
        self.deadlines.remove(&id);

        if let Some(period) = entry.period.filter(|p| !p.is_zero()) {
            let mut next = deadline + period;
            while next <= now {
                next += period;
            }
            self.queue.insert(
                (next, id),
                Entry {
                    action: entry.action.clone(),
                    period: entry.period,
                },
            );
            self.deadlines.insert(id, next);
        }

        Some(Fired {
            id,
            deadline,
            action: entry.action,
        })
    }
}

/// Trailing debounce on top of a [`Scheduler`].
///
/// Each [`Debounce::trigger`] cancels the pending timer and schedules a new
/// one, so the action fires once `delay` after the last trigger.
#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    pending: Option<TimerId>,
}

impl Debounce {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn trigger<T: Clone>(&mut self, scheduler: &mut Scheduler<T>, now: Instant, action: T) {
        self.cancel(scheduler);
        self.pending = Some(scheduler.once(now, self.delay, action));
    }

    pub fn cancel<T: Clone>(&mut self, scheduler: &mut Scheduler<T>) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel(id);
        }
    }

    /// Marks the debounced timer as fired.
    pub fn fired(&mut self, id: TimerId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
