// SPDX-License-Identifier: MPL-2.0
//! Auto-dismiss countdown.
//!
//! Each running countdown owns two timers: a repeating progress tick that
//! writes the remaining fraction to `--toast-progress`, and a one-shot
//! expiry. Restarting always cancels both first, so a toast never has more
//! than one pair pending.

use super::options::ToastId;
use crate::surface::{millis_f64, NodeId, Priority, Surface};
use crate::timer::{Scheduler, TimerId};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Custom property holding the remaining fraction of the countdown.
pub const PROGRESS_PROPERTY: &str = "--toast-progress";

/// Work the manager's scheduler can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerAction {
    Progress(ToastId),
    Expire(ToastId),
    Resize,
}

#[derive(Debug, Clone, Copy)]
struct Running {
    expiry: TimerId,
    tick: TimerId,
    started_at: Instant,
    duration: Duration,
    progress: NodeId,
}

#[derive(Debug, Default)]
pub(crate) struct Countdowns {
    running: HashMap<ToastId, Running>,
}

impl Countdowns {
    /// Starts a full-length countdown for `toast`, replacing any running one.
    ///
    /// Does nothing without a progress element or duration.
    #[allow(clippy::too_many_arguments)]
    pub fn start<S: Surface + ?Sized>(
        &mut self,
        scheduler: &mut Scheduler<TimerAction>,
        surface: &mut S,
        toast: ToastId,
        progress: Option<NodeId>,
        duration: Option<Duration>,
        interval: Duration,
        now: Instant,
    ) {
        let (Some(progress), Some(duration)) = (progress, duration) else {
            return;
        };
        self.stop(scheduler, surface, toast, Some(progress));

        surface.set_style(progress, PROGRESS_PROPERTY, "1", Priority::Normal);
        let tick = scheduler.every(now, interval, TimerAction::Progress(toast));
        let expiry = scheduler.once(now, duration, TimerAction::Expire(toast));
        self.running.insert(
            toast,
            Running {
                expiry,
                tick,
                started_at: now,
                duration,
                progress,
            },
        );
        tracing::trace!(?toast, ?duration, "Countdown started");
    }

    /// Cancels the countdown of `toast` and clears its progress property.
    pub fn stop<S: Surface + ?Sized>(
        &mut self,
        scheduler: &mut Scheduler<TimerAction>,
        surface: &mut S,
        toast: ToastId,
        progress: Option<NodeId>,
    ) {
        if let Some(running) = self.running.remove(&toast) {
            scheduler.cancel(running.expiry);
            scheduler.cancel(running.tick);
            tracing::trace!(?toast, "Countdown stopped");
        }
        if let Some(progress) = progress {
            surface.remove_style(progress, PROGRESS_PROPERTY);
        }
    }

    /// Writes the remaining fraction as of `at`.
    pub fn update_progress<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        toast: ToastId,
        at: Instant,
    ) {
        let Some(running) = self.running.get(&toast) else {
            return;
        };
        let elapsed = at.saturating_duration_since(running.started_at);
        let fraction = remaining_fraction(running.duration, elapsed);
        surface.set_style(
            running.progress,
            PROGRESS_PROPERTY,
            &fraction.to_string(),
            Priority::Normal,
        );
    }

    #[must_use]
    pub fn is_running(&self, toast: ToastId) -> bool {
        self.running.contains_key(&toast)
    }

    /// Instant the running countdown of `toast` started at.
    #[cfg(test)]
    pub fn started_at(&self, toast: ToastId) -> Option<Instant> {
        self.running.get(&toast).map(|r| r.started_at)
    }
}

/// `max(0, duration - elapsed) / duration`.
#[must_use]
pub fn remaining_fraction(duration: Duration, elapsed: Duration) -> f64 {
    let total = millis_f64(duration);
    if total <= 0.0 {
        return 0.0;
    }
    let remaining = (total - millis_f64(elapsed)).max(0.0);
    remaining / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::test_utils::assert_relative_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn remaining_fraction_decreases_to_zero() {
        let duration = ms(1000);
        assert_relative_eq!(remaining_fraction(duration, Duration::ZERO), 1.0);
        assert_relative_eq!(remaining_fraction(duration, ms(250)), 0.75);
        assert_relative_eq!(remaining_fraction(duration, ms(1000)), 0.0);
        assert_relative_eq!(remaining_fraction(duration, ms(5000)), 0.0);
        assert_relative_eq!(remaining_fraction(Duration::ZERO, ms(5)), 0.0);
    }

    #[test]
    fn start_without_progress_element_is_a_no_op() {
        let mut doc = Document::default();
        let mut scheduler = Scheduler::new();
        let mut countdowns = Countdowns::default();

        countdowns.start(
            &mut scheduler,
            &mut doc,
            ToastId(1),
            None,
            Some(ms(1000)),
            ms(100),
            Instant::now(),
        );
        assert!(!countdowns.is_running(ToastId(1)));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn restart_replaces_pending_timers() {
        let mut doc = Document::default();
        let progress = doc.create_element("div");
        let mut scheduler = Scheduler::new();
        let mut countdowns = Countdowns::default();
        let t0 = Instant::now();

        for offset in [0, 300] {
            countdowns.start(
                &mut scheduler,
                &mut doc,
                ToastId(1),
                Some(progress),
                Some(ms(1000)),
                ms(100),
                t0 + ms(offset),
            );
        }

        assert_eq!(scheduler.len(), 2);
        assert_eq!(countdowns.started_at(ToastId(1)), Some(t0 + ms(300)));
        assert_eq!(doc.style(progress, PROGRESS_PROPERTY), Some("1"));
    }

    #[test]
    fn stop_cancels_timers_and_clears_progress() {
        let mut doc = Document::default();
        let progress = doc.create_element("div");
        let mut scheduler = Scheduler::new();
        let mut countdowns = Countdowns::default();
        let t0 = Instant::now();

        countdowns.start(
            &mut scheduler,
            &mut doc,
            ToastId(1),
            Some(progress),
            Some(ms(1000)),
            ms(100),
            t0,
        );
        countdowns.update_progress(&mut doc, ToastId(1), t0 + ms(500));
        assert_eq!(doc.style(progress, PROGRESS_PROPERTY), Some("0.5"));

        countdowns.stop(&mut scheduler, &mut doc, ToastId(1), Some(progress));
        assert!(scheduler.is_empty());
        assert!(!countdowns.is_running(ToastId(1)));
        assert_eq!(doc.style(progress, PROGRESS_PROPERTY), None);
    }
}
