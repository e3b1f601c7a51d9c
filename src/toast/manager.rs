// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The `Manager` owns every piece of shared state: the container registry,
//! the toasts, the active set used for resize re-measurement, the listener
//! table and the timers. Its lifetime is the hosting UI session; pass it
//! around explicitly.

use super::container::Containers;
use super::countdown::{Countdowns, TimerAction};
use super::events::{Action, Event, EventKind, Listener, Listeners};
use super::instance::{Phase, Toast};
use super::measure::{create_offscreen, set_toast_rect};
use super::options::{
    CloseEvent, CloseReason, Gravity, Position, ToastContext, ToastId, ToastOptions,
};
use crate::config::Config;
use crate::surface::{NodeId, Surface};
use crate::timer::{Clock, Debounce, Scheduler, SystemClock};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

/// Messages driving the manager from an event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// An element reported an event.
    Event(NodeId, Event),
    /// Fire due timers and collect finished animations.
    Tick,
    /// The viewport changed size.
    Resized,
}

/// Owns all toasts shown on one surface.
pub struct Manager<S: Surface, C: Clock = SystemClock> {
    surface: S,
    clock: C,
    config: Config,
    containers: Containers,
    offscreen: NodeId,
    toasts: BTreeMap<ToastId, Toast>,
    /// Toasts created and not yet hidden.
    active: BTreeSet<ToastId>,
    listeners: Listeners,
    scheduler: Scheduler<TimerAction>,
    countdowns: Countdowns,
    resize: Debounce,
    next_id: u64,
}

impl<S: Surface> Manager<S> {
    /// Creates a manager on the wall clock with the default configuration.
    pub fn new(surface: S) -> Self {
        Self::with_clock(surface, SystemClock, Config::default())
    }
}

impl<S: Surface, C: Clock> Manager<S, C> {
    pub fn with_clock(mut surface: S, clock: C, config: Config) -> Self {
        surface.sync_time(clock.now());
        let offscreen = create_offscreen(&mut surface);
        let resize = Debounce::new(config.timing.resize_debounce());
        Self {
            surface,
            clock,
            config,
            containers: Containers::new(),
            offscreen,
            toasts: BTreeMap::new(),
            active: BTreeSet::new(),
            listeners: Listeners::default(),
            scheduler: Scheduler::new(),
            countdowns: Countdowns::default(),
            resize,
            next_id: 0,
        }
    }

    fn now(&mut self) -> Instant {
        let now = self.clock.now();
        self.surface.sync_time(now);
        now
    }

    /// Builds a toast. It stays invisible until [`ToastHandle::show`].
    pub fn create(&mut self, options: ToastOptions) -> ToastHandle<'_, S, C> {
        self.now();
        let id = ToastId(self.next_id);
        self.next_id += 1;

        let defaults = self.config.defaults;
        let gravity = options.gravity.unwrap_or(defaults.gravity);
        let position = options.position.unwrap_or(defaults.position);
        let container = self
            .containers
            .get_or_create(&mut self.surface, gravity, position);
        let toast = Toast::build(
            id,
            options,
            &defaults,
            container,
            &mut self.surface,
            &mut self.listeners,
        );
        tracing::debug!(?id, ?gravity, ?position, "Created toast");

        self.toasts.insert(id, toast);
        self.active.insert(id);
        ToastHandle { manager: self, id }
    }

    /// Handle to an existing toast.
    pub fn toast(&mut self, id: ToastId) -> ToastHandle<'_, S, C> {
        ToastHandle { manager: self, id }
    }

    /// Measures, inserts and animates a created toast, then starts its
    /// countdown. Toasts already shown or hidden are left alone.
    pub fn show(&mut self, id: ToastId) {
        self.now();
        let Some(toast) = self.toasts.get_mut(&id) else {
            tracing::debug!(?id, "show() on unknown toast");
            return;
        };
        if toast.phase != Phase::Created {
            return;
        }
        set_toast_rect(&mut self.surface, toast, self.offscreen);
        toast.insert(&mut self.surface);
        toast.toggle_animation_state(&mut self.surface, true);
        toast.phase = Phase::Shown;
        tracing::debug!(?id, "Showing toast");

        self.add_timeout(id);
    }

    /// Starts the exit sequence. Hiding twice is a no-op.
    ///
    /// A shown toast is detached once its exit animation ends; a toast that
    /// was never shown is torn down immediately.
    pub fn hide(&mut self, id: ToastId, reason: CloseReason) {
        self.now();
        let Some(toast) = self.toasts.get(&id) else {
            return;
        };
        let was_shown = match toast.phase {
            Phase::Hiding | Phase::Removed => return,
            Phase::Created => false,
            Phase::Shown => true,
        };
        let nodes = toast.listener_nodes();
        let element = toast.element;

        self.del_timeout(id);
        self.active.remove(&id);
        self.listeners.unbind_all(id, &nodes);
        tracing::debug!(?id, %reason, "Hiding toast");

        if let Some(toast) = self.toasts.get_mut(&id) {
            toast.phase = Phase::Hiding;
            toast.close_reason = Some(reason);
            toast.toggle_animation_state(&mut self.surface, false);
        }
        if was_shown {
            self.listeners
                .bind(element, id, EventKind::AnimationEnd, Action::FinishExit);
        } else {
            self.finish(id);
        }
    }

    /// Re-measures a toast and caches its size on the element.
    ///
    /// Toasts playing their exit animation keep their last size.
    pub fn set_toast_rect(&mut self, id: ToastId) {
        let Some(toast) = self.toasts.get(&id) else {
            return;
        };
        if matches!(toast.phase, Phase::Created | Phase::Shown) {
            set_toast_rect(&mut self.surface, toast, self.offscreen);
        }
    }

    /// Returns the container for the pair, creating it on first use.
    pub fn container(&mut self, gravity: Gravity, position: Position) -> NodeId {
        self.containers
            .get_or_create(&mut self.surface, gravity, position)
    }

    /// Delivers an event reported by the front end for `target`.
    pub fn dispatch(&mut self, target: NodeId, event: Event) {
        self.now();
        for listener in self.listeners.matching(target, event.kind()) {
            self.run(listener, &event);
        }
    }

    fn run(&mut self, listener: Listener, event: &Event) {
        let id = listener.toast;
        match listener.action {
            Action::PauseCountdown => {
                if self.phase(id) == Phase::Shown {
                    self.del_timeout(id);
                }
            }
            Action::RestartCountdown => {
                if self.phase(id) == Phase::Shown {
                    self.add_timeout(id);
                }
            }
            Action::Click => self.click(id),
            Action::CloseButton => self.hide(id, CloseReason::CloseButton),
            Action::FinishExit => match event {
                Event::AnimationEnd(animation) if animation.is_exit() => self.finish(id),
                _ => {}
            },
        }
    }

    fn click(&mut self, id: ToastId) {
        let Some(mut handler) = self.toasts.get_mut(&id).and_then(|t| t.on_click.take()) else {
            return;
        };
        let mut ctx = ToastContext::new(id);
        handler(&mut ctx);
        if let Some(toast) = self.toasts.get_mut(&id) {
            toast.on_click = Some(handler);
        }
        if let Some(reason) = ctx.into_hide_request() {
            self.hide(id, reason);
        }
    }

    /// Detaches the element and reports the close.
    fn finish(&mut self, id: ToastId) {
        let Some(mut toast) = self.toasts.remove(&id) else {
            return;
        };
        self.listeners.unbind_all(id, &toast.listener_nodes());
        self.surface.remove(toast.element);
        toast.phase = Phase::Removed;

        let reason = toast.close_reason.unwrap_or_default();
        tracing::debug!(?id, %reason, "Toast removed");
        if let Some(on_close) = toast.on_close.take() {
            on_close(CloseEvent { id, reason });
        }
        self.surface.release(toast.element);
    }

    /// Fires due timers and routes finished animations.
    pub fn tick(&mut self) {
        let now = self.now();
        for end in self.surface.take_animation_ends(now) {
            self.dispatch(end.target, Event::AnimationEnd(end.animation));
        }
        while let Some(fired) = self.scheduler.pop_due(now) {
            match fired.action {
                TimerAction::Progress(id) => {
                    self.countdowns
                        .update_progress(&mut self.surface, id, fired.deadline);
                }
                TimerAction::Expire(id) => {
                    tracing::trace!(?id, "Countdown expired");
                    self.hide(id, CloseReason::Timeout);
                    self.del_timeout(id);
                }
                TimerAction::Resize => {
                    self.resize.fired(fired.id);
                    self.remeasure_active();
                }
            }
        }
    }

    /// Schedules a debounced re-measurement of every active toast.
    pub fn resized(&mut self) {
        let now = self.now();
        self.resize
            .trigger(&mut self.scheduler, now, TimerAction::Resize);
    }

    fn remeasure_active(&mut self) {
        tracing::trace!(count = self.active.len(), "Re-measuring active toasts");
        for id in &self.active {
            if let Some(toast) = self.toasts.get(id) {
                set_toast_rect(&mut self.surface, toast, self.offscreen);
            }
        }
    }

    /// Handles a manager message.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::Event(target, event) => self.dispatch(target, event),
            Message::Tick => self.tick(),
            Message::Resized => self.resized(),
        }
    }

    fn add_timeout(&mut self, id: ToastId) {
        let now = self.clock.now();
        let interval = self.config.timing.progress_interval();
        let Some(toast) = self.toasts.get(&id) else {
            return;
        };
        self.countdowns.start(
            &mut self.scheduler,
            &mut self.surface,
            id,
            toast.progress,
            toast.duration,
            interval,
            now,
        );
    }

    fn del_timeout(&mut self, id: ToastId) {
        let progress = self.toasts.get(&id).and_then(|t| t.progress);
        self.countdowns
            .stop(&mut self.scheduler, &mut self.surface, id, progress);
    }

    /// Lifecycle phase of a toast; ids no longer known are `Removed`.
    #[must_use]
    pub fn phase(&self, id: ToastId) -> Phase {
        self.toasts.get(&id).map_or(Phase::Removed, |t| t.phase)
    }

    /// Whether the toast is part of resize re-measurement.
    #[must_use]
    pub fn is_active(&self, id: ToastId) -> bool {
        self.active.contains(&id)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Whether the toast's auto-dismiss countdown is running.
    #[must_use]
    pub fn is_counting_down(&self, id: ToastId) -> bool {
        self.countdowns.is_running(id)
    }

    /// Root element of a toast.
    #[must_use]
    pub fn element(&self, id: ToastId) -> Option<NodeId> {
        self.toasts.get(&id).map(|t| t.element)
    }

    /// Close-button element of a toast, if it has one.
    #[must_use]
    pub fn close_button(&self, id: ToastId) -> Option<NodeId> {
        self.toasts.get(&id).and_then(|t| t.close_button)
    }

    /// Progress element of a toast, if it has a countdown.
    #[must_use]
    pub fn progress(&self, id: ToastId) -> Option<NodeId> {
        self.toasts.get(&id).and_then(|t| t.progress)
    }

    /// Registered containers in creation order.
    pub fn containers(&self) -> impl Iterator<Item = (Gravity, Position, NodeId)> + '_ {
        self.containers.iter()
    }

    /// Hidden element toasts are measured in.
    #[must_use]
    pub fn offscreen(&self) -> NodeId {
        self.offscreen
    }

    /// Deadline of the next pending timer, for hosts that sleep between
    /// ticks.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

/// Borrowed handle for chaining calls on one toast.
pub struct ToastHandle<'a, S: Surface, C: Clock> {
    manager: &'a mut Manager<S, C>,
    id: ToastId,
}

impl<'a, S: Surface, C: Clock> ToastHandle<'a, S, C> {
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Shows the toast, returning the handle for chaining.
    pub fn show(self) -> Self {
        self.manager.show(self.id);
        self
    }

    pub fn hide(self, reason: CloseReason) {
        self.manager.hide(self.id, reason);
    }
}
