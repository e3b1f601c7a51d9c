// SPDX-License-Identifier: MPL-2.0
//! A single toast: its resolved configuration and element tree.

use super::events::{Action, EventKind, Listeners};
use super::options::{
    ClickHandler, CloseHandler, CloseReason, Position, ToastContext, ToastId, ToastOptions,
};
use crate::config::Defaults;
use crate::style::apply_styles;
use crate::surface::{NodeId, Surface};
use std::time::Duration;

pub const TOAST_CLASS: &str = "toast";
pub const CONTENT_CLASS: &str = "toast-content";
pub const PROGRESS_CLASS: &str = "toast-progress";
pub const CLOSE_CLASS: &str = "toast-close";
pub const CLOSE_GLYPH: &str = "🗙";

/// State marker set while the toast is on screen.
pub const SHOW_MARKER: &str = "show";
/// State marker set while the toast plays its exit animation.
pub const HIDE_MARKER: &str = "hide";

/// Lifecycle of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Built but never inserted.
    Created,
    /// Inserted into its container.
    Shown,
    /// Exit animation playing.
    Hiding,
    /// Detached; the instance is gone.
    Removed,
}

pub(crate) struct Toast {
    pub id: ToastId,
    pub position: Position,
    pub oldest_first: bool,
    pub duration: Option<Duration>,
    pub container: NodeId,
    pub element: NodeId,
    pub progress: Option<NodeId>,
    pub close_button: Option<NodeId>,
    pub on_click: Option<ClickHandler>,
    pub on_close: Option<CloseHandler>,
    pub close_reason: Option<CloseReason>,
    pub phase: Phase,
}

impl Toast {
    /// Builds the element tree and binds the toast's listeners.
    pub fn build<S: Surface + ?Sized>(
        id: ToastId,
        mut options: ToastOptions,
        defaults: &Defaults,
        container: NodeId,
        surface: &mut S,
        listeners: &mut Listeners,
    ) -> Self {
        let duration = options.auto_dismiss();
        let lacks_dismissal = options.lacks_dismissal();

        let element = surface.create_element("div");
        surface.add_class(element, TOAST_CLASS);
        for class in &options.class_names {
            surface.add_class(element, class);
        }

        let close_button = if options.close == Some(true) {
            let button = surface.create_element("span");
            surface.add_class(button, CLOSE_CLASS);
            surface.set_text(button, CLOSE_GLYPH);
            listeners.bind(button, id, EventKind::Click, Action::CloseButton);
            surface.append_child(element, button);
            Some(button)
        } else {
            None
        };

        let content = surface.create_element("div");
        surface.add_class(content, CONTENT_CLASS);
        if let Some(text) = options.text.as_deref().filter(|t| !t.is_empty()) {
            surface.set_text(content, text);
        }
        if let Some(node) = options.node {
            surface.append_child(content, node);
        }
        apply_styles(surface, content, &options.style);
        let progress = duration.map(|_| {
            let progress = surface.create_element("div");
            surface.add_class(progress, PROGRESS_CLASS);
            surface.append_child(content, progress);
            progress
        });
        surface.append_child(element, content);

        if lacks_dismissal {
            options.on_click = Some(Box::new(|ctx: &mut ToastContext| {
                ctx.hide(CloseReason::Other);
            }));
        }

        let stop_on_focus = options.stop_on_focus.unwrap_or(defaults.stop_on_focus);
        if stop_on_focus && duration.is_some() {
            listeners.bind(element, id, EventKind::PointerEnter, Action::PauseCountdown);
            listeners.bind(element, id, EventKind::PointerLeave, Action::RestartCountdown);
        }
        if options.on_click.is_some() {
            listeners.bind(element, id, EventKind::Click, Action::Click);
        }

        Self {
            id,
            position: options.position.unwrap_or(defaults.position),
            oldest_first: options.oldest_first.unwrap_or(defaults.oldest_first),
            duration,
            container,
            element,
            progress,
            close_button,
            on_click: options.on_click,
            on_close: options.on_close,
            close_reason: None,
            phase: Phase::Created,
        }
    }

    /// Elements that may carry listeners of this toast.
    pub fn listener_nodes(&self) -> Vec<NodeId> {
        let mut nodes = vec![self.element];
        nodes.extend(self.close_button);
        nodes
    }

    /// Swaps the state markers: `hide` → `show` when `visible`, and back.
    pub fn toggle_animation_state<S: Surface + ?Sized>(&self, surface: &mut S, visible: bool) {
        let (from, to) = if visible {
            (HIDE_MARKER, SHOW_MARKER)
        } else {
            (SHOW_MARKER, HIDE_MARKER)
        };
        if !surface.replace_class(self.element, from, to) {
            surface.add_class(self.element, to);
        }
    }

    /// Inserts the element into its container per the ordering policy.
    pub fn insert<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.oldest_first {
            let first = surface.first_child(self.container);
            surface.insert_before(self.container, self.element, first);
        } else {
            let after_last = surface
                .last_child(self.container)
                .and_then(|last| surface.next_sibling(last));
            surface.insert_before(self.container, self.element, after_last);
        }
    }
}
