// SPDX-License-Identifier: MPL-2.0
//! Event listener table.
//!
//! Front ends report raw events against element ids; the manager looks up
//! which toast behavior is bound to that element and event kind.

use super::options::ToastId;
use crate::surface::{Animation, NodeId};
use std::collections::HashMap;

/// Events a front end reports for an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PointerEnter,
    PointerLeave,
    Click,
    AnimationEnd(Animation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum EventKind {
    PointerEnter,
    PointerLeave,
    Click,
    AnimationEnd,
}

impl Event {
    pub(crate) fn kind(&self) -> EventKind {
        match self {
            Event::PointerEnter => EventKind::PointerEnter,
            Event::PointerLeave => EventKind::PointerLeave,
            Event::Click => EventKind::Click,
            Event::AnimationEnd(_) => EventKind::AnimationEnd,
        }
    }
}

/// Behavior bound to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// Stop the countdown while the pointer is over the toast.
    PauseCountdown,
    /// Start a fresh countdown when the pointer leaves.
    RestartCountdown,
    /// Run the toast's click handler.
    Click,
    /// Hide with [`CloseReason::CloseButton`](super::CloseReason::CloseButton).
    CloseButton,
    /// Finish teardown once the exit animation is over.
    FinishExit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Listener {
    pub toast: ToastId,
    pub kind: EventKind,
    pub action: Action,
}

#[derive(Debug, Default)]
pub(crate) struct Listeners {
    by_node: HashMap<NodeId, Vec<Listener>>,
}

impl Listeners {
    pub fn bind(&mut self, node: NodeId, toast: ToastId, kind: EventKind, action: Action) {
        let listeners = self.by_node.entry(node).or_default();
        let listener = Listener { toast, kind, action };
        if !listeners.contains(&listener) {
            listeners.push(listener);
        }
    }

    /// Drops every listener of `toast` on `nodes`.
    pub fn unbind_all(&mut self, toast: ToastId, nodes: &[NodeId]) {
        for node in nodes {
            if let Some(listeners) = self.by_node.get_mut(node) {
                listeners.retain(|l| l.toast != toast);
                if listeners.is_empty() {
                    self.by_node.remove(node);
                }
            }
        }
    }

    /// Listeners registered on `node` for `kind`, in binding order.
    pub fn matching(&self, node: NodeId, kind: EventKind) -> Vec<Listener> {
        self.by_node
            .get(&node)
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|l| l.kind == kind)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn count_for(&self, toast: ToastId) -> usize {
        self.by_node
            .values()
            .flatten()
            .filter(|l| l.toast == toast)
            .count()
    }
}
