// SPDX-License-Identifier: MPL-2.0
//! Presentation port.
//!
//! The toast manager never touches a rendering toolkit directly. Every tree
//! edit, class marker, inline style and size read goes through [`Surface`],
//! so the ordering, timer and measurement logic runs the same against the
//! headless [`Document`](crate::document::Document) and any other backend.

use std::time::{Duration, Instant};

slotmap::new_key_type! {
    /// Handle to an element owned by a [`Surface`].
    pub struct NodeId;
}

/// Priority flag of an inline style property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    #[default]
    Normal,
    Important,
}

/// Border box of an element, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Animations the styling layer is expected to play on toast roots.
///
/// Teardown only reacts to [`Animation::Exit`]; any other completion on the
/// same element is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Animation {
    /// Played when the `show` marker is set.
    Enter,
    /// Played when the `hide` marker is set.
    Exit,
    /// Anything else the styling layer animates on the element.
    Other(String),
}

impl Animation {
    #[must_use]
    pub fn is_exit(&self) -> bool {
        matches!(self, Animation::Exit)
    }

    /// Conventional keyframes name for this animation.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Animation::Enter => "toast-in",
            Animation::Exit => "toast-out",
            Animation::Other(name) => name,
        }
    }
}

/// Completion signal of an animation on `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationEnd {
    pub target: NodeId,
    pub animation: Animation,
}

/// Tree and style operations the toast manager relies on.
///
/// Nodes stay addressable after being detached; [`Surface::release`] is the
/// only operation that invalidates a [`NodeId`]. Operations on unknown ids
/// must be silent no-ops.
pub trait Surface {
    /// Root element new containers are appended to.
    fn body(&self) -> NodeId;

    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Replaces `old` with `new` in place. Returns `false` (and changes
    /// nothing) when `old` was not present.
    fn replace_class(&mut self, node: NodeId, old: &str, new: &str) -> bool;

    fn set_text(&mut self, node: NodeId, text: &str);

    /// Appends `child` to `parent`, detaching it from any previous parent.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Inserts `child` before `reference`, or appends when `reference` is
    /// `None`.
    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>);

    /// Detaches `node` from its parent.
    fn remove(&mut self, node: NodeId);

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn first_child(&self, node: NodeId) -> Option<NodeId>;

    fn last_child(&self, node: NodeId) -> Option<NodeId>;

    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    fn set_style(&mut self, node: NodeId, property: &str, value: &str, priority: Priority);

    fn remove_style(&mut self, node: NodeId, property: &str);

    /// Current border box of `node` under its inline constraints.
    fn bounding_rect(&self, node: NodeId) -> Rect;

    /// Current time, announced before a batch of mutations so animations
    /// started by class markers get the right start instant.
    fn sync_time(&mut self, _now: Instant) {}

    /// Animations that completed up to `now`. Backends that deliver
    /// completions as events instead report them through
    /// [`Manager::dispatch`](crate::toast::Manager::dispatch).
    fn take_animation_ends(&mut self, _now: Instant) -> Vec<AnimationEnd> {
        Vec::new()
    }

    /// Frees `node` and its subtree. The default keeps nodes alive.
    fn release(&mut self, _node: NodeId) {}
}

/// Formats a pixel length the way custom layout properties store it.
#[must_use]
pub fn px(value: f32) -> String {
    format!("{value}px")
}

/// Parses a `"<n>px"` length. Keywords such as `none` yield `None`.
#[must_use]
pub fn parse_px(value: &str) -> Option<f32> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

/// Milliseconds in `duration`, as used for progress ratios.
#[must_use]
pub(crate) fn millis_f64(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_round_trips_through_parse() {
        assert_eq!(parse_px(&px(42.5)), Some(42.5));
        assert_eq!(px(40.0), "40px");
    }

    #[test]
    fn parse_px_rejects_keywords() {
        assert_eq!(parse_px("none"), None);
        assert_eq!(parse_px("12em"), None);
        assert_eq!(parse_px(" 12 px "), Some(12.0));
    }

    #[test]
    fn only_exit_animation_is_exit() {
        assert!(Animation::Exit.is_exit());
        assert!(!Animation::Enter.is_exit());
        assert!(!Animation::Other("toast-out-left".into()).is_exit());
        assert_eq!(Animation::Exit.name(), "toast-out");
    }
}
