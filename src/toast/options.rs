// SPDX-License-Identifier: MPL-2.0
//! Toast configuration.
//!
//! [`ToastOptions`] is a builder: every field is optional and unset fields
//! fall back to the manager's [`Defaults`](crate::config::Defaults) when the
//! toast is created.

use crate::surface::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Unique identifier for a toast within one manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToastId(pub(crate) u64);

/// Vertical edge toasts stack against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gravity {
    #[default]
    Top,
    Bottom,
}

impl Gravity {
    pub const ALL: [Gravity; 2] = [Gravity::Top, Gravity::Bottom];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Gravity::Top => "top",
            Gravity::Bottom => "bottom",
        }
    }
}

/// Horizontal anchor of a toast stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Center,
    #[default]
    Right,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Left, Position::Center, Position::Right];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Left => "left",
            Position::Center => "center",
            Position::Right => "right",
        }
    }
}

/// Why a toast was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CloseReason {
    /// The countdown expired.
    Timeout,
    /// The close affordance was clicked.
    CloseButton,
    /// The default click handler or a caller-initiated hide.
    #[default]
    Other,
}

impl CloseReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CloseReason::Timeout => "timeout",
            CloseReason::CloseButton => "close-button",
            CloseReason::Other => "other",
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of the `on_close` callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseEvent {
    pub id: ToastId,
    pub reason: CloseReason,
}

/// Receiver handed to `on_click` callbacks.
#[derive(Debug)]
pub struct ToastContext {
    id: ToastId,
    hide: Option<CloseReason>,
}

impl ToastContext {
    pub(crate) fn new(id: ToastId) -> Self {
        Self { id, hide: None }
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Requests the toast to be hidden once the callback returns.
    pub fn hide(&mut self, reason: CloseReason) {
        self.hide = Some(reason);
    }

    pub(crate) fn into_hide_request(self) -> Option<CloseReason> {
        self.hide
    }
}

pub type ClickHandler = Box<dyn FnMut(&mut ToastContext)>;
pub type CloseHandler = Box<dyn FnOnce(CloseEvent)>;

/// User configuration of a single toast.
#[derive(Default)]
pub struct ToastOptions {
    pub(crate) text: Option<String>,
    pub(crate) node: Option<NodeId>,
    pub(crate) class_names: Vec<String>,
    pub(crate) style: Vec<(String, Option<String>)>,
    pub(crate) gravity: Option<Gravity>,
    pub(crate) position: Option<Position>,
    pub(crate) duration: Option<Duration>,
    pub(crate) close: Option<bool>,
    pub(crate) stop_on_focus: Option<bool>,
    pub(crate) oldest_first: Option<bool>,
    pub(crate) on_click: Option<ClickHandler>,
    pub(crate) on_close: Option<CloseHandler>,
}

impl ToastOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for a toast showing only `text`.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new().with_text(text)
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a node created on the same surface to the content.
    #[must_use]
    pub fn node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class_names.push(class.into());
        self
    }

    /// Sets an inline style on the content element.
    ///
    /// `property` may be camelCase; a value containing `!important` is
    /// applied with important priority.
    #[must_use]
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.push((property.into(), Some(value.into())));
        self
    }

    /// Removes an inline style from the content element.
    #[must_use]
    pub fn unset_style(mut self, property: impl Into<String>) -> Self {
        self.style.push((property.into(), None));
        self
    }

    #[must_use]
    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = Some(gravity);
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Auto-dismiss delay. A zero duration disables auto-dismiss.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn close(mut self, close: bool) -> Self {
        self.close = Some(close);
        self
    }

    #[must_use]
    pub fn stop_on_focus(mut self, stop_on_focus: bool) -> Self {
        self.stop_on_focus = Some(stop_on_focus);
        self
    }

    #[must_use]
    pub fn oldest_first(mut self, oldest_first: bool) -> Self {
        self.oldest_first = Some(oldest_first);
        self
    }

    #[must_use]
    pub fn on_click(mut self, handler: impl FnMut(&mut ToastContext) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn on_close(mut self, handler: impl FnOnce(CloseEvent) + 'static) -> Self {
        self.on_close = Some(Box::new(handler));
        self
    }

    /// Configured auto-dismiss delay, if it is non-zero.
    #[must_use]
    pub fn auto_dismiss(&self) -> Option<Duration> {
        self.duration.filter(|d| !d.is_zero())
    }

    /// Whether none of `duration`, `close` and `on_click` was given, leaving
    /// the toast without any way to be dismissed.
    #[must_use]
    pub(crate) fn lacks_dismissal(&self) -> bool {
        self.duration.is_none() && self.close.is_none() && self.on_click.is_none()
    }
}

impl fmt::Debug for ToastOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastOptions")
            .field("text", &self.text)
            .field("node", &self.node)
            .field("class_names", &self.class_names)
            .field("style", &self.style)
            .field("gravity", &self.gravity)
            .field("position", &self.position)
            .field("duration", &self.duration)
            .field("close", &self.close)
            .field("stop_on_focus", &self.stop_on_focus)
            .field("oldest_first", &self.oldest_first)
            .field("on_click", &self.on_click.is_some())
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_reasons_use_wire_names() {
        assert_eq!(CloseReason::Timeout.to_string(), "timeout");
        assert_eq!(CloseReason::CloseButton.to_string(), "close-button");
        assert_eq!(CloseReason::default(), CloseReason::Other);
    }

    #[test]
    fn zero_duration_disables_auto_dismiss() {
        let options = ToastOptions::text("hi").duration(Duration::ZERO);
        assert_eq!(options.auto_dismiss(), None);
        assert!(!options.lacks_dismissal());
    }

    #[test]
    fn explicit_close_false_still_counts_as_configured() {
        assert!(ToastOptions::text("hi").lacks_dismissal());
        assert!(!ToastOptions::text("hi").close(false).lacks_dismissal());
        assert!(!ToastOptions::text("hi").on_click(|_| {}).lacks_dismissal());
    }

    #[test]
    fn context_records_hide_request() {
        let mut ctx = ToastContext::new(ToastId(7));
        assert_eq!(ctx.id(), ToastId(7));
        ctx.hide(CloseReason::Other);
        assert_eq!(ctx.into_hide_request(), Some(CloseReason::Other));
    }

    #[test]
    fn debug_hides_callbacks() {
        let options = ToastOptions::text("saved").on_close(|_| {});
        let printed = format!("{options:?}");
        assert!(printed.contains("on_close: true"));
        assert!(printed.contains("saved"));
    }
}
