// SPDX-License-Identifier: MPL-2.0
//! Offscreen measurement of a toast's natural size.
//!
//! The measured box is cached on the root element as `--toast-height` and
//! `--toast-width` so the styling layer can animate with concrete pixel
//! sizes.

use super::instance::{Toast, SHOW_MARKER};
use super::options::Position;
use crate::surface::{px, NodeId, Priority, Surface};

pub const HEIGHT_PROPERTY: &str = "--toast-height";
pub const WIDTH_PROPERTY: &str = "--toast-width";

/// Class of the hidden element toasts are measured in.
pub const OFFSCREEN_CLASS: &str = "offscreen-container";

/// Creates the hidden measuring container and attaches it to the body.
pub(crate) fn create_offscreen<S: Surface + ?Sized>(surface: &mut S) -> NodeId {
    let node = surface.create_element("div");
    surface.add_class(node, OFFSCREEN_CLASS);
    let body = surface.body();
    surface.append_child(body, node);
    node
}

/// Measures `toast` without constraints and caches its size.
///
/// A toast that is not on screen is measured inside `offscreen` and
/// detached again afterwards.
pub(crate) fn set_toast_rect<S: Surface + ?Sized>(surface: &mut S, toast: &Toast, offscreen: NodeId) {
    let element = toast.element;
    let hidden = !surface.has_class(element, SHOW_MARKER);
    if hidden {
        surface.append_child(offscreen, element);
    }

    surface.remove_style(element, HEIGHT_PROPERTY);
    surface.remove_style(element, WIDTH_PROPERTY);
    surface.set_style(element, "max-height", "none", Priority::Important);
    surface.set_style(element, "max-width", "none", Priority::Important);
    if toast.position == Position::Center {
        let container_width = surface.bounding_rect(toast.container).width;
        surface.set_style(element, "max-width", &px(container_width), Priority::Important);
    }

    let rect = surface.bounding_rect(element);
    surface.set_style(element, HEIGHT_PROPERTY, &px(rect.height), Priority::Normal);
    surface.set_style(element, WIDTH_PROPERTY, &px(rect.width), Priority::Normal);

    surface.remove_style(element, "max-height");
    surface.remove_style(element, "max-width");
    if hidden {
        surface.remove(element);
    }
    tracing::trace!(toast = ?toast.id, width = rect.width, height = rect.height, "Measured toast");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Defaults;
    use crate::document::Document;
    use crate::toast::container::Containers;
    use crate::toast::events::Listeners;
    use crate::toast::options::{Gravity, ToastId, ToastOptions};

    fn toast_in(doc: &mut Document, options: ToastOptions) -> Toast {
        let mut containers = Containers::new();
        let container = containers.get_or_create(
            doc,
            options.gravity.unwrap_or(Gravity::Top),
            options.position.unwrap_or(Position::Right),
        );
        Toast::build(
            ToastId(0),
            options,
            &Defaults::default(),
            container,
            doc,
            &mut Listeners::default(),
        )
    }

    #[test]
    fn hidden_toast_is_measured_and_detached_again() {
        let mut doc = Document::default();
        let offscreen = create_offscreen(&mut doc);
        let toast = toast_in(&mut doc, ToastOptions::text("x".repeat(10)));

        set_toast_rect(&mut doc, &toast, offscreen);

        assert_eq!(doc.parent(toast.element), None);
        assert!(doc.children(offscreen).is_empty());
        assert_eq!(doc.style(toast.element, WIDTH_PROPERTY), Some("80px"));
        assert_eq!(doc.style(toast.element, HEIGHT_PROPERTY), Some("20px"));
        assert_eq!(doc.style(toast.element, "max-width"), None);
        assert_eq!(doc.style(toast.element, "max-height"), None);
    }

    #[test]
    fn center_toast_wraps_at_container_width() {
        let mut doc = Document::default();
        let offscreen = create_offscreen(&mut doc);
        // 90 chars at 8px is 720px, two lines in a 360px container.
        let text = "y".repeat(90);
        let right = toast_in(&mut doc, ToastOptions::text(text.clone()));
        let center = toast_in(
            &mut doc,
            ToastOptions::text(text).position(Position::Center),
        );

        set_toast_rect(&mut doc, &right, offscreen);
        set_toast_rect(&mut doc, &center, offscreen);

        assert_eq!(doc.style(right.element, HEIGHT_PROPERTY), Some("20px"));
        assert_eq!(doc.style(right.element, WIDTH_PROPERTY), Some("720px"));
        assert_eq!(doc.style(center.element, HEIGHT_PROPERTY), Some("40px"));
        assert_eq!(doc.style(center.element, WIDTH_PROPERTY), Some("360px"));
    }

    #[test]
    fn shown_toast_stays_in_place() {
        let mut doc = Document::default();
        let offscreen = create_offscreen(&mut doc);
        let toast = toast_in(&mut doc, ToastOptions::text("shown"));
        toast.insert(&mut doc);
        doc.add_class(toast.element, SHOW_MARKER);

        set_toast_rect(&mut doc, &toast, offscreen);

        assert_eq!(doc.parent(toast.element), Some(toast.container));
        assert!(doc.children(offscreen).is_empty());
    }

    #[test]
    fn stale_cached_size_is_replaced() {
        let mut doc = Document::default();
        let offscreen = create_offscreen(&mut doc);
        let toast = toast_in(&mut doc, ToastOptions::text("abc"));
        doc.set_style(toast.element, HEIGHT_PROPERTY, "999px", Priority::Normal);

        set_toast_rect(&mut doc, &toast, offscreen);
        assert_eq!(doc.style(toast.element, HEIGHT_PROPERTY), Some("20px"));
    }
}
