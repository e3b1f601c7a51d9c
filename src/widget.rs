// SPDX-License-Identifier: MPL-2.0
//! Iced front end for the headless [`Document`].
//!
//! Renders every toast container in its screen corner as a column of toast
//! cards and turns pointer, window and time events back into manager
//! messages.
//!
//! ```ignore
//! // In the application:
//! fn view(&self) -> Element<'_, AppMessage> {
//!     stack![self.main_view(), widget::overlay(&self.toasts).map(AppMessage::Toasts)].into()
//! }
//!
//! fn subscription(&self) -> Subscription<AppMessage> {
//!     widget::subscription(self.toasts.config().timing.progress_interval())
//!         .map(AppMessage::Toasts)
//! }
//! ```

use crate::document::Document;
use crate::surface::{NodeId, Surface};
use crate::timer::Clock;
use crate::toast::countdown::PROGRESS_PROPERTY;
use crate::toast::instance::{CLOSE_CLASS, CONTENT_CLASS, HIDE_MARKER, PROGRESS_CLASS};
use crate::toast::{self, Event, Gravity, Manager, Position};
use iced::widget::{button, container, mouse_area, progress_bar, text, Column, Container, Row, Stack};
use iced::{alignment, event, time, Color, Element, Length, Size, Subscription, Theme};
use std::time::Duration;

/// Width of a toast card.
pub const TOAST_WIDTH: f32 = 320.0;

const CARD_PADDING: f32 = 12.0;
const CORNER_PADDING: f32 = 16.0;
const STACK_SPACING: f32 = 8.0;

/// Messages produced by the overlay and its subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Toast(toast::Message),
    /// The window was resized to the given logical size.
    Viewport(Size),
}

/// Accent of a toast card, picked from its user classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Success,
    Error,
}

impl Tone {
    fn from_classes(classes: &[String]) -> Self {
        if classes.iter().any(|c| c == "error" || c == "danger") {
            Tone::Error
        } else if classes.iter().any(|c| c == "success") {
            Tone::Success
        } else {
            Tone::Neutral
        }
    }
}

/// Applies a message to the manager.
pub fn update<C: Clock>(manager: &mut Manager<Document, C>, message: Message) {
    match message {
        Message::Toast(message) => manager.update(message),
        Message::Viewport(size) => {
            manager.surface_mut().set_viewport(size.width, size.height);
            manager.resized();
        }
    }
}

/// Ticks every `interval` and reports window resizes.
pub fn subscription(interval: Duration) -> Subscription<Message> {
    Subscription::batch([
        time::every(interval).map(|_| Message::Toast(toast::Message::Tick)),
        event::listen_with(|event, _status, _window| {
            if let iced::Event::Window(iced::window::Event::Resized(size)) = event {
                return Some(Message::Viewport(size));
            }
            None
        }),
    ])
}

/// Renders all non-empty containers, each anchored in its corner.
pub fn overlay<'a, C: Clock>(manager: &'a Manager<Document, C>) -> Element<'a, Message> {
    let doc = manager.surface();
    let corners: Vec<Element<'a, Message>> = manager
        .containers()
        .filter(|(_, _, node)| !doc.children(*node).is_empty())
        .map(|(gravity, position, node)| corner(doc, gravity, position, node))
        .collect();

    Stack::with_children(corners)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn corner<'a>(
    doc: &'a Document,
    gravity: Gravity,
    position: Position,
    node: NodeId,
) -> Element<'a, Message> {
    let cards = doc.children(node).iter().map(|toast| card(doc, *toast));
    let column = Column::with_children(cards)
        .spacing(STACK_SPACING)
        .align_x(horizontal(position));

    Container::new(column)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(horizontal(position))
        .align_y(vertical(gravity))
        .padding(CORNER_PADDING)
        .into()
}

fn card<'a>(doc: &'a Document, node: NodeId) -> Element<'a, Message> {
    let mut body = Column::new().spacing(4);
    if let Some(content) = doc.child_with_class(node, CONTENT_CLASS) {
        let label = doc.text(content);
        if !label.is_empty() {
            body = body.push(text(label));
        }
        for child in doc.children(content) {
            if !doc.has_class(*child, PROGRESS_CLASS) && !doc.text(*child).is_empty() {
                body = body.push(text(doc.text(*child)));
            }
        }
        if let Some(value) = doc
            .child_with_class(content, PROGRESS_CLASS)
            .and_then(|progress| progress_value(doc, progress))
        {
            body = body.push(progress_bar(0.0..=1.0, value));
        }
    }

    let mut row = Row::new()
        .spacing(STACK_SPACING)
        .align_y(alignment::Vertical::Center)
        .push(Container::new(body).width(Length::Fill));
    if let Some(close) = doc.child_with_class(node, CLOSE_CLASS) {
        row = row.push(
            button(text(doc.text(close)))
                .on_press(Message::Toast(toast::Message::Event(close, Event::Click)))
                .padding(2)
                .style(close_button_style),
        );
    }

    let tone = Tone::from_classes(doc.classes(node));
    let fading = doc.has_class(node, HIDE_MARKER);
    let card = Container::new(row)
        .width(Length::Fixed(TOAST_WIDTH))
        .padding(CARD_PADDING)
        .style(move |theme: &Theme| toast_container_style(theme, tone, fading));

    mouse_area(card)
        .on_enter(Message::Toast(toast::Message::Event(node, Event::PointerEnter)))
        .on_exit(Message::Toast(toast::Message::Event(node, Event::PointerLeave)))
        .on_press(Message::Toast(toast::Message::Event(node, Event::Click)))
        .into()
}

/// Remaining countdown fraction stored on a progress element.
fn progress_value(doc: &Document, progress: NodeId) -> Option<f32> {
    doc.style(progress, PROGRESS_PROPERTY)?.trim().parse().ok()
}

fn horizontal(position: Position) -> alignment::Horizontal {
    match position {
        Position::Left => alignment::Horizontal::Left,
        Position::Center => alignment::Horizontal::Center,
        Position::Right => alignment::Horizontal::Right,
    }
}

fn vertical(gravity: Gravity) -> alignment::Vertical {
    match gravity {
        Gravity::Top => alignment::Vertical::Top,
        Gravity::Bottom => alignment::Vertical::Bottom,
    }
}

fn accent_color(theme: &Theme, tone: Tone) -> Color {
    let palette = theme.palette();
    match tone {
        Tone::Neutral => palette.primary,
        Tone::Success => palette.success,
        Tone::Error => palette.danger,
    }
}

/// Style function for a toast card.
fn toast_container_style(theme: &Theme, tone: Tone, fading: bool) -> container::Style {
    let mut bg_color = theme.extended_palette().background.base.color;
    if fading {
        bg_color.a *= 0.6;
    }

    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: accent_color(theme, tone),
            width: 2.0,
            radius: 6.0.into(),
        },
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

/// Style function for the close affordance.
fn close_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => Some(iced::Background::Color(
            Color {
                a: 0.2,
                ..base.text
            },
        )),
        button::Status::Active | button::Status::Disabled => None,
    };

    button::Style {
        background,
        text_color: base.text,
        border: iced::Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        shadow: iced::Shadow::default(),
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::manual_manager as manager;
    use crate::toast::ToastOptions;

    #[test]
    fn toast_container_style_uses_tone_accent() {
        let theme = Theme::Dark;
        let style = toast_container_style(&theme, Tone::Error, false);

        assert_eq!(style.border.color, theme.palette().danger);
        assert!(style.background.is_some());
    }

    #[test]
    fn fading_cards_are_translucent() {
        let theme = Theme::Light;
        let solid = toast_container_style(&theme, Tone::Neutral, false);
        let fading = toast_container_style(&theme, Tone::Neutral, true);
        assert_ne!(solid.background, fading.background);
    }

    #[test]
    fn tone_follows_user_classes() {
        assert_eq!(Tone::from_classes(&["toast".into(), "error".into()]), Tone::Error);
        assert_eq!(Tone::from_classes(&["success".into()]), Tone::Success);
        assert_eq!(Tone::from_classes(&[]), Tone::Neutral);
    }

    #[test]
    fn corners_map_to_alignment() {
        assert_eq!(horizontal(Position::Center), alignment::Horizontal::Center);
        assert_eq!(vertical(Gravity::Bottom), alignment::Vertical::Bottom);
    }

    #[test]
    fn progress_value_reads_countdown_property() {
        let mut manager = manager();
        let id = manager
            .create(ToastOptions::text("x").duration(Duration::from_secs(2)))
            .show()
            .id();
        let progress = manager.progress(id).expect("progress element");

        assert_eq!(progress_value(manager.surface(), progress), Some(1.0));
    }

    #[test]
    fn viewport_message_resizes_document_and_schedules_remeasure() {
        let mut manager = manager();
        update(&mut manager, Message::Viewport(Size::new(640.0, 480.0)));

        assert_eq!(manager.surface().viewport(), (640.0, 480.0));
        assert!(manager.next_deadline().is_some());
    }

    #[test]
    fn overlay_builds_for_shown_toasts() {
        let mut manager = manager();
        let _ = manager.create(ToastOptions::text("a").close(true)).show();
        let _ = manager
            .create(ToastOptions::text("b").position(Position::Left))
            .show();

        let _element = overlay(&manager);
    }
}
