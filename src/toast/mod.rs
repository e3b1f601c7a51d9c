// SPDX-License-Identifier: MPL-2.0
//! Toast notification system.
//!
//! Toasts are transient messages stacked in one of six screen corners. They
//! animate in, optionally count down to an automatic dismissal (paused while
//! the pointer is over them), and animate out before being detached.
//!
//! # Components
//!
//! - [`options`] - `ToastOptions` builder, gravity/position and close reasons
//! - [`manager`] - `Manager` owning containers, toasts, listeners and timers
//! - [`instance`] - element tree of a single toast and its lifecycle phase
//! - [`countdown`] - auto-dismiss countdown with progress updates
//! - [`measure`] - offscreen measurement of a toast's natural size
//! - [`container`] - per-corner stacking containers
//! - [`events`] - listener table routing front-end events
//!
//! # Usage
//!
//! ```
//! use iced_toastify::document::Document;
//! use iced_toastify::toast::{Manager, ToastOptions};
//! use std::time::Duration;
//!
//! let mut manager = Manager::new(Document::default());
//! let id = manager
//!     .create(
//!         ToastOptions::text("Image saved")
//!             .duration(Duration::from_secs(3))
//!             .close(true),
//!     )
//!     .show()
//!     .id();
//!
//! // Drive timers and animations from the host's event loop.
//! manager.tick();
//! assert!(manager.is_active(id));
//! ```
//!
//! # Styling contract
//!
//! The styling layer sees the classes `toast`, `toast-content`,
//! `toast-progress`, `toast-close`, `toast-container`, `toast-{gravity}`,
//! `toast-{position}`, the state markers `show`/`hide`, and the custom
//! properties `--toast-height`, `--toast-width` and `--toast-progress`.
//! It must report the end of the exit animation as
//! [`Animation::Exit`](crate::surface::Animation::Exit).

pub mod container;
pub mod countdown;
pub mod events;
pub mod instance;
pub mod manager;
pub mod measure;
pub mod options;

pub use container::Containers;
pub use events::Event;
pub use instance::Phase;
pub use manager::{Manager, Message, ToastHandle};
pub use options::{
    ClickHandler, CloseEvent, CloseHandler, CloseReason, Gravity, Position, ToastContext, ToastId,
    ToastOptions,
};
