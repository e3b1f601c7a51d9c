// SPDX-License-Identifier: MPL-2.0
//! `iced_toastify` shows transient toast notifications in the corners of an
//! Iced window.
//!
//! The toast engine in [`toast`] drives a small presentation tree through the
//! [`surface::Surface`] port. [`document::Document`] implements that port
//! headlessly, and [`widget`] renders it with Iced and feeds pointer, window
//! and time events back to the manager.

#![doc(html_root_url = "https://docs.rs/iced_toastify/0.1.0")]

pub mod config;
pub mod document;
pub mod error;
pub mod style;
pub mod surface;
pub mod timer;
pub mod toast;
pub mod widget;

#[cfg(test)]
mod test_utils;
