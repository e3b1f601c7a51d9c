// SPDX-License-Identifier: MPL-2.0
//! Test helpers shared by the unit tests.
//!
//! Re-exports the `approx` assertion macros for progress fractions and
//! builds managers on a manual clock.

pub use approx::assert_relative_eq;

use crate::config::Config;
use crate::document::Document;
use crate::timer::ManualClock;
use crate::toast::Manager;

/// A manager over a fresh document whose time only moves when told to.
pub fn manual_manager() -> Manager<Document, ManualClock> {
    let config = Config::default();
    let document = Document::new(&config);
    Manager::with_clock(document, ManualClock::new(), config)
}
