// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Timing**: Countdown tick and resize debounce intervals
//! - **Animation**: Enter/exit durations of the headless stylesheet
//! - **Layout**: Text metrics and viewport of the headless document

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Interval between two countdown progress updates (in milliseconds).
pub const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 100;

/// Trailing debounce applied to viewport resize notifications (in milliseconds).
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 100;

/// Smallest accepted progress interval; anything lower is clamped.
pub const MIN_PROGRESS_INTERVAL_MS: u64 = 10;

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Duration of the entry animation (in milliseconds).
pub const DEFAULT_ENTER_MS: u64 = 400;

/// Duration of the exit animation (in milliseconds).
pub const DEFAULT_EXIT_MS: u64 = 400;

// ==========================================================================
// Layout Defaults
// ==========================================================================

/// Viewport width used by the headless document.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;

/// Viewport height used by the headless document.
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;

/// Advance width of a single character.
pub const DEFAULT_CHAR_WIDTH: f32 = 8.0;

/// Height of one line of text.
pub const DEFAULT_LINE_HEIGHT: f32 = 20.0;

/// Maximum width of a toast container.
pub const DEFAULT_CONTAINER_WIDTH: f32 = 360.0;
