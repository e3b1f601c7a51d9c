// SPDX-License-Identifier: MPL-2.0
//! Inline style helper.
//!
//! User styles are keyed by camelCase property names (`backgroundColor`) and
//! may carry an `!important` marker inside the value string.

use crate::surface::{NodeId, Priority, Surface};

const IMPORTANT: &str = "!important";

/// Converts `backgroundColor` into `background-color`.
#[must_use]
pub fn camel_to_kebab(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for ch in property.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Splits the `!important` marker off a value.
#[must_use]
pub fn split_priority(value: &str) -> (String, Priority) {
    match value.find(IMPORTANT) {
        Some(at) => {
            let clean = format!("{}{}", &value[..at], &value[at + IMPORTANT.len()..]);
            (clean.trim().to_string(), Priority::Important)
        }
        None => (value.trim().to_string(), Priority::Normal),
    }
}

/// Applies `styles` to `node`. A `None` value removes the property.
pub fn apply_styles<S: Surface + ?Sized>(
    surface: &mut S,
    node: NodeId,
    styles: &[(String, Option<String>)],
) {
    for (key, value) in styles {
        let property = camel_to_kebab(key);
        match value {
            Some(value) => {
                let (clean, priority) = split_priority(value);
                surface.set_style(node, &property, &clean, priority);
            }
            None => surface.remove_style(node, &property),
        }
    }
}
