// SPDX-License-Identifier: MPL-2.0
//! Per-corner stacking containers.

use super::options::{Gravity, Position};
use crate::document::CONTAINER_CLASS;
use crate::surface::{NodeId, Surface};
use std::collections::HashMap;

/// Lazily created containers, one per (gravity, position) pair.
///
/// Containers are never evicted: there are at most six of them.
#[derive(Debug, Default)]
pub struct Containers {
    by_key: HashMap<(Gravity, Position), NodeId>,
    order: Vec<(Gravity, Position)>,
}

impl Containers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the container for the pair, creating it on first use.
    pub fn get_or_create<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        gravity: Gravity,
        position: Position,
    ) -> NodeId {
        if let Some(node) = self.by_key.get(&(gravity, position)) {
            return *node;
        }
        let node = surface.create_element("div");
        surface.add_class(node, CONTAINER_CLASS);
        surface.add_class(node, &format!("toast-{}", gravity.as_str()));
        surface.add_class(node, &format!("toast-{}", position.as_str()));
        let body = surface.body();
        surface.append_child(body, node);

        tracing::debug!(id = %container_id(gravity, position), "Created toast container");
        self.by_key.insert((gravity, position), node);
        self.order.push((gravity, position));
        node
    }

    #[must_use]
    pub fn get(&self, gravity: Gravity, position: Position) -> Option<NodeId> {
        self.by_key.get(&(gravity, position)).copied()
    }

    /// Registered containers in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (Gravity, Position, NodeId)> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.by_key.get(key).map(|node| (key.0, key.1, *node)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Element id conventionally given to a container.
#[must_use]
pub fn container_id(gravity: Gravity, position: Position) -> String {
    format!(
        "toast-container-{}-{}",
        gravity.as_str(),
        position.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn same_pair_returns_same_container() {
        let mut doc = Document::default();
        let mut containers = Containers::new();

        for gravity in Gravity::ALL {
            for position in Position::ALL {
                let first = containers.get_or_create(&mut doc, gravity, position);
                let second = containers.get_or_create(&mut doc, gravity, position);
                assert_eq!(first, second);
            }
        }
        assert_eq!(containers.len(), 6);
        assert_eq!(doc.children(doc.body()).len(), 6);
    }

    #[test]
    fn distinct_pairs_get_distinct_containers() {
        let mut doc = Document::default();
        let mut containers = Containers::new();

        let top_right = containers.get_or_create(&mut doc, Gravity::Top, Position::Right);
        let bottom_right = containers.get_or_create(&mut doc, Gravity::Bottom, Position::Right);
        let top_left = containers.get_or_create(&mut doc, Gravity::Top, Position::Left);

        assert_ne!(top_right, bottom_right);
        assert_ne!(top_right, top_left);
        assert_ne!(bottom_right, top_left);
    }

    #[test]
    fn container_is_tagged_and_attached() {
        let mut doc = Document::default();
        let mut containers = Containers::new();
        let node = containers.get_or_create(&mut doc, Gravity::Bottom, Position::Center);

        assert!(doc.has_class(node, "toast-container"));
        assert!(doc.has_class(node, "toast-bottom"));
        assert!(doc.has_class(node, "toast-center"));
        assert_eq!(doc.parent(node), Some(doc.body()));
        assert_eq!(containers.get(Gravity::Bottom, Position::Center), Some(node));
        assert_eq!(container_id(Gravity::Bottom, Position::Center), "toast-container-bottom-center");
    }

    #[test]
    fn iteration_follows_creation_order() {
        let mut doc = Document::default();
        let mut containers = Containers::new();
        containers.get_or_create(&mut doc, Gravity::Bottom, Position::Left);
        containers.get_or_create(&mut doc, Gravity::Top, Position::Right);

        let keys: Vec<_> = containers.iter().map(|(g, p, _)| (g, p)).collect();
        assert_eq!(
            keys,
            vec![(Gravity::Bottom, Position::Left), (Gravity::Top, Position::Right)]
        );
    }
}
