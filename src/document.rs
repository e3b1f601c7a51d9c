// SPDX-License-Identifier: MPL-2.0
//! Headless retained element tree.
//!
//! `Document` is the default [`Surface`]: an arena of elements with class
//! lists, text, inline styles and a small layout model good enough to give
//! toasts a natural size. It also acts as the styling layer, starting
//! animations when class markers are set and reporting their completion
//! from [`Surface::take_animation_ends`].
//!
//! # Layout model
//!
//! - Text is laid out on a monospace grid (`char_width` x `line_height`) and
//!   wraps at the element's effective width.
//! - The effective width is the `max-width` inline style when it is a pixel
//!   length, otherwise the parent's width (the viewport for the body).
//! - Children stack vertically under the element's own text.
//! - Toast containers are as wide as the viewport, capped at
//!   `container_width`.

use crate::config::{AnimationConfig, Config, LayoutConfig};
use crate::surface::{parse_px, Animation, AnimationEnd, NodeId, Priority, Rect, Surface};
use slotmap::SlotMap;
use std::time::{Duration, Instant};

/// Class that marks a stacking container.
pub const CONTAINER_CLASS: &str = "toast-container";

#[derive(Debug, Clone)]
struct StyleEntry {
    property: String,
    value: String,
    priority: Priority,
}

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    text: String,
    style: Vec<StyleEntry>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Animation started by a class marker.
#[derive(Debug, Clone)]
pub struct AnimationRule {
    pub class: String,
    pub animation: Animation,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
struct Running {
    node: NodeId,
    animation: Animation,
    ends_at: Instant,
}

#[derive(Debug)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    body: NodeId,
    layout: LayoutConfig,
    rules: Vec<AnimationRule>,
    running: Vec<Running>,
    clock: Instant,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Document {
    /// Creates an empty document with a `body` element.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(Node {
            tag: "body".to_string(),
            ..Node::default()
        });
        Self {
            nodes,
            body,
            layout: config.layout,
            rules: default_rules(&config.animation),
            running: Vec::new(),
            clock: Instant::now(),
        }
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Replaces the class-to-animation rules.
    pub fn set_animation_rules(&mut self, rules: Vec<AnimationRule>) {
        self.rules = rules;
    }

    /// Resizes the viewport. The host is expected to notify the manager.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.layout.viewport_width = width;
        self.layout.viewport_height = height;
    }

    #[must_use]
    pub fn viewport(&self) -> (f32, f32) {
        (self.layout.viewport_width, self.layout.viewport_height)
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Whether `node` is attached (transitively) to the body.
    #[must_use]
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.body {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.tag.as_str())
    }

    #[must_use]
    pub fn text(&self, node: NodeId) -> &str {
        self.nodes.get(node).map_or("", |n| n.text.as_str())
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node).map_or(&[], |n| n.children.as_slice())
    }

    #[must_use]
    pub fn classes(&self, node: NodeId) -> &[String] {
        self.nodes.get(node).map_or(&[], |n| n.classes.as_slice())
    }

    /// First child of `node` carrying `class`.
    #[must_use]
    pub fn child_with_class(&self, node: NodeId, class: &str) -> Option<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .find(|child| self.has_class(*child, class))
    }

    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.style_entry(node, property).map(|(value, _)| value)
    }

    #[must_use]
    pub fn style_entry(&self, node: NodeId, property: &str) -> Option<(&str, Priority)> {
        self.nodes
            .get(node)?
            .style
            .iter()
            .find(|entry| entry.property == property)
            .map(|entry| (entry.value.as_str(), entry.priority))
    }

    /// Number of animations still playing.
    #[must_use]
    pub fn running_animations(&self) -> usize {
        self.running.len()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(node).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(parent) {
            parent.children.retain(|child| *child != node);
        }
    }

    fn start_animation(&mut self, node: NodeId, class: &str) {
        if !self.is_connected(node) {
            return;
        }
        let Some(rule) = self.rules.iter().find(|rule| rule.class == class) else {
            return;
        };
        let running = Running {
            node,
            animation: rule.animation.clone(),
            ends_at: self.clock + rule.duration,
        };
        // A new animation on the same element replaces the running one.
        self.running.retain(|r| r.node != node);
        self.running.push(running);
    }

    fn is_container(&self, node: NodeId) -> bool {
        self.has_class(node, CONTAINER_CLASS)
    }

    /// Width available to the content of `node`.
    fn available_width(&self, node: NodeId) -> f32 {
        let own = self
            .nodes
            .get(node)
            .and_then(|n| n.style.iter().find(|e| e.property == "max-width"))
            .and_then(|e| parse_px(&e.value));
        if let Some(width) = own {
            return width;
        }
        if self.is_container(node) {
            return self.container_width();
        }
        match self.nodes.get(node).and_then(|n| n.parent) {
            Some(parent) => self.available_width(parent),
            None => self.layout.viewport_width,
        }
    }

    fn container_width(&self) -> f32 {
        self.layout.viewport_width.min(self.layout.container_width)
    }

    fn measure(&self, node: NodeId, available: f32) -> (f32, f32) {
        let Some(data) = self.nodes.get(node) else {
            return (0.0, 0.0);
        };
        let available = data
            .style
            .iter()
            .find(|e| e.property == "max-width")
            .and_then(|e| parse_px(&e.value))
            .unwrap_or(available)
            .max(self.layout.char_width);

        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;
        let chars = data.text.chars().count();
        if chars > 0 {
            let per_line = (available / self.layout.char_width).floor().max(1.0) as usize;
            let lines = chars.div_ceil(per_line);
            width = (chars.min(per_line) as f32) * self.layout.char_width;
            height = lines as f32 * self.layout.line_height;
        }
        for child in &data.children {
            let (w, h) = self.measure(*child, available);
            width = width.max(w);
            height += h;
        }

        if let Some(max_height) = data
            .style
            .iter()
            .find(|e| e.property == "max-height")
            .and_then(|e| parse_px(&e.value))
        {
            height = height.min(max_height);
        }
        (width, height)
    }
}

fn default_rules(config: &AnimationConfig) -> Vec<AnimationRule> {
    vec![
        AnimationRule {
            class: "show".to_string(),
            animation: Animation::Enter,
            duration: Duration::from_millis(config.enter_ms),
        },
        AnimationRule {
            class: "hide".to_string(),
            animation: Animation::Exit,
            duration: Duration::from_millis(config.exit_ms),
        },
    ]
}

impl Surface for Document {
    fn body(&self) -> NodeId {
        self.body
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Node {
            tag: tag.to_string(),
            ..Node::default()
        })
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        let Some(data) = self.nodes.get_mut(node) else {
            return;
        };
        if data.classes.iter().any(|c| c == class) {
            return;
        }
        data.classes.push(class.to_string());
        self.start_animation(node, class);
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.classes.retain(|c| c != class);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn replace_class(&mut self, node: NodeId, old: &str, new: &str) -> bool {
        let Some(data) = self.nodes.get_mut(node) else {
            return false;
        };
        let Some(index) = data.classes.iter().position(|c| c == old) else {
            return false;
        };
        if data.classes.iter().any(|c| c == new) {
            data.classes.remove(index);
        } else {
            data.classes[index] = new.to_string();
        }
        self.start_animation(node, new);
        true
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.text = text.to_string();
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }
        // An element cannot become its own descendant.
        if self.is_inclusive_ancestor(child, parent) {
            return;
        }
        self.detach(child);
        if let Some(data) = self.nodes.get_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = self.nodes.get_mut(parent) {
            let index = reference
                .and_then(|r| data.children.iter().position(|c| *c == r))
                .unwrap_or(data.children.len());
            data.children.insert(index, child);
        }
    }

    fn remove(&mut self, node: NodeId) {
        self.detach(node);
        self.running.retain(|r| r.node != node);
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).first().copied()
    }

    fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).last().copied()
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let index = siblings.iter().position(|c| *c == node)?;
        siblings.get(index + 1).copied()
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str, priority: Priority) {
        let Some(data) = self.nodes.get_mut(node) else {
            return;
        };
        match data.style.iter_mut().find(|e| e.property == property) {
            Some(entry) => {
                entry.value = value.to_string();
                entry.priority = priority;
            }
            None => data.style.push(StyleEntry {
                property: property.to_string(),
                value: value.to_string(),
                priority,
            }),
        }
    }

    fn remove_style(&mut self, node: NodeId, property: &str) {
        if let Some(data) = self.nodes.get_mut(node) {
            data.style.retain(|e| e.property != property);
        }
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        if !self.nodes.contains_key(node) {
            return Rect::default();
        }
        if node == self.body {
            return Rect::new(
                0.0,
                0.0,
                self.layout.viewport_width,
                self.layout.viewport_height,
            );
        }
        if self.is_container(node) {
            let (_, height) = self.measure(node, self.container_width());
            return Rect::new(0.0, 0.0, self.container_width(), height);
        }
        let available = match self.parent(node) {
            Some(parent) => self.available_width(parent),
            None => self.layout.viewport_width,
        };
        let (width, height) = self.measure(node, available);
        Rect::new(0.0, 0.0, width, height)
    }

    fn sync_time(&mut self, now: Instant) {
        self.clock = now;
    }

    fn take_animation_ends(&mut self, now: Instant) -> Vec<AnimationEnd> {
        self.clock = now;
        let (done, pending): (Vec<_>, Vec<_>) =
            self.running.drain(..).partition(|r| r.ends_at <= now);
        self.running = pending;
        done.into_iter()
            .map(|r| AnimationEnd {
                target: r.node,
                animation: r.animation,
            })
            .collect()
    }

    fn release(&mut self, node: NodeId) {
        self.detach(node);
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(data) = self.nodes.remove(id) {
                stack.extend(data.children);
            }
            self.running.retain(|r| r.node != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::default()
    }

    #[test]
    fn insert_before_orders_children() {
        let mut doc = doc();
        let parent = doc.create_element("div");
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let c = doc.create_element("div");

        doc.append_child(parent, a);
        doc.insert_before(parent, b, Some(a));
        doc.insert_before(parent, c, None);

        assert_eq!(doc.children(parent), &[b, a, c]);
        assert_eq!(doc.first_child(parent), Some(b));
        assert_eq!(doc.last_child(parent), Some(c));
        assert_eq!(doc.next_sibling(a), Some(c));
        assert_eq!(doc.next_sibling(c), None);
    }

    #[test]
    fn appending_moves_node_between_parents() {
        let mut doc = doc();
        let first = doc.create_element("div");
        let second = doc.create_element("div");
        let child = doc.create_element("span");

        doc.append_child(first, child);
        doc.append_child(second, child);

        assert!(doc.children(first).is_empty());
        assert_eq!(doc.children(second), &[child]);
        assert_eq!(doc.parent(child), Some(second));
    }

    #[test]
    fn replace_class_reports_missing_class() {
        let mut doc = doc();
        let node = doc.create_element("div");
        assert!(!doc.replace_class(node, "hide", "show"));
        doc.add_class(node, "hide");
        assert!(doc.replace_class(node, "hide", "show"));
        assert_eq!(doc.classes(node), &["show".to_string()]);
    }

    #[test]
    fn text_wraps_at_max_width() {
        let mut doc = doc();
        let node = doc.create_element("div");
        doc.append_child(doc.body(), node);
        doc.set_text(node, &"x".repeat(30));

        let wide = doc.bounding_rect(node);
        assert_eq!(wide.width, 30.0 * DEFAULT_CHAR);
        assert_eq!(wide.height, DEFAULT_LINE);

        doc.set_style(node, "max-width", "80px", Priority::Important);
        let narrow = doc.bounding_rect(node);
        assert_eq!(narrow.width, 80.0);
        assert_eq!(narrow.height, 3.0 * DEFAULT_LINE);
    }

    #[test]
    fn container_width_is_capped() {
        let mut doc = doc();
        let container = doc.create_element("div");
        doc.add_class(container, CONTAINER_CLASS);
        doc.append_child(doc.body(), container);
        assert_eq!(doc.bounding_rect(container).width, 360.0);

        doc.set_viewport(200.0, 400.0);
        assert_eq!(doc.bounding_rect(container).width, 200.0);
    }

    #[test]
    fn animations_only_run_on_connected_nodes() {
        let mut doc = doc();
        let node = doc.create_element("div");
        doc.add_class(node, "show");
        assert_eq!(doc.running_animations(), 0);

        doc.remove_class(node, "show");
        doc.append_child(doc.body(), node);
        doc.add_class(node, "show");
        assert_eq!(doc.running_animations(), 1);
    }

    #[test]
    fn animation_end_reported_after_duration() {
        let mut doc = doc();
        let start = Instant::now();
        doc.sync_time(start);

        let node = doc.create_element("div");
        doc.append_child(doc.body(), node);
        doc.add_class(node, "hide");

        assert!(doc.take_animation_ends(start + Duration::from_millis(100)).is_empty());
        let ends = doc.take_animation_ends(start + Duration::from_millis(400));
        assert_eq!(
            ends,
            vec![AnimationEnd {
                target: node,
                animation: Animation::Exit
            }]
        );
        assert_eq!(doc.running_animations(), 0);
    }

    #[test]
    fn release_frees_subtree() {
        let mut doc = doc();
        let root = doc.create_element("div");
        let child = doc.create_element("div");
        doc.append_child(root, child);
        doc.append_child(doc.body(), root);

        doc.release(root);
        assert!(!doc.contains(root));
        assert!(!doc.contains(child));
        assert!(doc.children(doc.body()).is_empty());
        assert_eq!(doc.node_count(), 1);
    }

    #[test]
    fn inserting_ancestor_into_descendant_is_ignored() {
        let mut doc = doc();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(doc.body(), outer);
        doc.append_child(outer, inner);

        doc.append_child(inner, outer);
        doc.append_child(outer, outer);

        assert_eq!(doc.parent(outer), Some(doc.body()));
        assert_eq!(doc.children(inner), &[] as &[NodeId]);
        assert_eq!(doc.children(outer), &[inner]);
        assert!(doc.is_connected(inner));
    }

    const DEFAULT_CHAR: f32 = crate::config::DEFAULT_CHAR_WIDTH;
    const DEFAULT_LINE: f32 = crate::config::DEFAULT_LINE_HEIGHT;
}
