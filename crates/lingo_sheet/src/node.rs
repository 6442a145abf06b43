//! Headless content nodes
//!
//! The dialog describes what it wants on screen as a small tree of nodes;
//! the presentation host decides how to draw them and calls back into the
//! click handlers.

use std::fmt;
use std::sync::Arc;

/// Click callback attached to a node.
pub type ClickHandler = Arc<dyn Fn() + Send + Sync>;

/// Button visual variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Filled, used for the confirming action
    #[default]
    Primary,
    /// Outlined, used for dismissing
    Secondary,
}

/// A clickable button with a resolved label.
#[derive(Clone)]
pub struct ButtonNode {
    pub label: String,
    pub variant: ButtonVariant,
    on_click: Option<ClickHandler>,
}

impl ButtonNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            variant: ButtonVariant::Primary,
            on_click: None,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(callback));
        self
    }

    pub fn click(&self) {
        if let Some(ref cb) = self.on_click {
            cb();
        }
    }
}

impl fmt::Debug for ButtonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonNode")
            .field("label", &self.label)
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

/// One selectable row: a title, an optional subtitle and a check indicator.
#[derive(Clone)]
pub struct ListItemNode {
    /// Value reported back when the row is clicked
    pub value: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub active: bool,
    /// Whether the check indicator is drawn
    pub checked: bool,
    on_click: Option<ClickHandler>,
}

impl ListItemNode {
    pub fn new(value: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            title: title.into(),
            subtitle: None,
            active: false,
            checked: false,
            on_click: None,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Mark the row active and show its check indicator.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self.checked = active;
        self
    }

    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(callback));
        self
    }

    pub fn click(&self) {
        if let Some(ref cb) = self.on_click {
            cb();
        }
    }
}

impl fmt::Debug for ListItemNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListItemNode")
            .field("value", &self.value)
            .field("title", &self.title)
            .field("subtitle", &self.subtitle)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

/// Content tree handed to a presentation host.
#[derive(Clone, Debug)]
pub enum Node {
    /// Children laid out side by side
    Row(Vec<Node>),
    Button(ButtonNode),
    ListItem(ListItemNode),
}

impl Node {
    /// Depth-first walk over this node and its children.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        match self {
            Node::Row(children) => {
                for child in children {
                    child.visit(f);
                }
            }
            Node::Button(_) | Node::ListItem(_) => {}
        }
    }

    /// All buttons in this subtree, in visit order.
    pub fn buttons(&self) -> Vec<&ButtonNode> {
        let mut out = Vec::new();
        self.visit(&mut |n| {
            if let Node::Button(b) = n {
                out.push(b);
            }
        });
        out
    }

    /// All list rows in this subtree, in visit order.
    pub fn list_items(&self) -> Vec<&ListItemNode> {
        let mut out = Vec::new();
        self.visit(&mut |n| {
            if let Node::ListItem(item) = n {
                out.push(item);
            }
        });
        out
    }
}

impl From<ButtonNode> for Node {
    fn from(b: ButtonNode) -> Self {
        Node::Button(b)
    }
}

impl From<ListItemNode> for Node {
    fn from(item: ListItemNode) -> Self {
        Node::ListItem(item)
    }
}

/// Create a button node
pub fn button(label: impl Into<String>) -> ButtonNode {
    ButtonNode::new(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn click_fires_handler_and_clones_share_it() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let b = button("Save").on_click(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        b.click();
        b.clone().click();
        button("Cancel").click();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn visit_collects_nested_nodes() {
        let tree = Node::Row(vec![
            ListItemNode::new("en", "English").active(true).into(),
            Node::Row(vec![
                button("Save").into(),
                button("Cancel").variant(ButtonVariant::Secondary).into(),
            ]),
        ]);

        let labels: Vec<&str> = tree.buttons().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Save", "Cancel"]);

        let rows = tree.list_items();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].active && rows[0].checked);
    }
}
