//! Sheet builder for slide-in panels
//!
//! Describes a modal panel (title, body nodes, footer) and hands it to a
//! [`PresentationHost`] to display.
//!
//! # Example
//!
//! ```ignore
//! use lingo_sheet::node::ListItemNode;
//! use lingo_sheet::sheet::{sheet, SheetSide};
//!
//! sheet()
//!     .side(SheetSide::Right)
//!     .title("Language")
//!     .child(ListItemNode::new("en", "English"))
//!     .on_close(|| println!("closed"))
//!     .show(&host);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::host::PresentationHost;
use crate::node::{ClickHandler, Node};

/// Sheet side variants - which edge the sheet slides from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SheetSide {
    Left,
    /// Slide in from the right edge (default)
    #[default]
    Right,
    Top,
    Bottom,
}

/// Everything a host needs to display a sheet.
#[derive(Clone)]
pub struct SheetConfig {
    pub side: SheetSide,
    pub title: Option<String>,
    pub content: Vec<Node>,
    pub footer: Option<Node>,
    /// Whether the host offers its own close control
    pub show_close: bool,
    /// Namespace class the host applies while the sheet is up
    pub class: Option<String>,
    on_close: Option<ClickHandler>,
}

impl SheetConfig {
    /// Notify the owner that the host dismissed the sheet (close button,
    /// escape, backdrop click).
    pub fn close(&self) {
        if let Some(ref cb) = self.on_close {
            cb();
        }
    }
}

impl fmt::Debug for SheetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetConfig")
            .field("side", &self.side)
            .field("title", &self.title)
            .field("content", &self.content)
            .field("footer", &self.footer)
            .field("show_close", &self.show_close)
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}

/// Builder for creating and showing sheets
pub struct SheetBuilder {
    side: SheetSide,
    title: Option<String>,
    content: Vec<Node>,
    footer: Option<Node>,
    show_close: bool,
    class: Option<String>,
    on_close: Option<ClickHandler>,
}

impl SheetBuilder {
    pub fn new() -> Self {
        Self {
            side: SheetSide::Right,
            title: None,
            content: Vec::new(),
            footer: None,
            show_close: true,
            class: None,
            on_close: None,
        }
    }

    pub fn side(mut self, side: SheetSide) -> Self {
        self.side = side;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Append a body node
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.content.push(node.into());
        self
    }

    /// Append several body nodes
    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        self.content.extend(nodes);
        self
    }

    pub fn footer(mut self, footer: impl Into<Node>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn show_close(mut self, show: bool) -> Self {
        self.show_close = show;
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Set the callback for when the host dismisses the sheet
    pub fn on_close<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_close = Some(Arc::new(callback));
        self
    }

    pub fn build(self) -> SheetConfig {
        SheetConfig {
            side: self.side,
            title: self.title,
            content: self.content,
            footer: self.footer,
            show_close: self.show_close,
            class: self.class,
            on_close: self.on_close,
        }
    }

    /// Build and show the sheet on `host`
    pub fn show(self, host: &dyn PresentationHost) {
        host.show_sheet(self.build());
    }
}

impl Default for SheetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new sheet builder
pub fn sheet() -> SheetBuilder {
    SheetBuilder::new()
}
