//! Terminal presentation host
//!
//! Draws sheets as numbered text lists and forwards row picks to the
//! sheet's click handlers.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use lingo_sheet::{ListItemNode, Node, PresentationHost, SheetConfig, Toast, ToastVariant};
use tracing::debug;

#[derive(Default)]
pub struct TerminalHost {
    current: Mutex<Option<SheetConfig>>,
    classes: Mutex<BTreeSet<String>>,
    reload_requested: AtomicBool,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_showing(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub fn reload_requested(&self) -> bool {
        self.reload_requested.load(Ordering::SeqCst)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(class)
    }

    /// Click the 1-based row `n`. Returns false when there is no such row.
    pub fn click_row(&self, n: usize) -> bool {
        let row = {
            let current = self.current.lock().unwrap_or_else(|e| e.into_inner());
            current
                .as_ref()
                .and_then(|sheet| rows(sheet).into_iter().nth(n.wrapping_sub(1)).cloned())
        };
        match row {
            Some(row) => {
                row.click();
                true
            }
            None => false,
        }
    }

    /// Close the sheet as if the user pressed escape.
    pub fn dismiss(&self) {
        let sheet = self
            .current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(sheet) = sheet {
            sheet.close();
        }
    }
}

fn rows(sheet: &SheetConfig) -> Vec<&ListItemNode> {
    sheet.content.iter().flat_map(Node::list_items).collect()
}

/// Keys the `pick` prompt accepts for the footer buttons, in button order.
pub const FOOTER_KEYS: [char; 2] = ['s', 'c'];

/// Key that dismisses the sheet like an escape press.
pub const CLOSE_KEY: char = 'x';

/// Text rendering of a sheet.
pub fn render_sheet(sheet: &SheetConfig) -> String {
    let mut out = String::new();
    if let Some(ref title) = sheet.title {
        let _ = writeln!(out, "{title}");
        let _ = writeln!(out, "{}", "-".repeat(title.chars().count().max(8)));
    }

    for (i, row) in rows(sheet).into_iter().enumerate() {
        let mark = if row.checked { "x" } else { " " };
        let _ = write!(out, "{:>3}. [{mark}] {}", i + 1, row.title);
        if let Some(ref sub) = row.subtitle {
            let _ = write!(out, " ({sub})");
        }
        out.push('\n');
    }

    let mut hints: Vec<String> = sheet
        .footer
        .iter()
        .flat_map(Node::buttons)
        .zip(FOOTER_KEYS)
        .map(|(b, key)| format!("[{key}] {}", b.label))
        .collect();
    if sheet.show_close {
        hints.push(format!("[{CLOSE_KEY}] close"));
    }
    if !hints.is_empty() {
        let _ = writeln!(out, "\n{}", hints.join("   "));
    }
    out
}

impl PresentationHost for TerminalHost {
    fn show_sheet(&self, config: SheetConfig) {
        print!("\n{}", render_sheet(&config));
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(config);
    }

    fn hide_sheet(&self) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    fn add_class(&self, class: &str) {
        debug!(class, "host class added");
        self.classes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        debug!(class, "host class removed");
        self.classes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(class);
    }

    fn show_toast(&self, toast: Toast) {
        let prefix = match toast.variant {
            ToastVariant::Default => "",
            ToastVariant::Destructive => "error: ",
        };
        eprintln!("{prefix}{}", toast.title);
        if let Some(desc) = toast.description {
            eprintln!("  {desc}");
        }
    }

    fn reload(&self) {
        self.reload_requested.store(true, Ordering::SeqCst);
    }
}
