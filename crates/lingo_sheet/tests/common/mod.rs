#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lingo_i18n::LocaleCatalog;
use lingo_sheet::{PersistenceError, PersistenceService, PresentationHost, SheetConfig, Toast};

#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    Show,
    Hide,
    AddClass(String),
    RemoveClass(String),
    Toast(Toast),
    Reload,
}

/// Host that records every call and keeps the last sheet for clicking.
#[derive(Default)]
pub struct RecordingHost {
    events: Mutex<Vec<HostEvent>>,
    current: Mutex<Option<SheetConfig>>,
}

impl RecordingHost {
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn sheet(&self) -> SheetConfig {
        self.current
            .lock()
            .unwrap()
            .clone()
            .expect("no sheet shown")
    }

    pub fn has_sheet(&self) -> bool {
        self.current.lock().unwrap().is_some()
    }

    /// (code, active) pairs of the rows currently shown.
    pub fn rows(&self) -> Vec<(String, bool)> {
        self.sheet()
            .content
            .iter()
            .flat_map(|n| n.list_items())
            .map(|item| (item.value.clone(), item.active))
            .collect()
    }

    pub fn click_row(&self, code: &str) {
        let sheet = self.sheet();
        let row = sheet
            .content
            .iter()
            .flat_map(|n| n.list_items())
            .find(|item| item.value == code)
            .cloned()
            .expect("row not shown");
        row.click();
    }

    pub fn click_button(&self, label: &str) {
        let sheet = self.sheet();
        let footer = sheet.footer.as_ref().expect("sheet has no footer");
        let button = footer
            .buttons()
            .into_iter()
            .find(|b| b.label == label)
            .cloned()
            .expect("button not shown");
        button.click();
    }

    fn push(&self, e: HostEvent) {
        self.events.lock().unwrap().push(e);
    }
}

impl PresentationHost for RecordingHost {
    fn show_sheet(&self, config: SheetConfig) {
        *self.current.lock().unwrap() = Some(config);
        self.push(HostEvent::Show);
    }

    fn hide_sheet(&self) {
        *self.current.lock().unwrap() = None;
        self.push(HostEvent::Hide);
    }

    fn add_class(&self, class: &str) {
        self.push(HostEvent::AddClass(class.to_string()));
    }

    fn remove_class(&self, class: &str) {
        self.push(HostEvent::RemoveClass(class.to_string()));
    }

    fn show_toast(&self, toast: Toast) {
        self.push(HostEvent::Toast(toast));
    }

    fn reload(&self) {
        self.push(HostEvent::Reload);
    }
}

/// In-memory store that can be told to fail.
#[derive(Default)]
pub struct FakeStore {
    pub fail: AtomicBool,
    saved: Mutex<Vec<String>>,
}

impl FakeStore {
    pub fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn saved(&self) -> Vec<String> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl PersistenceService for FakeStore {
    async fn apply_language(&self, code: &str) -> Result<(), PersistenceError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(PersistenceError::new("disk full"));
        }
        self.saved.lock().unwrap().push(code.to_string());
        Ok(())
    }
}

pub fn catalog() -> LocaleCatalog {
    LocaleCatalog::parse_yaml(
        r#"
es: ["es_ES", "Spanish", "Español"]
en: ["en_US", "English", "English"]
xx: ["xx", "Broken", ""]
fr: ["fr_FR", "French", "Français"]
"#,
    )
    .unwrap()
}

pub fn setup(store: FakeStore) -> (Arc<RecordingHost>, Arc<FakeStore>) {
    (Arc::new(RecordingHost::default()), Arc::new(store))
}
