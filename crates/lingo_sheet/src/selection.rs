//! Single-selection list controller
//!
//! Owns the rows of a language list and the one pending selection. At most
//! one row is active at any time, and it is always the row whose code equals
//! the pending selection.
//!
//! # Example
//!
//! ```
//! use lingo_i18n::LanguageEntry;
//! use lingo_sheet::selection::SelectionController;
//!
//! let mut list = SelectionController::new();
//! list.initialize(
//!     vec![
//!         LanguageEntry::new("en", "English", "English"),
//!         LanguageEntry::new("es", "Spanish", "Español"),
//!     ],
//!     "en",
//! );
//! list.select("es").unwrap();
//! assert_eq!(list.commit(), Some("es"));
//! ```

use lingo_i18n::{normalize_locale, LanguageEntry};
use thiserror::Error;
use tracing::{debug, warn};

/// A rendered, clickable language row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListItem {
    pub code: String,
    pub english_name: String,
    pub native_name: String,
    active: bool,
    checked: bool,
}

impl ListItem {
    /// Row codes are normalized so they compare equal to normalized input.
    fn from_entry(entry: LanguageEntry) -> Self {
        Self {
            code: normalize_locale(&entry.code),
            english_name: entry.english_name,
            native_name: entry.native_name,
            active: false,
            checked: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the check indicator is shown.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
        self.checked = active;
    }
}

/// Controller lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// Before `initialize`
    #[default]
    NoSelection,
    OneSelected,
}

/// Why a catalog entry was left out of the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    MissingNativeName,
}

/// Data-integrity diagnostic recorded during `initialize`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEntry {
    pub code: String,
    pub reason: SkipReason,
}

/// Result of a successful `select`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Empty code or already selected
    Unchanged,
    Changed { from: Option<String>, to: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown selection `{0}`")]
    UnknownSelection(String),

    #[error("selection list has not been initialized")]
    NotInitialized,
}

/// Maintains the at-most-one-active invariant over a language list.
#[derive(Clone, Debug, Default)]
pub struct SelectionController {
    items: Vec<ListItem>,
    selected: Option<String>,
    active: Option<usize>,
    warnings: Vec<SkippedEntry>,
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the rows for `entries` and mark `initial_code` active.
    ///
    /// Entries without a native name are skipped and recorded in
    /// [`warnings`](Self::warnings). Order is preserved; callers sort
    /// beforehand (see [`LocaleCatalog::sorted_entries`](lingo_i18n::LocaleCatalog::sorted_entries)).
    ///
    /// If `initial_code` has no exact row, the row for its primary language
    /// subtag is used (`es-MX` selects `es`). With no match at all the
    /// selection keeps `initial_code` and no row is active.
    pub fn initialize<I>(&mut self, entries: I, initial_code: &str) -> &[ListItem]
    where
        I: IntoIterator<Item = LanguageEntry>,
    {
        self.items.clear();
        self.warnings.clear();
        self.active = None;

        for entry in entries {
            if entry.native_name.trim().is_empty() {
                warn!(code = %entry.code, "language has no native name, skipping");
                self.warnings.push(SkippedEntry {
                    code: entry.code,
                    reason: SkipReason::MissingNativeName,
                });
                continue;
            }
            self.items.push(ListItem::from_entry(entry));
        }

        let initial = normalize_locale(initial_code);
        let idx = self.position(&initial).or_else(|| {
            let primary = initial.split('-').next().unwrap_or_default();
            if primary.is_empty() || primary == initial {
                None
            } else {
                self.position(primary)
            }
        });

        match idx {
            Some(i) => {
                self.items[i].set_active(true);
                self.active = Some(i);
                self.selected = Some(self.items[i].code.clone());
            }
            None => {
                debug!(code = %initial, "initial language is not in the list");
                self.selected = (!initial.is_empty()).then_some(initial);
            }
        }
        self.state = SelectionState::OneSelected;

        &self.items
    }

    /// Move the selection to `code`.
    ///
    /// Empty codes and the current selection are no-ops. Unknown codes are
    /// rejected without touching any state.
    pub fn select(&mut self, code: &str) -> Result<SelectOutcome, SelectionError> {
        let code = normalize_locale(code);
        if code.is_empty() {
            return Ok(SelectOutcome::Unchanged);
        }
        if self.state == SelectionState::NoSelection {
            return Err(SelectionError::NotInitialized);
        }
        if self.selected.as_deref() == Some(code.as_str()) {
            return Ok(SelectOutcome::Unchanged);
        }

        let Some(next) = self.position(&code) else {
            warn!(code = %code, "selected language is not in the list");
            return Err(SelectionError::UnknownSelection(code));
        };

        if let Some(prev) = self.active.take() {
            self.items[prev].set_active(false);
        }
        self.items[next].set_active(true);
        self.active = Some(next);

        let from = self.selected.replace(code.clone());
        debug!(from = ?from, to = %code, "language selection changed");
        Ok(SelectOutcome::Changed { from, to: code })
    }

    /// The pending selection. `None` before `initialize`.
    pub fn commit(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn active_item(&self) -> Option<&ListItem> {
        self.active.map(|i| &self.items[i])
    }

    pub fn warnings(&self) -> &[SkippedEntry] {
        &self.warnings
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    fn position(&self, code: &str) -> Option<usize> {
        self.items.iter().position(|item| item.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entries() -> Vec<LanguageEntry> {
        vec![
            LanguageEntry::new("en", "English", "English"),
            LanguageEntry::new("es", "Spanish", "Español"),
        ]
    }

    fn active_codes(list: &SelectionController) -> Vec<&str> {
        list.items()
            .iter()
            .filter(|i| i.is_active())
            .map(|i| i.code.as_str())
            .collect()
    }

    #[test]
    fn initialize_marks_initial_code() {
        let mut list = SelectionController::new();
        let items = list.initialize(entries(), "es");

        assert_eq!(items.len(), 2);
        assert!(!items[0].is_active());
        assert!(items[1].is_active() && items[1].is_checked());
        assert_eq!(list.state(), SelectionState::OneSelected);
    }

    #[test]
    fn initialize_skips_missing_native_names() {
        let mut list = SelectionController::new();
        let items = list.initialize(
            vec![
                LanguageEntry::new("xx", "Unknown", ""),
                LanguageEntry::new("en", "English", "English"),
            ],
            "en",
        );

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].code, "en");
        assert_eq!(
            list.warnings(),
            &[SkippedEntry {
                code: "xx".to_string(),
                reason: SkipReason::MissingNativeName,
            }]
        );
    }

    #[test]
    fn initialize_falls_back_to_primary_subtag() {
        let mut list = SelectionController::new();
        list.initialize(entries(), "es_MX");
        assert_eq!(list.commit(), Some("es"));
        assert_eq!(active_codes(&list), vec!["es"]);
    }

    #[test]
    fn initialize_with_unlisted_language_keeps_code() {
        let mut list = SelectionController::new();
        list.initialize(entries(), "fr");
        assert_eq!(list.commit(), Some("fr"));
        assert!(list.active_item().is_none());

        // Picking a listed language still works from here.
        list.select("en").unwrap();
        assert_eq!(active_codes(&list), vec!["en"]);
    }

    #[test]
    fn select_moves_the_single_active_row() {
        let mut list = SelectionController::new();
        list.initialize(entries(), "en");

        let outcome = list.select("es").unwrap();
        assert_eq!(
            outcome,
            SelectOutcome::Changed {
                from: Some("en".to_string()),
                to: "es".to_string(),
            }
        );
        assert_eq!(active_codes(&list), vec!["es"]);
        assert_eq!(list.commit(), Some("es"));
    }

    #[test]
    fn select_current_or_empty_is_noop() {
        let mut list = SelectionController::new();
        list.initialize(entries(), "en");
        let before = list.items().to_vec();

        assert_eq!(list.select("en").unwrap(), SelectOutcome::Unchanged);
        assert_eq!(list.select("").unwrap(), SelectOutcome::Unchanged);
        assert_eq!(list.items(), before.as_slice());
    }

    #[test]
    fn unknown_code_is_rejected() {
        let mut list = SelectionController::new();
        list.initialize(entries(), "en");

        let err = list.select("zz").unwrap_err();
        assert_eq!(err, SelectionError::UnknownSelection("zz".to_string()));
        assert_eq!(list.commit(), Some("en"));
        assert_eq!(active_codes(&list), vec!["en"]);
    }

    #[test]
    fn select_before_initialize_fails() {
        let mut list = SelectionController::new();
        assert_eq!(list.select("en"), Err(SelectionError::NotInitialized));
        assert_eq!(list.commit(), None);
    }

    #[test]
    fn reinitialize_replaces_rows_and_warnings() {
        let mut list = SelectionController::new();
        list.initialize(vec![LanguageEntry::new("xx", "X", " ")], "xx");
        assert_eq!(list.warnings().len(), 1);

        list.initialize(entries(), "en");
        assert!(list.warnings().is_empty());
        assert_eq!(list.items().len(), 2);
        assert_eq!(active_codes(&list), vec!["en"]);
    }
}
